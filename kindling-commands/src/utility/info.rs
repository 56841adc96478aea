use kindling_core::{Context, Error};
use kindling_database::impls::settings::get_prefix;

use crate::CommandMeta;
use crate::utility::embeds::build_info_embed;

pub const META: CommandMeta = CommandMeta {
    name: "info",
    desc: "Show information about the bot.",
    category: "utility",
    usage: "info",
};

#[poise::command(
    prefix_command,
    slash_command,
    category = "Utility",
    aliases("infos", "about")
)]
pub async fn info(ctx: Context<'_>) -> Result<(), Error> {
    let prefix = get_prefix(&ctx.data().db).await?;
    let (bot_id, avatar_url) = {
        let current_user = ctx.cache().current_user();
        (current_user.id, current_user.face())
    };

    ctx.send(poise::CreateReply::default().embed(build_info_embed(
        &prefix,
        bot_id,
        Some(avatar_url),
    )))
    .await?;
    Ok(())
}
