use kindling_core::{Context, Error};

use crate::CommandMeta;
use crate::utility::embeds::github_embed;

pub const META: CommandMeta = CommandMeta {
    name: "github",
    desc: "Link to the source code.",
    category: "utility",
    usage: "github",
};

#[poise::command(prefix_command, slash_command, category = "Utility", aliases("gh"))]
pub async fn github(ctx: Context<'_>) -> Result<(), Error> {
    let avatar_url = ctx.cache().current_user().face();
    ctx.send(poise::CreateReply::default().embed(github_embed(Some(avatar_url))))
        .await?;
    Ok(())
}
