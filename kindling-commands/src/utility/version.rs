use kindling_core::{Context, Error};

use crate::CommandMeta;
use crate::utility::embeds::version_embed;

pub const META: CommandMeta = CommandMeta {
    name: "version",
    desc: "Show the running version.",
    category: "utility",
    usage: "version",
};

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn version(ctx: Context<'_>) -> Result<(), Error> {
    ctx.send(poise::CreateReply::default().embed(version_embed()))
        .await?;
    Ok(())
}
