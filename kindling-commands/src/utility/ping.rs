use kindling_core::{Context, Error};

use crate::CommandMeta;
use crate::utility::embeds::ping_embed;

pub const META: CommandMeta = CommandMeta {
    name: "ping",
    desc: "Display bot latency.",
    category: "utility",
    usage: "ping",
};

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    let latency = ctx.ping().await;
    ctx.send(poise::CreateReply::default().embed(ping_embed(latency)))
        .await?;
    Ok(())
}
