use tracing::info;

use crate::CommandMeta;
use crate::checks::is_owner;
use crate::owner::acknowledge;
use kindling_core::{Context, Error};

pub const META: CommandMeta = CommandMeta {
    name: "stop",
    desc: "Disconnect from Discord and shut down.",
    category: "owner",
    usage: "stop",
};

#[poise::command(prefix_command, slash_command, category = "Owner", check = "is_owner")]
pub async fn stop(ctx: Context<'_>) -> Result<(), Error> {
    acknowledge(ctx).await?;
    info!(user_id = %ctx.author().id, "Shutdown requested.");
    ctx.framework().shard_manager().shutdown_all().await;
    Ok(())
}
