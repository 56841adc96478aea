use tracing::warn;

use crate::CommandMeta;
use crate::checks::is_owner;
use crate::owner::acknowledge;
use kindling_core::{Context, Error};

pub const META: CommandMeta = CommandMeta {
    name: "kill",
    desc: "Exit the process immediately with status 1.",
    category: "owner",
    usage: "kill",
};

#[poise::command(prefix_command, slash_command, category = "Owner", check = "is_owner")]
pub async fn kill(ctx: Context<'_>) -> Result<(), Error> {
    acknowledge(ctx).await?;
    warn!(user_id = %ctx.author().id, "Kill requested; exiting.");
    std::process::exit(1);
}
