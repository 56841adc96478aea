use crate::CommandMeta;
use crate::checks::is_owner;
use crate::owner::acknowledge;
use crate::status::announce_ready;
use kindling_core::{Context, Error};

pub const META: CommandMeta = CommandMeta {
    name: "reload",
    desc: "Re-run the startup announcement.",
    category: "owner",
    usage: "reload",
};

#[poise::command(prefix_command, slash_command, category = "Owner", check = "is_owner")]
pub async fn reload(ctx: Context<'_>) -> Result<(), Error> {
    announce_ready(ctx.serenity_context(), ctx.data()).await;
    acknowledge(ctx).await
}
