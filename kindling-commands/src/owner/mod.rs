pub mod kill;
pub mod reload;
pub mod stop;

use kindling_core::{Context, Error};

/// React with a check mark on prefix invocations, reply on slash invocations.
pub(crate) async fn acknowledge(ctx: Context<'_>) -> Result<(), Error> {
    match ctx {
        poise::Context::Prefix(prefix_ctx) => {
            prefix_ctx.msg.react(ctx.http(), '✅').await?;
        }
        poise::Context::Application(_) => {
            ctx.send(poise::CreateReply::default().ephemeral(true).content("✅"))
                .await?;
        }
    }
    Ok(())
}
