use poise::serenity_prelude as serenity;
use tracing::{debug, error};

use kindling_core::{Data, Error};
use kindling_database::impls::log::create_log_entry;
use kindling_database::impls::settings::get_prefix;
use kindling_utils::channel::classify_channel;

/// Record a qualifying message in the `log` table.
///
/// The insert runs on its own task; the message pipeline does not wait for
/// it. An unrecognized channel kind is returned as an error.
pub async fn handle_message_log(
    ctx: &serenity::Context,
    data: &Data,
    message: &serenity::Message,
) -> Result<(), Error> {
    let automated = message.author.bot || message.webhook_id.is_some();
    let prefix = get_prefix(&data.db).await?;
    if !qualifies(automated, &message.content, &prefix) {
        return Ok(());
    }

    let channel = message.channel(ctx).await?;
    let channel_type = classify_channel(&channel)?;

    let db = data.db.clone();
    let user_id = message.author.id.get();
    let channel_id = message.channel_id.get();
    let content = message.content.clone();

    tokio::spawn(async move {
        match create_log_entry(&db, user_id, &content, Some(channel_id), channel_type).await {
            Ok(entry) => debug!(log_id = entry.id, user_id, "message logged"),
            Err(source) => error!(?source, user_id, channel_id, "failed to write message log"),
        }
    });

    Ok(())
}

/// Messages from bots or webhooks and command invocations are never logged.
fn qualifies(automated: bool, content: &str, prefix: &str) -> bool {
    !automated && !is_command_invocation(content, prefix)
}

fn is_command_invocation(content: &str, prefix: &str) -> bool {
    content.starts_with(prefix)
}
