use poise::serenity_prelude as serenity;
use tracing::{debug, warn};

use kindling_database::Database;
use kindling_database::impls::settings::get_changelog_channel_id;
use kindling_utils::embed::DEFAULT_EMBED_COLOR;

/// Post a configuration change to the changelog channel, if one is set.
///
/// Failures are logged and never fail the command that made the change.
pub async fn send_to_changelog(http: &serenity::Http, db: &Database, description: impl Into<String>) {
    let channel_id = match get_changelog_channel_id(db).await {
        Ok(Some(id)) => id,
        Ok(None) => {
            debug!("no changelog channel configured");
            return;
        }
        Err(source) => {
            warn!(?source, "failed to read changelog channel");
            return;
        }
    };

    let embed = serenity::CreateEmbed::new()
        .title("Changelog")
        .description(description)
        .color(DEFAULT_EMBED_COLOR);

    if let Err(source) = serenity::ChannelId::new(channel_id)
        .send_message(http, serenity::CreateMessage::new().embed(embed))
        .await
    {
        warn!(?source, channel_id, "failed to post to changelog channel");
    }
}
