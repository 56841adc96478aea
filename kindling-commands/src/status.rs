use std::sync::atomic::Ordering;

use poise::serenity_prelude as serenity;
use tracing::{debug, error, info, warn};

use kindling_core::{Data, StatusMessage};
use kindling_utils::embed::DEFAULT_EMBED_COLOR;
use kindling_utils::formatting::{format_timestamp, now_unix_secs};
use kindling_utils::info::{BOT_NAME, VERSION};

pub const STATUS_TITLE: &str = "Bot Status";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusEvent {
    LoggedIn,
    Heartbeat,
}

impl StatusEvent {
    pub fn label(self) -> &'static str {
        match self {
            Self::LoggedIn => "Logged in",
            Self::Heartbeat => "Heartbeat",
        }
    }

    /// Whether the event gets a new message so the owner is notified.
    pub fn resends(self) -> bool {
        matches!(self, Self::LoggedIn)
    }
}

pub fn status_embed(event: StatusEvent, unix_secs: u64) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(STATUS_TITLE)
        .description(format!("{} v{} is online.", BOT_NAME, VERSION))
        .field(event.label(), format_timestamp(unix_secs), false)
        .color(DEFAULT_EMBED_COLOR)
}

/// Update the status embed in the owner's DMs.
///
/// Heartbeats edit the last status message in place and fall back to a new
/// message when it cannot be edited. Logins always send a new message.
pub async fn send_status(
    http: &serenity::Http,
    data: &Data,
    event: StatusEvent,
) -> Result<(), serenity::Error> {
    let Some(owner) = data.status_owner else {
        return Ok(());
    };

    let embed = status_embed(event, now_unix_secs());

    if !event.resends() {
        let current = *data.status_message.read().await;
        if let Some(current) = current {
            match current
                .channel_id
                .edit_message(
                    http,
                    current.message_id,
                    serenity::EditMessage::new().embed(embed.clone()),
                )
                .await
            {
                Ok(_) => return Ok(()),
                Err(source) => {
                    debug!(?source, "status message could not be edited; sending a new one");
                }
            }
        }
    }

    let channel = owner.create_dm_channel(http).await?;
    let message = channel
        .id
        .send_message(http, serenity::CreateMessage::new().embed(embed))
        .await?;

    *data.status_message.write().await = Some(StatusMessage {
        channel_id: message.channel_id,
        message_id: message.id,
    });

    Ok(())
}

/// Post the "logged in" status and start the heartbeat once per process.
pub async fn announce_ready(ctx: &serenity::Context, data: &Data) {
    if data.status_owner.is_none() {
        return;
    }

    report(send_status(&ctx.http, data, StatusEvent::LoggedIn).await);

    if data.status_loop_started.swap(true, Ordering::SeqCst) {
        return;
    }

    let ctx = ctx.clone();
    let data = data.clone();
    info!(
        interval_seconds = data.status_interval.as_secs(),
        "Status heartbeat started."
    );
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(data.status_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately.
        interval.tick().await;

        loop {
            interval.tick().await;
            report(send_status(&ctx.http, &data, StatusEvent::Heartbeat).await);
        }
    });
}

fn report(result: Result<(), serenity::Error>) {
    match result {
        Ok(()) => {}
        Err(source) if is_forbidden(&source) => {
            warn!("cannot send the status embed to the owner (DMs closed?)");
        }
        Err(source) => {
            error!(?source, "failed to update the status embed");
        }
    }
}

fn is_forbidden(source: &serenity::Error) -> bool {
    matches!(
        source,
        serenity::Error::Http(serenity::HttpError::UnsuccessfulRequest(response))
            if response.status_code.as_u16() == 403
    )
}
