use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use poise::serenity_prelude as serenity;
use tokio::sync::RwLock;

use kindling_database::Database;

pub type Error = anyhow::Error;

/// Message currently carrying the editable status embed.
#[derive(Clone, Copy, Debug)]
pub struct StatusMessage {
    pub channel_id: serenity::ChannelId,
    pub message_id: serenity::MessageId,
}

#[derive(Clone, Debug)]
pub struct Data {
    pub db: Database,
    /// Recipient of the status embed, from `OWNER_ID`.
    pub status_owner: Option<serenity::UserId>,
    pub status_interval: Duration,
    pub enabled_cogs: BTreeSet<&'static str>,
    pub disabled_cogs: BTreeSet<String>,
    pub status_message: Arc<RwLock<Option<StatusMessage>>>,
    pub status_loop_started: Arc<AtomicBool>,
}

impl Data {
    pub fn cog_enabled(&self, name: &str) -> bool {
        self.enabled_cogs.contains(name)
    }
}

pub type Context<'a> = poise::Context<'a, Data, Error>;
