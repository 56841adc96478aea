use anyhow::Context as _;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::database::Database;

/// Settings key holding the active message-command prefix.
pub const PREFIX_KEY: &str = "prefix";
/// Prefix used until one is configured.
pub const DEFAULT_PREFIX: &str = ".";
/// Settings key holding the changelog channel ID.
pub const CHANGELOG_CHANNEL_KEY: &str = "changelog_channel";

/// Read the raw JSON text stored under `key`.
pub async fn get_setting_raw(db: &Database, key: &str) -> anyhow::Result<Option<String>> {
    let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = $1")
        .bind(key)
        .fetch_optional(db.pool())
        .await?;

    Ok(value)
}

/// Read and decode the value stored under `key`.
pub async fn get_setting<T>(db: &Database, key: &str) -> anyhow::Result<Option<T>>
where
    T: DeserializeOwned,
{
    get_setting_raw(db, key)
        .await?
        .map(|raw| serde_json::from_str(&raw))
        .transpose()
        .with_context(|| format!("failed to deserialize setting `{key}`"))
}

/// Store `value` under `key`, replacing any previous value.
pub async fn set_setting<T>(db: &Database, key: &str, value: &T) -> anyhow::Result<()>
where
    T: Serialize + ?Sized,
{
    let payload = serde_json::to_string(value)
        .with_context(|| format!("failed to serialize setting `{key}`"))?;

    sqlx::query(
        "INSERT INTO settings (key, value)
         VALUES ($1, $2)
         ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value",
    )
    .bind(key)
    .bind(payload)
    .execute(db.pool())
    .await?;

    Ok(())
}

/// Remove `key`. Returns whether a value was stored.
pub async fn delete_setting(db: &Database, key: &str) -> anyhow::Result<bool> {
    let deleted = sqlx::query("DELETE FROM settings WHERE key = $1")
        .bind(key)
        .execute(db.pool())
        .await?
        .rows_affected();

    Ok(deleted > 0)
}

pub async fn get_prefix(db: &Database) -> anyhow::Result<String> {
    Ok(get_setting::<String>(db, PREFIX_KEY)
        .await?
        .unwrap_or_else(|| DEFAULT_PREFIX.to_owned()))
}

pub async fn set_prefix(db: &Database, prefix: &str) -> anyhow::Result<()> {
    set_setting(db, PREFIX_KEY, prefix).await
}

pub async fn get_changelog_channel_id(db: &Database) -> anyhow::Result<Option<u64>> {
    get_setting(db, CHANGELOG_CHANNEL_KEY).await
}

pub async fn set_changelog_channel_id(db: &Database, channel_id: u64) -> anyhow::Result<()> {
    set_setting(db, CHANGELOG_CHANNEL_KEY, &channel_id).await
}

pub async fn clear_changelog_channel_id(db: &Database) -> anyhow::Result<()> {
    delete_setting(db, CHANGELOG_CHANNEL_KEY).await?;
    Ok(())
}
