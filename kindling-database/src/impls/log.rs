use anyhow::Context as _;

use crate::database::Database;
use crate::model::log::{ChannelType, LogEntry, truncate_content};

#[derive(sqlx::FromRow)]
struct LogRow {
    id: i64,
    timestamp: i64,
    user_id: i64,
    content: String,
    channel_id: Option<i64>,
    channel_type: ChannelType,
}

/// Append one message to the `log` table.
///
/// Every call inserts a new row; identical arguments are not deduplicated.
pub async fn create_log_entry(
    db: &Database,
    user_id: u64,
    content: &str,
    channel_id: Option<u64>,
    channel_type: ChannelType,
) -> anyhow::Result<LogEntry> {
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;
    let channel_id_i64 = channel_id
        .map(i64::try_from)
        .transpose()
        .context("channel_id out of i64 range")?;

    let row: LogRow = sqlx::query_as(
        "INSERT INTO log (user_id, content, channel_id, channel_type)
         VALUES ($1, $2, $3, $4)
         RETURNING id, timestamp, user_id, content, channel_id, channel_type",
    )
    .bind(user_id_i64)
    .bind(truncate_content(content))
    .bind(channel_id_i64)
    .bind(channel_type)
    .fetch_one(db.pool())
    .await?;

    to_log_entry(row)
}

/// Most recent entries for one user, newest first.
pub async fn list_log_entries_for_user(
    db: &Database,
    user_id: u64,
    limit: u32,
) -> anyhow::Result<Vec<LogEntry>> {
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    let rows: Vec<LogRow> = sqlx::query_as(
        "SELECT id, timestamp, user_id, content, channel_id, channel_type
         FROM log
         WHERE user_id = $1
         ORDER BY id DESC
         LIMIT $2",
    )
    .bind(user_id_i64)
    .bind(i64::from(limit))
    .fetch_all(db.pool())
    .await?;

    rows.into_iter().map(to_log_entry).collect()
}

fn to_log_entry(row: LogRow) -> anyhow::Result<LogEntry> {
    Ok(LogEntry {
        id: u64::try_from(row.id).context("id row out of u64 range")?,
        timestamp: u64::try_from(row.timestamp).context("timestamp row out of u64 range")?,
        user_id: u64::try_from(row.user_id).context("user_id row out of u64 range")?,
        content: row.content,
        channel_id: row
            .channel_id
            .map(u64::try_from)
            .transpose()
            .context("channel_id row out of u64 range")?,
        channel_type: row.channel_type,
    })
}
