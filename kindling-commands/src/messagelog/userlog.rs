use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::checks::can_view_userlog;
use kindling_core::{Context, Error};
use kindling_database::impls::log::list_log_entries_for_user;
use kindling_database::model::log::LogEntry;
use kindling_utils::embed::{EMBED_DESCRIPTION_LIMIT, USERLOG_COLOR, split_description};
use kindling_utils::formatting::shorten;

pub const META: CommandMeta = CommandMeta {
    name: "userlog",
    desc: "Show the latest logged messages of a user.",
    category: "messagelog",
    usage: "userlog <@user|user_id> [count]",
};

const DEFAULT_ENTRIES: u32 = 10;
const MAX_ENTRIES: u32 = 25;
const PREVIEW_CHARS: usize = 120;

#[poise::command(
    prefix_command,
    slash_command,
    category = "Messagelog",
    check = "can_view_userlog"
)]
pub async fn userlog(
    ctx: Context<'_>,
    #[description = "User whose messages to show"] user: serenity::User,
    #[description = "Number of entries (1-25)"] count: Option<u32>,
) -> Result<(), Error> {
    let limit = count.unwrap_or(DEFAULT_ENTRIES).clamp(1, MAX_ENTRIES);
    let entries = list_log_entries_for_user(&ctx.data().db, user.id.get(), limit).await?;

    if entries.is_empty() {
        ctx.say(format!("No logged messages for <@{}>.", user.id))
            .await?;
        return Ok(());
    }

    let text = entries.iter().map(format_entry).collect::<Vec<_>>().join("\n");

    let mut reply = poise::CreateReply::default().ephemeral(true);
    for (index, chunk) in split_description(&text, EMBED_DESCRIPTION_LIMIT)
        .into_iter()
        .enumerate()
    {
        let mut embed = serenity::CreateEmbed::new()
            .description(chunk)
            .color(USERLOG_COLOR);
        if index == 0 {
            embed = embed.title(format!("Message Log: {}", user.name));
        }
        reply = reply.embed(embed);
    }

    ctx.send(reply).await?;
    Ok(())
}

fn format_entry(entry: &LogEntry) -> String {
    let location = match entry.channel_id {
        Some(channel_id) => format!("<#{}>", channel_id),
        None => "unknown channel".to_owned(),
    };

    format!(
        "`#{}` <t:{}:R> {} ({}): {}",
        entry.id,
        entry.timestamp,
        location,
        entry.channel_type.as_str(),
        shorten(&entry.content.replace('\n', " "), PREVIEW_CHARS)
    )
}

#[cfg(test)]
mod tests {
    use super::format_entry;
    use kindling_database::model::log::{ChannelType, LogEntry};

    #[test]
    fn entries_show_id_time_channel_and_preview() {
        let entry = LogEntry {
            id: 7,
            timestamp: 1_700_000_000,
            user_id: 42,
            content: "hello\nworld".to_owned(),
            channel_id: Some(99),
            channel_type: ChannelType::Dm,
        };

        assert_eq!(
            format_entry(&entry),
            "`#7` <t:1700000000:R> <#99> (dm): hello world"
        );
    }
}
