use poise::serenity_prelude as serenity;

use kindling_commands::utility::embeds::build_info_embed;
use kindling_core::{Data, Error};
use kindling_database::impls::settings::get_prefix;

/// Reply with the info embed when a message is nothing but a mention of the bot.
pub async fn handle_bot_mention(
    ctx: &serenity::Context,
    data: &Data,
    message: &serenity::Message,
) -> Result<(), Error> {
    if message.author.bot {
        return Ok(());
    }

    let (bot_id, avatar_url) = {
        let current_user = ctx.cache.current_user();
        (current_user.id, current_user.face())
    };

    if !is_bare_mention(&message.content, bot_id.get()) {
        return Ok(());
    }

    let prefix = get_prefix(&data.db).await?;
    message
        .channel_id
        .send_message(
            &ctx.http,
            serenity::CreateMessage::new().embed(build_info_embed(&prefix, bot_id, Some(avatar_url))),
        )
        .await?;

    Ok(())
}

fn is_bare_mention(content: &str, bot_id: u64) -> bool {
    let content = content.trim();
    content == format!("<@{}>", bot_id) || content == format!("<@!{}>", bot_id)
}

#[cfg(test)]
mod tests {
    use super::is_bare_mention;

    #[test]
    fn matches_both_mention_forms() {
        assert!(is_bare_mention("<@123>", 123));
        assert!(is_bare_mention("  <@!123> ", 123));
    }

    #[test]
    fn ignores_other_content() {
        assert!(!is_bare_mention("<@123> help", 123));
        assert!(!is_bare_mention("<@124>", 123));
        assert!(!is_bare_mention("hello", 123));
    }
}
