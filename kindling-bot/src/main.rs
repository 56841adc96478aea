mod events;

use std::collections::BTreeSet;
use std::env;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use poise::serenity_prelude as serenity;
use tracing::{debug, error, info, warn};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rustls::crypto::ring::default_provider;
use sqlx::postgres::PgPoolOptions;

use kindling_commands::cogs::{self, MESSAGE_LOG_COG};
use kindling_commands::find_command;
use kindling_commands::status::announce_ready;
use kindling_core::{Data, Error};
use kindling_database::impls::settings::get_prefix;
use kindling_database::{Database, MIGRATOR};
use kindling_utils::embed::{error_embed, permission_denied_embed};
use kindling_utils::info::{BOT_NAME, GITHUB_LINK, VERSION};

const DEFAULT_STATUS_INTERVAL_SECONDS: u64 = 20;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(filter_fn(|metadata| {
        let target = metadata.target();

        let within_info_level = *metadata.level() <= tracing::Level::INFO;
        if !within_info_level {
            return false;
        }

        !(target.starts_with("serenity::gateway::bridge::shard_manager")
            || target.starts_with("serenity::gateway::bridge::shard_runner"))
    }));

    tracing_subscriber::registry().with(fmt_layer).init();

    info!("Starting {} v{} ({})", BOT_NAME, VERSION, GITHUB_LINK);

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Load the .env file
    dotenvy::dotenv().ok();

    let token = env::var("DISCORD_TOKEN")?;
    let database_url = env::var("DATABASE_URL")?;
    let guild_id = env_optional_u64("DISCORD_GUILD_ID")?;
    let status_owner = env_optional_u64("OWNER_ID")?.map(serenity::UserId::new);
    let status_interval = Duration::from_secs(
        env_u64("STATUS_INTERVAL_SECONDS", DEFAULT_STATUS_INTERVAL_SECONDS).max(1),
    );

    let max_connections = u32::try_from(env_u64("DATABASE_MAX_CONNECTIONS", 5)).unwrap_or(5);
    let db_pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url)
        .await?;
    info!("PostgreSQL connection established.");

    let db = Database::new(db_pool);

    let auto_run_migrations = env_bool("AUTO_RUN_MIGRATIONS", true);
    if auto_run_migrations {
        MIGRATOR.run(db.pool()).await?;
        info!("Database migrations applied.");
    } else {
        info!("Auto migrations disabled (set AUTO_RUN_MIGRATIONS=true to run at startup).");
    }

    let (enabled, disabled_cogs) =
        cogs::partition_cogs(&env::var("DISABLED_COGS").unwrap_or_default());
    for cog in &enabled {
        info!(
            cog = cog.name,
            commands = %cog.command_names.join(", "),
            "Cog enabled: {}",
            cog.description
        );
    }
    for name in &disabled_cogs {
        warn!(cog = %name, "Cog disabled.");
    }
    let enabled_cogs: BTreeSet<&'static str> = enabled.iter().map(|cog| cog.name).collect();

    if status_owner.is_none() {
        info!("Status embed disabled (set OWNER_ID to enable).");
    }

    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let data = Data {
        db,
        status_owner,
        status_interval,
        enabled_cogs,
        disabled_cogs,
        status_message: Default::default(),
        status_loop_started: Arc::new(AtomicBool::new(false)),
    };

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: cogs::commands(&enabled),
            event_handler: |ctx, event, framework, data| {
                Box::pin(handle_event(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(on_error(error)),
            prefix_options: poise::PrefixFrameworkOptions {
                dynamic_prefix: Some(|ctx| Box::pin(dynamic_prefix(ctx))),
                mention_as_prefix: true,
                case_insensitive_commands: true,
                ..Default::default()
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                match guild_id {
                    Some(guild_id) => {
                        poise::builtins::register_in_guild(
                            ctx,
                            &framework.options().commands,
                            serenity::GuildId::new(guild_id),
                        )
                        .await?;
                        info!(guild_id, "Slash commands registered in guild.");
                    }
                    None => {
                        poise::builtins::register_globally(ctx, &framework.options().commands)
                            .await?;
                        info!("Slash commands registered globally.");
                    }
                }

                Ok(data)
            })
        })
        .build();

    info!("{} is connecting...", BOT_NAME);

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;

    client.start().await?;
    Ok(())
}

fn env_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        Err(_) => default,
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(value) => value.trim().parse::<u64>().unwrap_or(default),
        Err(_) => default,
    }
}

/// Unset or blank means `None`; anything else must be a number.
fn env_optional_u64(key: &str) -> anyhow::Result<Option<u64>> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => {
            let parsed = value
                .trim()
                .parse::<u64>()
                .map_err(|e| anyhow::anyhow!("{key} must be a numeric ID: {e}"))?;
            Ok(Some(parsed))
        }
        _ => Ok(None),
    }
}

/// Stored prefix in guilds; no prefix at all in DMs.
async fn dynamic_prefix(
    ctx: poise::PartialContext<'_, Data, Error>,
) -> Result<Option<String>, Error> {
    if ctx.guild_id.is_none() {
        return Ok(Some(String::new()));
    }

    Ok(Some(get_prefix(&ctx.data.db).await?))
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(?error, command = %ctx.command().qualified_name, "command error");

            let embed = error_embed("Something went wrong while running this command.");

            let _ = ctx
                .send(poise::CreateReply::default().ephemeral(true).embed(embed))
                .await;
        }
        poise::FrameworkError::CommandCheckFailed { error, ctx, .. } => {
            if let Some(error) = error {
                error!(?error, command = %ctx.command().qualified_name, "permission check failed");
            }

            let _ = ctx
                .send(
                    poise::CreateReply::default()
                        .ephemeral(true)
                        .embed(permission_denied_embed()),
                )
                .await;
        }
        poise::FrameworkError::ArgumentParse { ctx, input, .. } => {
            let prefix = ctx.prefix();
            let usage = match find_command(&ctx.command().name) {
                Some(meta) => format!("Usage: `{}{}`", prefix, meta.usage),
                None => format!("Usage: `{}{}`", prefix, ctx.command().qualified_name),
            };
            let description = if let Some(input) = input {
                format!("Invalid argument: `{}`\n{}", input, usage)
            } else {
                format!("Missing required argument.\n{}", usage)
            };

            let _ = ctx.say(description).await;
        }
        poise::FrameworkError::GuildOnly { ctx, .. } => {
            let _ = ctx.say("This command only works in servers.").await;
        }
        poise::FrameworkError::UnknownCommand { .. } => {
            debug!("unknown command invocation");
        }
        poise::FrameworkError::EventHandler { error, event, .. } => {
            error!(?error, event = event.snake_case_name(), "event handler error");
        }
        other => {
            error!(?other, "framework error");
        }
    }
}

async fn handle_event(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            info!(user = %data_about_bot.user.name, "Logged in.");
            announce_ready(ctx, data).await;
        }
        serenity::FullEvent::Message { new_message } => {
            let log_enabled = data.cog_enabled(MESSAGE_LOG_COG);
            events::run_message_handlers(
                events::mention::handle_bot_mention(ctx, data, new_message),
                async {
                    if log_enabled {
                        events::message_log::handle_message_log(ctx, data, new_message).await
                    } else {
                        Ok(())
                    }
                },
            )
            .await?;
        }
        _ => {}
    }

    Ok(())
}
