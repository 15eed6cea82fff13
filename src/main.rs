mod cards;
mod commands;
mod config;
mod error;
mod state;

use anyhow::Context as _;
use poise::serenity_prelude as serenity;
use poise::{Framework, FrameworkOptions};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use cards::CardRepository;
use config::Settings;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,serenity=warn,poise=warn")),
        )
        .init();

    // Load env
    let _ = dotenv::dotenv();
    let settings = Settings::from_env()?;

    // Load card data; the bot is useless without it.
    let mut repository = CardRepository::new(&settings.card_data_path, settings.repository);
    let repository = tokio::task::spawn_blocking(move || repository.load().map(|_| repository))
        .await
        .context("spawn_blocking join failed")??;
    if repository.is_empty() {
        warn!("Card data file contains no cards");
    }
    info!(
        cards = repository.len(),
        indexed = repository.indexed_len(),
        "Card repository ready"
    );

    if !settings.admin_ids.is_empty() {
        info!(count = settings.admin_ids.len(), "Admin users configured");
    }

    let app_state = AppState::new(repository, settings.admin_ids.clone());
    let guild_ids: Vec<serenity::GuildId> = settings
        .guild_ids
        .iter()
        .map(|&id| serenity::GuildId::new(id))
        .collect();

    let intents = serenity::GatewayIntents::GUILDS;

    let framework = Framework::builder()
        .options(FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(commands::on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Bot connected as: {} ({})", ready.user.name, ready.user.id);

                let commands = &framework.options().commands;
                info!("Registering {} command(s):", commands.len());
                for cmd in commands {
                    info!("  /{}", cmd.name);
                }

                if guild_ids.is_empty() {
                    info!("Registering globally (up to 1 hour delay)");
                    poise::builtins::register_globally(ctx, commands).await?;
                } else {
                    for gid in &guild_ids {
                        info!("Registering to guild {} (instant)", gid);
                        poise::builtins::register_in_guild(ctx, commands, *gid).await?;
                    }
                }

                Ok(app_state)
            })
        })
        .build();

    info!("Starting card bot...");

    let mut client = serenity::ClientBuilder::new(&settings.discord_token, intents)
        .framework(framework)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create client: {}", e))?;

    if let Err(e) = client.start().await {
        error!("Client error: {}", e);
    }

    Ok(())
}
