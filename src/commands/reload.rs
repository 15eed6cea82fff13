use anyhow::Context as _;
use tracing::info;

use crate::error::BotError;
use crate::state::Context;

/// Reload card data from disk (admin only)
#[poise::command(slash_command, guild_only)]
pub async fn reload(ctx: Context<'_>) -> Result<(), anyhow::Error> {
    if !ctx.data().is_admin(ctx.author().id.get()) {
        return Err(BotError::NotAdmin.into());
    }

    ctx.defer_ephemeral().await?;

    let current = ctx.data().cards().await;
    // Parsing a large catalog is blocking work.
    let fresh = tokio::task::spawn_blocking(move || current.reload())
        .await
        .context("spawn_blocking join failed")??;

    let (cards, indexed) = (fresh.len(), fresh.indexed_len());
    ctx.data().replace_cards(fresh).await;

    info!(user = %ctx.author().name, cards, indexed, "Card data reloaded");
    ctx.say(format!(
        "Reloaded **{}** cards ({} with valid IDs).",
        cards, indexed
    ))
    .await?;
    Ok(())
}
