mod advanced;
mod dashboard;
mod lookup;
mod range;
mod reload;
mod search;

use tracing::{error, info, warn};

use crate::error::BotError;
use crate::state::AppState;

pub type Command = poise::Command<AppState, anyhow::Error>;

pub fn all() -> Vec<Command> {
    vec![
        lookup::card(),
        search::search(),
        advanced::advanced_search(),
        reload::reload(),
    ]
}

/// Report command failures to the invoking user. Known user errors are
/// shown as-is; everything else gets a generic message and an error log.
pub async fn on_error(error: poise::FrameworkError<'_, AppState, anyhow::Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            let user = &ctx.author().name;
            let command = &ctx.command().name;
            let message = match error.downcast_ref::<BotError>() {
                Some(e) => {
                    info!(user = %user, command = %command, "Handled ({:?}): {}", e, e);
                    e.to_string()
                }
                None => {
                    error!(
                        user = %user,
                        command = %command,
                        "Unhandled command error: {:#}",
                        error
                    );
                    "❌ An unexpected error occurred. Please try again later.".to_string()
                }
            };
            let reply = poise::CreateReply::default().content(message).ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                error!("Failed to send error response: {}", e);
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                warn!("Error while handling framework error: {}", e);
            }
        }
    }
}
