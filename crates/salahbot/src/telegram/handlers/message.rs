//! Message handler: location → prayer-time card, `/start` → greeting

use std::sync::Arc;

use salahcore::{Coordinates, InsertOutcome};

use super::types::{HandlerDeps, HandlerError, IncomingMessage};
use crate::telegram::messenger::Messenger;

pub const LOCATION_PROMPT: &str = "In order to get prayer times share your location";

/// Handle a plain message. The location and `/start` branches are independent.
pub async fn handle_message(
    messenger: &dyn Messenger,
    msg: &IncomingMessage,
    deps: &HandlerDeps,
) -> Result<(), HandlerError> {
    if let Some(location) = msg.location {
        send_prayer_card(messenger, msg, location, deps).await?;
    }

    if msg.text.as_deref() == Some("/start") {
        handle_start_command(messenger, msg, deps).await?;
    }

    Ok(())
}

async fn send_prayer_card(
    messenger: &dyn Messenger,
    msg: &IncomingMessage,
    location: Coordinates,
    deps: &HandlerDeps,
) -> Result<(), HandlerError> {
    let times = deps
        .prayer_times
        .get_or_update(msg.chat_id.0, location.longitude, location.latitude)
        .await?;

    let renderer = Arc::clone(&deps.renderer);
    let png = tokio::task::spawn_blocking(move || renderer.render(&times)).await??;

    messenger.send_photo(msg.chat_id, png).await?;
    log::info!("Sent prayer times to chat {}", msg.chat_id.0);
    Ok(())
}

/// Handle /start command
async fn handle_start_command(
    messenger: &dyn Messenger,
    msg: &IncomingMessage,
    deps: &HandlerDeps,
) -> Result<(), HandlerError> {
    let chat_id = msg.chat_id.0;

    if deps.users.exists(chat_id).await? {
        log::info!("User exists");
    } else {
        // The insert itself is conditional: a concurrent /start may have won the race
        match deps.users.insert_if_absent(&msg.new_bot_user()).await {
            Ok(InsertOutcome::Inserted) => log::info!("New user added: {}", chat_id),
            Ok(InsertOutcome::AlreadyExists) => log::info!("User exists"),
            Err(e) => log::warn!("Failed to add user {}: {}", chat_id, e),
        }
    }

    messenger.send_location_request(msg.chat_id, LOCATION_PROMPT).await?;
    messenger.delete_message(msg.chat_id, msg.message_id).await?;
    Ok(())
}
