//! Dispatcher schema

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;

use super::router::route_update;
use super::types::{HandlerDeps, HandlerError, IncomingUpdate};
use crate::telegram::Bot;

/// Creates the dispatcher schema for the bot.
///
/// Every update goes through [`route_update`], which never fails, so the
/// dispatcher's own error handler only sees framework errors.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    dptree::entry().endpoint(move |bot: Bot, update: Update| {
        let deps = deps.clone();
        async move {
            let incoming = IncomingUpdate::from_update(&update);
            let outcome = route_update(&bot, incoming, &deps).await;
            log::trace!("Routed update: {:?}", outcome);
            Ok(())
        }
    })
}
