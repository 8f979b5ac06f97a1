//! Update router: one handler per update kind, failures go to an error sink.

use std::sync::Arc;

use super::message::handle_message;
use super::types::{HandlerDeps, HandlerError, IncomingUpdate, UpdateKind};
use crate::telegram::messenger::Messenger;

/// What happened to one routed update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// A handler ran to completion
    Handled,
    /// No handler exists for this kind of update
    Unsupported(UpdateKind),
    /// The handler failed; the error went to the [`ErrorSink`]
    Failed(UpdateKind),
}

/// Receives handler failures the router swallows.
pub trait ErrorSink: Send + Sync {
    fn report(&self, kind: UpdateKind, error: &HandlerError);
}

/// Logs handler failures at warn level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogErrorSink;

impl ErrorSink for LogErrorSink {
    fn report(&self, kind: UpdateKind, error: &HandlerError) {
        log::warn!("Handler for {} update failed: {}", kind, error);
    }
}

/// Drops handler failures without a trace
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardErrorSink;

impl ErrorSink for DiscardErrorSink {
    fn report(&self, _kind: UpdateKind, _error: &HandlerError) {}
}

/// Sink for a `HANDLER_ERRORS` value: "discard" drops, anything else logs.
pub fn error_sink_from_config(policy: &str) -> Arc<dyn ErrorSink> {
    if policy.trim().eq_ignore_ascii_case("discard") {
        Arc::new(DiscardErrorSink)
    } else {
        Arc::new(LogErrorSink)
    }
}

/// Routes one update to its handler.
///
/// Never fails: handler errors are reported to `deps.error_sink` and turned
/// into [`RouteOutcome::Failed`].
pub async fn route_update(messenger: &dyn Messenger, update: IncomingUpdate, deps: &HandlerDeps) -> RouteOutcome {
    let kind = update.kind();

    let result = match update {
        IncomingUpdate::Message(msg) => handle_message(messenger, &msg, deps).await,
        IncomingUpdate::EditedMessage
        | IncomingUpdate::CallbackQuery
        | IncomingUpdate::InlineQuery
        | IncomingUpdate::ChosenInlineResult
        | IncomingUpdate::Other => {
            log::debug!("Ignoring {} update: not supported", kind);
            return RouteOutcome::Unsupported(kind);
        }
    };

    match result {
        Ok(()) => RouteOutcome::Handled,
        Err(e) => {
            deps.error_sink.report(kind, &e);
            RouteOutcome::Failed(kind)
        }
    }
}

