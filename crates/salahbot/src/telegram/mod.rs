//! Telegram bot integration and handlers

pub mod bot;
pub mod errors;
pub mod handlers;
pub mod messenger;

// Re-exports for convenience
pub use bot::{create_bot, setup_bot_commands, Command};
pub use errors::{handle_delivery_error, DeliveryErrorHandler};
pub use handlers::{
    error_sink_from_config, route_update, schema, DiscardErrorSink, ErrorSink, HandlerDeps, HandlerError,
    IncomingMessage, IncomingUpdate, LogErrorSink, RouteOutcome, UpdateKind,
};
pub use messenger::Messenger;
pub use teloxide::Bot;
