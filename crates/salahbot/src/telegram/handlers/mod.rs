//! Update routing and the message handler
//!
//! The router works on [`IncomingUpdate`], a plain sum type extracted from a
//! teloxide `Update`, so handlers can be exercised without the dispatcher.
//! `schema` wires the router into teloxide's handler tree.

mod message;
mod router;
mod schema;
mod types;

pub use message::{handle_message, LOCATION_PROMPT};
pub use router::{error_sink_from_config, route_update, DiscardErrorSink, ErrorSink, LogErrorSink, RouteOutcome};
pub use schema::schema;
pub use types::{HandlerDeps, HandlerError, IncomingMessage, IncomingUpdate, Sender, UpdateKind};
