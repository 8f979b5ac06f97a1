//! salahbot - Telegram bot replying to shared locations with a prayer-time card
//!
//! # Module Structure
//!
//! - `cli`: command-line interface
//! - `telegram`: bot creation, update routing and handlers

pub mod cli;
pub mod telegram;

pub use telegram::{route_update, schema, HandlerDeps, IncomingUpdate, Messenger, RouteOutcome};
