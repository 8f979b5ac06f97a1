//! Handler types and dependencies

use std::sync::Arc;

use salahcore::{BotUser, CardRenderer, Coordinates, PrayerTimeLookup, UserStore};
use teloxide::types::{ChatId, Message, MessageId, Update, UpdateKind as TgUpdateKind, User};

use super::router::ErrorSink;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub users: Arc<dyn UserStore>,
    pub prayer_times: Arc<dyn PrayerTimeLookup>,
    pub renderer: Arc<dyn CardRenderer>,
    pub error_sink: Arc<dyn ErrorSink>,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(
        users: Arc<dyn UserStore>,
        prayer_times: Arc<dyn PrayerTimeLookup>,
        renderer: Arc<dyn CardRenderer>,
        error_sink: Arc<dyn ErrorSink>,
    ) -> Self {
        Self {
            users,
            prayer_times,
            renderer,
            error_sink,
        }
    }
}

/// Kind tag of an update, used in logs and route outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum UpdateKind {
    Message,
    EditedMessage,
    CallbackQuery,
    InlineQuery,
    ChosenInlineResult,
    Other,
}

/// Profile of the user who sent a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub username: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
}

impl Sender {
    /// First and last name joined by a single space, skipping empty parts.
    pub fn full_name(&self) -> String {
        [Some(self.first_name.as_str()), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<&User> for Sender {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

/// The parts of a Telegram message the handler reads
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingMessage {
    pub chat_id: ChatId,
    pub message_id: MessageId,
    pub text: Option<String>,
    pub location: Option<Coordinates>,
    pub sender: Option<Sender>,
}

impl IncomingMessage {
    /// Extract the handler-relevant fields from a Telegram message
    pub fn from_message(msg: &Message) -> Self {
        Self {
            chat_id: msg.chat.id,
            message_id: msg.id,
            text: msg.text().map(str::to_string),
            location: msg
                .location()
                .map(|location| Coordinates::new(location.longitude, location.latitude)),
            sender: msg.from.as_ref().map(Sender::from),
        }
    }

    /// Profile stored on the first `/start`: names from the sender, no location yet.
    pub fn new_bot_user(&self) -> BotUser {
        let (username, fullname) = match &self.sender {
            Some(sender) => (sender.username.clone().unwrap_or_default(), sender.full_name()),
            None => (String::new(), String::new()),
        };
        BotUser::new(self.chat_id.0, username, fullname)
    }
}

/// Closed set of update kinds the router distinguishes
#[derive(Debug, Clone, PartialEq)]
pub enum IncomingUpdate {
    Message(IncomingMessage),
    EditedMessage,
    CallbackQuery,
    InlineQuery,
    ChosenInlineResult,
    Other,
}

impl IncomingUpdate {
    pub fn from_update(update: &Update) -> Self {
        match &update.kind {
            TgUpdateKind::Message(msg) => IncomingUpdate::Message(IncomingMessage::from_message(msg)),
            TgUpdateKind::EditedMessage(_) => IncomingUpdate::EditedMessage,
            TgUpdateKind::CallbackQuery(_) => IncomingUpdate::CallbackQuery,
            TgUpdateKind::InlineQuery(_) => IncomingUpdate::InlineQuery,
            TgUpdateKind::ChosenInlineResult(_) => IncomingUpdate::ChosenInlineResult,
            _ => IncomingUpdate::Other,
        }
    }

    pub fn kind(&self) -> UpdateKind {
        match self {
            IncomingUpdate::Message(_) => UpdateKind::Message,
            IncomingUpdate::EditedMessage => UpdateKind::EditedMessage,
            IncomingUpdate::CallbackQuery => UpdateKind::CallbackQuery,
            IncomingUpdate::InlineQuery => UpdateKind::InlineQuery,
            IncomingUpdate::ChosenInlineResult => UpdateKind::ChosenInlineResult,
            IncomingUpdate::Other => UpdateKind::Other,
        }
    }
}
