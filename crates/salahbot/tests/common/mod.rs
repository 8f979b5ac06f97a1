//! Common test utilities
//!
//! Recording stand-ins for every handler dependency, shared across the
//! integration tests.

#![allow(dead_code)]

pub mod mocks;

pub use mocks::{
    CountingLookup, MemoryUserStore, OutboundCall, RecordingMessenger, RecordingSink, StubRenderer, STUB_PNG,
};

use std::sync::Arc;

use salahbot::telegram::handlers::Sender;
use salahbot::{HandlerDeps, IncomingUpdate};
use salahbot::telegram::IncomingMessage;
use salahcore::Coordinates;
use teloxide::types::{ChatId, MessageId};

pub const TEST_CHAT: ChatId = ChatId(123456789);
pub const TEST_MESSAGE: MessageId = MessageId(77);

/// All mocks plus the deps built from them
pub struct TestEnvironment {
    pub messenger: RecordingMessenger,
    pub users: Arc<MemoryUserStore>,
    pub lookup: Arc<CountingLookup>,
    pub renderer: Arc<StubRenderer>,
    pub sink: Arc<RecordingSink>,
    pub deps: HandlerDeps,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self::with_users(MemoryUserStore::default())
    }

    pub fn with_users(users: MemoryUserStore) -> Self {
        let users = Arc::new(users);
        let lookup = Arc::new(CountingLookup::default());
        let renderer = Arc::new(StubRenderer::default());
        let sink = Arc::new(RecordingSink::default());
        let deps = HandlerDeps::new(users.clone(), lookup.clone(), renderer.clone(), sink.clone());

        Self {
            messenger: RecordingMessenger::default(),
            users,
            lookup,
            renderer,
            sink,
            deps,
        }
    }
}

pub fn test_sender() -> Sender {
    Sender {
        username: Some("amina".to_string()),
        first_name: "Amina".to_string(),
        last_name: Some("Yusuf".to_string()),
    }
}

fn base_message() -> IncomingMessage {
    IncomingMessage {
        chat_id: TEST_CHAT,
        message_id: TEST_MESSAGE,
        text: None,
        location: None,
        sender: Some(test_sender()),
    }
}

pub fn text_update(text: &str) -> IncomingUpdate {
    IncomingUpdate::Message(IncomingMessage {
        text: Some(text.to_string()),
        ..base_message()
    })
}

pub fn location_update(longitude: f64, latitude: f64) -> IncomingUpdate {
    IncomingUpdate::Message(IncomingMessage {
        location: Some(Coordinates::new(longitude, latitude)),
        ..base_message()
    })
}
