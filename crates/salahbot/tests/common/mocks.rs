//! Hand-written mocks for the handler seams

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveTime;
use salahbot::telegram::{ErrorSink, HandlerError, UpdateKind};
use salahbot::Messenger;
use salahcore::{AppError, AppResult, BotUser, CardRenderer, InsertOutcome, PrayerTime, PrayerTimeLookup, UserStore};
use teloxide::types::{ChatId, MessageId};
use teloxide::{ApiError, RequestError};

pub const STUB_PNG: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// One Bot API call a handler made
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundCall {
    Photo { chat_id: ChatId, png: Vec<u8> },
    LocationRequest { chat_id: ChatId, text: String },
    Delete { chat_id: ChatId, message_id: MessageId },
}

/// Records every outbound call; optionally fails deletes like a blocked bot would
#[derive(Default)]
pub struct RecordingMessenger {
    calls: Mutex<Vec<OutboundCall>>,
    fail_delete: AtomicBool,
}

impl RecordingMessenger {
    pub fn failing_delete() -> Self {
        let messenger = Self::default();
        messenger.fail_delete.store(true, Ordering::SeqCst);
        messenger
    }

    pub fn calls(&self) -> Vec<OutboundCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: OutboundCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_photo(&self, chat_id: ChatId, png: Vec<u8>) -> Result<(), RequestError> {
        self.record(OutboundCall::Photo { chat_id, png });
        Ok(())
    }

    async fn send_location_request(&self, chat_id: ChatId, text: &str) -> Result<(), RequestError> {
        self.record(OutboundCall::LocationRequest {
            chat_id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> Result<(), RequestError> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(RequestError::Api(ApiError::MessageToDeleteNotFound));
        }
        self.record(OutboundCall::Delete { chat_id, message_id });
        Ok(())
    }
}

/// In-memory user store counting writes
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<i64, BotUser>>,
    inserts: AtomicUsize,
    fail_reads: AtomicBool,
}

impl MemoryUserStore {
    pub fn with_user(user: BotUser) -> Self {
        let store = Self::default();
        store.users.lock().unwrap().insert(user.chat_id, user);
        store
    }

    pub fn unavailable() -> Self {
        let store = Self::default();
        store.fail_reads.store(true, Ordering::SeqCst);
        store
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn get(&self, chat_id: i64) -> Option<BotUser> {
        self.users.lock().unwrap().get(&chat_id).cloned()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn exists(&self, chat_id: i64) -> AppResult<bool> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::Validation("store unavailable".to_string()));
        }
        Ok(self.users.lock().unwrap().contains_key(&chat_id))
    }

    async fn insert_user(&self, user: &BotUser) -> AppResult<InsertOutcome> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&user.chat_id) {
            return Err(AppError::Validation(format!("duplicate chat_id {}", user.chat_id)));
        }
        users.insert(user.chat_id, user.clone());
        self.inserts.fetch_add(1, Ordering::SeqCst);
        Ok(InsertOutcome::Inserted)
    }

    async fn insert_if_absent(&self, user: &BotUser) -> AppResult<InsertOutcome> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&user.chat_id) {
            return Ok(InsertOutcome::AlreadyExists);
        }
        users.insert(user.chat_id, user.clone());
        self.inserts.fetch_add(1, Ordering::SeqCst);
        Ok(InsertOutcome::Inserted)
    }
}

/// Returns a fixed schedule and records each lookup
#[derive(Default)]
pub struct CountingLookup {
    lookups: Mutex<Vec<(i64, f64, f64)>>,
}

impl CountingLookup {
    pub fn schedule() -> PrayerTime {
        let hm = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        PrayerTime {
            fajr: hm(5, 0),
            sunrise: hm(6, 30),
            dhuhr: hm(12, 15),
            asr: hm(15, 45),
            maghrib: hm(18, 20),
            isha: hm(19, 45),
        }
    }

    pub fn lookups(&self) -> Vec<(i64, f64, f64)> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl PrayerTimeLookup for CountingLookup {
    async fn get_or_update(&self, chat_id: i64, longitude: f64, latitude: f64) -> AppResult<PrayerTime> {
        self.lookups.lock().unwrap().push((chat_id, longitude, latitude));
        Ok(Self::schedule())
    }
}

/// Renders every schedule to the same few bytes
#[derive(Default)]
pub struct StubRenderer {
    rendered: Mutex<Vec<PrayerTime>>,
}

impl StubRenderer {
    pub fn rendered(&self) -> Vec<PrayerTime> {
        self.rendered.lock().unwrap().clone()
    }
}

impl CardRenderer for StubRenderer {
    fn render(&self, times: &PrayerTime) -> AppResult<Vec<u8>> {
        self.rendered.lock().unwrap().push(*times);
        Ok(STUB_PNG.to_vec())
    }
}

/// Keeps every reported handler failure
#[derive(Default)]
pub struct RecordingSink {
    reports: Mutex<Vec<(UpdateKind, String)>>,
}

impl RecordingSink {
    pub fn reports(&self) -> Vec<(UpdateKind, String)> {
        self.reports.lock().unwrap().clone()
    }
}

impl ErrorSink for RecordingSink {
    fn report(&self, kind: UpdateKind, error: &HandlerError) {
        self.reports.lock().unwrap().push((kind, error.to_string()));
    }
}
