//! Delivery-layer error hook
//!
//! Errors from the update listener (long polling) are not tied to any update.
//! They are logged at error level and otherwise ignored; the listener keeps
//! polling on its own.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use teloxide::error_handlers::ErrorHandler;
use teloxide::RequestError;

/// Where a delivery error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryErrorKind {
    /// Telegram answered with an API error
    TelegramApi,
    /// Transport, parsing or anything else
    Other,
}

/// Log line for a delivery error.
pub fn delivery_error_message(kind: DeliveryErrorKind, text: &str) -> String {
    match kind {
        DeliveryErrorKind::TelegramApi => format!("Error occured with Telegram Client: {}", text),
        DeliveryErrorKind::Other => text.to_string(),
    }
}

/// Classifies a request error and formats its log line
pub fn describe_delivery_error(error: &RequestError) -> String {
    match error {
        RequestError::Api(api) => delivery_error_message(DeliveryErrorKind::TelegramApi, &api.to_string()),
        other => delivery_error_message(DeliveryErrorKind::Other, &other.to_string()),
    }
}

pub fn handle_delivery_error(error: &RequestError) {
    log::error!("{}", describe_delivery_error(error));
}

/// Update-listener error handler passed to `dispatch_with_listener`
#[derive(Debug, Default, Clone, Copy)]
pub struct DeliveryErrorHandler;

impl ErrorHandler<RequestError> for DeliveryErrorHandler {
    fn handle_error(self: Arc<Self>, error: RequestError) -> BoxFuture<'static, ()> {
        handle_delivery_error(&error);
        Box::pin(async {})
    }
}
