//! Delivery-layer seam: the three Bot API calls the handlers make.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ButtonRequest, ChatId, InputFile, KeyboardButton, KeyboardMarkup, MessageId, ParseMode};
use teloxide::RequestError;

pub const SHARE_LOCATION_BUTTON: &str = "📍 Share location";

/// Outbound calls the handlers need, implemented for [`Bot`].
///
/// Tests substitute a recording implementation.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Sends a PNG as a photo.
    async fn send_photo(&self, chat_id: ChatId, png: Vec<u8>) -> Result<(), RequestError>;

    /// Sends `text` with a reply keyboard whose only button shares the user's location.
    async fn send_location_request(&self, chat_id: ChatId, text: &str) -> Result<(), RequestError>;

    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> Result<(), RequestError>;
}

/// One-button keyboard requesting the sender's current location
pub fn location_request_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![
        KeyboardButton::new(SHARE_LOCATION_BUTTON).request(ButtonRequest::Location)
    ]])
}

#[async_trait]
impl Messenger for Bot {
    async fn send_photo(&self, chat_id: ChatId, png: Vec<u8>) -> Result<(), RequestError> {
        Requester::send_photo(self, chat_id, InputFile::memory(png).file_name("prayer-times.png")).await?;
        Ok(())
    }

    async fn send_location_request(&self, chat_id: ChatId, text: &str) -> Result<(), RequestError> {
        self.send_message(chat_id, text)
            .parse_mode(ParseMode::MarkdownV2)
            .reply_markup(location_request_keyboard())
            .await?;
        Ok(())
    }

    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> Result<(), RequestError> {
        Requester::delete_message(self, chat_id, message_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_keyboard_has_single_location_button() {
        let keyboard = location_request_keyboard();

        assert_eq!(keyboard.keyboard.len(), 1);
        assert_eq!(keyboard.keyboard[0].len(), 1);
        let button = &keyboard.keyboard[0][0];
        assert_eq!(button.text, SHARE_LOCATION_BUTTON);
        assert!(matches!(button.request, Some(ButtonRequest::Location)));
    }
}
