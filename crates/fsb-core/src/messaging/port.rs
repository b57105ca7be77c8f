use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageRef},
    messaging::types::{InlineKeyboard, StoredMessage},
    Result,
};

/// Hexagonal port for the messaging platform.
///
/// Telegram is the only implementation; the workflows in [`crate::share`] only
/// ever talk to the platform through this trait.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    async fn send_html(&self, chat_id: ChatId, html: &str) -> Result<MessageRef>;

    async fn edit_html(
        &self,
        msg: MessageRef,
        html: &str,
        keyboard: Option<InlineKeyboard>,
    ) -> Result<()>;

    /// Duplicate `from` into `to` without forward attribution.
    async fn copy_message(&self, to: ChatId, from: MessageRef) -> Result<MessageRef>;

    /// Look up a message. `Ok(None)` when the platform reports it absent.
    async fn fetch_message(&self, msg: MessageRef) -> Result<Option<StoredMessage>>;

    /// Public handle of the bot itself, without the leading `@`.
    async fn bot_username(&self) -> Result<String>;
}
