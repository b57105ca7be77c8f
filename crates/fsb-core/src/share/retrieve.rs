use tracing::{debug, error};

use crate::{
    codec,
    domain::{ChatId, MessageId, MessageRef},
    formatting::{welcome_html, FILE_DELIVERED, FILE_NOT_FOUND, INVALID_LINK, RETRIEVE_FAILED},
    messaging::types::StartRequest,
    Result,
};

use super::ShareService;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// Plain `/start`: usage text only.
    Welcome,
    InvalidLink,
    /// Missing from the storage channel, or present without media.
    NotFound,
    /// The file was copied into the requester's chat.
    Delivered(MessageRef),
    Failed,
}

impl ShareService {
    pub async fn resolve_link(&self, req: StartRequest) -> ResolveOutcome {
        let Some(token) = req.token.as_deref() else {
            self.reply(req.chat_id, &welcome_html(req.first_name.as_deref()))
                .await;
            return ResolveOutcome::Welcome;
        };

        let Some(message_id) = codec::decode(token)
            .ok()
            .and_then(MessageId::from_token_value)
        else {
            debug!(chat_id = req.chat_id.0, token, "invalid share token");
            self.reply(req.chat_id, INVALID_LINK).await;
            return ResolveOutcome::InvalidLink;
        };

        match self.deliver(req.chat_id, message_id).await {
            Ok(Some(copied)) => {
                self.reply(req.chat_id, FILE_DELIVERED).await;
                ResolveOutcome::Delivered(copied)
            }
            Ok(None) => {
                self.reply(req.chat_id, FILE_NOT_FOUND).await;
                ResolveOutcome::NotFound
            }
            Err(e) => {
                error!(
                    chat_id = req.chat_id.0,
                    channel_message = message_id.0,
                    error = %e,
                    "error retrieving file"
                );
                self.reply(req.chat_id, RETRIEVE_FAILED).await;
                ResolveOutcome::Failed
            }
        }
    }

    /// Copy a stored file to `to`. `Ok(None)` when there is nothing to send.
    async fn deliver(&self, to: ChatId, message_id: MessageId) -> Result<Option<MessageRef>> {
        let source = MessageRef {
            chat_id: self.storage_channel(),
            message_id,
        };

        let Some(stored) = self.messenger.fetch_message(source).await? else {
            return Ok(None);
        };
        if stored.media.is_none() {
            return Ok(None);
        }

        let copied = self.messenger.copy_message(to, stored.message).await?;
        Ok(Some(copied))
    }
}
