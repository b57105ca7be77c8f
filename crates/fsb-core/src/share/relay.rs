use tracing::{error, info};

use crate::{
    codec,
    domain::MessageRef,
    formatting::{
        deep_link, file_ready_html, format_size, DOWNLOAD_BUTTON, PROCESSING, RELAY_FAILED,
        UPLOAD_OWNER_ONLY,
    },
    messaging::types::{FileUpload, InlineKeyboard, SharedFile},
    security::is_owner,
    Result,
};

use super::ShareService;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelayOutcome {
    /// Stored in the channel and the link was delivered.
    Shared(SharedFile),
    /// Uploads are restricted to the owner and the sender is someone else.
    Rejected,
    /// A platform call failed; the user got a generic error.
    Failed,
}

impl ShareService {
    pub async fn relay_file(&self, upload: FileUpload) -> RelayOutcome {
        if self.cfg.owner_only_uploads && !is_owner(upload.user_id, self.cfg.owner_id) {
            self.reply(upload.chat_id, UPLOAD_OWNER_ONLY).await;
            return RelayOutcome::Rejected;
        }

        let status = match self.messenger.send_html(upload.chat_id, PROCESSING).await {
            Ok(status) => status,
            Err(e) => {
                error!(chat_id = upload.chat_id.0, error = %e, "failed to acknowledge upload");
                self.reply(upload.chat_id, RELAY_FAILED).await;
                return RelayOutcome::Failed;
            }
        };

        match self.share(&upload, status).await {
            Ok(file) => {
                info!(
                    file = %file.name,
                    size = %file.size_label,
                    channel_message = file.channel_message.0,
                    "file shared"
                );
                RelayOutcome::Shared(file)
            }
            Err(e) => {
                // A copy that already landed in the channel is left in place.
                error!(
                    chat_id = upload.chat_id.0,
                    message_id = upload.message.message_id.0,
                    error = %e,
                    "error handling file"
                );
                self.replace_status(status, RELAY_FAILED).await;
                RelayOutcome::Failed
            }
        }
    }

    async fn share(&self, upload: &FileUpload, status: MessageRef) -> Result<SharedFile> {
        let stored = self
            .messenger
            .copy_message(self.storage_channel(), upload.message)
            .await?;

        let token = codec::encode(stored.message_id.token_value());
        let handle = self.cached_bot_handle().await?;
        let link = deep_link(&self.cfg.link_domain, &handle, &token);

        let info = upload.media.info();
        let file = SharedFile {
            name: info.name.clone(),
            size_label: format_size(info.size),
            link,
            channel_message: stored.message_id,
        };

        let keyboard = InlineKeyboard::single(DOWNLOAD_BUTTON, &file.link);
        self.messenger
            .edit_html(status, &file_ready_html(&file), Some(keyboard))
            .await?;

        Ok(file)
    }
}
