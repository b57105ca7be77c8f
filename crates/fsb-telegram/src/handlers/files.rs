use std::sync::Arc;

use teloxide::{prelude::*, types::Message};

use fsb_core::{
    domain::{ChatId, MessageId, MessageRef},
    messaging::types::{FileUpload, MediaFile},
};

use crate::router::AppState;

use super::sender_id;

pub(super) async fn handle_file(
    msg: &Message,
    media: MediaFile,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    let chat_id = ChatId(msg.chat.id.0);
    let upload = FileUpload {
        chat_id,
        user_id: sender_id(msg),
        message: MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        },
        media,
    };

    tracing::debug!(
        chat_id = chat_id.0,
        message_id = msg.id.0,
        kind = ?upload.media.kind(),
        "file received"
    );
    let outcome = state.service.relay_file(upload).await;
    tracing::debug!(chat_id = chat_id.0, ?outcome, "file handled");
    Ok(())
}
