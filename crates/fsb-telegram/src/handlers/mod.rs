//! Telegram update handlers.
//!
//! Each handler turns a teloxide `Message` into a core request and hands it to
//! the `ShareService`. Workflows report their own failures to the user, so the
//! handlers always return `Ok(())` to the dispatcher.

use std::sync::Arc;

use teloxide::{prelude::*, types::Message};

use fsb_core::domain::UserId;

use crate::{media::media_of, router::AppState};

mod commands;
mod files;

pub(crate) use commands::is_owner_command;

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    if let Some(text) = msg.text() {
        if text.starts_with('/') {
            return commands::handle_command(&msg, text, state).await;
        }
        // Plain text has no meaning for this bot.
        return Ok(());
    }

    if let Some(media) = media_of(&msg) {
        return files::handle_file(&msg, media, state).await;
    }

    Ok(())
}

/// `/stats` from the owner. The router filters everyone else out.
pub async fn handle_stats(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    commands::handle_stats(&msg, state).await
}

fn sender_id(msg: &Message) -> Option<UserId> {
    msg.from().map(|u| UserId(u.id.0 as i64))
}
