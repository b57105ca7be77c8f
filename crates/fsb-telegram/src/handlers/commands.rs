use std::sync::Arc;

use teloxide::{prelude::*, types::Message};

use fsb_core::{
    domain::{ChatId, UserId},
    messaging::types::{StartRequest, StatsRequest},
    security::is_owner,
};

use crate::router::AppState;

use super::sender_id;

pub(crate) fn parse_command(text: &str) -> (String, String) {
    // Telegram may send `/cmd@botname arg1 ...`
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    (cmd, rest)
}

/// True when `text` is `/<command>` and the sender is the configured owner.
pub(crate) fn is_owner_command(
    text: Option<&str>,
    command: &str,
    user_id: Option<UserId>,
    owner_id: i64,
) -> bool {
    let Some(text) = text.filter(|t| t.starts_with('/')) else {
        return false;
    };
    let (cmd, _) = parse_command(text);
    cmd == command && is_owner(user_id, owner_id)
}

/// First whitespace separated argument of `/start`, the share token.
fn start_token(args: &str) -> Option<String> {
    args.split_whitespace().next().map(str::to_string)
}

pub(super) async fn handle_command(
    msg: &Message,
    text: &str,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    let (cmd, args) = parse_command(text);

    match cmd.as_str() {
        "start" => {
            let req = StartRequest {
                chat_id: ChatId(msg.chat.id.0),
                user_id: sender_id(msg),
                first_name: msg.from().map(|u| u.first_name.clone()),
                token: start_token(&args),
            };
            let outcome = state.service.resolve_link(req).await;
            tracing::debug!(chat_id = msg.chat.id.0, ?outcome, "start handled");
            Ok(())
        }
        // Anything else (including `/stats` from non-owners) gets no reply.
        _ => Ok(()),
    }
}

pub(super) async fn handle_stats(msg: &Message, state: Arc<AppState>) -> ResponseResult<()> {
    let req = StatsRequest {
        chat_id: ChatId(msg.chat.id.0),
    };
    let outcome = state.service.stats(req).await;
    tracing::debug!(chat_id = msg.chat.id.0, ?outcome, "stats handled");
    Ok(())
}
