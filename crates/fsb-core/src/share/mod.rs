//! File sharing workflows: relay an upload into the storage channel, resolve a
//! share link back into the file, report static stats to the owner.
//!
//! Every workflow converts its own failures into a reply for the user and
//! returns an outcome value; nothing here propagates an error to the
//! dispatcher.

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::{
    config::Config,
    domain::{ChatId, MessageRef},
    messaging::port::MessagingPort,
    Result,
};

mod relay;
mod retrieve;
mod stats;

#[cfg(test)]
pub(crate) mod fake;

pub use relay::RelayOutcome;
pub use retrieve::ResolveOutcome;
pub use stats::StatsOutcome;

pub struct ShareService {
    cfg: Arc<Config>,
    messenger: Arc<dyn MessagingPort>,
    bot_handle: OnceCell<String>,
}

impl ShareService {
    pub fn new(cfg: Arc<Config>, messenger: Arc<dyn MessagingPort>) -> Self {
        Self {
            cfg,
            messenger,
            bot_handle: OnceCell::new(),
        }
    }

    /// Start with the bot handle already known, e.g. from a startup `get_me`.
    pub fn with_bot_handle(
        cfg: Arc<Config>,
        messenger: Arc<dyn MessagingPort>,
        handle: impl Into<String>,
    ) -> Self {
        let handle: String = handle.into();
        Self {
            cfg,
            messenger,
            bot_handle: OnceCell::new_with(Some(handle.trim_start_matches('@').to_string())),
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    fn storage_channel(&self) -> ChatId {
        ChatId(self.cfg.channel_id)
    }

    /// Bot handle for links; fetched on first use, then reused.
    async fn cached_bot_handle(&self) -> Result<String> {
        self.bot_handle
            .get_or_try_init(|| self.messenger.bot_username())
            .await
            .cloned()
    }

    async fn reply(&self, chat_id: ChatId, html: &str) {
        if let Err(e) = self.messenger.send_html(chat_id, html).await {
            tracing::warn!(chat_id = chat_id.0, error = %e, "failed to send reply");
        }
    }

    /// Replace a status message with `html`, or send it fresh if the edit fails.
    async fn replace_status(&self, status: MessageRef, html: &str) {
        if let Err(e) = self.messenger.edit_html(status, html, None).await {
            tracing::warn!(
                chat_id = status.chat_id.0,
                message_id = status.message_id.0,
                error = %e,
                "failed to edit status message"
            );
            self.reply(status.chat_id, html).await;
        }
    }
}
