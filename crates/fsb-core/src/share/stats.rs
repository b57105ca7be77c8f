use tracing::error;

use crate::{
    formatting::{stats_html, STATS_FAILED},
    messaging::types::StatsRequest,
};

use super::ShareService;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatsOutcome {
    Reported,
    Failed,
}

impl ShareService {
    /// Static configuration plus a live self-identity lookup. Owner filtering
    /// happens before this is called.
    pub async fn stats(&self, req: StatsRequest) -> StatsOutcome {
        match self.messenger.bot_username().await {
            Ok(handle) => {
                let html = stats_html(&handle, self.cfg.channel_id, self.cfg.owner_id);
                self.reply(req.chat_id, &html).await;
                StatsOutcome::Reported
            }
            Err(e) => {
                error!(chat_id = req.chat_id.0, error = %e, "stats lookup failed");
                self.reply(req.chat_id, STATS_FAILED).await;
                StatsOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        domain::ChatId,
        share::{
            fake::{test_config, FakeMessenger, BOT_HANDLE, CHANNEL, OWNER},
            ShareService,
        },
    };

    use super::*;

    const OWNER_CHAT: ChatId = ChatId(OWNER);

    #[tokio::test]
    async fn reports_handle_channel_and_owner() {
        let api = Arc::new(FakeMessenger::new());
        let svc = ShareService::new(Arc::new(test_config()), api.clone());

        let outcome = svc.stats(StatsRequest { chat_id: OWNER_CHAT }).await;

        assert_eq!(outcome, StatsOutcome::Reported);
        let sent = api.sent_to(OWNER_CHAT);
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains(&format!("@{BOT_HANDLE}")));
        assert!(sent[0].contains(&CHANNEL.0.to_string()));
        assert!(sent[0].contains(&format!("<code>{OWNER}</code>")));
    }

    #[tokio::test]
    async fn handle_is_looked_up_live_each_time() {
        let api = Arc::new(FakeMessenger::new());
        let svc = ShareService::new(Arc::new(test_config()), api.clone());

        svc.stats(StatsRequest { chat_id: OWNER_CHAT }).await;
        svc.stats(StatsRequest { chat_id: OWNER_CHAT }).await;

        assert_eq!(api.username_calls(), 2);
    }

    #[tokio::test]
    async fn lookup_failure_is_reported() {
        let api = Arc::new(FakeMessenger::new());
        api.fail_username();
        let svc = ShareService::new(Arc::new(test_config()), api.clone());

        let outcome = svc.stats(StatsRequest { chat_id: OWNER_CHAT }).await;

        assert_eq!(outcome, StatsOutcome::Failed);
        assert_eq!(api.sent_to(OWNER_CHAT), vec![STATS_FAILED.to_string()]);
    }
}
