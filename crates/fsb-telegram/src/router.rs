use std::sync::Arc;

use anyhow::Context;
use teloxide::{
    dispatching::{Dispatcher, UpdateHandler},
    dptree,
    prelude::*,
    RequestError,
};

use fsb_core::{
    config::Config, domain::UserId, messaging::port::MessagingPort, share::ShareService,
};

use crate::handlers::{self, is_owner_command};
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub service: Arc<ShareService>,
}

/// Update routing.
///
/// `/stats` is matched against the owner before any handler runs; private
/// chats then get the start command and file uploads. Everything else is
/// dropped without a reply.
pub fn schema() -> UpdateHandler<RequestError> {
    Update::filter_message()
        .branch(
            dptree::filter(|msg: Message, state: Arc<AppState>| {
                is_owner_command(
                    msg.text(),
                    "stats",
                    msg.from().map(|u| UserId(u.id.0 as i64)),
                    state.cfg.owner_id,
                )
            })
            .endpoint(handlers::handle_stats),
        )
        .branch(
            dptree::filter(|msg: Message| msg.chat.is_private())
                .endpoint(handlers::handle_message),
        )
}

pub async fn run_polling(cfg: Arc<Config>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.bot_token.clone());

    let me = bot
        .get_me()
        .await
        .context("failed to authenticate with the Telegram Bot API")?;
    tracing::info!(
        bot = %me.username(),
        channel = cfg.channel_id,
        owner = cfg.owner_id,
        "bot started, polling for updates"
    );

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let state = Arc::new(AppState {
        cfg: cfg.clone(),
        service: Arc::new(ShareService::with_bot_handle(
            cfg,
            messenger,
            me.username(),
        )),
    });

    // Updates from different chats are handled concurrently; one chat's
    // updates are handled in order.
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .default_handler(|_| async {})
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
