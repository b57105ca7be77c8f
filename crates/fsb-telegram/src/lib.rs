//! Telegram adapter (teloxide).
//!
//! This crate implements the `fsb-core` MessagingPort over the Telegram Bot API
//! and runs the long-polling dispatcher.

use async_trait::async_trait;

use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup, ParseMode},
    ApiError, RequestError,
};

use tokio::time::sleep;

pub mod handlers;
pub mod media;
pub mod router;

use fsb_core::{
    domain::{ChatId, MessageId, MessageRef},
    errors::Error,
    messaging::{
        port::MessagingPort,
        types::{InlineKeyboard, StoredMessage},
    },
    Result,
};

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    pub fn bot(&self) -> Bot {
        self.bot.clone()
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn tg_msg_id(message_id: MessageId) -> teloxide::types::MessageId {
        teloxide::types::MessageId(message_id.0)
    }

    fn map_err(e: RequestError) -> Error {
        Error::External(format!("telegram error: {e}"))
    }

    /// The platform's way of saying a message id does not exist in that chat.
    fn is_missing_message(e: &RequestError) -> bool {
        match e {
            RequestError::Api(ApiError::MessageToForwardNotFound | ApiError::MessageIdInvalid) => {
                true
            }
            RequestError::Api(ApiError::Unknown(desc)) => {
                let desc = desc.to_lowercase();
                desc.contains("message to forward not found")
                    || desc.contains("message_id_invalid")
            }
            _ => false,
        }
    }

    fn markup(keyboard: InlineKeyboard) -> Result<InlineKeyboardMarkup> {
        let rows = keyboard
            .buttons
            .into_iter()
            .map(|b| {
                let url = reqwest::Url::parse(&b.url)
                    .map_err(|e| Error::External(format!("invalid button url {}: {e}", b.url)))?;
                Ok(vec![InlineKeyboardButton::url(b.label, url)])
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(InlineKeyboardMarkup::new(rows))
    }

    async fn with_retry<T, Fut>(
        &self,
        mut op: impl FnMut() -> Fut,
    ) -> std::result::Result<T, RequestError>
    where
        Fut: std::future::IntoFuture<Output = std::result::Result<T, RequestError>>,
        Fut::IntoFuture: Send,
    {
        const MAX_RETRIES: usize = 1;
        let mut attempts = 0usize;
        loop {
            match op().await {
                Ok(v) => return Ok(v),
                Err(RequestError::RetryAfter(d)) if attempts < MAX_RETRIES => {
                    attempts += 1;
                    tracing::debug!(wait = ?d, "telegram flood control, retrying");
                    sleep(d).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[async_trait]
impl MessagingPort for TelegramMessenger {
    async fn send_html(&self, chat_id: ChatId, html: &str) -> Result<MessageRef> {
        let msg = self
            .with_retry(|| {
                self.bot
                    .send_message(Self::tg_chat(chat_id), html.to_string())
                    .parse_mode(ParseMode::Html)
                    .disable_web_page_preview(true)
            })
            .await
            .map_err(Self::map_err)?;

        Ok(MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        })
    }

    async fn edit_html(
        &self,
        msg: MessageRef,
        html: &str,
        keyboard: Option<InlineKeyboard>,
    ) -> Result<()> {
        let markup = keyboard.map(Self::markup).transpose()?;

        self.with_retry(|| {
            let req = self
                .bot
                .edit_message_text(
                    Self::tg_chat(msg.chat_id),
                    Self::tg_msg_id(msg.message_id),
                    html.to_string(),
                )
                .parse_mode(ParseMode::Html)
                .disable_web_page_preview(true);
            match &markup {
                Some(m) => req.reply_markup(m.clone()),
                None => req,
            }
        })
        .await
        .map_err(Self::map_err)?;
        Ok(())
    }

    async fn copy_message(&self, to: ChatId, from: MessageRef) -> Result<MessageRef> {
        let id = self
            .with_retry(|| {
                self.bot.copy_message(
                    Self::tg_chat(to),
                    Self::tg_chat(from.chat_id),
                    Self::tg_msg_id(from.message_id),
                )
            })
            .await
            .map_err(Self::map_err)?;

        Ok(MessageRef {
            chat_id: to,
            message_id: MessageId(id.0),
        })
    }

    /// The Bot API cannot read a message by id. Forwarding it into its own
    /// chat returns the full message; the forwarded copy is deleted right
    /// after.
    ///
    /// The bot needs post and delete rights in the storage channel. If the
    /// delete fails the duplicate forward stays in the channel and is only
    /// logged; the lookup itself still succeeds.
    async fn fetch_message(&self, msg: MessageRef) -> Result<Option<StoredMessage>> {
        let chat = Self::tg_chat(msg.chat_id);
        let probe = match self
            .with_retry(|| {
                self.bot
                    .forward_message(chat, chat, Self::tg_msg_id(msg.message_id))
                    .disable_notification(true)
            })
            .await
        {
            Ok(probe) => probe,
            Err(e) if Self::is_missing_message(&e) => return Ok(None),
            Err(e) => return Err(Self::map_err(e)),
        };

        let media = media::media_of(&probe);

        if let Err(e) = self
            .with_retry(|| self.bot.delete_message(chat, probe.id))
            .await
        {
            tracing::warn!(
                chat_id = msg.chat_id.0,
                probe_id = probe.id.0,
                error = %e,
                "failed to delete lookup probe"
            );
        }

        Ok(Some(StoredMessage {
            message: msg,
            media,
        }))
    }

    async fn bot_username(&self) -> Result<String> {
        let me = self
            .with_retry(|| self.bot.get_me())
            .await
            .map_err(Self::map_err)?;
        Ok(me.username().to_string())
    }
}
