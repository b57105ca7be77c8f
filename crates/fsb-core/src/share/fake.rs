//! In-memory messenger for workflow tests.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;

use crate::{
    config::Config,
    domain::{ChatId, MessageId, MessageRef},
    errors::Error,
    messaging::{
        port::MessagingPort,
        types::{InlineKeyboard, MediaFile, StoredMessage},
    },
    Result,
};

pub const CHANNEL: ChatId = ChatId(-1_001_234_567_890);
pub const OWNER: i64 = 42;
pub const BOT_HANDLE: &str = "files_bot";

pub fn test_config() -> Config {
    Config {
        api_id: 1,
        api_hash: "hash".to_string(),
        bot_token: "123:abc".to_string(),
        channel_id: CHANNEL.0,
        owner_id: OWNER,
        owner_only_uploads: false,
        link_domain: "t.me".to_string(),
    }
}

type Edit = (MessageRef, String, Option<InlineKeyboard>);

#[derive(Default)]
pub struct FakeMessenger {
    next_id: Mutex<HashMap<i64, i32>>,
    messages: Mutex<HashMap<MessageRef, Option<MediaFile>>>,
    sends: Mutex<Vec<(ChatId, String)>>,
    edits: Mutex<Vec<Edit>>,
    copies: Mutex<Vec<(ChatId, MessageRef)>>,
    failing_copy_targets: Mutex<Vec<ChatId>>,
    fail_fetch: Mutex<bool>,
    fail_username: Mutex<bool>,
    fail_edit: Mutex<bool>,
    username_calls: AtomicUsize,
}

impl FakeMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&self, chat_id: ChatId) -> MessageRef {
        let mut ids = self.next_id.lock().unwrap();
        let next = ids.entry(chat_id.0).or_insert(1);
        let id = *next;
        *next += 1;
        MessageRef {
            chat_id,
            message_id: MessageId(id),
        }
    }

    /// Seed a message as if some user had posted it.
    pub fn put(&self, chat_id: ChatId, media: Option<MediaFile>) -> MessageRef {
        let msg = self.alloc(chat_id);
        self.messages.lock().unwrap().insert(msg, media);
        msg
    }

    pub fn fail_copies_to(&self, chat_id: ChatId) {
        self.failing_copy_targets.lock().unwrap().push(chat_id);
    }

    pub fn fail_fetches(&self) {
        *self.fail_fetch.lock().unwrap() = true;
    }

    pub fn fail_username(&self) {
        *self.fail_username.lock().unwrap() = true;
    }

    pub fn fail_edits(&self) {
        *self.fail_edit.lock().unwrap() = true;
    }

    pub fn media_at(&self, chat_id: ChatId, message_id: MessageId) -> Option<MediaFile> {
        self.messages
            .lock()
            .unwrap()
            .get(&MessageRef {
                chat_id,
                message_id,
            })
            .cloned()
            .flatten()
    }

    pub fn messages_in(&self, chat_id: ChatId) -> usize {
        self.messages
            .lock()
            .unwrap()
            .keys()
            .filter(|m| m.chat_id == chat_id)
            .count()
    }

    pub fn sent_to(&self, chat_id: ChatId) -> Vec<String> {
        self.sends
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| *c == chat_id)
            .map(|(_, html)| html.clone())
            .collect()
    }

    pub fn edits(&self) -> Vec<Edit> {
        self.edits.lock().unwrap().clone()
    }

    pub fn copies_to(&self, chat_id: ChatId) -> Vec<MessageRef> {
        self.copies
            .lock()
            .unwrap()
            .iter()
            .filter(|(to, _)| *to == chat_id)
            .map(|(_, from)| *from)
            .collect()
    }

    pub fn username_calls(&self) -> usize {
        self.username_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessagingPort for FakeMessenger {
    async fn send_html(&self, chat_id: ChatId, html: &str) -> Result<MessageRef> {
        self.sends.lock().unwrap().push((chat_id, html.to_string()));
        Ok(self.put(chat_id, None))
    }

    async fn edit_html(
        &self,
        msg: MessageRef,
        html: &str,
        keyboard: Option<InlineKeyboard>,
    ) -> Result<()> {
        if *self.fail_edit.lock().unwrap() {
            return Err(Error::External(
                "telegram error: message can't be edited".to_string(),
            ));
        }
        self.edits
            .lock()
            .unwrap()
            .push((msg, html.to_string(), keyboard));
        Ok(())
    }

    async fn copy_message(&self, to: ChatId, from: MessageRef) -> Result<MessageRef> {
        if self.failing_copy_targets.lock().unwrap().contains(&to) {
            return Err(Error::External("telegram error: chat not found".to_string()));
        }
        let media = self
            .messages
            .lock()
            .unwrap()
            .get(&from)
            .cloned()
            .ok_or_else(|| Error::External("message to copy not found".to_string()))?;

        self.copies.lock().unwrap().push((to, from));
        Ok(self.put(to, media))
    }

    async fn fetch_message(&self, msg: MessageRef) -> Result<Option<StoredMessage>> {
        if *self.fail_fetch.lock().unwrap() {
            return Err(Error::External("telegram error: timed out".to_string()));
        }
        Ok(self
            .messages
            .lock()
            .unwrap()
            .get(&msg)
            .cloned()
            .map(|media| StoredMessage {
                message: msg,
                media,
            }))
    }

    async fn bot_username(&self) -> Result<String> {
        self.username_calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_username.lock().unwrap() {
            return Err(Error::External("telegram error: unauthorized".to_string()));
        }
        Ok(BOT_HANDLE.to_string())
    }
}
