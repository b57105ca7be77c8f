/// Telegram user id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

/// Telegram chat id (numeric). Channels use the `-100...` form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Telegram message id (numeric), unique within one chat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub i32);

impl MessageId {
    /// Narrow a decoded share-token value to a platform message id.
    ///
    /// Telegram never issues id 0 or ids beyond `i32::MAX`.
    pub fn from_token_value(value: u64) -> Option<Self> {
        match i32::try_from(value) {
            Ok(id) if id > 0 => Some(Self(id)),
            _ => None,
        }
    }

    pub fn token_value(self) -> u64 {
        u64::from(self.0.unsigned_abs())
    }
}

/// A stable reference to a Telegram message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}
