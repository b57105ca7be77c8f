use crate::{
    domain::{ChatId, MessageId, MessageRef, UserId},
    formatting::default_file_name,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Document,
    Video,
    Audio,
    Photo,
}

/// Normalized display metadata of an attachment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
}

/// A supported attachment, built once where the inbound update is parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MediaFile {
    Document(FileInfo),
    Video(FileInfo),
    Audio(FileInfo),
    Photo(FileInfo),
}

impl MediaFile {
    /// Build the variant for `kind`, falling back to the kind's placeholder
    /// name when the platform did not supply one (photos never carry one).
    pub fn new(kind: MediaKind, name: Option<String>, size: u64) -> Self {
        let name = match kind {
            MediaKind::Photo => None,
            _ => name.filter(|n| !n.trim().is_empty()),
        }
        .unwrap_or_else(|| default_file_name(kind).to_string());

        let info = FileInfo { name, size };
        match kind {
            MediaKind::Document => Self::Document(info),
            MediaKind::Video => Self::Video(info),
            MediaKind::Audio => Self::Audio(info),
            MediaKind::Photo => Self::Photo(info),
        }
    }

    pub fn kind(&self) -> MediaKind {
        match self {
            Self::Document(_) => MediaKind::Document,
            Self::Video(_) => MediaKind::Video,
            Self::Audio(_) => MediaKind::Audio,
            Self::Photo(_) => MediaKind::Photo,
        }
    }

    pub fn info(&self) -> &FileInfo {
        match self {
            Self::Document(info) | Self::Video(info) | Self::Audio(info) | Self::Photo(info) => {
                info
            }
        }
    }
}

/// A private message carrying a supported attachment.
#[derive(Clone, Debug)]
pub struct FileUpload {
    pub chat_id: ChatId,
    pub user_id: Option<UserId>,
    pub message: MessageRef,
    pub media: MediaFile,
}

/// `/start [token]` in a private chat.
#[derive(Clone, Debug)]
pub struct StartRequest {
    pub chat_id: ChatId,
    pub user_id: Option<UserId>,
    pub first_name: Option<String>,
    pub token: Option<String>,
}

/// `/stats`, already filtered to the owner by the adapter.
#[derive(Clone, Debug)]
pub struct StatsRequest {
    pub chat_id: ChatId,
}

/// A message read back from the storage channel.
#[derive(Clone, Debug)]
pub struct StoredMessage {
    pub message: MessageRef,
    pub media: Option<MediaFile>,
}

/// Result of a successful relay, as shown to the uploader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SharedFile {
    pub name: String,
    pub size_label: String,
    pub link: String,
    pub channel_message: MessageId,
}

/// Inline keyboard of URL buttons, one per row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineKeyboard {
    pub buttons: Vec<UrlButton>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UrlButton {
    pub label: String,
    pub url: String,
}

impl InlineKeyboard {
    pub fn single(label: &str, url: &str) -> Self {
        Self {
            buttons: vec![UrlButton {
                label: label.to_string(),
                url: url.to_string(),
            }],
        }
    }
}
