//! Inbound attachment parsing: teloxide `Message` -> core `MediaFile`.

use teloxide::types::Message;

use fsb_core::messaging::types::{MediaFile, MediaKind};

/// The supported attachment of `msg`, if any.
///
/// Photos arrive as several sizes; the largest (last) one is reported.
pub fn media_of(msg: &Message) -> Option<MediaFile> {
    if let Some(doc) = msg.document() {
        return Some(MediaFile::new(
            MediaKind::Document,
            doc.file_name.clone(),
            u64::from(doc.file.size),
        ));
    }
    if let Some(video) = msg.video() {
        return Some(MediaFile::new(
            MediaKind::Video,
            video.file_name.clone(),
            u64::from(video.file.size),
        ));
    }
    if let Some(audio) = msg.audio() {
        return Some(MediaFile::new(
            MediaKind::Audio,
            audio.file_name.clone(),
            u64::from(audio.file.size),
        ));
    }
    if let Some(sizes) = msg.photo() {
        let largest = sizes.last()?;
        return Some(MediaFile::new(
            MediaKind::Photo,
            None,
            u64::from(largest.file.size),
        ));
    }
    None
}
