//! Reply formatting (Telegram HTML) and display helpers.

use crate::messaging::types::{MediaKind, SharedFile};

/// Escape HTML special characters for Telegram HTML parse mode.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Human readable file size with two decimals.
///
/// Thresholds are binary (1 MiB / 1 GiB) while the labels read KB/MB/GB.
pub fn format_size(bytes: u64) -> String {
    let bytes = bytes as f64;
    let size_mb = bytes / (1024.0 * 1024.0);
    if size_mb < 1.0 {
        format!("{:.2} KB", bytes / 1024.0)
    } else if size_mb < 1024.0 {
        format!("{size_mb:.2} MB")
    } else {
        format!("{:.2} GB", size_mb / 1024.0)
    }
}

/// `https://<domain>/<bot-handle>?start=<token>`
pub fn deep_link(domain: &str, bot_handle: &str, token: &str) -> String {
    let handle = bot_handle.trim_start_matches('@');
    format!("https://{domain}/{handle}?start={token}")
}

/// Placeholder name when the platform did not supply one.
pub fn default_file_name(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Document => "Document",
        MediaKind::Video => "Video",
        MediaKind::Audio => "Audio",
        MediaKind::Photo => "Photo",
    }
}

pub const PROCESSING: &str = "⏳ Processing your file...";
pub const RELAY_FAILED: &str = "❌ Error processing file. Please try again.";
pub const UPLOAD_OWNER_ONLY: &str = "❌ Only bot owner can upload files!";
pub const FILE_DELIVERED: &str = "✅ Here's your file!";
pub const FILE_NOT_FOUND: &str = "❌ File not found or expired.";
pub const RETRIEVE_FAILED: &str = "❌ Error retrieving file. Please try again.";
pub const INVALID_LINK: &str = "❌ Invalid link!";
pub const DOWNLOAD_BUTTON: &str = "📥 Download";

pub fn welcome_html(first_name: Option<&str>) -> String {
    let name = first_name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or("there");
    format!(
        "👋 Hello {}!\n\n\
         📤 <b>How to use:</b>\n\
         1. Send me any file\n\
         2. I'll give you a shareable link\n\
         3. Share the link with anyone\n\
         4. They can download the file instantly!\n\n\
         ⚡ Fast, simple, and free!",
        escape_html(name)
    )
}

pub fn file_ready_html(file: &SharedFile) -> String {
    format!(
        "✅ <b>File Ready!</b>\n\n\
         📄 <b>Name:</b> <code>{}</code>\n\
         📦 <b>Size:</b> {}\n\n\
         🔗 <b>Shareable Link:</b>\n<code>{}</code>\n\n\
         👆 Click the link above or share it with others!",
        escape_html(&file.name),
        file.size_label,
        escape_html(&file.link)
    )
}

pub fn stats_html(bot_handle: &str, channel_id: i64, owner_id: i64) -> String {
    format!(
        "📊 <b>Bot Statistics</b>\n\n\
         🤖 <b>Bot:</b> @{}\n\
         💾 <b>Storage Channel:</b> <code>{channel_id}</code>\n\
         👤 <b>Owner:</b> <code>{owner_id}</code>\n\n\
         ✅ Bot is running smoothly!",
        escape_html(bot_handle.trim_start_matches('@'))
    )
}

pub const STATS_FAILED: &str = "❌ Could not read bot statistics. Please try again.";
