use std::{env, path::Path};

use crate::{errors::Error, Result};

/// Host used for deep links when `LINK_DOMAIN` is not set.
pub const DEFAULT_LINK_DOMAIN: &str = "t.me";

/// Typed configuration, read once at startup and shared read-only.
///
/// Missing keys fall back to zero/empty on purpose: a bot started without a
/// storage channel still runs, and the first copy into the channel fails with
/// a platform error that is reported to the user.
#[derive(Clone, Debug)]
pub struct Config {
    // Credentials
    pub api_id: i64,
    pub api_hash: String,
    pub bot_token: String,

    // Storage / access
    pub channel_id: i64,
    pub owner_id: i64,
    pub owner_only_uploads: bool,

    // Links
    pub link_domain: String,
}

impl Config {
    /// Load from the process environment, after an optional `.env` file.
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"))?;
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, tests, ...).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_id = parse_i64(&lookup, "APP_ID")?.unwrap_or(0);
        let api_hash = lookup("API_HASH").unwrap_or_default();
        let bot_token = lookup("TG_BOT_TOKEN").unwrap_or_default();

        let channel_id = parse_i64(&lookup, "CHANNEL_ID")?.unwrap_or(0);
        let owner_id = parse_i64(&lookup, "OWNER_ID")?.unwrap_or(0);
        let owner_only_uploads = lookup("OWNER_ONLY_UPLOADS")
            .map(|s| parse_bool(&s))
            .unwrap_or(false);

        let link_domain = lookup("LINK_DOMAIN")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_LINK_DOMAIN.to_string());

        Ok(Self {
            api_id,
            api_hash,
            bot_token,
            channel_id,
            owner_id,
            owner_only_uploads,
            link_domain,
        })
    }

    /// Bot token safe for logs: the first 20 characters only.
    pub fn masked_token(&self) -> String {
        let prefix: String = self.bot_token.chars().take(20).collect();
        format!("{prefix}...")
    }

    /// Keys that were left at their zero/empty default.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.bot_token.trim().is_empty() {
            out.push("TG_BOT_TOKEN");
        }
        if self.channel_id == 0 {
            out.push("CHANNEL_ID");
        }
        if self.owner_id == 0 {
            out.push("OWNER_ID");
        }
        out
    }
}

fn load_dotenv_if_present(path: &Path) -> Result<()> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(Error::Config(format!("{}: {e}", path.display()))),
    }
}

fn parse_i64<F>(lookup: &F, key: &str) -> Result<Option<i64>>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key).and_then(non_empty) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<i64>()
        .map(Some)
        .map_err(|e| Error::Config(format!("{key} must be an integer, got {raw:?}: {e}")))
}

fn parse_bool(s: &str) -> bool {
    matches!(
        s.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
