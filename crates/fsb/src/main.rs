use std::sync::Arc;

use tracing::{error, info, warn};

use fsb_core::config::Config;

#[tokio::main]
async fn main() -> Result<(), fsb_core::Error> {
    fsb_core::logging::init("fsb")?;
    info!("starting file sharing bot");

    let cfg = match Config::load() {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!(error = ?e, "failed to load configuration");
            return Err(e);
        }
    };

    info!(
        token = %cfg.masked_token(),
        channel = cfg.channel_id,
        owner = cfg.owner_id,
        owner_only_uploads = cfg.owner_only_uploads,
        "configuration loaded"
    );
    let missing = cfg.missing_keys();
    if !missing.is_empty() {
        warn!(?missing, "configuration keys not set, calls that need them will fail");
    }

    if let Err(e) = fsb_telegram::router::run_polling(cfg).await {
        error!(error = ?e, "error starting bot");
        return Err(fsb_core::Error::External(format!("telegram bot failed: {e:#}")));
    }

    Ok(())
}
