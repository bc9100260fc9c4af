use std::{path::Path, sync::Mutex};

use lazy_static::lazy_static;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase();
    pub static ref LOG_ENV: String = format!("{}_LOGLEVEL", PROJECT_NAME.as_str());
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
}

fn default_filter() -> EnvFilter {
    EnvFilter::new(format!("{}=info", env!("CARGO_CRATE_NAME")))
}

/// Sends everything to `<data_dir>/mymedia.log`. The terminal belongs to the
/// UI, so nothing is written to stdout or stderr.
pub fn initialize_logging(data_dir: &Path) -> color_eyre::Result<()> {
    std::fs::create_dir_all(data_dir)?;
    let log_path = data_dir.join(LOG_FILE.as_str());
    let log_file = std::fs::File::create(&log_path)?;

    let filter = EnvFilter::try_from_env(LOG_ENV.as_str()).unwrap_or_else(|_| default_filter());
    let file_subscriber = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(Mutex::new(log_file))
        .with_target(false)
        .with_ansi(false)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .try_init()?;

    tracing::info!("Logging to {}", log_path.display());
    Ok(())
}
