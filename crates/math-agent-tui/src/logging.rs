use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use math_agent_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "math_agent=info,math_agent_core=info";
const LOG_FILE: &str = "math-agent.log";

/// Log to a file under the config dir; stderr belongs to the terminal UI.
/// Returns the log path, or `None` when logging is disabled.
pub fn init() -> Option<PathBuf> {
    let dir = Config::config_dir()?;
    fs::create_dir_all(&dir).ok()?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path).ok()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .with_thread_ids(false)
                .compact(),
        )
        .try_init()
        .ok()?;

    Some(path)
}
