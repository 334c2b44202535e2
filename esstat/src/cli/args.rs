//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use super::config::Config;
use crate::domain::ConfigError;

#[derive(Parser, Debug)]
#[command(
    name = "esstat",
    version,
    about = "Live terminal dashboard for an Elasticsearch cluster",
    after_help = "\
EXAMPLES:
    esstat localhost                         Watch a local node on :9200
    esstat es-01.prod --port 9201            Custom port
    esstat es-01.prod --interval 10          Refresh every 10 seconds
    esstat es-01.prod --once | jq .status    Print one snapshot as JSON

KEYS:
    h help   p pause/resume   e edit settings   ↑/↓ move   Enter select   q quit"
)]
pub struct Args {
    /// Cluster node to poll
    #[arg(value_name = "HOST", env = "ESSTAT_HOST")]
    pub host: String,

    /// HTTP port of the node
    #[arg(short, long, default_value_t = 9200, env = "ESSTAT_PORT")]
    pub port: u16,

    /// URL scheme (http or https)
    #[arg(long, default_value = "http", env = "ESSTAT_SCHEME")]
    pub scheme: String,

    /// Seconds between refreshes, measured from the end of the previous one
    #[arg(short, long, default_value_t = 5, env = "ESSTAT_INTERVAL")]
    pub interval: u64,

    /// UI tick period in milliseconds
    #[arg(long, default_value_t = 100, env = "ESSTAT_TICK_MS")]
    pub tick_ms: u64,

    /// Per-request HTTP timeout in seconds
    #[arg(long, default_value_t = 10, env = "ESSTAT_TIMEOUT")]
    pub timeout: u64,

    /// Write logs to this file instead of stderr (the dashboard owns the screen)
    #[arg(long, value_name = "FILE", env = "ESSTAT_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Fetch one snapshot, print it as JSON and exit
    #[arg(long)]
    pub once: bool,
}

impl Args {
    /// Validate into a [`Config`].
    ///
    /// # Errors
    /// Returns [`ConfigError`] for an empty host, an unknown scheme or a zero
    /// interval, tick or timeout.
    pub fn config(&self) -> Result<Config, ConfigError> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        let scheme = self.scheme.to_ascii_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(ConfigError::UnsupportedScheme(self.scheme.clone()));
        }
        for (name, value) in [("interval", self.interval), ("tick-ms", self.tick_ms), ("timeout", self.timeout)] {
            if value == 0 {
                return Err(ConfigError::ZeroDuration(name));
            }
        }

        Ok(Config {
            base_url: format!("{scheme}://{host}:{}", self.port),
            interval: Duration::from_secs(self.interval),
            tick: Duration::from_millis(self.tick_ms),
            timeout: Duration::from_secs(self.timeout),
            once: self.once,
        })
    }
}
