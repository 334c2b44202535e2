use std::time::Duration;

/// Validated runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `scheme://host:port` of the node to poll
    pub base_url: String,
    pub interval: Duration,
    pub tick: Duration,
    pub timeout: Duration,
    pub once: bool,
}
