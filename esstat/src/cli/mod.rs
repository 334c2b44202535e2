//! Command-line parsing and validated configuration.

mod args;
mod config;

pub use args::Args;
pub use config::Config;
