//! # esstat - Live Elasticsearch Cluster Dashboard
//!
//! esstat polls a cluster's health, settings, recovery and shard endpoints on a
//! fixed cadence and renders them as an interactive terminal dashboard.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                      Elasticsearch node                           │
//! └──────────────────────────────┬────────────────────────────────────┘
//!                                │ 4 concurrent GETs per cycle
//!                                ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  source (DataSource)  ──▶  refresh (RefreshScheduler)             │
//! │                                 │ whole-snapshot swap             │
//! │                                 ▼                                 │
//! │                           snapshot (SnapshotStore)                │
//! │                                 │                                 │
//! │  input (listener, decoder) ─▶ ui (dispatcher, state) ─▶ app tick  │
//! │                                                          │        │
//! │                                                          ▼        │
//! │                                                   tui (ratatui)   │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - [`source`]: the four panel queries behind the [`source::DataSource`]
//!   trait, and the `reqwest` client that answers them
//! - [`refresh`]: refresh clock and the scheduler that runs fetch cycles,
//!   one at a time, anchored to the previous cycle's completion
//! - [`snapshot`]: the latest good snapshot and the data-ready latch
//! - [`input`]: single-byte stdin listener and the escape-sequence decoder
//! - [`ui`]: UI state machine and the command dispatcher
//! - [`app`]: the tick loop that owns UI state and draws frames
//! - [`tui`]: panel rendering
//! - [`cli`]: arguments and validated configuration
//! - [`domain`]: payload types and errors
//!
//! ## Typical Usage
//!
//! ```bash
//! esstat localhost
//! esstat es-01.prod --port 9201 --interval 10 --log-file /tmp/esstat.log
//! esstat es-01.prod --once
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

pub mod app;
pub mod cli;
pub mod domain;
pub mod input;
pub mod refresh;
pub mod snapshot;
pub mod source;
pub mod tui;
pub mod ui;
