//! Rainbow Six Siege player statistics
//!
//! Fetches a player's statistics from one of several third-party or official
//! upstreams, reconciles each upstream's payload into one canonical
//! [`PlayerStatistics`](stats::PlayerStatistics) model, and classifies MMR
//! values into named ranks.
//!
//! ## Features
//!
//! - **Multiple sources**: r6scn, r6tracker, the stats database and Ubisoft's own API
//! - **Bounded retry**: transient upstream failures are retried with a fixed or jittered delay
//! - **Normalization**: per-source mapping tables, MMR pointers and rank tables
//! - **Derived metrics**: K/D, win rate and accuracy with `∞`/`Unknown` sentinels
//! - **Bindings**: chat user → default player name, in a JSON file or SQLite
//! - **Asset cache**: avatar, operator and weapon art on disk with an LRU front
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use r6s_stats::{commands::lookup::*, config::Settings, core::build_client, StatKind};
//!
//! # async fn example() -> r6s_stats::Result<()> {
//! let settings = Settings::from_env()?;
//! let client = build_client(&settings)?;
//! let service = StatsService::from_settings(&settings, &client, None);
//!
//! let lookup = service
//!     .lookup(&LookupRequest::new("MacieJay", StatKind::Detail))
//!     .await?;
//! println!("{}", render_text(&lookup));
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Every setting is read from `R6S_*` variables (a `.env` file works too):
//! ```bash
//! export R6S_ADAPTERS=r6scn
//! export R6S_MAX_RETRY=5
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod normalize;
pub mod rank;
pub mod retry;
pub mod select;
pub mod sources;
pub mod stats;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{ChatUserId, Platform, ProfileId, StatKind};
pub use config::{
    ADAPTERS_ENV_VAR, DB_PASSWORD_ENV_VAR, DB_USERNAME_ENV_VAR, DEFAULT_NAME_ENV_VAR,
    MAX_RETRY_ENV_VAR,
};
pub use error::{R6sError, Result};
