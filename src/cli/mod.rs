//! CLI argument definitions and parsing.

pub mod types;

use clap::{Parser, Subcommand};
use types::{ChatUserId, Platform, StatKind};

use crate::core::AssetKind;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Look up a player's statistics.
    ///
    /// Without a name, the name bound to `--user` is used, then
    /// `R6S_DEFAULT_NAME`.
    Lookup {
        /// Player name on the chosen platform.
        name: Option<String>,

        /// Platform: pc/uplay, xbox/xbl, psn/ps4.
        #[clap(long, short)]
        platform: Option<Platform>,

        /// What to show: basic, detail, operators, recent-plays.
        #[clap(long, short, default_value_t = StatKind::Basic)]
        kind: StatKind,

        /// Source to ask instead of `R6S_ADAPTERS`.
        #[clap(long, short)]
        source: Option<String>,

        /// Chat user whose bound name to fall back on.
        #[clap(long, short)]
        user: Option<ChatUserId>,

        /// Output the statistics as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Bind a chat user to a default player name.
    Bind { user: ChatUserId, name: String },

    /// Remove a chat user's binding.
    Unbind { user: ChatUserId },

    /// List the available sources and their capabilities.
    Sources {
        #[clap(long)]
        json: bool,
    },

    /// Download an avatar, operator or weapon image into the asset cache.
    Asset {
        /// avatars, operators or weapons.
        kind: AssetKind,

        name: String,

        /// Explicit download URL (required for avatars).
        #[clap(long)]
        url: Option<String>,
    },
}

#[derive(Debug, Parser)]
#[clap(name = "r6s-stats", about = "Rainbow Six Siege player statistics")]
pub struct R6s {
    #[clap(subcommand)]
    pub command: Commands,
}
