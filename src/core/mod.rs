//! Shared plumbing used by the source adapters:
//! - `cache`: on-disk asset cache with an in-memory LRU front
//! - `http`: client construction and per-upstream header sets

pub mod cache;
pub mod http;

pub use cache::{try_read_to_string, write_string, AssetCache, AssetKind};
pub use http::build_client;
