//! Type-safe wrappers and enums shared by the CLI and the library.

pub mod ids;
pub mod platform;
pub mod stat_kind;

pub use ids::{ChatUserId, ProfileId};
pub use platform::Platform;
pub use stat_kind::StatKind;
