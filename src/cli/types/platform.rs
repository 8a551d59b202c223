//! Gaming platform a player profile lives on.

use crate::error::R6sError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Platform a Siege account is registered on.
///
/// Upstreams spell these differently (`uplay`, `xbl`, `psn`, `ps4`...), so
/// parsing accepts every alias and each adapter asks for its own spelling.
///
/// # Examples
///
/// ```rust
/// use r6s_stats::Platform;
///
/// let platform: Platform = "uplay".parse().unwrap();
/// assert_eq!(platform, Platform::Pc);
/// assert_eq!(platform.ubisoft_platform_type(), "uplay");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Pc,
    Xbox,
    Psn,
}

impl Platform {
    /// Platform type understood by the Ubisoft profile endpoints.
    pub fn ubisoft_platform_type(&self) -> &'static str {
        match self {
            Platform::Pc => "uplay",
            Platform::Xbox => "xbl",
            Platform::Psn => "psn",
        }
    }

    /// Path segment used by the stats database and tracker sites.
    pub fn path_segment(&self) -> &'static str {
        match self {
            Platform::Pc => "pc",
            Platform::Xbox => "xbox",
            Platform::Psn => "psn",
        }
    }

    /// Platform family used by the ranked skill endpoint.
    pub fn platform_family(&self) -> &'static str {
        match self {
            Platform::Pc => "pc",
            Platform::Xbox | Platform::Psn => "console",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path_segment())
    }
}

impl FromStr for Platform {
    type Err = R6sError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pc" | "uplay" | "ubi" => Ok(Platform::Pc),
            "xbox" | "xbl" => Ok(Platform::Xbox),
            "psn" | "ps4" | "ps5" | "ps" => Ok(Platform::Psn),
            _ => Err(R6sError::InvalidPlatform {
                platform: s.to_string(),
            }),
        }
    }
}
