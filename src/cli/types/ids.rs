//! ID types for players and chat users.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::R6sError;

/// Chat-platform user id used as the key of a username binding.
///
/// # Examples
///
/// ```rust
/// use r6s_stats::ChatUserId;
///
/// let user = ChatUserId::new("10001");
/// assert_eq!(user.as_str(), "10001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatUserId(pub String);

impl ChatUserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChatUserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChatUserId {
    type Err = R6sError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(R6sError::Config {
                message: "chat user id must not be empty".to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// Platform-scoped unique profile id (a UUID on Ubisoft's side).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileId(pub String);

impl ProfileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
