//! Two-tier cache for image assets (avatars, operator and weapon art).
//!
//! - L1: in-memory LRU keyed by `(kind, name)`
//! - L2: `{root}/{kind}/{name}.png` on disk
//!
//! Reads go memory, then disk (promoting the hit), then network. Each asset
//! is written once; concurrent writers of the same asset race and the last
//! one wins. There is no cross-process locking.

use log::debug;
use lru::LruCache;
use reqwest::Client;
use std::{
    fmt, fs,
    io::{Read, Write},
    num::NonZeroUsize,
    path::{Path, PathBuf},
    str::FromStr,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::error::{R6sError, Result};

/// Stats-db endpoint serving operator and weapon art.
pub const ASSETS_BASE_URL: &str = "https://api.statsdb.net/r6/assets";
/// Ubisoft avatar CDN; `{}` is the profile id.
pub const AVATAR_URL_TEMPLATE: &str = "https://ubisoft-avatars.akamaized.net/{}/default_146_146.png";

const DEFAULT_MEMORY_CAPACITY: usize = 64;

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file, creating parent directories.
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    write_bytes(path, contents.as_bytes())
}

pub fn write_bytes(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents)
}

/// Fill a `{}` avatar template such as [`AVATAR_URL_TEMPLATE`].
pub fn avatar_url(template: &str, profile_id: &str) -> String {
    template.replace("{}", profile_id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Avatars,
    Operators,
    Weapons,
}

impl AssetKind {
    pub fn dir_name(&self) -> &'static str {
        match self {
            AssetKind::Avatars => "avatars",
            AssetKind::Operators => "operators",
            AssetKind::Weapons => "weapons",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for AssetKind {
    type Err = R6sError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "avatar" | "avatars" => Ok(AssetKind::Avatars),
            "operator" | "operators" | "op" => Ok(AssetKind::Operators),
            "weapon" | "weapons" => Ok(AssetKind::Weapons),
            other => Err(R6sError::Cache {
                message: format!("unknown asset kind: {other}"),
            }),
        }
    }
}

/// Keep names usable as a single path component.
fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c.to_lowercase().next().unwrap_or(c)
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "_".to_string()
    } else {
        cleaned
    }
}

type MemoryKey = (AssetKind, String);

pub struct AssetCache {
    root: PathBuf,
    assets_base_url: String,
    memory: Arc<Mutex<LruCache<MemoryKey, Arc<Vec<u8>>>>>,
}

impl AssetCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_capacity(root, DEFAULT_MEMORY_CAPACITY)
    }

    pub fn with_capacity(root: impl Into<PathBuf>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            root: root.into(),
            assets_base_url: ASSETS_BASE_URL.to_string(),
            memory: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// Point operator/weapon lookups at another host.
    pub fn with_assets_base_url(mut self, url: impl Into<String>) -> Self {
        self.assets_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn asset_path(&self, kind: AssetKind, name: &str) -> PathBuf {
        self.root
            .join(kind.dir_name())
            .join(format!("{}.png", sanitize(name)))
    }

    /// Upstream URL for operator and weapon art. Avatars have no fixed
    /// endpoint; the caller supplies one.
    pub fn remote_url(&self, kind: AssetKind, name: &str) -> Option<String> {
        match kind {
            AssetKind::Operators => Some(format!(
                "{}/operators/{}/figure/small",
                self.assets_base_url,
                name.trim().to_lowercase()
            )),
            AssetKind::Weapons => Some(format!(
                "{}/weapons/{}",
                self.assets_base_url,
                name.trim().to_lowercase()
            )),
            AssetKind::Avatars => None,
        }
    }

    fn memory(&self) -> MutexGuard<'_, LruCache<MemoryKey, Arc<Vec<u8>>>> {
        // A poisoned lock only means another reader panicked mid-insert.
        self.memory.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Look in memory, then on disk. Disk hits are promoted.
    pub fn get(&self, kind: AssetKind, name: &str) -> Option<Arc<Vec<u8>>> {
        let key = (kind, sanitize(name));
        if let Some(bytes) = self.memory().get(&key) {
            return Some(bytes.clone());
        }

        let bytes = fs::read(self.asset_path(kind, name)).ok()?;
        let bytes = Arc::new(bytes);
        self.memory().put(key, bytes.clone());
        Some(bytes)
    }

    pub fn put(&self, kind: AssetKind, name: &str, bytes: Vec<u8>) -> Result<Arc<Vec<u8>>> {
        let path = self.asset_path(kind, name);
        write_bytes(&path, &bytes).map_err(|e| R6sError::Cache {
            message: format!("failed to write {}: {e}", path.display()),
        })?;
        let bytes = Arc::new(bytes);
        self.memory().put((kind, sanitize(name)), bytes.clone());
        Ok(bytes)
    }

    /// Read-through lookup. `url` overrides the kind's default endpoint and
    /// is required for avatars.
    pub async fn get_or_fetch(
        &self,
        client: &Client,
        kind: AssetKind,
        name: &str,
        url: Option<&str>,
    ) -> Result<Arc<Vec<u8>>> {
        if let Some(bytes) = self.get(kind, name) {
            return Ok(bytes);
        }

        let url = match url {
            Some(url) => url.to_string(),
            None => self.remote_url(kind, name).ok_or_else(|| R6sError::Cache {
                message: format!("no download URL for {kind} asset {name}"),
            })?,
        };
        debug!("asset cache miss for {kind}/{name}, fetching {url}");

        let response = client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(R6sError::Upstream {
                source_name: "assets".to_string(),
                status: status.as_u16(),
                retryable: status.is_server_error(),
            });
        }
        let bytes = response.bytes().await?;
        self.put(kind, name, bytes.to_vec())
    }

    pub fn memory_len(&self) -> usize {
        self.memory().len()
    }

    pub fn clear_memory(&self) {
        self.memory().clear();
    }
}
