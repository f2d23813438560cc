//! On-disk layout plan cache, co-located with the parsed record
//! (`<stem>.parsed.json` → `<stem>.parsed.layout.json`).

use std::path::Path;

use thiserror::Error;

use crate::models::layout::LayoutPlan;
use crate::storage::{to_pretty_json, write_atomic};

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cached plan is not a valid layout plan: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// A cached plan together with the exact file contents it was read from.
#[derive(Debug, Clone)]
pub struct CachedPlan {
    pub plan: LayoutPlan,
    pub raw: String,
}

/// Reads the cache. `Ok(None)` when no cache file exists.
pub async fn load(path: &Path) -> Result<Option<CachedPlan>, CacheError> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let plan = serde_json::from_str(&raw)?;
    Ok(Some(CachedPlan { plan, raw }))
}

pub fn encode(plan: &LayoutPlan) -> serde_json::Result<String> {
    to_pretty_json(plan)
}

/// Atomically replaces the cache file with `json`.
pub async fn store(path: &Path, json: String) -> Result<(), CacheError> {
    let target = path.to_path_buf();
    tokio::task::spawn_blocking(move || write_atomic(&target, json.as_bytes()))
        .await
        .map_err(std::io::Error::other)??;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_cache_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load(&dir.path().join("x.parsed.layout.json")).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_store_then_load_keeps_raw_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.parsed.layout.json");
        let json = encode(&LayoutPlan::default_plan()).unwrap();
        store(&path, json.clone()).await.unwrap();

        let cached = load(&path).await.unwrap().unwrap();
        assert_eq!(cached.raw, json);
        assert_eq!(cached.plan, LayoutPlan::default_plan());
    }

    #[tokio::test]
    async fn test_garbage_cache_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.parsed.layout.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load(&path).await, Err(CacheError::Corrupt(_))));
    }
}
