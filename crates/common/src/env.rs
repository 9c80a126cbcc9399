//! Environment/runtime helpers
//!
//! Sanity checks to ensure the storage location is usable at startup.

use std::path::Path;
use tracing::debug;

/// Ensure the parent directory of the storage file exists, creating it if needed.
pub async fn ensure_storage_dir(storage_path: &str) -> anyhow::Result<()> {
    let parent = match Path::new(storage_path).parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => return Ok(()),
    };
    if tokio::fs::metadata(parent).await.is_err() {
        debug!(dir = %parent.display(), "creating storage directory");
    }
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_parent() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("sso_env_{}", uuid::Uuid::new_v4()));
        let file = dir.join("nested").join("sso.db");
        ensure_storage_dir(file.to_str().unwrap()).await?;
        assert!(tokio::fs::metadata(dir.join("nested")).await?.is_dir());
        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn bare_file_name_is_ok() -> anyhow::Result<()> {
        ensure_storage_dir("sso.db").await
    }
}
