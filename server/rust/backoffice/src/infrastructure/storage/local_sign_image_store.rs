use async_trait::async_trait;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::domain::repository::sign_image_store::SignImageStore;

/// Stores project sign-images on the local filesystem under a configured
/// directory. Stored names are random, keeping the original extension.
pub struct LocalSignImageStore {
    dir: PathBuf,
}

impl LocalSignImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl SignImageStore for LocalSignImageStore {
    async fn save(&self, original_name: &str, bytes: &[u8]) -> anyhow::Result<String> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let extension = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("bin")
            .to_ascii_lowercase();
        let stored_name = format!("{}.{}", Uuid::new_v4(), extension);
        tokio::fs::write(self.dir.join(&stored_name), bytes).await?;
        Ok(stored_name)
    }

    async fn remove(&self, stored_name: &str) -> anyhow::Result<()> {
        // stored names are generated server-side; reject anything that
        // could escape the upload directory
        if stored_name.contains('/') || stored_name.contains("..") {
            anyhow::bail!("invalid stored file name: {}", stored_name);
        }
        match tokio::fs::remove_file(self.dir.join(stored_name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_remove_round_trip() {
        let dir = std::env::temp_dir().join(format!("sign-images-{}", Uuid::new_v4()));
        let store = LocalSignImageStore::new(&dir);

        let stored = store.save("sign.PNG", b"image-bytes").await.expect("save");
        assert!(stored.ends_with(".png"));
        assert!(dir.join(&stored).exists());

        store.remove(&stored).await.expect("remove");
        assert!(!dir.join(&stored).exists());

        // removing again is not an error
        store.remove(&stored).await.expect("idempotent remove");

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_remove_rejects_path_traversal() {
        let store = LocalSignImageStore::new(std::env::temp_dir());
        assert!(store.remove("../etc/passwd").await.is_err());
    }
}
