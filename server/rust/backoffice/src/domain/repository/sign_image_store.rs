use async_trait::async_trait;

/// Storage abstraction for project sign-images. The local-disk
/// implementation lives in `infrastructure::storage`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignImageStore: Send + Sync {
    /// Persists the image bytes and returns the stored file name.
    async fn save(&self, original_name: &str, bytes: &[u8]) -> anyhow::Result<String>;
    /// Removes a previously stored image. Missing files are not an error.
    async fn remove(&self, stored_name: &str) -> anyhow::Result<()>;
}
