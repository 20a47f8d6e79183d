use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncryptionError {
    #[error("hash failed: {0}")]
    HashFailed(String),
    #[error("malformed password hash: {0}")]
    MalformedHash(String),
}
