pub mod error;
pub mod hash;

pub use error::EncryptionError;
pub use hash::{hash_password, verify_password};
