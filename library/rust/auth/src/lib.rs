//! estate-auth: バックオフィスサーバー用 JWT 発行・検証 + RBAC ライブラリ
//!
//! ログイン時に HS256 署名の JWT を発行し、各リクエストで署名と有効期限を
//! 検証する。ロール階層（SUPERADMIN > ADMIN > EMPLOYEE）の判定を提供する。
//!
//! # 使い方
//!
//! ```ignore
//! use estate_auth::{Role, TokenService};
//! use secrecy::SecretString;
//!
//! let tokens = TokenService::new(SecretString::new("secret".to_string()), 3600);
//! let token = tokens.issue("a3f0...", "USR001", "Asha Verma", Role::Admin)?;
//! let claims = tokens.verify(&token)?;
//! ```

pub mod claims;
pub mod rbac;
pub mod token;

pub use claims::{Claims, Role};
pub use rbac::{can_create_role, check_permission, has_role};
pub use token::{AuthError, TokenService};
