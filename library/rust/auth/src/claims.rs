//! JWT Claims 構造体。

use serde::{Deserialize, Serialize};

/// Role はバックオフィスのユーザーロールを表す。
///
/// 階層: SUPERADMIN > ADMIN > EMPLOYEE。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "SUPERADMIN")]
    SuperAdmin,
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "EMPLOYEE")]
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPERADMIN",
            Role::Admin => "ADMIN",
            Role::Employee => "EMPLOYEE",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUPERADMIN" => Ok(Role::SuperAdmin),
            "ADMIN" => Ok(Role::Admin),
            "EMPLOYEE" => Ok(Role::Employee),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims は発行する JWT トークンの Claims 構造体。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// ユーザーの一意識別子（UUID）
    pub sub: String,

    /// ログイン ID（ユーザーマスタの自然キー）
    pub user_id: String,

    /// 表示名
    pub name: String,

    /// ロール
    pub role: Role,

    /// トークンの有効期限（Unix タイムスタンプ）
    pub exp: u64,

    /// トークンの発行時刻（Unix タイムスタンプ）
    pub iat: u64,
}

impl std::fmt::Display for Claims {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Claims{{sub={}, user_id={}, role={}}}",
            self.sub, self.user_id, self.role
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::SuperAdmin, Role::Admin, Role::Employee] {
            assert_eq!(Role::from_str(role.as_str()), Ok(role));
        }
    }

    #[test]
    fn test_role_unknown() {
        assert!(Role::from_str("MANAGER").is_err());
    }

    #[test]
    fn test_role_serde_uses_screaming_case() {
        let json = serde_json::to_string(&Role::SuperAdmin).unwrap();
        assert_eq!(json, "\"SUPERADMIN\"");
        let back: Role = serde_json::from_str("\"EMPLOYEE\"").unwrap();
        assert_eq!(back, Role::Employee);
    }
}
