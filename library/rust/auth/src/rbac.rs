//! RBAC ヘルパー: ロール階層とユーザー作成権限の判定。

use crate::claims::{Claims, Role};

/// Claims が指定ロールそのものを持つかを判定する。
pub fn has_role(claims: &Claims, role: Role) -> bool {
    claims.role == role
}

/// 指定アクションに対する権限があるかを判定する。
///
/// SUPERADMIN は全権限。ADMIN は read / write / admin、
/// EMPLOYEE は read / write のみ。
pub fn check_permission(role: Role, action: &str) -> bool {
    match role {
        Role::SuperAdmin => true,
        Role::Admin => matches!(action, "read" | "write" | "admin"),
        Role::Employee => matches!(action, "read" | "write"),
    }
}

/// creator が target ロールのユーザーを作成できるかを判定する。
///
/// SUPERADMIN は ADMIN のみ、ADMIN は EMPLOYEE のみ作成できる。
pub fn can_create_role(creator: Role, target: Role) -> bool {
    matches!(
        (creator, target),
        (Role::SuperAdmin, Role::Admin) | (Role::Admin, Role::Employee)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_superadmin_all_allowed() {
        assert!(check_permission(Role::SuperAdmin, "read"));
        assert!(check_permission(Role::SuperAdmin, "write"));
        assert!(check_permission(Role::SuperAdmin, "admin"));
    }

    #[test]
    fn test_admin_read_write_admin() {
        assert!(check_permission(Role::Admin, "read"));
        assert!(check_permission(Role::Admin, "write"));
        assert!(check_permission(Role::Admin, "admin"));
        assert!(!check_permission(Role::Admin, "superadmin"));
    }

    #[test]
    fn test_employee_read_write_only() {
        assert!(check_permission(Role::Employee, "read"));
        assert!(check_permission(Role::Employee, "write"));
        assert!(!check_permission(Role::Employee, "admin"));
    }

    #[test]
    fn test_user_creation_ladder() {
        assert!(can_create_role(Role::SuperAdmin, Role::Admin));
        assert!(can_create_role(Role::Admin, Role::Employee));

        assert!(!can_create_role(Role::SuperAdmin, Role::SuperAdmin));
        assert!(!can_create_role(Role::SuperAdmin, Role::Employee));
        assert!(!can_create_role(Role::Admin, Role::Admin));
        assert!(!can_create_role(Role::Admin, Role::SuperAdmin));
        assert!(!can_create_role(Role::Employee, Role::Employee));
    }

    #[test]
    fn test_has_role() {
        let claims = Claims {
            sub: "s".to_string(),
            user_id: "USR001".to_string(),
            name: "n".to_string(),
            role: Role::Admin,
            exp: 2,
            iat: 1,
        };
        assert!(has_role(&claims, Role::Admin));
        assert!(!has_role(&claims, Role::SuperAdmin));
    }
}
