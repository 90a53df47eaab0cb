//! Role / ownership guards
//!
//! Pure functions, no I/O. Consumed by the order and reservation
//! engines and by staff-gated CRUD handlers.

use shared::Role;
use surrealdb::RecordId;

use super::CurrentUser;
use crate::utils::{AppError, AppResult};

/// Pass when the user's role is in the allow-list
pub fn require_role(user: &CurrentUser, allowed: &[Role]) -> AppResult<()> {
    if allowed.contains(&user.role) {
        return Ok(());
    }
    Err(AppError::Forbidden(format!(
        "Role {} may not perform this action",
        user.role
    )))
}

/// Pass when the user owns the resource or holds an allowed role
pub fn require_owner_or_role(
    user: &CurrentUser,
    resource_owner: &RecordId,
    allowed: &[Role],
) -> AppResult<()> {
    if &user.id == resource_owner {
        return Ok(());
    }
    require_role(user, allowed).map_err(|_| {
        AppError::Forbidden("Only the owner or authorized staff may perform this action".into())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_user(key: &str, role: Role) -> CurrentUser {
        CurrentUser {
            id: RecordId::from_table_key("user", key),
            name: format!("user-{key}"),
            role,
        }
    }

    #[test]
    fn test_require_role_matrix() {
        let staff = [Role::Admin, Role::Manager];
        assert!(require_role(&make_user("a", Role::Admin), &staff).is_ok());
        assert!(require_role(&make_user("m", Role::Manager), &staff).is_ok());
        assert!(require_role(&make_user("c", Role::Customer), &staff).is_err());
    }

    #[test]
    fn test_owner_may_act() {
        let owner = make_user("alice", Role::Customer);
        let resource = RecordId::from_table_key("user", "alice");
        assert!(require_owner_or_role(&owner, &resource, &[Role::Admin, Role::Manager]).is_ok());
    }

    #[test]
    fn test_other_customer_forbidden() {
        let intruder = make_user("bob", Role::Customer);
        let resource = RecordId::from_table_key("user", "alice");
        let err = require_owner_or_role(&intruder, &resource, &[Role::Admin, Role::Manager]);
        assert!(matches!(err, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_staff_may_act_on_others() {
        let resource = RecordId::from_table_key("user", "alice");
        for role in [Role::Admin, Role::Manager] {
            let staff = make_user("staff", role);
            assert!(require_owner_or_role(&staff, &resource, &[Role::Admin, Role::Manager]).is_ok());
        }
    }
}
