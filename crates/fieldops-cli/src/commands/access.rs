// FieldOps
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use super::read_input;
use crate::config::FieldOpsConfig;
use anyhow::{Context, Result};
use fieldops_access::{AccessRequirement, Decision, Permission, PermissionResolver, User};
use std::path::Path;
use tracing::{debug, info};

pub fn load_user(path: &Path) -> Result<User> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).context("user snapshot must be a JSON object")
}

/// Normalized roles and effective permissions for a user
pub fn describe_user(config: &FieldOpsConfig, user: &User) -> (Vec<String>, Vec<Permission>) {
    let resolver = PermissionResolver::new(config.role_table());
    (resolver.get_user_roles(user), resolver.get_effective_permissions(user))
}

pub fn handle_roles(config: &FieldOpsConfig, user_path: &Path) -> Result<()> {
    let user = load_user(user_path)?;
    let (roles, permissions) = describe_user(config, &user);
    debug!(roles = roles.len(), permissions = permissions.len(), "User resolved");

    if roles.is_empty() {
        println!("Roles: (none)");
    } else {
        println!("Roles: {}", roles.join(", "));
    }

    println!("Permissions:");
    for permission in &permissions {
        println!("  {permission}");
    }
    Ok(())
}

pub fn check_user(config: &FieldOpsConfig, user: &User, requirement: &AccessRequirement) -> Decision {
    let resolver = PermissionResolver::new(config.role_table());
    requirement.evaluate(&resolver, user)
}

pub fn handle_check(config: &FieldOpsConfig, user_path: &Path, requirement: &AccessRequirement) -> Result<Decision> {
    let user = load_user(user_path)?;
    let decision = check_user(config, &user, requirement);
    info!(requirement = ?requirement, allowed = decision.is_allowed(), "Access checked");

    println!("{}", if decision.is_allowed() { "allow" } else { "deny" });
    Ok(decision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldops_access::{Role, RolePermissionMap};

    #[test]
    fn test_describe_user() {
        let user: User = serde_json::from_str(r#"{"role": "partner", "roles": ["customer"]}"#).unwrap();
        let (roles, permissions) = describe_user(&FieldOpsConfig::default(), &user);

        assert_eq!(roles, vec!["customer", "partner"]);
        assert!(permissions.contains(&Permission::ViewBilling));
        assert!(permissions.contains(&Permission::ViewReports));
        assert!(!permissions.contains(&Permission::ManageUsers));
    }

    #[test]
    fn test_check_with_override_table() {
        let config = FieldOpsConfig {
            roles: Some(RolePermissionMap::new().with_role(Role::Customer, [Permission::ViewFinance])),
            ..FieldOpsConfig::default()
        };
        let user = User::with_role("customer");

        assert_eq!(check_user(&config, &user, &AccessRequirement::permission(Permission::ViewFinance)), Decision::Allow);
        assert_eq!(check_user(&config, &user, &AccessRequirement::permission(Permission::ViewBilling)), Decision::Deny);
    }

    #[test]
    fn test_check_denies_signed_out() {
        let requirement = AccessRequirement::any_role(["admin", "employee", "customer", "partner"]);

        assert_eq!(check_user(&FieldOpsConfig::default(), &User::default(), &requirement), Decision::Deny);
    }
}
