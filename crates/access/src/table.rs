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

//! Static role to permission mapping

use crate::roles::{Permission, Role};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

static BUILTIN: LazyLock<RolePermissionMap> = LazyLock::new(|| {
    use Permission::*;

    RolePermissionMap::new()
        .with_role(Role::Admin, Permission::ALL)
        .with_role(Role::Employee, [AccessDashboard, ViewDispatch, ManageDispatch, ViewTickets, ManageTickets, ViewBilling, ViewReports])
        .with_role(Role::Customer, [AccessDashboard, ViewTickets, ViewBilling])
        .with_role(Role::Partner, [AccessDashboard, ViewDispatch, ViewTickets, ViewReports])
});

/// Permissions granted by each role
///
/// Built once at startup and only read afterwards. Roles missing from the
/// map grant nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RolePermissionMap {
    grants: BTreeMap<Role, BTreeSet<Permission>>,
}

impl RolePermissionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table shipped with the console
    pub fn builtin() -> &'static RolePermissionMap {
        &BUILTIN
    }

    /// Add permissions for a role, merging with any already granted
    pub fn with_role(mut self, role: Role, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.grants.entry(role).or_default().extend(permissions);
        self
    }

    pub fn permissions_for(&self, role: Role) -> Option<&BTreeSet<Permission>> {
        self.grants.get(&role)
    }

    pub fn grants(&self, role: Role, permission: Permission) -> bool {
        self.permissions_for(role).is_some_and(|permissions| permissions.contains(&permission))
    }

    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.grants.keys().copied()
    }
}

impl FromIterator<(Role, Vec<Permission>)> for RolePermissionMap {
    fn from_iter<I: IntoIterator<Item = (Role, Vec<Permission>)>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), |map, (role, permissions)| map.with_role(role, permissions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_admin_has_everything() {
        let table = RolePermissionMap::builtin();

        assert!(Permission::ALL.iter().all(|permission| table.grants(Role::Admin, *permission)));
        assert!(table.grants(Role::Customer, Permission::ViewBilling));
        assert!(!table.grants(Role::Customer, Permission::ManageBilling));
        assert_eq!(table.roles().count(), Role::ALL.len());
    }

    #[test]
    fn test_with_role_merges() {
        let table = RolePermissionMap::new()
            .with_role(Role::Partner, [Permission::ViewReports])
            .with_role(Role::Partner, [Permission::ViewReports, Permission::ViewTickets]);

        assert_eq!(table.permissions_for(Role::Partner).unwrap().len(), 2);
        assert!(table.permissions_for(Role::Admin).is_none());
    }

    #[test]
    fn test_table_from_json() {
        let table: RolePermissionMap = serde_json::from_str(r#"{"admin": ["access dashboard", "manage users"], "employee": ["access dashboard"]}"#).unwrap();

        assert!(table.grants(Role::Admin, Permission::ManageUsers));
        assert!(!table.grants(Role::Employee, Permission::ManageUsers));
    }
}
