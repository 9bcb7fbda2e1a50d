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

//! Permission and role queries over a user snapshot
//!
//! Every query is a pure read of the role table and the user. Missing or
//! unknown roles contribute nothing, so an underspecified user is denied
//! everything rather than causing an error. These answers drive navigation
//! and visibility only; the backend remains the enforcement point.

use crate::roles::{Permission, Role};
use crate::table::RolePermissionMap;
use crate::user::User;
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct PermissionResolver<'t> {
    table: &'t RolePermissionMap,
}

impl Default for PermissionResolver<'static> {
    fn default() -> Self {
        Self::new(RolePermissionMap::builtin())
    }
}

impl<'t> PermissionResolver<'t> {
    pub fn new(table: &'t RolePermissionMap) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'t RolePermissionMap {
        self.table
    }

    /// Normalized role names held by the user
    pub fn get_user_roles(&self, user: &User) -> Vec<String> {
        user.role_names()
    }

    fn effective_set(&self, user: &User) -> BTreeSet<Permission> {
        let mut effective = BTreeSet::new();

        for name in user.role_names() {
            let Ok(role) = name.parse::<Role>() else {
                debug!(role = %name, "Ignoring unknown role");
                continue;
            };

            if let Some(granted) = self.table.permissions_for(role) {
                effective.extend(granted.iter().copied());
            }
        }

        effective
    }

    /// Union of the permissions granted by every role the user holds
    pub fn get_effective_permissions(&self, user: &User) -> Vec<Permission> {
        self.effective_set(user).into_iter().collect()
    }

    /// Permissions of the first role only
    #[deprecated(note = "multi-role users get a narrower set here; use get_effective_permissions")]
    pub fn get_user_permissions(&self, user: &User) -> Vec<Permission> {
        user.role_names()
            .first()
            .and_then(|name| name.parse::<Role>().ok())
            .and_then(|role| self.table.permissions_for(role))
            .map(|granted| granted.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn has_permission(&self, user: &User, permission: impl AsRef<str>) -> bool {
        let permission = permission.as_ref();
        self.effective_set(user).iter().any(|held| held.as_str() == permission)
    }

    pub fn has_any_permission<P: AsRef<str>>(&self, user: &User, permissions: &[P]) -> bool {
        let effective = self.effective_set(user);
        permissions.iter().any(|wanted| effective.iter().any(|held| held.as_str() == wanted.as_ref()))
    }

    /// All listed permissions are held; an empty list is denied
    pub fn has_all_permissions<P: AsRef<str>>(&self, user: &User, permissions: &[P]) -> bool {
        if permissions.is_empty() {
            return false;
        }

        let effective = self.effective_set(user);
        permissions.iter().all(|wanted| effective.iter().any(|held| held.as_str() == wanted.as_ref()))
    }

    pub fn has_role(&self, user: &User, role: impl AsRef<str>) -> bool {
        let role = role.as_ref();
        user.role_names().iter().any(|held| held == role)
    }

    pub fn has_any_role<R: AsRef<str>>(&self, user: &User, roles: &[R]) -> bool {
        let held = user.role_names();
        roles.iter().any(|wanted| held.iter().any(|name| name == wanted.as_ref()))
    }
}
