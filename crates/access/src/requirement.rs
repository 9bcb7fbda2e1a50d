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

//! Access rules attached to routes and gated views

use crate::resolver::PermissionResolver;
use crate::user::User;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome handed back to a navigation guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

impl From<bool> for Decision {
    fn from(allowed: bool) -> Self {
        if allowed { Decision::Allow } else { Decision::Deny }
    }
}

/// What a user must hold to reach a route or see a component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessRequirement {
    Permission(String),
    AnyPermission(Vec<String>),
    AllPermissions(Vec<String>),
    Role(String),
    AnyRole(Vec<String>),
}

impl AccessRequirement {
    pub fn permission(permission: impl AsRef<str>) -> Self {
        AccessRequirement::Permission(permission.as_ref().to_string())
    }

    pub fn any_of<P: AsRef<str>>(permissions: impl IntoIterator<Item = P>) -> Self {
        AccessRequirement::AnyPermission(permissions.into_iter().map(|p| p.as_ref().to_string()).collect())
    }

    pub fn all_of<P: AsRef<str>>(permissions: impl IntoIterator<Item = P>) -> Self {
        AccessRequirement::AllPermissions(permissions.into_iter().map(|p| p.as_ref().to_string()).collect())
    }

    pub fn role(role: impl AsRef<str>) -> Self {
        AccessRequirement::Role(role.as_ref().to_string())
    }

    pub fn any_role<R: AsRef<str>>(roles: impl IntoIterator<Item = R>) -> Self {
        AccessRequirement::AnyRole(roles.into_iter().map(|r| r.as_ref().to_string()).collect())
    }

    pub fn is_satisfied_by(&self, resolver: &PermissionResolver<'_>, user: &User) -> bool {
        match self {
            AccessRequirement::Permission(permission) => resolver.has_permission(user, permission),
            AccessRequirement::AnyPermission(permissions) => resolver.has_any_permission(user, permissions),
            AccessRequirement::AllPermissions(permissions) => resolver.has_all_permissions(user, permissions),
            AccessRequirement::Role(role) => resolver.has_role(user, role),
            AccessRequirement::AnyRole(roles) => resolver.has_any_role(user, roles),
        }
    }

    pub fn evaluate(&self, resolver: &PermissionResolver<'_>, user: &User) -> Decision {
        let decision = Decision::from(self.is_satisfied_by(resolver, user));
        debug!(requirement = ?self, decision = ?decision, "Access requirement evaluated");
        decision
    }
}
