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

//! User snapshot as persisted by the session layer

use crate::roles::Role;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Role assignment, stored either as a bare name or as an object with a `name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleRef {
    Name(String),
    Object { name: String },
}

impl RoleRef {
    pub fn name(&self) -> &str {
        match self {
            RoleRef::Name(name) | RoleRef::Object { name } => name,
        }
    }
}

impl From<&str> for RoleRef {
    fn from(name: &str) -> Self {
        RoleRef::Name(name.to_string())
    }
}

impl From<String> for RoleRef {
    fn from(name: String) -> Self {
        RoleRef::Name(name)
    }
}

impl From<Role> for RoleRef {
    fn from(role: Role) -> Self {
        RoleRef::Name(role.as_str().to_string())
    }
}

/// The part of a signed-in user that access checks read
///
/// Any other profile fields are kept in `profile` so the snapshot survives a
/// store round trip unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<RoleRef>,

    /// Denormalized permission names cached at login
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,

    #[serde(flatten)]
    pub profile: BTreeMap<String, Value>,
}

impl User {
    pub fn with_role(role: impl Into<String>) -> Self {
        Self {
            role: Some(role.into()),
            ..Self::default()
        }
    }

    pub fn with_roles<R: Into<RoleRef>>(roles: impl IntoIterator<Item = R>) -> Self {
        Self {
            roles: roles.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Role names from `roles` followed by `role`, without blanks or repeats
    pub fn role_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();

        for name in self.roles.iter().map(RoleRef::name).chain(self.role.as_deref()) {
            if !name.is_empty() && !names.iter().any(|seen| seen == name) {
                names.push(name.to_string());
            }
        }

        names
    }
}
