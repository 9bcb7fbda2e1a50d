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

//! Role and permission vocabularies

use crate::error::AccessError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles a console user can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Employee,
    Customer,
    Partner,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Employee, Role::Customer, Role::Partner];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Employee => "employee",
            Role::Customer => "customer",
            Role::Partner => "partner",
        }
    }
}

impl AsRef<str> for Role {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL.into_iter().find(|role| role.as_str() == s).ok_or_else(|| AccessError::UnknownRole(s.to_string()))
    }
}

/// Actions gated in the console, keyed by their display token
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Permission {
    #[serde(rename = "access dashboard")]
    AccessDashboard,
    #[serde(rename = "manage users")]
    ManageUsers,
    #[serde(rename = "manage roles")]
    ManageRoles,
    #[serde(rename = "view dispatch")]
    ViewDispatch,
    #[serde(rename = "manage dispatch")]
    ManageDispatch,
    #[serde(rename = "view tickets")]
    ViewTickets,
    #[serde(rename = "manage tickets")]
    ManageTickets,
    #[serde(rename = "view billing")]
    ViewBilling,
    #[serde(rename = "manage billing")]
    ManageBilling,
    #[serde(rename = "view finance")]
    ViewFinance,
    #[serde(rename = "manage finance")]
    ManageFinance,
    #[serde(rename = "view reports")]
    ViewReports,
    #[serde(rename = "manage settings")]
    ManageSettings,
}

impl Permission {
    pub const ALL: [Permission; 13] = [
        Permission::AccessDashboard,
        Permission::ManageUsers,
        Permission::ManageRoles,
        Permission::ViewDispatch,
        Permission::ManageDispatch,
        Permission::ViewTickets,
        Permission::ManageTickets,
        Permission::ViewBilling,
        Permission::ManageBilling,
        Permission::ViewFinance,
        Permission::ManageFinance,
        Permission::ViewReports,
        Permission::ManageSettings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::AccessDashboard => "access dashboard",
            Permission::ManageUsers => "manage users",
            Permission::ManageRoles => "manage roles",
            Permission::ViewDispatch => "view dispatch",
            Permission::ManageDispatch => "manage dispatch",
            Permission::ViewTickets => "view tickets",
            Permission::ManageTickets => "manage tickets",
            Permission::ViewBilling => "view billing",
            Permission::ManageBilling => "manage billing",
            Permission::ViewFinance => "view finance",
            Permission::ManageFinance => "manage finance",
            Permission::ViewReports => "view reports",
            Permission::ManageSettings => "manage settings",
        }
    }
}

impl AsRef<str> for Permission {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|permission| permission.as_str() == s)
            .ok_or_else(|| AccessError::UnknownPermission(s.to_string()))
    }
}
