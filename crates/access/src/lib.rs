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

//! Role-based access resolution for the operations console
//!
//! This crate answers "can this user do X" for navigation guards and gated
//! views:
//! - A static role to permission table ([`RolePermissionMap`])
//! - Multi-role union resolution with fail-closed defaults ([`PermissionResolver`])
//! - Route and component rules ([`AccessRequirement`])
//! - An explicit login/logout context over host storage ([`Session`])
//!
//! # Usage
//!
//! ```rust
//! use fieldops_access::{Permission, PermissionResolver, User};
//!
//! let resolver = PermissionResolver::default();
//! let user: User = serde_json::from_str(r#"{"roles": ["customer", {"name": "partner"}]}"#).unwrap();
//!
//! assert!(resolver.has_permission(&user, Permission::ViewReports));
//! assert!(!resolver.has_permission(&user, "manage users"));
//! ```

pub mod error;
pub mod requirement;
pub mod resolver;
pub mod roles;
pub mod session;
pub mod table;
pub mod user;

pub use error::{AccessError, AccessResult};
pub use requirement::{AccessRequirement, Decision};
pub use resolver::PermissionResolver;
pub use roles::{Permission, Role};
pub use session::{CACHED_PERMISSIONS_KEY, CURRENT_USER_KEY, MemoryStore, Session, SessionStore};
pub use table::RolePermissionMap;
pub use user::{RoleRef, User};
