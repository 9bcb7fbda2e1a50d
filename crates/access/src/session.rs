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

//! Signed-in user context
//!
//! A [`Session`] is created at login and torn down at logout. The user
//! snapshot and its permission list are persisted through a [`SessionStore`]
//! so a reload can pick the session back up. The stored permission list is
//! only a cache: it is always recomputed from the roles on restore.

use crate::error::{AccessError, AccessResult};
use crate::requirement::AccessRequirement;
use crate::resolver::PermissionResolver;
use crate::roles::Permission;
use crate::user::{RoleRef, User};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const CURRENT_USER_KEY: &str = "current_user";
pub const CACHED_PERMISSIONS_KEY: &str = "cached_permissions";

/// Durable key-value storage owned by the host application
pub trait SessionStore: Send + Sync {
    fn load(&self, key: &str) -> AccessResult<Option<String>>;

    fn save(&self, key: &str, value: String) -> AccessResult<()>;

    fn remove(&self, key: &str) -> AccessResult<()>;
}

/// In-process store, used by tools and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self, key: &str) -> AccessResult<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn save(&self, key: &str, value: String) -> AccessResult<()> {
        self.entries.write().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> AccessResult<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}

pub struct Session<'t> {
    store: Arc<dyn SessionStore>,
    resolver: PermissionResolver<'t>,
    user: Option<User>,
    permissions: Vec<Permission>,
}

impl<'t> Session<'t> {
    /// Signed-out session over a store
    pub fn new(store: Arc<dyn SessionStore>, resolver: PermissionResolver<'t>) -> Self {
        Self {
            store,
            resolver,
            user: None,
            permissions: Vec::new(),
        }
    }

    /// Pick up a previously persisted session, if any
    pub fn restore(store: Arc<dyn SessionStore>, resolver: PermissionResolver<'t>) -> AccessResult<Self> {
        let mut session = Self::new(store, resolver);

        let Some(raw_user) = session.store.load(CURRENT_USER_KEY)? else {
            debug!("No persisted session");
            return Ok(session);
        };

        let user: User = serde_json::from_str(&raw_user)?;
        let cached: Option<Vec<String>> = match session.store.load(CACHED_PERMISSIONS_KEY)? {
            Some(raw) => serde_json::from_str(&raw).ok(),
            None => None,
        };

        session.permissions = session.resolver.get_effective_permissions(&user);
        let fresh = permission_names(&session.permissions);
        let stale = cached.as_ref() != Some(&fresh) || user.permissions != fresh;

        session.user = Some(user);
        if stale {
            debug!(roles = ?session.resolver.get_user_roles(session.current()?), "Cached permissions out of date, rewriting");
            session.persist()?;
        }

        info!(roles = ?session.resolver.get_user_roles(session.current()?), "Session restored");
        Ok(session)
    }

    pub fn login(&mut self, user: User) -> AccessResult<&[Permission]> {
        self.permissions = self.resolver.get_effective_permissions(&user);
        self.user = Some(user);
        if let Err(err) = self.persist() {
            self.user = None;
            self.permissions.clear();
            self.clear_store();
            return Err(err);
        }

        info!(roles = ?self.resolver.get_user_roles(self.current()?), permissions = self.permissions.len(), "User logged in");
        Ok(&self.permissions)
    }

    /// Recompute the permission cache for the current user
    pub fn refresh(&mut self) -> AccessResult<&[Permission]> {
        let permissions = self.resolver.get_effective_permissions(self.current()?);
        self.permissions = permissions;
        self.persist()?;
        Ok(&self.permissions)
    }

    /// Replace the user's role assignment after a role change
    pub fn change_roles<R: Into<RoleRef>>(&mut self, roles: impl IntoIterator<Item = R>) -> AccessResult<&[Permission]> {
        let user = self.user.as_mut().ok_or(AccessError::NoActiveSession)?;
        user.roles = roles.into_iter().map(Into::into).collect();
        user.role = None;

        info!(roles = ?user.role_names(), "Roles changed");
        self.refresh()
    }

    /// End the session; in-memory state is cleared even if the store fails
    pub fn logout(&mut self) -> AccessResult<()> {
        if self.user.take().is_some() {
            info!("User logged out");
        }
        self.permissions.clear();

        let user_removed = self.store.remove(CURRENT_USER_KEY);
        let cache_removed = self.store.remove(CACHED_PERMISSIONS_KEY);
        user_removed.and(cache_removed)
    }

    /// `current_user` is written last so a restore never sees a half-written login
    fn persist(&mut self) -> AccessResult<()> {
        let names = permission_names(&self.permissions);
        let user = self.user.as_mut().ok_or(AccessError::NoActiveSession)?;
        user.permissions = names.clone();
        let raw_user = serde_json::to_string(user)?;

        self.store.save(CACHED_PERMISSIONS_KEY, serde_json::to_string(&names)?)?;
        self.store.save(CURRENT_USER_KEY, raw_user)?;
        Ok(())
    }

    fn clear_store(&self) {
        for key in [CURRENT_USER_KEY, CACHED_PERMISSIONS_KEY] {
            if let Err(err) = self.store.remove(key) {
                warn!(key, error = %err, "Failed to clear session entry");
            }
        }
    }

    fn current(&self) -> AccessResult<&User> {
        self.user.as_ref().ok_or(AccessError::NoActiveSession)
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    pub fn has_permission(&self, permission: impl AsRef<str>) -> bool {
        let permission = permission.as_ref();
        self.permissions.iter().any(|held| held.as_str() == permission)
    }

    pub fn has_role(&self, role: impl AsRef<str>) -> bool {
        self.user.as_ref().is_some_and(|user| self.resolver.has_role(user, role))
    }

    pub fn allows(&self, requirement: &AccessRequirement) -> bool {
        self.user.as_ref().is_some_and(|user| requirement.evaluate(&self.resolver, user).is_allowed())
    }
}

fn permission_names(permissions: &[Permission]) -> Vec<String> {
    permissions.iter().map(|permission| permission.as_str().to_string()).collect()
}
