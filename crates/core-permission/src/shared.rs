//! Thread-safe permission set handle
//!
//! A [`PermissionSet`] needs `&mut self` to change, so it cannot be mutated
//! while other threads query it. [`SharedPermissionSet`] puts the set behind
//! an `Arc<RwLock<_>>`: queries take the read lock, mutations the write lock.

use crate::action::Action;
use crate::authorizer::{Authorizer, Decision, Evaluation};
use crate::permission::PermissionSet;
use crate::subject::Target;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Cloneable, thread-safe handle to one permission set
///
/// Every mutation is a single push or remove on one list, so a panic in
/// another thread cannot leave the set half-updated. A poisoned lock is
/// therefore recovered instead of propagated.
#[derive(Debug, Clone, Default)]
pub struct SharedPermissionSet {
    inner: Arc<RwLock<PermissionSet>>,
}

impl SharedPermissionSet {
    /// Wrap a permission set
    #[must_use]
    pub fn new(set: PermissionSet) -> Self {
        Self {
            inner: Arc::new(RwLock::new(set)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, PermissionSet> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, PermissionSet> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`PermissionSet::add_authorization`]
    pub fn add_authorization(&self, action: Action) -> bool {
        self.write().add_authorization(action)
    }

    /// See [`PermissionSet::remove_authorization`]
    pub fn remove_authorization(&self, action: &Action) -> bool {
        self.write().remove_authorization(action)
    }

    /// See [`PermissionSet::add_unauthorization`]
    pub fn add_unauthorization(&self, action: Action) -> bool {
        self.write().add_unauthorization(action)
    }

    /// See [`PermissionSet::remove_unauthorization`]
    pub fn remove_unauthorization(&self, action: &Action) -> bool {
        self.write().remove_unauthorization(action)
    }

    /// See [`PermissionSet::can`]
    #[must_use]
    pub fn can(&self, action: &Action, target: &Target) -> Decision {
        self.read().can(action, target)
    }

    /// See [`PermissionSet::evaluate`]
    #[must_use]
    pub fn evaluate(&self, action: &Action, target: &Target) -> Evaluation {
        self.read().evaluate(action, target)
    }

    /// Clone the current state, e.g. for persistence
    #[must_use]
    pub fn snapshot(&self) -> PermissionSet {
        self.read().clone()
    }

    /// Replace the whole set, returning the previous one
    pub fn replace(&self, set: PermissionSet) -> PermissionSet {
        std::mem::replace(&mut *self.write(), set)
    }
}

impl From<PermissionSet> for SharedPermissionSet {
    fn from(set: PermissionSet) -> Self {
        Self::new(set)
    }
}

impl Authorizer for SharedPermissionSet {
    fn can(&self, action: &Action, target: &Target) -> Decision {
        SharedPermissionSet::can(self, action, target)
    }
}
