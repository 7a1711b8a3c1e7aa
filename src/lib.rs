// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 P47H Team <https://p47h.com>

//! # authorize
//!
//! In-process, tri-state permission model.
//!
//! A principal holds a [`PermissionSet`]: an ordered list of authorizations
//! and an ordered list of unauthorizations. Each rule is an [`Action`]
//! optionally scoped to subjects, either a whole type or one instance of it.
//! Queries resolve to [`Decision::Allow`], [`Decision::Deny`] or
//! [`Decision::Undetermined`], with unauthorizations always consulted first.
//!
//! ## Quick Start
//!
//! ```rust
//! use authorize::{Action, Decision, PermissionSet, Target};
//!
//! let mut user = PermissionSet::new();
//! user.add_authorization(Action::manage());
//! user.add_unauthorization(Action::delete());
//!
//! let invoice = Target::instance("Invoice", "42").unwrap();
//! assert_eq!(user.can(&Action::read(), &invoice), Decision::Allow);
//! assert_eq!(user.can(&Action::delete(), &invoice), Decision::Deny);
//! ```
//!
//! ## Architecture
//!
//! - [`permission`] - the permission model (from `core-permission`)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Permission model module.
///
/// Re-exports `core_permission`: subjects, actions, permission sets and
/// their persistence.
pub mod permission {
    pub use core_permission::*;
}

// Convenience re-exports at root level
pub use core_permission::{
    Action, ActionKind, Authorizer, Decision, PermissionError, PermissionSet,
    PermissionSetBuilder, SharedPermissionSet, Target,
};
