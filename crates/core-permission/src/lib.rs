// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 P47H Team <https://p47h.com>

//! # core-permission
//!
//! In-process permission model with tri-state resolution.
//!
//! A [`PermissionSet`] holds one principal's authorized and unauthorized
//! [`Action`]s. Each action may be scoped to subjects: a whole type, or one
//! specific instance of a type. Queries answer with a [`Decision`]:
//!
//! - [`Decision::Deny`] as soon as a matching unauthorization exists
//! - [`Decision::Allow`] when a matching authorization exists
//! - [`Decision::Deny`] when rules of the requested kind exist but none applies
//! - [`Decision::Undetermined`] when no rule of the requested kind exists at all
//!
//! ```
//! use core_permission::{Action, Decision, PermissionSet, Target};
//!
//! let address = Target::type_of("Address").unwrap();
//!
//! let mut user = PermissionSet::new();
//! user.add_authorization(Action::update().with_subject(address.clone()));
//!
//! assert_eq!(user.can(&Action::update(), &address), Decision::Allow);
//! assert_eq!(user.can(&Action::delete(), &address), Decision::Undetermined);
//! ```
//!
//! ## Security
//!
//! Persisted permission sets are untrusted input. Deserialization validates
//! every invariant and enforces size limits:
//! - MAX_RULES_PER_LIST = 1024
//! - MAX_SUBJECTS_PER_ACTION = 256
//! - MAX_TYPE_NAME_LENGTH = 256
//! - MAX_INSTANCE_KEY_LENGTH = 256

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod action;
pub mod authorizer;
pub mod builder;
pub mod error;
pub mod permission;
pub mod shared;
pub mod subject;

pub use action::{Action, ActionKind};
pub use authorizer::{Authorizer, Decision, Evaluation, Rule, RuleAuthorizer};
pub use builder::PermissionSetBuilder;
/// Re-export commonly used types
pub use error::{PermissionError, Result};
pub use permission::PermissionSet;
pub use shared::SharedPermissionSet;
pub use subject::{Identified, InstanceKey, Subject, SubjectRef, Target, TypeName};

/// Maximum number of actions in one authorized or unauthorized list
pub const MAX_RULES_PER_LIST: usize = 1024;

/// Maximum number of subject references attached to one action
pub const MAX_SUBJECTS_PER_ACTION: usize = 256;

/// Maximum length of a subject type name
pub const MAX_TYPE_NAME_LENGTH: usize = 256;

/// Maximum length of an instance key
pub const MAX_INSTANCE_KEY_LENGTH: usize = 256;
