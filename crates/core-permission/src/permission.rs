//! Permission sets and their persistence
//!
//! A [`PermissionSet`] holds one principal's authorization state: an ordered
//! list of authorized actions and an ordered list of unauthorized actions.
//!
//! ## Invariants
//!
//! - Neither list contains two actions of the same kind. Adding a second one
//!   is a no-op, so the first registered action keeps its subject scoping.
//! - The lists are private. They can only change through the add/remove
//!   operations, which preserves both the no-duplicate rule and list order.
//!
//! ## Persistence
//!
//! Sets serialize to TOML or JSON with an explicit kind tag per action:
//!
//! ```toml
//! [[authorized]]
//! kind = "update"
//! subjects = [{ type = "Address" }, { type = "Invoice", instance = "2024-001" }]
//!
//! [[unauthorized]]
//! kind = "delete"
//! ```
//!
//! Deserialization is validated (see [`PermissionSet::validate`]). Unknown
//! kinds, blank names, duplicates and oversized lists are rejected instead of
//! being silently downgraded.

use crate::action::{Action, ActionKind};
use crate::authorizer::{Authorizer, Decision, Evaluation, RuleAuthorizer};
use crate::error::{PermissionError, Result};
use crate::subject::Target;
use crate::MAX_RULES_PER_LIST;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, trace};

const AUTHORIZED: &str = "authorized";
const UNAUTHORIZED: &str = "unauthorized";

/// Authorized and unauthorized actions of one principal
///
/// # Example
///
/// ```
/// use core_permission::{Action, Decision, PermissionSet, Target};
///
/// let mut user = PermissionSet::new();
/// user.add_unauthorization(Action::create());
/// user.add_authorization(Action::create());
///
/// // Unauthorization always wins
/// let address = Target::type_of("Address").unwrap();
/// assert_eq!(user.can(&Action::create(), &address), Decision::Deny);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "PermissionSetRaw")]
pub struct PermissionSet {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    authorized: Vec<Action>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    unauthorized: Vec<Action>,
}

/// Raw permission set for deserialization (internal use only)
///
/// Converted to `PermissionSet` via `TryFrom<PermissionSetRaw>`, so every
/// deserialized set is validated.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct PermissionSetRaw {
    #[serde(default)]
    authorized: Vec<Action>,
    #[serde(default)]
    unauthorized: Vec<Action>,
}

impl TryFrom<PermissionSetRaw> for PermissionSet {
    type Error = PermissionError;

    fn try_from(raw: PermissionSetRaw) -> Result<Self> {
        let set = Self {
            authorized: raw.authorized,
            unauthorized: raw.unauthorized,
        };
        set.validate()?;
        Ok(set)
    }
}

impl PermissionSet {
    /// Create an empty permission set
    #[must_use]
    pub const fn new() -> Self {
        Self {
            authorized: Vec::new(),
            unauthorized: Vec::new(),
        }
    }

    // ===== Accessors =====

    /// Authorized actions, in evaluation order
    #[must_use]
    pub fn authorizations(&self) -> &[Action] {
        &self.authorized
    }

    /// Unauthorized actions, in evaluation order
    #[must_use]
    pub fn unauthorizations(&self) -> &[Action] {
        &self.unauthorized
    }

    /// Total number of actions in both lists
    #[must_use]
    pub fn len(&self) -> usize {
        self.authorized.len() + self.unauthorized.len()
    }

    /// Whether both lists are empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.authorized.is_empty() && self.unauthorized.is_empty()
    }

    // ===== Mutators =====

    /// Add an authorized action
    ///
    /// Returns `false` and leaves the set untouched if an action of the same
    /// kind is already authorized.
    pub fn add_authorization(&mut self, action: Action) -> bool {
        insert(&mut self.authorized, action, AUTHORIZED)
    }

    /// Remove the authorized action of the same kind, if any
    pub fn remove_authorization(&mut self, action: &Action) -> bool {
        remove(&mut self.authorized, action, AUTHORIZED)
    }

    /// Add an unauthorized action
    ///
    /// Returns `false` and leaves the set untouched if an action of the same
    /// kind is already unauthorized.
    pub fn add_unauthorization(&mut self, action: Action) -> bool {
        insert(&mut self.unauthorized, action, UNAUTHORIZED)
    }

    /// Remove the unauthorized action of the same kind, if any
    pub fn remove_unauthorization(&mut self, action: &Action) -> bool {
        remove(&mut self.unauthorized, action, UNAUTHORIZED)
    }

    // ===== Resolution =====

    /// Borrow the rule lists as a [`RuleAuthorizer`]
    #[must_use]
    pub fn authorizer(&self) -> RuleAuthorizer<'_> {
        RuleAuthorizer::new(&self.authorized, &self.unauthorized)
    }

    /// Determine whether `action` may be performed against `target`
    ///
    /// Only the kind of `action` is considered; its subjects are ignored.
    #[must_use]
    pub fn can(&self, action: &Action, target: &Target) -> Decision {
        self.evaluate(action, target).decision
    }

    /// Like [`can`](Self::can), also reporting which rule decided
    #[must_use]
    pub fn evaluate(&self, action: &Action, target: &Target) -> Evaluation {
        let evaluation = self.authorizer().evaluate(action, target);
        debug!(
            action = %action.kind(),
            target = %target,
            decision = %evaluation.decision,
            rule = ?evaluation.rule,
            "permission resolved"
        );
        evaluation
    }

    // ===== Validation & persistence =====

    /// Validate the set
    ///
    /// # Errors
    ///
    /// - `TooManyRules` if a list holds more than `MAX_RULES_PER_LIST` actions
    /// - `DuplicateAction` if a list holds two actions of the same kind
    /// - any error from [`Action::validate`]
    pub fn validate(&self) -> Result<()> {
        validate_list(&self.authorized, AUTHORIZED)?;
        validate_list(&self.unauthorized, UNAUTHORIZED)
    }

    /// Load a permission set from a TOML string
    ///
    /// # Errors
    ///
    /// Returns an error if TOML parsing or validation fails
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize the permission set to a TOML string
    ///
    /// # Errors
    ///
    /// Returns `PermissionError::SerializationError` if TOML serialization fails
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| PermissionError::SerializationError(e.to_string()))
    }

    /// Load a permission set from a JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if JSON parsing or validation fails
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the permission set to compact JSON
    ///
    /// # Errors
    ///
    /// Returns `PermissionError::JsonError` if serialization fails
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize the permission set to indented JSON
    ///
    /// # Errors
    ///
    /// Returns `PermissionError::JsonError` if serialization fails
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Authorizer for PermissionSet {
    fn can(&self, action: &Action, target: &Target) -> Decision {
        PermissionSet::can(self, action, target)
    }
}

fn insert(list: &mut Vec<Action>, action: Action, name: &str) -> bool {
    if list.contains(&action) {
        trace!(list = name, kind = %action.kind(), "action already present, ignoring");
        return false;
    }

    list.push(action);
    true
}

fn remove(list: &mut Vec<Action>, action: &Action, name: &str) -> bool {
    match list.iter().position(|existing| existing == action) {
        Some(index) => {
            list.remove(index);
            true
        }
        None => {
            trace!(list = name, kind = %action.kind(), "action not present, ignoring");
            false
        }
    }
}

fn validate_list(list: &[Action], name: &'static str) -> Result<()> {
    if list.len() > MAX_RULES_PER_LIST {
        return Err(PermissionError::TooManyRules {
            max: MAX_RULES_PER_LIST,
            attempted: list.len(),
        });
    }

    let mut seen: HashSet<&ActionKind> = HashSet::with_capacity(list.len());
    for action in list {
        action.validate()?;
        if !seen.insert(action.kind()) {
            return Err(PermissionError::DuplicateAction {
                list: name,
                kind: action.kind().to_string(),
            });
        }
    }

    Ok(())
}
