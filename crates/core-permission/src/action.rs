//! Actions and action kinds
//!
//! An [`Action`] is a verb ([`ActionKind`]) plus zero or more subject
//! references. Actions are compared by kind only: two `Update` actions are
//! the same entry of a permission set no matter which subjects they carry.

use crate::error::{PermissionError, Result};
use crate::subject::{SubjectRef, Target};
use crate::MAX_SUBJECTS_PER_ACTION;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Prefix used by the textual form of custom kinds (`custom:approve`)
const CUSTOM_PREFIX: &str = "custom:";

/// Semantic class of an action
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Create access
    Create,
    /// Read access
    Read,
    /// Update access
    Update,
    /// Delete access
    Delete,
    /// Share access
    Share,
    /// Every action. Type-compatible with all other kinds
    Manage,
    /// Application-defined action
    Custom(String),
}

impl ActionKind {
    /// Name of the kind as used in textual forms
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Share => "share",
            Self::Manage => "manage",
            Self::Custom(name) => name,
        }
    }

    /// Check that the kind is well formed
    ///
    /// # Errors
    ///
    /// Returns `PermissionError::InvalidAction` for a custom kind with a blank name
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Custom(name) if name.trim().is_empty() => Err(PermissionError::InvalidAction(
                "custom action name cannot be empty".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// Parses a built-in kind name or `custom:<name>`
///
/// Built-in names and the `custom:` prefix are case-insensitive; the custom
/// name itself keeps its case.
impl FromStr for ActionKind {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self> {
        let prefix_len = CUSTOM_PREFIX.len();
        let has_prefix = s
            .get(..prefix_len)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(CUSTOM_PREFIX));
        if has_prefix {
            let kind = Self::Custom(s[prefix_len..].to_string());
            kind.validate()?;
            return Ok(kind);
        }

        match s.to_ascii_lowercase().as_str() {
            "create" => Ok(Self::Create),
            "read" => Ok(Self::Read),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            "share" => Ok(Self::Share),
            "manage" => Ok(Self::Manage),
            _ => Err(PermissionError::UnknownAction(s.to_string())),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(name) => write!(f, "{CUSTOM_PREFIX}{name}"),
            builtin => f.write_str(builtin.name()),
        }
    }
}

/// A verb scoped to zero or more subjects
///
/// An action without subjects applies to every target. Equality and hashing
/// only consider the [`ActionKind`].
///
/// # Example
///
/// ```
/// use core_permission::{Action, Target};
///
/// let address = Target::type_of("Address").unwrap();
/// let invoice = Target::instance("Invoice", "2024-001").unwrap();
///
/// let read = Action::read()
///     .with_subject(address.clone())
///     .with_subject(invoice.clone());
///
/// assert!(read.applies_to(&address));
/// assert!(read.applies_to(&invoice));
/// assert!(!read.applies_to(&Target::instance("Invoice", "2024-002").unwrap()));
/// assert_eq!(read, Action::read());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ActionRaw")]
pub struct Action {
    kind: ActionKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    subjects: Vec<SubjectRef>,
}

/// Raw action for deserialization, validated through `TryFrom<ActionRaw>`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ActionRaw {
    kind: ActionKind,
    #[serde(default)]
    subjects: Vec<SubjectRef>,
}

impl TryFrom<ActionRaw> for Action {
    type Error = PermissionError;

    fn try_from(raw: ActionRaw) -> Result<Self> {
        let action = Self {
            kind: raw.kind,
            subjects: raw.subjects,
        };
        action.validate()?;
        Ok(action)
    }
}

impl Action {
    /// Create an action of the given kind that applies to every target
    #[must_use]
    pub const fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            subjects: Vec::new(),
        }
    }

    /// Create an action of the given kind scoped to one subject
    #[must_use]
    pub fn on(kind: ActionKind, target: Target) -> Self {
        Self::new(kind).with_subject(target)
    }

    /// Create a Create action
    #[must_use]
    pub const fn create() -> Self {
        Self::new(ActionKind::Create)
    }

    /// Create a Read action
    #[must_use]
    pub const fn read() -> Self {
        Self::new(ActionKind::Read)
    }

    /// Create an Update action
    #[must_use]
    pub const fn update() -> Self {
        Self::new(ActionKind::Update)
    }

    /// Create a Delete action
    #[must_use]
    pub const fn delete() -> Self {
        Self::new(ActionKind::Delete)
    }

    /// Create a Share action
    #[must_use]
    pub const fn share() -> Self {
        Self::new(ActionKind::Share)
    }

    /// Create a Manage action (covers every kind)
    #[must_use]
    pub const fn manage() -> Self {
        Self::new(ActionKind::Manage)
    }

    /// Create a custom action
    #[must_use]
    pub fn custom(name: impl Into<String>) -> Self {
        Self::new(ActionKind::Custom(name.into()))
    }

    /// Kind of this action
    #[must_use]
    pub const fn kind(&self) -> &ActionKind {
        &self.kind
    }

    /// Subjects this action is scoped to; empty means every target
    #[must_use]
    pub fn subjects(&self) -> &[SubjectRef] {
        &self.subjects
    }

    /// Scope this action to one more subject
    pub fn add_subject(&mut self, target: Target) {
        self.subjects.push(SubjectRef::from(target));
    }

    /// Builder-style [`add_subject`](Self::add_subject)
    #[must_use]
    pub fn with_subject(mut self, target: Target) -> Self {
        self.add_subject(target);
        self
    }

    /// Check if this action is of the same type as `other`
    ///
    /// `Manage` is a type of every action; the relation is not symmetric:
    /// `manage().is_type_of(&read())` holds, `read().is_type_of(&manage())`
    /// does not.
    #[must_use]
    pub fn is_type_of(&self, other: &Self) -> bool {
        match self.kind {
            ActionKind::Manage => true,
            _ => self.kind == other.kind,
        }
    }

    /// Check if this action applies to the target
    #[must_use]
    pub fn applies_to(&self, target: &Target) -> bool {
        self.subjects.is_empty() || self.subjects.iter().any(|s| s.applies_to(target))
    }

    /// Validate the action
    ///
    /// # Errors
    ///
    /// - `InvalidAction` for a custom kind with a blank name
    /// - `TooManySubjects` if more than `MAX_SUBJECTS_PER_ACTION` subjects are attached
    pub fn validate(&self) -> Result<()> {
        self.kind.validate()?;

        if self.subjects.len() > MAX_SUBJECTS_PER_ACTION {
            return Err(PermissionError::TooManySubjects {
                max: MAX_SUBJECTS_PER_ACTION,
                attempted: self.subjects.len(),
            });
        }

        Ok(())
    }
}

impl From<ActionKind> for Action {
    fn from(kind: ActionKind) -> Self {
        Self::new(kind)
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for Action {}

impl Hash for Action {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.subjects.is_empty() {
            let subjects: Vec<String> = self.subjects.iter().map(ToString::to_string).collect();
            write!(f, " on [{}]", subjects.join(", "))?;
        }
        Ok(())
    }
}
