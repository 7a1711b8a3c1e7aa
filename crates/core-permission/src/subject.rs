//! # Subjects
//!
//! Subjects are the targets actions are evaluated against. A subject is either
//! a whole type ("any `Address`") or one specific instance of a type ("the
//! `Address` with key `42`").
//!
//! - [`Target`]: what a query is asked about
//! - [`SubjectRef`]: what an [`Action`](crate::Action) stores to scope itself
//!
//! Instance identity is always supplied by the caller through [`InstanceKey`]
//! (a primary key, a UUID, ...). Two distinct instances with equal field values
//! stay distinguishable as long as their keys differ.
//!
//! ## Matching
//!
//! | stored reference | candidate target | matches when |
//! |---|---|---|
//! | type `T` | type `U` | `T == U` |
//! | type `T` | instance of `U` | `T == U` |
//! | instance `(T, k)` | type `U` | never |
//! | instance `(T, k)` | instance `(U, j)` | `T == U && k == j` |

use crate::error::{PermissionError, Result};
use crate::{MAX_INSTANCE_KEY_LENGTH, MAX_TYPE_NAME_LENGTH};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Separator between type name and instance key in the textual target form
const INSTANCE_SEPARATOR: char = '#';

/// A Rust type that can be the subject of an action
///
/// # Example
///
/// ```
/// use core_permission::{Identified, Subject, Target};
///
/// struct Address {
///     id: u64,
/// }
///
/// impl Subject for Address {
///     const TYPE_NAME: &'static str = "Address";
/// }
///
/// impl Identified for Address {
///     fn instance_key(&self) -> String {
///         self.id.to_string()
///     }
/// }
///
/// let home = Address { id: 7 };
/// assert_eq!(Target::of::<Address>().unwrap().to_string(), "Address");
/// assert_eq!(Target::instance_of(&home).unwrap().to_string(), "Address#7");
/// ```
pub trait Subject {
    /// Stable, persistable identifier of the type
    const TYPE_NAME: &'static str;
}

/// A subject whose instances carry a stable, caller-supplied identity
pub trait Identified: Subject {
    /// Identity token for this instance
    ///
    /// Must stay the same for the lifetime of every rule that references the
    /// instance, and must differ between distinct instances.
    fn instance_key(&self) -> String;
}

/// Validated subject type identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeName(String);

impl TypeName {
    /// Create a type name
    ///
    /// # Errors
    ///
    /// Returns `PermissionError::InvalidTarget` if the name is blank or longer
    /// than `MAX_TYPE_NAME_LENGTH`
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_token("type name", &name, MAX_TYPE_NAME_LENGTH)?;
        Ok(Self(name))
    }

    /// Borrow the name
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TypeName {
    type Error = PermissionError;

    fn try_from(name: String) -> Result<Self> {
        Self::new(name)
    }
}

impl From<TypeName> for String {
    fn from(name: TypeName) -> Self {
        name.0
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated, caller-supplied instance identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InstanceKey(String);

impl InstanceKey {
    /// Create an instance key
    ///
    /// # Errors
    ///
    /// Returns `PermissionError::InvalidTarget` if the key is blank or longer
    /// than `MAX_INSTANCE_KEY_LENGTH`
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        validate_token("instance key", &key, MAX_INSTANCE_KEY_LENGTH)?;
        Ok(Self(key))
    }

    /// Borrow the key
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for InstanceKey {
    type Error = PermissionError;

    fn try_from(key: String) -> Result<Self> {
        Self::new(key)
    }
}

impl From<InstanceKey> for String {
    fn from(key: InstanceKey) -> Self {
        key.0
    }
}

impl fmt::Display for InstanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn validate_token(what: &str, value: &str, max: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PermissionError::InvalidTarget(format!(
            "{what} cannot be empty"
        )));
    }

    // " Address" would never match "Address"
    if value.trim() != value {
        return Err(PermissionError::InvalidTarget(format!(
            "{what} cannot have leading or trailing whitespace"
        )));
    }

    if value.len() > max {
        return Err(PermissionError::InvalidTarget(format!(
            "{what} exceeds maximum {max} characters (length: {})",
            value.len()
        )));
    }

    Ok(())
}

/// The target of a permission query: a type, or one instance of a type
///
/// Targets can only be built through validating constructors, so a malformed
/// or absent target is rejected before it reaches any matching logic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// The type as a whole
    Type(TypeName),
    /// One specific instance of a type
    Instance {
        /// Runtime type of the instance
        type_name: TypeName,
        /// Identity of the instance
        key: InstanceKey,
    },
}

impl Target {
    /// Target a whole type by name
    ///
    /// # Errors
    ///
    /// Returns `PermissionError::InvalidTarget` if the name is invalid
    pub fn type_of(type_name: impl Into<String>) -> Result<Self> {
        Ok(Self::Type(TypeName::new(type_name)?))
    }

    /// Target one instance by type name and key
    ///
    /// # Errors
    ///
    /// Returns `PermissionError::InvalidTarget` if the name or key is invalid
    pub fn instance(type_name: impl Into<String>, key: impl Into<String>) -> Result<Self> {
        Ok(Self::Instance {
            type_name: TypeName::new(type_name)?,
            key: InstanceKey::new(key)?,
        })
    }

    /// Target the Rust type `T` as a whole
    ///
    /// # Errors
    ///
    /// Returns `PermissionError::InvalidTarget` if `T::TYPE_NAME` is invalid
    pub fn of<T: Subject + ?Sized>() -> Result<Self> {
        Self::type_of(T::TYPE_NAME)
    }

    /// Target one instance of the Rust type `T`
    ///
    /// # Errors
    ///
    /// Returns `PermissionError::InvalidTarget` if the type name or the
    /// instance key is invalid
    pub fn instance_of<T: Identified>(subject: &T) -> Result<Self> {
        Self::instance(T::TYPE_NAME, subject.instance_key())
    }

    /// Type of the target (the instance's runtime type for instances)
    #[must_use]
    pub const fn type_name(&self) -> &TypeName {
        match self {
            Self::Type(type_name) | Self::Instance { type_name, .. } => type_name,
        }
    }

    /// Instance key, if this targets an instance
    #[must_use]
    pub const fn instance_key(&self) -> Option<&InstanceKey> {
        match self {
            Self::Type(_) => None,
            Self::Instance { key, .. } => Some(key),
        }
    }

    /// Whether this targets a type as a whole
    #[must_use]
    pub const fn is_type(&self) -> bool {
        matches!(self, Self::Type(_))
    }
}

/// Parses `Type` or `Type#instance-key`
impl FromStr for Target {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(INSTANCE_SEPARATOR) {
            Some((type_name, key)) => Self::instance(type_name, key),
            None => Self::type_of(s),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(type_name) => write!(f, "{type_name}"),
            Self::Instance { type_name, key } => {
                write!(f, "{type_name}{INSTANCE_SEPARATOR}{key}")
            }
        }
    }
}

/// A stored reference scoping an action to a type or to one instance
///
/// Created once when a target is attached to an action and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubjectRef {
    #[serde(rename = "type")]
    type_name: TypeName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    instance: Option<InstanceKey>,
}

impl SubjectRef {
    /// Referenced type
    #[must_use]
    pub const fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    /// Referenced instance, `None` for type-scoped references
    #[must_use]
    pub const fn instance(&self) -> Option<&InstanceKey> {
        self.instance.as_ref()
    }

    /// Whether this reference targets a single instance
    #[must_use]
    pub const fn is_instance_scoped(&self) -> bool {
        self.instance.is_some()
    }

    /// Check if this reference covers the candidate target
    #[must_use]
    pub fn applies_to(&self, target: &Target) -> bool {
        match (&self.instance, target) {
            // Type-scoped: the type itself and every instance of it
            (None, candidate) => candidate.type_name() == &self.type_name,
            // An instance rule never covers the type as a whole
            (Some(_), Target::Type(_)) => false,
            (Some(stored), Target::Instance { type_name, key }) => {
                type_name == &self.type_name && key == stored
            }
        }
    }
}

impl From<Target> for SubjectRef {
    fn from(target: Target) -> Self {
        match target {
            Target::Type(type_name) => Self {
                type_name,
                instance: None,
            },
            Target::Instance { type_name, key } => Self {
                type_name,
                instance: Some(key),
            },
        }
    }
}

impl fmt::Display for SubjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.instance {
            None => write!(f, "{}", self.type_name),
            Some(key) => write!(f, "{}{INSTANCE_SEPARATOR}{key}", self.type_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(target: &str) -> SubjectRef {
        SubjectRef::from(target.parse::<Target>().unwrap())
    }

    #[test]
    fn test_type_reference_matches_type() {
        let stored = reference("Address");
        assert!(stored.applies_to(&Target::type_of("Address").unwrap()));
        assert!(!stored.applies_to(&Target::type_of("Invoice").unwrap()));
    }

    #[test]
    fn test_type_reference_matches_any_instance() {
        let stored = reference("Address");
        assert!(stored.applies_to(&Target::instance("Address", "1").unwrap()));
        assert!(stored.applies_to(&Target::instance("Address", "2").unwrap()));
        assert!(!stored.applies_to(&Target::instance("Invoice", "1").unwrap()));
    }

    #[test]
    fn test_instance_reference_never_matches_type() {
        let stored = reference("Address#1");
        assert!(!stored.applies_to(&Target::type_of("Address").unwrap()));
    }

    #[test]
    fn test_instance_reference_matches_same_instance_only() {
        let stored = reference("Address#1");
        assert!(stored.applies_to(&Target::instance("Address", "1").unwrap()));
        assert!(!stored.applies_to(&Target::instance("Address", "2").unwrap()));
        // Same key on a different type is a different instance
        assert!(!stored.applies_to(&Target::instance("Invoice", "1").unwrap()));
    }

    #[test]
    fn test_target_parse_and_display() {
        let target: Target = "Address#abc-123".parse().unwrap();
        assert_eq!(target.type_name().as_str(), "Address");
        assert_eq!(target.instance_key().map(InstanceKey::as_str), Some("abc-123"));
        assert_eq!(target.to_string(), "Address#abc-123");

        let target: Target = "Address".parse().unwrap();
        assert!(target.is_type());
        assert_eq!(target.to_string(), "Address");
    }

    #[test]
    fn test_blank_names_rejected() {
        assert!(matches!(
            Target::type_of(""),
            Err(PermissionError::InvalidTarget(_))
        ));
        assert!(matches!(
            Target::type_of("   "),
            Err(PermissionError::InvalidTarget(_))
        ));
        assert!(matches!(
            "Address#".parse::<Target>(),
            Err(PermissionError::InvalidTarget(_))
        ));
    }

    #[test]
    fn test_oversized_names_rejected() {
        let long = "a".repeat(MAX_TYPE_NAME_LENGTH + 1);
        assert!(matches!(
            TypeName::new(long),
            Err(PermissionError::InvalidTarget(_))
        ));

        let long = "k".repeat(MAX_INSTANCE_KEY_LENGTH + 1);
        assert!(matches!(
            InstanceKey::new(long),
            Err(PermissionError::InvalidTarget(_))
        ));
    }

    #[test]
    fn test_padded_names_rejected() {
        assert!(matches!(
            Target::type_of(" Address"),
            Err(PermissionError::InvalidTarget(_))
        ));
        assert!(matches!(
            Target::instance("Address", "42 "),
            Err(PermissionError::InvalidTarget(_))
        ));
        assert!(matches!(
            "Address #42".parse::<Target>(),
            Err(PermissionError::InvalidTarget(_))
        ));
        // Inner whitespace is part of the name
        assert!(Target::type_of("Postal Address").is_ok());
    }
}
