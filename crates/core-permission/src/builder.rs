//! Builder pattern for ergonomic permission set construction

use crate::action::{Action, ActionKind};
use crate::error::Result;
use crate::permission::PermissionSet;

/// Builder for creating `PermissionSet` instances with a fluent API
///
/// Actions are added with the same idempotent semantics as
/// [`PermissionSet::add_authorization`]: the first action of a kind wins.
///
/// # Examples
///
/// ```
/// use core_permission::{Action, ActionKind, Decision, PermissionSetBuilder, Target};
///
/// # fn example() -> Result<(), core_permission::PermissionError> {
/// let address = Target::type_of("Address")?;
/// let archived = Target::instance("Address", "archived-1")?;
///
/// let user = PermissionSetBuilder::new()
///     .allow(Action::read())
///     .allow_with(ActionKind::Update, |action| action.with_subject(address.clone()))
///     .deny_with(ActionKind::Update, |action| action.with_subject(archived.clone()))
///     .build()?;
///
/// assert_eq!(user.can(&Action::update(), &address), Decision::Allow);
/// assert_eq!(user.can(&Action::update(), &archived), Decision::Deny);
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Debug, Default)]
pub struct PermissionSetBuilder {
    set: PermissionSet,
}

impl PermissionSetBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Authorize an action
    #[must_use]
    pub fn allow(mut self, action: Action) -> Self {
        self.set.add_authorization(action);
        self
    }

    /// Authorize an action of `kind`, scoped by the given function
    #[must_use]
    pub fn allow_with<F>(self, kind: ActionKind, f: F) -> Self
    where
        F: FnOnce(Action) -> Action,
    {
        self.allow(f(Action::new(kind)))
    }

    /// Unauthorize an action
    #[must_use]
    pub fn deny(mut self, action: Action) -> Self {
        self.set.add_unauthorization(action);
        self
    }

    /// Unauthorize an action of `kind`, scoped by the given function
    #[must_use]
    pub fn deny_with<F>(self, kind: ActionKind, f: F) -> Self
    where
        F: FnOnce(Action) -> Action,
    {
        self.deny(f(Action::new(kind)))
    }

    /// Build the `PermissionSet`, returning an error if validation fails
    ///
    /// # Errors
    ///
    /// Returns an error if the set fails [`PermissionSet::validate`]
    pub fn build(self) -> Result<PermissionSet> {
        self.set.validate()?;
        Ok(self.set)
    }
}
