//! Permission resolution
//!
//! [`RuleAuthorizer`] implements the deny-first, tri-state resolution over a
//! pair of rule lists. It borrows the lists, so it can evaluate rules coming
//! from a [`PermissionSet`](crate::PermissionSet), a lock guard, or any other
//! source without copying them.
//!
//! ## Resolution order
//!
//! 1. Unauthorized rules, in list order. A rule of the requested type that
//!    applies to the target denies immediately.
//! 2. Authorized rules, in list order. A rule of the requested type that
//!    applies to the target allows.
//! 3. Rules of the requested type exist but none applies: deny.
//! 4. No rule of the requested type exists: undetermined.
//!
//! There is no specificity ranking. An unauthorization always wins over an
//! authorization, whatever their scoping or insertion order.

use crate::action::Action;
use crate::subject::Target;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a permission query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// A matching authorization exists and no unauthorization matches
    Allow,
    /// A matching unauthorization exists, or rules of the requested type exist
    /// but none applies to the target
    Deny,
    /// No rule of the requested type exists; the caller picks the default
    Undetermined,
}

impl Decision {
    /// `true` only for [`Decision::Allow`]
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }

    /// `true` only for [`Decision::Deny`]
    #[must_use]
    pub const fn is_denied(self) -> bool {
        matches!(self, Self::Deny)
    }

    /// `true` only for [`Decision::Undetermined`]
    #[must_use]
    pub const fn is_undetermined(self) -> bool {
        matches!(self, Self::Undetermined)
    }

    /// Resolve to a boolean, using `default` for [`Decision::Undetermined`]
    #[must_use]
    pub const fn unwrap_or(self, default: bool) -> bool {
        match self {
            Self::Allow => true,
            Self::Deny => false,
            Self::Undetermined => default,
        }
    }

    /// Deny-by-default resolution for application boundaries
    #[must_use]
    pub const fn or_deny(self) -> bool {
        self.unwrap_or(false)
    }
}

impl From<Decision> for Option<bool> {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Allow => Some(true),
            Decision::Deny => Some(false),
            Decision::Undetermined => None,
        }
    }
}

impl From<Option<bool>> for Decision {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Self::Allow,
            Some(false) => Self::Deny,
            None => Self::Undetermined,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Allow => "allow",
            Self::Deny => "deny",
            Self::Undetermined => "undetermined",
        })
    }
}

/// Position of a rule inside a rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Index into the authorized list
    Authorized(usize),
    /// Index into the unauthorized list
    Unauthorized(usize),
}

/// A decision together with the rule that produced it
///
/// `rule` is `None` when the decision came from the fallback steps (rules of
/// the requested type exist but none applies, or no rule exists at all).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    /// Resolved decision
    pub decision: Decision,
    /// Rule that decided, if any applied
    pub rule: Option<Rule>,
}

/// Evaluates authorization and unauthorization rules
///
/// ## Example
///
/// ```
/// use core_permission::{Action, Decision, RuleAuthorizer, Target};
///
/// let authorized = vec![Action::manage()];
/// let unauthorized = vec![Action::delete()];
/// let authorizer = RuleAuthorizer::new(&authorized, &unauthorized);
///
/// let file = Target::instance("File", "report.pdf").unwrap();
/// assert_eq!(authorizer.can(&Action::read(), &file), Decision::Allow);
/// assert_eq!(authorizer.can(&Action::delete(), &file), Decision::Deny);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RuleAuthorizer<'a> {
    authorized: &'a [Action],
    unauthorized: &'a [Action],
}

impl<'a> RuleAuthorizer<'a> {
    /// Create a new authorizer over the given rule lists
    #[must_use]
    pub const fn new(authorized: &'a [Action], unauthorized: &'a [Action]) -> Self {
        Self {
            authorized,
            unauthorized,
        }
    }

    /// Resolve whether `action` may be performed against `target`
    #[must_use]
    pub fn can(&self, action: &Action, target: &Target) -> Decision {
        self.evaluate(action, target).decision
    }

    /// Resolve and report which rule decided
    #[must_use]
    pub fn evaluate(&self, action: &Action, target: &Target) -> Evaluation {
        let mut unauthorized_type_found = false;
        for (index, rule) in self.unauthorized.iter().enumerate() {
            if rule.is_type_of(action) {
                unauthorized_type_found = true;
                if rule.applies_to(target) {
                    return Evaluation {
                        decision: Decision::Deny,
                        rule: Some(Rule::Unauthorized(index)),
                    };
                }
            }
        }

        let mut authorized_type_found = false;
        for (index, rule) in self.authorized.iter().enumerate() {
            if rule.is_type_of(action) {
                authorized_type_found = true;
                if rule.applies_to(target) {
                    return Evaluation {
                        decision: Decision::Allow,
                        rule: Some(Rule::Authorized(index)),
                    };
                }
            }
        }

        // Rules of this type exist, just not for this subject
        let decision = if authorized_type_found || unauthorized_type_found {
            Decision::Deny
        } else {
            Decision::Undetermined
        };

        Evaluation {
            decision,
            rule: None,
        }
    }

    /// Get every rule, of either polarity, that type-matches and applies
    ///
    /// Unauthorized rules are yielded first, each list in order. Useful for
    /// auditing a decision.
    pub fn matching_rules(
        &self,
        action: &'a Action,
        target: &'a Target,
    ) -> impl Iterator<Item = (Rule, &'a Action)> + 'a {
        let (authorized, unauthorized) = (self.authorized, self.unauthorized);
        let unauthorized = unauthorized
            .iter()
            .enumerate()
            .map(|(i, rule)| (Rule::Unauthorized(i), rule));
        let authorized = authorized
            .iter()
            .enumerate()
            .map(|(i, rule)| (Rule::Authorized(i), rule));

        unauthorized
            .chain(authorized)
            .filter(move |(_, rule)| rule.is_type_of(action) && rule.applies_to(target))
    }

    /// Get the number of rules being evaluated
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.authorized.len() + self.unauthorized.len()
    }
}

/// Trait for types that can answer permission queries
///
/// Application code depends on this abstraction rather than on a concrete
/// rule store.
pub trait Authorizer {
    /// Resolve whether `action` may be performed against `target`
    fn can(&self, action: &Action, target: &Target) -> Decision;
}

impl<'a> Authorizer for RuleAuthorizer<'a> {
    fn can(&self, action: &Action, target: &Target) -> Decision {
        RuleAuthorizer::can(self, action, target)
    }
}
