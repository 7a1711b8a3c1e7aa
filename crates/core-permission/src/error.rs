//! Error types for core-permission

use thiserror::Error;

/// Result type alias for permission operations
pub type Result<T> = std::result::Result<T, PermissionError>;

/// Errors that can occur while building, validating or loading permissions
///
/// Resolution itself never fails: "no applicable rule" is expressed by
/// [`Decision::Undetermined`](crate::Decision::Undetermined), not by an error.
#[derive(Error, Debug)]
pub enum PermissionError {
    /// Target or subject reference is malformed (empty or oversized name/key)
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// Action is malformed (e.g. a custom action with an empty name)
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Action name does not correspond to a known kind
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// A rule list contains the same action kind twice
    #[error("Duplicate action '{kind}' in {list} list")]
    DuplicateAction {
        /// Which list holds the duplicate (`authorized` / `unauthorized`)
        list: &'static str,
        /// The duplicated kind
        kind: String,
    },

    // ===== Size limits =====
    /// A rule list exceeds `MAX_RULES_PER_LIST`
    #[error("Rule list exceeds maximum {max} actions (attempted: {attempted})")]
    TooManyRules {
        /// Maximum allowed actions
        max: usize,
        /// Attempted number of actions
        attempted: usize,
    },

    /// An action exceeds `MAX_SUBJECTS_PER_ACTION`
    #[error("Action exceeds maximum {max} subjects (attempted: {attempted})")]
    TooManySubjects {
        /// Maximum allowed subjects
        max: usize,
        /// Attempted number of subjects
        attempted: usize,
    },

    // ===== Persistence =====
    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}
