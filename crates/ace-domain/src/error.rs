use thiserror::Error;

/// The request context lacks a value the evaluation needed.
///
/// Caller-input error: the whole evaluation is aborted and no decision is produced.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ContextValidationError {
    /// The path, or one of its prefixes, is absent or `null`.
    #[error("missing field '{path}'")]
    MissingField { path: String },

    /// A prefix of the path resolved to a non-mapping value.
    #[error("missing field '{path}': '{parent}' is not a mapping")]
    NotAMapping { path: String, parent: String },
}

impl ContextValidationError {
    pub fn path(&self) -> &str {
        match self {
            ContextValidationError::MissingField { path }
            | ContextValidationError::NotAMapping { path, .. } => path,
        }
    }
}

/// The policy is well-formed but semantically meaningless.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PolicyValidationError {
    #[error("Unsupported operator '{operator}'")]
    UnsupportedOperator { operator: String },

    #[error("Illegal field path '{field}'")]
    IllegalFieldPath { field: String },

    #[error("Operator '{operator}' expects a list value")]
    ExpectsList { operator: String },

    #[error("Operator '{operator}' expects a numeric value")]
    ExpectsNumeric { operator: String },
}

/// Integration error: unreachable when the loader and validator ran first.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InternalError {
    #[error("operator '{operator}' is not registered")]
    UnknownOperator { operator: String },

    #[error("unsupported strategy '{name}' (expected deny_overrides)")]
    UnsupportedStrategy { name: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Context(#[from] ContextValidationError),

    #[error(transparent)]
    Policy(#[from] PolicyValidationError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}
