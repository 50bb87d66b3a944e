use thiserror::Error;

/// Errors that can occur while loading a workflow document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("Could not read workflow file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse workflow JSON: {0}")]
    JsonParse(String),

    #[error("Workflow rejected: {0}")]
    Rejected(#[from] GuardError),
}

/// Errors raised by a security guard before either engine runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuardError {
    #[error("Invalid workflow system name '{name}': {reason}")]
    InvalidSystemName { name: String, reason: String },

    #[error("Workflow payload is {size} bytes, exceeding the limit of {limit} bytes")]
    PayloadTooLarge { size: usize, limit: usize },

    #[error("Workflow has {count} steps, exceeding the limit of {limit}")]
    TooManySteps { count: usize, limit: usize },

    #[error("Workflow has {count} variables, exceeding the limit of {limit}")]
    TooManyVariables { count: usize, limit: usize },
}

/// Errors a validation rule can fail with. The engine turns each into an ERROR entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("{0}")]
    Internal(String),
}
