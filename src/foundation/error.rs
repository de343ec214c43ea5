/// Convenience result type used across tableau.
pub type TableauResult<T> = Result<T, TableauError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum TableauError {
    /// Broken tree or binding invariant (re-parenting, cycles, already-bound actions, dead ids).
    #[error("structure error: {0}")]
    Structure(String),

    /// Invalid action construction or unsupported action operation.
    #[error("action error: {0}")]
    Action(String),

    /// Missing, undecodable, or malformed resources.
    #[error("resource error: {0}")]
    Resource(String),

    /// Invalid user-provided parameters or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Unrecoverable platform or device failure (startup aborts).
    #[error("platform error: {0}")]
    Platform(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TableauError {
    /// Build a [`TableauError::Structure`] value.
    pub fn structure(msg: impl Into<String>) -> Self {
        Self::Structure(msg.into())
    }

    /// Build a [`TableauError::Action`] value.
    pub fn action(msg: impl Into<String>) -> Self {
        Self::Action(msg.into())
    }

    /// Build a [`TableauError::Resource`] value.
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    /// Build a [`TableauError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TableauError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`TableauError::Platform`] value.
    pub fn platform(msg: impl Into<String>) -> Self {
        Self::Platform(msg.into())
    }

    /// Return `true` for errors that indicate a programming mistake rather than a runtime
    /// condition.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Structure(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
