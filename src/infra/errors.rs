// src/infra/errors.rs — Error types for hcpcoach

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoachError {
    // Lookup errors
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    // Event errors (session left untouched)
    #[error("Event '{event}' is not allowed on the {screen} screen")]
    InvalidEvent { event: String, screen: String },

    #[error("Message text cannot be empty")]
    EmptyInput,

    // Backend errors (retriable)
    #[error("Backend '{backend}' unavailable: {message}")]
    BackendUnavailable { backend: String, message: String },

    // Infra
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoachError {
    pub fn persona_not_found(id: impl Into<String>) -> Self {
        CoachError::NotFound {
            kind: "Persona",
            id: id.into(),
        }
    }

    pub fn is_retriable(&self) -> bool {
        matches!(self, CoachError::BackendUnavailable { .. })
    }

    /// Short machine-readable name, used in API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            CoachError::NotFound { .. } => "not_found",
            CoachError::InvalidEvent { .. } => "invalid_event",
            CoachError::EmptyInput => "empty_input",
            CoachError::BackendUnavailable { .. } => "backend_unavailable",
            CoachError::Config(_) => "config",
            CoachError::Io(_) => "io",
            CoachError::Other(_) => "internal",
        }
    }
}
