//! # Geometry Errors
//!
//! Error types raised while building or querying a geometry registry.
//! All of them are fatal for a conversion run.

use fluka_parser::ParseError;
use thiserror::Error;

/// Errors raised by the geometry model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Malformed input text.
    #[error("syntax error: {0}")]
    Syntax(#[from] ParseError),

    /// A name registered twice in one registry.
    #[error("{kind} '{name}' is already defined")]
    NameCollision {
        /// Entity kind (`body`, `zone`, ...).
        kind: &'static str,
        /// The duplicated name.
        name: String,
    },

    /// A value outside its allowed range, or an inconsistent definition.
    #[error("invalid {subject}: {message}")]
    Validation {
        /// What failed validation (usually a name).
        subject: String,
        /// Why it failed.
        message: String,
    },

    /// A reference to a name that is not registered.
    #[error("unknown {kind} '{name}'")]
    RegistryLookup {
        /// Entity kind (`body`, `region`, ...).
        kind: &'static str,
        /// The dangling name.
        name: String,
    },
}

impl GeometryError {
    /// Creates a validation error.
    pub fn validation(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            subject: subject.into(),
            message: message.into(),
        }
    }

    /// Creates a lookup error.
    pub fn lookup(kind: &'static str, name: impl Into<String>) -> Self {
        Self::RegistryLookup {
            kind,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GeometryError::lookup("body", "TARGET");
        assert_eq!(err.to_string(), "unknown body 'TARGET'");
        let err = GeometryError::validation("R1", "polar angle 181 outside [0, 180]");
        assert!(err.to_string().starts_with("invalid R1"));
    }

    #[test]
    fn test_parse_error_converts() {
        let parse = fluka_parser::parse("R 5 +A").unwrap_err();
        let err: GeometryError = parse.into();
        assert!(matches!(err, GeometryError::Syntax(_)));
    }
}
