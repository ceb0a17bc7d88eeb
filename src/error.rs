//! Error types.
//!
//! - `ModelError` is returned by the pure working-curve functions when an input
//!   falls outside the domain where the Beer's-Law formulas are defined.
//! - `AppError` is the binary-level error: a message plus the process exit code.

use thiserror::Error;

/// Exit code for usage, configuration and file errors.
pub const EXIT_USAGE: u8 = 2;
/// Exit code for out-of-domain model parameters.
pub const EXIT_MODEL: u8 = 3;
/// Exit code for terminal (TUI) failures.
pub const EXIT_TERMINAL: u8 = 4;

/// Errors raised by the working-curve model.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ModelError {
    /// A positivity (or finiteness) constraint on an input was violated.
    #[error("invalid parameter `{name}` = {value}: must be {requirement}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        requirement: &'static str,
    },
}

impl ModelError {
    pub fn invalid(name: &'static str, value: f64, requirement: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            requirement,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        Self::new(EXIT_MODEL, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_error_names_the_parameter() {
        let err = ModelError::invalid("dp", -1.0, "> 0");
        let msg = err.to_string();
        assert!(msg.contains("`dp`"), "{msg}");
        assert!(msg.contains("-1"), "{msg}");
    }

    #[test]
    fn model_error_maps_to_model_exit_code() {
        let err: AppError = ModelError::invalid("ec", 0.0, "> 0").into();
        assert_eq!(err.exit_code(), EXIT_MODEL);
        assert!(err.to_string().contains("`ec`"));
    }
}
