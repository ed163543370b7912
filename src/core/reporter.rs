// src/core/reporter.rs

use thiserror::Error;

/// Shorthand for fallible pipeline stages.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// The single error type a resolution pass can return. The first failing
/// parameter aborts the pass, so the boundary always receives exactly one
/// of these.
///
/// `Display` is the canonical rendering contract for user-facing messages:
///
/// - `ConversionFailed` / `CallbackRejected` render as
///   `Invalid value for '<name>': <message>`
/// - `MissingRequired` renders as `Missing required parameter '<name>'`
///
/// Front-ends print the rendered text and exit with
/// [`crate::constants::EXIT_VALIDATION_FAILURE`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The parameter is marked required but has no explicit input and no
    /// usable default.
    #[error("Missing required parameter '{parameter}'")]
    MissingRequired { parameter: String },
    /// The raw or default input could not be converted to the parameter's
    /// type, a converter post-condition failed, or a default generator
    /// raised.
    #[error("Invalid value for '{parameter}': {message}")]
    ConversionFailed { parameter: String, message: String },
    /// The validation callback rejected an otherwise well-typed value.
    #[error("Invalid value for '{parameter}': {message}")]
    CallbackRejected { parameter: String, message: String },
}

/// Discriminant of a [`ValidationError`], for boundaries that branch on the
/// failure class without caring about the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingRequired,
    ConversionFailed,
    CallbackRejected,
}

impl ValidationError {
    pub fn missing_required(parameter: impl Into<String>) -> Self {
        Self::MissingRequired {
            parameter: parameter.into(),
        }
    }

    pub fn conversion_failed(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConversionFailed {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    pub fn rejected(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CallbackRejected {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Name of the parameter the pass failed on.
    pub fn parameter(&self) -> &str {
        match self {
            Self::MissingRequired { parameter }
            | Self::ConversionFailed { parameter, .. }
            | Self::CallbackRejected { parameter, .. } => parameter,
        }
    }

    /// The failure detail, when the kind carries one.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::MissingRequired { .. } => None,
            Self::ConversionFailed { message, .. } | Self::CallbackRejected { message, .. } => {
                Some(message)
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingRequired { .. } => ErrorKind::MissingRequired,
            Self::ConversionFailed { .. } => ErrorKind::ConversionFailed,
            Self::CallbackRejected { .. } => ErrorKind::CallbackRejected,
        }
    }
}

// MARK: --- UNIT TESTS ---

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_missing_required() {
        let err = ValidationError::missing_required("payment_method");
        assert_eq!(
            err.to_string(),
            "Missing required parameter 'payment_method'"
        );
        assert_eq!(err.kind(), ErrorKind::MissingRequired);
        assert_eq!(err.message(), None);
    }

    #[test]
    fn test_render_conversion_failed() {
        let err = ValidationError::conversion_failed("count", "'x' is not a valid integer");
        assert_eq!(
            err.to_string(),
            "Invalid value for 'count': 'x' is not a valid integer"
        );
        assert_eq!(err.parameter(), "count");
        assert_eq!(err.kind(), ErrorKind::ConversionFailed);
    }

    #[test]
    fn test_render_callback_rejected() {
        let err = ValidationError::rejected("card_number", "card number is required");
        assert_eq!(
            err.to_string(),
            "Invalid value for 'card_number': card number is required"
        );
        assert_eq!(err.message(), Some("card number is required"));
    }
}
