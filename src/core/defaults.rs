// src/core/defaults.rs

use std::borrow::Cow;

use crate::core::reporter::{ValidationError, ValidationResult};
use crate::models::{DefaultValue, ParameterSpec};

/// Produces the raw value a parameter enters conversion with.
///
/// An explicit input always wins and the default is never consulted. A
/// `Static` default is borrowed from the declaration; a `Generator` runs
/// exactly once, here, and an `Err` from it propagates as
/// `ConversionFailed` tagged with the parameter name.
///
/// Returns `None` when the parameter has neither input nor default; the
/// engine decides what that means (required check, `Value::Empty` binding).
pub fn resolve<'a>(
    spec: &'a ParameterSpec,
    explicit: Option<&'a str>,
) -> ValidationResult<Option<Cow<'a, str>>> {
    if let Some(value) = explicit {
        return Ok(Some(Cow::Borrowed(value)));
    }

    match &spec.default {
        None => Ok(None),
        Some(DefaultValue::Static(value)) => Ok(Some(Cow::Borrowed(value.as_str()))),
        Some(DefaultValue::Generator(generator)) => match generator() {
            Ok(value) => {
                log::debug!("Generated default for '{}': '{}'", spec.name, value);
                Ok(Some(Cow::Owned(value)))
            }
            Err(e) => Err(ValidationError::conversion_failed(&spec.name, e.to_string())),
        },
    }
}

// MARK: --- UNIT TESTS ---
