// src/core/callback.rs

use crate::core::context::Context;
use crate::core::reporter::ValidationResult;
use crate::models::{ParameterSpec, Value};

/// The validator/transform attached to a parameter at declaration time.
///
/// It runs after conversion with the immutable context (all earlier
/// parameters bound), the current parameter's metadata, and the converted
/// value. It may return the value unchanged, a transformed value, or fail
/// with `CallbackRejected`.
pub type Callback =
    Box<dyn Fn(&Context<'_>, &ParameterSpec, Value) -> ValidationResult<Value>>;

/// Runs `spec`'s callback over the converted value. The identity transform
/// is the default when no callback is declared.
pub fn invoke(ctx: &Context<'_>, spec: &ParameterSpec, value: Value) -> ValidationResult<Value> {
    match &spec.callback {
        Some(callback) => callback(ctx, spec, value),
        None => Ok(value),
    }
}

// MARK: --- UNIT TESTS ---
