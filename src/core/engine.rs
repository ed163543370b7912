// src/core/engine.rs

use std::fmt;

use indexmap::IndexMap;

use crate::core::{
    callback,
    context::Context,
    defaults,
    reporter::{ValidationError, ValidationResult},
};
use crate::models::{ParameterSpec, RawInputs, Value};

// --- RESOLVED OUTPUT ---

/// The successful result of a resolution pass: every declared parameter,
/// fully converted and validated, in declaration order. Values can be read
/// by name or destructured positionally.
#[derive(Debug)]
pub struct BoundParams {
    values: IndexMap<String, Value>,
}

impl BoundParams {
    /// Looks up a bound value by parameter name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Looks up a bound value by declaration position.
    pub fn get_index(&self, position: usize) -> Option<(&str, &Value)> {
        self.values
            .get_index(position)
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Iterates `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl IntoIterator for BoundParams {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl fmt::Display for BoundParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, value) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", name, value)?;
            first = false;
        }
        Ok(())
    }
}

// --- RESOLUTION PASS ---

/// Runs one resolution pass over `specs` in declaration order.
///
/// Each parameter moves through default resolution, the required check,
/// conversion and callback validation before being bound into the context,
/// so a later parameter's callback can read every earlier parameter's final
/// value and never the other way around. The first failure aborts the whole
/// pass; no partially-bound set is ever returned as success.
pub fn resolve(specs: &[ParameterSpec], inputs: &RawInputs) -> ValidationResult<BoundParams> {
    log::debug!("Starting resolution pass over {} parameters", specs.len());
    let mut ctx = Context::new(specs);

    for (position, spec) in specs.iter().enumerate() {
        ctx.set_cursor(position);

        let explicit = inputs.lookup(spec)?;
        let raw = defaults::resolve(spec, explicit)?;

        let value = match raw {
            Some(raw) => {
                log::debug!("Converting '{}' from raw '{}'", spec.name, raw);
                let converted = spec.converter.convert(raw.as_ref(), spec, &ctx)?;
                callback::invoke(&ctx, spec, converted)?
            }
            None if spec.required => {
                return Err(ValidationError::missing_required(&spec.name));
            }
            // Optional, no input, no default: bind Empty. The callback still
            // runs, so conditional-requirement checks observe the absence.
            None => callback::invoke(&ctx, spec, Value::Empty)?,
        };

        ctx.bind(spec.name.clone(), value);
    }

    Ok(BoundParams {
        values: ctx.into_bound(),
    })
}

// MARK: --- UNIT TESTS ---
