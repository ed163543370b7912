// src/models.rs

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDateTime;

use crate::core::{
    callback::Callback,
    context::Context,
    converter::Converter,
    reporter::{ValidationError, ValidationResult},
};

// --- CONVERTED VALUES ---

/// A strongly-typed parameter value, produced by a `Converter` and stored in
/// the context's bound map.
///
/// `Empty` is the bound value of an optional parameter that had neither an
/// explicit input nor a default. Callbacks still run for such parameters, so
/// conditional-requirement checks can observe the absence.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Empty,
    Text(String),
    Int(i64),
    DateTime(NaiveDateTime),
}

impl Value {
    /// Returns `true` for `Empty` and for blank text. Useful in callbacks
    /// that treat "not provided" and "provided as empty" the same way.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Empty => true,
            Value::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Text(s) => write!(f, "{}", s),
            Value::Int(i) => write!(f, "{}", i),
            Value::DateTime(dt) => write!(f, "{}", dt),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::DateTime(value)
    }
}

// --- DEFAULTS ---

/// Produces the raw value of a lazily-evaluated default. Runs at resolution
/// time, at most once per pass, and only when no explicit input exists.
pub type Generator = Box<dyn Fn() -> anyhow::Result<String>>;

/// The default of a parameter: either a fixed raw value, or a generator
/// evaluated when the pass reaches the parameter. Both go through the
/// parameter's converter like any explicit input.
pub enum DefaultValue {
    Static(String),
    Generator(Generator),
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Static(s) => f.debug_tuple("Static").field(s).finish(),
            DefaultValue::Generator(_) => f.write_str("Generator(..)"),
        }
    }
}

// --- PARAMETER DECLARATIONS ---

/// Declares one parameter of a command: its identity, input aliases, whether
/// it is required, its default, its converter and an optional validation
/// callback. Immutable once handed to the engine.
pub struct ParameterSpec {
    pub name: String,
    pub aliases: Vec<String>,
    pub required: bool,
    pub default: Option<DefaultValue>,
    pub converter: Converter,
    pub callback: Option<Callback>,
}

impl ParameterSpec {
    /// Declares an optional parameter with no default and no callback.
    pub fn new(name: impl Into<String>, converter: Converter) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            required: false,
            default: None,
            converter,
            callback: None,
        }
    }

    /// Marks the parameter as required. A usable default still satisfies the
    /// requirement; only "no input and no default" is a missing parameter.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Adds an alternate input name under which the boundary may supply a
    /// value for this parameter.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Sets a fixed default raw value.
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(DefaultValue::Static(value.into()));
        self
    }

    /// Sets a lazily-evaluated default.
    pub fn with_generator(mut self, generator: impl Fn() -> anyhow::Result<String> + 'static) -> Self {
        self.default = Some(DefaultValue::Generator(Box::new(generator)));
        self
    }

    /// Attaches the validation/transform callback run after conversion.
    pub fn with_callback(
        mut self,
        callback: impl Fn(&Context<'_>, &ParameterSpec, Value) -> ValidationResult<Value> + 'static,
    ) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for ParameterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterSpec")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("required", &self.required)
            .field("default", &self.default)
            .field("converter", &self.converter)
            .field("callback", &self.callback.as_ref().map(|_| "fn"))
            .finish()
    }
}

// --- RAW INPUTS ---

/// The untyped inputs handed over by the (excluded) tokenization layer: a
/// map from parameter name (or alias) to raw text. Consumed by one
/// resolution pass.
#[derive(Debug, Clone, Default)]
pub struct RawInputs {
    values: HashMap<String, String>,
}

impl RawInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an explicit raw value, replacing any previous one under the
    /// same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder-style `insert`.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Finds the explicit input for `spec`, honouring its aliases. Supplying
    /// the same parameter under more than one of its names is a hard
    /// conflict, as it would be ambiguous which value wins.
    pub(crate) fn lookup(&self, spec: &ParameterSpec) -> ValidationResult<Option<&str>> {
        let mut hits = std::iter::once(spec.name.as_str())
            .chain(spec.aliases.iter().map(String::as_str))
            .filter(|key| self.values.contains_key(*key));

        let first = hits.next();
        if let Some(second) = hits.next() {
            return Err(ValidationError::conversion_failed(
                &spec.name,
                format!(
                    "supplied more than once (as '{}' and '{}')",
                    first.unwrap_or_default(),
                    second
                ),
            ));
        }

        Ok(first.and_then(|key| self.values.get(key)).map(String::as_str))
    }
}

impl FromIterator<(String, String)> for RawInputs {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

// MARK: --- UNIT TESTS ---
