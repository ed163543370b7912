// src/core/context.rs

use indexmap::IndexMap;

use crate::models::{ParameterSpec, Value};

/// The accumulating record of one resolution pass: the values bound so far
/// (insertion order = declaration order), the command's declared parameter
/// list, and a cursor on the parameter currently being resolved.
///
/// Converters and callbacks get `&Context` and can only read; the engine
/// alone appends newly bound values. A context is constructed fresh per
/// pass and never shared or retained across passes.
#[derive(Debug)]
pub struct Context<'a> {
    specs: &'a [ParameterSpec],
    bound: IndexMap<String, Value>,
    cursor: usize,
}

impl<'a> Context<'a> {
    pub(crate) fn new(specs: &'a [ParameterSpec]) -> Self {
        Self {
            specs,
            bound: IndexMap::with_capacity(specs.len()),
            cursor: 0,
        }
    }

    /// The full declared parameter list, in declaration order.
    pub fn specs(&self) -> &[ParameterSpec] {
        self.specs
    }

    /// Metadata of the parameter the engine is currently resolving.
    pub fn current_parameter(&self) -> Option<&ParameterSpec> {
        self.specs.get(self.cursor)
    }

    /// The already-bound values: exactly the parameters declared before the
    /// current one, fully converted and validated.
    pub fn bound(&self) -> &IndexMap<String, Value> {
        &self.bound
    }

    /// Looks up an earlier parameter's bound value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bound.get(name)
    }

    pub(crate) fn set_cursor(&mut self, position: usize) {
        self.cursor = position;
    }

    pub(crate) fn bind(&mut self, name: String, value: Value) {
        self.bound.insert(name, value);
    }

    pub(crate) fn into_bound(self) -> IndexMap<String, Value> {
        self.bound
    }
}

// MARK: --- UNIT TESTS ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::converter::Converter;

    fn specs() -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::new("first", Converter::Str),
            ParameterSpec::new("second", Converter::Str),
        ]
    }

    #[test]
    fn test_bound_preserves_insertion_order() {
        let specs = specs();
        let mut ctx = Context::new(&specs);
        ctx.bind("first".to_string(), Value::from("a"));
        ctx.bind("second".to_string(), Value::from("b"));

        let names: Vec<&str> = ctx.bound().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_current_parameter_follows_cursor() {
        let specs = specs();
        let mut ctx = Context::new(&specs);
        assert_eq!(ctx.current_parameter().map(|s| s.name.as_str()), Some("first"));

        ctx.set_cursor(1);
        assert_eq!(ctx.current_parameter().map(|s| s.name.as_str()), Some("second"));

        ctx.set_cursor(2);
        assert!(ctx.current_parameter().is_none());
    }

    #[test]
    fn test_get_reads_earlier_binding() {
        let specs = specs();
        let mut ctx = Context::new(&specs);
        ctx.bind("first".to_string(), Value::from("a"));

        assert_eq!(ctx.get("first"), Some(&Value::from("a")));
        assert_eq!(ctx.get("second"), None);
    }
}
