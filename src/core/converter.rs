// src/core/converter.rs

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::core::context::Context;
use crate::core::reporter::{ValidationError, ValidationResult};
use crate::models::{ParameterSpec, Value};

/// A fully user-defined conversion, polymorphic over the same contract as
/// the built-in variants.
pub type ConvertFn = Box<dyn Fn(&str, &ParameterSpec, &Context<'_>) -> ValidationResult<Value>>;

/// A post-condition applied to the output of a wrapped converter. It may
/// transform the value; an `Err` becomes a `ConversionFailed` naming the
/// parameter and the condition.
pub type Postcheck = Box<dyn Fn(Value) -> anyhow::Result<Value>>;

/// Maps a raw textual input (explicit or default) to a typed [`Value`] for
/// one parameter.
///
/// Conversion is pure except where a `Wrapped` post-condition documents a
/// wall-clock read (e.g. a "must be in the future" check).
pub enum Converter {
    /// Identity: the raw text becomes `Value::Text`.
    Str,
    /// Parses a signed 64-bit integer.
    Int,
    /// Exact, case-sensitive membership in the allowed set.
    Choice(Vec<String>),
    /// Tries each chrono pattern in order, first as a full datetime and
    /// then as a date (bound at midnight). Fails only when every pattern
    /// fails.
    DateTime(Vec<String>),
    /// Composition instead of inheritance: run `inner`, then apply an
    /// extra user check over the converted value.
    Wrapped { inner: Box<Converter>, check: Postcheck },
    /// A user-supplied conversion function.
    Custom(ConvertFn),
}

impl Converter {
    pub fn choice<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Choice(allowed.into_iter().map(Into::into).collect())
    }

    pub fn datetime<I, S>(formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::DateTime(formats.into_iter().map(Into::into).collect())
    }

    pub fn wrapped(inner: Converter, check: impl Fn(Value) -> anyhow::Result<Value> + 'static) -> Self {
        Self::Wrapped {
            inner: Box::new(inner),
            check: Box::new(check),
        }
    }

    pub fn custom(
        convert: impl Fn(&str, &ParameterSpec, &Context<'_>) -> ValidationResult<Value> + 'static,
    ) -> Self {
        Self::Custom(Box::new(convert))
    }

    /// Converts `raw` for `spec`. Built-in variants ignore `ctx`; it is part
    /// of the contract so user converters can consult earlier bindings.
    pub fn convert(
        &self,
        raw: &str,
        spec: &ParameterSpec,
        ctx: &Context<'_>,
    ) -> ValidationResult<Value> {
        match self {
            Converter::Str => Ok(Value::Text(raw.to_string())),
            Converter::Int => raw.parse::<i64>().map(Value::Int).map_err(|_| {
                ValidationError::conversion_failed(
                    &spec.name,
                    format!("'{}' is not a valid integer", raw),
                )
            }),
            Converter::Choice(allowed) => {
                if allowed.iter().any(|choice| choice == raw) {
                    Ok(Value::Text(raw.to_string()))
                } else {
                    Err(ValidationError::conversion_failed(
                        &spec.name,
                        format!("'{}' is not one of {}", raw, quoted_list(allowed)),
                    ))
                }
            }
            Converter::DateTime(formats) => parse_datetime(raw, formats).ok_or_else(|| {
                ValidationError::conversion_failed(
                    &spec.name,
                    format!(
                        "'{}' does not match any of the formats {}",
                        raw,
                        quoted_list(formats)
                    ),
                )
            }),
            Converter::Wrapped { inner, check } => {
                let value = inner.convert(raw, spec, ctx)?;
                check(value)
                    .map_err(|e| ValidationError::conversion_failed(&spec.name, e.to_string()))
            }
            Converter::Custom(convert) => convert(raw, spec, ctx),
        }
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Converter::Str => f.write_str("Str"),
            Converter::Int => f.write_str("Int"),
            Converter::Choice(allowed) => f.debug_tuple("Choice").field(allowed).finish(),
            Converter::DateTime(formats) => f.debug_tuple("DateTime").field(formats).finish(),
            Converter::Wrapped { inner, .. } => f.debug_tuple("Wrapped").field(inner).finish(),
            Converter::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Tries each pattern in declaration order. A pattern that only describes a
/// date yields that date at midnight, so every success is a full datetime.
fn parse_datetime(raw: &str, formats: &[String]) -> Option<Value> {
    for format in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            log::trace!("'{}' matched datetime format '{}'", raw, format);
            return Some(Value::DateTime(dt));
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            log::trace!("'{}' matched date format '{}'", raw, format);
            return Some(Value::DateTime(date.and_time(NaiveTime::MIN)));
        }
    }
    None
}

fn quoted_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("'{}'", item))
        .collect::<Vec<_>>()
        .join(", ")
}

// MARK: --- UNIT TESTS ---

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Local};

    fn convert(converter: &Converter, raw: &str) -> ValidationResult<Value> {
        let spec = ParameterSpec::new("param", Converter::Str);
        let ctx = Context::new(&[]);
        converter.convert(raw, &spec, &ctx)
    }

    #[test]
    fn test_str_is_identity() {
        assert_eq!(
            convert(&Converter::Str, "hello").unwrap(),
            Value::Text("hello".to_string())
        );
    }

    #[test]
    fn test_int_parses() {
        assert_eq!(convert(&Converter::Int, "-42").unwrap(), Value::Int(-42));
    }

    #[test]
    fn test_int_rejects_text() {
        let err = convert(&Converter::Int, "abc").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for 'param': 'abc' is not a valid integer"
        );
    }

    #[test]
    fn test_choice_exact_match() {
        let converter = Converter::choice(["cash", "credit_card"]);
        assert_eq!(
            convert(&converter, "cash").unwrap(),
            Value::Text("cash".to_string())
        );
    }

    #[test]
    fn test_choice_is_case_sensitive() {
        let converter = Converter::choice(["cash", "credit_card"]);
        let err = convert(&converter, "CASH").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for 'param': 'CASH' is not one of 'cash', 'credit_card'"
        );
    }

    #[test]
    fn test_datetime_date_only_format() {
        let converter = Converter::datetime(["%Y-%m-%d"]);
        let value = convert(&converter, "2024-06-15").unwrap();
        let dt = value.as_datetime().unwrap();
        assert_eq!(dt.date().year(), 2024);
        assert_eq!(dt.time(), NaiveTime::MIN);
    }

    #[test]
    fn test_datetime_tries_formats_in_order() {
        let converter = Converter::datetime(["%Y-%m-%d %H:%M:%S", "%Y-%m-%d"]);
        let value = convert(&converter, "2024-06-15 10:30:00").unwrap();
        assert!(value.as_datetime().is_some());
        let value = convert(&converter, "2024-06-15").unwrap();
        assert!(value.as_datetime().is_some());
    }

    #[test]
    fn test_datetime_failure_lists_all_formats() {
        let converter = Converter::datetime(["%Y-%m-%d"]);
        let err = convert(&converter, "2024-13-01").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for 'param': '2024-13-01' does not match any of the formats '%Y-%m-%d'"
        );
    }

    #[test]
    fn test_wrapped_postcheck_rejects() {
        // A converter that only accepts datetimes strictly after the current
        // instant, built by composition over the plain datetime converter.
        let converter = Converter::wrapped(Converter::datetime(["%Y-%m-%d"]), |value| {
            let now = Local::now().naive_local();
            match value.as_datetime() {
                Some(dt) if dt > now => Ok(value),
                _ => anyhow::bail!("datetime must be in the future"),
            }
        });

        let err = convert(&converter, "2000-01-01").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for 'param': datetime must be in the future"
        );
    }

    #[test]
    fn test_wrapped_postcheck_can_transform() {
        let converter = Converter::wrapped(Converter::Str, |value| match value.as_text() {
            Some(text) => Ok(Value::Text(text.to_uppercase())),
            None => anyhow::bail!("expected text"),
        });
        assert_eq!(
            convert(&converter, "cash").unwrap(),
            Value::Text("CASH".to_string())
        );
    }

    #[test]
    fn test_wrapped_inner_failure_short_circuits() {
        let converter = Converter::wrapped(Converter::datetime(["%Y-%m-%d"]), |_| {
            panic!("postcheck must not run when the inner conversion fails")
        });
        let err = convert(&converter, "not-a-date").unwrap_err();
        assert!(err.to_string().contains("does not match"));
    }

    #[test]
    fn test_custom_converter() {
        let converter = Converter::custom(|raw, spec, _ctx| {
            raw.parse::<i64>()
                .map(|n| Value::Int(n * 2))
                .map_err(|_| ValidationError::conversion_failed(&spec.name, "expected a number"))
        });
        assert_eq!(convert(&converter, "21").unwrap(), Value::Int(42));
    }
}
