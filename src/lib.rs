//! A declarative parameter-resolution pipeline for command-style
//! interfaces: per declared parameter, in declaration order, the engine
//! resolves a default, converts the raw text to a typed value, runs the
//! validation callback and binds the result into a shared context, so that
//! later parameters can validate against earlier ones.
//!
//! The crate owns no argv parsing and prints nothing; a front-end hands it
//! a `&[ParameterSpec]` plus `RawInputs` and receives either `BoundParams`
//! or a single `ValidationError`.

pub mod constants;
pub mod core;
pub mod models;

pub use crate::core::callback::Callback;
pub use crate::core::context::Context;
pub use crate::core::converter::{ConvertFn, Converter, Postcheck};
pub use crate::core::engine::{BoundParams, resolve};
pub use crate::core::reporter::{ErrorKind, ValidationError, ValidationResult};
pub use crate::models::{DefaultValue, Generator, ParameterSpec, RawInputs, Value};
