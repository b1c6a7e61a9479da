//! # formkit-engine: Schema-Driven Value Operations
//!
//! Everything the engine does is a pure function over immutable trees:
//!
//! - [`synthesize`] builds the default value for a schema.
//! - [`set_at_path`], [`append_to_list`], [`remove_from_list`] return a new
//!   value with one change applied, copying only the ancestors of the
//!   changed position. Their `try_*` counterparts report unreachable
//!   positions as [`PathError`](formkit_core::PathError) instead of
//!   returning the input unchanged.
//! - [`validate`] walks a value against a schema and collects every
//!   nonconformance into an [`ErrorSet`] keyed by path.
//!
//! For every schema `s`, `validate(&s, &synthesize(&s))` is empty.
//!
//! ## Crate Policy
//!
//! - Depends only on `formkit-core` internally.
//! - No I/O, no shared state, no panics outside tests.

pub mod mutate;
pub mod synthesize;
pub mod validate;

pub use mutate::{
    append_to_list, remove_from_list, set_at_path, try_append_to_list, try_remove_from_list,
    try_set_at_path, NewElement,
};
pub use synthesize::{default_leaf, synthesize};
pub use validate::{is_valid_date, validate, validate_at, ErrorSet, Mismatch, Violation};
