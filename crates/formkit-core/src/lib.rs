//! # formkit-core: Foundational Types for formkit
//!
//! This crate defines the data model every other formkit crate works on.
//! It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed schema vocabulary.** [`SchemaNode`] is a three-way tagged union
//!    (leaf, object, array) and [`LeafKind`] a closed four-variant enum. Every
//!    consumer matches exhaustively; adding a kind forces every consumer to
//!    handle it.
//!
//! 2. **Explicit value tree.** [`Value`] is a tagged union instead of an
//!    untyped JSON blob. Composite nodes are reference counted so that an
//!    edit copies only the ancestors of the edited position.
//!
//! 3. **One addressing scheme.** [`Path`] is shared by mutation and
//!    validation and renders canonically as dot-separated tokens
//!    (`address.street`, `hobbies.0.stringField`).
//!
//! 4. **Schema sources never fail on shape.** A schema text that is valid
//!    JSON always yields a [`SchemaNode`]; odd shapes are resolved by a fixed
//!    default policy. Only malformed JSON is a [`SchemaError`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `formkit-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod path;
pub mod schema;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use error::{FormkitError, ParseError, PathError, SchemaError};
pub use path::{Path, Segment, MAX_PATH_DEPTH};
pub use schema::{LeafKind, SchemaNode};
pub use value::{Map, Value};
