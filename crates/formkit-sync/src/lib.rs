//! # formkit-sync: Value/Text Synchronization
//!
//! The structured value and its serialized JSON text are two views of the
//! same record. This crate converts between them and ties validation
//! results back to the text.
//!
//! ## Text (`text`)
//!
//! - [`to_text`]: deterministic pretty printing in field order.
//! - [`from_text`]: parsing; malformed text is a
//!   [`ParseError`](formkit_core::ParseError) and callers keep their last
//!   good value.
//!
//! ## Location (`locate`)
//!
//! - [`locate`]: best-effort line/column of the field named by a path's
//!   last segment.
//! - [`diagnostics`]: an error set with each entry anchored in the text.
//!
//! ## Session (`session`)
//!
//! [`EditSession`] is the caller-held revision slot: one schema, the current
//! value, the current text, and any pending parse error.

pub mod locate;
pub mod session;
pub mod text;

pub use locate::{diagnostics, locate, Diagnostic, Position};
pub use session::EditSession;
pub use text::{from_text, to_text, to_text_with, TextOptions};
