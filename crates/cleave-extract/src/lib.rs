//! Source body extraction for the cleave partitioner.
//!
//! Everything in a guest program that is *not* inside a function definition
//! is "main source": it becomes the body of the generated main routine.
//! This crate isolates that remainder and minifies source for embedding in
//! generated string literals. Both capabilities dispatch on a guest
//! language tag; strategies are variants, not subclasses.
//!
//! ## Modules
//!
//! - [`language`] — Guest language tag
//! - [`isolate`] — Remainder extraction (brace-counted and sentinel variants)
//! - [`minify`] — Per-language minification

pub mod error;
pub mod isolate;
pub mod language;
pub mod minify;

pub use error::ExtractError;
pub use isolate::{isolate_main_source, PYTHON_FUNC_END};
pub use language::GuestLanguage;
pub use minify::minify;
