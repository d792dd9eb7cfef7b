//! Core data model for the cleave partitioner.
//!
//! Cleave splits one dynamically-typed guest program into two mutually
//! distrusting partitions (a trusted enclave image and its untrusted host)
//! from a prior per-function trust classification. This crate holds the
//! read-only model that classification produces and the downstream
//! generators consume.
//!
//! ## Modules
//!
//! - [`trust`] — Trust labels and the explicit emission-side selector
//! - [`types`] — Guest value types crossing the boundary
//! - [`function`] — Classified function records and signature formatting
//! - [`registry`] — Read-only view over the four classification outputs
//! - [`manifest`] — `.toml` classification manifest parsing

pub mod error;
pub mod function;
pub mod manifest;
pub mod registry;
pub mod trust;
pub mod types;

// Re-export key types for convenience
pub use error::CoreError;
pub use function::FunctionRecord;
pub use manifest::ClassificationManifest;
pub use registry::FunctionRegistry;
pub use trust::{Side, TrustLabel};
pub use types::GuestType;
