//! Boundary glue generation for the cleave partitioner.
//!
//! From a classified [`cleave_core::FunctionRegistry`] and the program's
//! isolated main source, this crate emits the two partition program units
//! and the native glue each needs to call functions owned by the other
//! side: entry points, proxy declarations, transition-routine bodies, the
//! boundary descriptor, and per-side reflection configuration.
//!
//! The central correctness property: for every function crossing the
//! boundary, the entry point, the proxy, and the transition routine carry
//! identical parameter lists, because all three are derived from the same
//! registry traversal and never re-derived independently.
//!
//! ## Modules
//!
//! - [`writer`] — Append-only structured code writer
//! - [`plan`] — Per-side local/remote partition plans
//! - [`wrapper`] — Guest-language wrapper snippets
//! - [`unit`] — Per-side program units
//! - [`native`] — Native transition modules and proxy headers
//! - [`descriptor`] — Boundary descriptor (ecall/ocall signatures)
//! - [`reflect`] — Per-side reflection configuration
//! - [`sink`] — Artifact sinks (atomic directory writes, in-memory)
//! - [`pipeline`] — Linear generation pipeline

pub mod descriptor;
pub mod error;
pub mod native;
pub mod pipeline;
pub mod plan;
pub mod reflect;
pub mod sink;
pub mod unit;
pub mod wrapper;
pub mod writer;

// Re-export key types for convenience
pub use descriptor::BoundaryDescriptor;
pub use error::CodegenError;
pub use pipeline::{full_image, partition, GenerationReport};
pub use plan::PartitionPlan;
pub use sink::{Artifact, ArtifactSink, DirectorySink, MemorySink};
pub use writer::CodeWriter;
