//! `rollcall-core`: personal-record CSV pipeline.
//!
//! Pure engine crate: takes CSV text, returns normalized, deduplicated
//! records and per-stage discard counts. No filesystem access.

pub mod config;
pub mod dedup;
pub mod engine;
pub mod error;
pub mod model;
pub mod normalize;
pub mod reader;
pub mod writer;

pub use config::SchemaConfig;
pub use engine::run;
pub use error::PipelineError;
pub use model::{Birthdate, DiscardCounts, PersonRecord, PipelineOutput, StageOutcome, StructuralRecord};
