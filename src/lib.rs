//! Core library for the resource-tools command line application.
//!
//! The library merges several independently maintained resource tables into
//! one deduplicated, tagged master table. Table loading and writing live
//! under [`io`], the record shape in [`model`], the per-source readers in
//! [`adapters`], the merge rules in [`store`], and the staged run in
//! [`pipeline`]. [`consolidate`] ties them to a data directory.

pub mod adapters;
pub mod consolidate;
pub mod error;
pub mod extract;
pub mod io;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod store;
pub mod summary;
pub mod table;
pub mod tagging;

pub use error::{Result, ToolError};
pub use model::EntityRecord;
pub use pipeline::{Consolidation, Pipeline, Stage};
pub use store::RecordStore;
pub use table::SourceTables;
