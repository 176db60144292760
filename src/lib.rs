// THEORY:
// This file is the main entry point for the `samosa_vision` library crate.
// It follows the standard Rust convention of using `lib.rs` to define the public
// API that will be exposed to external consumers (like the CLI runner or a
// windowed host application).
//
// The primary goal is to export the `DetectionPipeline` and its associated data
// structures (`PipelineConfig`, `Report`, etc.) as the clean, high-level
// interface for the entire measurement engine. The lower-level building blocks
// (`core_modules`) remain public for callers that only need one piece, such as
// the classifier predicate or the area arithmetic, without the session state
// the pipeline carries.

pub mod background;
pub mod core_modules;
pub mod logger;
pub mod pipeline;
