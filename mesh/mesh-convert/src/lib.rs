//! STL → OBJ conversion: per-file pipeline, output naming, and batch runs.
//!
//! A conversion job runs these stages in order:
//!
//! 1. load the STL ([`mesh_io::load_stl`]), flattening multi-solid files
//! 2. optionally weld coincident vertices ([`mesh_repair::merge_vertices`])
//! 3. orient, scale and centre ([`mesh_transform::TransformPipeline`])
//! 4. optionally clean up ([`mesh_repair::MeshCleaner`])
//! 5. write the OBJ and summarise it ([`mesh_measure::MeshStats`])
//!
//! [`OutputNamer`] decides where each output goes before anything runs, and
//! [`BatchConverter`] drives the jobs with progress events and cancellation.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use mesh_convert::{
//!     collect_inputs, BatchConverter, BatchEvent, ConvertOptions, NamingMode, OutputNamer,
//! };
//!
//! let inputs = collect_inputs(["scans/"]);
//! let jobs = OutputNamer::new(NamingMode::Suffix, None).resolve(&inputs).unwrap();
//!
//! let batch = BatchConverter::new(jobs.into(), Arc::new(ConvertOptions::default()));
//! let handle = batch.spawn().unwrap();
//! for event in handle.events.iter() {
//!     if let BatchEvent::Log(text) = event {
//!         println!("{text}");
//!     }
//! }
//! handle.wait();
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod batch;
mod config;
mod convert;
mod error;
mod inputs;
mod naming;
mod options;

pub use batch::{
    BatchConverter, BatchEvent, BatchHandle, BatchState, CancelHandle, EventSink, FnSink,
};
pub use config::{ConvertConfig, NamingConfig, NamingKind};
pub use convert::{convert_one, preview, ConvertReport, Converter};
pub use error::{ConfigError, ConfigResult, ConvertError, ConvertResult, NamingError};
pub use inputs::collect_inputs;
pub use naming::{ConversionJob, NamingMode, OutputNamer, CONVERTED_SUFFIX, OUTPUT_EXTENSION};
pub use options::{ConvertOptions, ScalePreset};
