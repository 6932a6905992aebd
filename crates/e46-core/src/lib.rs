//! E46 Core - Dataset, formatting and widget state for the E46 showcase
//!
//! This crate holds everything the showcase page does that does not need a
//! browser or a GPU:
//! - The engine spec dataset, parsed from an embedded TOML table
//! - Performance card formatting with fixed units
//! - Widget state machines (tab groups, one-shot reveals, lightbox, back-to-top)
//! - The JSON export envelope
//! - Page configuration

pub mod config;
pub mod engine;
pub mod export;
pub mod perf;
pub mod widgets;

pub use config::{ConfigError, DomConfig, ExportConfig, PageConfig, ViewerConfig, WidgetConfig};
pub use engine::{EngineSpec, SpecDataset, SpecError};
pub use export::{Chassis, ExportEnvelope, ExportError, EXPORT_FILENAME, EXPORT_MIME_TYPE};
pub use perf::{perf_fields, perf_fields_for, SpecField, PERF_FIELD_COUNT};
