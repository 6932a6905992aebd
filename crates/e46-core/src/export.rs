//! JSON export envelope
//!
//! The export bundles the engine dataset with a few fixed facts about the
//! car. The payload is pretty-printed with two-space indentation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::SpecDataset;

/// Download name used when the envelope is saved
pub const EXPORT_FILENAME: &str = "bmw-e46-sedan-black-specs.json";

/// MIME type of the saved payload
pub const EXPORT_MIME_TYPE: &str = "application/json";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Static chassis descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chassis {
    pub steering: String,
    pub balance: String,
    pub suspension: Vec<String>,
}

impl Default for Chassis {
    fn default() -> Self {
        Self {
            steering: "hydraulic".to_string(),
            balance: "50:50".to_string(),
            suspension: vec!["MacPherson".to_string(), "Z‑axle".to_string()],
        }
    }
}

/// Everything written to the export file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportEnvelope {
    pub model: String,
    pub colors: Vec<String>,
    pub engines: SpecDataset,
    pub chassis: Chassis,
    pub years: String,
}

impl ExportEnvelope {
    /// Wrap a dataset with the fixed model facts
    pub fn new(engines: SpecDataset) -> Self {
        Self {
            model: "BMW E46 Sedan".to_string(),
            colors: vec![
                "Schwarz II (668)".to_string(),
                "Black Sapphire (475)".to_string(),
            ],
            engines,
            chassis: Chassis::default(),
            years: "1998–2005".to_string(),
        }
    }

    /// Pretty-printed JSON payload
    pub fn to_pretty_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a previously exported payload
    pub fn from_json(content: &str) -> Result<Self, ExportError> {
        Ok(serde_json::from_str(content)?)
    }
}
