//! Engine spec dataset - maps an engine identifier to its published figures
//!
//! The table is embedded at build time and parsed once at startup. Nothing
//! mutates it afterwards; lookups of unknown identifiers are reported as
//! errors instead of faulting.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Engine table shipped with the page
const BUILTIN_TABLE: &str = include_str!("../data/engines.toml");

#[derive(Error, Debug)]
pub enum SpecError {
    #[error("Unknown engine: {0}")]
    UnknownEngine(String),
    #[error("Failed to parse engine table: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// A single engine variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSpec {
    /// Historical engine codes fitted under this badge (e.g., ["M54B30"])
    pub code: Vec<String>,
    /// Power in hp
    pub power: u32,
    /// Torque in Nm
    pub torque: u32,
    /// 0-100 km/h in seconds
    pub zero100: f64,
    /// Combined fuel economy in L/100km
    pub economy: f64,
    /// Free-text character note
    pub note: String,
}

/// On-disk layout of the engine table
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EngineTable {
    #[serde(default)]
    engine: BTreeMap<String, EngineSpec>,
}

/// Read-only mapping from engine identifier to its spec record
///
/// Serializes as a plain JSON object keyed by identifier, which is what the
/// export envelope embeds verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecDataset {
    engines: BTreeMap<String, EngineSpec>,
}

impl SpecDataset {
    /// Parse the table embedded in the binary
    pub fn builtin() -> Result<Self, SpecError> {
        Self::from_toml_str(BUILTIN_TABLE)
    }

    /// Parse an engine table in TOML form
    pub fn from_toml_str(content: &str) -> Result<Self, SpecError> {
        let table: EngineTable = toml::from_str(content)?;
        tracing::debug!("Parsed engine table with {} entries", table.engine.len());
        Ok(Self {
            engines: table.engine,
        })
    }

    /// Look up an engine by identifier
    pub fn get(&self, key: &str) -> Result<&EngineSpec, SpecError> {
        self.engines
            .get(key)
            .ok_or_else(|| SpecError::UnknownEngine(key.to_string()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.engines.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EngineSpec)> {
        self.engines.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table() {
        let dataset = SpecDataset::builtin().unwrap();
        assert_eq!(dataset.len(), 7);

        let keys: Vec<&str> = dataset.keys().collect();
        for key in ["318i", "320i", "325i", "330i", "330i-zhp", "320d", "330xd"] {
            assert!(keys.contains(&key), "missing {}", key);
        }
    }

    #[test]
    fn test_builtin_330i() {
        let dataset = SpecDataset::builtin().unwrap();
        let e = dataset.get("330i").unwrap();
        assert_eq!(e.code, vec!["M54B30".to_string()]);
        assert_eq!(e.power, 225);
        assert_eq!(e.torque, 300);
        assert_eq!(e.zero100, 6.5);
        assert_eq!(e.economy, 8.6);
        assert_eq!(e.note, "Strong all‑rounder");
    }

    #[test]
    fn test_unknown_engine() {
        let dataset = SpecDataset::builtin().unwrap();
        match dataset.get("m3-csl") {
            Err(SpecError::UnknownEngine(key)) => assert_eq!(key, "m3-csl"),
            other => panic!("expected UnknownEngine, got {:?}", other),
        }
    }

    #[test]
    fn test_from_toml_str() {
        let content = r#"
            [engine.test]
            code = ["X1", "X2"]
            power = 100
            torque = 150
            zero100 = 11.5
            economy = 6.0
            note = "Test"
        "#;
        let dataset = SpecDataset::from_toml_str(content).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.get("test").unwrap().code.len(), 2);
    }

    #[test]
    fn test_stray_top_level_key_rejected() {
        let content = "version = \"1.0\"\n\n[engine.test]\ncode = []\npower = 1\ntorque = 1\nzero100 = 1.0\neconomy = 1.0\nnote = \"\"\n";
        let result = SpecDataset::from_toml_str(content);
        assert!(matches!(result, Err(SpecError::ParseError(_))));
    }

    #[test]
    fn test_malformed_table() {
        let result = SpecDataset::from_toml_str("[engine.bad]\npower = \"lots\"\n");
        assert!(matches!(result, Err(SpecError::ParseError(_))));
    }
}
