//! Build manifest — records what a run produced, from which configuration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current manifest format version.
pub const FORMAT_VERSION: u32 = 1;

/// One exported artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestOutput {
    /// File name relative to the output directory.
    pub file: String,
    /// Export format ("stl", "step", "dxf").
    pub format: String,
}

/// The manifest written next to the exported files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildManifest {
    /// Format identifier.
    pub format: String,
    /// Format version number.
    pub version: u32,
    /// When the build ran.
    pub generated: DateTime<Utc>,
    /// Configuration files that fed the merged document, in merge order.
    pub config_sources: Vec<String>,
    /// Configuration keys that matched no declared field.
    pub dropped_keys: Vec<String>,
    /// The artifacts this run wrote.
    pub outputs: Vec<ManifestOutput>,
}

impl BuildManifest {
    pub fn new(config_sources: Vec<String>, dropped_keys: Vec<String>) -> Self {
        Self {
            format: "casegen".to_string(),
            version: FORMAT_VERSION,
            generated: Utc::now(),
            config_sources,
            dropped_keys,
            outputs: Vec::new(),
        }
    }

    pub fn record(&mut self, file: impl Into<String>, format: impl Into<String>) {
        self.outputs.push(ManifestOutput {
            file: file.into(),
            format: format.into(),
        });
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).expect("manifest serialization should never fail")
    }
}
