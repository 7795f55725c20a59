//! Pipeline configuration.

use serde::{Deserialize, Serialize};

/// Schema version stamped onto every extracted record.
pub const SCHEMA_VERSION: &str = "1.0";

/// Top-level Scrumsight configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrumsightConfig {
    /// Version tag written into `TeamStats.schema_version`.
    pub schema_version: String,
    /// Weight per-section confidence by how many fields fell back.
    pub weighted_confidence: bool,
    /// Hard cap on accepted upload size in bytes.
    pub max_file_bytes: usize,
}

impl ScrumsightConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Self {
        let weighted_confidence = std::env::var("SCRUMSIGHT_WEIGHTED_CONFIDENCE")
            .map(|v| v != "0")
            .unwrap_or(true);

        let max_file_bytes = std::env::var("SCRUMSIGHT_MAX_FILE_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10 * 1024 * 1024);

        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            weighted_confidence,
            max_file_bytes,
        }
    }
}

impl Default for ScrumsightConfig {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            weighted_confidence: true,
            max_file_bytes: 10 * 1024 * 1024,
        }
    }
}
