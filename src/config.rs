//! Settings for fetching schemas and rendering table statements.

use std::time::Duration;

pub const DEFAULT_REGISTRY_URL: &str = "http://localhost:8081";

/// Timeout for the single registry request
pub const DEFAULT_REGISTRY_TIMEOUT: Duration = Duration::from_secs(30);

/// Extension of schema files in a `file://` registry directory
pub const SCHEMA_FILE_EXTENSION: &str = "avsc";

/// Largest `decimal(P,S)` precision Athena accepts
pub const MAX_DECIMAL_PRECISION: u32 = 38;

// ============================================================================
// Hive Avro storage classes
// ============================================================================

pub const AVRO_SERDE: &str = "org.apache.hadoop.hive.serde2.avro.AvroSerDe";

pub const AVRO_INPUT_FORMAT: &str = "org.apache.hadoop.hive.ql.io.avro.AvroContainerInputFormat";

pub const AVRO_OUTPUT_FORMAT: &str = "org.apache.hadoop.hive.ql.io.avro.AvroContainerOutputFormat";

/// SerDe property holding the writer schema
pub const AVRO_SCHEMA_LITERAL_PROPERTY: &str = "avro.schema.literal";

/// Where to fetch schemas from.
///
/// `url` is either a Confluent-compatible registry (`http`/`https`) or a
/// `file://` directory holding one `<subject>.avsc` file per subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    pub url: String,
    pub timeout: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REGISTRY_URL.to_string(),
            timeout: DEFAULT_REGISTRY_TIMEOUT,
        }
    }
}

impl RegistryConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Identity and location of the external table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub database: String,
    pub table: String,
    /// Storage location, e.g. `s3://bucket/folder/`
    pub location: String,
}
