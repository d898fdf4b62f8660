//! Fetch the latest schema of a subject from a schema registry.

use reqwest::blocking::Client;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use url::Url;

use crate::config::{RegistryConfig, SCHEMA_FILE_EXTENSION};
use crate::error::RegistryError;

/// A schema as stored in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredSchema {
    pub subject: String,
    /// Not known for `file://` registries
    pub version: Option<i32>,
    pub id: Option<i32>,
    /// The schema literal, unchanged
    pub schema: String,
}

/// Body of `GET /subjects/{subject}/versions/latest`
#[derive(Debug, Deserialize)]
struct SchemaVersionResponse {
    subject: String,
    version: i32,
    id: i32,
    schema: String,
    #[serde(default = "default_schema_type", rename = "schemaType")]
    schema_type: String,
}

fn default_schema_type() -> String {
    "AVRO".to_string()
}

/// Fetch the latest version of `subject`.
///
/// `http`/`https` URLs talk to a Confluent-compatible registry; `file` URLs
/// read `<dir>/<subject>.avsc`. One blocking attempt, no retries.
pub fn fetch_latest_schema(
    config: &RegistryConfig,
    subject: &str,
) -> Result<RegisteredSchema, RegistryError> {
    let base = Url::parse(&config.url).map_err(|source| RegistryError::InvalidUrl {
        url: config.url.clone(),
        source,
    })?;

    let registered = match base.scheme() {
        "http" | "https" => fetch_from_http(config, &base, subject)?,
        "file" => fetch_from_directory(&base, subject)?,
        other => return Err(RegistryError::UnsupportedScheme(other.to_string())),
    };

    info!(
        subject = %registered.subject,
        version = ?registered.version,
        id = ?registered.id,
        "Fetched schema"
    );
    Ok(registered)
}

/// `{base}/subjects/{subject}/versions/latest`, with `subject` escaped as a
/// single path segment.
pub fn latest_version_url(base: &Url, subject: &str) -> Result<Url, RegistryError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| RegistryError::UnsupportedScheme(base.scheme().to_string()))?
        .pop_if_empty()
        .extend(["subjects", subject, "versions", "latest"]);
    Ok(url)
}

fn fetch_from_http(
    config: &RegistryConfig,
    base: &Url,
    subject: &str,
) -> Result<RegisteredSchema, RegistryError> {
    let url = latest_version_url(base, subject)?;
    let http_err = |source| RegistryError::Http {
        url: url.to_string(),
        source,
    };

    let client = Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(http_err)?;
    let resp = client.get(url.clone()).send().map_err(http_err)?;

    let status = resp.status();
    if !status.is_success() {
        let body = match resp.text() {
            Ok(body) => body,
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to read error response body");
                format!("<unreadable body: {e}>")
            }
        };
        return Err(RegistryError::Status {
            url: url.to_string(),
            status,
            body,
        });
    }

    let body: SchemaVersionResponse = resp.json().map_err(|source| RegistryError::Decode {
        url: url.to_string(),
        source,
    })?;
    into_registered(body)
}

fn into_registered(body: SchemaVersionResponse) -> Result<RegisteredSchema, RegistryError> {
    if !body.schema_type.eq_ignore_ascii_case("AVRO") {
        return Err(RegistryError::NotAvro {
            subject: body.subject,
            schema_type: body.schema_type,
        });
    }
    Ok(RegisteredSchema {
        subject: body.subject,
        version: Some(body.version),
        id: Some(body.id),
        schema: body.schema,
    })
}

/// Path of a subject's schema file inside a `file://` registry.
///
/// Subjects containing path separators or `..` are rejected.
pub fn schema_file_path(base: &Url, subject: &str) -> Result<PathBuf, RegistryError> {
    if subject.is_empty() || subject.contains(['/', '\\']) || subject.contains("..") {
        return Err(RegistryError::InvalidSubject(subject.to_string()));
    }
    let dir = base
        .to_file_path()
        .map_err(|_| RegistryError::UnsupportedScheme(base.to_string()))?;
    Ok(dir.join(format!("{subject}.{SCHEMA_FILE_EXTENSION}")))
}

fn fetch_from_directory(base: &Url, subject: &str) -> Result<RegisteredSchema, RegistryError> {
    let path = schema_file_path(base, subject)?;
    let schema = fs::read_to_string(&path).map_err(|source| RegistryError::File { path, source })?;
    Ok(RegisteredSchema {
        subject: subject.to_string(),
        version: None,
        id: None,
        schema,
    })
}
