//! # avro2athena
//!
//! Generate [AWS Athena](https://aws.amazon.com/athena/) `CREATE EXTERNAL
//! TABLE` statements from [Apache Avro](https://avro.apache.org/) schemas
//! stored in a schema registry.
//!
//! ## Features
//!
//! - Maps Avro primitives, logical types (`decimal`, `date`,
//!   `timestamp-*`), arrays, maps, enums, fixed and nested records onto
//!   Hive column types
//! - Collapses `["null", T]` unions to `T` (Athena columns are nullable)
//! - Resolves references to named types defined earlier in the schema
//! - Splits partition columns out of the table body, in the order given
//! - Fetches the latest schema of a subject from a Confluent-compatible
//!   registry, or from a `file://` directory of `.avsc` files
//! - CLI tool `avro2athena`
//!
//! ## Example (Programmatic Usage)
//!
//! ```
//! use avro2athena::translator::translate;
//!
//! let schema = r#"{
//!     "type": "record",
//!     "name": "User",
//!     "fields": [
//!         {"name": "name", "type": "string"},
//!         {"name": "age", "type": ["null", "int"]},
//!         {"name": "country", "type": "string"}
//!     ]
//! }"#;
//!
//! let table = translate(schema, &["country"]).unwrap();
//! assert_eq!(avro2athena::ddl::column_list(&table.columns), "name string, age int");
//! assert_eq!(avro2athena::ddl::column_list(&table.partition_columns), "country string");
//! ```
//!
//! ## Example (CLI)
//!
//! ```bash
//! avro2athena http://localhost:8081 orders-value analytics orders s3://bucket/orders/ \
//!     --partition year month
//! ```
//!
//! ## Crate Layout
//!
//! - [`avro`] — Typed Avro schema tree (`AvroSchema`, `AvroField`)
//! - [`parser`] — Schema text → `AvroSchema`
//! - [`athena`] — Athena column types (`ColumnType`, `Column`)
//! - [`translator`] — Avro → Athena type mapping and partition extraction
//! - [`registry`] — Schema registry client
//! - [`ddl`] — `CREATE DATABASE` / `CREATE EXTERNAL TABLE` rendering
//! - [`config`], [`error`], [`common`] — Settings, error types, name helpers
//!
//! The CLI binary is enabled with the `cli` feature (on by default).
pub mod athena;
pub mod avro;
pub mod common;
pub mod config;
pub mod ddl;
pub mod error;
pub mod parser;
pub mod registry;
pub mod translator;

pub use error::{Error, RegistryError, Result, SchemaParseError, UnsupportedSchemaError};
