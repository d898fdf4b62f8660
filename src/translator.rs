//! Avro schema → Athena column translation.
//!
//! [`map_type`] maps a single schema node to a [`ColumnType`];
//! [`extract_columns`] walks a top-level record and splits its fields into
//! body and partition columns.
//!
//! [`ColumnType`]: crate::athena::ColumnType

pub mod columns;
pub mod conversion;
pub mod structs;
pub mod types;
pub mod unions;

pub use columns::extract_columns;
pub use conversion::map_type;

use crate::athena::TableColumns;
use crate::error::Result;
use crate::parser::parse_schema;

/// Parse schema text and extract its table columns.
///
/// `partitions` lists the fields that become partition columns, in the
/// order they should appear in the `PARTITIONED BY` clause.
pub fn translate<S: AsRef<str>>(schema_text: &str, partitions: &[S]) -> Result<TableColumns> {
    let schema = parse_schema(schema_text)?;
    Ok(extract_columns(&schema, partitions)?)
}
