use crate::athena::{ColumnType, StructField};
use crate::avro::RecordSchema;
use crate::error::UnsupportedSchemaError;
use crate::translator::conversion::map_type;

/// Path of a field inside its parent, dot separated.
pub fn field_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

/// Compose a nested record into a single `struct<...>` type.
///
/// Fields keep their declaration order and names.
pub fn struct_type(record: &RecordSchema, path: &str) -> Result<ColumnType, UnsupportedSchemaError> {
    let fields = record
        .fields
        .iter()
        .map(|field| {
            Ok(StructField {
                name: field.name.clone(),
                data_type: map_type(&field.schema, &field_path(path, &field.name))?,
            })
        })
        .collect::<Result<Vec<_>, UnsupportedSchemaError>>()?;
    Ok(ColumnType::Struct(fields))
}

pub fn array_of(items: ColumnType) -> ColumnType {
    ColumnType::Array(Box::new(items))
}

pub fn map_of(values: ColumnType) -> ColumnType {
    ColumnType::Map(Box::new(values))
}
