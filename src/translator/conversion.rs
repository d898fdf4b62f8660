use tracing::trace;

use crate::athena::ColumnType;
use crate::avro::AvroSchema;
use crate::error::UnsupportedSchemaError;
use crate::translator::structs::{array_of, map_of, struct_type};
use crate::translator::types::{logical_to_column_type, primitive_to_column_type};
use crate::translator::unions::nullable_alternative;

/// Map one Avro schema node to an Athena column type.
///
/// `path` is the dotted path of the field holding the node; it only
/// appears in errors. Array items and map values extend it with `.items`
/// and `.values`.
pub fn map_type(schema: &AvroSchema, path: &str) -> Result<ColumnType, UnsupportedSchemaError> {
    let column_type = match schema {
        AvroSchema::Primitive(primitive) => primitive_to_column_type(*primitive, path)?,
        AvroSchema::Logical { logical_type, base } => match logical_to_column_type(logical_type) {
            Some(column_type) => column_type,
            None => map_type(base, path)?,
        },
        AvroSchema::Union(alternatives) => map_type(nullable_alternative(alternatives, path)?, path)?,
        AvroSchema::Array(items) => array_of(map_type(items, &format!("{path}.items"))?),
        AvroSchema::Map(values) => map_of(map_type(values, &format!("{path}.values"))?),
        AvroSchema::Record(record) => struct_type(record, path)?,
        AvroSchema::Enum(_) => ColumnType::String,
        AvroSchema::Fixed(_) => ColumnType::Binary,
        AvroSchema::Reference(tag) => {
            return Err(UnsupportedSchemaError::UnknownType {
                path: path.to_string(),
                tag: tag.clone(),
            });
        }
        AvroSchema::Recursive(name) => {
            return Err(UnsupportedSchemaError::RecursiveType {
                path: path.to_string(),
                name: name.clone(),
            });
        }
    };
    trace!(path, column_type = %column_type, "Mapped Avro type");
    Ok(column_type)
}
