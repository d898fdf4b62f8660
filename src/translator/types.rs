use crate::athena::ColumnType;
use crate::avro::{LogicalType, Primitive};
use crate::error::UnsupportedSchemaError;

/// Map an Avro primitive to its Athena column type.
///
/// `null` has no column type of its own; it only makes a union nullable.
pub fn primitive_to_column_type(
    primitive: Primitive,
    path: &str,
) -> Result<ColumnType, UnsupportedSchemaError> {
    let column_type = match primitive {
        Primitive::String => ColumnType::String,
        Primitive::Int => ColumnType::Int,
        Primitive::Long => ColumnType::BigInt,
        Primitive::Boolean => ColumnType::Boolean,
        Primitive::Float => ColumnType::Float,
        Primitive::Double => ColumnType::Double,
        Primitive::Bytes => ColumnType::Binary,
        Primitive::Null => {
            return Err(UnsupportedSchemaError::StandaloneNull {
                path: path.to_string(),
            });
        }
    };
    Ok(column_type)
}

/// Column type for a logical type, `None` when the base type should be used.
pub fn logical_to_column_type(logical_type: &LogicalType) -> Option<ColumnType> {
    match logical_type {
        LogicalType::Decimal { precision, scale } => Some(ColumnType::Decimal {
            precision: *precision,
            scale: *scale,
        }),
        LogicalType::Date => Some(ColumnType::Date),
        LogicalType::TimestampMillis | LogicalType::TimestampMicros => Some(ColumnType::Timestamp),
        LogicalType::Other(_) => None,
    }
}
