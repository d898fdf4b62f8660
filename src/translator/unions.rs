use crate::avro::AvroSchema;
use crate::error::UnsupportedSchemaError;

/// Return the concrete alternative of a `["null", T]` or `[T, "null"]` union.
///
/// Athena columns are always nullable, so the null alternative carries no
/// type information. Every other union shape is rejected.
pub fn nullable_alternative<'a>(
    alternatives: &'a [AvroSchema],
    path: &str,
) -> Result<&'a AvroSchema, UnsupportedSchemaError> {
    match alternatives {
        [first, second] if first.is_null() && !second.is_null() => Ok(second),
        [first, second] if second.is_null() && !first.is_null() => Ok(first),
        _ => Err(UnsupportedSchemaError::Union {
            path: path.to_string(),
            alternatives: alternatives.iter().map(AvroSchema::describe).collect(),
        }),
    }
}
