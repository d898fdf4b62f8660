use std::collections::HashMap;
use tracing::debug;

use crate::athena::{Column, TableColumns};
use crate::avro::AvroSchema;
use crate::error::UnsupportedSchemaError;
use crate::translator::conversion::map_type;

/// Split the fields of a top-level record into body and partition columns.
///
/// Body columns keep the record's declaration order. Partition columns
/// follow the order of `partitions`, which must name distinct fields of the
/// record.
pub fn extract_columns<S: AsRef<str>>(
    schema: &AvroSchema,
    partitions: &[S],
) -> Result<TableColumns, UnsupportedSchemaError> {
    let record = match schema {
        AvroSchema::Record(record) => record,
        other => {
            return Err(UnsupportedSchemaError::NonRecordRoot {
                kind: other.describe(),
            });
        }
    };

    let mut partition_slots: HashMap<&str, usize> = HashMap::with_capacity(partitions.len());
    for (idx, name) in partitions.iter().enumerate() {
        let name = name.as_ref();
        if partition_slots.insert(name, idx).is_some() {
            return Err(UnsupportedSchemaError::DuplicatePartition {
                name: name.to_string(),
            });
        }
    }

    let mut columns = Vec::with_capacity(record.fields.len());
    let mut partition_columns: Vec<Option<Column>> = vec![None; partitions.len()];
    for field in &record.fields {
        let column = Column::new(field.name.as_str(), map_type(&field.schema, &field.name)?);
        match partition_slots.get(field.name.as_str()) {
            Some(&slot) => {
                debug!(column = %column.definition(), slot, "Partition column");
                partition_columns[slot] = Some(column);
            }
            None => {
                debug!(column = %column.definition(), "Column");
                columns.push(column);
            }
        }
    }

    let partition_columns = partition_columns
        .into_iter()
        .zip(partitions)
        .map(|(column, name)| {
            column.ok_or_else(|| UnsupportedSchemaError::MissingPartition {
                name: name.as_ref().to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TableColumns {
        columns,
        partition_columns,
    })
}
