//! Athena DDL statements for an Avro-backed external table.

use crate::athena::{Column, TableColumns};
use crate::config::{
    TableConfig, AVRO_INPUT_FORMAT, AVRO_OUTPUT_FORMAT, AVRO_SCHEMA_LITERAL_PROPERTY, AVRO_SERDE,
};

/// `CREATE DATABASE IF NOT EXISTS <database>;`
pub fn create_database_statement(database: &str) -> String {
    format!("CREATE DATABASE IF NOT EXISTS {database};")
}

/// `CREATE EXTERNAL TABLE` statement reading Avro files with the Hive Avro
/// SerDe. The schema literal is embedded as the SerDe's reader schema.
pub fn create_table_statement(
    table: &TableConfig,
    columns: &TableColumns,
    schema_literal: &str,
) -> String {
    let mut ddl = String::new();
    ddl.push_str("CREATE EXTERNAL TABLE IF NOT EXISTS\n");
    ddl.push_str(&format!("`{}`.`{}`\n", table.database, table.table));
    ddl.push_str(&format!("({})\n", column_list(&columns.columns)));
    if !columns.partition_columns.is_empty() {
        ddl.push_str(&format!(
            "PARTITIONED BY ({})\n",
            column_list(&columns.partition_columns)
        ));
    }
    ddl.push_str(&format!("ROW FORMAT SERDE '{AVRO_SERDE}'\n"));
    ddl.push_str(&format!(
        "WITH SERDEPROPERTIES ('{AVRO_SCHEMA_LITERAL_PROPERTY}'='{}')\n",
        escape_literal(schema_literal)
    ));
    ddl.push_str(&format!("STORED AS INPUTFORMAT '{AVRO_INPUT_FORMAT}'\n"));
    ddl.push_str(&format!("OUTPUTFORMAT '{AVRO_OUTPUT_FORMAT}'\n"));
    ddl.push_str(&format!("LOCATION '{}';", table.location));
    ddl
}

/// `name type, name type, ...`
pub fn column_list(columns: &[Column]) -> String {
    columns
        .iter()
        .map(Column::definition)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Keep a value inside a single-quoted SQL string.
fn escape_literal(value: &str) -> String {
    value.replace('\'', "\\'")
}
