//! Avro schema text → typed [`AvroSchema`] tree.

use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use tracing::warn;

use crate::avro::{AvroField, AvroSchema, EnumSchema, FixedSchema, LogicalType, Primitive, RecordSchema};
use crate::common::names::{fullname, is_valid_fullname, is_valid_name, namespace_of, reference_candidates};
use crate::config::MAX_DECIMAL_PRECISION;
use crate::error::SchemaParseError;

type ParseResult<T> = Result<T, SchemaParseError>;

/// Named types seen so far while walking one schema document.
#[derive(Debug, Default)]
struct ParserState {
    /// Completed named types by full name
    named_types: HashMap<String, AvroSchema>,
    /// Records whose fields are still being parsed
    defining: HashSet<String>,
}

/// Parse Avro schema text (canonical JSON form).
pub fn parse_schema(text: &str) -> ParseResult<AvroSchema> {
    let json: Value = serde_json::from_str(text)
        .map_err(|e| SchemaParseError::new("$", format!("not valid JSON: {e}")))?;
    parse_value(&json)
}

/// Parse an already decoded Avro schema document.
pub fn parse_value(json: &Value) -> ParseResult<AvroSchema> {
    let mut state = ParserState::default();
    state.parse(json, "", "$")
}

impl ParserState {
    fn parse(&mut self, json: &Value, namespace: &str, path: &str) -> ParseResult<AvroSchema> {
        match json {
            Value::String(name) => Ok(self.resolve_name(name, namespace)),
            Value::Array(alternatives) => self.parse_union(alternatives, namespace, path),
            Value::Object(obj) => self.parse_object(obj, namespace, path),
            other => Err(SchemaParseError::new(
                path,
                format!("expected a type name, union or object, got {other}"),
            )),
        }
    }

    fn resolve_name(&self, name: &str, namespace: &str) -> AvroSchema {
        if let Some(primitive) = Primitive::from_name(name) {
            return AvroSchema::Primitive(primitive);
        }
        for candidate in reference_candidates(name, namespace) {
            if let Some(schema) = self.named_types.get(&candidate) {
                return schema.clone();
            }
            if self.defining.contains(&candidate) {
                return AvroSchema::Recursive(candidate);
            }
        }
        AvroSchema::Reference(name.to_string())
    }

    fn parse_union(&mut self, alternatives: &[Value], namespace: &str, path: &str) -> ParseResult<AvroSchema> {
        let mut parsed = Vec::with_capacity(alternatives.len());
        for (idx, alternative) in alternatives.iter().enumerate() {
            let alt_path = format!("{path}[{idx}]");
            if alternative.is_array() {
                return Err(SchemaParseError::new(alt_path, "unions may not immediately contain other unions"));
            }
            parsed.push(self.parse(alternative, namespace, &alt_path)?);
        }
        Ok(AvroSchema::Union(parsed))
    }

    fn parse_object(&mut self, obj: &Map<String, Value>, namespace: &str, path: &str) -> ParseResult<AvroSchema> {
        let type_path = format!("{path}.type");
        let type_name = match obj.get("type") {
            Some(Value::String(s)) => s.as_str(),
            // `{"type": {...}}` / `{"type": [...]}` wrap another schema
            Some(nested @ (Value::Object(_) | Value::Array(_))) => {
                return self.parse(nested, namespace, &type_path);
            }
            Some(other) => {
                return Err(SchemaParseError::new(type_path, format!("expected a string, got {other}")));
            }
            None => return Err(SchemaParseError::new(path, "missing 'type' attribute")),
        };

        let base = match type_name {
            "record" | "error" => return self.parse_record(obj, namespace, path),
            "enum" => self.parse_enum(obj, namespace, path)?,
            "fixed" => self.parse_fixed(obj, namespace, path)?,
            "array" => {
                let items = obj
                    .get("items")
                    .ok_or_else(|| SchemaParseError::new(path, "array is missing 'items'"))?;
                AvroSchema::Array(Box::new(self.parse(items, namespace, &format!("{path}.items"))?))
            }
            "map" => {
                let values = obj
                    .get("values")
                    .ok_or_else(|| SchemaParseError::new(path, "map is missing 'values'"))?;
                AvroSchema::Map(Box::new(self.parse(values, namespace, &format!("{path}.values"))?))
            }
            other => self.resolve_name(other, namespace),
        };

        match obj.get("logicalType") {
            Some(Value::String(logical)) => Ok(refine(base, logical, obj, path)),
            Some(other) => Err(SchemaParseError::new(
                format!("{path}.logicalType"),
                format!("expected a string, got {other}"),
            )),
            None => Ok(base),
        }
    }

    /// Resolve the full name of a named type and make sure it is new.
    fn define_name(&self, obj: &Map<String, Value>, namespace: &str, path: &str) -> ParseResult<String> {
        let name = obj
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| SchemaParseError::new(path, "named type is missing a string 'name'"))?;
        let own_namespace = match obj.get("namespace") {
            Some(Value::String(ns)) => Some(ns.as_str()),
            Some(Value::Null) | None => None,
            Some(other) => {
                return Err(SchemaParseError::new(
                    format!("{path}.namespace"),
                    format!("expected a string, got {other}"),
                ));
            }
        };
        let full = fullname(name, own_namespace, namespace);
        if !is_valid_fullname(&full) {
            return Err(SchemaParseError::new(format!("{path}.name"), format!("invalid Avro name '{full}'")));
        }
        if Primitive::from_name(&full).is_some() {
            return Err(SchemaParseError::new(
                format!("{path}.name"),
                format!("'{full}' redefines a primitive type"),
            ));
        }
        if self.named_types.contains_key(&full) || self.defining.contains(&full) {
            return Err(SchemaParseError::new(
                format!("{path}.name"),
                format!("named type '{full}' is defined more than once"),
            ));
        }
        Ok(full)
    }

    fn parse_record(&mut self, obj: &Map<String, Value>, namespace: &str, path: &str) -> ParseResult<AvroSchema> {
        let name = self.define_name(obj, namespace, path)?;
        let fields_json = obj
            .get("fields")
            .and_then(Value::as_array)
            .ok_or_else(|| SchemaParseError::new(path, "record is missing a 'fields' array"))?;

        self.defining.insert(name.clone());
        let record_namespace = namespace_of(&name).to_string();
        let mut fields: Vec<AvroField> = Vec::with_capacity(fields_json.len());
        for (idx, field) in fields_json.iter().enumerate() {
            let field_path = format!("{path}.fields[{idx}]");
            let field = self.parse_field(field, &record_namespace, &field_path)?;
            if fields.iter().any(|f| f.name == field.name) {
                return Err(SchemaParseError::new(
                    format!("{field_path}.name"),
                    format!("duplicate field name '{}'", field.name),
                ));
            }
            fields.push(field);
        }
        self.defining.remove(&name);

        let record = AvroSchema::Record(RecordSchema {
            name: name.clone(),
            fields,
        });
        self.named_types.insert(name, record.clone());
        Ok(record)
    }

    fn parse_field(&mut self, json: &Value, namespace: &str, path: &str) -> ParseResult<AvroField> {
        let obj = json
            .as_object()
            .ok_or_else(|| SchemaParseError::new(path, "record field must be an object"))?;
        let name = obj
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| SchemaParseError::new(path, "field is missing a string 'name'"))?;
        if !is_valid_name(name) {
            return Err(SchemaParseError::new(format!("{path}.name"), format!("invalid Avro name '{name}'")));
        }
        let field_type = obj
            .get("type")
            .ok_or_else(|| SchemaParseError::new(path, format!("field '{name}' is missing 'type'")))?;
        Ok(AvroField {
            name: name.to_string(),
            schema: self.parse(field_type, namespace, &format!("{path}.type"))?,
        })
    }

    fn parse_enum(&mut self, obj: &Map<String, Value>, namespace: &str, path: &str) -> ParseResult<AvroSchema> {
        let name = self.define_name(obj, namespace, path)?;
        let symbols_path = format!("{path}.symbols");
        let symbols_json = obj
            .get("symbols")
            .and_then(Value::as_array)
            .ok_or_else(|| SchemaParseError::new(path, "enum is missing a 'symbols' array"))?;
        let mut symbols = Vec::with_capacity(symbols_json.len());
        for symbol in symbols_json {
            match symbol.as_str() {
                Some(s) if is_valid_name(s) => symbols.push(s.to_string()),
                _ => {
                    return Err(SchemaParseError::new(
                        symbols_path,
                        format!("invalid enum symbol {symbol}"),
                    ));
                }
            }
        }
        let schema = AvroSchema::Enum(EnumSchema { name: name.clone(), symbols });
        self.named_types.insert(name, schema.clone());
        Ok(schema)
    }

    fn parse_fixed(&mut self, obj: &Map<String, Value>, namespace: &str, path: &str) -> ParseResult<AvroSchema> {
        let name = self.define_name(obj, namespace, path)?;
        let size = obj
            .get("size")
            .and_then(Value::as_u64)
            .ok_or_else(|| SchemaParseError::new(path, "fixed is missing a non-negative integer 'size'"))?;
        let schema = AvroSchema::Fixed(FixedSchema { name: name.clone(), size });
        self.named_types.insert(name, schema.clone());
        Ok(schema)
    }
}

/// Attach a logical type to its base, downgrading annotations that do not
/// apply to [`LogicalType::Other`].
fn refine(base: AvroSchema, logical: &str, obj: &Map<String, Value>, path: &str) -> AvroSchema {
    let logical_type = match (logical, &base) {
        ("decimal", AvroSchema::Primitive(Primitive::Bytes) | AvroSchema::Fixed(_)) => decimal_attributes(obj)
            .map(|(precision, scale)| LogicalType::Decimal { precision, scale })
            .unwrap_or_else(|reason| {
                warn!(path, reason, "Ignoring invalid decimal logical type");
                LogicalType::Other(logical.to_string())
            }),
        ("date", AvroSchema::Primitive(Primitive::Int)) => LogicalType::Date,
        ("timestamp-millis", AvroSchema::Primitive(Primitive::Long)) => LogicalType::TimestampMillis,
        ("timestamp-micros", AvroSchema::Primitive(Primitive::Long)) => LogicalType::TimestampMicros,
        ("decimal" | "date" | "timestamp-millis" | "timestamp-micros", _) => {
            warn!(
                path,
                logical_type = logical,
                base = %base.describe(),
                "Ignoring logical type on an incompatible base type"
            );
            LogicalType::Other(logical.to_string())
        }
        _ => LogicalType::Other(logical.to_string()),
    };
    AvroSchema::Logical {
        logical_type,
        base: Box::new(base),
    }
}

/// Read `precision` and `scale` of a decimal, `scale` defaulting to 0.
fn decimal_attributes(obj: &Map<String, Value>) -> Result<(u32, u32), &'static str> {
    let precision = obj
        .get("precision")
        .and_then(Value::as_u64)
        .and_then(|p| u32::try_from(p).ok())
        .filter(|p| *p > 0)
        .ok_or("precision must be a positive integer")?;
    if precision > MAX_DECIMAL_PRECISION {
        return Err("precision must not exceed 38");
    }
    let scale = match obj.get("scale") {
        None => 0,
        Some(scale) => scale
            .as_u64()
            .and_then(|s| u32::try_from(s).ok())
            .ok_or("scale must be a non-negative integer")?,
    };
    if scale > precision {
        return Err("scale must not exceed precision");
    }
    Ok((precision, scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_fields(schema: &AvroSchema) -> &[AvroField] {
        match schema {
            AvroSchema::Record(r) => &r.fields,
            other => panic!("expected a record, got {other:?}"),
        }
    }

    #[test]
    fn parses_primitive_shorthand_and_object_forms() {
        assert_eq!(parse_schema(r#""long""#).unwrap(), AvroSchema::Primitive(Primitive::Long));
        assert_eq!(
            parse_value(&json!({"type": "string"})).unwrap(),
            AvroSchema::Primitive(Primitive::String)
        );
    }

    #[test]
    fn rejects_invalid_json() {
        let err = parse_schema("{not json").unwrap_err();
        assert_eq!(err.path, "$");
        assert!(err.message.contains("not valid JSON"));
    }

    #[test]
    fn reports_missing_attributes_with_paths() {
        let err = parse_value(&json!({"type": "record", "name": "R", "fields": [{"name": "a"}]})).unwrap_err();
        assert_eq!(err.path, "$.fields[0]");

        let err = parse_value(&json!({"type": "record", "name": "R"})).unwrap_err();
        assert!(err.message.contains("'fields'"));

        let err = parse_value(&json!({
            "type": "record", "name": "R",
            "fields": [{"name": "a", "type": {"type": "array"}}]
        }))
        .unwrap_err();
        assert_eq!(err.path, "$.fields[0].type");

        let err = parse_value(&json!({"name": "R"})).unwrap_err();
        assert!(err.message.contains("'type'"));

        assert!(parse_value(&json!(42)).is_err());
    }

    #[test]
    fn rejects_nested_unions_and_duplicate_fields() {
        assert!(parse_value(&json!(["null", ["int", "long"]])).is_err());

        let err = parse_value(&json!({
            "type": "record", "name": "R",
            "fields": [{"name": "a", "type": "int"}, {"name": "a", "type": "long"}]
        }))
        .unwrap_err();
        assert!(err.message.contains("duplicate field name 'a'"));
    }

    #[test]
    fn rejects_invalid_names_and_redefinitions() {
        assert!(parse_value(&json!({"type": "record", "name": "bad-name", "fields": []})).is_err());
        assert!(parse_value(&json!({"type": "fixed", "name": "int", "size": 4})).is_err());

        let err = parse_value(&json!({
            "type": "record", "name": "R",
            "fields": [
                {"name": "a", "type": {"type": "enum", "name": "E", "symbols": ["X"]}},
                {"name": "b", "type": {"type": "enum", "name": "E", "symbols": ["Y"]}}
            ]
        }))
        .unwrap_err();
        assert!(err.message.contains("defined more than once"));
    }

    #[test]
    fn resolves_named_type_references() {
        let schema = parse_value(&json!({
            "type": "record", "name": "Order", "namespace": "shop",
            "fields": [
                {"name": "billing", "type": {
                    "type": "record", "name": "Address",
                    "fields": [{"name": "city", "type": "string"}]
                }},
                {"name": "shipping", "type": "Address"},
                {"name": "backup", "type": "shop.Address"}
            ]
        }))
        .unwrap();
        let fields = record_fields(&schema);
        assert_eq!(fields[0].schema, fields[1].schema);
        assert_eq!(fields[0].schema, fields[2].schema);
        match &fields[1].schema {
            AvroSchema::Record(r) => assert_eq!(r.name, "shop.Address"),
            other => panic!("expected record, got {other:?}"),
        }
    }

    #[test]
    fn marks_unknown_and_recursive_references() {
        let schema = parse_value(&json!({
            "type": "record", "name": "Node",
            "fields": [
                {"name": "next", "type": ["null", "Node"]},
                {"name": "payload", "type": "Missing"}
            ]
        }))
        .unwrap();
        let fields = record_fields(&schema);
        assert_eq!(
            fields[0].schema,
            AvroSchema::Union(vec![
                AvroSchema::Primitive(Primitive::Null),
                AvroSchema::Recursive("Node".to_string()),
            ])
        );
        assert_eq!(fields[1].schema, AvroSchema::Reference("Missing".to_string()));
    }

    #[test]
    fn reads_decimal_attributes() {
        let schema = parse_value(&json!({"type": "bytes", "logicalType": "decimal", "precision": 10, "scale": 2})).unwrap();
        assert_eq!(
            schema,
            AvroSchema::Logical {
                logical_type: LogicalType::Decimal { precision: 10, scale: 2 },
                base: Box::new(AvroSchema::Primitive(Primitive::Bytes)),
            }
        );

        let schema = parse_value(&json!({
            "type": "fixed", "name": "Money", "size": 8,
            "logicalType": "decimal", "precision": 18
        }))
        .unwrap();
        match schema {
            AvroSchema::Logical { logical_type, .. } => {
                assert_eq!(logical_type, LogicalType::Decimal { precision: 18, scale: 0 })
            }
            other => panic!("expected logical, got {other:?}"),
        }
    }

    #[test]
    fn downgrades_inapplicable_logical_types() {
        for json in [
            json!({"type": "bytes", "logicalType": "decimal", "scale": 2}),
            json!({"type": "bytes", "logicalType": "decimal", "precision": 2, "scale": 4}),
            json!({"type": "bytes", "logicalType": "decimal", "precision": 0}),
            json!({"type": "bytes", "logicalType": "decimal", "precision": 50, "scale": 2}),
            json!({"type": "string", "logicalType": "date"}),
            json!({"type": "int", "logicalType": "timestamp-millis"}),
        ] {
            match parse_value(&json).unwrap() {
                AvroSchema::Logical { logical_type, .. } => {
                    assert!(matches!(logical_type, LogicalType::Other(_)), "{json}")
                }
                other => panic!("expected logical, got {other:?}"),
            }
        }
    }

    #[test]
    fn accepts_decimal_precision_up_to_38() {
        let schema = parse_value(&json!({"type": "bytes", "logicalType": "decimal", "precision": 38, "scale": 38}));
        assert!(matches!(
            schema.unwrap(),
            AvroSchema::Logical { logical_type: LogicalType::Decimal { precision: 38, scale: 38 }, .. }
        ));
    }

    #[test]
    fn ignores_doc_attributes() {
        let documented = parse_value(&json!({
            "type": "record", "name": "R", "doc": "a record",
            "fields": [{"name": "a", "type": "int", "doc": "a field"}]
        }))
        .unwrap();
        let plain = parse_value(&json!({
            "type": "record", "name": "R",
            "fields": [{"name": "a", "type": "int"}]
        }))
        .unwrap();
        assert_eq!(documented, plain);
    }
}
