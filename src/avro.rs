/// Avro primitive type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
}

impl Primitive {
    pub const ALL: [Primitive; 8] = [
        Primitive::Null,
        Primitive::Boolean,
        Primitive::Int,
        Primitive::Long,
        Primitive::Float,
        Primitive::Double,
        Primitive::Bytes,
        Primitive::String,
    ];

    /// Look up a primitive by its Avro type name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Null => "null",
            Primitive::Boolean => "boolean",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Bytes => "bytes",
            Primitive::String => "string",
        }
    }
}

/// A logical refinement over a base type.
///
/// Annotations that do not apply to their base (wrong base type, invalid
/// decimal attributes) are kept as [`LogicalType::Other`] so the base type
/// is used instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogicalType {
    Decimal { precision: u32, scale: u32 },
    Date,
    TimestampMillis,
    TimestampMicros,
    Other(String),
}

impl LogicalType {
    pub fn name(&self) -> &str {
        match self {
            LogicalType::Decimal { .. } => "decimal",
            LogicalType::Date => "date",
            LogicalType::TimestampMillis => "timestamp-millis",
            LogicalType::TimestampMicros => "timestamp-micros",
            LogicalType::Other(name) => name.as_str(),
        }
    }
}

/// A parsed Avro schema.
///
/// Named types referenced after their definition are inlined. References
/// that could not be resolved stay as [`AvroSchema::Reference`]; references
/// to a record from inside its own definition become
/// [`AvroSchema::Recursive`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvroSchema {
    Primitive(Primitive),
    Logical {
        logical_type: LogicalType,
        base: Box<AvroSchema>,
    },
    Record(RecordSchema),
    Enum(EnumSchema),
    Fixed(FixedSchema),
    Array(Box<AvroSchema>),
    Map(Box<AvroSchema>),
    Union(Vec<AvroSchema>),
    Reference(String),
    Recursive(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    /// Fully qualified name (`namespace.name`)
    pub name: String,
    pub fields: Vec<AvroField>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvroField {
    pub name: String,
    pub schema: AvroSchema,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSchema {
    pub name: String,
    pub symbols: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedSchema {
    pub name: String,
    pub size: u64,
}

impl AvroSchema {
    /// Short description of the node, used in error messages.
    pub fn describe(&self) -> String {
        match self {
            AvroSchema::Primitive(p) => p.name().to_string(),
            AvroSchema::Logical { logical_type, base } => {
                format!("{}({})", logical_type.name(), base.describe())
            }
            AvroSchema::Record(r) => format!("record {}", r.name),
            AvroSchema::Enum(e) => format!("enum {}", e.name),
            AvroSchema::Fixed(f) => format!("fixed {}", f.name),
            AvroSchema::Array(_) => "array".to_string(),
            AvroSchema::Map(_) => "map".to_string(),
            AvroSchema::Union(alternatives) => {
                let names: Vec<String> = alternatives.iter().map(|a| a.describe()).collect();
                format!("union [{}]", names.join(", "))
            }
            AvroSchema::Reference(name) | AvroSchema::Recursive(name) => name.clone(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AvroSchema::Primitive(Primitive::Null))
    }
}
