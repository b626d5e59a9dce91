#![deny(missing_docs)]

//! # Schema Inference
//!
//! Walks a decoded payload and produces the OpenAPI schema describing its shape.
//!
//! Only the structural type of each node is captured, plus the original leaf
//! value as `example` when requested. Arrays are described by their first
//! element alone; later elements are not reconciled.

use indexmap::IndexMap;
use serde::Serialize;
use serde_yaml::Value;
use std::fmt::Display;
use tracing::warn;

/// The `type` keyword values the inferencer can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// A mapping.
    Object,
    /// A sequence.
    Array,
    /// A string, or a `null` leaf.
    String,
    /// A whole number.
    Integer,
    /// A floating point number.
    Number,
    /// A boolean.
    Boolean,
    /// A scalar kind with no OpenAPI counterpart (e.g. a YAML tagged value).
    #[serde(rename = "")]
    Unknown,
}

impl SchemaType {
    /// The literal written to the `type` keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::Object => "object",
            SchemaType::Array => "array",
            SchemaType::String => "string",
            SchemaType::Integer => "integer",
            SchemaType::Number => "number",
            SchemaType::Boolean => "boolean",
            SchemaType::Unknown => "",
        }
    }
}

impl Display for SchemaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An inferred OpenAPI Schema Object.
///
/// Serializes its fields in the order `type`, `properties`, `items`, `example`,
/// omitting those that are absent. The default node serializes to `{}`, which is
/// what an empty array's `items` becomes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaNode {
    /// The `type` keyword.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    /// Object members, in payload order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, SchemaNode>>,
    /// Array element schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,
    /// The source leaf value. Never set on object or array nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

impl SchemaNode {
    /// A leaf node with only a type.
    pub fn leaf(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Self::default()
        }
    }

    /// Attaches an example value.
    pub fn with_example(mut self, example: Value) -> Self {
        self.example = Some(example);
        self
    }

    /// An object node with the given properties.
    pub fn object(properties: IndexMap<String, SchemaNode>) -> Self {
        Self {
            schema_type: Some(SchemaType::Object),
            properties: Some(properties),
            ..Self::default()
        }
    }

    /// An array node with the given item schema.
    pub fn array(items: SchemaNode) -> Self {
        Self {
            schema_type: Some(SchemaType::Array),
            items: Some(Box::new(items)),
            ..Self::default()
        }
    }

    /// Returns true when no keyword is set (`{}`).
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Infers the schema of a decoded payload.
///
/// # Arguments
///
/// * `value` - The decoded JSON/YAML value.
/// * `generate_example` - Whether leaves carry their source value as `example`.
pub fn infer_schema(value: &Value, generate_example: bool) -> SchemaNode {
    match value {
        Value::Mapping(mapping) => {
            let mut properties = IndexMap::with_capacity(mapping.len());
            for (key, member) in mapping {
                match property_name(key) {
                    Some(name) => {
                        properties.insert(name, infer_schema(member, generate_example));
                    }
                    None => warn!(key = ?key, "skipping property with a non-scalar key"),
                }
            }
            SchemaNode::object(properties)
        }
        Value::Sequence(items) => match items.first() {
            Some(first) => SchemaNode::array(infer_schema(first, generate_example)),
            None => SchemaNode::array(SchemaNode::default()),
        },
        Value::Tagged(tagged) => {
            warn!(tag = %tagged.tag, value = ?tagged.value, "unknown type");
            leaf(SchemaType::Unknown, value.clone(), generate_example)
        }
        scalar => {
            let (schema_type, example) = scalar_type(scalar);
            leaf(schema_type, example, generate_example)
        }
    }
}

/// Maps an untagged scalar to its type and example.
///
/// `null` is described as a string with an empty-string example. Integers
/// outside the i64/u64 range are already floats once decoded and map to
/// `number`.
fn scalar_type(value: &Value) -> (SchemaType, Value) {
    match value {
        Value::Null => (SchemaType::String, Value::String(String::new())),
        Value::String(_) => (SchemaType::String, value.clone()),
        // Booleans come first: they must never be read as integers.
        Value::Bool(_) => (SchemaType::Boolean, value.clone()),
        Value::Number(n) if n.is_i64() || n.is_u64() => (SchemaType::Integer, value.clone()),
        Value::Number(_) => (SchemaType::Number, value.clone()),
        other => {
            warn!(value = ?other, "unknown type");
            (SchemaType::Unknown, other.clone())
        }
    }
}

fn leaf(schema_type: SchemaType, example: Value, generate_example: bool) -> SchemaNode {
    let node = SchemaNode::leaf(schema_type);
    if generate_example {
        node.with_example(example)
    } else {
        node
    }
}

/// Property names must be strings; YAML allows other scalar keys, which are
/// rendered as their plain text.
fn property_name(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn test_scalar_types_with_examples() {
        let cases = [
            ("\"abc\"", SchemaType::String),
            ("true", SchemaType::Boolean),
            ("42", SchemaType::Integer),
            ("-7", SchemaType::Integer),
            ("3.5", SchemaType::Number),
        ];
        for (text, expected) in cases {
            let value = yaml(text);
            let schema = infer_schema(&value, true);
            assert_eq!(schema, SchemaNode::leaf(expected).with_example(value));
        }
    }

    #[test]
    fn test_scalar_types_without_examples() {
        let schema = infer_schema(&yaml("false"), false);
        assert_eq!(schema, SchemaNode::leaf(SchemaType::Boolean));
        assert!(schema.example.is_none());
    }

    #[test]
    fn test_boolean_is_not_integer() {
        let schema = infer_schema(&Value::Bool(true), false);
        assert_eq!(schema.schema_type, Some(SchemaType::Boolean));
    }

    #[test]
    fn test_null_becomes_empty_string_example() {
        let schema = infer_schema(&Value::Null, true);
        assert_eq!(
            schema,
            SchemaNode::leaf(SchemaType::String).with_example(Value::String(String::new()))
        );
    }

    #[test]
    fn test_object_preserves_key_order() {
        let schema = infer_schema(&yaml("zeta: 1\nalpha: a\nmid: 2.5"), false);
        let properties = schema.properties.as_ref().unwrap();
        let keys: Vec<&str> = properties.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(schema.schema_type, Some(SchemaType::Object));
        assert!(schema.example.is_none());
        assert_eq!(properties["mid"], SchemaNode::leaf(SchemaType::Number));
    }

    #[test]
    fn test_array_uses_first_element_only() {
        let schema = infer_schema(&yaml("[1, \"two\", {three: 3}]"), true);
        assert_eq!(
            schema,
            SchemaNode::array(SchemaNode::leaf(SchemaType::Integer).with_example(yaml("1")))
        );
    }

    #[test]
    fn test_empty_array_has_empty_items() {
        let schema = infer_schema(&yaml("[]"), true);
        assert_eq!(schema.schema_type, Some(SchemaType::Array));
        assert!(schema.items.as_ref().unwrap().is_empty());
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            serde_json::json!({"type": "array", "items": {}})
        );
    }

    #[test]
    fn test_empty_object_has_empty_properties() {
        let schema = infer_schema(&yaml("{}"), true);
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            serde_json::json!({"type": "object", "properties": {}})
        );
    }

    #[test]
    fn test_nested_containers_carry_no_example() {
        let schema = infer_schema(&yaml("tags:\n  - name: x\n"), true);
        let rendered = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            rendered,
            serde_json::json!({
                "type": "object",
                "properties": {
                    "tags": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "name": {"type": "string", "example": "x"}
                            }
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_tagged_value_is_unknown_type() {
        let schema = infer_schema(&yaml("!custom 12"), false);
        assert_eq!(schema, SchemaNode::leaf(SchemaType::Unknown));
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            serde_json::json!({"type": ""})
        );
    }

    #[test]
    fn test_non_string_keys_are_stringified() {
        let schema = infer_schema(&yaml("200: ok\ntrue: yes"), false);
        let keys: Vec<String> = schema.properties.unwrap().into_keys().collect();
        assert_eq!(keys, vec!["200".to_string(), "true".to_string()]);
    }

    #[test]
    fn test_integer_beyond_u64_is_number() {
        let value = serde_yaml::to_value(
            serde_json::from_str::<serde_json::Value>("12345678901234567890123").unwrap(),
        )
        .unwrap();
        assert_eq!(
            infer_schema(&value, false),
            SchemaNode::leaf(SchemaType::Number)
        );
    }

    #[test]
    fn test_schema_type_display() {
        assert_eq!(SchemaType::Integer.to_string(), "integer");
        assert_eq!(SchemaType::Unknown.to_string(), "");
    }
}
