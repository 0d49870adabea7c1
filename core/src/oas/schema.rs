#![deny(missing_docs)]

//! # Schema Nodes
//!
//! The schema tagged union consumed by the schema compiler. A node is either
//! the boolean literal `true` ("any value") or an object carrying whichever
//! recognized fields the document supplied; [`SchemaNode::kind`] classifies a
//! node into the closed [`SchemaKind`] variants in the compiler's priority
//! order, so the compiler can match exhaustively.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Number;

/// One schema node: the literal `true`/`false`, or a schema object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SchemaNode {
    /// Boolean schema literal. `true` admits any value.
    Bool(bool),
    /// A schema object.
    Object(Box<Schema>),
}

/// A schema object with every field the compiler recognizes.
///
/// Fields are all optional; which ones are meaningful depends on the
/// classified [`SchemaKind`]. Unknown fields are ignored on input.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Pointer to a named schema; wins over every other field.
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    /// Human-readable description, split into constraint notes.
    pub description: Option<String>,
    /// Value flows server -> client only.
    pub read_only: Option<bool>,
    /// Value flows client -> server only.
    pub write_only: Option<bool>,
    /// Exactly-one-of composition.
    pub one_of: Option<Vec<SchemaNode>>,
    /// Any-of composition.
    pub any_of: Option<Vec<SchemaNode>>,
    /// All-of composition.
    pub all_of: Option<Vec<SchemaNode>>,
    /// Primitive/structured type tag.
    #[serde(rename = "type")]
    pub schema_type: Option<String>,
    /// Format qualifier (`binary`, `int64`, `date-time`, ...).
    pub format: Option<String>,
    /// Enumerated string values.
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<String>>,

    // Numeric constraints.
    /// The value must be a multiple of this number.
    pub multiple_of: Option<Number>,
    /// Inclusive lower bound.
    pub minimum: Option<Number>,
    /// Inclusive upper bound.
    pub maximum: Option<Number>,

    // String constraints.
    /// Minimum length in characters.
    pub min_length: Option<u64>,
    /// Maximum length in characters.
    pub max_length: Option<u64>,
    /// Regular expression the value must match.
    pub pattern: Option<String>,

    // Object constraints.
    /// Declared properties, in document order.
    pub properties: Option<IndexMap<String, SchemaNode>>,
    /// Names of the required properties.
    pub required: Option<Vec<String>>,
    /// Schema for undeclared properties; `false` forbids them.
    pub additional_properties: Option<Box<SchemaNode>>,
    /// Minimum number of properties.
    pub min_properties: Option<u64>,
    /// Maximum number of properties.
    pub max_properties: Option<u64>,

    // Array constraints.
    /// Item schema.
    pub items: Option<Box<SchemaNode>>,
    /// Minimum number of items.
    pub min_items: Option<u64>,
    /// Maximum number of items.
    pub max_items: Option<u64>,
    /// Items must be pairwise distinct.
    #[serde(default)]
    pub unique_items: bool,
}

/// Closed classification of a schema node, in compilation priority order.
///
/// The order of the checks in [`SchemaNode::kind`] is part of the engine's
/// contract: a node carrying several tags compiles as the first matching
/// variant.
#[derive(Debug, Clone, Copy)]
pub enum SchemaKind<'a> {
    /// Literal `true`: any value.
    Any,
    /// `$ref` pointer.
    Reference(&'a str),
    /// `oneOf` members.
    OneOf(&'a [SchemaNode]),
    /// `anyOf` members.
    AnyOf(&'a [SchemaNode]),
    /// `allOf` members.
    AllOf(&'a [SchemaNode]),
    /// No recognized tag and no `type`; defensive fallback.
    Untyped,
    /// `type: integer`.
    Integer(&'a Schema),
    /// `type: number`.
    Number(&'a Schema),
    /// `type: string`.
    String(&'a Schema),
    /// `type: boolean`.
    Boolean,
    /// `type: object`.
    Object(&'a Schema),
    /// `type: array`.
    Array(&'a Schema),
    /// Any other `type` value; fatal for the compiler.
    Unknown(&'a str),
}

impl SchemaNode {
    /// Classifies this node for the compiler.
    ///
    /// The boolean literal `false` admits no value at all; it lands on the
    /// same defensive `Untyped` fallback as a tagless object.
    pub fn kind(&self) -> SchemaKind<'_> {
        let schema = match self {
            SchemaNode::Bool(true) => return SchemaKind::Any,
            SchemaNode::Bool(false) => return SchemaKind::Untyped,
            SchemaNode::Object(schema) => schema,
        };
        if let Some(reference) = &schema.reference {
            return SchemaKind::Reference(reference);
        }
        if let Some(members) = &schema.one_of {
            return SchemaKind::OneOf(members);
        }
        if let Some(members) = &schema.any_of {
            return SchemaKind::AnyOf(members);
        }
        if let Some(members) = &schema.all_of {
            return SchemaKind::AllOf(members);
        }
        match schema.schema_type.as_deref() {
            None => SchemaKind::Untyped,
            Some("integer") => SchemaKind::Integer(schema),
            Some("number") => SchemaKind::Number(schema),
            Some("string") => SchemaKind::String(schema),
            Some("boolean") => SchemaKind::Boolean,
            Some("object") => SchemaKind::Object(schema),
            Some("array") => SchemaKind::Array(schema),
            Some(other) => SchemaKind::Unknown(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(value: serde_json::Value) -> SchemaNode {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_literal_true_is_any() {
        assert!(matches!(node(serde_json::json!(true)).kind(), SchemaKind::Any));
    }

    #[test]
    fn test_ref_wins_over_type() {
        let schema = node(serde_json::json!({
            "$ref": "#/components/schemas/User",
            "type": "object"
        }));
        assert!(matches!(
            schema.kind(),
            SchemaKind::Reference("#/components/schemas/User")
        ));
    }

    #[test]
    fn test_one_of_wins_over_type() {
        let schema = node(serde_json::json!({
            "oneOf": [{ "type": "string" }],
            "type": "string"
        }));
        assert!(matches!(schema.kind(), SchemaKind::OneOf(members) if members.len() == 1));
    }

    #[test]
    fn test_missing_type_is_untyped() {
        let schema = node(serde_json::json!({ "description": "free-form" }));
        assert!(matches!(schema.kind(), SchemaKind::Untyped));
    }

    #[test]
    fn test_unknown_type_is_reported() {
        let schema = node(serde_json::json!({ "type": "tuple" }));
        assert!(matches!(schema.kind(), SchemaKind::Unknown("tuple")));
    }

    #[test]
    fn test_constraint_fields_parse() {
        let schema = node(serde_json::json!({
            "type": "string",
            "minLength": 2,
            "maxLength": 10,
            "pattern": "^[a-z]+$",
            "enum": ["cat", "dog"]
        }));
        let SchemaNode::Object(schema) = schema else {
            panic!("Expected object schema");
        };
        assert_eq!(schema.min_length, Some(2));
        assert_eq!(schema.max_length, Some(10));
        assert_eq!(schema.pattern.as_deref(), Some("^[a-z]+$"));
        assert_eq!(
            schema.enum_values,
            Some(vec!["cat".to_string(), "dog".to_string()])
        );
    }
}
