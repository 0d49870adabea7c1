#![deny(missing_docs)]

//! # Schema Compiler
//!
//! Recursively converts a schema node into a TypeScript type expression plus
//! collected human-readable constraint notes, and renders the result either
//! as a top-level definition or as an object property.
//!
//! The branch order in [`compile_schema`] is part of the engine's contract:
//! literal `true`, `$ref`, `oneOf`, `anyOf`, `allOf`, the defensive
//! missing-`type` fallback, then dispatch on `type`.

use crate::diagnostics::Diagnostics;
use crate::error::{AppError, AppResult};
use crate::naming::{entity_name, escape_key, indent_block, parenthesize};
use crate::oas::resolver::schema_ref_name;
use crate::oas::schema::{Schema, SchemaKind, SchemaNode};
use crate::oas::OpenApi;

/// Suffix marking a nullable union member on a compiled type expression.
const NULLABLE_SUFFIX: &str = " | null";

/// How a compiled definition renders at the top level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeKind {
    /// `export type Name = ...`.
    TypeAlias,
    /// `export interface Name { ... }`.
    Interface,
    /// `export interface Name extends Parents { ... }`.
    InterfaceExtending(Vec<String>),
}

/// Compiler output for one schema node; consumed immediately by the writer.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDefinition {
    /// The compiled type expression.
    pub text: String,
    /// Constraint notes, rendered as a doc comment.
    pub notes: Vec<String>,
    /// Enumerated values, when the node is a string enum.
    pub enum_values: Option<Vec<String>>,
    /// Rendering shape for top-level definitions.
    pub shape: ShapeKind,
}

/// Compiles a schema node into its type expression only.
pub fn compile_type(
    node: &SchemaNode,
    optional: bool,
    treat_optional_as_partial: bool,
    diagnostics: &mut Diagnostics,
) -> AppResult<String> {
    Ok(compile_schema(node, optional, treat_optional_as_partial, diagnostics)?.text)
}

/// Compiles a schema node into an [`EntityDefinition`].
///
/// `optional` appends the nullable-union marker to the expression;
/// `treat_optional_as_partial` switches nested object properties to the
/// `key?:` encoding instead.
pub fn compile_schema(
    node: &SchemaNode,
    optional: bool,
    treat_optional_as_partial: bool,
    diagnostics: &mut Diagnostics,
) -> AppResult<EntityDefinition> {
    let or_null = if optional { NULLABLE_SUFFIX } else { "" };
    let mut notes = collect_common_notes(node);

    match node.kind() {
        // The literal `true` and `$ref` cases carry no notes, whatever else
        // the node declares.
        SchemaKind::Any => Ok(EntityDefinition {
            text: "any".to_string(),
            notes: Vec::new(),
            enum_values: None,
            shape: ShapeKind::TypeAlias,
        }),

        SchemaKind::Reference(reference) => Ok(EntityDefinition {
            text: format!("{}{}", schema_ref_name(reference)?, or_null),
            notes: Vec::new(),
            enum_values: None,
            shape: ShapeKind::TypeAlias,
        }),

        SchemaKind::OneOf(members) | SchemaKind::AnyOf(members) => {
            let mut parts = Vec::new();
            for member in members {
                parts.push(parenthesize(&compile_type(member, false, false, diagnostics)?));
            }
            Ok(EntityDefinition {
                text: format!("{}{}", parts.join(" | "), or_null),
                notes,
                enum_values: None,
                shape: ShapeKind::TypeAlias,
            })
        }

        SchemaKind::AllOf(members) => {
            compile_all_of(members, optional, or_null, notes, diagnostics)
        }

        SchemaKind::Untyped => {
            diagnostics.warn(
                "Schema node without a recognized tag or 'type' key compiled to 'null'",
            );
            Ok(EntityDefinition {
                text: "null".to_string(),
                notes,
                enum_values: None,
                shape: ShapeKind::TypeAlias,
            })
        }

        SchemaKind::Integer(schema) | SchemaKind::Number(schema) => {
            if let Some(multiple) = &schema.multiple_of {
                notes.push(format!("This number should be a multiple of {}", multiple));
            } else if schema.schema_type.as_deref() == Some("integer") {
                notes.push("This number should have no decimals".to_string());
            }
            if let Some(minimum) = &schema.minimum {
                notes.push(format!("This number should be {} or higher", minimum));
            }
            if let Some(maximum) = &schema.maximum {
                notes.push(format!("This number should be {} or lower", maximum));
            }
            if let Some(format) = &schema.format {
                notes.push(format!("This should be in the following format: {}", format));
            }
            Ok(EntityDefinition {
                text: format!("number{}", or_null),
                notes,
                enum_values: None,
                shape: ShapeKind::TypeAlias,
            })
        }

        SchemaKind::String(schema) => {
            let mut enum_values = None;
            let text = if let Some(values) = &schema.enum_values {
                enum_values = Some(values.clone());
                let union = values
                    .iter()
                    .map(|value| format!("'{}'", value))
                    .collect::<Vec<_>>()
                    .join(" | ");
                format!("{}{}", union, or_null)
            } else if schema.format.as_deref() == Some("binary") {
                format!("Blob{}", or_null)
            } else {
                if let Some(format) = &schema.format {
                    notes.push(format!("This should be in the following format: {}", format));
                }
                format!("string{}", or_null)
            };
            if let Some(min) = schema.min_length {
                notes.push(format!(
                    "This value should have a minimum of {} characters",
                    min
                ));
            }
            if let Some(max) = schema.max_length {
                notes.push(format!(
                    "This value should have a maximum of {} characters",
                    max
                ));
            }
            if let Some(pattern) = &schema.pattern {
                notes.push(format!(
                    "This value should match the following pattern: {}",
                    pattern
                ));
            }
            Ok(EntityDefinition {
                text,
                notes,
                enum_values,
                shape: ShapeKind::TypeAlias,
            })
        }

        SchemaKind::Boolean => Ok(EntityDefinition {
            text: format!("boolean{}", or_null),
            notes,
            enum_values: None,
            shape: ShapeKind::TypeAlias,
        }),

        SchemaKind::Object(schema) => compile_object(
            schema,
            or_null,
            treat_optional_as_partial,
            notes,
            diagnostics,
        ),

        SchemaKind::Array(schema) => {
            let item_type = match &schema.items {
                Some(items) => compile_type(items, false, false, diagnostics)?,
                // A bare `array` with no `items` admits any item.
                None => "any".to_string(),
            };
            if let Some(min) = schema.min_items {
                notes.push(format!("This value should have a minimum of {} items", min));
            }
            if let Some(max) = schema.max_items {
                notes.push(format!("This value should have a maximum of {} items", max));
            }
            if schema.unique_items {
                notes.push("This value should have unique items".to_string());
            }
            Ok(EntityDefinition {
                text: format!("{}[]{}", parenthesize(&item_type), or_null),
                notes,
                enum_values: None,
                shape: ShapeKind::TypeAlias,
            })
        }

        SchemaKind::Unknown(other) => Err(AppError::UnknownSchemaType(other.to_string())),
    }
}

/// Notes applying to every branch past the `$ref` check: description
/// paragraphs (split on blank lines) and read/write-only flow markers.
fn collect_common_notes(node: &SchemaNode) -> Vec<String> {
    let mut notes = Vec::new();
    let SchemaNode::Object(schema) = node else {
        return notes;
    };
    if let Some(description) = &schema.description {
        for paragraph in description.split("\n\n") {
            notes.push(paragraph.replace('\n', ""));
        }
    }
    if schema.read_only == Some(true) {
        notes.push("This value is server --> client only, and thus ignored by the server".to_string());
    }
    if schema.write_only == Some(true) {
        notes.push("This value is client --> server only, and thus ignored by the server".to_string());
    }
    notes
}

/// Compiles an `allOf` composition.
///
/// The simple case (every member a `$ref` or an inline object, result not
/// optional) becomes interface inheritance; anything else becomes a
/// type-level intersection.
fn compile_all_of(
    members: &[SchemaNode],
    optional: bool,
    or_null: &str,
    notes: Vec<String>,
    diagnostics: &mut Diagnostics,
) -> AppResult<EntityDefinition> {
    let simple = !optional
        && members.iter().all(|member| match member {
            SchemaNode::Object(schema) => {
                schema.reference.is_some() || schema.schema_type.as_deref() == Some("object")
            }
            SchemaNode::Bool(_) => false,
        });

    if simple {
        let mut parents = Vec::new();
        let mut base = EntityDefinition {
            text: String::new(),
            notes,
            enum_values: None,
            shape: ShapeKind::Interface,
        };
        for member in members {
            if let SchemaNode::Object(schema) = member {
                if let Some(reference) = &schema.reference {
                    parents.push(schema_ref_name(reference)?);
                    continue;
                }
            }
            base = compile_schema(member, false, false, diagnostics)?;
        }
        base.shape = if parents.is_empty() {
            ShapeKind::Interface
        } else {
            ShapeKind::InterfaceExtending(parents)
        };
        return Ok(base);
    }

    let mut parts = Vec::new();
    for member in members {
        parts.push(parenthesize(&compile_type(member, false, false, diagnostics)?));
    }
    let joined = parts.join(" & ");
    let text = if optional {
        format!("{}{}", parenthesize(&joined), or_null)
    } else {
        joined
    };
    Ok(EntityDefinition {
        text,
        notes,
        enum_values: None,
        shape: ShapeKind::TypeAlias,
    })
}

/// Compiles a `type: object` schema into an inline body or the catch-all
/// `JsonAny` when it declares no shape at all.
fn compile_object(
    schema: &Schema,
    or_null: &str,
    treat_optional_as_partial: bool,
    mut notes: Vec<String>,
    diagnostics: &mut Diagnostics,
) -> AppResult<EntityDefinition> {
    let mut body = String::from("{\n");
    if let Some(properties) = &schema.properties {
        for (key, value) in properties {
            let required = schema
                .required
                .as_ref()
                .is_some_and(|names| names.iter().any(|name| name == key));
            let property = compile_schema(value, !required, false, diagnostics)?;
            body.push_str(&format!(
                "\t{};\n",
                write_definition(key, &property, Some("\t"), treat_optional_as_partial)
            ));
        }
    }
    let additional = schema
        .additional_properties
        .as_deref()
        .filter(|ap| !matches!(ap, SchemaNode::Bool(false)));
    if let Some(ap) = additional {
        let compiled = compile_schema(ap, false, false, diagnostics)?;
        body.push_str(&format!(
            "\t{};\n",
            write_definition("[key: string]", &compiled, Some("\t"), false)
        ));
    }
    body.push('}');

    if let Some(min) = schema.min_properties {
        notes.push(format!("This value should have a minimum of {} items", min));
    }
    if let Some(max) = schema.max_properties {
        notes.push(format!("This value should have a maximum of {} items", max));
    }

    // No declared shape at all: collapse to the catch-all JSON type instead
    // of an empty interface body.
    if additional.is_none() && schema.properties.is_none() {
        return Ok(EntityDefinition {
            text: format!("JsonAny{}", or_null),
            notes,
            enum_values: None,
            shape: ShapeKind::TypeAlias,
        });
    }

    Ok(EntityDefinition {
        text: format!("{}{}", body, or_null),
        notes,
        enum_values: None,
        shape: ShapeKind::Interface,
    })
}

/// Renders a compiled definition.
///
/// With `padding` the output is a nested `key: type` entry (optionally with
/// the partial-optional encoding); without it the output is a top-level
/// `export` declaration, where a definition carrying enum values becomes a
/// named enumerated-constant block instead of a union alias.
pub fn write_definition(
    key: &str,
    definition: &EntityDefinition,
    padding: Option<&str>,
    map_optional_as_partial: bool,
) -> String {
    let mut text = definition.text.clone();
    let key_output = if padding.is_some() {
        if map_optional_as_partial && text.ends_with(NULLABLE_SUFFIX) {
            text.truncate(text.len() - NULLABLE_SUFFIX.len());
            format!("{}?: ", escape_key(key))
        } else {
            format!("{}: ", escape_key(key))
        }
    } else {
        match &definition.shape {
            ShapeKind::InterfaceExtending(parents) if !parents.is_empty() => {
                format!("export interface {} extends {} ", key, parents.join(", "))
            }
            ShapeKind::Interface | ShapeKind::InterfaceExtending(_) => {
                format!("export interface {} ", key)
            }
            ShapeKind::TypeAlias => format!("export type {} = ", key),
        }
    };

    let mut output = String::new();
    if padding.is_none() {
        output.push_str(&format!("// DEFINITION: {}\n", key));
    }
    if !definition.notes.is_empty() {
        output.push_str("/**\n");
        for note in &definition.notes {
            output.push_str(&format!(
                " * {}\n",
                indent_block(&note.replace("*/", "* /"), " * ")
            ));
        }
        output.push_str(" */\n");
    }
    match (&definition.enum_values, padding) {
        (Some(values), None) => {
            output.push_str(&format!("export enum {} {{\n", key));
            for value in values {
                output.push_str(&format!("\t{} = '{}',\n", escape_key(value), value));
            }
            output.push('}');
        }
        _ => {
            output.push_str(&key_output);
            output.push_str(&text);
        }
    }
    if let Some(pad) = padding {
        output = indent_block(&output, pad);
    }
    output
}

/// Renders every named schema under `components.schemas`, in document order,
/// joined by single newlines.
pub fn generate_definitions(
    document: &OpenApi,
    diagnostics: &mut Diagnostics,
) -> AppResult<String> {
    let Some(schemas) = document.components.as_ref().and_then(|c| c.schemas.as_ref()) else {
        return Ok(String::new());
    };
    let mut definitions = Vec::new();
    for (key, schema) in schemas {
        let compiled = compile_schema(schema, false, false, diagnostics)?;
        definitions.push(write_definition(&entity_name(key), &compiled, None, false));
    }
    Ok(definitions.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(value: serde_json::Value) -> SchemaNode {
        serde_json::from_value(value).unwrap()
    }

    fn compile(value: serde_json::Value, optional: bool) -> EntityDefinition {
        let mut diagnostics = Diagnostics::new();
        compile_schema(&node(value), optional, false, &mut diagnostics).unwrap()
    }

    #[test]
    fn test_compile_is_deterministic() {
        let schema = serde_json::json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "age": { "type": "integer", "minimum": 0 }
            },
            "required": ["name"]
        });
        let first = compile(schema.clone(), false);
        let second = compile(schema, false);
        assert_eq!(first, second);
    }

    #[test]
    fn test_literal_true() {
        let compiled = compile(serde_json::json!(true), false);
        assert_eq!(compiled.text, "any");
        assert!(compiled.notes.is_empty());
    }

    #[test]
    fn test_reference_with_nullable_marker() {
        let compiled = compile(serde_json::json!({ "$ref": "#/components/schemas/Pet" }), true);
        assert_eq!(compiled.text, "ApiPet | null");

        let compiled = compile(serde_json::json!({ "$ref": "#/components/schemas/Pet" }), false);
        assert_eq!(compiled.text, "ApiPet");
    }

    #[test]
    fn test_optional_nullable_invariant() {
        for value in [
            serde_json::json!({ "type": "string" }),
            serde_json::json!({ "type": "integer" }),
            serde_json::json!({ "type": "boolean" }),
            serde_json::json!({ "type": "array", "items": { "type": "string" } }),
        ] {
            assert!(compile(value.clone(), true).text.ends_with(" | null"));
            assert!(!compile(value, false).text.ends_with(" | null"));
        }
    }

    #[test]
    fn test_one_of_parenthesizes_complex_members() {
        let compiled = compile(
            serde_json::json!({
                "oneOf": [
                    { "type": "string" },
                    { "type": "array", "items": { "type": "string", "enum": ["a", "b"] } }
                ]
            }),
            false,
        );
        // The array member still carries punctuation, so it is wrapped a
        // second time when it joins the union.
        assert_eq!(compiled.text, "string | (('a' | 'b')[])");
    }

    #[test]
    fn test_any_of_matches_one_of_rendering() {
        let one_of = compile(
            serde_json::json!({ "oneOf": [{ "type": "string" }, { "type": "boolean" }] }),
            true,
        );
        let any_of = compile(
            serde_json::json!({ "anyOf": [{ "type": "string" }, { "type": "boolean" }] }),
            true,
        );
        assert_eq!(one_of.text, any_of.text);
        assert_eq!(one_of.text, "string | boolean | null");
    }

    #[test]
    fn test_simple_all_of_extends() {
        let compiled = compile(
            serde_json::json!({
                "allOf": [
                    { "$ref": "#/components/schemas/A" },
                    { "type": "object", "properties": { "x": { "type": "string" } }, "required": ["x"] }
                ]
            }),
            false,
        );
        assert_eq!(
            compiled.shape,
            ShapeKind::InterfaceExtending(vec!["ApiA".to_string()])
        );
        assert!(compiled.text.contains("x: string;"));

        let rendered = write_definition("ApiCombined", &compiled, None, false);
        assert!(rendered.contains("export interface ApiCombined extends ApiA {"));
    }

    #[test]
    fn test_optional_all_of_is_intersection() {
        let compiled = compile(
            serde_json::json!({
                "allOf": [
                    { "$ref": "#/components/schemas/A" },
                    { "$ref": "#/components/schemas/B" }
                ]
            }),
            true,
        );
        assert_eq!(compiled.text, "(ApiA & ApiB) | null");
        assert_eq!(compiled.shape, ShapeKind::TypeAlias);
    }

    #[test]
    fn test_missing_type_compiles_to_null_with_warning() {
        let mut diagnostics = Diagnostics::new();
        let compiled = compile_schema(
            &node(serde_json::json!({ "description": "mystery" })),
            false,
            false,
            &mut diagnostics,
        )
        .unwrap();
        assert_eq!(compiled.text, "null");
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_unknown_type_is_fatal() {
        let mut diagnostics = Diagnostics::new();
        let err =
            compile_schema(&node(serde_json::json!({ "type": "tuple" })), false, false, &mut diagnostics)
                .unwrap_err();
        assert!(matches!(err, AppError::UnknownSchemaType(t) if t == "tuple"));
    }

    #[test]
    fn test_number_notes() {
        let compiled = compile(
            serde_json::json!({ "type": "integer", "minimum": 0, "maximum": 10 }),
            false,
        );
        assert_eq!(compiled.text, "number");
        assert_eq!(
            compiled.notes,
            vec![
                "This number should have no decimals",
                "This number should be 0 or higher",
                "This number should be 10 or lower",
            ]
        );

        let compiled = compile(
            serde_json::json!({ "type": "number", "multipleOf": 0.5 }),
            false,
        );
        assert_eq!(compiled.notes, vec!["This number should be a multiple of 0.5"]);
    }

    #[test]
    fn test_string_enum_and_binary() {
        let compiled = compile(
            serde_json::json!({ "type": "string", "enum": ["on", "off"] }),
            false,
        );
        assert_eq!(compiled.text, "'on' | 'off'");
        assert_eq!(
            compiled.enum_values,
            Some(vec!["on".to_string(), "off".to_string()])
        );

        let compiled = compile(serde_json::json!({ "type": "string", "format": "binary" }), true);
        assert_eq!(compiled.text, "Blob | null");
    }

    #[test]
    fn test_object_scenario_pet() {
        let compiled = compile(
            serde_json::json!({
                "type": "object",
                "properties": { "name": { "type": "string" } },
                "required": ["name"]
            }),
            false,
        );
        let rendered = write_definition("ApiPet", &compiled, None, false);
        assert_eq!(
            rendered,
            "// DEFINITION: ApiPet\nexport interface ApiPet {\n\tname: string;\n}"
        );
    }

    #[test]
    fn test_object_optional_property_is_nullable() {
        let compiled = compile(
            serde_json::json!({
                "type": "object",
                "properties": { "nickname": { "type": "string" } }
            }),
            false,
        );
        assert!(compiled.text.contains("nickname: string | null;"));
    }

    #[test]
    fn test_partial_encoding_moves_null_to_key() {
        let mut diagnostics = Diagnostics::new();
        let compiled = compile_schema(
            &node(serde_json::json!({
                "type": "object",
                "properties": { "nickname": { "type": "string" } }
            })),
            false,
            true,
            &mut diagnostics,
        )
        .unwrap();
        assert!(compiled.text.contains("nickname?: string;"));
        assert!(!compiled.text.contains("nickname: string | null"));
    }

    #[test]
    fn test_object_without_shape_collapses() {
        let compiled = compile(serde_json::json!({ "type": "object" }), false);
        assert_eq!(compiled.text, "JsonAny");
        assert_eq!(compiled.shape, ShapeKind::TypeAlias);

        // additionalProperties: false still counts as undeclared shape.
        let compiled = compile(
            serde_json::json!({ "type": "object", "additionalProperties": false }),
            false,
        );
        assert_eq!(compiled.text, "JsonAny");
    }

    #[test]
    fn test_additional_properties_index_signature() {
        let compiled = compile(
            serde_json::json!({
                "type": "object",
                "additionalProperties": { "type": "integer" }
            }),
            false,
        );
        assert!(compiled.text.contains("[key: string]: number;"));
    }

    #[test]
    fn test_array_of_nullable_items_parenthesized() {
        let mut diagnostics = Diagnostics::new();
        let compiled = compile_schema(
            &node(serde_json::json!({
                "type": "array",
                "items": { "oneOf": [{ "type": "string" }, { "type": "number" }] },
                "uniqueItems": true
            })),
            false,
            false,
            &mut diagnostics,
        )
        .unwrap();
        assert_eq!(compiled.text, "(string | number)[]");
        assert_eq!(compiled.notes, vec!["This value should have unique items"]);
    }

    #[test]
    fn test_write_definition_enum_block() {
        let compiled = compile(
            serde_json::json!({ "type": "string", "enum": ["red", "green"] }),
            false,
        );
        let rendered = write_definition("ApiColor", &compiled, None, false);
        assert_eq!(
            rendered,
            "// DEFINITION: ApiColor\nexport enum ApiColor {\n\tred = 'red',\n\tgreen = 'green',\n}"
        );

        // Nested usage stays a plain union.
        let nested = write_definition("color", &compiled, Some("\t"), false);
        assert_eq!(nested, "color: 'red' | 'green'");
    }

    #[test]
    fn test_write_definition_escapes_doc_terminator() {
        let definition = EntityDefinition {
            text: "string".to_string(),
            notes: vec!["evil */ comment".to_string()],
            enum_values: None,
            shape: ShapeKind::TypeAlias,
        };
        let rendered = write_definition("ApiEvil", &definition, None, false);
        assert!(rendered.contains(" * evil * / comment\n"));
    }

    #[test]
    fn test_read_write_only_notes() {
        let compiled = compile(
            serde_json::json!({ "type": "string", "readOnly": true }),
            false,
        );
        assert_eq!(
            compiled.notes,
            vec!["This value is server --> client only, and thus ignored by the server"]
        );

        let compiled = compile(
            serde_json::json!({ "type": "string", "writeOnly": true }),
            false,
        );
        assert_eq!(
            compiled.notes,
            vec!["This value is client --> server only, and thus ignored by the server"]
        );
    }

    #[test]
    fn test_description_paragraphs_become_notes() {
        let compiled = compile(
            serde_json::json!({
                "type": "string",
                "description": "First paragraph\nstill first.\n\nSecond paragraph."
            }),
            false,
        );
        assert_eq!(
            compiled.notes,
            vec!["First paragraphstill first.", "Second paragraph."]
        );
    }

    #[test]
    fn test_generate_definitions_order_and_naming() {
        let document: OpenApi = serde_json::from_value(serde_json::json!({
            "info": { "title": "t", "version": "1" },
            "paths": {},
            "components": {
                "schemas": {
                    "Petdto": { "type": "object", "properties": { "name": { "type": "string" } }, "required": ["name"] },
                    "Tag": { "type": "string" }
                }
            }
        }))
        .unwrap();
        let mut diagnostics = Diagnostics::new();
        let output = generate_definitions(&document, &mut diagnostics).unwrap();
        let pet = output.find("export interface ApiPet {").unwrap();
        let tag = output.find("export type ApiTag = string").unwrap();
        assert!(pet < tag);
        assert!(diagnostics.is_empty());
    }
}
