#![deny(missing_docs)]

//! # Document Objects
//!
//! Serde structs for the parts of an OpenAPI 3.0 document the engine walks.
//! Everything is read-only input; insertion order is preserved with
//! `IndexMap` because output order follows document order.

use crate::oas::schema::SchemaNode;
use indexmap::IndexMap;
use serde::Deserialize;

/// A `$ref` pointer object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Reference {
    /// The pointer string, e.g. `#/components/schemas/User`.
    #[serde(rename = "$ref")]
    pub reference: String,
}

/// Either an inline entity or a reference to a reusable one.
///
/// The `Ref` arm is tried first: any object carrying `$ref` is a reference,
/// whatever else it claims to contain.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RefOr<T> {
    /// A `$ref` pointer into `components`.
    Ref(Reference),
    /// The entity itself, inline.
    Item(T),
}

/// The root document object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenApi {
    /// Declared OpenAPI specification version.
    pub openapi: Option<String>,
    /// API metadata, rendered into the client class documentation.
    pub info: Info,
    /// URL template -> path item, in document order.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    /// Reusable named entities.
    pub components: Option<Components>,
    /// Document-level security requirements.
    pub security: Option<Vec<SecurityRequirement>>,
}

/// API metadata.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    /// Title of the application.
    pub title: String,
    /// Version of the document.
    pub version: String,
    /// Short description of the application.
    pub description: Option<String>,
    /// URL to the terms of service.
    pub terms_of_service: Option<String>,
    /// Contact information.
    pub contact: Option<Contact>,
    /// License information.
    pub license: Option<License>,
}

/// Contact information for the exposed API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Contact {
    /// Identifying name of the contact person or organization.
    pub name: Option<String>,
    /// URL pointing to the contact information.
    pub url: Option<String>,
    /// Email address of the contact person or organization.
    pub email: Option<String>,
}

/// License information for the exposed API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct License {
    /// License name.
    pub name: String,
    /// URL to the license text.
    pub url: Option<String>,
}

/// Operations available on a single path.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PathItem {
    /// GET operation.
    pub get: Option<Operation>,
    /// POST operation.
    pub post: Option<Operation>,
    /// PUT operation.
    pub put: Option<Operation>,
    /// OPTIONS operation.
    pub options: Option<Operation>,
    /// DELETE operation.
    pub delete: Option<Operation>,
    /// PATCH operation.
    pub patch: Option<Operation>,
    /// Parameters shared by every operation on this path.
    pub parameters: Option<Vec<RefOr<Parameter>>>,
}

impl PathItem {
    /// The declared operations, in the fixed compilation order.
    pub fn operations(&self) -> Vec<(&'static str, &Operation)> {
        let slots = [
            ("get", &self.get),
            ("post", &self.post),
            ("put", &self.put),
            ("options", &self.options),
            ("delete", &self.delete),
            ("patch", &self.patch),
        ];
        slots
            .into_iter()
            .filter_map(|(method, slot)| slot.as_ref().map(|op| (method, op)))
            .collect()
    }
}

/// One HTTP method bound to one path.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Tags for documentation grouping; the first one drives method naming.
    pub tags: Option<Vec<String>>,
    /// Short summary of what the operation does.
    pub summary: Option<String>,
    /// Verbose explanation of the operation behavior.
    pub description: Option<String>,
    /// Unique identifier of the operation.
    pub operation_id: Option<String>,
    /// Operation-level parameters, overriding path-item ones by (in, name).
    pub parameters: Option<Vec<RefOr<Parameter>>>,
    /// Request body, if the method carries one.
    pub request_body: Option<RefOr<RequestBody>>,
    /// Status code (or `default`) -> response.
    pub responses: Option<IndexMap<String, RefOr<Response>>>,
    /// Marks the operation as deprecated.
    #[serde(default)]
    pub deprecated: bool,
    /// Operation-level security requirements.
    pub security: Option<Vec<SecurityRequirement>>,
}

/// A single operation parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Location: `path`, `query`, `header` or `cookie`.
    #[serde(rename = "in")]
    pub location: String,
    /// Brief description of the parameter.
    pub description: Option<String>,
    /// Whether the parameter is mandatory.
    #[serde(default)]
    pub required: bool,
    /// Type of the parameter. Content-style parameters carry no schema and
    /// compile to a raw `BodyInit` argument.
    pub schema: Option<SchemaNode>,
}

/// A request body definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RequestBody {
    /// Content type -> media type object. Exactly one entry is supported.
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
    /// Description of the body.
    pub description: Option<String>,
    /// Whether the body is mandatory.
    #[serde(default)]
    pub required: bool,
}

/// One media type entry of a request body or response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MediaType {
    /// Schema defining the content. Missing schemas degrade to `any`.
    pub schema: Option<SchemaNode>,
}

/// A single response definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Response {
    /// Short description, surfaced in the method's `@return` narrative.
    pub description: Option<String>,
    /// Content type -> media type object.
    pub content: Option<IndexMap<String, MediaType>>,
}

/// Scheme name -> granted scopes. Schemes within one requirement must all be
/// satisfied together; alternative requirements are alternatives.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// A named security scheme.
///
/// `scheme_type` stays a plain string so that unsupported scheme types
/// degrade to a stub instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SecurityScheme {
    /// Scheme type: `apiKey`, `http`, `oauth2` or `openIdConnect`.
    #[serde(rename = "type")]
    pub scheme_type: String,
    /// Short description for the scheme.
    pub description: Option<String>,
    /// For `apiKey`: the header/query/cookie key name.
    pub name: Option<String>,
    /// For `apiKey`: where the key goes (`query`, `header` or `cookie`).
    #[serde(rename = "in")]
    pub location: Option<String>,
    /// For `http`: the authorization scheme id, e.g. `bearer`.
    pub scheme: Option<String>,
    /// For `http`: hint describing how the bearer token is formatted.
    #[serde(rename = "bearerFormat")]
    pub bearer_format: Option<String>,
}

/// Reusable named entities, each partition holding entities directly
/// (references resolve single-hop).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    /// Named schemas.
    pub schemas: Option<IndexMap<String, SchemaNode>>,
    /// Named responses.
    pub responses: Option<IndexMap<String, Response>>,
    /// Named parameters.
    pub parameters: Option<IndexMap<String, Parameter>>,
    /// Named request bodies.
    pub request_bodies: Option<IndexMap<String, RequestBody>>,
    /// Named security schemes.
    pub security_schemes: Option<IndexMap<String, SecurityScheme>>,
}
