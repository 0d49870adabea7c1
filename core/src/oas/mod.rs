#![deny(missing_docs)]

//! # OpenAPI 3.0 Object Model
//!
//! A local, serde-deserializable view of the OpenAPI 3.0 document tree,
//! decoupled from any strict third-party model so that the degraded inputs
//! the engine must tolerate still parse.
//!
//! - [`document`]: the root object, paths, operations, components.
//! - [`schema`]: the schema tagged union consumed by the schema compiler.
//! - [`resolver`]: single-hop `#/components/...` pointer resolution.

pub mod document;
pub mod resolver;
pub mod schema;

pub use document::{
    Components, Contact, Info, License, MediaType, OpenApi, Operation, Parameter, PathItem,
    RefOr, Reference, RequestBody, Response, SecurityRequirement, SecurityScheme,
};
pub use schema::{Schema, SchemaKind, SchemaNode};
