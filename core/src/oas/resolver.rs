#![deny(missing_docs)]

//! # Reference Resolver
//!
//! Single-hop resolution of `#/components/<partition>/<name>` pointers.
//!
//! Resolution is deliberately not recursive: a resolved entity that is
//! itself a reference is returned as-is, and callers re-resolve when their
//! context demands it. Schema pointers are never dereferenced at all; they
//! compile to the referenced entity's emitted name.

use crate::error::{AppError, AppResult};
use crate::naming::entity_name;
use crate::oas::document::{Components, OpenApi, Parameter, RequestBody, Response};
use crate::oas::schema::SchemaNode;
use indexmap::IndexMap;

/// Splits a pointer into `(partition, name)`, validating the fixed leading
/// `#` and `components` segments.
fn split_reference(reference: &str) -> AppResult<(&str, &str)> {
    let segments: Vec<&str> = reference.split('/').collect();
    let &[hash, components, partition, name] = segments.as_slice() else {
        return Err(AppError::InvalidReference(reference.to_string()));
    };
    if hash != "#" || components != "components" {
        return Err(AppError::InvalidReference(reference.to_string()));
    }
    Ok((partition, name))
}

/// Derives the emitted type name for a schema pointer.
///
/// Only the `schemas` partition is a legal target in type position.
pub fn schema_ref_name(reference: &str) -> AppResult<String> {
    let (partition, name) = split_reference(reference)?;
    if partition != "schemas" {
        return Err(AppError::InvalidReference(reference.to_string()));
    }
    Ok(entity_name(name))
}

/// Looks `name` up in one components partition.
fn lookup<'a, T>(
    slice: Option<&'a IndexMap<String, T>>,
    name: &str,
    reference: &str,
) -> AppResult<&'a T> {
    slice
        .and_then(|entries| entries.get(name))
        .ok_or_else(|| AppError::UnresolvedReference(reference.to_string()))
}

/// Validates that the pointer targets `expected` and returns the partition's
/// map, failing with `UnresolvedReference` when the document lacks it.
fn partition_for<'a, T>(
    document: &'a OpenApi,
    reference: &str,
    expected: &str,
    select: impl Fn(&'a Components) -> Option<&'a IndexMap<String, T>>,
) -> AppResult<(Option<&'a IndexMap<String, T>>, String)> {
    let (partition, name) = split_reference(reference)?;
    if partition != expected {
        return Err(AppError::UnresolvedReference(format!(
            "{} (expected a {} entry)",
            reference, expected
        )));
    }
    let slice = document.components.as_ref().and_then(select);
    Ok((slice, name.to_string()))
}

/// Resolves a pointer to a named schema.
pub fn resolve_schema<'a>(document: &'a OpenApi, reference: &str) -> AppResult<&'a SchemaNode> {
    let (slice, name) = partition_for(document, reference, "schemas", |c| c.schemas.as_ref())?;
    lookup(slice, &name, reference)
}

/// Resolves a pointer to a named parameter.
pub fn resolve_parameter<'a>(document: &'a OpenApi, reference: &str) -> AppResult<&'a Parameter> {
    let (slice, name) =
        partition_for(document, reference, "parameters", |c| c.parameters.as_ref())?;
    lookup(slice, &name, reference)
}

/// Resolves a pointer to a named request body.
pub fn resolve_request_body<'a>(
    document: &'a OpenApi,
    reference: &str,
) -> AppResult<&'a RequestBody> {
    let (slice, name) = partition_for(document, reference, "requestBodies", |c| {
        c.request_bodies.as_ref()
    })?;
    lookup(slice, &name, reference)
}

/// Resolves a pointer to a named response.
pub fn resolve_response<'a>(document: &'a OpenApi, reference: &str) -> AppResult<&'a Response> {
    let (slice, name) =
        partition_for(document, reference, "responses", |c| c.responses.as_ref())?;
    lookup(slice, &name, reference)
}
