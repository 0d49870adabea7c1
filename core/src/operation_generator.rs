#![deny(missing_docs)]

//! # Operation Compiler
//!
//! Compiles one (path, HTTP method) pair into the source text of one client
//! method: name derivation, argument list, request-body encoding, security
//! parameter and the response-type union with its runtime dispatch table.

use crate::diagnostics::Diagnostics;
use crate::error::AppResult;
use crate::naming::{camel_case, capitalize, indent_block, security_name, singular, trim_type_ws, uncapitalize};
use crate::oas::document::{
    OpenApi, Operation, Parameter, RefOr, RequestBody, Response, SecurityRequirement,
};
use crate::oas::resolver;
use crate::oas::schema::SchemaNode;
use crate::schema_generator::compile_type;
use indexmap::IndexMap;
use regex::Regex;
use std::sync::OnceLock;

/// Name of the generated request-body argument.
const REQUEST_BODY_NAME: &str = "requestBody";

/// Derives the client method name for an operation.
///
/// Precedence: `operationId`, then `summary`, then a fallback built from the
/// path with its first `{param}` segment removed (slashes acting as chunk
/// separators) plus the capitalized method. When the operation carries tags,
/// the first tag is camel-cased, singularized, stripped from the base name
/// case-insensitively and prepended.
pub fn function_name(operation: &Operation, method: &str, path: &str) -> String {
    static PARAM_RE: OnceLock<Regex> = OnceLock::new();
    let param_re =
        PARAM_RE.get_or_init(|| Regex::new(r"\{[^}]*\}").expect("Invalid regex constant"));

    let chosen = operation
        .operation_id
        .clone()
        .filter(|id| !id.is_empty())
        .or_else(|| operation.summary.clone().filter(|s| !s.is_empty()))
        .unwrap_or_else(|| {
            let stripped = param_re.replacen(path, 1, "");
            format!("{}{}", stripped.replace('/', "-"), capitalize(method))
        });
    let base_name = camel_case(&chosen);

    let tag_name = operation
        .tags
        .as_ref()
        .and_then(|tags| tags.first())
        .map(|tag| camel_case(tag))
        .filter(|tag| !tag.is_empty());
    let Some(tag_name) = tag_name else {
        return uncapitalize(&base_name);
    };

    let tag_singular = singular(&tag_name.to_lowercase());
    let strip_tag = Regex::new(&format!("(?i){}", regex::escape(&tag_name)))
        .expect("Invalid regex constant");
    let strip_singular = Regex::new(&format!("(?i){}", regex::escape(&tag_singular)))
        .expect("Invalid regex constant");
    let converted = strip_tag.replace_all(&base_name, "");
    let converted = strip_singular.replace_all(&converted, "");
    format!("{}{}", tag_singular, capitalize(&converted))
}

/// Merges path-item-level and operation-level parameters into one list keyed
/// by `(location, name)`; operation-level entries override path-item-level
/// ones, and references resolve first.
fn merge_parameters<'a>(
    document: &'a OpenApi,
    root: Option<&'a [RefOr<Parameter>]>,
    local: Option<&'a [RefOr<Parameter>]>,
) -> AppResult<Vec<&'a Parameter>> {
    let mut merged: IndexMap<String, &Parameter> = IndexMap::new();
    for source in [root, local].into_iter().flatten() {
        for entry in source {
            let resolved = match entry {
                RefOr::Item(parameter) => parameter,
                RefOr::Ref(reference) => {
                    resolver::resolve_parameter(document, &reference.reference)?
                }
            };
            merged.insert(
                format!("{}{}", resolved.location, resolved.name),
                resolved,
            );
        }
    }
    Ok(merged.into_values().collect())
}

/// Renders `name: type` for an argument backed by a schema, inlining object
/// bodies onto one line and applying the partial-optional key encoding.
fn render_typed_argument(
    schema: &SchemaNode,
    name: &str,
    optional: bool,
    map_optional_as_partial: bool,
    diagnostics: &mut Diagnostics,
) -> AppResult<String> {
    let compiled = compile_type(schema, optional, map_optional_as_partial, diagnostics)?;
    let mut rendered = trim_type_ws(&compiled);
    if let Some(stripped) = rendered.strip_suffix("; }") {
        rendered = format!("{} }}", stripped);
    }
    if map_optional_as_partial {
        if let Some(stripped) = rendered.strip_suffix(" | null") {
            return Ok(format!("{}?: {}", name, stripped));
        }
    }
    Ok(format!("{}: {}", name, rendered))
}

/// Maps one parameter to a rendered argument. A parameter without a schema
/// is content-style and degrades to a raw `BodyInit`.
fn map_body_param(
    parameter: &Parameter,
    name: Option<&str>,
    force_optional: Option<bool>,
    map_optional_as_partial: bool,
    diagnostics: &mut Diagnostics,
) -> AppResult<String> {
    let optional = force_optional.unwrap_or(!parameter.required);
    let name = name.unwrap_or(&parameter.name);
    match &parameter.schema {
        Some(schema) => {
            render_typed_argument(schema, name, optional, map_optional_as_partial, diagnostics)
        }
        None => Ok(format!("{}: BodyInit", name)),
    }
}

/// Result of compiling a request body declaration.
struct MappedRequestBody {
    /// The rendered method argument.
    argument: String,
    /// Declared content type, when exactly one was given.
    content_type: Option<String>,
    /// The schema was `string`/`binary`: pass the payload through untouched.
    raw_body: bool,
    /// Multiple content types were declared: uncallable placeholder.
    placeholder: bool,
}

/// Compiles a request body. Exactly one content type is supported; more than
/// one degrades to an uncallable `never` placeholder so the rest of the
/// document still generates.
fn map_request_body(
    request_body: &RequestBody,
    diagnostics: &mut Diagnostics,
) -> AppResult<MappedRequestBody> {
    let placeholder = MappedRequestBody {
        argument: format!("{}: never", REQUEST_BODY_NAME),
        content_type: None,
        raw_body: false,
        placeholder: true,
    };
    if request_body.content.len() != 1 {
        diagnostics.error(
            "Request body declared multiple content types, this is not supported yet",
        );
        return Ok(placeholder);
    }
    let Some((content_type, media)) = request_body.content.first() else {
        // Guarded above; a single entry is present.
        return Ok(placeholder);
    };

    let optional = !request_body.required;
    if let Some(SchemaNode::Object(schema)) = &media.schema {
        if schema.schema_type.as_deref() == Some("string")
            && schema.format.as_deref() == Some("binary")
        {
            return Ok(MappedRequestBody {
                argument: format!("{}: BodyInit", REQUEST_BODY_NAME),
                content_type: Some(content_type.clone()),
                raw_body: true,
                placeholder: false,
            });
        }
    }

    let any = SchemaNode::Bool(true);
    let schema = media.schema.as_ref().unwrap_or(&any);
    Ok(MappedRequestBody {
        argument: render_typed_argument(schema, REQUEST_BODY_NAME, optional, false, diagnostics)?,
        content_type: Some(content_type.clone()),
        raw_body: false,
        placeholder: false,
    })
}

/// Maps one documented status code to its wrapper type and dispatch-table
/// entry: JSON content parses through `toJson`; a 2xx code without JSON
/// content passes the raw response through; anything else contributes
/// nothing to the union.
fn map_response_param(
    status_code: &str,
    response: &Response,
    diagnostics: &mut Diagnostics,
) -> AppResult<Option<(String, String)>> {
    if let Some(media) = response
        .content
        .as_ref()
        .and_then(|content| content.get("application/json"))
    {
        let any = SchemaNode::Bool(true);
        let schema = media.schema.as_ref().unwrap_or(&any);
        let body_type = compile_type(schema, false, false, diagnostics)?;
        return Ok(Some((
            format!("FetchResponse<{}, {}>", status_code, body_type),
            format!("{}: toJson", status_code),
        )));
    }
    if status_code.starts_with('2') {
        return Ok(Some((
            format!("FetchResponse<{}, Response>", status_code),
            format!("{}: toResponse", status_code),
        )));
    }
    Ok(None)
}

/// Collects the numeric-status responses in document order, resolving
/// references. The `default` key never contributes.
fn responses_as_list<'a>(
    document: &'a OpenApi,
    responses: &'a IndexMap<String, RefOr<Response>>,
) -> AppResult<Vec<(&'a str, &'a Response)>> {
    let mut result = Vec::new();
    for (key, value) in responses {
        if key.parse::<u16>().is_err() {
            continue;
        }
        let response = match value {
            RefOr::Item(response) => response,
            RefOr::Ref(reference) => resolver::resolve_response(document, &reference.reference)?,
        };
        result.push((key.as_str(), response));
    }
    Ok(result)
}

/// The scheme-and-scope-parameterized security type for one requirement
/// entry.
fn security_object_type(key: &str, scopes: &[String]) -> String {
    let scope_union = scopes
        .iter()
        .map(|scope| format!("'{}'", security_name(scope)))
        .collect::<Vec<_>>()
        .join(" | ");
    let scope = if scope_union.is_empty() {
        "never".to_string()
    } else {
        scope_union
    };
    format!("Security<'{}', {}>", key, scope)
}

/// One requirement rendered as a record type combining all of its schemes.
fn security_record_type(requirement: &SecurityRequirement) -> String {
    requirement
        .iter()
        .map(|(key, scopes)| format!("{}: {}", security_name(key), security_object_type(key, scopes)))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Everything derived for one method's signature and preamble.
struct FunctionArguments {
    /// Rendered arguments, in the fixed contract order.
    arguments: Vec<String>,
    /// Statements preceding the request dispatch.
    body: String,
    /// Declared request content type, if any.
    content_type: Option<String>,
    /// At least one query parameter exists.
    has_query: bool,
    /// A security argument was emitted.
    has_security: bool,
    /// A `body` binding is part of the request.
    has_client_body: bool,
}

/// Builds the argument list and request preamble for one operation.
///
/// Fixed order: security, path parameters (by descending position of their
/// `{name}` placeholder in the path), the bundled `query` object, the
/// request body, and the trailing `options` argument.
fn function_arguments(
    parameters: &[&Parameter],
    request_body: Option<&RequestBody>,
    security: &[SecurityRequirement],
    path: &str,
    diagnostics: &mut Diagnostics,
) -> AppResult<FunctionArguments> {
    let mut result = FunctionArguments {
        arguments: Vec::new(),
        body: String::new(),
        content_type: None,
        has_query: false,
        has_security: false,
        has_client_body: false,
    };

    // Security goes before anything else, if it is required.
    let requirements: Vec<&SecurityRequirement> = security
        .iter()
        .filter(|requirement| {
            if requirement.is_empty() {
                diagnostics.warn("Empty security requirement object spotted");
                return false;
            }
            true
        })
        .collect();
    match requirements.as_slice() {
        [] => {}
        [requirement] => {
            if requirement.len() == 1 {
                if let Some((key, scopes)) = requirement.first() {
                    result.has_security = true;
                    result
                        .arguments
                        .push(format!("security: {}", security_object_type(key, scopes)));
                    result.body.push_str("const sec = security;\n");
                }
            } else {
                result.has_security = true;
                result
                    .arguments
                    .push(format!("security: {{{}}}", security_record_type(requirement)));
                result.body.push_str("const sec = combinedSecurity(security);\n");
            }
        }
        _ => {
            let union = requirements
                .iter()
                .map(|requirement| format!("{{{}}}", security_record_type(requirement)))
                .collect::<Vec<_>>()
                .join(" | ");
            result.has_security = true;
            result.arguments.push(format!("security: {}", union));
            result.body.push_str("const sec = combinedSecurity(security);\n");
        }
    }

    // Path parameters go first, rightmost placeholder leading.
    let mut path_params: Vec<&&Parameter> = parameters
        .iter()
        .filter(|p| p.location == "path")
        .collect();
    path_params.sort_by(|a, b| {
        let position = |p: &Parameter| {
            path.find(&format!("{{{}}}", p.name))
                .map_or(-1, |index| index as i64)
        };
        position(b).cmp(&position(a))
    });
    for parameter in &path_params {
        result
            .arguments
            .push(map_body_param(parameter, None, None, false, diagnostics)?);
    }

    // Then the query parameters, bundled into one partial-encoded object.
    let query_params: Vec<&&Parameter> = parameters
        .iter()
        .filter(|p| p.location == "query")
        .collect();
    if !query_params.is_empty() {
        let fields = query_params
            .iter()
            .map(|p| map_body_param(p, None, None, true, diagnostics))
            .collect::<AppResult<Vec<_>>>()?
            .join(", ");
        result.arguments.push(format!("query: {{{}}}", fields));
        result.has_query = true;
    }

    if let Some(request_body) = request_body {
        let mapped = map_request_body(request_body, diagnostics)?;
        if !mapped.placeholder {
            result.content_type = mapped.content_type.clone();
            match mapped.content_type.as_deref() {
                Some("application/json") => {
                    result.has_client_body = true;
                    result
                        .body
                        .push_str(&format!("const body = JSON.stringify({});\n", REQUEST_BODY_NAME));
                }
                Some("multipart/form-data") => {
                    result.has_client_body = true;
                    result.body.push_str("const body = new FormData();\n");
                    result.body.push_str(&format!(
                        "for (const [key, value] of Object.entries({})) {{\n",
                        REQUEST_BODY_NAME
                    ));
                    result.body.push_str("\tif (value !== null) {\n");
                    result.body.push_str("\t\tbody.append(key, value);\n");
                    result.body.push_str("\t}\n");
                    result.body.push_str("}\n");
                }
                Some("application/x-www-form-urlencoded") => {
                    result.has_client_body = true;
                    result.body.push_str("const url = new URLSearchParams();\n");
                    result.body.push_str(&format!(
                        "for (const [key, value] of Object.entries({})) {{\n",
                        REQUEST_BODY_NAME
                    ));
                    result.body.push_str("\tif (value !== null) {\n");
                    result.body.push_str("\t\turl.set(key, value.toString());\n");
                    result.body.push_str("\t}\n");
                    result.body.push_str("}\n");
                    result.body.push_str("const body = url.toString();\n");
                }
                other => {
                    if mapped.raw_body {
                        result.has_client_body = true;
                        result
                            .body
                            .push_str(&format!("const body = {};\n", REQUEST_BODY_NAME));
                    } else {
                        diagnostics.warn(format!(
                            "Found unrecognised mime type: {}",
                            other.unwrap_or("<none>")
                        ));
                        result.has_client_body = true;
                        result.body.push_str(
                            "// eslint-disable-next-line @typescript-eslint/no-explicit-any\n",
                        );
                        result
                            .body
                            .push_str(&format!("const body = {} as any;\n", REQUEST_BODY_NAME));
                    }
                }
            }
        }
        result.arguments.push(mapped.argument);
    }

    // Options is always last.
    result.arguments.push("options: Options = {}".to_string());
    Ok(result)
}

/// Compiles one operation into the source text of one client method.
///
/// An operation without a `responses` object is a spec violation: it is
/// reported as a non-fatal error and contributes no method.
pub fn generate_operation(
    path: &str,
    method: &str,
    operation: &Operation,
    document: &OpenApi,
    root_parameters: Option<&[RefOr<Parameter>]>,
    diagnostics: &mut Diagnostics,
) -> AppResult<String> {
    let mut output = format!("\t// OPERATION: {}:{}\n", path, method);
    let name = function_name(operation, method, path);

    let parameters = merge_parameters(document, root_parameters, operation.parameters.as_deref())?;
    let security: &[SecurityRequirement] = document
        .security
        .as_deref()
        .or(operation.security.as_deref())
        .unwrap_or(&[]);
    let request_body = match &operation.request_body {
        Some(RefOr::Item(body)) => Some(body),
        Some(RefOr::Ref(reference)) => {
            Some(resolver::resolve_request_body(document, &reference.reference)?)
        }
        None => None,
    };
    let args = function_arguments(&parameters, request_body, security, path, diagnostics)?;

    let Some(responses) = &operation.responses else {
        diagnostics.error(format!(
            "'responses' was missing from the document on route {}:{}. This is a spec violation",
            path, method
        ));
        return Ok(String::new());
    };

    let mut return_types = Vec::new();
    let mut parsers = Vec::new();
    let mut status_docs = Vec::new();
    for (status, response) in responses_as_list(document, responses)? {
        if let Some((return_type, parser)) = map_response_param(status, response, diagnostics)? {
            return_types.push(return_type);
            parsers.push(parser);
        }
        if let Some(description) = &response.description {
            status_docs.push(format!("{} {}", status, description));
        }
    }

    let parsed_path = if path.contains('{') || args.has_query {
        format!(
            "`{}{}`",
            path.replace('{', "${"),
            if args.has_query { "${objectToQueryString(query)}" } else { "" }
        )
    } else {
        format!("'{}'", path)
    };

    // JSDoc.
    output.push_str("\t/**\n");
    if let Some(text) = operation.description.as_ref().or(operation.summary.as_ref()) {
        output.push_str(&format!("\t * {}\n", text));
        output.push_str("\t *\n");
    }
    if operation.deprecated {
        output.push_str("\t * @deprecated\n");
    }
    if !status_docs.is_empty() {
        output.push_str("\t * @return The response to the request:\n");
        for doc in &status_docs {
            output.push_str(&format!("\t *     {}\n", doc));
        }
    }
    output.push_str("\t */\n");

    // Signature.
    output.push_str(&format!(
        "\tpublic {}({}): Promise<\n",
        name,
        args.arguments.join(", ")
    ));
    if return_types.is_empty() {
        output.push_str("\t\tnever\n");
    } else {
        for (index, return_type) in return_types.iter().enumerate() {
            let separator = if index + 1 == return_types.len() { "" } else { " |" };
            output.push_str(&format!(
                "\t\t{}{}\n",
                indent_block(return_type, "\t\t"),
                separator
            ));
        }
    }
    output.push_str("\t> {\n");

    // Body.
    if !args.body.is_empty() {
        output.push_str(&format!(
            "\t\t{}\n\n",
            indent_block(&args.body, "\t\t").trim()
        ));
    }
    let security_option = if args.has_security { ", sec" } else { "" };
    output.push_str(&format!(
        "\t\treturn apiRequest(new Request(this.formatUri({}{}), {{\n",
        parsed_path, security_option
    ));
    output.push_str(&format!(
        "\t\t\theaders: {}{{\n",
        if args.has_security { "sec.updateHeaders(" } else { "" }
    ));
    output.push_str("\t\t\t\t...this.headers,\n");
    // multipart/form-data is special-cased: its header value is complex and
    // is calculated automatically once missing.
    if let Some(content_type) = &args.content_type {
        if content_type != "multipart/form-data" {
            output.push_str(&format!(
                "\t\t\t\t'content-type': '{}',\n",
                content_type.replacen('*', "unknown", 1)
            ));
        }
    }
    output.push_str("\t\t\t\t...options.headers,\n");
    output.push_str(&format!(
        "\t\t\t}}{},\n",
        if args.has_security { ")" } else { "" }
    ));
    output.push_str("\t\t\tcache: options.cache,\n");
    if args.has_client_body {
        output.push_str("\t\t\tbody,\n");
    }
    output.push_str(&format!("\t\t\tmethod: '{}',\n", method));
    output.push_str("\t\t}), {\n");
    for parser in &parsers {
        output.push_str(&format!("\t\t\t{},\n", parser));
    }
    output.push_str("\t\t});\n");
    output.push_str("\t}\n");
    output.push('\n');
    Ok(output)
}
