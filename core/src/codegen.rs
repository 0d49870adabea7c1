#![deny(missing_docs)]

//! # Document Assembler
//!
//! Orchestrates the generators into the final output file, in fixed section
//! order: boilerplate, type definitions, the security registry, and the
//! client class with one method per operation in document order.

use crate::boilerplate::BOILERPLATE;
use crate::diagnostics::Diagnostics;
use crate::error::AppResult;
use crate::oas::document::OpenApi;
use crate::operation_generator::generate_operation;
use crate::schema_generator::generate_definitions;
use crate::security_generator::generate_security_providers;

/// Renders the client class: documentation from `info`, the constructor and
/// URL-formatting helper, then one method per operation.
fn generate_class(document: &OpenApi, diagnostics: &mut Diagnostics) -> AppResult<String> {
    let info = &document.info;
    let mut output = String::new();
    output.push_str(&format!("/**\n * {} v{}\n *\n", info.title, info.version));
    if let Some(description) = &info.description {
        output.push_str(&format!(" * {}\n", description));
    }
    if let Some(terms) = &info.terms_of_service {
        output.push_str(&format!(" * Terms of service: {}\n", terms));
        output.push_str(" *\n");
    }
    if let Some(contact) = &info.contact {
        output.push_str(" * Contact information:\n");
        if let Some(name) = &contact.name {
            output.push_str(&format!(" * {}\n", name));
        }
        if let Some(url) = &contact.url {
            output.push_str(&format!(" * {}\n", url));
        }
        if let Some(email) = &contact.email {
            output.push_str(&format!(" * {}\n", email));
        }
        output.push_str(" *\n");
    }
    if let Some(license) = &info.license {
        if let Some(url) = &license.url {
            output.push_str(&format!(" * @license {} ({})\n", license.name, url));
        } else {
            output.push_str(&format!(" * @license {}\n", license.name));
        }
        output.push_str(" *\n");
    }
    output.push_str(" */\n");
    output.push_str("export default class Api {\n");
    output.push_str("\tprivate readonly baseUrl: string;\n");
    output.push_str("\tprivate readonly headers: Record<string, string>;\n");
    output.push('\n');
    output.push_str("\tpublic constructor(baseUrl: string, headers?: Record<string, string>) {\n");
    output.push_str("\t\tthis.baseUrl = baseUrl;\n");
    output.push_str("\t\tthis.headers = headers ? headers : {};\n");
    output.push_str("\t}\n");
    output.push('\n');
    output.push_str("\tprivate formatUri(uri: string, sec: ResolvedSecurity = VoidSecurity): string {\n");
    output.push_str("\t\treturn sec.updateUrl(new URL(uri, this.baseUrl).href);\n");
    output.push_str("\t}\n");

    for (path, path_item) in &document.paths {
        let operations = path_item.operations();
        if operations.is_empty() {
            diagnostics.warn(format!("Path item '{}' contained no operations", path));
        }
        for (method, operation) in operations {
            output.push_str(&generate_operation(
                path,
                method,
                operation,
                document,
                path_item.parameters.as_deref(),
                diagnostics,
            )?);
        }
    }
    output.push_str("}\n");
    Ok(output)
}

/// Generates the complete client source for one document.
///
/// Fatal reference/schema errors abort the run; everything non-fatal lands
/// in `diagnostics` and generation continues with degraded output for the
/// offending unit.
pub fn generate_client(document: &OpenApi, diagnostics: &mut Diagnostics) -> AppResult<String> {
    let mut output = String::new();
    output.push_str("/* eslint-disable indent, max-len, @typescript-eslint/indent */\n");
    output.push_str("// THIS IS A GENERATED FILE, DO NOT MODIFY\n");
    output.push_str("// Boilerplate:\n");
    output.push_str(BOILERPLATE);
    output.push_str("\n// Types:\n");
    output.push_str(&generate_definitions(document, diagnostics)?);
    output.push_str("\n// ApiSecurity:\n");
    output.push_str(&generate_security_providers(document, diagnostics));
    output.push_str("\n// API:\n");
    output.push_str(&generate_class(document, diagnostics)?);
    output.push_str("// THIS IS A GENERATED FILE, DO NOT MODIFY\n");
    Ok(output)
}
