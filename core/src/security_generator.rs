#![deny(missing_docs)]

//! # Security Compiler
//!
//! Converts each named security scheme into a factory entry in the
//! `SecurityProviders` registry. `http` and `apiKey` schemes get working
//! authenticator factories; `oauth2`, `openIdConnect` and anything else are
//! recognized but compile to a stub that fails at call time.

use crate::diagnostics::Diagnostics;
use crate::naming::{escape_key, security_name};
use crate::oas::document::OpenApi;

/// Display form of an HTTP authorization scheme id: the well-known `bearer`
/// id is rewritten to its header spelling, everything else passes through.
fn http_scheme_display(scheme: &str) -> &str {
    if scheme == "bearer" {
        "Bearer"
    } else {
        scheme
    }
}

/// Renders the `SecurityProviders` registry for every named scheme under
/// `components.securitySchemes`.
pub fn generate_security_providers(document: &OpenApi, diagnostics: &mut Diagnostics) -> String {
    let mut output = String::from("export const SecurityProviders = {\n");
    let schemes = document
        .components
        .as_ref()
        .and_then(|components| components.security_schemes.as_ref());
    if let Some(schemes) = schemes {
        for (key, scheme) in schemes {
            let name = security_name(key);
            output.push_str("\t/**\n");
            if let Some(description) = &scheme.description {
                output.push_str(&format!("\t * {}\n", description));
                output.push_str("\t *\n");
            }
            match scheme.scheme_type.as_str() {
                "http" => {
                    if let Some(bearer_format) = &scheme.bearer_format {
                        output.push_str(&format!("\t * Bearer format: {}\n", bearer_format));
                        output.push_str("\t *\n");
                    }
                    let scheme_id = scheme.scheme.as_deref().unwrap_or_default();
                    output.push_str(&format!("\t * Scheme: {}\n", scheme_id));
                    output.push_str("\t *\n");
                    output.push_str("\t * @return The newly generated security token\n");
                    output.push_str("\t */\n");
                    output.push_str(&format!(
                        "\t{}(token: string): Security<'{}', never> {{\n",
                        escape_key(&name),
                        name
                    ));
                    output.push_str(&format!(
                        "\t\treturn new HttpAuthentication('{}', token, '{}');\n",
                        name,
                        http_scheme_display(scheme_id)
                    ));
                    output.push_str("\t},\n");
                }
                "apiKey" => {
                    let location = scheme.location.as_deref().unwrap_or_default();
                    let key_name = scheme.name.as_deref().unwrap_or_default();
                    output.push_str(&format!("\t * In: {}\n", location));
                    output.push_str("\t *\n");
                    output.push_str(&format!("\t * Key: {}\n", key_name));
                    output.push_str("\t *\n");
                    output.push_str("\t * @return The newly generated security token\n");
                    output.push_str("\t */\n");
                    output.push_str(&format!(
                        "\t{}(token: string): Security<'{}', never> {{\n",
                        escape_key(&name),
                        name
                    ));
                    output.push_str(&format!(
                        "\t\treturn new ApiKeyAuthentication('{}', '{}', '{}', token);\n",
                        name, location, key_name
                    ));
                    output.push_str("\t},\n");
                }
                unsupported => {
                    diagnostics.error(format!("Unsupported security operation: {}", unsupported));
                    output.push_str("\t */\n");
                    output.push_str(&format!("\t{}(): never {{\n", escape_key(&name)));
                    output.push_str("\t\tthrow new Error('Unsupported operation');\n");
                    output.push_str("\t},\n");
                }
            }
        }
    }
    output.push_str("};\n");
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(schemes: serde_json::Value) -> OpenApi {
        serde_json::from_value(serde_json::json!({
            "info": { "title": "t", "version": "1" },
            "paths": {},
            "components": { "securitySchemes": schemes }
        }))
        .unwrap()
    }

    #[test]
    fn test_api_key_header_factory() {
        let doc = document(serde_json::json!({
            "apiKeyAuth": { "type": "apiKey", "in": "header", "name": "X-Key" }
        }));
        let mut diagnostics = Diagnostics::new();
        let output = generate_security_providers(&doc, &mut diagnostics);
        assert!(output.contains("apiKeyAuth(token: string): Security<'apiKeyAuth', never> {"));
        assert!(output
            .contains("return new ApiKeyAuthentication('apiKeyAuth', 'header', 'X-Key', token);"));
        assert!(output.contains("\t * In: header\n"));
        assert!(output.contains("\t * Key: X-Key\n"));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_http_bearer_factory_capitalizes_scheme() {
        let doc = document(serde_json::json!({
            "bearerAuth": {
                "type": "http",
                "scheme": "bearer",
                "bearerFormat": "JWT",
                "description": "Regular JWT token"
            }
        }));
        let mut diagnostics = Diagnostics::new();
        let output = generate_security_providers(&doc, &mut diagnostics);
        assert!(output.contains("return new HttpAuthentication('bearerAuth', token, 'Bearer');"));
        assert!(output.contains("\t * Regular JWT token\n"));
        assert!(output.contains("\t * Bearer format: JWT\n"));
        assert!(output.contains("\t * Scheme: bearer\n"));
    }

    #[test]
    fn test_http_basic_scheme_passes_through() {
        let doc = document(serde_json::json!({
            "basicAuth": { "type": "http", "scheme": "basic" }
        }));
        let mut diagnostics = Diagnostics::new();
        let output = generate_security_providers(&doc, &mut diagnostics);
        assert!(output.contains("return new HttpAuthentication('basicAuth', token, 'basic');"));
    }

    #[test]
    fn test_oauth2_compiles_to_failing_stub() {
        let doc = document(serde_json::json!({
            "oauth": { "type": "oauth2" },
            "openId": { "type": "openIdConnect" }
        }));
        let mut diagnostics = Diagnostics::new();
        let output = generate_security_providers(&doc, &mut diagnostics);
        assert!(output.contains("oauth(): never {"));
        assert!(output.contains("openId(): never {"));
        assert!(output.contains("throw new Error('Unsupported operation');"));
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_scheme_names_are_camel_cased() {
        let doc = document(serde_json::json!({
            "api-key auth": { "type": "apiKey", "in": "query", "name": "key" }
        }));
        let mut diagnostics = Diagnostics::new();
        let output = generate_security_providers(&doc, &mut diagnostics);
        assert!(output.contains("apiKeyAuth(token: string)"));
    }

    #[test]
    fn test_empty_registry_without_schemes() {
        let doc: OpenApi = serde_json::from_value(serde_json::json!({
            "info": { "title": "t", "version": "1" },
            "paths": {}
        }))
        .unwrap();
        let mut diagnostics = Diagnostics::new();
        let output = generate_security_providers(&doc, &mut diagnostics);
        assert_eq!(output, "export const SecurityProviders = {\n};\n");
    }
}
