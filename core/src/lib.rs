#![deny(missing_docs)]

//! # tsgen-core
//!
//! Translation engine turning an OpenAPI 3.0 document into the source of a
//! typed TypeScript client: data-type declarations, an
//! authentication-provider registry and a client class with one method per
//! operation.
//!
//! The engine is synchronous, single-pass and side-effect free: it walks the
//! read-only [`oas::OpenApi`] tree once and accumulates output text. Fatal
//! conditions (malformed or dangling references, unknown schema types)
//! surface as [`AppError`]; everything recoverable is collected in
//! [`Diagnostics`] while generation continues.
//!
//! ```
//! use tsgen_core::{generate_client, Diagnostics};
//!
//! let document = serde_json::from_value(serde_json::json!({
//!     "openapi": "3.0.0",
//!     "info": { "title": "Demo", "version": "1.0.0" },
//!     "paths": {
//!         "/ping": { "get": { "responses": { "204": { "description": "pong" } } } }
//!     }
//! }))
//! .unwrap();
//!
//! let mut diagnostics = Diagnostics::new();
//! let source = generate_client(&document, &mut diagnostics).unwrap();
//! assert!(source.contains("export default class Api"));
//! ```

pub mod boilerplate;
pub mod codegen;
pub mod diagnostics;
pub mod error;
pub mod naming;
pub mod oas;
pub mod operation_generator;
pub mod schema_generator;
pub mod security_generator;

pub use codegen::generate_client;
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{AppError, AppResult};
pub use oas::OpenApi;
