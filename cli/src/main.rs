#![deny(missing_docs)]

//! # tsgen CLI
//!
//! Command line wrapper around the `tsgen-core` engine.
//!
//! Supported command:
//! - `client`: reads an OpenAPI 3.0 document (JSON, or YAML by extension)
//!   and writes the generated TypeScript client.
//!
//! Progress goes to stdout; every non-fatal diagnostic from the engine is
//! printed to stderr, prefixed by its severity.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tsgen_core::{generate_client, Diagnostics, OpenApi};

mod error;

use error::CliResult;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI 3.0 -> TypeScript client generator")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generates a typed TypeScript client from an OpenAPI 3.0 document.
    Client(ClientArgs),
}

/// Arguments for the client command.
#[derive(clap::Args, Debug, Clone)]
struct ClientArgs {
    /// The OpenAPI document to process.
    #[clap(short, long)]
    input: PathBuf,

    /// Where the generated TypeScript source is written.
    #[clap(short, long)]
    output: PathBuf,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Client(args) => client(args),
    }
}

/// Executes the client command: read, parse, generate, write.
fn client(args: &ClientArgs) -> CliResult<()> {
    println!(
        "Creating typescript definitions based on {}...",
        args.input.display()
    );

    let contents = fs::read_to_string(&args.input)?;
    let document = parse_document(&args.input, &contents)?;

    let mut diagnostics = Diagnostics::new();
    let converted = generate_client(&document, &mut diagnostics)?;
    for diagnostic in diagnostics.iter() {
        eprintln!("{}", diagnostic);
    }

    fs::write(&args.output, converted)?;
    println!("Done!");
    Ok(())
}

/// Parses the document as YAML when the file extension says so, JSON
/// otherwise.
fn parse_document(path: &Path, contents: &str) -> CliResult<OpenApi> {
    let is_yaml = path
        .extension()
        .is_some_and(|ext| ext == "yaml" || ext == "yml");
    if is_yaml {
        Ok(serde_yaml::from_str(contents)?)
    } else {
        Ok(serde_json::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_client_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("openapi.json");
        let output = dir.path().join("api.ts");
        fs::write(
            &input,
            serde_json::json!({
                "openapi": "3.0.0",
                "info": { "title": "Demo", "version": "1.0.0" },
                "paths": {
                    "/ping": { "get": { "responses": { "204": { "description": "pong" } } } }
                }
            })
            .to_string(),
        )
        .unwrap();

        client(&ClientArgs {
            input,
            output: output.clone(),
        })
        .unwrap();

        let generated = fs::read_to_string(output).unwrap();
        assert!(generated.contains("export default class Api {"));
        assert!(generated.contains("public pingGet("));
    }

    #[test]
    fn test_yaml_input_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("openapi.yml");
        let output = dir.path().join("api.ts");
        fs::write(
            &input,
            "openapi: 3.0.0\ninfo:\n  title: Demo\n  version: 1.0.0\npaths: {}\n",
        )
        .unwrap();

        client(&ClientArgs {
            input,
            output: output.clone(),
        })
        .unwrap();

        let generated = fs::read_to_string(output).unwrap();
        assert!(generated.contains("export const SecurityProviders"));
    }
}
