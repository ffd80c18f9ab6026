//! `schemaorg-generate` — Generates Rust data models from the schema.org
//! vocabulary and writes the module source to stdout.
//!
//! **Usage:**
//! ```
//! schemaorg-generate [--greedy] [--vocabulary <path>] <model>...
//! schemaorg-generate all
//! ```
//!
//! Naming a model prunes the output to that model and its ancestors;
//! `--greedy` additionally pulls in every type reachable through property
//! expected-types. The single pseudo-root `all` emits the whole vocabulary.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use schemaorg_codegen::{generate, Policy};

/// Generate schema.org Rust data models.
#[derive(Parser)]
#[command(
    name = "schemaorg-generate",
    about = "Generate Rust data models from the schema.org vocabulary"
)]
struct Args {
    /// Model names to generate, or the single pseudo-root `all`.
    #[arg(required = true)]
    models: Vec<String>,

    /// Also emit every type reachable through property expected-types.
    #[arg(long)]
    greedy: bool,

    /// Path to the schema.org vocabulary JSON-LD file.
    #[arg(long, default_value = "schemaorg-current-http.jsonld")]
    vocabulary: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let raw = fs::read_to_string(&args.vocabulary)
        .with_context(|| format!("Failed to read vocabulary: {}", args.vocabulary.display()))?;
    let registry = schemaorg_vocab::load_str(&raw)
        .with_context(|| format!("Failed to parse vocabulary: {}", args.vocabulary.display()))?;

    let policy = if args.models.iter().any(|m| m == "all") {
        Policy::All
    } else if args.greedy {
        Policy::Greedy
    } else {
        Policy::Shallow
    };

    let generated =
        generate(&registry, &args.models, policy).context("Model generation failed")?;

    // Summary goes to stderr so stdout stays a clean source artifact.
    eprintln!(
        "schema.org vocabulary: {} types loaded",
        registry.type_count()
    );
    eprintln!(
        "Generated {} models, {} enumerations, {} fields, {} property unions",
        generated.report.models,
        generated.report.enums,
        generated.report.fields,
        generated.report.unions
    );

    print!("{}", generated.source);
    Ok(())
}
