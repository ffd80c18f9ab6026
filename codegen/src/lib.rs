//! schema.org model generator.
//!
//! Takes a resolved [`Registry`](schemaorg_vocab::Registry), a root set,
//! and a selection [`Policy`], and renders one self-contained Rust source
//! artifact of serde data models: one struct per selected type (flattened
//! inheritance, JSON-LD `@type` marker), one value enum per selected
//! enumeration, plus the shared preamble and the per-property union enums
//! that multi-type ranges require.
//!
//! The pipeline runs strictly one direction:
//! select → order → resolve → render. Output is deterministic: identical
//! (vocabulary, roots, policy) inputs produce byte-identical source.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod emit;
pub mod enums;
pub mod mapping;
pub mod models;
pub mod order;
pub mod select;

use schemaorg_vocab::{Registry, VocabError};
use thiserror::Error;

use emit::RustFile;
pub use select::{Policy, SelectionSet};

/// Failures while selecting, ordering, or rendering.
#[derive(Debug, Error)]
pub enum GenError {
    /// A requested root name does not exist in the registry.
    #[error("unknown root model `{0}`")]
    UnknownRoot(String),

    /// The inheritance edges contain a cycle. The subclass relation is
    /// acyclic in well-formed input, so this signals a broken vocabulary.
    #[error("inheritance cycle detected involving `{0}`")]
    CycleDetected(String),

    /// A registry-level failure surfaced during generation.
    #[error(transparent)]
    Vocab(#[from] VocabError),
}

/// Counts of what a generation run produced.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenerationReport {
    /// Model structs rendered.
    pub models: usize,
    /// Enumeration enums rendered.
    pub enums: usize,
    /// Field lines rendered (markers excluded).
    pub fields: usize,
    /// Per-property union enums rendered.
    pub unions: usize,
}

/// A finished generation run: the source artifact plus its report.
#[derive(Debug)]
pub struct Generated {
    /// The complete generated Rust source.
    pub source: String,
    /// Counts of rendered items.
    pub report: GenerationReport,
}

/// Runs the full pipeline and renders the source artifact.
///
/// # Errors
///
/// Returns [`GenError::UnknownRoot`] for an unresolved root name,
/// [`GenError::CycleDetected`] for a cyclic inheritance edge, or a wrapped
/// [`VocabError`] for registry failures. All failures abort before any
/// output is produced.
pub fn generate(
    registry: &Registry,
    roots: &[String],
    policy: Policy,
) -> Result<Generated, GenError> {
    let selection = select::select(registry, roots, policy)?;
    let sequence = order::order(&selection, registry)?;
    let resolved = models::resolve(registry, &selection, &sequence)?;

    let mut report = GenerationReport {
        unions: resolved.unions.len(),
        fields: resolved.field_count,
        ..GenerationReport::default()
    };

    let mut f = RustFile::new(&header(&selection, &resolved));
    preamble(&mut f, resolved.uses_value);

    let mut unions: Vec<&models::Union> = resolved.unions.values().collect();
    unions.sort_by(|a, b| a.name.cmp(&b.name));
    for union in unions {
        models::render_union(&mut f, union);
    }

    for name in &sequence {
        let node = registry.get(name)?;
        if enums::is_enumeration(node) {
            enums::render_enumeration(&mut f, node);
            report.enums += 1;
        } else if let Some(fields) = resolved.fields.get(name) {
            models::render_model(&mut f, node, fields);
            report.models += 1;
        }
    }

    Ok(Generated {
        source: f.finish(),
        report,
    })
}

fn header(selection: &SelectionSet, resolved: &models::Resolved) -> String {
    format!(
        "schema.org data models.\n\
         \n\
         Generated by `schemaorg-generate` from the schema.org vocabulary:\n\
         {} types, {} fields, {} property unions.\n\
         \n\
         Every model carries its JSON-LD `@type` marker as a `type_` field\n\
         (wire name `@type`) whose value is the model's own type name.",
        selection.len(),
        resolved.field_count,
        resolved.unions.len(),
    )
}

fn preamble(f: &mut RustFile, uses_value: bool) {
    f.line("use serde::{Deserialize, Serialize};");
    if uses_value {
        f.line("use serde_json::Value;");
    }
    f.blank();
    f.doc_comment("A single value or a list of values, as JSON-LD allows everywhere.");
    f.line("#[derive(Debug, Clone, Serialize, Deserialize)]");
    f.line("#[serde(untagged)]");
    f.line("pub enum OneOrMany<T> {");
    f.indented_doc_comment("A single value.");
    f.line("    One(T),");
    f.indented_doc_comment("A list of values.");
    f.line("    Many(Vec<T>),");
    f.line("}");
    f.blank();
}
