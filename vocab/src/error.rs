//! Vocabulary error taxonomy.

use thiserror::Error;

/// Failures while loading or querying the vocabulary.
///
/// All variants are terminal for a generation run: the engine never emits
/// partial output on top of a broken registry.
#[derive(Debug, Error)]
pub enum VocabError {
    /// A structural problem in the input graph: invalid JSON-LD, a dangling
    /// schema-local reference, a duplicated identifier, or a node whose
    /// classification marker is missing or ambiguous.
    #[error("malformed ontology: {0}")]
    MalformedOntology(String),

    /// A referenced identifier does not exist in the registry.
    #[error("unknown type `{0}`")]
    UnknownType(String),
}
