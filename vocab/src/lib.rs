//! schema.org vocabulary encoded as typed Rust data.
//!
//! The `schemaorg-vocab` crate loads the raw schema.org vocabulary (a
//! JSON-LD document with an `@graph` array of type and property nodes) and
//! resolves it into a read-only [`Registry`] of [`TypeNode`]s and
//! [`PropertyNode`]s, indexed by local name.
//!
//! Loading is a two-pass process: every node is registered by identifier
//! first, then the subclass, domain, and range edges are resolved by lookup,
//! so forward references inside the graph are legal.
//!
//! # Entry Point
//!
//! ```
//! let raw = r#"{"@graph": [
//!     {"@id": "schema:Thing", "@type": "rdfs:Class", "rdfs:label": "Thing",
//!      "rdfs:comment": "The most generic type of item."}
//! ]}"#;
//! let registry = schemaorg_vocab::load_str(raw).unwrap();
//! assert!(registry.lookup("Thing").is_some());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod error;
pub mod loader;
pub mod model;

pub use error::VocabError;
pub use model::{Member, PropertyNode, Registry, TypeNode};

/// Parses a raw JSON-LD vocabulary document into a resolved [`Registry`].
///
/// # Errors
///
/// Returns [`VocabError::MalformedOntology`] if the document is not valid
/// JSON-LD, if a node's classification is missing or ambiguous, if an
/// identifier is duplicated, or if a schema-local reference never resolves
/// to a defined node.
pub fn load_str(raw: &str) -> Result<Registry, VocabError> {
    loader::load_str(raw)
}
