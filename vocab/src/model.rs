//! Core vocabulary model types.
//!
//! These types are the resolved, queryable form of the loaded graph. They
//! are created once by the loader and immutable thereafter; every later
//! stage (selection, ordering, emission) only reads them.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::VocabError;

/// One schema.org type definition (an `rdfs:Class` node).
#[derive(Debug, Clone)]
pub struct TypeNode {
    /// Local identifier, globally unique (e.g. `"Offer"`).
    pub name: String,
    /// The `rdfs:comment` description, if present.
    pub comment: Option<String>,
    /// Local names of direct parent types (`rdfs:subClassOf`), sorted.
    /// Empty for a root of the inheritance forest. Multiple inheritance
    /// is legal in the vocabulary.
    pub parents: Vec<String>,
    /// Local names of properties declared directly applicable to this type
    /// (`schema:domainIncludes`), sorted. Inherited properties are computed
    /// by callers walking `parents`.
    pub properties: Vec<String>,
    /// Named individuals declared as instances of this type, sorted by name.
    /// A non-empty set marks this type as an enumeration.
    pub members: Vec<Member>,
    /// Whether the node is also marked `schema:DataType`.
    pub data_type: bool,
}

/// A named individual belonging to an enumeration type.
#[derive(Debug, Clone)]
pub struct Member {
    /// Local identifier (e.g. `"LockerDelivery"`).
    pub name: String,
    /// The `rdfs:comment` description, if present.
    pub comment: Option<String>,
}

/// One schema.org property definition (an `rdf:Property` node).
#[derive(Debug, Clone)]
pub struct PropertyNode {
    /// Local identifier, globally unique (e.g. `"priceSpecification"`).
    pub name: String,
    /// The `rdfs:comment` description, if present.
    pub comment: Option<String>,
    /// Local names of the expected value types (`schema:rangeIncludes`),
    /// sorted and non-empty.
    pub range: Vec<String>,
    /// Local names of the types declaring this property applicable
    /// (`schema:domainIncludes`), sorted.
    pub domain: Vec<String>,
}

/// The resolved, read-only vocabulary registry.
///
/// Backed by `BTreeMap`s so every iteration order is deterministic.
#[derive(Debug)]
pub struct Registry {
    types: BTreeMap<String, TypeNode>,
    properties: BTreeMap<String, PropertyNode>,
}

impl Registry {
    pub(crate) fn new(
        types: BTreeMap<String, TypeNode>,
        properties: BTreeMap<String, PropertyNode>,
    ) -> Self {
        Registry { types, properties }
    }

    /// Looks up a type by local name.
    ///
    /// # Errors
    ///
    /// Returns [`VocabError::UnknownType`] if no such type exists.
    pub fn get(&self, name: &str) -> Result<&TypeNode, VocabError> {
        self.types
            .get(name)
            .ok_or_else(|| VocabError::UnknownType(name.to_owned()))
    }

    /// Looks up a type by local name, returning `None` if absent.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&TypeNode> {
        self.types.get(name)
    }

    /// Looks up a property by local name.
    ///
    /// # Errors
    ///
    /// Returns [`VocabError::UnknownType`] if no such property exists.
    pub fn property(&self, name: &str) -> Result<&PropertyNode, VocabError> {
        self.properties
            .get(name)
            .ok_or_else(|| VocabError::UnknownType(name.to_owned()))
    }

    /// Iterates over all types in lexicographic name order.
    pub fn types(&self) -> impl Iterator<Item = &TypeNode> {
        self.types.values()
    }

    /// Returns the number of types in the registry.
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Returns the transitive ancestors of a type, sorted, excluding the
    /// type itself. Diamond inheritance is walked once per ancestor.
    ///
    /// # Errors
    ///
    /// Returns [`VocabError::UnknownType`] if `name` or any referenced
    /// parent is not registered (the loader guarantees the latter cannot
    /// happen for a loaded registry).
    pub fn ancestors(&self, name: &str) -> Result<Vec<String>, VocabError> {
        let mut seen: BTreeSet<String> = BTreeSet::new();
        let mut pending: Vec<&str> = self.get(name)?.parents.iter().map(String::as_str).collect();
        while let Some(next) = pending.pop() {
            if !seen.insert(next.to_owned()) {
                continue;
            }
            for parent in &self.get(next)?.parents {
                pending.push(parent);
            }
        }
        Ok(seen.into_iter().collect())
    }
}
