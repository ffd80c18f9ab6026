//! Two-pass JSON-LD vocabulary loader.
//!
//! Pass one registers every schema-local node in the `@graph` by its local
//! name and classifies it (type, property, or enumeration member) from its
//! `@type` marker. Pass two resolves the subclass, domain, and range edges
//! by identifier lookup, so nodes may reference each other in any order.
//!
//! References carrying a foreign prefix (`rdfs:Class` as a superclass, XSD
//! datatypes, and the like) are external to the vocabulary and ignored as
//! edges. A schema-local reference that never resolves to a defined node is
//! a dangling reference and fails the load.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::VocabError;
use crate::model::{Member, PropertyNode, Registry, TypeNode};

#[derive(Deserialize)]
struct Document {
    #[serde(rename = "@graph")]
    graph: Vec<Node>,
}

#[derive(Deserialize)]
struct Node {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "@type")]
    kind: Option<Refs>,
    #[serde(rename = "rdfs:comment")]
    comment: Option<Text>,
    #[serde(rename = "rdfs:subClassOf")]
    subclass_of: Option<Refs>,
    #[serde(rename = "schema:domainIncludes")]
    domain_includes: Option<Refs>,
    #[serde(rename = "schema:rangeIncludes")]
    range_includes: Option<Refs>,
}

/// A graph reference: either a bare IRI string or an `{"@id": ...}` object.
#[derive(Deserialize)]
#[serde(untagged)]
enum Ref {
    Iri(String),
    Node {
        #[serde(rename = "@id")]
        id: String,
    },
}

impl Ref {
    fn id(&self) -> &str {
        match self {
            Ref::Iri(id) | Ref::Node { id } => id,
        }
    }
}

/// One reference or a list of references; JSON-LD allows both shapes.
#[derive(Deserialize)]
#[serde(untagged)]
enum Refs {
    One(Ref),
    Many(Vec<Ref>),
}

fn ids(refs: &Option<Refs>) -> Vec<&str> {
    match refs {
        None => Vec::new(),
        Some(Refs::One(r)) => vec![r.id()],
        Some(Refs::Many(rs)) => rs.iter().map(Ref::id).collect(),
    }
}

/// A literal: either a plain string or a `{"@value": ...}` object.
#[derive(Deserialize)]
#[serde(untagged)]
enum Text {
    Plain(String),
    Tagged {
        #[serde(rename = "@value")]
        value: String,
    },
}

impl Text {
    fn value(&self) -> &str {
        match self {
            Text::Plain(s) | Text::Tagged { value: s } => s,
        }
    }
}

fn text(t: &Option<Text>) -> Option<String> {
    t.as_ref().map(|t| t.value().to_owned())
}

/// Strips the vocabulary's own prefix, returning `None` for external IRIs.
fn schema_local(id: &str) -> Option<&str> {
    id.strip_prefix("schema:")
        .or_else(|| id.strip_prefix("https://schema.org/"))
        .or_else(|| id.strip_prefix("http://schema.org/"))
}

/// Parses and resolves a raw JSON-LD vocabulary document.
///
/// # Errors
///
/// Returns [`VocabError::MalformedOntology`] on invalid JSON-LD, duplicate
/// identifiers, missing or ambiguous classification markers, dangling
/// schema-local references, or a property with an empty expected-type set.
pub fn load_str(raw: &str) -> Result<Registry, VocabError> {
    let doc: Document = serde_json::from_str(raw)
        .map_err(|e| VocabError::MalformedOntology(format!("invalid JSON-LD document: {e}")))?;

    let mut types: BTreeMap<String, TypeNode> = BTreeMap::new();
    let mut properties: BTreeMap<String, PropertyNode> = BTreeMap::new();
    // Enumeration member nodes: (member name, comment, declared type ids),
    // resolved after every type is registered.
    let mut members: Vec<(String, Option<String>, Vec<String>)> = Vec::new();

    // Pass 1: register identifiers and classify nodes.
    for node in &doc.graph {
        let Some(name) = schema_local(&node.id) else {
            continue; // foreign node, not part of the vocabulary
        };
        let kinds = ids(&node.kind);
        if kinds.is_empty() {
            return Err(VocabError::MalformedOntology(format!(
                "node `{}` has no classification marker",
                node.id
            )));
        }
        let is_class = kinds.contains(&"rdfs:Class");
        let is_property = kinds.contains(&"rdf:Property");
        if is_class && is_property {
            return Err(VocabError::MalformedOntology(format!(
                "node `{}` is classified as both a class and a property",
                node.id
            )));
        }

        if is_property {
            let previous = properties.insert(
                name.to_owned(),
                PropertyNode {
                    name: name.to_owned(),
                    comment: text(&node.comment),
                    range: Vec::new(),
                    domain: Vec::new(),
                },
            );
            if previous.is_some() {
                return Err(duplicate(&node.id));
            }
            continue;
        }

        if is_class {
            let data_type = kinds.iter().any(|k| matches!(schema_local(k), Some("DataType")));
            let previous = types.insert(
                name.to_owned(),
                TypeNode {
                    name: name.to_owned(),
                    comment: text(&node.comment),
                    parents: Vec::new(),
                    properties: Vec::new(),
                    members: Vec::new(),
                    data_type,
                },
            );
            if previous.is_some() {
                return Err(duplicate(&node.id));
            }
        }

        // Any schema-local entry in `@type` that is not a classification
        // marker declares this node an instance of that type.
        let declared: Vec<String> = kinds
            .iter()
            .filter_map(|k| schema_local(k))
            .filter(|k| *k != "DataType")
            .map(str::to_owned)
            .collect();
        if !is_class && declared.is_empty() {
            return Err(VocabError::MalformedOntology(format!(
                "node `{}` has no recognized classification",
                node.id
            )));
        }
        if !declared.is_empty() {
            members.push((name.to_owned(), text(&node.comment), declared));
        }
    }

    // Pass 2: resolve edges by identifier lookup.
    for node in &doc.graph {
        let Some(name) = schema_local(&node.id) else {
            continue;
        };

        if properties.contains_key(name) {
            let domain = resolve_refs(&node.domain_includes, &types, &node.id)?;
            let range = resolve_refs(&node.range_includes, &types, &node.id)?;
            if range.is_empty() {
                return Err(VocabError::MalformedOntology(format!(
                    "property `{}` has an empty expected-type set",
                    node.id
                )));
            }
            for declaring in &domain {
                if let Some(t) = types.get_mut(declaring) {
                    t.properties.push(name.to_owned());
                }
            }
            if let Some(p) = properties.get_mut(name) {
                p.domain = domain;
                p.range = range;
            }
        } else if types.contains_key(name) {
            let parents = resolve_refs(&node.subclass_of, &types, &node.id)?;
            if let Some(t) = types.get_mut(name) {
                t.parents = parents;
            }
        }
    }

    // Attach enumeration members to their declaring types.
    for (member, comment, declared) in members {
        for type_name in declared {
            let Some(t) = types.get_mut(&type_name) else {
                return Err(VocabError::MalformedOntology(format!(
                    "individual `{member}` declares undefined type `{type_name}`"
                )));
            };
            t.members.push(Member {
                name: member.clone(),
                comment: comment.clone(),
            });
        }
    }

    // Deterministic, deduplicated edge lists.
    for t in types.values_mut() {
        t.parents.sort_unstable();
        t.parents.dedup();
        t.properties.sort_unstable();
        t.properties.dedup();
        t.members.sort_by(|a, b| a.name.cmp(&b.name));
        t.members.dedup_by(|a, b| a.name == b.name);
    }
    for p in properties.values_mut() {
        p.domain.sort_unstable();
        p.domain.dedup();
        p.range.sort_unstable();
        p.range.dedup();
    }

    Ok(Registry::new(types, properties))
}

/// Resolves a reference edge list against the registered types, skipping
/// external IRIs and failing on dangling schema-local references.
fn resolve_refs(
    refs: &Option<Refs>,
    types: &BTreeMap<String, TypeNode>,
    owner: &str,
) -> Result<Vec<String>, VocabError> {
    let mut resolved = Vec::new();
    for id in ids(refs) {
        let Some(local) = schema_local(id) else {
            continue;
        };
        if !types.contains_key(local) {
            return Err(VocabError::MalformedOntology(format!(
                "node `{owner}` references undefined identifier `{id}`"
            )));
        }
        resolved.push(local.to_owned());
    }
    Ok(resolved)
}

fn duplicate(id: &str) -> VocabError {
    VocabError::MalformedOntology(format!("duplicate identifier `{id}`"))
}
