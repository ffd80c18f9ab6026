//! Model rendering: one vocabulary type → one serde struct.
//!
//! Rust has no struct inheritance, so every model declares the flattened
//! union of its own and all ancestors' applicable properties, deduplicated
//! by property identifier (schema.org property definitions are global, so a
//! name collision is always the same property). Parent names survive in the
//! model's doc comment.
//!
//! Each model carries the JSON-LD `@type` discriminator as a `type_` field
//! renamed to `@type` on the wire, with a trailing `impl` block binding the
//! marker value: always the type's own name, never an ancestor's.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt::Write as FmtWrite;

use schemaorg_vocab::{PropertyNode, Registry, TypeNode};

use crate::emit::{normalize_comment, RustFile};
use crate::mapping::{rust_type_name, scalar_type, specificity, to_snake_case};
use crate::select::SelectionSet;
use crate::GenError;

/// One resolved field line of a model.
pub struct Field {
    /// Wire name (the property's identifier, e.g. `priceSpecification`).
    pub wire: String,
    /// Rust identifier (snake_case, keyword-escaped).
    pub ident: String,
    /// Wrapped doc comment source, if the property has a description.
    pub comment: Option<String>,
    /// Full Rust type expression.
    pub ty: String,
}

/// A property whose expected-type set needs a generated union enum.
pub struct Union {
    /// Rust enum name, unique among all emitted items.
    pub name: String,
    /// The owning property's identifier.
    pub property: String,
    /// Doc comment source.
    pub comment: Option<String>,
    /// Variants in declaration order: (variant name, inner type).
    pub variants: Vec<(String, String)>,
    /// Whether part of the range was excluded from the selection, adding a
    /// trailing open `Other(Value)` variant.
    pub open: bool,
}

/// Field and union resolution for a whole emission pass.
pub struct Resolved {
    /// Type name → field lines, sorted by wire name.
    pub fields: BTreeMap<String, Vec<Field>>,
    /// Property name → union enum.
    pub unions: BTreeMap<String, Union>,
    /// Whether any field degraded to the open `serde_json::Value`.
    pub uses_value: bool,
    /// Total number of rendered field lines (markers excluded).
    pub field_count: usize,
}

/// Resolves every selected non-enumeration type's flattened field set, and
/// collects the union enums required by multi-type property ranges.
///
/// # Errors
///
/// Returns a wrapped [`schemaorg_vocab::VocabError`] if a selected name or
/// one of its properties is missing from the registry.
pub fn resolve(
    registry: &Registry,
    selection: &SelectionSet,
    sequence: &[String],
) -> Result<Resolved, GenError> {
    let mut resolved = Resolved {
        fields: BTreeMap::new(),
        unions: BTreeMap::new(),
        uses_value: false,
        field_count: 0,
    };

    // Union names must not collide with emitted models, enumerations, the
    // preamble items, or each other; allocated union names join the list.
    let mut taken: Vec<String> = selection.iter().map(rust_type_name).collect();
    taken.push("OneOrMany".to_owned());
    taken.push("Value".to_owned());

    for name in sequence {
        let node = registry.get(name)?;
        if !node.members.is_empty() {
            continue; // enumerations render as value enums, not structs
        }

        // Flattened applicable properties: own declarations first, then
        // every ancestor's, deduplicated by identifier (own wins).
        let mut applicable: BTreeMap<&str, &PropertyNode> = BTreeMap::new();
        for prop_name in &node.properties {
            applicable.insert(prop_name, registry.property(prop_name)?);
        }
        for ancestor in registry.ancestors(name)? {
            for prop_name in &registry.get(&ancestor)?.properties {
                if !applicable.contains_key(prop_name.as_str()) {
                    applicable.insert(prop_name, registry.property(prop_name)?);
                }
            }
        }

        let mut fields = Vec::with_capacity(applicable.len());
        for prop in applicable.values() {
            fields.push(resolve_field(registry, selection, prop, &mut taken, &mut resolved)?);
        }
        resolved.field_count += fields.len();
        resolved.fields.insert(name.clone(), fields);
    }

    Ok(resolved)
}

/// Resolves one property into a field line, registering a union enum when
/// the expected-type set has more than one usable member.
fn resolve_field(
    registry: &Registry,
    selection: &SelectionSet,
    prop: &PropertyNode,
    taken: &mut Vec<String>,
    resolved: &mut Resolved,
) -> Result<Field, GenError> {
    let mut included: Vec<&str> = Vec::new();
    let mut open = false;
    for expected in &prop.range {
        if scalar_type(expected).is_some() || selection.contains(expected) {
            included.push(expected);
        } else {
            // Excluded by the selection policy: degrade to an open value
            // instead of failing. The reference resolves at load time of
            // the generated artifact, not here.
            open = true;
        }
    }

    let ty = match (included.len(), open) {
        (0, _) => {
            resolved.uses_value = true;
            "Option<Value>".to_owned()
        }
        (1, false) => format!(
            "Option<OneOrMany<{}>>",
            embedded_type(registry, included[0])
        ),
        _ => {
            if open {
                resolved.uses_value = true;
            }
            let union = match resolved.unions.entry(prop.name.clone()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let union = build_union(registry, prop, &included, open, taken);
                    taken.push(union.name.clone());
                    entry.insert(union)
                }
            };
            format!("Option<OneOrMany<{}>>", union.name)
        }
    };

    Ok(Field {
        wire: prop.name.clone(),
        ident: to_snake_case(&prop.name),
        comment: prop.comment.as_deref().map(normalize_comment),
        ty,
    })
}

/// Builds the union enum for a multi-type property range. Variants are
/// ordered most-specific-first, then lexicographically; model references
/// (specificity 0) therefore come after every scalar, and the open variant
/// is always last.
fn build_union(
    registry: &Registry,
    prop: &PropertyNode,
    included: &[&str],
    open: bool,
    taken: &[String],
) -> Union {
    let mut names: Vec<&str> = included.to_vec();
    names.sort_by(|a, b| {
        specificity(b)
            .cmp(&specificity(a))
            .then_with(|| a.cmp(b))
    });
    let variants = names
        .iter()
        .map(|n| (rust_type_name(n), embedded_type(registry, n)))
        .collect();
    let mut name = pascal_case(&prop.name);
    while taken.contains(&name) {
        name.push_str("Union");
    }
    Union {
        name,
        property: prop.name.clone(),
        comment: prop.comment.as_deref().map(normalize_comment),
        variants,
        open,
    }
}

/// The Rust type used to embed a reference to `name` inside a field or
/// union variant. Model references are boxed because the reference graph
/// is cyclic; enumerations are plain values.
fn embedded_type(registry: &Registry, name: &str) -> String {
    if let Some(scalar) = scalar_type(name) {
        return scalar.to_owned();
    }
    let is_enumeration = registry
        .lookup(name)
        .is_some_and(|t| !t.members.is_empty());
    if is_enumeration {
        rust_type_name(name)
    } else {
        format!("Box<{}>", rust_type_name(name))
    }
}

fn pascal_case(name: &str) -> String {
    let mut chars = name.chars();
    let capitalized = match chars.next() {
        None => String::new(),
        Some(c) => {
            let mut s = c.to_uppercase().to_string();
            s.push_str(chars.as_str());
            s
        }
    };
    rust_type_name(&capitalized)
}

/// Renders one union enum.
pub fn render_union(f: &mut RustFile, union: &Union) {
    f.doc_comment(&format!(
        "Allowed value types for the `{}` property.",
        union.property
    ));
    if let Some(comment) = &union.comment {
        f.doc_comment("");
        f.doc_comment(comment);
    }
    f.line("#[derive(Debug, Clone, Serialize, Deserialize)]");
    f.line("#[serde(untagged)]");
    let _ = writeln!(f.buf, "pub enum {} {{", union.name);
    for (variant, inner) in &union.variants {
        f.indented_doc_comment(&format!("A `{variant}` value."));
        let _ = writeln!(f.buf, "    {variant}({inner}),");
    }
    if union.open {
        f.indented_doc_comment("A value of a type outside this generated set.");
        f.line("    Other(Value),");
    }
    f.line("}");
    f.blank();
}

/// Renders one model struct and its trailing marker `impl`.
pub fn render_model(f: &mut RustFile, node: &TypeNode, fields: &[Field]) {
    let rust_name = rust_type_name(&node.name);

    match &node.comment {
        Some(comment) => f.doc_comment(&normalize_comment(comment)),
        None => f.doc_comment(&format!("The schema.org `{}` type.", node.name)),
    }
    if !node.parents.is_empty() {
        f.doc_comment("");
        f.doc_comment(&format!("Subclass of: {}.", node.parents.join(", ")));
    }
    f.line("#[derive(Debug, Clone, Serialize, Deserialize)]");
    let _ = writeln!(f.buf, "pub struct {rust_name} {{");

    f.indented_doc_comment(&format!(
        "JSON-LD type discriminator; always `\"{}\"` for this model.",
        node.name
    ));
    let _ = writeln!(
        f.buf,
        "    #[serde(rename = \"@type\", default = \"{rust_name}::type_marker\")]"
    );
    f.line("    pub type_: String,");

    for field in fields {
        if let Some(comment) = &field.comment {
            f.indented_doc_comment(comment);
        }
        if field.wire == field.ident {
            f.line("    #[serde(default, skip_serializing_if = \"Option::is_none\")]");
        } else {
            let _ = writeln!(
                f.buf,
                "    #[serde(rename = \"{}\", default, skip_serializing_if = \"Option::is_none\")]",
                field.wire
            );
        }
        let _ = writeln!(f.buf, "    pub {}: {},", field.ident, field.ty);
    }
    f.line("}");
    f.blank();

    let _ = writeln!(f.buf, "impl {rust_name} {{");
    f.indented_doc_comment("The schema.org type marker for this model.");
    let _ = writeln!(
        f.buf,
        "    pub const TYPE: &'static str = \"{}\";",
        node.name
    );
    f.blank();
    f.line("    fn type_marker() -> String {");
    f.line("        Self::TYPE.to_owned()");
    f.line("    }");
    f.line("}");
    f.blank();
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::order::order;
    use crate::select::{select, Policy};
    use schemaorg_vocab::load_str;

    #[test]
    fn union_names_stay_unique_across_properties() {
        // `review` pascal-cases onto the selected `Review` type and gets
        // suffixed to `ReviewUnion`; `reviewUnion` pascal-cases straight to
        // that same name and must be suffixed past it.
        let registry = load_str(
            r#"{"@graph": [
                {"@id": "schema:Thing", "@type": "rdfs:Class"},
                {"@id": "schema:Review", "@type": "rdfs:Class",
                 "rdfs:subClassOf": {"@id": "schema:Thing"}},
                {"@id": "schema:Text", "@type": ["rdfs:Class", "schema:DataType"]},
                {"@id": "schema:Number", "@type": ["rdfs:Class", "schema:DataType"]},
                {"@id": "schema:URL", "@type": ["rdfs:Class", "schema:DataType"]},
                {"@id": "schema:review", "@type": "rdf:Property",
                 "schema:domainIncludes": {"@id": "schema:Thing"},
                 "schema:rangeIncludes": [
                    {"@id": "schema:Review"}, {"@id": "schema:Text"}]},
                {"@id": "schema:reviewUnion", "@type": "rdf:Property",
                 "schema:domainIncludes": {"@id": "schema:Thing"},
                 "schema:rangeIncludes": [
                    {"@id": "schema:Number"}, {"@id": "schema:URL"}]}
            ]}"#,
        )
        .unwrap();
        let selection = select(&registry, &[], Policy::All).unwrap();
        let sequence = order(&selection, &registry).unwrap();
        let resolved = resolve(&registry, &selection, &sequence).unwrap();

        assert_eq!(resolved.unions["review"].name, "ReviewUnion");
        assert_eq!(resolved.unions["reviewUnion"].name, "ReviewUnionUnion");
    }
}
