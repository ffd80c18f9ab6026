//! Type selection: which vocabulary types a generation run emits.
//!
//! Three policies, matching the CLI surface: `Shallow` prunes to the named
//! roots (plus required ancestors), `Greedy` additionally chases property
//! expected-types transitively, and `All` takes the whole vocabulary.
//!
//! Both root-driven policies apply the ancestor rule: a generated model's
//! fields are flattened from its ancestors, so every ancestor of an
//! included type must itself be included.

use std::collections::{BTreeSet, VecDeque};

use schemaorg_vocab::{Registry, TypeNode};

use crate::mapping::scalar_type;
use crate::GenError;

/// Selection policy for a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Only the named roots and their transitive ancestors.
    Shallow,
    /// Roots, ancestors, and the transitive closure over every type
    /// reachable through property expected-types.
    Greedy,
    /// Every type in the registry; root names are ignored, so the
    /// shallow/greedy distinction is a documented no-op in this mode.
    All,
}

/// The set of type names marked for emission.
///
/// Backed by a `BTreeSet`, so two selections over the same input are equal
/// under the total order, not merely equal in content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet {
    included: BTreeSet<String>,
}

impl SelectionSet {
    /// Whether the named type is selected.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.included.contains(name)
    }

    /// Iterates over selected names in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.included.iter().map(String::as_str)
    }

    /// Number of selected types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.included.len()
    }

    /// Whether the selection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.included.is_empty()
    }
}

/// Computes the selection for the given roots and policy.
///
/// # Errors
///
/// Returns [`GenError::UnknownRoot`] if a root name is not present in the
/// registry (`All` bypasses root validation entirely), or a wrapped
/// [`schemaorg_vocab::VocabError`] if registry resolution fails.
pub fn select(
    registry: &Registry,
    roots: &[String],
    policy: Policy,
) -> Result<SelectionSet, GenError> {
    let mut included = BTreeSet::new();
    match policy {
        Policy::All => {
            let members: BTreeSet<&str> = registry
                .types()
                .flat_map(|t| t.members.iter().map(|m| m.name.as_str()))
                .collect();
            for t in registry.types() {
                if selectable(t) && !members.contains(t.name.as_str()) {
                    included.insert(t.name.clone());
                }
            }
        }
        Policy::Shallow => {
            for root in validate_roots(registry, roots)? {
                include_with_ancestors(registry, &mut included, root)?;
            }
        }
        Policy::Greedy => {
            let mut queue: VecDeque<String> = validate_roots(registry, roots)?
                .into_iter()
                .map(str::to_owned)
                .collect();
            let mut expanded: BTreeSet<String> = BTreeSet::new();
            while let Some(name) = queue.pop_front() {
                if !expanded.insert(name.clone()) {
                    continue;
                }
                let ancestors = include_with_ancestors(registry, &mut included, &name)?;
                // Ancestors participate in expansion too: their properties
                // are part of every descendant's flattened field set.
                queue.extend(ancestors);
                for prop_name in &registry.get(&name)?.properties {
                    let prop = registry.property(prop_name)?;
                    for expected in &prop.range {
                        if scalar_type(expected).is_none() {
                            queue.push_back(expected.clone());
                        }
                    }
                }
            }
        }
    }
    Ok(SelectionSet { included })
}

/// Resolves root names against the registry, failing on the first unknown.
fn validate_roots<'a>(
    registry: &Registry,
    roots: &'a [String],
) -> Result<Vec<&'a str>, GenError> {
    let mut resolved = Vec::with_capacity(roots.len());
    for root in roots {
        if registry.lookup(root).is_none() {
            return Err(GenError::UnknownRoot(root.clone()));
        }
        resolved.push(root.as_str());
    }
    Ok(resolved)
}

/// Adds a type and all of its ancestors to the selection, returning the
/// ancestor names. Scalar data types never enter the selection; they map
/// to Rust scalars at emission time.
fn include_with_ancestors(
    registry: &Registry,
    included: &mut BTreeSet<String>,
    name: &str,
) -> Result<Vec<String>, GenError> {
    let node = registry.get(name)?;
    if selectable(node) {
        included.insert(node.name.clone());
    }
    let ancestors = registry.ancestors(name)?;
    for ancestor in &ancestors {
        let node = registry.get(ancestor)?;
        if selectable(node) {
            included.insert(node.name.clone());
        }
    }
    Ok(ancestors)
}

fn selectable(node: &TypeNode) -> bool {
    !node.data_type && scalar_type(&node.name).is_none()
}
