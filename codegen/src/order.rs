//! Deterministic emission ordering.
//!
//! Topological sort over the inheritance edges restricted to the selected
//! set: every type is emitted after all of its ancestors. Ties break
//! lexicographically so repeated runs over identical input produce an
//! identical sequence.
//!
//! Property-reference edges are never consulted here: they are allowed to
//! form cycles and are resolved by name at the representation level, not
//! by ordering.

use std::collections::{BTreeMap, BTreeSet};

use schemaorg_vocab::Registry;

use crate::select::SelectionSet;
use crate::GenError;

/// Computes the emission order for a selection.
///
/// # Errors
///
/// Returns [`GenError::CycleDetected`] if the inheritance edges contain a
/// cycle, or a wrapped [`schemaorg_vocab::VocabError`] if a selected name
/// is missing from the registry.
pub fn order(selection: &SelectionSet, registry: &Registry) -> Result<Vec<String>, GenError> {
    let mut indegree: BTreeMap<&str, usize> = selection.iter().map(|n| (n, 0)).collect();
    let mut children: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

    for name in selection.iter() {
        for parent in &registry.get(name)?.parents {
            if selection.contains(parent) {
                if let Some(d) = indegree.get_mut(name) {
                    *d += 1;
                }
                children.entry(parent.as_str()).or_default().push(name);
            }
        }
    }

    // Kahn's algorithm with a BTreeSet frontier: the smallest ready name is
    // always emitted next, which fixes the tie-break.
    let mut ready: BTreeSet<&str> = indegree
        .iter()
        .filter(|(_, d)| **d == 0)
        .map(|(n, _)| *n)
        .collect();
    let mut sequence = Vec::with_capacity(selection.len());

    while let Some(&next) = ready.iter().next() {
        ready.remove(next);
        sequence.push(next.to_owned());
        if let Some(kids) = children.get(next) {
            for &kid in kids {
                if let Some(d) = indegree.get_mut(kid) {
                    *d -= 1;
                    if *d == 0 {
                        ready.insert(kid);
                    }
                }
            }
        }
    }

    if sequence.len() < selection.len() {
        let stuck = indegree
            .iter()
            .find(|(_, d)| **d > 0)
            .map_or_else(String::new, |(n, _)| (*n).to_owned());
        return Err(GenError::CycleDetected(stuck));
    }
    Ok(sequence)
}
