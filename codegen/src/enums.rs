//! Enumeration rendering.
//!
//! A vocabulary type whose instances are declared as named individuals in
//! the graph (e.g. `DeliveryMethod` with `LockerDelivery`, `OnSitePickup`)
//! is a closed value set, not a record: it renders as a plain Rust enum.
//! The serialized variant name is the member's own identifier, which makes
//! it its own discriminator; no separate `@type` marker is needed.

use std::fmt::Write as FmtWrite;

use schemaorg_vocab::TypeNode;

use crate::emit::{normalize_comment, RustFile};
use crate::mapping::rust_type_name;

/// Whether a selected type renders as an enumeration.
#[must_use]
pub fn is_enumeration(node: &TypeNode) -> bool {
    !node.members.is_empty()
}

/// Renders one enumeration type.
pub fn render_enumeration(f: &mut RustFile, node: &TypeNode) {
    match &node.comment {
        Some(comment) => f.doc_comment(&normalize_comment(comment)),
        None => f.doc_comment(&format!("The schema.org `{}` enumeration.", node.name)),
    }
    if !node.parents.is_empty() {
        f.doc_comment("");
        f.doc_comment(&format!("Subclass of: {}.", node.parents.join(", ")));
    }
    f.line("#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]");
    let _ = writeln!(f.buf, "pub enum {} {{", rust_type_name(&node.name));
    for member in &node.members {
        if let Some(comment) = &member.comment {
            f.indented_doc_comment(&normalize_comment(comment));
        }
        let variant = rust_type_name(&member.name);
        if variant == member.name {
            let _ = writeln!(f.buf, "    {variant},");
        } else {
            // Escaped variant keeps its wire form through a serde rename.
            let _ = writeln!(f.buf, "    #[serde(rename = \"{}\")]", member.name);
            let _ = writeln!(f.buf, "    {variant},");
        }
    }
    f.line("}");
    f.blank();
}
