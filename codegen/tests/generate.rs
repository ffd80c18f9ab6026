//! End-to-end generation over a miniature vocabulary fixture.
//!
//! The fixture mirrors the real vocabulary's shapes: a small inheritance
//! forest under `Thing`, an enumeration with two members, scalar data
//! types, a multi-type property range, and two reference cycles
//! (`Offer` ↔ `Product`, `Person` ↔ `Organization`).

use schemaorg_codegen::{generate, GenError, Policy};
use schemaorg_vocab::{load_str, Registry};

const VOCAB: &str = include_str!("fixtures/mini-vocabulary.jsonld");

fn registry() -> Registry {
    load_str(VOCAB).expect("fixture vocabulary parses")
}

fn render(roots: &[&str], policy: Policy) -> String {
    let roots: Vec<String> = roots.iter().map(|r| (*r).to_owned()).collect();
    generate(&registry(), &roots, policy)
        .expect("generation succeeds")
        .source
}

fn item_position(source: &str, name: &str) -> usize {
    let struct_decl = format!("pub struct {name} {{");
    let enum_decl = format!("pub enum {name} {{");
    source
        .find(&struct_decl)
        .or_else(|| source.find(&enum_decl))
        .unwrap_or_else(|| panic!("`{name}` not found in output"))
}

#[test]
fn single_shallow_root_emits_exactly_the_ancestor_chain() {
    let source = render(&["Offer"], Policy::Shallow);
    for expected in ["Thing", "Intangible", "Offer"] {
        assert!(
            source.contains(&format!("pub struct {expected} {{")),
            "missing {expected}"
        );
    }
    for excluded in ["Product", "Person", "Organization", "QuantitativeValue"] {
        assert!(
            !source.contains(&format!("pub struct {excluded} {{")),
            "{excluded} should not be emitted"
        );
    }
    assert!(!source.contains("pub enum DeliveryMethod"));
}

#[test]
fn ancestors_appear_before_descendants() {
    let source = render(&["Offer"], Policy::Shallow);
    let thing = item_position(&source, "Thing");
    let intangible = item_position(&source, "Intangible");
    let offer = item_position(&source, "Offer");
    assert!(thing < intangible && intangible < offer);
}

#[test]
fn multiple_shallow_roots_emit_shared_ancestors_once() {
    let source = render(&["Product", "Offer", "QuantitativeValue"], Policy::Shallow);
    for expected in [
        "Thing",
        "Intangible",
        "StructuredValue",
        "QuantitativeValue",
        "Product",
        "Offer",
    ] {
        let decl = format!("pub struct {expected} {{");
        assert_eq!(
            source.matches(&decl).count(),
            1,
            "{expected} must be emitted exactly once"
        );
    }
}

#[test]
fn greedy_selection_chases_property_references() {
    let source = render(&["Offer"], Policy::Greedy);
    // Reachable through itemOffered, weight, and availableDeliveryMethod.
    assert!(source.contains("pub struct Product {"));
    assert!(source.contains("pub struct QuantitativeValue {"));
    assert!(source.contains("pub enum DeliveryMethod {"));
    // Not reachable from Offer at all.
    assert!(!source.contains("pub struct Person {"));
    assert!(!source.contains("pub struct Organization {"));
}

#[test]
fn greedy_reference_cycle_terminates_with_exact_closure() {
    let registry = registry();
    let generated = generate(&registry, &["Person".to_owned()], Policy::Greedy)
        .expect("generation succeeds");
    // Person -> Organization (worksFor) -> Person (founder) is a cycle;
    // the closure is exactly the pair plus their shared ancestor.
    assert_eq!(generated.report.models, 3);
    assert!(generated.source.contains("pub struct Person {"));
    assert!(generated.source.contains("pub struct Organization {"));
    assert!(generated.source.contains("pub struct Thing {"));
}

#[test]
fn wildcard_emits_every_type_exactly_once() {
    let registry = registry();
    let generated = generate(&registry, &["all".to_owned()], Policy::All)
        .expect("generation succeeds");
    // 10 non-scalar types in the fixture: 9 models + 1 enumeration.
    assert_eq!(generated.report.models, 9);
    assert_eq!(generated.report.enums, 1);
    for name in [
        "Thing",
        "Intangible",
        "StructuredValue",
        "QuantitativeValue",
        "Enumeration",
        "Product",
        "Offer",
        "Person",
        "Organization",
    ] {
        assert_eq!(
            generated.source.matches(&format!("pub struct {name} {{")).count(),
            1
        );
    }
    assert_eq!(
        generated.source.matches("pub enum DeliveryMethod {").count(),
        1
    );
    // Scalars never render as models.
    assert!(!generated.source.contains("pub struct Text {"));
    assert!(!generated.source.contains("pub struct Integer {"));
}

#[test]
fn output_is_byte_identical_across_runs() {
    let first = render(&["Offer"], Policy::Greedy);
    let second = render(&["Offer"], Policy::Greedy);
    assert_eq!(first, second);
}

#[test]
fn every_model_binds_its_own_marker() {
    let source = render(&["all"], Policy::All);
    for name in ["Thing", "Offer", "Product", "Person", "Organization"] {
        assert!(
            source.contains(&format!("pub const TYPE: &'static str = \"{name}\";")),
            "marker for {name} missing"
        );
    }
    // One marker per model, renamed to the JSON-LD discriminator key.
    assert_eq!(
        source.matches("pub const TYPE: &'static str").count(),
        9
    );
    assert_eq!(
        source.matches("#[serde(rename = \"@type\"").count(),
        9
    );
}

#[test]
fn union_variants_are_ordered_by_specificity() {
    let source = render(&["Offer"], Policy::Shallow);
    // price: Number is more specific than Text under untagged decoding.
    let number = source.find("    Number(f64),").expect("Number variant");
    let text = source.find("    Text(String),").expect("Text variant");
    assert!(number < text);
    assert!(source.contains("pub enum Price {"));
    assert!(source.contains("pub price: Option<OneOrMany<Price>>,"));
}

#[test]
fn union_names_avoid_preamble_collisions() {
    let source = render(&["QuantitativeValue"], Policy::Shallow);
    // The `value` property would pascal-case to `Value`, which the open
    // placeholder import already occupies.
    assert!(source.contains("pub enum ValueUnion {"));
    assert!(source.contains("pub value: Option<OneOrMany<ValueUnion>>,"));
}

#[test]
fn excluded_expected_types_degrade_to_open_values() {
    let source = render(&["Offer"], Policy::Shallow);
    // Product and DeliveryMethod are outside the shallow selection.
    assert!(source.contains("use serde_json::Value;"));
    assert!(source.contains("pub item_offered: Option<Value>,"));
    assert!(source.contains("pub available_delivery_method: Option<Value>,"));
    // In greedy mode the same fields resolve to real references.
    let greedy = render(&["Offer"], Policy::Greedy);
    assert!(greedy.contains("pub item_offered: Option<OneOrMany<Box<Product>>>,"));
    assert!(greedy.contains(
        "pub available_delivery_method: Option<OneOrMany<DeliveryMethod>>,"
    ));
}

#[test]
fn inherited_fields_are_flattened_into_descendants() {
    let source = render(&["Offer"], Policy::Shallow);
    // `name` is declared on Thing and must reappear on every descendant.
    assert_eq!(
        source.matches("pub name: Option<OneOrMany<String>>,").count(),
        3
    );
}

#[test]
fn fields_keep_their_wire_names() {
    let source = render(&["Offer"], Policy::Greedy);
    assert!(source.contains(
        "#[serde(rename = \"availableDeliveryMethod\", default, skip_serializing_if = \"Option::is_none\")]"
    ));
    // Single-word properties need no rename.
    assert!(source.contains("#[serde(default, skip_serializing_if = \"Option::is_none\")]"));
}

#[test]
fn enumeration_members_become_variants() {
    let source = render(&["Offer"], Policy::Greedy);
    let decl = source
        .find("pub enum DeliveryMethod {")
        .expect("enumeration emitted");
    let locker = source.find("    LockerDelivery,").expect("LockerDelivery");
    let pickup = source.find("    OnSitePickup,").expect("OnSitePickup");
    assert!(decl < locker && locker < pickup);
}

#[test]
fn unknown_root_aborts_without_output() {
    let registry = registry();
    let err = generate(&registry, &["NoSuchModel".to_owned()], Policy::Shallow)
        .expect_err("generation must fail");
    assert!(matches!(err, GenError::UnknownRoot(ref name) if name == "NoSuchModel"));
    assert!(err.to_string().contains("NoSuchModel"));
}
