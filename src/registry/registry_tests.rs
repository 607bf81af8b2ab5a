//! Tests for view resolution and recycling.

use super::*;
use std::cell::Cell;
use std::rc::Rc;

/// Constructor that counts how many views it has built.
fn counting_constructor(name: &str) -> (ViewConstructor, Rc<Cell<usize>>) {
    let count = Rc::new(Cell::new(0));
    let counter = count.clone();
    let label = name.to_string();
    let constructor = ViewConstructor::new(name, move || {
        counter.set(counter.get() + 1);
        Rc::new(PlainView::new(label.clone())) as ViewRef
    });
    (constructor, count)
}

fn counting_template(name: &str, views: usize) -> (ViewTemplate, Rc<Cell<usize>>) {
    let count = Rc::new(Cell::new(0));
    let counter = count.clone();
    let template = ViewTemplate::new(name, move || {
        counter.set(counter.get() + 1);
        (0..views)
            .map(|i| Rc::new(PlainView::new(format!("top-{i}"))) as ViewRef)
            .collect()
    });
    (template, count)
}

// ===== Registration =====

#[test]
fn lookup_returns_registered_item() {
    let mut registry = Registry::new();
    registry.register("cell", ViewConstructor::of::<PlainView>("Cell"));

    let item = registry.lookup("cell").expect("registered");
    assert_eq!(item.name(), "Cell");
    assert_eq!(item.registry_type(), RegistryType::Regular);
    assert!(registry.lookup("other").is_none());
}

#[test]
fn register_overwrites_silently() {
    let mut registry = Registry::new();
    registry.register("cell", ViewConstructor::of::<PlainView>("First"));
    registry.register("cell", ViewTemplate::new("Second", Vec::new));

    let item = registry.lookup("cell").expect("registered");
    assert_eq!(item.name(), "Second");
    assert_eq!(registry.len(), 1);
}

#[test]
fn set_default_stores_item_under_default_key() {
    let mut registry = Registry::new();
    registry.set_default(ViewConstructor::of::<PlainView>("ListCell"));

    assert_eq!(registry.default_identifier().as_deref(), Some("regular:ListCell"));
    assert_eq!(
        registry.lookup("regular:ListCell").map(RegistryItem::name),
        Some("ListCell")
    );
    assert_eq!(registry.default_item().map(RegistryItem::name), Some("ListCell"));
}

#[test]
fn distinct_defaults_get_distinct_keys() {
    let mut registry = Registry::new();
    registry.set_default(ViewConstructor::of::<PlainView>("A"));
    registry.set_default(ViewConstructor::of::<PlainView>("B"));

    assert!(registry.contains("regular:A"), "previous default stays registered");
    assert!(registry.contains("regular:B"));
    assert_eq!(registry.default_identifier().as_deref(), Some("regular:B"));
}

// ===== Resolution =====

#[test]
fn resolve_view_twice_returns_same_instance_and_constructs_once() {
    let (constructor, count) = counting_constructor("Cell");
    let mut registry = Registry::new();
    registry.register("cell", constructor);

    let first = registry.resolve_view("cell");
    let second = registry.resolve_view("cell");

    assert_eq!(first.registry_type, Some(RegistryType::Regular));
    let (a, b) = (first.view.expect("view"), second.view.expect("view"));
    assert!(same_view(&a, &b));
    assert_eq!(count.get(), 1);
}

#[test]
fn template_views_are_recycled_too() {
    let (template, count) = counting_template("Row", 2);
    let mut registry = Registry::new();
    registry.register("row", template);

    let first = registry.resolve_view("row");
    let second = registry.resolve_view("row");

    assert_eq!(first.registry_type, Some(RegistryType::Template));
    assert!(same_view(
        first.view.as_ref().expect("view"),
        second.view.as_ref().expect("view")
    ));
    assert_eq!(count.get(), 1);
}

#[test]
fn purge_keeps_registration_but_produces_new_instance() {
    let (constructor, count) = counting_constructor("Cell");
    let mut registry = Registry::new();
    registry.register("cell", constructor);

    let before = registry.resolve_view("cell").view.expect("view");
    registry.purge();
    assert_eq!(registry.cached_len(), 0);

    let after = registry.resolve_view("cell");
    assert_eq!(after.registry_type, Some(RegistryType::Regular));
    assert!(!same_view(&before, &after.view.expect("view")));
    assert_eq!(count.get(), 2);
}

#[test]
fn unregistered_identifier_is_a_miss_without_cache_mutation() {
    let mut registry = Registry::new();
    registry.register("cell", ViewConstructor::of::<PlainView>("Cell"));

    let resolved = registry.resolve_view("unregistered");
    assert!(resolved.is_miss());
    assert!(resolved.registry_type.is_none());
    assert!(resolved.view.is_none());
    assert_eq!(registry.cached_len(), 0);
}

#[test]
fn failed_template_returns_tag_without_view_and_is_not_cached() {
    let (template, count) = counting_template("Broken", 0);
    let mut registry = Registry::new();
    registry.register("broken", template);

    let resolved = registry.resolve_view("broken");
    assert_eq!(resolved.registry_type, Some(RegistryType::Template));
    assert!(resolved.view.is_none());
    assert_eq!(registry.cached_len(), 0);

    registry.resolve_view("broken");
    assert_eq!(count.get(), 2, "failures are retried, not cached");
}

#[test]
fn constructor_and_template_with_same_identifier_do_not_collide() {
    let (constructor, _) = counting_constructor("Cell");
    let (template, _) = counting_template("Cell", 1);
    let mut registry = Registry::new();

    registry.register("cell", constructor);
    let regular = registry.resolve_view("cell").view.expect("view");

    registry.register("cell", template);
    let templated = registry.resolve_view("cell");

    assert_eq!(templated.registry_type, Some(RegistryType::Template));
    assert!(!same_view(&regular, &templated.view.expect("view")));
    assert_eq!(registry.cached_len(), 2);
}

#[test]
fn default_item_resolves_through_default_identifier() {
    let mut registry = Registry::with_default(ViewConstructor::of::<PlainView>("Cell"));
    let identifier = registry.default_identifier().expect("default set");

    let resolved = registry.resolve_view(&identifier);
    assert!(resolved.view.is_some());
}

#[test]
fn cached_view_survives_in_holder_after_purge() {
    let mut registry = Registry::new();
    registry.register("cell", ViewConstructor::of::<PlainView>("Cell"));

    let held = registry.resolve_view("cell").view.expect("view");
    registry.purge();

    held.configure(&crate::model::Item::new("still alive"));
    assert_eq!(Rc::strong_count(&held), 1);
}

// ===== Inheritance & pressure =====

#[test]
fn inherit_copies_registrations_with_empty_cache() {
    let mut shared = Registry::with_default(ViewConstructor::of::<PlainView>("Cell"));
    let identifier = shared.default_identifier().expect("default set");
    shared.resolve_view(&identifier);
    assert_eq!(shared.cached_len(), 1);

    let instance = shared.inherit();
    assert_eq!(instance.cached_len(), 0);
    assert_eq!(instance.default_identifier(), shared.default_identifier());
    assert!(instance.contains(&identifier));
}

#[test]
fn inherited_registrations_do_not_leak_into_shared_default() {
    let shared = Registry::with_default(ViewConstructor::of::<PlainView>("Cell"));
    let mut instance = shared.inherit();
    instance.register("custom", ViewConstructor::of::<PlainView>("Custom"));

    assert!(instance.contains("custom"));
    assert!(!shared.contains("custom"));
}

#[test]
fn moderate_memory_pressure_halves_cache() {
    let mut registry = Registry::new();
    for id in ["a", "b", "c", "d"] {
        registry.register(id, ViewConstructor::of::<PlainView>(id));
        registry.resolve_view(id);
    }

    registry.respond_to_memory_pressure(MemoryPressure::Moderate);
    assert_eq!(registry.cached_len(), 2);
    assert_eq!(registry.len(), 4, "registrations untouched");
}

#[test]
fn cache_capacity_bounds_cached_views() {
    let mut registry = Registry::with_cache_capacity(2);
    for id in ["a", "b", "c"] {
        registry.register(id, ViewConstructor::of::<PlainView>(id));
        registry.resolve_view(id);
    }
    assert_eq!(registry.cached_len(), 2);
    assert_eq!(registry.cache_capacity(), 2);

    registry.set_cache_capacity(1);
    assert_eq!(registry.cached_len(), 1);
}
