//! End-to-end checks of document → spots → views through the public API.

use serde_json::json;
use spots::composite::{CompositeDelegate, CompositeSpots};
use spots::composition::Composition;
use spots::factory::Factory;
use spots::model::Component;
use spots::parser::{Parser, DEFAULT_ROOT_KEY};
use spots::registry::{same_view, PlainView, Registry, ViewConstructor, ViewRef, ViewTemplate};
use spots::spots::{ListSpot, Renderable};
use std::cell::Cell;
use std::rc::Rc;

fn counted(count: &Rc<Cell<usize>>) -> ViewConstructor {
    let counter = count.clone();
    ViewConstructor::new("Counted", move || {
        counter.set(counter.get() + 1);
        Rc::new(PlainView::new("counted")) as ViewRef
    })
}

#[test]
fn parsed_components_are_indexed_by_position() {
    let document = json!({ "components": [
        { "kind": "list", "index": 3 }, { "kind": "grid", "index": 3 }, { "index": 0 }
    ] });
    let factory = Factory::with_builtins();
    let spots = Parser::new(&factory).parse_renderables(&document, DEFAULT_ROOT_KEY);

    let indices: Vec<usize> = spots.iter().map(|spot| spot.component().index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn malformed_component_array_renders_nothing() {
    let factory = Factory::with_builtins();
    let parser = Parser::new(&factory);

    for document in [
        json!({ "components": [3, null] }),
        json!({ "components": [{ "kind": "list" }, "x"] }),
        json!({ "components": "list" }),
    ] {
        assert!(parser.parse_renderables(&document, DEFAULT_ROOT_KEY).is_empty());
        assert!(Composition::from_document(&parser, &document, DEFAULT_ROOT_KEY).is_empty());
    }
}

#[test]
fn resolving_twice_reuses_one_instance() {
    let count = Rc::new(Cell::new(0));
    let mut registry = Registry::new();
    registry.register("cell", counted(&count));

    let first = registry.resolve_view("cell").view.expect("produced");
    let second = registry.resolve_view("cell").view.expect("cached");

    assert!(same_view(&first, &second));
    assert_eq!(count.get(), 1);
}

#[test]
fn purge_keeps_registrations_but_drops_instances() {
    let count = Rc::new(Cell::new(0));
    let mut registry = Registry::new();
    registry.register("cell", counted(&count));

    let before = registry.resolve_view("cell").view.expect("produced");
    registry.purge();
    let after = registry.resolve_view("cell").view.expect("produced again");

    assert!(!same_view(&before, &after));
    assert_eq!(count.get(), 2);
    assert!(registry.contains("cell"));
}

#[test]
fn unregistered_identifier_is_a_miss_without_caching() {
    let mut registry = Registry::new();
    registry.register("cell", ViewTemplate::new("Cell", || {
        vec![Rc::new(PlainView::new("top")) as ViewRef]
    }));

    let resolved = registry.resolve_view("unregistered");
    assert!(resolved.registry_type.is_none());
    assert!(resolved.view.is_none());
    assert_eq!(registry.cached_len(), 0);
}

#[test]
fn unknown_kind_becomes_default_spot() {
    let factory = Factory::with_builtins();
    let spot = factory.resolve(Component::new("__nonexistent__", "odd"));

    assert_eq!(spot.kind(), factory.default_kind());
    assert_eq!(spot.component().kind, "__nonexistent__");
}

#[test]
fn raw_records_keep_their_own_index() {
    let factory = Factory::with_builtins();
    let records = vec![json!({ "kind": "list", "index": 7 }), json!({ "kind": "view" })];
    let spots = Parser::new(&factory).parse_raw(Some(records.as_slice()));

    assert_eq!(spots[0].component().index, 7);
    assert_eq!(spots[1].component().index, 0);
}

#[test]
fn composite_lookup_by_spot_and_item() {
    let mut composite = CompositeSpots::new();
    let nested: Vec<Box<dyn Renderable>> = vec![
        Box::new(ListSpot::new(Component::new("list", "A"))),
        Box::new(ListSpot::new(Component::new("list", "B"))),
    ];
    composite.insert(2, 5, nested);

    let found = composite.resolve(2, 5).expect("registered slot");
    let titles: Vec<&str> = found.iter().map(|s| s.component().title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B"]);
    assert!(composite.resolve(2, 9).is_none());
    assert!(composite.resolve(9, 5).is_none());
}

#[test]
fn item_kind_selects_registered_view() {
    let document = json!({ "components": [{
        "kind": "list",
        "items": [{ "title": "plain" }, { "title": "hero", "kind": "hero" }]
    }] });
    let factory = Factory::with_builtins();
    let parser = Parser::new(&factory);
    let mut composition = Composition::from_document(&parser, &document, DEFAULT_ROOT_KEY);

    let spot = composition.get_mut(0).expect("one spot");
    spot.views_mut()
        .register("hero", ViewConstructor::of::<PlainView>("Hero"));

    assert_eq!(spot.identifier(0).as_deref(), Some("regular:ListCell"));
    assert_eq!(spot.identifier(1).as_deref(), Some("hero"));

    let hero = spot.configure_item(1).expect("hero view");
    let again = spot.dequeue_view(1).view.expect("cached");
    assert!(same_view(&hero, &again));
}
