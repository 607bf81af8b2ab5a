//! JSON document parser for component descriptions.
//!
//! Two stages: untyped [`Value`] records are decoded into indexed
//! [`Component`]s, then each component is handed to the [`Factory`] to
//! become a renderable spot.
//!
//! Parsing is total. Missing or wrong-shaped input yields no components
//! rather than an error, so a bad description renders nothing instead of
//! taking the surface down. A component array is accepted only as a
//! whole: one record that is not an object rejects all of them.

use crate::factory::Factory;
use crate::model::Component;
use crate::spots::Renderable;
use serde_json::Value;
use tracing::{debug, warn};

/// Key holding the component array when none is given.
pub const DEFAULT_ROOT_KEY: &str = "components";

/// Decode `document[root_key]` into components with dense indices.
///
/// Every component's `index` is overwritten with its position after
/// decoding, whatever the records themselves contained.
pub fn parse_components(document: &Value, root_key: &str) -> Vec<Component> {
    let Some(field) = document.get(root_key) else {
        debug!(root_key, "Document has no component array");
        return Vec::new();
    };
    let Some(records) = field.as_array() else {
        warn!(root_key, "Component field is not an array, nothing to render");
        return Vec::new();
    };

    let Some(records) = object_records(records) else {
        warn!(root_key, "Component array holds a non-object record, nothing to render");
        return Vec::new();
    };

    let mut components: Vec<Component> = records.iter().map(Component::from_value).collect();
    for (position, component) in components.iter_mut().enumerate() {
        component.index = position;
    }
    components
}

/// `records` if every one of them is a JSON object.
fn object_records(records: &[Value]) -> Option<&[Value]> {
    records.iter().all(Value::is_object).then_some(records)
}

/// Parser bound to a factory for the second stage.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'a> {
    factory: &'a Factory,
}

impl<'a> Parser<'a> {
    /// Parser dispatching through `factory`.
    pub fn new(factory: &'a Factory) -> Self {
        Self { factory }
    }

    /// Factory used for dispatch.
    pub fn factory(&self) -> &'a Factory {
        self.factory
    }

    /// See [`parse_components`].
    pub fn parse_components(&self, document: &Value, root_key: &str) -> Vec<Component> {
        parse_components(document, root_key)
    }

    /// Decode `document[root_key]` and dispatch each component, preserving
    /// order. Indices are dense.
    pub fn parse_renderables(&self, document: &Value, root_key: &str) -> Vec<Box<dyn Renderable>> {
        parse_components(document, root_key)
            .into_iter()
            .map(|component| self.factory.resolve(component))
            .collect()
    }

    /// Decode and dispatch already-extracted records.
    ///
    /// Unlike [`parse_renderables`](Self::parse_renderables) this does not
    /// renumber: each component keeps the `index` its record carried
    /// (0 when absent). `None`, or a sequence containing a non-object
    /// record, yields nothing.
    pub fn parse_raw(&self, records: Option<&[Value]>) -> Vec<Box<dyn Renderable>> {
        let Some(records) = records.and_then(object_records) else {
            debug!("No raw component records to dispatch");
            return Vec::new();
        };
        records
            .iter()
            .map(|record| self.factory.resolve(Component::from_value(record)))
            .collect()
    }
}
