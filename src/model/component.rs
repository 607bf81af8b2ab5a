//! Component records: one renderable section and its ordered items.

use super::{lenient, Item};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A typed, indexed description of one renderable section.
///
/// `index` is the component's position in its owning sequence. Item
/// indices always equal their position in `items`; every method that
/// changes the item list renumbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Component {
    /// Position in the owning sequence.
    #[serde(deserialize_with = "lenient")]
    pub index: usize,
    /// Discriminator selecting the renderable constructor.
    #[serde(deserialize_with = "lenient")]
    pub kind: String,
    /// Headline text.
    #[serde(deserialize_with = "lenient")]
    pub title: String,
    /// Identifier of an optional header view.
    #[serde(deserialize_with = "lenient")]
    pub header: String,
    /// Column hint for grid-like kinds. Zero means "kind decides".
    #[serde(deserialize_with = "lenient")]
    pub span: f64,
    #[serde(deserialize_with = "lenient_items")]
    items: Vec<Item>,
    /// Free-form payload.
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Map::is_empty")]
    pub meta: Map<String, Value>,
}

/// Decode each item on its own so a single bad record does not empty the list.
fn lenient_items<'de, D>(deserializer: D) -> Result<Vec<Item>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(records) = value else {
        return Ok(Vec::new());
    };
    Ok(records.iter().filter_map(Item::from_value).collect())
}

impl Component {
    /// Empty component of `kind`.
    pub fn new(kind: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Replace the items, renumbering them.
    pub fn with_items(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.items = items.into_iter().collect();
        self.renumber_items();
        self
    }

    /// Decode a component from an untyped record.
    ///
    /// Never fails: a record that is not an object, or that cannot be
    /// decoded at all, yields `Component::default()`.
    pub fn from_value(value: &Value) -> Self {
        if !value.is_object() {
            tracing::warn!(record = %value, "Component record is not an object, using defaults");
            return Self::default();
        }

        let mut component = match Component::deserialize(value) {
            Ok(component) => component,
            Err(e) => {
                tracing::warn!(error = %e, "Component record could not be decoded, using defaults");
                Self::default()
            }
        };
        component.renumber_items();
        component
    }

    /// Items in display order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Item at `index`.
    pub fn item(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Mutable item at `index`.
    pub fn item_mut(&mut self, index: usize) -> Option<&mut Item> {
        self.items.get_mut(index)
    }

    /// Append an item at the end.
    pub fn push_item(&mut self, mut item: Item) {
        item.index = self.items.len();
        self.items.push(item);
    }

    /// Insert an item at `index`, clamped to the end of the list.
    pub fn insert_item(&mut self, index: usize, item: Item) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        self.renumber_items();
    }

    /// Remove and return the item at `index`, renumbering the rest.
    pub fn remove_item(&mut self, index: usize) -> Option<Item> {
        if index >= self.items.len() {
            return None;
        }
        let item = self.items.remove(index);
        self.renumber_items();
        Some(item)
    }

    /// Move the item at `from` to position `to`.
    ///
    /// Returns `false` and leaves the list untouched if either position is
    /// out of bounds.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        if from >= self.items.len() || to >= self.items.len() {
            return false;
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);
        self.renumber_items();
        true
    }

    /// Replace every item, renumbering them.
    pub fn replace_items(&mut self, items: Vec<Item>) {
        self.items = items;
        self.renumber_items();
    }

    pub(crate) fn renumber_items(&mut self) {
        for (position, item) in self.items.iter_mut().enumerate() {
            item.index = position;
        }
    }
}
