//! Item records: one data row inside a component.

use super::lenient;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Preferred size hint for an item's view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Size {
    /// Width in points.
    pub width: f64,
    /// Height in points.
    pub height: f64,
}

impl Size {
    /// Create a new value.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A single data record belonging to a [`Component`](super::Component).
///
/// Every field is optional in the source document. Wrong-typed fields are
/// treated as absent so that one bad value never drops the whole record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    /// Position within the owning component's item list.
    #[serde(deserialize_with = "lenient")]
    pub index: usize,
    /// Headline text.
    #[serde(deserialize_with = "lenient")]
    pub title: String,
    /// Secondary text.
    #[serde(deserialize_with = "lenient")]
    pub subtitle: String,
    /// Body text.
    #[serde(deserialize_with = "lenient")]
    pub text: String,
    /// Image resource identifier.
    #[serde(deserialize_with = "lenient")]
    pub image: String,
    /// View identifier override. Empty means "use the spot's default view".
    #[serde(deserialize_with = "lenient")]
    pub kind: String,
    /// Action identifier triggered on selection.
    #[serde(deserialize_with = "lenient")]
    pub action: Option<String>,
    /// Explicit size, overriding the spot's default.
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    /// Free-form payload.
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Map::is_empty")]
    pub meta: Map<String, Value>,
}

impl Item {
    /// Item with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the view identifier override.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Set the image resource.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Set an explicit size.
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    /// Decode an item from an untyped record.
    ///
    /// Returns `None` when the record is not a JSON object.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            tracing::warn!(record = %value, "Skipping item record that is not an object");
            return None;
        }
        match Item::deserialize(value) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(error = %e, "Item record could not be decoded, using defaults");
                Some(Item::default())
            }
        }
    }

    /// Look up a payload value by key.
    pub fn meta(&self, key: &str) -> Option<&Value> {
        self.meta.get(key)
    }
}
