//! Domain model types (pure).
//!
//! Components and items are plain data, decoded leniently from untyped
//! JSON records. They are `Send + Sync` and may be produced off the
//! rendering thread.

pub mod component;
pub mod error;
pub mod item;

pub use component::Component;
pub use error::{AppError, InputError};
pub use item::{Item, Size};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Deserialize a field, substituting `T::default()` when the value has the
/// wrong shape.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}
