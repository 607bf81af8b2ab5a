//! Identifier registry: maps view identifiers to view producers and
//! recycles the views it produces.
//!
//! A [`Registry`] is owned by one renderable object. Built-in kinds keep a
//! shared default registry per kind and [`inherit`](Registry::inherit) from
//! it, so registrations made on one instance never leak into the default.
//!
//! Registries hold `Rc` handles and are confined to the rendering thread.

pub mod cache;
pub mod item;
pub mod view;

pub use cache::{CacheKey, InstanceCache, MemoryPressure, DEFAULT_CACHE_CAPACITY};
pub use item::{RegistryItem, RegistryType, ViewConstructor, ViewTemplate};
pub use view::{same_view, PlainView, View, ViewRef};

use std::collections::HashMap;
use tracing::debug;

/// Outcome of [`Registry::resolve_view`].
///
/// - unregistered identifier: both fields `None`
/// - registered but production failed: `registry_type` set, `view` `None`
/// - success: both set
#[derive(Debug, Clone, Default)]
pub struct ResolvedView {
    /// Tag of the item the identifier resolved to.
    pub registry_type: Option<RegistryType>,
    /// The produced or recycled view.
    pub view: Option<ViewRef>,
}

impl ResolvedView {
    /// Result for an unregistered identifier.
    pub fn miss() -> Self {
        Self::default()
    }

    /// Whether the identifier was unregistered.
    pub fn is_miss(&self) -> bool {
        self.registry_type.is_none()
    }
}

/// Identifier → view producer mapping plus its instance cache.
#[derive(Debug)]
pub struct Registry {
    storage: HashMap<String, RegistryItem>,
    default_item: Option<RegistryItem>,
    cache: InstanceCache,
}

impl Registry {
    /// Empty registry with the default cache capacity.
    pub fn new() -> Self {
        Self::with_cache_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Empty registry caching at most `capacity` views.
    pub fn with_cache_capacity(capacity: usize) -> Self {
        Self {
            storage: HashMap::new(),
            default_item: None,
            cache: InstanceCache::new(capacity),
        }
    }

    /// Registry with a default item already set.
    pub fn with_default(item: impl Into<RegistryItem>) -> Self {
        let mut registry = Self::new();
        registry.set_default(item);
        registry
    }

    /// Copy of this registry's registrations with an empty cache.
    pub fn inherit(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            default_item: self.default_item.clone(),
            cache: InstanceCache::new(self.cache.capacity()),
        }
    }

    /// Insert or silently overwrite the producer for `key`.
    pub fn register(&mut self, key: impl Into<String>, item: impl Into<RegistryItem>) {
        self.storage.insert(key.into(), item.into());
    }

    /// Set the default item and store it under its default key.
    ///
    /// A previous default stays registered under its own key.
    pub fn set_default(&mut self, item: impl Into<RegistryItem>) {
        let item = item.into();
        self.storage.insert(item.default_key(), item.clone());
        self.default_item = Some(item);
    }

    /// Current default item.
    pub fn default_item(&self) -> Option<&RegistryItem> {
        self.default_item.as_ref()
    }

    /// Key the default item is stored under.
    pub fn default_identifier(&self) -> Option<String> {
        self.default_item.as_ref().map(RegistryItem::default_key)
    }

    /// Item registered under `key`.
    pub fn lookup(&self, key: &str) -> Option<&RegistryItem> {
        self.storage.get(key)
    }

    /// Whether `key` is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.storage.contains_key(key)
    }

    /// Registered identifiers, in no particular order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.storage.keys().map(String::as_str)
    }

    /// Number of registered keys, including the default key.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Resolve `identifier` to a view, reusing a cached instance if any.
    ///
    /// At most one instance per (tag, identifier) is produced until the
    /// cache entry is purged or evicted. Production failures are not
    /// cached.
    pub fn resolve_view(&mut self, identifier: &str) -> ResolvedView {
        let Some(item) = self.storage.get(identifier) else {
            debug!(identifier, "No view registered for identifier");
            return ResolvedView::miss();
        };

        let registry_type = item.registry_type();
        let key = CacheKey::new(registry_type, identifier);

        if let Some(view) = self.cache.get(&key) {
            debug!(cache_key = %key, "Reusing cached view");
            return ResolvedView {
                registry_type: Some(registry_type),
                view: Some(view),
            };
        }

        let view = item.produce();
        match &view {
            Some(view) => {
                debug!(cache_key = %key, "Produced new view");
                self.cache.put(key, view.clone());
            }
            None => debug!(cache_key = %key, "Template produced no usable view"),
        }

        ResolvedView {
            registry_type: Some(registry_type),
            view,
        }
    }

    /// Drop every cached view. Registrations are untouched.
    pub fn purge(&mut self) {
        self.cache.purge();
    }

    /// See [`InstanceCache::respond_to_memory_pressure`].
    pub fn respond_to_memory_pressure(&mut self, level: MemoryPressure) {
        self.cache.respond_to_memory_pressure(level);
    }

    /// Number of cached views.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Maximum number of cached views.
    pub fn cache_capacity(&self) -> usize {
        self.cache.capacity()
    }

    /// Change the cache capacity, evicting if it shrinks.
    pub fn set_cache_capacity(&mut self, capacity: usize) {
        self.cache.resize(capacity);
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
