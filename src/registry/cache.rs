//! Bounded instance cache for produced views.

use super::item::RegistryType;
use super::view::ViewRef;
use lru::LruCache;
use std::fmt;
use std::num::NonZeroUsize;

/// Capacity used when none (or zero) is configured.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Cache lookup key: registry tag plus identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Tag of the item that produced the view.
    pub registry_type: RegistryType,
    /// Identifier the view was resolved under.
    pub identifier: String,
}

impl CacheKey {
    /// Create a new value.
    pub fn new(registry_type: RegistryType, identifier: impl Into<String>) -> Self {
        Self {
            registry_type,
            identifier: identifier.into(),
        }
    }
}

/// Renders as the tag concatenated with the identifier, e.g. `regularcell`.
impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.registry_type, self.identifier)
    }
}

/// Memory-pressure signal forwarded from the host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryPressure {
    /// Drop the least recently used half.
    Moderate,
    /// Drop everything.
    Critical,
}

/// LRU store of previously produced views.
///
/// Entries are advisory: they may be evicted at capacity, under memory
/// pressure or by [`purge`](Self::purge) at any time.
pub struct InstanceCache {
    entries: LruCache<CacheKey, ViewRef>,
}

impl InstanceCache {
    /// Create a cache holding at most `capacity` views.
    ///
    /// A capacity of 0 uses [`DEFAULT_CACHE_CAPACITY`].
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: LruCache::new(non_zero(capacity)),
        }
    }

    /// Cached view for `key`, marking it most recently used.
    pub fn get(&mut self, key: &CacheKey) -> Option<ViewRef> {
        self.entries.get(key).cloned()
    }

    /// Whether `key` is cached, without touching recency.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains(key)
    }

    /// Store a view, evicting the least recently used entry when full.
    pub fn put(&mut self, key: CacheKey, view: ViewRef) {
        self.entries.put(key, view);
    }

    /// Drop every entry.
    pub fn purge(&mut self) {
        self.entries.clear();
    }

    /// Evict entries according to `level`.
    pub fn respond_to_memory_pressure(&mut self, level: MemoryPressure) {
        match level {
            MemoryPressure::Moderate => {
                let keep = self.entries.len() / 2;
                while self.entries.len() > keep {
                    self.entries.pop_lru();
                }
            }
            MemoryPressure::Critical => self.purge(),
        }
    }

    /// Number of cached views.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of cached views.
    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    /// Change capacity, evicting least recently used entries if shrinking.
    pub fn resize(&mut self, capacity: usize) {
        self.entries.resize(non_zero(capacity));
    }
}

impl Default for InstanceCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl fmt::Debug for InstanceCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceCache")
            .field("len", &self.entries.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

fn non_zero(capacity: usize) -> NonZeroUsize {
    NonZeroUsize::new(capacity)
        .or(NonZeroUsize::new(DEFAULT_CACHE_CAPACITY))
        .unwrap_or(NonZeroUsize::MIN)
}
