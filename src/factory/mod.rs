//! Kind dispatch: turns a [`Component`] into a [`Renderable`].
//!
//! Kinds are registered on a [`FactoryBuilder`] during startup. Building
//! yields an immutable [`Factory`], so the dispatch table cannot change
//! while components are being resolved. Components whose kind is not
//! registered go to the default kind (`list` for the built-ins).

use crate::model::Component;
use crate::spots::grid::GRID_KIND;
use crate::spots::list::LIST_KIND;
use crate::spots::view::VIEW_KIND;
use crate::spots::{GridSpot, ListSpot, Renderable, ViewSpot};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;
use tracing::debug;

/// Builds a renderable from a component it takes ownership of.
pub type SpotConstructor = Rc<dyn Fn(Component) -> Box<dyn Renderable>>;

/// Errors detected when the dispatch table is built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FactoryError {
    /// The configured default kind has no constructor.
    #[error("Default kind '{kind}' is not registered")]
    MissingDefaultKind {
        /// The kind that was requested as default.
        kind: String,
    },
}

/// Registration phase of a [`Factory`].
pub struct FactoryBuilder {
    table: HashMap<String, SpotConstructor>,
    default_kind: String,
    cache_capacity: Option<usize>,
}

impl FactoryBuilder {
    /// Empty table with `list` as the default kind.
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
            default_kind: LIST_KIND.to_string(),
            cache_capacity: None,
        }
    }

    /// Table pre-populated with `list`, `grid` and `view`.
    pub fn with_builtins() -> Self {
        Self::new()
            .register(LIST_KIND, list_spot)
            .register(GRID_KIND, |component| Box::new(GridSpot::new(component)))
            .register(VIEW_KIND, |component| Box::new(ViewSpot::new(component)))
    }

    /// Register (or replace) the constructor for `kind`.
    pub fn register<F>(mut self, kind: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(Component) -> Box<dyn Renderable> + 'static,
    {
        self.table.insert(kind.into(), Rc::new(constructor));
        self
    }

    /// Kind used for components whose kind is not registered.
    pub fn default_kind(mut self, kind: impl Into<String>) -> Self {
        self.default_kind = kind.into();
        self
    }

    /// Instance cache capacity applied to every produced spot's registry.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = Some(capacity);
        self
    }

    /// Validate the table and freeze it.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::MissingDefaultKind`] if the default kind has no
    /// constructor.
    pub fn build(self) -> Result<Factory, FactoryError> {
        let default_constructor = self.table.get(&self.default_kind).cloned().ok_or_else(|| {
            FactoryError::MissingDefaultKind {
                kind: self.default_kind.clone(),
            }
        })?;

        Ok(self.freeze(default_constructor))
    }

    fn freeze(self, default_constructor: SpotConstructor) -> Factory {
        Factory {
            table: self.table,
            default_kind: self.default_kind,
            default_constructor,
            cache_capacity: self.cache_capacity,
        }
    }
}

/// Constructor of the built-in default kind.
fn list_spot(component: Component) -> Box<dyn Renderable> {
    Box::new(ListSpot::new(component))
}

impl Default for FactoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable kind → constructor table.
pub struct Factory {
    table: HashMap<String, SpotConstructor>,
    default_kind: String,
    default_constructor: SpotConstructor,
    cache_capacity: Option<usize>,
}

impl Factory {
    /// Start an empty [`FactoryBuilder`].
    pub fn builder() -> FactoryBuilder {
        FactoryBuilder::new()
    }

    /// Factory with the built-in kinds and `list` as default.
    ///
    /// The default constructor is the table's own `list` entry.
    pub fn with_builtins() -> Self {
        let builder = FactoryBuilder::with_builtins();
        let default_constructor = builder
            .table
            .get(LIST_KIND)
            .cloned()
            .unwrap_or_else(|| Rc::new(list_spot));
        builder.freeze(default_constructor)
    }

    /// Build the renderable for `component`.
    ///
    /// Unregistered kinds use the default kind's constructor. The spot's
    /// registration hook has run before it is returned.
    pub fn resolve(&self, component: Component) -> Box<dyn Renderable> {
        let constructor = match self.table.get(&component.kind) {
            Some(constructor) => constructor,
            None => {
                debug!(
                    kind = %component.kind,
                    default_kind = %self.default_kind,
                    "Unknown component kind, using default"
                );
                &self.default_constructor
            }
        };

        let mut spot = constructor(component);
        if let Some(capacity) = self.cache_capacity {
            spot.views_mut().set_cache_capacity(capacity);
        }
        spot.register();
        spot
    }

    /// Kind used for unregistered kinds.
    pub fn default_kind(&self) -> &str {
        &self.default_kind
    }

    /// Whether `kind` has its own constructor.
    pub fn contains_kind(&self, kind: &str) -> bool {
        self.table.contains_key(kind)
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.table.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}

impl Default for Factory {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("kinds", &self.kinds())
            .field("default_kind", &self.default_kind)
            .field("cache_capacity", &self.cache_capacity)
            .finish()
    }
}
