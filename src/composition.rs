//! Ordered collection of spots built from one document.
//!
//! A `Composition` owns its spots and keeps `spot.index() == position`
//! after every insert, remove, move and reload. It also owns the
//! composite table for nested spots and forwards memory-pressure signals
//! to every registry it can reach.

use crate::composite::{CompositeDelegate, CompositeSpots};
use crate::parser::Parser;
use crate::registry::MemoryPressure;
use crate::spots::{Renderable, SpotsDelegate};
use serde_json::Value;
use std::rc::Weak;
use tracing::{debug, info};

/// Ordered, densely indexed spots plus their nested composites.
#[derive(Debug, Default)]
pub struct Composition {
    spots: Vec<Box<dyn Renderable>>,
    composites: CompositeSpots,
    delegate: Option<Weak<dyn SpotsDelegate>>,
}

impl Composition {
    /// Take ownership of `spots`, renumbering them by position.
    pub fn new(spots: Vec<Box<dyn Renderable>>) -> Self {
        let mut composition = Self {
            spots,
            ..Self::default()
        };
        composition.renumber();
        composition
    }

    /// Parse `document[root_key]` and build a spot per component.
    pub fn from_document(parser: &Parser<'_>, document: &Value, root_key: &str) -> Self {
        Self::new(parser.parse_renderables(document, root_key))
    }

    /// All spots in order.
    pub fn spots(&self) -> &[Box<dyn Renderable>] {
        &self.spots
    }

    /// Spot at `index`.
    pub fn get(&self, index: usize) -> Option<&dyn Renderable> {
        self.spots.get(index).map(|spot| spot.as_ref())
    }

    /// Mutable spot at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Box<dyn Renderable>> {
        self.spots.get_mut(index)
    }

    /// Number of top-level spots.
    pub fn len(&self) -> usize {
        self.spots.len()
    }

    /// Whether the composition holds no spots.
    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    /// Spots in order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Renderable> {
        self.spots.iter().map(|spot| spot.as_ref())
    }

    /// Set the delegate for this composition and every spot in it.
    pub fn set_delegate(&mut self, delegate: Weak<dyn SpotsDelegate>) {
        for spot in &mut self.spots {
            spot.set_delegate(delegate.clone());
        }
        self.delegate = Some(delegate);
    }

    /// Append a spot.
    pub fn push(&mut self, spot: Box<dyn Renderable>) {
        let at = self.spots.len();
        self.insert(at, spot);
    }

    /// Insert at `index`, clamped to the end.
    pub fn insert(&mut self, index: usize, mut spot: Box<dyn Renderable>) {
        let index = index.min(self.spots.len());
        if let Some(delegate) = &self.delegate {
            spot.set_delegate(delegate.clone());
        }
        self.spots.insert(index, spot);
        self.composites.spot_inserted(index);
        self.renumber();
        self.notify_changed();
    }

    /// Remove and return the spot at `index`.
    ///
    /// Nested spots hosted by the removed spot are purged and dropped, and the
    /// composite slots of later spots shift down with them.
    pub fn remove(&mut self, index: usize) -> Option<Box<dyn Renderable>> {
        if index >= self.spots.len() {
            return None;
        }
        let spot = self.spots.remove(index);
        for mut nested in self.composites.spot_removed(index) {
            nested.views_mut().purge();
        }
        self.renumber();
        self.notify_changed();
        Some(spot)
    }

    /// Move the spot at `from` to `to`. `false` if either is out of bounds.
    pub fn move_spot(&mut self, from: usize, to: usize) -> bool {
        if from >= self.spots.len() || to >= self.spots.len() {
            return false;
        }
        let spot = self.spots.remove(from);
        self.spots.insert(to, spot);
        self.composites.spot_moved(from, to);
        self.renumber();
        self.notify_changed();
        true
    }

    /// Replace every spot from a new document.
    ///
    /// Destructive: caches of the outgoing spots and nested spots are purged
    /// first so no stale view instance survives into the new render.
    pub fn reload(&mut self, parser: &Parser<'_>, document: &Value, root_key: &str) {
        for spot in &mut self.spots {
            spot.views_mut().purge();
        }
        for spot in self.composites.iter_mut() {
            spot.views_mut().purge();
        }
        self.composites.clear();

        self.spots = parser.parse_renderables(document, root_key);
        if let Some(delegate) = &self.delegate {
            for spot in &mut self.spots {
                spot.set_delegate(delegate.clone());
            }
        }
        info!(spots = self.spots.len(), "Composition reloaded");
        self.notify_changed();
    }

    /// Forward a memory-pressure signal to every spot and nested spot registry.
    pub fn respond_to_memory_pressure(&mut self, level: MemoryPressure) {
        debug!(?level, "Forwarding memory pressure to spot registries");
        for spot in &mut self.spots {
            spot.views_mut().respond_to_memory_pressure(level);
        }
        for spot in self.composites.iter_mut() {
            spot.views_mut().respond_to_memory_pressure(level);
        }
    }

    /// Mutable access to the nested spot table.
    pub fn composites_mut(&mut self) -> &mut CompositeSpots {
        &mut self.composites
    }

    fn renumber(&mut self) {
        for (position, spot) in self.spots.iter_mut().enumerate() {
            spot.set_index(position);
        }
    }

    fn notify_changed(&self) {
        if let Some(delegate) = self.delegate.as_ref().and_then(Weak::upgrade) {
            delegate.spots_did_change(&self.spots);
        }
    }
}

impl CompositeDelegate for Composition {
    fn composite_spots(&self) -> &CompositeSpots {
        &self.composites
    }
}
