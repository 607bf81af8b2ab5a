//! Renderable objects ("spots") produced by the factory.
//!
//! A spot owns its [`Component`] and a [`Registry`] used to resolve the
//! view identifier of each item. Everything beyond `kind`/`core` has a
//! default implementation in terms of those two, so custom kinds usually
//! only override sizing and registration.

pub mod grid;
pub mod list;
pub mod view;

pub use grid::GridSpot;
pub use list::ListSpot;
pub use view::ViewSpot;

use crate::model::{Component, Item, Size};
use crate::registry::{PlainView, Registry, ResolvedView, ViewRef};
use std::fmt;
use std::rc::{Rc, Weak};

/// Receiver for selection and change notifications.
///
/// Spots keep only a [`Weak`] handle; the delegate's owner controls its
/// lifetime.
pub trait SpotsDelegate {
    /// The item at a position in `component` was selected.
    fn did_select(&self, _item: &Item, _component: &Component) {}

    /// The owning sequence of spots changed.
    fn spots_did_change(&self, _spots: &[Box<dyn Renderable>]) {}
}

/// State shared by every built-in spot.
#[derive(Debug)]
pub struct SpotCore {
    component: Component,
    views: Registry,
    container: Option<ViewRef>,
    delegate: Option<Weak<dyn SpotsDelegate>>,
    registered: bool,
}

impl SpotCore {
    /// Unregistered core owning `component` and resolving through `views`.
    pub fn new(component: Component, views: Registry) -> Self {
        Self {
            component,
            views,
            container: None,
            delegate: None,
            registered: false,
        }
    }
}

/// The polymorphic object a [`Component`] is turned into.
pub trait Renderable: fmt::Debug {
    /// Kind this spot was constructed for, e.g. `"list"`.
    fn kind(&self) -> &str;

    /// Shared state backing the default methods.
    fn core(&self) -> &SpotCore;

    /// Mutable shared state.
    fn core_mut(&mut self) -> &mut SpotCore;

    /// The component this spot renders.
    fn component(&self) -> &Component {
        &self.core().component
    }

    /// Mutable component. Item mutations renumber automatically.
    fn component_mut(&mut self) -> &mut Component {
        &mut self.core_mut().component
    }

    /// Position of this spot in its owning sequence.
    fn index(&self) -> usize {
        self.core().component.index
    }

    /// Set the position, writing through to the component.
    fn set_index(&mut self, index: usize) {
        self.core_mut().component.index = index;
    }

    /// Registry resolving this spot's item views.
    fn views(&self) -> &Registry {
        &self.core().views
    }

    /// Mutable registry, e.g. to register extra views.
    fn views_mut(&mut self) -> &mut Registry {
        &mut self.core_mut().views
    }

    /// Container view that displays this spot. Created on first call and
    /// owned by the spot afterwards.
    fn render(&mut self) -> ViewRef {
        let name = format!("{}-container", self.kind());
        self.core_mut()
            .container
            .get_or_insert_with(|| Rc::new(PlainView::new(name)) as ViewRef)
            .clone()
    }

    /// Registration hook. Called by the factory once before first use;
    /// later calls are no-ops.
    fn register(&mut self) {
        if self.core().registered {
            return;
        }
        self.core_mut().registered = true;
        tracing::debug!(
            kind = self.kind(),
            views = self.views().len(),
            "Registered spot views"
        );
    }

    /// Whether [`register`](Self::register) has run.
    fn is_registered(&self) -> bool {
        self.core().registered
    }

    /// View identifier for the item at `at`.
    ///
    /// The item's own `kind` when it is registered, the registry default
    /// otherwise. `None` for out-of-range positions.
    fn identifier(&self, at: usize) -> Option<String> {
        let item = self.component().item(at)?;
        if !item.kind.is_empty() && self.views().contains(&item.kind) {
            return Some(item.kind.clone());
        }
        self.views().default_identifier()
    }

    /// Resolve the (possibly recycled) view for the item at `at`.
    fn dequeue_view(&mut self, at: usize) -> ResolvedView {
        match self.identifier(at) {
            Some(identifier) => self.views_mut().resolve_view(&identifier),
            None => ResolvedView::miss(),
        }
    }

    /// Resolve the view for the item at `at` and configure it with the item.
    fn configure_item(&mut self, at: usize) -> Option<ViewRef> {
        let view = self.dequeue_view(at).view?;
        if let Some(item) = self.component().item(at) {
            view.configure(item);
        }
        Some(view)
    }

    /// Preferred size of the item at `at`, if the kind has an opinion.
    fn size_for_item(&self, _at: usize) -> Option<Size> {
        None
    }

    /// Set the non-owning delegate handle.
    fn set_delegate(&mut self, delegate: Weak<dyn SpotsDelegate>) {
        self.core_mut().delegate = Some(delegate);
    }

    /// The delegate, if it is still alive.
    fn delegate(&self) -> Option<Rc<dyn SpotsDelegate>> {
        self.core().delegate.as_ref().and_then(Weak::upgrade)
    }

    /// Report a selection of the item at `at` to the delegate.
    ///
    /// Returns `false` if the item does not exist or the delegate is gone.
    fn select_item(&self, at: usize) -> bool {
        let (Some(item), Some(delegate)) = (self.component().item(at), self.delegate()) else {
            return false;
        };
        delegate.did_select(item, self.component());
        true
    }
}

#[cfg(test)]
#[path = "spots_tests.rs"]
mod tests;
