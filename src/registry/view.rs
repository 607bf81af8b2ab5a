//! The narrow contract the registry needs from native views.

use crate::model::Item;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A native view produced by a [`RegistryItem`](super::RegistryItem).
///
/// Concrete views live outside this crate. The registry only constructs
/// them, caches them and hands them items to display.
pub trait View: fmt::Debug {
    /// Configure the view to display `item`.
    fn configure(&self, _item: &Item) {}
}

/// Shared handle to a view.
///
/// The instance cache holds one strong reference; any surface that keeps
/// displaying a view must hold its own clone.
pub type ViewRef = Rc<dyn View>;

/// Whether two handles point at the same view instance.
pub fn same_view(a: &ViewRef, b: &ViewRef) -> bool {
    Rc::ptr_eq(a, b)
}

/// Minimal built-in view: a name plus the last item it was configured with.
///
/// Used as the default cell and container for the built-in spots, and as a
/// stand-in wherever no native view is wired up.
#[derive(Debug, Default)]
pub struct PlainView {
    name: String,
    item: RefCell<Option<Item>>,
}

impl PlainView {
    /// Create a new value.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            item: RefCell::new(None),
        }
    }

    /// Name used in default keys.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Item from the most recent [`View::configure`] call.
    pub fn configured_item(&self) -> Option<Item> {
        self.item.borrow().clone()
    }
}

impl View for PlainView {
    fn configure(&self, item: &Item) {
        *self.item.borrow_mut() = Some(item.clone());
    }
}
