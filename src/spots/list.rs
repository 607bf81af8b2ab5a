//! Vertical list of rows. The default kind.

use super::{Renderable, SpotCore};
use crate::model::{Component, Size};
use crate::registry::{PlainView, Registry, ViewConstructor};

/// Kind string for [`ListSpot`].
pub const LIST_KIND: &str = "list";

/// Row height used when an item carries no size of its own.
pub const DEFAULT_ROW_HEIGHT: f64 = 44.0;

thread_local! {
    static DEFAULT_VIEWS: Registry =
        Registry::with_default(ViewConstructor::of::<PlainView>("ListCell"));
}

/// Vertical list of rows.
#[derive(Debug)]
pub struct ListSpot {
    core: SpotCore,
}

impl ListSpot {
    /// List spot using the shared default list views.
    pub fn new(component: Component) -> Self {
        Self {
            core: SpotCore::new(component, DEFAULT_VIEWS.with(Registry::inherit)),
        }
    }

    /// List spot inheriting registrations from `views`.
    pub fn with_views(component: Component, views: &Registry) -> Self {
        Self {
            core: SpotCore::new(component, views.inherit()),
        }
    }
}

impl Renderable for ListSpot {
    fn kind(&self) -> &str {
        LIST_KIND
    }

    fn core(&self) -> &SpotCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SpotCore {
        &mut self.core
    }

    /// Rows fill the container width (reported as 0) unless sized explicitly.
    fn size_for_item(&self, at: usize) -> Option<Size> {
        let item = self.component().item(at)?;
        Some(item.size.unwrap_or(Size::new(0.0, DEFAULT_ROW_HEIGHT)))
    }
}
