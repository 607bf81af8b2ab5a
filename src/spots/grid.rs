//! Grid of equally sized cells.

use super::{Renderable, SpotCore};
use crate::model::{Component, Size};
use crate::registry::{PlainView, Registry, ViewConstructor};

/// Kind string for [`GridSpot`].
pub const GRID_KIND: &str = "grid";

/// Cell size used when an item carries no size of its own.
pub const DEFAULT_CELL_SIZE: Size = Size {
    width: 88.0,
    height: 88.0,
};

thread_local! {
    static DEFAULT_VIEWS: Registry =
        Registry::with_default(ViewConstructor::of::<PlainView>("GridCell"));
}

/// Grid of cells; `span` sets the column count.
#[derive(Debug)]
pub struct GridSpot {
    core: SpotCore,
}

impl GridSpot {
    /// Grid spot using the shared default grid views.
    pub fn new(component: Component) -> Self {
        Self {
            core: SpotCore::new(component, DEFAULT_VIEWS.with(Registry::inherit)),
        }
    }

    /// Grid spot inheriting registrations from `views`.
    pub fn with_views(component: Component, views: &Registry) -> Self {
        Self {
            core: SpotCore::new(component, views.inherit()),
        }
    }

    /// Cells per row. A non-positive span means one column.
    pub fn columns(&self) -> usize {
        let span = self.component().span;
        if span >= 1.0 {
            span as usize
        } else {
            1
        }
    }
}

impl Renderable for GridSpot {
    fn kind(&self) -> &str {
        GRID_KIND
    }

    fn core(&self) -> &SpotCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SpotCore {
        &mut self.core
    }

    fn size_for_item(&self, at: usize) -> Option<Size> {
        let item = self.component().item(at)?;
        Some(item.size.unwrap_or(DEFAULT_CELL_SIZE))
    }
}
