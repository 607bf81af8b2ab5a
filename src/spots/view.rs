//! A spot that is a single plain view rather than a collection.

use super::{Renderable, SpotCore};
use crate::model::Component;
use crate::registry::{PlainView, Registry, ViewConstructor};

/// Kind string for [`ViewSpot`].
pub const VIEW_KIND: &str = "view";

thread_local! {
    static DEFAULT_VIEWS: Registry =
        Registry::with_default(ViewConstructor::of::<PlainView>("View"));
}

/// Single-view spot.
#[derive(Debug)]
pub struct ViewSpot {
    core: SpotCore,
}

impl ViewSpot {
    /// View spot using the shared default views.
    pub fn new(component: Component) -> Self {
        Self {
            core: SpotCore::new(component, DEFAULT_VIEWS.with(Registry::inherit)),
        }
    }

    /// View spot inheriting registrations from `views`.
    pub fn with_views(component: Component, views: &Registry) -> Self {
        Self {
            core: SpotCore::new(component, views.inherit()),
        }
    }
}

impl Renderable for ViewSpot {
    fn kind(&self) -> &str {
        VIEW_KIND
    }

    fn core(&self) -> &SpotCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SpotCore {
        &mut self.core
    }
}
