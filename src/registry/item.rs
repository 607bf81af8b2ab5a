//! Registry entries: the two ways a view can be produced.

use super::view::{View, ViewRef};
use std::fmt;
use std::rc::Rc;

/// Tag distinguishing constructor-backed from template-backed entries.
///
/// Part of every instance cache key, so a constructor and a template
/// registered under the same bare identifier never share a cached view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryType {
    /// Produced by a [`ViewConstructor`].
    Regular,
    /// Produced by a [`ViewTemplate`].
    Template,
}

impl RegistryType {
    /// Lowercase tag used in default keys.
    pub fn as_str(self) -> &'static str {
        match self {
            RegistryType::Regular => "regular",
            RegistryType::Template => "template",
        }
    }
}

impl fmt::Display for RegistryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zero-argument view factory.
#[derive(Clone)]
pub struct ViewConstructor {
    name: String,
    build: Rc<dyn Fn() -> ViewRef>,
}

impl ViewConstructor {
    /// Constructor named `name` calling `build` for each new view.
    pub fn new(name: impl Into<String>, build: impl Fn() -> ViewRef + 'static) -> Self {
        Self {
            name: name.into(),
            build: Rc::new(build),
        }
    }

    /// Constructor for a view type that can be built with `Default`.
    pub fn of<V>(name: impl Into<String>) -> Self
    where
        V: View + Default + 'static,
    {
        Self::new(name, || Rc::new(V::default()) as ViewRef)
    }

    /// Name used in default keys.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build a new view.
    pub fn construct(&self) -> ViewRef {
        (self.build)()
    }
}

impl fmt::Debug for ViewConstructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewConstructor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

type Instantiate = Rc<dyn Fn() -> Vec<ViewRef>>;
type Accept = Rc<dyn Fn(&dyn View) -> bool>;

/// Precompiled, named view template.
///
/// Instantiation yields the template's top-level views. The first one is
/// used, or the first one accepted by the filter when one is set.
#[derive(Clone)]
pub struct ViewTemplate {
    name: String,
    instantiate: Instantiate,
    accept: Option<Accept>,
}

impl ViewTemplate {
    /// Template named `name`; `instantiate` yields its top-level views.
    pub fn new(name: impl Into<String>, instantiate: impl Fn() -> Vec<ViewRef> + 'static) -> Self {
        Self {
            name: name.into(),
            instantiate: Rc::new(instantiate),
            accept: None,
        }
    }

    /// Only accept top-level views matching `accept`.
    pub fn with_filter(mut self, accept: impl Fn(&dyn View) -> bool + 'static) -> Self {
        self.accept = Some(Rc::new(accept));
        self
    }

    /// Name used in default keys.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Instantiate the template and pick its top-level view.
    ///
    /// `None` when the template produced no acceptable view.
    pub fn instantiate(&self) -> Option<ViewRef> {
        let views = (self.instantiate)();
        match &self.accept {
            Some(accept) => views.into_iter().find(|view| accept(view.as_ref())),
            None => views.into_iter().next(),
        }
    }
}

impl fmt::Debug for ViewTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewTemplate")
            .field("name", &self.name)
            .field("filtered", &self.accept.is_some())
            .finish_non_exhaustive()
    }
}

/// A stored view producer.
#[derive(Debug, Clone)]
pub enum RegistryItem {
    /// Builds views by calling a constructor.
    Constructor(ViewConstructor),
    /// Builds views by instantiating a template.
    Template(ViewTemplate),
}

impl RegistryItem {
    /// Tag matching the variant.
    pub fn registry_type(&self) -> RegistryType {
        match self {
            RegistryItem::Constructor(_) => RegistryType::Regular,
            RegistryItem::Template(_) => RegistryType::Template,
        }
    }

    /// Name of the underlying constructor or template.
    pub fn name(&self) -> &str {
        match self {
            RegistryItem::Constructor(constructor) => constructor.name(),
            RegistryItem::Template(template) => template.name(),
        }
    }

    /// Key the item is stored under when used as a registry default.
    ///
    /// Always `"<tag>:<name>"`, e.g. `regular:ListCell`. Two defaults with
    /// the same tag and name share a key; keeping names unique is up to the
    /// caller.
    pub fn default_key(&self) -> String {
        format!("{}:{}", self.registry_type(), self.name())
    }

    /// Produce a fresh view. Template failures yield `None`.
    pub fn produce(&self) -> Option<ViewRef> {
        match self {
            RegistryItem::Constructor(constructor) => Some(constructor.construct()),
            RegistryItem::Template(template) => template.instantiate(),
        }
    }
}

impl From<ViewConstructor> for RegistryItem {
    fn from(constructor: ViewConstructor) -> Self {
        RegistryItem::Constructor(constructor)
    }
}

impl From<ViewTemplate> for RegistryItem {
    fn from(template: ViewTemplate) -> Self {
        RegistryItem::Template(template)
    }
}
