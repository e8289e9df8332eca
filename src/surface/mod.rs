//! Presentation surfaces.
//!
//! A surface is the element tree that charts append their slots to. The
//! [`Surface`] trait is the seam to a real renderer; [`MemorySurface`] is
//! a plain in-memory tree that renders to text.

mod memory;

pub use memory::MemorySurface;

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

use crate::error::Result;

/// Identifier of an element on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) usize);

impl ElementId {
    /// Raw index of the element.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Role of an element within a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Parent container of one slot.
    Container,
    /// Text naming the slot's key.
    Label,
    /// Text showing the slot's current value.
    Value,
}

/// An element tree charts can draw into.
pub trait Surface: Send + Sync {
    /// Append a new element under `parent`, or at the top level.
    fn append(&mut self, parent: Option<ElementId>, kind: ElementKind) -> Result<ElementId>;

    /// Replace the displayed text of an element.
    fn set_text(&mut self, id: ElementId, text: &str) -> Result<()>;

    /// Tag an element with a key.
    fn set_datum(&mut self, id: ElementId, datum: &str) -> Result<()>;

    /// Displayed text of an element.
    fn text(&self, id: ElementId) -> Option<&str>;

    /// Key an element was tagged with.
    fn datum(&self, id: ElementId) -> Option<&str>;
}

/// A surface shared between charts and the code that displays it.
pub type SharedSurface<S> = Arc<RwLock<S>>;

/// Datum of an element, copied out so no guard outlives the call.
///
/// Hover handlers should use this (or [`ChartHandle::key_of`]) rather than
/// `surface.read().datum(..)` inside an update call, since charts write to
/// the surface while updating.
///
/// [`ChartHandle::key_of`]: crate::ChartHandle::key_of
pub fn datum_of<S: Surface>(surface: &SharedSurface<S>, id: ElementId) -> Option<String> {
    surface.read().datum(id).map(str::to_owned)
}

/// Wrap a surface for sharing.
pub fn shared<S: Surface>(surface: S) -> SharedSurface<S> {
    Arc::new(RwLock::new(surface))
}
