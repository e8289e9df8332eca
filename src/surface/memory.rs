use super::{ElementId, ElementKind, Surface};
use crate::error::{Result, TallyError};

#[derive(Debug, Clone)]
struct Element {
    kind: ElementKind,
    children: Vec<ElementId>,
    text: String,
    datum: Option<String>,
}

/// In-memory element tree.
///
/// Elements are never removed, so ids stay valid for the surface's
/// lifetime.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    elements: Vec<Element>,
    roots: Vec<ElementId>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements ever appended.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Top-level elements in append order.
    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    /// Children of an element in append order.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.elements
            .get(id.0)
            .map(|element| element.children.as_slice())
            .unwrap_or_default()
    }

    /// Kind of an element.
    pub fn kind(&self, id: ElementId) -> Option<ElementKind> {
        self.elements.get(id.0).map(|element| element.kind)
    }

    /// Render every top-level container as a `label: value` line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for &root in &self.roots {
            let mut label = "";
            let mut value = "";
            for &child in self.children(root) {
                match self.kind(child) {
                    Some(ElementKind::Label) => label = self.text(child).unwrap_or_default(),
                    Some(ElementKind::Value) => value = self.text(child).unwrap_or_default(),
                    _ => {}
                }
            }
            out.push_str(label);
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        }
        out
    }

    fn element_mut(&mut self, id: ElementId) -> Result<&mut Element> {
        self.elements
            .get_mut(id.0)
            .ok_or(TallyError::UnknownElement { id: id.0 })
    }
}

impl Surface for MemorySurface {
    fn append(&mut self, parent: Option<ElementId>, kind: ElementKind) -> Result<ElementId> {
        let id = ElementId(self.elements.len());
        match parent {
            Some(parent) => self.element_mut(parent)?.children.push(id),
            None => self.roots.push(id),
        }
        self.elements.push(Element {
            kind,
            children: Vec::new(),
            text: String::new(),
            datum: None,
        });
        Ok(id)
    }

    fn set_text(&mut self, id: ElementId, text: &str) -> Result<()> {
        let element = self.element_mut(id)?;
        element.text.clear();
        element.text.push_str(text);
        Ok(())
    }

    fn set_datum(&mut self, id: ElementId, datum: &str) -> Result<()> {
        self.element_mut(id)?.datum = Some(datum.to_owned());
        Ok(())
    }

    fn text(&self, id: ElementId) -> Option<&str> {
        self.elements.get(id.0).map(|element| element.text.as_str())
    }

    fn datum(&self, id: ElementId) -> Option<&str> {
        self.elements.get(id.0).and_then(|element| element.datum.as_deref())
    }
}
