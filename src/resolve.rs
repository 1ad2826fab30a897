//! Turning a caller-supplied target into a live element.

use crate::host::{Document, Element};

/// Placeholder used in diagnostics for elements without an identifier.
pub const NO_ID: &str = "[no id]";

/// Either an identifier to look up or an element the caller already holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target<E> {
    Id(String),
    Element(E),
}

impl<E> From<&str> for Target<E> {
    fn from(id: &str) -> Self {
        Self::Id(id.to_string())
    }
}

impl<E> From<String> for Target<E> {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}

impl<E> From<&String> for Target<E> {
    fn from(id: &String) -> Self {
        Self::Id(id.clone())
    }
}

impl<E: Element> Target<E> {
    /// Name used when reporting this target, before or without resolution.
    pub fn describe(&self) -> String {
        match self {
            Self::Id(id) => id.clone(),
            Self::Element(element) => element_label(element),
        }
    }
}

/// Resolves `target` against `document`.
///
/// A held element is returned as is, without checking that it is still
/// attached. An identifier is looked up once; `None` means absent. Nothing is
/// logged here: each caller reports absence its own way.
pub fn resolve<D>(document: &D, target: &Target<D::Element>) -> Option<D::Element>
where
    D: Document + ?Sized,
{
    match target {
        Target::Element(element) => Some(element.clone()),
        Target::Id(id) => document.element_by_id(id),
    }
}

pub(crate) fn element_label<E: Element + ?Sized>(element: &E) -> String {
    element.id().unwrap_or_else(|| NO_ID.to_string())
}
