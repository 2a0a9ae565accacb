//! Element handles
//!
//! `ElementRef` is the counted reference the engine hands out for an
//! element. It implements every engine interface; the capability query
//! decides which views a particular element actually exposes.

use std::rc::Rc;

use crate::{
    Capability, Document, ElementData, EngineElement, EngineError, EngineInterface, EngineNode,
    EngineResult, NodeId, NodeKey,
};

/// Counted reference to an element in a document
#[derive(Debug, Clone)]
pub struct ElementRef {
    doc: Document,
    id: NodeId,
}

impl ElementRef {
    pub(crate) fn new(doc: Document, id: NodeId) -> Self {
        Self { doc, id }
    }

    /// Owning document
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Arena ID of this element
    pub fn node_id(&self) -> NodeId {
        self.id
    }

    /// Run `f` over this element's data
    pub(crate) fn with_element<R>(&self, f: impl FnOnce(&ElementData) -> R) -> EngineResult<R> {
        let tree = self.doc.tree();
        let node = tree.get(self.id).ok_or(EngineError::NodeGone(self.id))?;
        let elem = node.as_element().ok_or(EngineError::NotAnElement(self.id))?;
        Ok(f(elem))
    }

    /// Run `f` over this element's data mutably
    pub(crate) fn with_element_mut<R>(
        &self,
        f: impl FnOnce(&mut ElementData) -> R,
    ) -> EngineResult<R> {
        let mut tree = self.doc.tree_mut();
        let node = tree.get_mut(self.id).ok_or(EngineError::NodeGone(self.id))?;
        let elem = node.as_element_mut().ok_or(EngineError::NotAnElement(self.id))?;
        Ok(f(elem))
    }

    /// Attribute value or empty string
    pub(crate) fn attr_or_empty(&self, name: &str) -> EngineResult<String> {
        self.with_element(|e| e.get_attr(name).unwrap_or_default().to_string())
    }

    /// Set or remove a boolean attribute
    pub(crate) fn set_flag(&self, name: &str, on: bool) -> EngineResult<()> {
        self.with_element_mut(|e| {
            if on {
                e.set_attr(name, "");
            } else {
                e.remove_attr(name);
            }
        })
    }

    pub(crate) fn local_name(&self) -> EngineResult<String> {
        self.with_element(|e| e.local_name.clone())
    }

    fn is(&self, local_name: &str) -> bool {
        self.with_element(|e| e.local_name == local_name).unwrap_or(false)
    }
}

impl EngineNode for ElementRef {
    fn key(&self) -> NodeKey {
        NodeKey::new(self.doc.serial(), self.id.index())
    }

    fn tag_name(&self) -> EngineResult<String> {
        Ok(self.local_name()?.to_ascii_uppercase())
    }

    fn query(&self, capability: Capability) -> Option<EngineInterface> {
        let supported = match capability {
            Capability::HtmlElement => self.with_element(|_| ()).is_ok(),
            Capability::FormElement => self.is("form"),
            Capability::TextAreaElement => self.is("textarea"),
        };
        if !supported {
            tracing::trace!(node = ?self.id, ?capability, "capability not supported");
            return None;
        }

        let this = Rc::new(self.clone());
        Some(match capability {
            Capability::HtmlElement => EngineInterface::Element(this),
            Capability::FormElement => EngineInterface::Form(this),
            Capability::TextAreaElement => EngineInterface::TextArea(this),
        })
    }
}

impl EngineElement for ElementRef {
    fn id(&self) -> EngineResult<String> {
        self.attr_or_empty("id")
    }

    fn attribute(&self, name: &str) -> EngineResult<String> {
        self.attr_or_empty(name)
    }

    fn set_attribute(&self, name: &str, value: &str) -> EngineResult<()> {
        self.with_element_mut(|e| e.set_attr(name, value))
    }
}
