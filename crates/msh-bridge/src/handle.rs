//! Bridge handles
//!
//! A `BridgeHandle` is the externally visible object for one engine element.
//! It owns one counted reference to the engine node, obtained by capability
//! query at construction, and releases it when the last handle drops.

use std::fmt;
use std::rc::Rc;

use msh_dom::{Capability, EngineElement, EngineInterface, EngineNode, NodeKey};
use serde::{Deserialize, Serialize};

use crate::property::{self, PropertySpec};
use crate::{BridgeError, BridgeResult, Config, FormElement, NodeRef, TextAreaElement};

/// Element kinds the bridge can wrap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Form,
    TextArea,
}

impl ElementKind {
    /// Engine capability the kind requires
    pub fn capability(self) -> Capability {
        match self {
            Self::Form => Capability::FormElement,
            Self::TextArea => Capability::TextAreaElement,
        }
    }

    /// Interface table published for the kind
    pub fn properties(self) -> &'static [PropertySpec] {
        match self {
            Self::Form => property::FORM_PROPERTIES,
            Self::TextArea => property::TEXTAREA_PROPERTIES,
        }
    }

    /// External interface name
    pub fn interface_name(self) -> &'static str {
        match self {
            Self::Form => "IHTMLFormElement",
            Self::TextArea => "IHTMLTextAreaElement",
        }
    }
}

/// Interfaces a caller may ask a handle for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExternalCapability {
    Unknown,
    Dispatch,
    HtmlElement,
    FormElement,
    TextAreaElement,
}

/// Result of [`BridgeHandle::as_capability`]; each variant holds its own reference
#[derive(Debug, Clone)]
pub enum ExternalInterface {
    Unknown(BridgeHandle),
    Dispatch(BridgeHandle),
    HtmlElement(BridgeHandle),
    Form(FormElement),
    TextArea(TextAreaElement),
}

pub(crate) enum Wrapped {
    Form(Rc<dyn msh_dom::EngineForm>),
    TextArea(Rc<dyn msh_dom::EngineTextArea>),
}

pub(crate) struct Inner {
    pub(crate) kind: ElementKind,
    pub(crate) node: Rc<dyn EngineNode>,
    pub(crate) element: Rc<dyn EngineElement>,
    pub(crate) wrapped: Wrapped,
    pub(crate) config: Config,
}

impl Drop for Inner {
    fn drop(&mut self) {
        tracing::trace!(kind = ?self.kind, node = ?self.node.key(), "releasing wrapped node");
    }
}

/// Externally visible object wrapping one engine element
///
/// Cloning is `AddRef`, dropping is `Release`.
#[derive(Clone)]
pub struct BridgeHandle {
    pub(crate) inner: Rc<Inner>,
}

impl BridgeHandle {
    /// Wrap `node` as `kind` with the default configuration
    pub fn create(kind: ElementKind, node: Rc<dyn EngineNode>) -> BridgeResult<Self> {
        Self::create_with_config(kind, node, Config::default())
    }

    /// Wrap `node` as `kind`; fails with `UnsupportedKind` if the node lacks
    /// the kind's engine interface, `InvalidArgument` if `config` is rejected
    pub fn create_with_config(
        kind: ElementKind,
        node: Rc<dyn EngineNode>,
        config: Config,
    ) -> BridgeResult<Self> {
        tracing::trace!(?kind, node = ?node.key(), "create");
        config.validate()?;

        let unsupported = || {
            tracing::error!(?kind, node = ?node.key(), "could not get {} interface", kind.interface_name());
            BridgeError::UnsupportedKind(kind)
        };

        let wrapped = match node.query(kind.capability()) {
            Some(EngineInterface::Form(form)) if kind == ElementKind::Form => Wrapped::Form(form),
            Some(EngineInterface::TextArea(ta)) if kind == ElementKind::TextArea => {
                Wrapped::TextArea(ta)
            }
            _ => return Err(unsupported()),
        };
        let element = node
            .query(Capability::HtmlElement)
            .and_then(EngineInterface::into_element)
            .ok_or_else(unsupported)?;

        Ok(Self {
            inner: Rc::new(Inner {
                kind,
                node,
                element,
                wrapped,
                config,
            }),
        })
    }

    pub fn kind(&self) -> ElementKind {
        self.inner.kind
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Identity of the wrapped engine node
    pub fn key(&self) -> NodeKey {
        self.inner.node.key()
    }

    /// Wrapped node as a value callers can hand around
    pub fn node_ref(&self) -> NodeRef {
        NodeRef::new(Rc::clone(&self.inner.node))
    }

    /// Interface table for this handle's kind
    pub fn properties(&self) -> &'static [PropertySpec] {
        self.inner.kind.properties()
    }

    /// Number of live handles sharing this object
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    /// Take another reference
    pub fn add_ref(&self) -> Self {
        self.clone()
    }

    /// Drop this reference, returning how many remain
    pub fn release(self) -> usize {
        let remaining = self.ref_count() - 1;
        drop(self);
        remaining
    }

    /// Two handles wrap the same object
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Capability query over the external interfaces
    pub fn as_capability(&self, capability: ExternalCapability) -> Option<ExternalInterface> {
        let iface = match (capability, &self.inner.wrapped) {
            (ExternalCapability::Unknown, _) => ExternalInterface::Unknown(self.clone()),
            (ExternalCapability::Dispatch, _) => ExternalInterface::Dispatch(self.clone()),
            (ExternalCapability::HtmlElement, _) => ExternalInterface::HtmlElement(self.clone()),
            (ExternalCapability::FormElement, Wrapped::Form(form)) => {
                ExternalInterface::Form(FormElement::new(self.clone(), Rc::clone(form)))
            }
            (ExternalCapability::TextAreaElement, Wrapped::TextArea(ta)) => {
                ExternalInterface::TextArea(TextAreaElement::new(self.clone(), Rc::clone(ta)))
            }
            _ => {
                tracing::trace!(?capability, kind = ?self.kind(), "interface not supported");
                return None;
            }
        };
        Some(iface)
    }

    /// Typed form interface, if this handle wraps a form
    pub fn as_form(&self) -> Option<FormElement> {
        match self.as_capability(ExternalCapability::FormElement)? {
            ExternalInterface::Form(form) => Some(form),
            _ => None,
        }
    }

    /// Typed textarea interface, if this handle wraps a textarea
    pub fn as_textarea(&self) -> Option<TextAreaElement> {
        match self.as_capability(ExternalCapability::TextAreaElement)? {
            ExternalInterface::TextArea(ta) => Some(ta),
            _ => None,
        }
    }

    /// Generic element attribute access shared by all kinds
    pub fn element(&self) -> &Rc<dyn EngineElement> {
        &self.inner.element
    }
}

impl fmt::Debug for BridgeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeHandle")
            .field("kind", &self.inner.kind)
            .field("node", &self.key())
            .field("refs", &self.ref_count())
            .finish()
    }
}
