//! Engine element interfaces
//!
//! The calling convention the bridge layer sees: a node that can be asked
//! for typed views of itself, and per-kind getter/setter sets. Every call
//! can fail with an `EngineError`.

use std::fmt;
use std::rc::Rc;

use crate::EngineResult;

/// Typed view a node may be asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    HtmlElement,
    FormElement,
    TextAreaElement,
}

/// Stable identity of an engine node, independent of the handle used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey {
    pub document: u64,
    pub node: u32,
}

impl NodeKey {
    pub fn new(document: u64, node: u32) -> Self {
        Self { document, node }
    }
}

/// Result of a successful capability query
#[derive(Clone)]
pub enum EngineInterface {
    Element(Rc<dyn EngineElement>),
    Form(Rc<dyn EngineForm>),
    TextArea(Rc<dyn EngineTextArea>),
}

impl EngineInterface {
    /// Which capability this view satisfies
    pub fn capability(&self) -> Capability {
        match self {
            Self::Element(_) => Capability::HtmlElement,
            Self::Form(_) => Capability::FormElement,
            Self::TextArea(_) => Capability::TextAreaElement,
        }
    }

    pub fn into_element(self) -> Option<Rc<dyn EngineElement>> {
        match self {
            Self::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn into_form(self) -> Option<Rc<dyn EngineForm>> {
        match self {
            Self::Form(f) => Some(f),
            _ => None,
        }
    }

    pub fn into_textarea(self) -> Option<Rc<dyn EngineTextArea>> {
        match self {
            Self::TextArea(t) => Some(t),
            _ => None,
        }
    }
}

impl fmt::Debug for EngineInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EngineInterface::{:?}", self.capability())
    }
}

/// A node handle owned by the engine
pub trait EngineNode {
    fn key(&self) -> NodeKey;

    fn tag_name(&self) -> EngineResult<String>;

    /// Capability query; `None` if the node does not support the view
    fn query(&self, capability: Capability) -> Option<EngineInterface>;
}

/// Generic HTML element view
pub trait EngineElement {
    /// `id` attribute, empty when absent
    fn id(&self) -> EngineResult<String>;

    /// Attribute value, empty when absent
    fn attribute(&self, name: &str) -> EngineResult<String>;

    fn set_attribute(&self, name: &str, value: &str) -> EngineResult<()>;
}

/// `<form>` view
pub trait EngineForm {
    /// Absolute submission URL
    fn action(&self) -> EngineResult<String>;
    fn set_action(&self, action: &str) -> EngineResult<()>;

    fn method(&self) -> EngineResult<String>;
    fn set_method(&self, method: &str) -> EngineResult<()>;

    fn enctype(&self) -> EngineResult<String>;
    fn set_enctype(&self, enctype: &str) -> EngineResult<()>;

    fn name(&self) -> EngineResult<String>;
    fn set_name(&self, name: &str) -> EngineResult<()>;

    fn target(&self) -> EngineResult<String>;
    fn set_target(&self, target: &str) -> EngineResult<()>;

    /// Number of listed controls
    fn length(&self) -> EngineResult<u32>;

    /// Live collection of listed controls, re-fetched per call
    fn elements(&self) -> EngineResult<Rc<dyn EngineCollection>>;
}

/// `<textarea>` view
pub trait EngineTextArea {
    fn value(&self) -> EngineResult<String>;
    fn set_value(&self, value: &str) -> EngineResult<()>;

    fn name(&self) -> EngineResult<String>;
    fn set_name(&self, name: &str) -> EngineResult<()>;

    fn read_only(&self) -> EngineResult<bool>;
    fn set_read_only(&self, read_only: bool) -> EngineResult<()>;

    fn disabled(&self) -> EngineResult<bool>;
    fn set_disabled(&self, disabled: bool) -> EngineResult<()>;

    fn default_value(&self) -> EngineResult<String>;
    fn set_default_value(&self, value: &str) -> EngineResult<()>;

    fn rows(&self) -> EngineResult<u32>;
    fn set_rows(&self, rows: u32) -> EngineResult<()>;

    fn cols(&self) -> EngineResult<u32>;
    fn set_cols(&self, cols: u32) -> EngineResult<()>;

    fn wrap(&self) -> EngineResult<String>;
    fn set_wrap(&self, wrap: &str) -> EngineResult<()>;

    /// Select the whole value
    fn select(&self) -> EngineResult<()>;

    /// Form owner, if any
    fn form(&self) -> EngineResult<Option<Rc<dyn EngineNode>>>;
}

/// Ordered, live element collection
pub trait EngineCollection {
    fn length(&self) -> EngineResult<u32>;

    /// `None` when `index` is past the end
    fn item(&self, index: u32) -> EngineResult<Option<Rc<dyn EngineNode>>>;
}
