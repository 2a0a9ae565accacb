//! MSHTML DOM - engine-side element model
//!
//! Arena-backed DOM tree plus the element interfaces (element, form,
//! textarea, live collection) that the bridge layer republishes.

mod node;
mod tree;
mod document;
mod element;
mod interfaces;
pub mod forms;

pub use node::{Attribute, ControlState, ElementData, Node, NodeData};
pub use tree::DomTree;
pub use document::Document;
pub use element::ElementRef;
pub use interfaces::{
    Capability, EngineCollection, EngineElement, EngineForm, EngineInterface, EngineNode,
    EngineTextArea, NodeKey,
};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this is not the sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Failure reported by the engine for a DOM call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("Node {0:?} no longer exists")]
    NodeGone(NodeId),

    #[error("Node {0:?} is not an element")]
    NotAnElement(NodeId),

    #[error("Invalid document URL: {0}")]
    InvalidUrl(String),

    #[error("Engine failure: {0}")]
    Failure(String),
}

/// Result of an engine call
pub type EngineResult<T> = Result<T, EngineError>;
