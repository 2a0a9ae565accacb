//! Values crossing the external interface

use std::fmt;
use std::rc::Rc;

use msh_dom::{EngineNode, NodeKey};

use crate::{Bstr, BridgeError, BridgeResult};

/// Opaque reference to an engine element returned to callers
///
/// Callers can compare identity with [`NodeRef::same_node`] or wrap the node
/// with [`crate::BridgeHandle::create`] for further property access.
#[derive(Clone)]
pub struct NodeRef {
    node: Rc<dyn EngineNode>,
}

impl NodeRef {
    pub fn new(node: Rc<dyn EngineNode>) -> Self {
        Self { node }
    }

    pub fn key(&self) -> NodeKey {
        self.node.key()
    }

    pub fn node(&self) -> &Rc<dyn EngineNode> {
        &self.node
    }

    pub fn same_node(&self, other: &NodeRef) -> bool {
        self.key() == other.key()
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeRef").field(&self.key()).finish()
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.same_node(other)
    }
}

/// External value representation
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No value (null string / null object)
    Null,
    Str(Bstr),
    Bool(bool),
    Long(i32),
    Dispatch(NodeRef),
}

impl Value {
    /// Marshal a string result
    pub fn string(s: &str) -> BridgeResult<Self> {
        Ok(Self::Str(Bstr::try_from_str(s)?))
    }

    /// An empty string becomes `Null`; anything else is kept
    pub fn empty_as_null(self) -> Self {
        match self {
            Self::Str(s) if s.is_empty() => Self::Null,
            other => other,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// String argument; a null string reads as empty
    pub fn to_arg_string(&self) -> BridgeResult<String> {
        match self {
            Self::Null => Ok(String::new()),
            Self::Str(s) => Ok(s.to_string_lossy()),
            other => Err(BridgeError::invalid(format!("expected a string, got {other:?}"))),
        }
    }

    pub fn to_arg_bool(&self) -> BridgeResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            other => Err(BridgeError::invalid(format!("expected a boolean, got {other:?}"))),
        }
    }

    pub fn to_arg_long(&self) -> BridgeResult<i32> {
        match self {
            Self::Long(n) => Ok(*n),
            other => Err(BridgeError::invalid(format!("expected an integer, got {other:?}"))),
        }
    }

    /// String content for assertions and logging
    pub fn as_string(&self) -> Option<String> {
        match self {
            Self::Str(s) => Some(s.to_string_lossy()),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&NodeRef> {
        match self {
            Self::Dispatch(n) => Some(n),
            _ => None,
        }
    }
}

impl From<Bstr> for Value {
    fn from(s: Bstr) -> Self {
        Self::Str(s)
    }
}

impl From<Option<Bstr>> for Value {
    fn from(s: Option<Bstr>) -> Self {
        s.map_or(Self::Null, Self::Str)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Long(n)
    }
}

impl From<NodeRef> for Value {
    fn from(n: NodeRef) -> Self {
        Self::Dispatch(n)
    }
}

impl From<Option<NodeRef>> for Value {
    fn from(n: Option<NodeRef>) -> Self {
        n.map_or(Self::Null, Self::Dispatch)
    }
}
