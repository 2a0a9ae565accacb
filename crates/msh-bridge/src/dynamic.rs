//! Dynamic members
//!
//! Form controls are reachable as members named by their `id` or `name`
//! attribute. A member is identified by its ordinal in the live `elements`
//! collection; nothing is cached, so an ordinal only stays meaningful while
//! the collection keeps its order.

use msh_dom::{Capability, EngineCollection, EngineInterface};

use crate::{eq_ignore_case, BridgeError, BridgeResult, NodeRef, Value};

/// A control resolved by name
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicMember {
    pub ordinal: u32,
    pub node: NodeRef,
}

/// Scan `collection` in order for the `nth` (0-based) control whose id or
/// name attribute equals `name` case-insensitively
///
/// Each control is compared by id first, then by name; the first successful
/// comparison in collection order counts. Any engine failure aborts the scan.
pub(crate) fn scan(
    collection: &dyn EngineCollection,
    name: &str,
    nth: u32,
) -> BridgeResult<DynamicMember> {
    let len = collection.length()?;
    let mut seen = 0;

    for i in 0..len {
        let node = collection
            .item(i)?
            .ok_or_else(|| BridgeError::backend(format!("item {i} of {len} vanished during scan")))?;
        let element = node
            .query(Capability::HtmlElement)
            .and_then(EngineInterface::into_element)
            .ok_or_else(|| BridgeError::backend(format!("item {i} is not an HTML element")))?;

        let matched = eq_ignore_case(&element.id()?, name)
            || eq_ignore_case(&element.attribute("name")?, name);
        if !matched {
            continue;
        }
        if seen == nth {
            tracing::trace!(name, ordinal = i, "resolved dynamic member");
            return Ok(DynamicMember { ordinal: i, node: NodeRef::new(node) });
        }
        seen += 1;
    }

    Err(BridgeError::NameNotFound(name.to_string()))
}

/// Fetch the item at `ordinal`; past the end is `Null`, not an error
pub(crate) fn fetch(collection: &dyn EngineCollection, ordinal: u32) -> BridgeResult<Value> {
    let item = collection.item(ordinal)?;
    Ok(item.map(NodeRef::new).into())
}
