//! Node records stored in the document arena
//!
//! Nodes link to each other through `NodeId` indices instead of pointers,
//! so the whole tree lives in one `Vec` owned by the document.

use crate::NodeId;

/// One arena slot: payload plus tree links
#[derive(Debug)]
pub struct Node {
    /// `NONE` for the document node and for detached subtrees
    pub parent: NodeId,
    pub first_child: NodeId,
    pub last_child: NodeId,
    pub prev_sibling: NodeId,
    pub next_sibling: NodeId,
    pub data: NodeData,
}

impl Node {
    /// Unlinked node carrying `data`
    pub fn new(data: NodeData) -> Self {
        let none = NodeId::NONE;
        Self {
            parent: none,
            first_child: none,
            last_child: none,
            prev_sibling: none,
            next_sibling: none,
            data,
        }
    }

    pub fn is_element(&self) -> bool {
        self.as_element().is_some()
    }

    pub fn as_element(&self) -> Option<&ElementData> {
        if let NodeData::Element(e) = &self.data { Some(e) } else { None }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        if let NodeData::Element(e) = &mut self.data { Some(e) } else { None }
    }

    pub fn as_text(&self) -> Option<&str> {
        if let NodeData::Text(t) = &self.data { Some(t) } else { None }
    }
}

/// What a node is
#[derive(Debug)]
pub enum NodeData {
    Document,
    Element(ElementData),
    Text(String),
}

/// Tag, attributes and control state of an element
#[derive(Debug)]
pub struct ElementData {
    /// Lowercased local name ("form", "textarea", ...)
    pub local_name: String,
    /// Attributes in insertion order, names lowercased
    pub attrs: Vec<Attribute>,
    /// Mutable state for form controls
    pub control: ControlState,
}

impl ElementData {
    pub fn new(local_name: &str) -> Self {
        Self {
            local_name: local_name.to_ascii_lowercase(),
            attrs: Vec::new(),
            control: ControlState::default(),
        }
    }

    /// Attribute lookup, ignoring ASCII case
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter().find(|a| a.name.eq_ignore_ascii_case(name)).map(|a| &*a.value)
    }

    /// Replace an existing value or append a new attribute
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|a| a.name.eq_ignore_ascii_case(name)) {
            Some(attr) => attr.value = value.to_string(),
            None => self.attrs.push(Attribute {
                name: name.to_ascii_lowercase(),
                value: value.to_string(),
            }),
        }
    }

    /// Remove an attribute, returning whether it was present
    pub fn remove_attr(&mut self, name: &str) -> bool {
        let before = self.attrs.len();
        self.attrs.retain(|a| !a.name.eq_ignore_ascii_case(name));
        self.attrs.len() != before
    }

    /// Check for a boolean attribute
    pub fn has_attr(&self, name: &str) -> bool {
        self.get_attr(name).is_some()
    }
}

/// Name/value pair; the name is stored lowercased
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Per-element state that does not live in attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlState {
    /// Value set through the value setter; `None` until the control is dirty
    pub dirty_value: Option<String>,
    /// Selection range in chars
    pub selection_start: usize,
    pub selection_end: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_names_are_case_insensitive() {
        let mut elem = ElementData::new("FORM");
        assert_eq!(elem.local_name, "form");

        elem.set_attr("Action", "/submit");
        elem.set_attr("ACTION", "/other");
        assert_eq!(elem.attrs.len(), 1);
        assert_eq!(elem.get_attr("action"), Some("/other"));
    }

    #[test]
    fn test_remove_attr() {
        let mut elem = ElementData::new("textarea");
        elem.set_attr("readonly", "");
        assert!(elem.has_attr("readonly"));
        assert!(elem.remove_attr("READONLY"));
        assert!(!elem.has_attr("readonly"));
        assert!(!elem.remove_attr("readonly"));
    }
}
