//! Document - shared handle over the DOM tree

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use url::Url;

use crate::{DomTree, ElementRef, EngineError, EngineNode, EngineResult, NodeId};

static NEXT_DOCUMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Shared handle to one document
///
/// Cloning shares the same tree. Element handles keep the document alive.
#[derive(Debug, Clone)]
pub struct Document {
    inner: Rc<DocumentInner>,
}

#[derive(Debug)]
struct DocumentInner {
    serial: u64,
    tree: RefCell<DomTree>,
    url: Url,
    skeleton: Skeleton,
}

/// The `<html>`, `<head>` and `<body>` every document starts with
#[derive(Debug, Clone, Copy)]
struct Skeleton {
    html: NodeId,
    head: NodeId,
    body: NodeId,
}

impl Skeleton {
    fn build(tree: &mut DomTree) -> Self {
        let [html, head, body] = ["html", "head", "body"].map(|name| tree.create_element(name));
        let root = tree.root();
        tree.append_child(root, html);
        for child in [head, body] {
            tree.append_child(html, child);
        }
        Self { html, head, body }
    }
}

impl Document {
    /// Create a document with `<html><head/><body/></html>`
    pub fn new(url: &str) -> EngineResult<Self> {
        let url = Url::parse(url).map_err(|e| EngineError::InvalidUrl(format!("{url}: {e}")))?;
        let mut tree = DomTree::new();
        let skeleton = Skeleton::build(&mut tree);

        let serial = NEXT_DOCUMENT_ID.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(serial, %url, "created document");

        Ok(Self {
            inner: Rc::new(DocumentInner {
                serial,
                tree: RefCell::new(tree),
                url,
                skeleton,
            }),
        })
    }

    /// Document URL, base for relative URL resolution
    pub fn url(&self) -> &Url {
        &self.inner.url
    }

    /// Process-unique document number
    pub fn serial(&self) -> u64 {
        self.inner.serial
    }

    /// The `<html>` element
    pub fn document_element(&self) -> NodeId {
        self.inner.skeleton.html
    }

    pub fn head(&self) -> NodeId {
        self.inner.skeleton.head
    }

    pub fn body(&self) -> NodeId {
        self.inner.skeleton.body
    }

    /// Borrow the DOM tree
    pub fn tree(&self) -> Ref<'_, DomTree> {
        self.inner.tree.borrow()
    }

    /// Borrow the DOM tree mutably
    pub fn tree_mut(&self) -> RefMut<'_, DomTree> {
        self.inner.tree.borrow_mut()
    }

    /// Create a detached element
    pub fn create_element(&self, local_name: &str) -> NodeId {
        self.tree_mut().create_element(local_name)
    }

    /// Create an element and append it to `parent`
    pub fn append_element(&self, parent: NodeId, local_name: &str) -> NodeId {
        let mut tree = self.tree_mut();
        let id = tree.create_element(local_name);
        tree.append_child(parent, id);
        id
    }

    /// Append a text node to `parent`
    pub fn append_text(&self, parent: NodeId, text: &str) -> NodeId {
        let mut tree = self.tree_mut();
        let id = tree.create_text(text);
        tree.append_child(parent, id);
        id
    }

    pub fn append_child(&self, parent: NodeId, child: NodeId) {
        self.tree_mut().append_child(parent, child);
    }

    /// Detach a node from its parent
    pub fn remove(&self, id: NodeId) {
        self.tree_mut().detach(id);
    }

    /// Set an attribute on an element
    pub fn set_attribute(&self, id: NodeId, name: &str, value: &str) -> EngineResult<()> {
        let mut tree = self.tree_mut();
        let node = tree.get_mut(id).ok_or(EngineError::NodeGone(id))?;
        let elem = node.as_element_mut().ok_or(EngineError::NotAnElement(id))?;
        elem.set_attr(name, value);
        Ok(())
    }

    /// Get an attribute from an element
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<String> {
        self.tree()
            .get(id)
            .and_then(|n| n.as_element())
            .and_then(|e| e.get_attr(name))
            .map(str::to_string)
    }

    /// Handle for an element node
    pub fn element(&self, id: NodeId) -> EngineResult<ElementRef> {
        let tree = self.tree();
        let node = tree.get(id).ok_or(EngineError::NodeGone(id))?;
        if !node.is_element() {
            return Err(EngineError::NotAnElement(id));
        }
        Ok(ElementRef::new(self.clone(), id))
    }

    /// Element handle as an engine node
    pub fn node(&self, id: NodeId) -> EngineResult<Rc<dyn EngineNode>> {
        Ok(Rc::new(self.element(id)?))
    }

    /// First element whose id attribute equals `id`
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        let tree = self.tree();
        tree.descendants(tree.root()).into_iter().find(|&n| {
            tree.get(n)
                .and_then(|node| node.as_element())
                .and_then(|e| e.get_attr("id"))
                == Some(id)
        })
    }

    /// Resolve a URL against the document URL
    pub fn resolve_url(&self, input: &str) -> Option<Url> {
        self.inner.url.join(input).ok()
    }
}
