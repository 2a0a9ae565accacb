//! Engine interfaces exercised through capability queries

use msh_dom::forms::{FormMethod, DEFAULT_COLS};
use msh_dom::{Capability, Document, EngineError, EngineInterface, EngineNode, NodeId};

fn login_page() -> (Document, NodeId) {
    let doc = Document::new("https://example.org/account/login").unwrap();
    let form = doc.append_element(doc.body(), "form");
    doc.set_attribute(form, "action", "session").unwrap();
    doc.set_attribute(form, "method", "POST").unwrap();

    let user = doc.append_element(form, "input");
    doc.set_attribute(user, "name", "user").unwrap();
    let label = doc.append_element(form, "label");
    doc.append_text(label, "Notes");
    let notes = doc.append_element(form, "textarea");
    doc.set_attribute(notes, "id", "notes").unwrap();
    doc.append_text(notes, "none");
    (doc, form)
}

#[test]
fn test_form_capabilities() {
    let (doc, form) = login_page();
    let node = doc.node(form).unwrap();
    assert_eq!(node.tag_name().unwrap(), "FORM");

    let view = node.query(Capability::FormElement).and_then(EngineInterface::into_form).unwrap();
    assert_eq!(view.action().unwrap(), "https://example.org/account/session");
    assert_eq!(view.method().unwrap(), FormMethod::Post.as_str());
    assert_eq!(view.length().unwrap(), 2);

    assert!(node.query(Capability::HtmlElement).is_some());
    assert!(node.query(Capability::TextAreaElement).is_none());
}

#[test]
fn test_collection_items_are_queryable() {
    let (doc, form) = login_page();
    let view = doc.node(form).unwrap().query(Capability::FormElement).unwrap().into_form().unwrap();
    let elements = view.elements().unwrap();

    let second = elements.item(1).unwrap().unwrap();
    assert_eq!(second.key(), doc.node(doc.get_element_by_id("notes").unwrap()).unwrap().key());

    let element = second.query(Capability::HtmlElement).unwrap().into_element().unwrap();
    assert_eq!(element.id().unwrap(), "notes");
    assert_eq!(element.attribute("name").unwrap(), "");

    let textarea = second.query(Capability::TextAreaElement).unwrap().into_textarea().unwrap();
    assert_eq!(textarea.value().unwrap(), "none");
    assert_eq!(textarea.cols().unwrap(), DEFAULT_COLS);
    assert_eq!(textarea.form().unwrap().unwrap().key(), doc.node(form).unwrap().key());

    assert!(elements.item(2).unwrap().is_none());
}

#[test]
fn test_views_share_state() {
    let (doc, form) = login_page();
    let node = doc.node(form).unwrap();
    let form_view = node.query(Capability::FormElement).unwrap().into_form().unwrap();
    let element = node.query(Capability::HtmlElement).unwrap().into_element().unwrap();

    element.set_attribute("target", "_top").unwrap();
    assert_eq!(form_view.target().unwrap(), "_top");

    form_view.set_name("login").unwrap();
    assert_eq!(element.attribute("NAME").unwrap(), "login");
    assert_eq!(doc.attribute(form, "name").as_deref(), Some("login"));
}

#[test]
fn test_detached_form_keeps_working() {
    let (doc, form) = login_page();
    let node = doc.node(form).unwrap();
    doc.remove(form);

    let view = node.query(Capability::FormElement).unwrap().into_form().unwrap();
    assert_eq!(view.length().unwrap(), 2);
}

#[test]
fn test_text_nodes_are_not_elements() {
    let doc = Document::new("about:blank").unwrap();
    let text = doc.append_text(doc.body(), "hello");
    assert_eq!(doc.node(text).err(), Some(EngineError::NotAnElement(text)));
}

#[test]
fn test_invalid_document_url() {
    assert!(matches!(Document::new("not a url"), Err(EngineError::InvalidUrl(_))));
}

#[test]
fn test_keys_distinguish_documents() {
    let (a, form_a) = login_page();
    let (b, form_b) = login_page();
    assert_eq!(form_a, form_b);
    assert_ne!(a.node(form_a).unwrap().key(), b.node(form_b).unwrap().key());
    assert_eq!(a.node(form_a).unwrap().key(), a.node(form_a).unwrap().key());
}
