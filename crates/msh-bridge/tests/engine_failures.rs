//! Engine failure propagation, using a scripted engine that fails on demand

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use msh_bridge::{hresult, BridgeError, BridgeHandle, ElementKind, ItemArg};
use msh_dom::{
    Capability, EngineCollection, EngineElement, EngineError, EngineForm, EngineInterface,
    EngineNode, EngineResult, NodeKey,
};

#[derive(Default)]
struct Faults {
    elements: Cell<bool>,
    length: Cell<bool>,
    item_at: Cell<Option<u32>>,
    not_element_at: Cell<Option<u32>>,
    attributes: Cell<bool>,
    getters: Cell<bool>,
    setters: Cell<bool>,
}

#[derive(Clone)]
struct Control {
    key: u32,
    id: String,
    name: String,
}

#[derive(Default)]
struct State {
    faults: Faults,
    controls: RefCell<Vec<Control>>,
    method: RefCell<String>,
    set_calls: Cell<u32>,
}

fn failure(what: &str) -> EngineError {
    EngineError::Failure(format!("scripted failure: {what}"))
}

impl State {
    fn getter(&self, what: &str) -> EngineResult<()> {
        if self.faults.getters.get() { Err(failure(what)) } else { Ok(()) }
    }

    fn setter(&self, what: &str) -> EngineResult<()> {
        self.set_calls.set(self.set_calls.get() + 1);
        if self.faults.setters.get() { Err(failure(what)) } else { Ok(()) }
    }
}

/// A control node; `element` is false for nodes that refuse the element view
#[derive(Clone)]
struct FakeControl {
    state: Rc<State>,
    control: Control,
    element: bool,
}

impl EngineNode for FakeControl {
    fn key(&self) -> NodeKey {
        NodeKey::new(1, self.control.key)
    }

    fn tag_name(&self) -> EngineResult<String> {
        Ok("INPUT".into())
    }

    fn query(&self, capability: Capability) -> Option<EngineInterface> {
        match capability {
            Capability::HtmlElement if self.element => {
                Some(EngineInterface::Element(Rc::new(self.clone())))
            }
            _ => None,
        }
    }
}

impl EngineElement for FakeControl {
    fn id(&self) -> EngineResult<String> {
        if self.state.faults.attributes.get() {
            return Err(failure("id"));
        }
        Ok(self.control.id.clone())
    }

    fn attribute(&self, name: &str) -> EngineResult<String> {
        if self.state.faults.attributes.get() {
            return Err(failure(name));
        }
        Ok(if name == "name" { self.control.name.clone() } else { String::new() })
    }

    fn set_attribute(&self, name: &str, _value: &str) -> EngineResult<()> {
        Err(failure(name))
    }
}

struct FakeCollection {
    state: Rc<State>,
}

impl EngineCollection for FakeCollection {
    fn length(&self) -> EngineResult<u32> {
        if self.state.faults.length.get() {
            return Err(failure("length"));
        }
        Ok(self.state.controls.borrow().len() as u32)
    }

    fn item(&self, index: u32) -> EngineResult<Option<Rc<dyn EngineNode>>> {
        if self.state.faults.item_at.get() == Some(index) {
            return Err(failure("item"));
        }
        let control = self.state.controls.borrow().get(index as usize).cloned();
        Ok(control.map(|control| {
            Rc::new(FakeControl {
                state: Rc::clone(&self.state),
                control,
                element: self.state.faults.not_element_at.get() != Some(index),
            }) as Rc<dyn EngineNode>
        }))
    }
}

#[derive(Clone)]
struct FakeForm {
    state: Rc<State>,
}

impl EngineNode for FakeForm {
    fn key(&self) -> NodeKey {
        NodeKey::new(1, 0)
    }

    fn tag_name(&self) -> EngineResult<String> {
        Ok("FORM".into())
    }

    fn query(&self, capability: Capability) -> Option<EngineInterface> {
        Some(match capability {
            Capability::HtmlElement => EngineInterface::Element(Rc::new(self.clone())),
            Capability::FormElement => EngineInterface::Form(Rc::new(self.clone())),
            Capability::TextAreaElement => return None,
        })
    }
}

impl EngineElement for FakeForm {
    fn id(&self) -> EngineResult<String> {
        Ok(String::new())
    }

    fn attribute(&self, _name: &str) -> EngineResult<String> {
        Ok(String::new())
    }

    fn set_attribute(&self, name: &str, _value: &str) -> EngineResult<()> {
        self.state.setter(name)
    }
}

impl EngineForm for FakeForm {
    fn action(&self) -> EngineResult<String> {
        self.state.getter("action")?;
        Ok("about:blank".into())
    }

    fn set_action(&self, _action: &str) -> EngineResult<()> {
        self.state.setter("action")
    }

    fn method(&self) -> EngineResult<String> {
        self.state.getter("method")?;
        Ok(self.state.method.borrow().clone())
    }

    fn set_method(&self, method: &str) -> EngineResult<()> {
        self.state.setter("method")?;
        *self.state.method.borrow_mut() = method.to_ascii_lowercase();
        Ok(())
    }

    fn enctype(&self) -> EngineResult<String> {
        self.state.getter("enctype")?;
        Ok("application/x-www-form-urlencoded".into())
    }

    fn set_enctype(&self, _enctype: &str) -> EngineResult<()> {
        self.state.setter("enctype")
    }

    fn name(&self) -> EngineResult<String> {
        self.state.getter("name")?;
        Ok(String::new())
    }

    fn set_name(&self, _name: &str) -> EngineResult<()> {
        self.state.setter("name")
    }

    fn target(&self) -> EngineResult<String> {
        self.state.getter("target")?;
        Ok(String::new())
    }

    fn set_target(&self, _target: &str) -> EngineResult<()> {
        self.state.setter("target")
    }

    fn length(&self) -> EngineResult<u32> {
        self.elements()?.length()
    }

    fn elements(&self) -> EngineResult<Rc<dyn EngineCollection>> {
        if self.state.faults.elements.get() {
            return Err(failure("elements"));
        }
        Ok(Rc::new(FakeCollection { state: Rc::clone(&self.state) }))
    }
}

/// A node that answers no capability at all
struct Opaque {
    _state: Rc<State>,
}

impl EngineNode for Opaque {
    fn key(&self) -> NodeKey {
        NodeKey::new(1, 99)
    }

    fn tag_name(&self) -> EngineResult<String> {
        Ok("SPAN".into())
    }

    fn query(&self, _capability: Capability) -> Option<EngineInterface> {
        None
    }
}

fn form_with(controls: &[(&str, &str)]) -> (Rc<State>, BridgeHandle) {
    let state = Rc::new(State::default());
    *state.controls.borrow_mut() = controls
        .iter()
        .zip(1..)
        .map(|(&(id, name), key)| Control { key, id: id.into(), name: name.into() })
        .collect();
    let node = Rc::new(FakeForm { state: Rc::clone(&state) });
    let handle = BridgeHandle::create(ElementKind::Form, node).unwrap();
    (state, handle)
}

fn is_backend<T>(result: &Result<T, BridgeError>) -> bool {
    matches!(result, Err(BridgeError::BackendFailure(_)))
}

// ============================================================================
// DYNAMIC SCAN
// ============================================================================

#[test]
fn test_scan_matches_on_fake_engine() {
    let (_state, handle) = form_with(&[("a", ""), ("", "b"), ("c", "c")]);
    let form = handle.as_form().unwrap();
    assert_eq!(form.resolve_name("B").unwrap(), 1);
    assert_eq!(form.resolve_name("c").unwrap(), 2);
    assert!(matches!(form.resolve_name("d"), Err(BridgeError::NameNotFound(_))));
}

#[test]
fn test_elements_failure() {
    let (state, handle) = form_with(&[("a", "")]);
    let form = handle.as_form().unwrap();
    state.faults.elements.set(true);

    assert!(is_backend(&form.resolve_name("a")));
    assert!(is_backend(&form.item_at(0)));
    assert!(is_backend(&form.get_length()));
    assert!(is_backend(&form.invoke_ordinal(0)));
}

#[test]
fn test_length_failure() {
    let (state, handle) = form_with(&[("a", "")]);
    state.faults.length.set(true);
    let result = handle.as_form().unwrap().resolve_name("a");
    assert!(is_backend(&result));
}

#[test]
fn test_item_failure_aborts_scan() {
    let (state, handle) = form_with(&[("a", ""), ("b", ""), ("c", "")]);
    let form = handle.as_form().unwrap();
    state.faults.item_at.set(Some(1));

    // A match before the failing item still resolves
    assert_eq!(form.resolve_name("a").unwrap(), 0);
    // Later matches are never reached
    let result = form.resolve_name("c");
    assert!(is_backend(&result));
    assert_eq!(result.unwrap_err().hresult(), hresult::E_FAIL);
}

#[test]
fn test_non_element_aborts_scan() {
    let (state, handle) = form_with(&[("a", ""), ("b", "")]);
    state.faults.not_element_at.set(Some(0));
    let result = handle.as_form().unwrap().resolve_name("b");
    assert!(is_backend(&result));
}

#[test]
fn test_attribute_failure_aborts_scan() {
    let (state, handle) = form_with(&[("a", "")]);
    state.faults.attributes.set(true);
    let form = handle.as_form().unwrap();

    assert!(is_backend(&form.resolve_name("a")));
    assert!(is_backend(&handle.get_ids_of_names("a")));
    assert!(is_backend(&form.item(&ItemArg::Name("a".into()), &ItemArg::Missing)));
}

// ============================================================================
// STATIC ACCESS
// ============================================================================

#[test]
fn test_getter_failure() {
    let (state, handle) = form_with(&[]);
    let form = handle.as_form().unwrap();
    state.faults.getters.set(true);

    assert!(is_backend(&form.get_action()));
    assert!(is_backend(&form.get_method()));
    assert!(is_backend(&form.get_name()));
    assert!(is_backend(&handle.get("target")));
}

#[test]
fn test_setter_failure_after_validation() {
    let (state, handle) = form_with(&[]);
    let form = handle.as_form().unwrap();
    form.put_method("post").unwrap();
    assert_eq!(state.set_calls.get(), 1);

    state.faults.setters.set(true);
    assert!(is_backend(&form.put_method("get")));
    assert_eq!(state.set_calls.get(), 2);

    // Rejected input never reaches the engine
    assert!(matches!(form.put_method("head"), Err(BridgeError::InvalidArgument(_))));
    assert_eq!(state.set_calls.get(), 2);

    state.faults.setters.set(false);
    assert_eq!(form.get_method().unwrap(), "post");
}

// ============================================================================
// LIFECYCLE
// ============================================================================

#[test]
fn test_create_without_capability_holds_nothing() {
    let state = Rc::new(State::default());
    let node = Rc::new(Opaque { _state: Rc::clone(&state) });

    let err = BridgeHandle::create(ElementKind::Form, node).unwrap_err();
    assert_eq!(err, BridgeError::UnsupportedKind(ElementKind::Form));
    assert_eq!(Rc::strong_count(&state), 1);
}

#[test]
fn test_last_release_drops_engine_references() {
    let (state, handle) = form_with(&[("a", "")]);
    let extra = handle.add_ref();
    let form = handle.as_form().unwrap();
    assert!(Rc::strong_count(&state) > 1);

    drop(form);
    drop(handle);
    assert!(Rc::strong_count(&state) > 1);

    assert_eq!(extra.release(), 0);
    assert_eq!(Rc::strong_count(&state), 1);
}
