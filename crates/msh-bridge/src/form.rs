//! `IHTMLFormElement`
//!
//! Typed entry points for a wrapped `<form>`. Every call goes straight to the
//! engine; only method and encoding are validated on the way in.

use std::fmt;
use std::rc::Rc;

use msh_dom::EngineForm;

use crate::dynamic::{self, DynamicMember};
use crate::property::{self, FORM_PROPERTIES};
use crate::{Bstr, BridgeError, BridgeHandle, BridgeResult, Value};

/// Argument of `item(name, index)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemArg {
    Missing,
    Index(i32),
    Name(String),
}

impl TryFrom<&Value> for ItemArg {
    type Error = BridgeError;

    fn try_from(value: &Value) -> BridgeResult<Self> {
        match value {
            Value::Null => Ok(Self::Missing),
            Value::Long(i) => Ok(Self::Index(*i)),
            Value::Str(s) => Ok(Self::Name(s.to_string_lossy())),
            other => Err(BridgeError::invalid(format!("unsupported item argument {other:?}"))),
        }
    }
}

/// Form view of a bridge handle
#[derive(Clone)]
pub struct FormElement {
    handle: BridgeHandle,
    form: Rc<dyn EngineForm>,
}

impl fmt::Debug for FormElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FormElement").field(&self.handle).finish()
    }
}

impl FormElement {
    pub(crate) fn new(handle: BridgeHandle, form: Rc<dyn EngineForm>) -> Self {
        Self { handle, form }
    }

    /// Handle this view was obtained from
    pub fn handle(&self) -> &BridgeHandle {
        &self.handle
    }

    /// Store the raw action; the engine resolves it on read
    pub fn put_action(&self, v: &str) -> BridgeResult<()> {
        tracing::trace!(node = ?self.handle.key(), v, "put_action");
        self.form.set_action(v)?;
        Ok(())
    }

    /// Absolute URL of the action
    pub fn get_action(&self) -> BridgeResult<Bstr> {
        tracing::trace!(node = ?self.handle.key(), "get_action");
        Bstr::try_from_str(&self.form.action()?)
    }

    /// Not wired
    pub fn put_dir(&self, _v: &str) -> BridgeResult<()> {
        Err(BridgeError::not_implemented("IHTMLFormElement::put_dir"))
    }

    /// Not wired
    pub fn get_dir(&self) -> BridgeResult<Bstr> {
        Err(BridgeError::not_implemented("IHTMLFormElement::get_dir"))
    }

    /// Set the enctype; must be one of the three form encodings
    pub fn put_encoding(&self, v: &str) -> BridgeResult<()> {
        tracing::trace!(node = ?self.handle.key(), v, "put_encoding");
        property::member(FORM_PROPERTIES, "encoding")?.validate(v)?;
        self.form.set_enctype(v)?;
        Ok(())
    }

    /// Canonical enctype
    pub fn get_encoding(&self) -> BridgeResult<Bstr> {
        tracing::trace!(node = ?self.handle.key(), "get_encoding");
        Bstr::try_from_str(&self.form.enctype()?)
    }

    /// Set the method; only GET and POST are accepted
    pub fn put_method(&self, v: &str) -> BridgeResult<()> {
        tracing::trace!(node = ?self.handle.key(), v, "put_method");
        property::member(FORM_PROPERTIES, "method")?.validate(v)?;
        self.form.set_method(v)?;
        Ok(())
    }

    /// Canonical lower-case method
    pub fn get_method(&self) -> BridgeResult<Bstr> {
        tracing::trace!(node = ?self.handle.key(), "get_method");
        Bstr::try_from_str(&self.form.method()?)
    }

    /// The form doubles as its own elements collection
    pub fn get_elements(&self) -> BridgeResult<Value> {
        tracing::trace!(node = ?self.handle.key(), "get_elements");
        Ok(Value::Dispatch(self.handle.node_ref()))
    }

    /// Browsing context name for submission
    pub fn put_target(&self, v: &str) -> BridgeResult<()> {
        tracing::trace!(node = ?self.handle.key(), v, "put_target");
        self.form.set_target(v)?;
        Ok(())
    }

    /// Empty when unset
    pub fn get_target(&self) -> BridgeResult<Bstr> {
        tracing::trace!(node = ?self.handle.key(), "get_target");
        Bstr::try_from_str(&self.form.target()?)
    }

    /// Set the `name` attribute
    pub fn put_name(&self, v: &str) -> BridgeResult<()> {
        tracing::trace!(node = ?self.handle.key(), v, "put_name");
        self.form.set_name(v)?;
        Ok(())
    }

    /// `None` when the form has no name
    pub fn get_name(&self) -> BridgeResult<Option<Bstr>> {
        tracing::trace!(node = ?self.handle.key(), "get_name");
        Bstr::try_nullable(&self.form.name()?)
    }

    /// Event handlers are not wired
    pub fn put_onsubmit(&self, _v: &Value) -> BridgeResult<()> {
        Err(BridgeError::not_implemented("IHTMLFormElement::put_onsubmit"))
    }

    pub fn get_onsubmit(&self) -> BridgeResult<Value> {
        Err(BridgeError::not_implemented("IHTMLFormElement::get_onsubmit"))
    }

    pub fn put_onreset(&self, _v: &Value) -> BridgeResult<()> {
        Err(BridgeError::not_implemented("IHTMLFormElement::put_onreset"))
    }

    pub fn get_onreset(&self) -> BridgeResult<Value> {
        Err(BridgeError::not_implemented("IHTMLFormElement::get_onreset"))
    }

    /// Submission is not wired
    pub fn submit(&self) -> BridgeResult<()> {
        Err(BridgeError::not_implemented("IHTMLFormElement::submit"))
    }

    /// Not wired
    pub fn reset(&self) -> BridgeResult<()> {
        Err(BridgeError::not_implemented("IHTMLFormElement::reset"))
    }

    /// Setting `length` is not wired
    pub fn put_length(&self, _v: i32) -> BridgeResult<()> {
        Err(BridgeError::not_implemented("IHTMLFormElement::put_length"))
    }

    /// Number of listed controls
    pub fn get_length(&self) -> BridgeResult<i32> {
        tracing::trace!(node = ?self.handle.key(), "get_length");
        let len = self.form.length()?;
        i32::try_from(len).map_err(|_| BridgeError::backend(format!("length {len} out of range")))
    }

    /// Enumeration is not wired
    pub fn new_enum(&self) -> BridgeResult<Value> {
        Err(BridgeError::not_implemented("IHTMLFormElement::_newEnum"))
    }

    /// `item(name, index)`: by position, or by id/name with `index` picking
    /// among several matches
    pub fn item(&self, name: &ItemArg, index: &ItemArg) -> BridgeResult<Value> {
        tracing::trace!(node = ?self.handle.key(), ?name, ?index, "item");
        match name {
            ItemArg::Index(i) => self.item_at(*i),
            ItemArg::Name(n) if self.handle.config().item_by_name => {
                let nth = match index {
                    ItemArg::Missing => 0,
                    ItemArg::Index(i) => u32::try_from(*i)
                        .map_err(|_| BridgeError::invalid(format!("negative index {i}")))?,
                    ItemArg::Name(_) => return Err(BridgeError::invalid("index must be an integer")),
                };
                match dynamic::scan(self.form.elements()?.as_ref(), n, nth) {
                    Ok(member) => Ok(Value::Dispatch(member.node)),
                    Err(BridgeError::NameNotFound(_)) => Ok(Value::Null),
                    Err(e) => Err(e),
                }
            }
            ItemArg::Name(_) => Err(BridgeError::not_implemented("IHTMLFormElement::item(name)")),
            ItemArg::Missing => Err(BridgeError::invalid("item requires a name or index")),
        }
    }

    /// Not wired
    pub fn tags(&self, _tag_name: &Value) -> BridgeResult<Value> {
        Err(BridgeError::not_implemented("IHTMLFormElement::tags"))
    }

    /// Element at `index` in the live collection; past the end is `Null`
    pub fn item_at(&self, index: i32) -> BridgeResult<Value> {
        tracing::trace!(node = ?self.handle.key(), index, "item_at");
        let index = u32::try_from(index)
            .map_err(|_| BridgeError::invalid(format!("negative index {index}")))?;
        dynamic::fetch(self.form.elements()?.as_ref(), index)
    }

    /// Ordinal of the first control whose id or name matches `name`
    pub fn resolve_name(&self, name: &str) -> BridgeResult<u32> {
        self.resolve_member(name).map(|m| m.ordinal)
    }

    /// Like [`Self::resolve_name`], also returning the matched node
    pub fn resolve_member(&self, name: &str) -> BridgeResult<DynamicMember> {
        tracing::trace!(node = ?self.handle.key(), name, "resolve_name");
        dynamic::scan(self.form.elements()?.as_ref(), name, 0)
    }

    /// Re-fetch the control at a previously resolved ordinal
    pub fn invoke_ordinal(&self, ordinal: u32) -> BridgeResult<Value> {
        tracing::trace!(node = ?self.handle.key(), ordinal, "invoke");
        dynamic::fetch(self.form.elements()?.as_ref(), ordinal)
    }
}
