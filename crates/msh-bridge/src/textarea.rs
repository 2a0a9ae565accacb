//! `IHTMLTextAreaElement`

use std::fmt;
use std::rc::Rc;

use msh_dom::EngineTextArea;

use crate::{Bstr, BridgeError, BridgeHandle, BridgeResult, NodeRef, Value};

/// Textarea view of a bridge handle
#[derive(Clone)]
pub struct TextAreaElement {
    handle: BridgeHandle,
    textarea: Rc<dyn EngineTextArea>,
}

impl fmt::Debug for TextAreaElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextAreaElement").field(&self.handle).finish()
    }
}

fn to_long(n: u32) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

fn from_long(what: &str, v: i32) -> BridgeResult<u32> {
    u32::try_from(v).map_err(|_| BridgeError::invalid(format!("{what} cannot be negative ({v})")))
}

impl TextAreaElement {
    pub(crate) fn new(handle: BridgeHandle, textarea: Rc<dyn EngineTextArea>) -> Self {
        Self { handle, textarea }
    }

    /// Handle this view was obtained from
    pub fn handle(&self) -> &BridgeHandle {
        &self.handle
    }

    /// Always `"textarea"`
    pub fn get_type(&self) -> BridgeResult<Bstr> {
        tracing::trace!(node = ?self.handle.key(), "get_type");
        Bstr::try_from_str("textarea")
    }

    /// Set the dirty value
    pub fn put_value(&self, v: &str) -> BridgeResult<()> {
        tracing::trace!(node = ?self.handle.key(), v, "put_value");
        self.textarea.set_value(v)?;
        Ok(())
    }

    /// `None` when the value is empty
    pub fn get_value(&self) -> BridgeResult<Option<Bstr>> {
        tracing::trace!(node = ?self.handle.key(), "get_value");
        Bstr::try_nullable(&self.textarea.value()?)
    }

    /// Set the `name` attribute
    pub fn put_name(&self, v: &str) -> BridgeResult<()> {
        tracing::trace!(node = ?self.handle.key(), v, "put_name");
        self.textarea.set_name(v)?;
        Ok(())
    }

    /// Always a string, empty when unnamed
    pub fn get_name(&self) -> BridgeResult<Bstr> {
        tracing::trace!(node = ?self.handle.key(), "get_name");
        Bstr::try_from_str(&self.textarea.name()?)
    }

    /// Not wired
    pub fn put_status(&self, _v: &Value) -> BridgeResult<()> {
        Err(BridgeError::not_implemented("IHTMLTextAreaElement::put_status"))
    }

    pub fn get_status(&self) -> BridgeResult<Value> {
        Err(BridgeError::not_implemented("IHTMLTextAreaElement::get_status"))
    }

    /// Toggle the `disabled` attribute
    pub fn put_disabled(&self, v: bool) -> BridgeResult<()> {
        tracing::trace!(node = ?self.handle.key(), v, "put_disabled");
        self.textarea.set_disabled(v)?;
        Ok(())
    }

    /// Whether `disabled` is present
    pub fn get_disabled(&self) -> BridgeResult<bool> {
        tracing::trace!(node = ?self.handle.key(), "get_disabled");
        Ok(self.textarea.disabled()?)
    }

    /// Form owner, `Null` when the textarea is not inside a form
    pub fn get_form(&self) -> BridgeResult<Value> {
        tracing::trace!(node = ?self.handle.key(), "get_form");
        Ok(self.textarea.form()?.map(NodeRef::new).into())
    }

    /// Replace the element's text content
    pub fn put_default_value(&self, v: &str) -> BridgeResult<()> {
        tracing::trace!(node = ?self.handle.key(), v, "put_defaultValue");
        self.textarea.set_default_value(v)?;
        Ok(())
    }

    /// Text content of the element
    pub fn get_default_value(&self) -> BridgeResult<Bstr> {
        tracing::trace!(node = ?self.handle.key(), "get_defaultValue");
        Bstr::try_from_str(&self.textarea.default_value()?)
    }

    /// Select the whole value
    pub fn select(&self) -> BridgeResult<()> {
        tracing::trace!(node = ?self.handle.key(), "select");
        self.textarea.select()?;
        Ok(())
    }

    /// Event handlers are not wired
    pub fn put_onchange(&self, _v: &Value) -> BridgeResult<()> {
        Err(BridgeError::not_implemented("IHTMLTextAreaElement::put_onchange"))
    }

    pub fn get_onchange(&self) -> BridgeResult<Value> {
        Err(BridgeError::not_implemented("IHTMLTextAreaElement::get_onchange"))
    }

    pub fn put_onselect(&self, _v: &Value) -> BridgeResult<()> {
        Err(BridgeError::not_implemented("IHTMLTextAreaElement::put_onselect"))
    }

    pub fn get_onselect(&self) -> BridgeResult<Value> {
        Err(BridgeError::not_implemented("IHTMLTextAreaElement::get_onselect"))
    }

    /// Toggle the `readonly` attribute
    pub fn put_read_only(&self, v: bool) -> BridgeResult<()> {
        tracing::trace!(node = ?self.handle.key(), v, "put_readOnly");
        self.textarea.set_read_only(v)?;
        Ok(())
    }

    /// Whether `readonly` is present
    pub fn get_read_only(&self) -> BridgeResult<bool> {
        tracing::trace!(node = ?self.handle.key(), "get_readOnly");
        Ok(self.textarea.read_only()?)
    }

    /// Negative counts are rejected
    pub fn put_rows(&self, v: i32) -> BridgeResult<()> {
        tracing::trace!(node = ?self.handle.key(), v, "put_rows");
        self.textarea.set_rows(from_long("rows", v)?)?;
        Ok(())
    }

    /// Visible rows, defaulted by the engine
    pub fn get_rows(&self) -> BridgeResult<i32> {
        tracing::trace!(node = ?self.handle.key(), "get_rows");
        Ok(to_long(self.textarea.rows()?))
    }

    /// Negative counts are rejected
    pub fn put_cols(&self, v: i32) -> BridgeResult<()> {
        tracing::trace!(node = ?self.handle.key(), v, "put_cols");
        self.textarea.set_cols(from_long("cols", v)?)?;
        Ok(())
    }

    /// Visible columns, defaulted by the engine
    pub fn get_cols(&self) -> BridgeResult<i32> {
        tracing::trace!(node = ?self.handle.key(), "get_cols");
        Ok(to_long(self.textarea.cols()?))
    }

    /// Store the `wrap` attribute verbatim
    pub fn put_wrap(&self, v: &str) -> BridgeResult<()> {
        tracing::trace!(node = ?self.handle.key(), v, "put_wrap");
        self.textarea.set_wrap(v)?;
        Ok(())
    }

    /// Raw `wrap` attribute
    pub fn get_wrap(&self) -> BridgeResult<Bstr> {
        tracing::trace!(node = ?self.handle.key(), "get_wrap");
        Bstr::try_from_str(&self.textarea.wrap()?)
    }

    /// Text ranges are not wired
    pub fn create_text_range(&self) -> BridgeResult<Value> {
        Err(BridgeError::not_implemented("IHTMLTextAreaElement::createTextRange"))
    }
}
