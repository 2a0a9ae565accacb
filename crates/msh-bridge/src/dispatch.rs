//! Name and DISPID based access
//!
//! Routes table lookups to the typed interfaces. Members the table marks as
//! unwired report `NotImplemented` before any argument check. Static members
//! always win over dynamic ones; dynamic DISPIDs are `custom_dispid_min + ordinal`.

use std::rc::Rc;

use msh_dom::{EngineForm, EngineTextArea};

use crate::handle::Wrapped;
use crate::property::{self, dispid, PropertySpec, ValueType};
use crate::{
    BridgeError, BridgeHandle, BridgeResult, FormElement, ItemArg, TextAreaElement, Value,
};

/// How a DISPID is being invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchKind {
    Method,
    PropertyGet,
    PropertyPut,
}

fn unknown_dispid(id: i32) -> BridgeError {
    BridgeError::NameNotFound(format!("DISPID {id:#x}"))
}

/// Check `value` against the member's declared type
fn check_type(spec: &PropertySpec, value: &Value) -> BridgeResult<()> {
    match spec.ty {
        ValueType::String => value.to_arg_string().map(drop),
        ValueType::Bool => value.to_arg_bool().map(drop),
        ValueType::Long => value.to_arg_long().map(drop),
        ValueType::Variant => Ok(()),
        ValueType::Dispatch | ValueType::Unknown | ValueType::Void => {
            Err(BridgeError::invalid(format!("{} cannot be assigned", spec.name)))
        }
    }
}

fn form_get(form: &FormElement, spec: &PropertySpec) -> BridgeResult<Value> {
    match spec.dispid {
        dispid::FORM_ACTION => form.get_action().map(Value::from),
        dispid::FORM_ENCODING => form.get_encoding().map(Value::from),
        dispid::FORM_METHOD => form.get_method().map(Value::from),
        dispid::FORM_ELEMENTS => form.get_elements(),
        dispid::FORM_TARGET => form.get_target().map(Value::from),
        dispid::FORM_NAME => form.get_name().map(Value::from),
        dispid::FORM_LENGTH => form.get_length().map(Value::from),
        other => Err(unknown_dispid(other)),
    }
}

fn form_put(form: &FormElement, spec: &PropertySpec, value: &Value) -> BridgeResult<()> {
    match spec.dispid {
        dispid::FORM_ACTION => form.put_action(&value.to_arg_string()?),
        dispid::FORM_ENCODING => form.put_encoding(&value.to_arg_string()?),
        dispid::FORM_METHOD => form.put_method(&value.to_arg_string()?),
        dispid::FORM_TARGET => form.put_target(&value.to_arg_string()?),
        dispid::FORM_NAME => form.put_name(&value.to_arg_string()?),
        other => Err(unknown_dispid(other)),
    }
}

fn form_call(form: &FormElement, spec: &PropertySpec, args: &[Value]) -> BridgeResult<Value> {
    let arg = |i: usize| args.get(i).cloned().unwrap_or(Value::Null);
    match spec.dispid {
        dispid::FORM_ITEM => {
            let name = ItemArg::try_from(&arg(0))?;
            let index = ItemArg::try_from(&arg(1))?;
            form.item(&name, &index)
        }
        other => Err(unknown_dispid(other)),
    }
}

fn textarea_get(ta: &TextAreaElement, spec: &PropertySpec) -> BridgeResult<Value> {
    match spec.dispid {
        dispid::TEXTAREA_TYPE => ta.get_type().map(Value::from),
        dispid::TEXTAREA_VALUE => ta.get_value().map(Value::from),
        dispid::TEXTAREA_NAME => ta.get_name().map(Value::from),
        dispid::TEXTAREA_DISABLED => ta.get_disabled().map(Value::from),
        dispid::TEXTAREA_FORM => ta.get_form(),
        dispid::TEXTAREA_DEFAULT_VALUE => ta.get_default_value().map(Value::from),
        dispid::TEXTAREA_READONLY => ta.get_read_only().map(Value::from),
        dispid::TEXTAREA_ROWS => ta.get_rows().map(Value::from),
        dispid::TEXTAREA_COLS => ta.get_cols().map(Value::from),
        dispid::TEXTAREA_WRAP => ta.get_wrap().map(Value::from),
        other => Err(unknown_dispid(other)),
    }
}

fn textarea_put(ta: &TextAreaElement, spec: &PropertySpec, value: &Value) -> BridgeResult<()> {
    match spec.dispid {
        dispid::TEXTAREA_VALUE => ta.put_value(&value.to_arg_string()?),
        dispid::TEXTAREA_NAME => ta.put_name(&value.to_arg_string()?),
        dispid::TEXTAREA_DISABLED => ta.put_disabled(value.to_arg_bool()?),
        dispid::TEXTAREA_DEFAULT_VALUE => ta.put_default_value(&value.to_arg_string()?),
        dispid::TEXTAREA_READONLY => ta.put_read_only(value.to_arg_bool()?),
        dispid::TEXTAREA_ROWS => ta.put_rows(value.to_arg_long()?),
        dispid::TEXTAREA_COLS => ta.put_cols(value.to_arg_long()?),
        dispid::TEXTAREA_WRAP => ta.put_wrap(&value.to_arg_string()?),
        other => Err(unknown_dispid(other)),
    }
}

fn textarea_call(ta: &TextAreaElement, spec: &PropertySpec) -> BridgeResult<Value> {
    match spec.dispid {
        dispid::TEXTAREA_SELECT => ta.select().map(|()| Value::Null),
        other => Err(unknown_dispid(other)),
    }
}

impl BridgeHandle {
    fn spec_by_name(&self, name: &str) -> BridgeResult<&'static PropertySpec> {
        property::find_by_name(self.properties(), name)
            .ok_or_else(|| BridgeError::NameNotFound(name.to_string()))
    }

    fn spec_by_dispid(&self, id: i32) -> BridgeResult<&'static PropertySpec> {
        property::find_by_dispid(self.properties(), id).ok_or_else(|| unknown_dispid(id))
    }

    fn form_view(&self, form: &Rc<dyn EngineForm>) -> FormElement {
        FormElement::new(self.clone(), Rc::clone(form))
    }

    fn textarea_view(&self, ta: &Rc<dyn EngineTextArea>) -> TextAreaElement {
        TextAreaElement::new(self.clone(), Rc::clone(ta))
    }

    fn get_property(&self, spec: &PropertySpec) -> BridgeResult<Value> {
        if !spec.has_getter() {
            return Err(BridgeError::invalid(format!("{} is a method", spec.name)));
        }
        if !spec.get_wired {
            return Err(BridgeError::not_implemented(spec.name));
        }
        let value = match &self.inner.wrapped {
            Wrapped::Form(form) => form_get(&self.form_view(form), spec)?,
            Wrapped::TextArea(ta) => textarea_get(&self.textarea_view(ta), spec)?,
        };
        Ok(if spec.empty_as_null { value.empty_as_null() } else { value })
    }

    fn set_property(&self, spec: &PropertySpec, value: &Value) -> BridgeResult<()> {
        if !spec.has_setter() {
            return Err(BridgeError::invalid(format!("{} is read-only", spec.name)));
        }
        if !spec.put_wired {
            return Err(BridgeError::not_implemented(spec.name));
        }
        check_type(spec, value)?;
        match &self.inner.wrapped {
            Wrapped::Form(form) => form_put(&self.form_view(form), spec, value),
            Wrapped::TextArea(ta) => textarea_put(&self.textarea_view(ta), spec, value),
        }
    }

    fn call_method(&self, spec: &PropertySpec, args: &[Value]) -> BridgeResult<Value> {
        if !spec.get_wired {
            return Err(BridgeError::not_implemented(spec.name));
        }
        match &self.inner.wrapped {
            Wrapped::Form(form) => form_call(&self.form_view(form), spec, args),
            Wrapped::TextArea(ta) => textarea_call(&self.textarea_view(ta), spec),
        }
    }

    /// Read a property by (case-insensitive) name
    pub fn get(&self, name: &str) -> BridgeResult<Value> {
        tracing::trace!(kind = ?self.kind(), name, "get");
        self.get_property(self.spec_by_name(name)?)
    }

    /// Write a property by (case-insensitive) name
    pub fn set(&self, name: &str, value: &Value) -> BridgeResult<()> {
        tracing::trace!(kind = ?self.kind(), name, ?value, "set");
        self.set_property(self.spec_by_name(name)?, value)
    }

    /// Call a method by (case-insensitive) name
    pub fn call(&self, name: &str, args: &[Value]) -> BridgeResult<Value> {
        tracing::trace!(kind = ?self.kind(), name, ?args, "call");
        let spec = self.spec_by_name(name)?;
        if spec.has_getter() {
            return Err(BridgeError::invalid(format!("{} is not a method", spec.name)));
        }
        self.call_method(spec, args)
    }

    pub fn get_by_dispid(&self, id: i32) -> BridgeResult<Value> {
        self.get_property(self.spec_by_dispid(id)?)
    }

    pub fn set_by_dispid(&self, id: i32, value: &Value) -> BridgeResult<()> {
        self.set_property(self.spec_by_dispid(id)?, value)
    }

    /// Map a member name to its DISPID
    ///
    /// Static members are looked up first; on forms, other names are
    /// resolved against the controls' ids and names.
    pub fn get_ids_of_names(&self, name: &str) -> BridgeResult<i32> {
        tracing::trace!(kind = ?self.kind(), name, "get_ids_of_names");
        if let Some(spec) = property::find_by_name(self.properties(), name) {
            return Ok(spec.dispid);
        }

        let form = self
            .as_form()
            .ok_or_else(|| BridgeError::NameNotFound(name.to_string()))?;
        let ordinal = form.resolve_name(name)?;
        // FIXME: using the ordinal as DISPID; it shifts when the collection changes
        i32::try_from(ordinal)
            .ok()
            .and_then(|o| self.config().custom_dispid_min.checked_add(o))
            .ok_or_else(|| BridgeError::backend(format!("ordinal {ordinal} has no DISPID")))
    }

    /// Invoke a DISPID previously obtained from [`Self::get_ids_of_names`]
    pub fn invoke(&self, id: i32, kind: DispatchKind, args: &[Value]) -> BridgeResult<Value> {
        tracing::trace!(element = ?self.kind(), id, ?kind, "invoke");

        if let Some(spec) = property::find_by_dispid(self.properties(), id) {
            return match (kind, spec.has_getter()) {
                (DispatchKind::PropertyPut, _) => {
                    let value = args
                        .first()
                        .ok_or_else(|| BridgeError::invalid("property put without a value"))?;
                    self.set_property(spec, value).map(|()| Value::Null)
                }
                (_, true) => self.get_property(spec),
                (_, false) => self.call_method(spec, args),
            };
        }

        let min = self.config().custom_dispid_min;
        let form = match self.as_form() {
            Some(form) if id >= min => form,
            _ => return Err(unknown_dispid(id)),
        };
        let ordinal = u32::try_from(i64::from(id) - i64::from(min)).map_err(|_| unknown_dispid(id))?;
        form.invoke_ordinal(ordinal)
    }
}
