//! Static interface tables
//!
//! One immutable table per element kind. Each entry names a member of the
//! external interface, its DISPID, type, access, optional input validation
//! and whether the bridge actually wires it to the engine.

use serde::Serialize;

use crate::{eq_ignore_case, BridgeError, BridgeResult};

/// DISPIDs of the published interfaces
pub mod dispid {
    pub const VALUE: i32 = 0;
    pub const NEWENUM: i32 = -4;
    /// First DISPID used for dynamically resolved members
    pub const CUSTOM_MIN: i32 = 0x6000_0000;

    pub const FORM_ACTION: i32 = 1001;
    pub const FORM_DIR: i32 = -2_147_412_995;
    pub const FORM_ENCODING: i32 = 1003;
    pub const FORM_METHOD: i32 = 1004;
    pub const FORM_ELEMENTS: i32 = 1005;
    pub const FORM_TARGET: i32 = 1006;
    pub const FORM_NAME: i32 = -2_147_418_112;
    pub const FORM_ONSUBMIT: i32 = -2_147_412_101;
    pub const FORM_ONRESET: i32 = -2_147_412_100;
    pub const FORM_SUBMIT: i32 = 1009;
    pub const FORM_RESET: i32 = 1010;
    pub const FORM_LENGTH: i32 = 1501;
    pub const FORM_NEWENUM: i32 = NEWENUM;
    pub const FORM_ITEM: i32 = VALUE;
    pub const FORM_TAGS: i32 = 1502;

    pub const TEXTAREA_TYPE: i32 = 2001;
    pub const TEXTAREA_VALUE: i32 = -2_147_413_011;
    pub const TEXTAREA_NAME: i32 = -2_147_418_112;
    pub const TEXTAREA_STATUS: i32 = 2003;
    pub const TEXTAREA_DISABLED: i32 = -2_147_418_036;
    pub const TEXTAREA_FORM: i32 = -2_147_416_108;
    pub const TEXTAREA_DEFAULT_VALUE: i32 = -2_147_413_029;
    pub const TEXTAREA_SELECT: i32 = 2005;
    pub const TEXTAREA_ONCHANGE: i32 = -2_147_412_082;
    pub const TEXTAREA_ONSELECT: i32 = -2_147_412_102;
    pub const TEXTAREA_READONLY: i32 = 2004;
    pub const TEXTAREA_ROWS: i32 = 2006;
    pub const TEXTAREA_COLS: i32 = 2007;
    pub const TEXTAREA_WRAP: i32 = 2008;
    pub const TEXTAREA_CREATE_TEXT_RANGE: i32 = 2009;
}

/// Tokens accepted by the form `method` setter
pub const METHOD_TOKENS: &[&str] = &["POST", "GET"];

/// Tokens accepted by the form `encoding` setter
pub const ENCODING_TOKENS: &[&str] = &[
    "application/x-www-form-urlencoded",
    "multipart/form-data",
    "text/plain",
];

/// External value type of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    String,
    Bool,
    Long,
    Dispatch,
    /// Event handler slot
    Variant,
    /// Enumerator object
    Unknown,
    /// No value (methods)
    Void,
}

/// Which accessors a member exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    ReadOnly,
    ReadWrite,
    Method,
}

/// Input rule checked before a setter reaches the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Validation {
    OneOfIgnoreCase(&'static [&'static str]),
}

impl Validation {
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Self::OneOfIgnoreCase(tokens) => tokens.iter().any(|t| eq_ignore_case(t, value)),
        }
    }
}

/// Static descriptor of one interface member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PropertySpec {
    pub name: &'static str,
    pub dispid: i32,
    #[serde(rename = "type")]
    pub ty: ValueType,
    pub access: Access,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<Validation>,
    /// Getter (or method body) is wired to the engine
    pub get_wired: bool,
    /// Setter is wired to the engine
    pub put_wired: bool,
    /// An empty engine string surfaces as null
    pub empty_as_null: bool,
}

impl PropertySpec {
    const fn new(name: &'static str, dispid: i32, ty: ValueType, access: Access) -> Self {
        let put_wired = matches!(access, Access::ReadWrite);
        Self {
            name,
            dispid,
            ty,
            access,
            validation: None,
            get_wired: true,
            put_wired,
            empty_as_null: false,
        }
    }

    pub const fn read_write(name: &'static str, dispid: i32, ty: ValueType) -> Self {
        Self::new(name, dispid, ty, Access::ReadWrite)
    }

    pub const fn read_only(name: &'static str, dispid: i32, ty: ValueType) -> Self {
        Self::new(name, dispid, ty, Access::ReadOnly)
    }

    pub const fn method(name: &'static str, dispid: i32, ty: ValueType) -> Self {
        Self::new(name, dispid, ty, Access::Method)
    }

    pub const fn validated(self, rule: Validation) -> Self {
        Self { validation: Some(rule), ..self }
    }

    pub const fn empty_as_null(self) -> Self {
        Self { empty_as_null: true, ..self }
    }

    /// Present on the contract, not wired at all
    pub const fn unwired(self) -> Self {
        Self { get_wired: false, put_wired: false, ..self }
    }

    /// Readable, but the setter reports `NotImplemented`
    pub const fn put_unwired(self) -> Self {
        Self { put_wired: false, ..self }
    }

    pub fn has_getter(&self) -> bool {
        !matches!(self.access, Access::Method)
    }

    pub fn has_setter(&self) -> bool {
        matches!(self.access, Access::ReadWrite)
    }

    /// Run the validation rule, if any
    pub fn validate(&self, value: &str) -> BridgeResult<()> {
        match self.validation {
            Some(rule) if !rule.accepts(value) => Err(BridgeError::invalid(format!(
                "{value:?} is not a valid {}",
                self.name
            ))),
            _ => Ok(()),
        }
    }
}

/// `IHTMLFormElement`, in interface order
pub static FORM_PROPERTIES: &[PropertySpec] = &[
    PropertySpec::read_write("action", dispid::FORM_ACTION, ValueType::String),
    PropertySpec::read_write("dir", dispid::FORM_DIR, ValueType::String).unwired(),
    PropertySpec::read_write("encoding", dispid::FORM_ENCODING, ValueType::String)
        .validated(Validation::OneOfIgnoreCase(ENCODING_TOKENS)),
    PropertySpec::read_write("method", dispid::FORM_METHOD, ValueType::String)
        .validated(Validation::OneOfIgnoreCase(METHOD_TOKENS)),
    PropertySpec::read_only("elements", dispid::FORM_ELEMENTS, ValueType::Dispatch),
    PropertySpec::read_write("target", dispid::FORM_TARGET, ValueType::String),
    PropertySpec::read_write("name", dispid::FORM_NAME, ValueType::String).empty_as_null(),
    PropertySpec::read_write("onsubmit", dispid::FORM_ONSUBMIT, ValueType::Variant).unwired(),
    PropertySpec::read_write("onreset", dispid::FORM_ONRESET, ValueType::Variant).unwired(),
    PropertySpec::method("submit", dispid::FORM_SUBMIT, ValueType::Void).unwired(),
    PropertySpec::method("reset", dispid::FORM_RESET, ValueType::Void).unwired(),
    PropertySpec::read_write("length", dispid::FORM_LENGTH, ValueType::Long).put_unwired(),
    PropertySpec::read_only("_newEnum", dispid::FORM_NEWENUM, ValueType::Unknown).unwired(),
    PropertySpec::method("item", dispid::FORM_ITEM, ValueType::Dispatch),
    PropertySpec::method("tags", dispid::FORM_TAGS, ValueType::Dispatch).unwired(),
];

/// `IHTMLTextAreaElement`, in interface order
pub static TEXTAREA_PROPERTIES: &[PropertySpec] = &[
    PropertySpec::read_only("type", dispid::TEXTAREA_TYPE, ValueType::String),
    PropertySpec::read_write("value", dispid::TEXTAREA_VALUE, ValueType::String).empty_as_null(),
    PropertySpec::read_write("name", dispid::TEXTAREA_NAME, ValueType::String),
    PropertySpec::read_write("status", dispid::TEXTAREA_STATUS, ValueType::Variant).unwired(),
    PropertySpec::read_write("disabled", dispid::TEXTAREA_DISABLED, ValueType::Bool),
    PropertySpec::read_only("form", dispid::TEXTAREA_FORM, ValueType::Dispatch),
    PropertySpec::read_write("defaultValue", dispid::TEXTAREA_DEFAULT_VALUE, ValueType::String),
    PropertySpec::method("select", dispid::TEXTAREA_SELECT, ValueType::Void),
    PropertySpec::read_write("onchange", dispid::TEXTAREA_ONCHANGE, ValueType::Variant).unwired(),
    PropertySpec::read_write("onselect", dispid::TEXTAREA_ONSELECT, ValueType::Variant).unwired(),
    PropertySpec::read_write("readOnly", dispid::TEXTAREA_READONLY, ValueType::Bool),
    PropertySpec::read_write("rows", dispid::TEXTAREA_ROWS, ValueType::Long),
    PropertySpec::read_write("cols", dispid::TEXTAREA_COLS, ValueType::Long),
    PropertySpec::read_write("wrap", dispid::TEXTAREA_WRAP, ValueType::String),
    PropertySpec::method("createTextRange", dispid::TEXTAREA_CREATE_TEXT_RANGE, ValueType::Dispatch)
        .unwired(),
];

/// Case-insensitive lookup by member name
pub fn find_by_name(table: &'static [PropertySpec], name: &str) -> Option<&'static PropertySpec> {
    table.iter().find(|p| eq_ignore_case(p.name, name))
}

/// Lookup by DISPID
pub fn find_by_dispid(table: &'static [PropertySpec], dispid: i32) -> Option<&'static PropertySpec> {
    table.iter().find(|p| p.dispid == dispid)
}

/// Highest DISPID published by either built-in table
pub fn max_static_dispid() -> i32 {
    FORM_PROPERTIES
        .iter()
        .chain(TEXTAREA_PROPERTIES)
        .map(|p| p.dispid)
        .max()
        .unwrap_or(i32::MIN)
}

/// Entry that must exist in a built-in table
pub(crate) fn member(table: &'static [PropertySpec], name: &str) -> BridgeResult<&'static PropertySpec> {
    find_by_name(table, name).ok_or_else(|| BridgeError::NameNotFound(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_dispids_unique_per_table() {
        for table in [FORM_PROPERTIES, TEXTAREA_PROPERTIES] {
            let ids: HashSet<i32> = table.iter().map(|p| p.dispid).collect();
            assert_eq!(ids.len(), table.len());
            assert!(table.iter().all(|p| p.dispid < dispid::CUSTOM_MIN));
        }
        assert_eq!(max_static_dispid(), dispid::TEXTAREA_CREATE_TEXT_RANGE);
    }

    #[test]
    fn test_method_validation() {
        let method = find_by_name(FORM_PROPERTIES, "METHOD").unwrap();
        for ok in ["get", "GET", "Get", "post", "pOsT"] {
            assert!(method.validate(ok).is_ok(), "{ok}");
        }
        for bad in ["put", "", "gett", " get"] {
            assert!(matches!(method.validate(bad), Err(BridgeError::InvalidArgument(_))), "{bad}");
        }
    }

    #[test]
    fn test_encoding_validation() {
        let encoding = find_by_name(FORM_PROPERTIES, "encoding").unwrap();
        assert!(encoding.validate("TEXT/PLAIN").is_ok());
        assert!(encoding.validate("Multipart/Form-Data").is_ok());
        assert!(encoding.validate("application/json").is_err());
    }

    #[test]
    fn test_flags() {
        let length = find_by_name(FORM_PROPERTIES, "length").unwrap();
        assert!(length.get_wired && !length.put_wired);

        let dir = find_by_dispid(FORM_PROPERTIES, dispid::FORM_DIR).unwrap();
        assert_eq!(dir.name, "dir");
        assert!(!dir.get_wired && !dir.put_wired);

        let ty = find_by_name(TEXTAREA_PROPERTIES, "type").unwrap();
        assert!(ty.has_getter() && !ty.has_setter());
        assert!(find_by_name(TEXTAREA_PROPERTIES, "value").unwrap().empty_as_null);
        assert!(!find_by_name(TEXTAREA_PROPERTIES, "name").unwrap().empty_as_null);
    }

    #[test]
    fn test_table_serializes() {
        let json = serde_json::to_value(find_by_name(FORM_PROPERTIES, "method").unwrap()).unwrap();
        assert_eq!(json["type"], "string");
        assert_eq!(json["access"], "read_write");
        assert_eq!(json["validation"]["one_of_ignore_case"][0], "POST");
    }
}
