//! MSHTML Bridge - reflective property bridge
//!
//! Republishes engine `<form>` and `<textarea>` elements through the fixed
//! MSHTML interface tables (`IHTMLFormElement`, `IHTMLTextAreaElement`):
//!
//! - typed get/put pairs per interface entry ([`FormElement`], [`TextAreaElement`])
//! - table-driven access by name or DISPID ([`PropertySpec`])
//! - dynamic members: form controls reachable by id/name, identified by
//!   their ordinal in the live `elements` collection
//!
//! Handles are reference counted with `Rc` and must stay on the thread that
//! created them.

mod bstr;
mod config;
mod dispatch;
mod dynamic;
mod error;
mod form;
mod handle;
mod textarea;
mod value;
pub mod property;

pub use bstr::{eq_ignore_case, Bstr};
pub use config::Config;
pub use dispatch::DispatchKind;
pub use dynamic::DynamicMember;
pub use error::{hresult, status, BridgeError, BridgeResult};
pub use form::{FormElement, ItemArg};
pub use handle::{BridgeHandle, ElementKind, ExternalCapability, ExternalInterface};
pub use property::{Access, PropertySpec, Validation, ValueType};
pub use textarea::TextAreaElement;
pub use value::{NodeRef, Value};

/// Version of the published interface tables
pub const INTERFACE_VERSION: u32 = 1;
