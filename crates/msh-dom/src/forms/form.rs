//! `<form>` attribute reflection
//!
//! action is resolved against the document URL; method and enctype are
//! reflected as their canonical keyword, falling back to the default state.

use std::rc::Rc;

use super::FormControls;
use crate::{ElementRef, EngineCollection, EngineForm, EngineResult};

/// Submission method keyword
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMethod {
    #[default]
    Get,
    Post,
    Dialog,
}

const METHODS: [(FormMethod, &str); 3] = [
    (FormMethod::Get, "get"),
    (FormMethod::Post, "post"),
    (FormMethod::Dialog, "dialog"),
];

impl FormMethod {
    /// Unknown or missing keywords are the `Get` state
    pub fn parse(s: &str) -> Self {
        METHODS
            .iter()
            .find(|(_, kw)| kw.eq_ignore_ascii_case(s))
            .map_or(Self::Get, |&(m, _)| m)
    }

    pub fn as_str(self) -> &'static str {
        METHODS.iter().find(|(m, _)| *m == self).map_or("get", |&(_, kw)| kw)
    }
}

/// Submission body encoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormEnctype {
    #[default]
    UrlEncoded,
    Multipart,
    TextPlain,
}

const ENCTYPES: [(FormEnctype, &str); 3] = [
    (FormEnctype::UrlEncoded, "application/x-www-form-urlencoded"),
    (FormEnctype::Multipart, "multipart/form-data"),
    (FormEnctype::TextPlain, "text/plain"),
];

impl FormEnctype {
    /// Unknown or missing MIME types are the `UrlEncoded` state
    pub fn parse(s: &str) -> Self {
        ENCTYPES
            .iter()
            .find(|(_, mime)| mime.eq_ignore_ascii_case(s))
            .map_or(Self::UrlEncoded, |&(e, _)| e)
    }

    pub fn content_type(self) -> &'static str {
        ENCTYPES
            .iter()
            .find(|(e, _)| *e == self)
            .map_or("application/x-www-form-urlencoded", |&(_, mime)| mime)
    }
}

impl EngineForm for ElementRef {
    fn action(&self) -> EngineResult<String> {
        let raw = self.attr_or_empty("action")?;
        let doc = self.document();
        if raw.trim().is_empty() {
            return Ok(doc.url().to_string());
        }
        // Unresolvable values are reflected verbatim
        Ok(doc.resolve_url(raw.trim()).map_or(raw, |url| url.to_string()))
    }

    fn set_action(&self, action: &str) -> EngineResult<()> {
        self.with_element_mut(|e| e.set_attr("action", action))
    }

    fn method(&self) -> EngineResult<String> {
        let raw = self.attr_or_empty("method")?;
        Ok(FormMethod::parse(&raw).as_str().to_string())
    }

    fn set_method(&self, method: &str) -> EngineResult<()> {
        self.with_element_mut(|e| e.set_attr("method", method))
    }

    fn enctype(&self) -> EngineResult<String> {
        let raw = self.attr_or_empty("enctype")?;
        Ok(FormEnctype::parse(&raw).content_type().to_string())
    }

    fn set_enctype(&self, enctype: &str) -> EngineResult<()> {
        self.with_element_mut(|e| e.set_attr("enctype", enctype))
    }

    fn name(&self) -> EngineResult<String> {
        self.attr_or_empty("name")
    }

    fn set_name(&self, name: &str) -> EngineResult<()> {
        self.with_element_mut(|e| e.set_attr("name", name))
    }

    fn target(&self) -> EngineResult<String> {
        self.attr_or_empty("target")
    }

    fn set_target(&self, target: &str) -> EngineResult<()> {
        self.with_element_mut(|e| e.set_attr("target", target))
    }

    fn length(&self) -> EngineResult<u32> {
        self.elements()?.length()
    }

    fn elements(&self) -> EngineResult<Rc<dyn EngineCollection>> {
        // Fail early on a dangling form
        self.local_name()?;
        Ok(Rc::new(FormControls::new(self.clone())))
    }
}
