//! Textarea Element Implementation
//!
//! Multi-line text input. The raw value tracks the default value (the
//! element's text content) until the value setter marks the control dirty.

use std::rc::Rc;

use crate::{ElementRef, EngineError, EngineNode, EngineResult, EngineTextArea};

/// Rows used when the attribute is missing or not a positive integer
pub const DEFAULT_ROWS: u32 = 2;
/// Columns used when the attribute is missing or not a positive integer
pub const DEFAULT_COLS: u32 = 20;

fn parse_positive(raw: Option<&str>, fallback: u32) -> u32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(fallback)
}

impl ElementRef {
    fn set_positive(&self, attr: &str, value: u32) -> EngineResult<()> {
        if value == 0 {
            return Err(EngineError::Failure(format!("{attr} must be greater than zero")));
        }
        self.with_element_mut(|e| e.set_attr(attr, &value.to_string()))
    }
}

impl EngineTextArea for ElementRef {
    fn value(&self) -> EngineResult<String> {
        if let Some(dirty) = self.with_element(|e| e.control.dirty_value.clone())? {
            return Ok(dirty);
        }
        self.default_value()
    }

    fn set_value(&self, value: &str) -> EngineResult<()> {
        let len = value.chars().count();
        self.with_element_mut(|e| {
            e.control.dirty_value = Some(value.to_string());
            e.control.selection_start = len;
            e.control.selection_end = len;
        })
    }

    fn name(&self) -> EngineResult<String> {
        self.attr_or_empty("name")
    }

    fn set_name(&self, name: &str) -> EngineResult<()> {
        self.with_element_mut(|e| e.set_attr("name", name))
    }

    fn read_only(&self) -> EngineResult<bool> {
        self.with_element(|e| e.has_attr("readonly"))
    }

    fn set_read_only(&self, read_only: bool) -> EngineResult<()> {
        self.set_flag("readonly", read_only)
    }

    fn disabled(&self) -> EngineResult<bool> {
        self.with_element(|e| e.has_attr("disabled"))
    }

    fn set_disabled(&self, disabled: bool) -> EngineResult<()> {
        self.set_flag("disabled", disabled)
    }

    fn default_value(&self) -> EngineResult<String> {
        self.local_name()?;
        Ok(self.document().tree().text_content(self.node_id()))
    }

    fn set_default_value(&self, value: &str) -> EngineResult<()> {
        self.local_name()?;
        self.document().tree_mut().set_text_content(self.node_id(), value);
        Ok(())
    }

    fn rows(&self) -> EngineResult<u32> {
        self.with_element(|e| parse_positive(e.get_attr("rows"), DEFAULT_ROWS))
    }

    fn set_rows(&self, rows: u32) -> EngineResult<()> {
        self.set_positive("rows", rows)
    }

    fn cols(&self) -> EngineResult<u32> {
        self.with_element(|e| parse_positive(e.get_attr("cols"), DEFAULT_COLS))
    }

    fn set_cols(&self, cols: u32) -> EngineResult<()> {
        self.set_positive("cols", cols)
    }

    fn wrap(&self) -> EngineResult<String> {
        self.attr_or_empty("wrap")
    }

    fn set_wrap(&self, wrap: &str) -> EngineResult<()> {
        self.with_element_mut(|e| e.set_attr("wrap", wrap))
    }

    fn select(&self) -> EngineResult<()> {
        let len = self.value()?.chars().count();
        self.with_element_mut(|e| {
            e.control.selection_start = 0;
            e.control.selection_end = len;
        })
    }

    fn form(&self) -> EngineResult<Option<Rc<dyn EngineNode>>> {
        self.local_name()?;
        let doc = self.document();
        let owner = {
            let tree = doc.tree();
            tree.ancestors(self.node_id()).find(|&id| {
                tree.get(id)
                    .and_then(|n| n.as_element())
                    .is_some_and(|e| e.local_name == "form")
            })
        };
        owner.map(|id| doc.node(id)).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Document;

    fn textarea(doc: &Document) -> ElementRef {
        let id = doc.append_element(doc.body(), "textarea");
        doc.element(id).unwrap()
    }

    #[test]
    fn test_value_follows_default_until_dirty() {
        let doc = Document::new("about:blank").unwrap();
        let ta = textarea(&doc);
        ta.set_default_value("initial").unwrap();
        assert_eq!(ta.value().unwrap(), "initial");

        ta.set_value("typed").unwrap();
        ta.set_default_value("changed").unwrap();
        assert_eq!(ta.value().unwrap(), "typed");
        assert_eq!(ta.default_value().unwrap(), "changed");
    }

    #[test]
    fn test_rows_cols_defaults() {
        let doc = Document::new("about:blank").unwrap();
        let ta = textarea(&doc);
        assert_eq!(ta.rows().unwrap(), DEFAULT_ROWS);
        assert_eq!(ta.cols().unwrap(), DEFAULT_COLS);

        ta.set_rows(5).unwrap();
        assert_eq!(ta.rows().unwrap(), 5);
        assert!(ta.set_cols(0).is_err());
        assert_eq!(ta.cols().unwrap(), DEFAULT_COLS);
    }

    #[test]
    fn test_boolean_flags() {
        let doc = Document::new("about:blank").unwrap();
        let ta = textarea(&doc);
        assert!(!ta.read_only().unwrap());
        ta.set_read_only(true).unwrap();
        assert!(ta.read_only().unwrap());
        ta.set_read_only(false).unwrap();
        assert!(!ta.read_only().unwrap());
    }

    #[test]
    fn test_select_covers_value() {
        let doc = Document::new("about:blank").unwrap();
        let ta = textarea(&doc);
        ta.set_value("héllo").unwrap();
        ta.select().unwrap();
        let (start, end) = ta
            .with_element(|e| (e.control.selection_start, e.control.selection_end))
            .unwrap();
        assert_eq!((start, end), (0, 5));
    }

    #[test]
    fn test_form_owner() {
        let doc = Document::new("about:blank").unwrap();
        let form = doc.append_element(doc.body(), "form");
        let div = doc.append_element(form, "div");
        let inside = doc.append_element(div, "textarea");

        let owner = doc.element(inside).unwrap().form().unwrap().unwrap();
        assert_eq!(owner.key().node, form.index());
        assert!(textarea(&doc).form().unwrap().is_none());
    }
}
