//! Live `elements` collection of a form

use std::rc::Rc;

use super::is_listed;
use crate::{ElementRef, EngineCollection, EngineNode, EngineResult, NodeId};

/// Listed controls under a form, in tree order
///
/// Nothing is cached: every call walks the current tree, so indices shift
/// as controls are added or removed.
#[derive(Debug, Clone)]
pub struct FormControls {
    form: ElementRef,
}

impl FormControls {
    pub fn new(form: ElementRef) -> Self {
        Self { form }
    }

    fn snapshot(&self) -> EngineResult<Vec<NodeId>> {
        self.form.local_name()?;
        let tree = self.form.document().tree();
        let controls = tree
            .descendants(self.form.node_id())
            .into_iter()
            .filter(|&id| {
                tree.get(id)
                    .and_then(|n| n.as_element())
                    .is_some_and(|e| is_listed(&e.local_name))
            })
            .collect();
        Ok(controls)
    }
}

impl EngineCollection for FormControls {
    fn length(&self) -> EngineResult<u32> {
        Ok(self.snapshot()?.len() as u32)
    }

    fn item(&self, index: u32) -> EngineResult<Option<Rc<dyn EngineNode>>> {
        let controls = self.snapshot()?;
        let Some(&id) = controls.get(index as usize) else {
            return Ok(None);
        };
        Ok(Some(self.form.document().node(id)?))
    }
}
