//! FAQ accordion: exclusive open. Clicking a question closes every item,
//! then re-opens the clicked one unless it was already the open item.

use crate::ids::ElementId;
use crate::manifest::AccordionItem;
use crate::ops::HostOp;
use crate::outputs::Outputs;

#[derive(Debug, Default)]
pub struct AccordionController {
    items: Vec<AccordionItem>,
    open: Option<usize>,
}

impl AccordionController {
    pub fn new(items: &[AccordionItem]) -> Self {
        Self {
            items: items.to_vec(),
            open: None,
        }
    }

    pub fn on_click(&mut self, element: ElementId, out: &mut Outputs) {
        let clicked = match self.items.iter().position(|i| i.question == element) {
            Some(i) => i,
            None => return,
        };
        let was_open = self.open == Some(clicked);
        for item in &self.items {
            out.push_op(HostOp::RemoveClass {
                element: item.item,
                class: "active".into(),
            });
        }
        if was_open {
            self.open = None;
        } else {
            self.open = Some(clicked);
            out.push_op(HostOp::AddClass {
                element: self.items[clicked].item,
                class: "active".into(),
            });
        }
    }

    pub fn open_index(&self) -> Option<usize> {
        self.open
    }
}
