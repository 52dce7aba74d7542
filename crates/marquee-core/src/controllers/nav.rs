//! Header/menu state: scrolled style past a fixed offset, mobile menu
//! open/close mirrored on the toggle, the panel and the page scroll lock,
//! plus smooth-scroll anchors.

use hashbrown::HashMap;

use crate::config::Config;
use crate::ids::ElementId;
use crate::manifest::{AnchorLink, NavTargets};
use crate::ops::HostOp;
use crate::outputs::{Outputs, StageEvent};

#[derive(Debug)]
pub struct NavigationController {
    bar: ElementId,
    toggle: Option<ElementId>,
    menu: Option<ElementId>,
    menu_links: Vec<ElementId>,
    anchors: HashMap<ElementId, ElementId>,
    scrolled: bool,
    open: bool,
}

impl NavigationController {
    pub fn new(targets: Option<&NavTargets>, anchors: &[AnchorLink]) -> Option<Self> {
        let targets = targets?;
        Some(Self {
            bar: targets.bar,
            toggle: targets.toggle,
            menu: targets.menu,
            menu_links: targets.menu_links.clone(),
            anchors: anchors.iter().map(|a| (a.link, a.target)).collect(),
            scrolled: false,
            open: false,
        })
    }

    /// Re-evaluated on every scroll event; the class write is emitted only
    /// when the boolean actually flips.
    pub fn on_scroll(&mut self, y: f32, cfg: &Config, out: &mut Outputs) {
        let scrolled = y > cfg.nav_scroll_threshold;
        if scrolled != self.scrolled {
            self.scrolled = scrolled;
            let op = if scrolled {
                HostOp::AddClass {
                    element: self.bar,
                    class: "scrolled".into(),
                }
            } else {
                HostOp::RemoveClass {
                    element: self.bar,
                    class: "scrolled".into(),
                }
            };
            out.push_op(op);
        }
    }

    pub fn on_click(&mut self, element: ElementId, out: &mut Outputs) {
        if Some(element) == self.toggle {
            if self.open {
                self.close_menu(out);
            } else {
                self.open_menu(out);
            }
            return;
        }
        if let Some(&target) = self.anchors.get(&element) {
            out.push_op(HostOp::ScrollIntoView { element: target });
        }
    }

    /// Menu links close the menu on the way out, whether or not a page
    /// transition also arms for the same click.
    pub fn on_link_click(&mut self, element: ElementId, out: &mut Outputs) {
        if self.open && self.menu_links.contains(&element) {
            self.close_menu(out);
        }
    }

    pub fn is_menu_open(&self) -> bool {
        self.open
    }

    fn open_menu(&mut self, out: &mut Outputs) {
        self.open = true;
        self.set_menu_classes(true, out);
        out.push_op(HostOp::ScrollLock(true));
        out.push_event(StageEvent::MenuToggled { open: true });
    }

    fn close_menu(&mut self, out: &mut Outputs) {
        self.open = false;
        self.set_menu_classes(false, out);
        out.push_op(HostOp::ScrollLock(false));
        out.push_event(StageEvent::MenuToggled { open: false });
    }

    fn set_menu_classes(&self, active: bool, out: &mut Outputs) {
        for element in [self.toggle, self.menu].into_iter().flatten() {
            let op = if active {
                HostOp::AddClass {
                    element,
                    class: "active".into(),
                }
            } else {
                HostOp::RemoveClass {
                    element,
                    class: "active".into(),
                }
            };
            out.push_op(op);
        }
    }
}
