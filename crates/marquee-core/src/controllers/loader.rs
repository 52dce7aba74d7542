//! Loading overlay gate: the window-load signal arms a fixed delay; firing
//! hides the overlay, releases the initial scroll lock and hands control to
//! the reveal sweep.

use crate::config::Config;
use crate::ids::ElementId;
use crate::ops::HostOp;
use crate::outputs::{Outputs, StageEvent};
use crate::schedule::Countdown;

#[derive(Debug)]
pub struct LoaderGate {
    overlay: ElementId,
    delay: Countdown,
    dismissed: bool,
}

impl LoaderGate {
    pub fn new(overlay: Option<ElementId>) -> Option<Self> {
        Some(Self {
            overlay: overlay?,
            delay: Countdown::new(),
            dismissed: false,
        })
    }

    pub fn on_window_loaded(&mut self, cfg: &Config) {
        if !self.dismissed && !self.delay.is_armed() {
            self.delay.arm(cfg.loader_delay);
        }
    }

    /// Returns true on the step the overlay is dismissed, so the caller can
    /// run the initial reveal pass.
    pub fn tick(&mut self, dt: f32, out: &mut Outputs) -> bool {
        if !self.delay.tick(dt) {
            return false;
        }
        self.dismissed = true;
        out.push_op(HostOp::AddClass {
            element: self.overlay,
            class: "hidden".into(),
        });
        out.push_op(HostOp::ScrollLock(false));
        out.push_event(StageEvent::LoaderDismissed);
        true
    }

    pub fn dismissed(&self) -> bool {
        self.dismissed
    }
}
