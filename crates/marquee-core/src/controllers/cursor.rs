//! Cursor follower: a dot and an outline chasing the live pointer position
//! with two different damping rates. Hover/click visual states ride on the
//! same proxy element but are driven by discrete events, independent of the
//! position loop.

use hashbrown::HashSet;

use crate::config::Config;
use crate::ids::ElementId;
use crate::manifest::CursorTargets;
use crate::ops::HostOp;
use crate::outputs::Outputs;
use crate::schedule::FrameLoop;
use crate::DampedPoint;

#[derive(Debug)]
pub struct CursorFollower {
    dot_el: ElementId,
    outline_el: ElementId,
    root: ElementId,
    hover_targets: HashSet<ElementId>,
    mouse: (f32, f32),
    dot: DampedPoint,
    outline: DampedPoint,
    frame: FrameLoop,
}

impl CursorFollower {
    /// Returns None without a fine pointer: no hidden always-on cursor
    /// element is ever created on touch devices.
    pub fn new(
        cfg: &Config,
        targets: Option<&CursorTargets>,
        fine_pointer: bool,
        frame_scheduler: bool,
    ) -> Option<Self> {
        let targets = match targets {
            Some(t) => t,
            None => {
                log::debug!("cursor: no targets, skipping");
                return None;
            }
        };
        if !fine_pointer {
            log::debug!("cursor: coarse pointer, skipping");
            return None;
        }
        let mut frame = FrameLoop::new();
        if frame_scheduler {
            frame.start();
        }
        Some(Self {
            dot_el: targets.dot,
            outline_el: targets.outline,
            root: targets.root,
            hover_targets: targets.hover_targets.iter().copied().collect(),
            mouse: (0.0, 0.0),
            dot: DampedPoint::new(cfg.cursor_dot_factor),
            outline: DampedPoint::new(cfg.cursor_outline_factor),
            frame,
        })
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.mouse = (x, y);
    }

    pub fn on_pointer_enter(&mut self, element: ElementId, out: &mut Outputs) {
        if self.hover_targets.contains(&element) {
            out.push_op(HostOp::AddClass {
                element: self.root,
                class: "hover".into(),
            });
        }
    }

    pub fn on_pointer_leave(&mut self, element: ElementId, out: &mut Outputs) {
        if self.hover_targets.contains(&element) {
            out.push_op(HostOp::RemoveClass {
                element: self.root,
                class: "hover".into(),
            });
        }
    }

    pub fn on_pointer_down(&mut self, out: &mut Outputs) {
        out.push_op(HostOp::AddClass {
            element: self.root,
            class: "click".into(),
        });
    }

    pub fn on_pointer_up(&mut self, out: &mut Outputs) {
        out.push_op(HostOp::RemoveClass {
            element: self.root,
            class: "click".into(),
        });
    }

    /// One frame: position update, then render (transform writes).
    pub fn tick(&mut self, dt: f32, out: &mut Outputs) {
        if self.frame.tick(dt).is_none() {
            return;
        }
        self.dot.step_toward(self.mouse.0, self.mouse.1);
        self.outline.step_toward(self.mouse.0, self.mouse.1);
        out.push_op(HostOp::SetTransform {
            element: self.dot_el,
            x: self.dot.x,
            y: self.dot.y,
        });
        out.push_op(HostOp::SetTransform {
            element: self.outline_el,
            x: self.outline.x,
            y: self.outline.y,
        });
    }

    #[cfg(test)]
    pub fn positions(&self) -> ((f32, f32), (f32, f32)) {
        ((self.dot.x, self.dot.y), (self.outline.x, self.outline.y))
    }
}
