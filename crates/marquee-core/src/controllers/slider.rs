//! Testimonial slider: index arithmetic modulo N with wrap in both
//! directions, dot jumps, and a recurring auto-advance.
//!
//! Every path (prev/next/dot/auto) funnels through one `set_index`, which
//! keeps exactly one testimonial and one dot active and makes transitions
//! idempotent and order-independent given the final index.

use crate::config::Config;
use crate::ids::ElementId;
use crate::manifest::SliderTargets;
use crate::ops::HostOp;
use crate::outputs::{Outputs, StageEvent};
use crate::schedule::Metronome;

#[derive(Debug)]
pub struct SliderController {
    testimonials: Vec<ElementId>,
    dots: Vec<ElementId>,
    prev: Option<ElementId>,
    next: Option<ElementId>,
    index: usize,
    auto: Metronome,
}

impl SliderController {
    pub fn new(cfg: &Config, targets: Option<&SliderTargets>) -> Option<Self> {
        let targets = targets?;
        if targets.testimonials.is_empty() {
            log::debug!("slider: no testimonials, skipping");
            return None;
        }
        Some(Self {
            testimonials: targets.testimonials.clone(),
            dots: targets.dots.clone(),
            prev: targets.prev,
            next: targets.next,
            index: 0,
            auto: Metronome::new(cfg.slider_interval),
        })
    }

    pub fn active_index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.testimonials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.testimonials.is_empty()
    }

    pub fn on_click(&mut self, element: ElementId, out: &mut Outputs) {
        if Some(element) == self.next {
            self.advance(1, out);
            self.auto.rewind();
        } else if Some(element) == self.prev {
            self.advance(-1, out);
            self.auto.rewind();
        } else if let Some(i) = self.dots.iter().position(|&d| d == element) {
            self.set_index(i, out);
            self.auto.rewind();
        }
    }

    pub fn tick(&mut self, dt: f32, out: &mut Outputs) {
        for _ in 0..self.auto.tick(dt) {
            self.advance(1, out);
        }
    }

    fn advance(&mut self, delta: isize, out: &mut Outputs) {
        let n = self.testimonials.len() as isize;
        let next = (self.index as isize + delta).rem_euclid(n) as usize;
        self.set_index(next, out);
    }

    fn set_index(&mut self, index: usize, out: &mut Outputs) {
        self.index = index.min(self.testimonials.len() - 1);
        for (i, &t) in self.testimonials.iter().enumerate() {
            out.push_op(active_class(t, i == self.index));
        }
        for (i, &d) in self.dots.iter().enumerate() {
            out.push_op(active_class(d, i == self.index));
        }
        out.push_event(StageEvent::SlideChanged { index: self.index });
    }
}

fn active_class(element: ElementId, active: bool) -> HostOp {
    if active {
        HostOp::AddClass {
            element,
            class: "active".into(),
        }
    } else {
        HostOp::RemoveClass {
            element,
            class: "active".into(),
        }
    }
}
