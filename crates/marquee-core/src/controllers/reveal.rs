//! Scroll-triggered reveals and count-up counters.
//!
//! Reveals are one-shot: the Pending -> Revealed transition is monotonic for
//! the life of the page, so an element observed visible twice applies its
//! effect exactly once. The effect itself depends on which strategy was
//! selected at startup: a tween handed to the external provider, or a plain
//! class toggle when the provider is absent. Both end in the same terminal
//! state (visible class present, element stable).
//!
//! Counters are the third trigger pattern: once visible, a continuous 0 ->
//! target interpolation over a fixed duration, snapped to whole numbers
//! every frame.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::ids::ElementId;
use crate::manifest::{CounterTarget, RevealTarget};
use crate::ops::{HostOp, TweenProp};
use crate::outputs::{Outputs, StageEvent};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealState {
    Pending,
    Revealed,
}

/// Selected once at startup, never re-probed per element.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealStrategy {
    /// Hand each reveal to the tween provider as an opacity/translate
    /// timeline, then mark the terminal class.
    Tween,
    /// Class toggle only; the stylesheet transition does the rest.
    Classes,
}

#[derive(Debug)]
struct Candidate {
    stagger: u32,
    state: RevealState,
    last_fraction: f32,
}

#[derive(Debug)]
enum CounterPhase {
    Pending,
    Running { elapsed: f32, last_shown: u32 },
    Done,
}

#[derive(Debug)]
struct CounterRun {
    element: ElementId,
    target: u32,
    phase: CounterPhase,
}

#[derive(Debug)]
pub struct RevealController {
    strategy: RevealStrategy,
    // Registration order is observable through the initial sweep.
    candidates: IndexMap<ElementId, Candidate>,
    counters: Vec<CounterRun>,
}

impl RevealController {
    pub fn new(
        reveals: &[RevealTarget],
        counters: &[CounterTarget],
        tween_provider: bool,
    ) -> Self {
        let strategy = if tween_provider {
            RevealStrategy::Tween
        } else {
            log::debug!("reveal: tween provider absent, class-toggle fallback");
            RevealStrategy::Classes
        };
        let candidates = reveals
            .iter()
            .map(|r| {
                (
                    r.element,
                    Candidate {
                        stagger: r.stagger,
                        state: RevealState::Pending,
                        last_fraction: 0.0,
                    },
                )
            })
            .collect();
        let counters = counters
            .iter()
            .map(|c| CounterRun {
                element: c.element,
                target: c.target,
                phase: CounterPhase::Pending,
            })
            .collect();
        Self {
            strategy,
            candidates,
            counters,
        }
    }

    pub fn strategy(&self) -> RevealStrategy {
        self.strategy
    }

    pub fn state_of(&self, element: ElementId) -> Option<RevealState> {
        self.candidates.get(&element).map(|c| c.state)
    }

    /// Visibility report from the host. Crossing the threshold fires the
    /// reveal exactly once; later reports only refresh the stored fraction.
    pub fn observe(&mut self, element: ElementId, fraction: f32, cfg: &Config, out: &mut Outputs) {
        if let Some(c) = self.candidates.get_mut(&element) {
            c.last_fraction = fraction;
            if c.state == RevealState::Pending && fraction >= cfg.reveal_threshold {
                let stagger = c.stagger;
                c.state = RevealState::Revealed;
                Self::emit_reveal(self.strategy, element, stagger, cfg, out);
            }
        }
        for counter in &mut self.counters {
            if counter.element == element
                && matches!(counter.phase, CounterPhase::Pending)
                && fraction >= cfg.reveal_threshold
            {
                counter.phase = CounterPhase::Running {
                    elapsed: 0.0,
                    last_shown: u32::MAX,
                };
            }
        }
    }

    /// Sweep run when the loading overlay is dismissed: elements already in
    /// the viewport reveal immediately, in registration order.
    pub fn initial_sweep(&mut self, cfg: &Config, out: &mut Outputs) {
        let strategy = self.strategy;
        for (&element, c) in self.candidates.iter_mut() {
            if c.state == RevealState::Pending && c.last_fraction >= cfg.reveal_threshold {
                c.state = RevealState::Revealed;
                Self::emit_reveal(strategy, element, c.stagger, cfg, out);
            }
        }
    }

    fn emit_reveal(
        strategy: RevealStrategy,
        element: ElementId,
        stagger: u32,
        cfg: &Config,
        out: &mut Outputs,
    ) {
        if strategy == RevealStrategy::Tween {
            out.push_op(HostOp::Tween {
                element,
                props: vec![
                    TweenProp {
                        property: "opacity".into(),
                        from: "0".into(),
                        to: "1".into(),
                    },
                    TweenProp {
                        property: "transform".into(),
                        from: "translateY(40px)".into(),
                        to: "translateY(0)".into(),
                    },
                ],
                duration: cfg.reveal_duration,
                delay: stagger as f32 * 0.1,
                ease: "power3.out".into(),
            });
        }
        out.push_op(HostOp::AddClass {
            element,
            class: "visible".into(),
        });
        out.push_event(StageEvent::RevealTriggered { element });
    }

    /// Advance running counters. Text writes happen only when the snapped
    /// integer changes; the final write is exactly the target.
    pub fn tick(&mut self, dt: f32, cfg: &Config, out: &mut Outputs) {
        for counter in &mut self.counters {
            if let CounterPhase::Running { elapsed, last_shown } = &mut counter.phase {
                *elapsed += dt;
                let t = (*elapsed / cfg.counter_duration).clamp(0.0, 1.0);
                // power2.out easing, matching the reveal timelines.
                let eased = 1.0 - (1.0 - t) * (1.0 - t);
                let shown = (counter.target as f32 * eased).round() as u32;
                if shown != *last_shown {
                    *last_shown = shown;
                    out.push_op(HostOp::SetText {
                        element: counter.element,
                        text: shown.to_string(),
                    });
                }
                if t >= 1.0 {
                    counter.phase = CounterPhase::Done;
                    out.push_event(StageEvent::CounterFinished {
                        element: counter.element,
                        value: counter.target,
                    });
                }
            }
        }
    }
}
