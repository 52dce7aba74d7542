//! Contact form submit machine: Idle -> Sending -> Success | Error -> Idle.
//!
//! Success is terminal for the submission (form hidden, success panel
//! shown, fields cleared). Error — logical or transport, the engine does
//! not distinguish — shows an inline label and self-heals back to Idle
//! after a fixed delay. Nothing here ever blocks or throws.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::ids::ElementId;
use crate::manifest::FormTargets;
use crate::ops::HostOp;
use crate::outputs::{Outputs, StageEvent};
use crate::schedule::Countdown;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormPhase {
    Idle,
    Sending,
    Success,
    Error,
}

#[derive(Debug)]
pub struct FormController {
    form: ElementId,
    submit: ElementId,
    success_panel: Option<ElementId>,
    original_label: String,
    phase: FormPhase,
    reset: Countdown,
}

impl FormController {
    pub fn new(targets: Option<&FormTargets>) -> Option<Self> {
        let targets = targets?;
        Some(Self {
            form: targets.form,
            submit: targets.submit,
            success_panel: targets.success_panel,
            original_label: targets.submit_label.clone(),
            phase: FormPhase::Idle,
            reset: Countdown::new(),
        })
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn on_submit_requested(&mut self, fields: Vec<(String, String)>, out: &mut Outputs) {
        if self.phase != FormPhase::Idle {
            log::debug!("form: submit ignored while {:?}", self.phase);
            return;
        }
        self.phase = FormPhase::Sending;
        out.push_op(HostOp::SetDisabled {
            element: self.submit,
            disabled: true,
        });
        out.push_op(HostOp::SetText {
            element: self.submit,
            text: "Sending...".into(),
        });
        out.push_op(HostOp::Submit { fields });
        out.push_event(StageEvent::FormStateChanged {
            state: FormPhase::Sending,
        });
    }

    pub fn on_submit_resolved(&mut self, success: bool, cfg: &Config, out: &mut Outputs) {
        if self.phase != FormPhase::Sending {
            return;
        }
        if success {
            self.phase = FormPhase::Success;
            out.push_op(HostOp::SetStyle {
                element: self.form,
                property: "display".into(),
                value: "none".into(),
            });
            if let Some(panel) = self.success_panel {
                out.push_op(HostOp::SetStyle {
                    element: panel,
                    property: "display".into(),
                    value: "flex".into(),
                });
            }
            out.push_op(HostOp::FormReset { element: self.form });
            out.push_event(StageEvent::FormStateChanged {
                state: FormPhase::Success,
            });
        } else {
            self.phase = FormPhase::Error;
            out.push_op(HostOp::SetText {
                element: self.submit,
                text: "Error! Try Again".into(),
            });
            self.reset.arm(cfg.form_error_reset);
            out.push_event(StageEvent::FormStateChanged {
                state: FormPhase::Error,
            });
        }
    }

    /// The error state heals itself: original label back, control enabled.
    pub fn tick(&mut self, dt: f32, out: &mut Outputs) {
        if self.reset.tick(dt) && self.phase == FormPhase::Error {
            self.phase = FormPhase::Idle;
            out.push_op(HostOp::SetText {
                element: self.submit,
                text: self.original_label.clone(),
            });
            out.push_op(HostOp::SetDisabled {
                element: self.submit,
                disabled: false,
            });
            out.push_event(StageEvent::FormStateChanged {
                state: FormPhase::Idle,
            });
        }
    }
}
