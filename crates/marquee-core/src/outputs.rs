//! Output contract from the engine.
//!
//! Outputs carry the host ops for this step plus a list of semantic events
//! for diagnostics and host-side hooks. The orchestrator clears and refills
//! one Outputs value per step.

use serde::{Deserialize, Serialize};

use crate::ids::ElementId;
use crate::ops::{HostOp, OpBatch};

/// Discrete semantic signals emitted during a step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum StageEvent {
    LoaderDismissed,
    RevealTriggered {
        element: ElementId,
    },
    CounterFinished {
        element: ElementId,
        value: u32,
    },
    MenuToggled {
        open: bool,
    },
    NavigationArmed {
        href: String,
    },
    NavigationCommitted {
        href: String,
    },
    ModalOpened {
        src: String,
    },
    ModalClosed,
    MuteToggled {
        muted: bool,
    },
    SlideChanged {
        index: usize,
    },
    FilterApplied {
        category: String,
    },
    FormStateChanged {
        state: crate::controllers::form::FormPhase,
    },
    /// Exclusive-playback ownership moved to a new video element.
    PlaybackTransferred {
        from: Option<ElementId>,
        to: ElementId,
    },
}

/// Outputs returned by `Orchestrator::step`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub ops: OpBatch,
    #[serde(default)]
    pub events: Vec<StageEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.ops.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_op(&mut self, op: HostOp) {
        self.ops.push(op);
    }

    #[inline]
    pub fn push_event(&mut self, event: StageEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty() && self.events.is_empty()
    }
}
