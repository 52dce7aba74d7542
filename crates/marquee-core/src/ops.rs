//! Host operations produced by the engine each step.
//!
//! A `HostOp` is an instruction for the adapter: mutate a class, write a
//! style, drive a media element, navigate. Ops must be idempotent against
//! detached elements (the adapter silently drops ops whose target no longer
//! exists), which lets deferred timers run to completion safely.

use serde::{Deserialize, Serialize};

use crate::ids::ElementId;

/// Style pair used by tween ops: property name plus (from, to) CSS values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TweenProp {
    pub property: String,
    pub from: String,
    pub to: String,
}

/// Snapshot of a decorative scene for one frame. All fields are pure
/// functions of the scene's phase accumulator and damped pointer offset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneState {
    pub phase: f32,
    /// Euler rotation applied to the centerpiece, radians.
    pub rotation: [f32; 3],
    /// Vertical float offset of the centerpiece.
    pub float_offset: f32,
    /// Accent light intensity pulse.
    pub pulse: f32,
    /// Damped pointer offset in normalized device units.
    pub pointer_offset: [f32; 2],
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticleDot {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub opacity: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticleLink {
    pub from: [f32; 2],
    pub to: [f32; 2],
    pub opacity: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum HostOp {
    AddClass {
        element: ElementId,
        class: String,
    },
    RemoveClass {
        element: ElementId,
        class: String,
    },
    SetStyle {
        element: ElementId,
        property: String,
        value: String,
    },
    /// Restore the property to its stylesheet value (sets the inline value
    /// to the empty string, the layout-restore path for filtered cards).
    ClearStyle {
        element: ElementId,
        property: String,
    },
    SetText {
        element: ElementId,
        text: String,
    },
    /// 2D translate in px, the cursor-proxy fast path.
    SetTransform {
        element: ElementId,
        x: f32,
        y: f32,
    },
    SetDisabled {
        element: ElementId,
        disabled: bool,
    },
    /// Toggle the page-level scroll lock.
    ScrollLock(bool),
    ScrollIntoView {
        element: ElementId,
    },
    /// Commit navigation to an internal page.
    Navigate {
        href: String,
    },
    /// Hand a timeline to the external tween provider.
    Tween {
        element: ElementId,
        props: Vec<TweenProp>,
        duration: f32,
        delay: f32,
        ease: String,
    },
    SceneRender {
        element: ElementId,
        state: SceneState,
    },
    SceneResize {
        element: ElementId,
        width: f32,
        height: f32,
    },
    ParticleFrame {
        element: ElementId,
        dots: Vec<ParticleDot>,
        links: Vec<ParticleLink>,
    },
    MediaSetSource {
        element: ElementId,
        src: String,
    },
    /// Clearing the source also stops buffering.
    MediaClearSource {
        element: ElementId,
    },
    /// `play()`; the adapter reports rejection back as a PlaybackRejected
    /// event rather than surfacing an error.
    MediaPlay {
        element: ElementId,
    },
    MediaPause {
        element: ElementId,
    },
    MediaSetMuted {
        element: ElementId,
        muted: bool,
    },
    MediaResetTime {
        element: ElementId,
    },
    /// Post the field set to the remote submission endpoint.
    Submit {
        fields: Vec<(String, String)>,
    },
    FormReset {
        element: ElementId,
    },
}

/// Ordered batch of host ops emitted during one step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpBatch(pub Vec<HostOp>);

impl OpBatch {
    pub fn new() -> Self {
        OpBatch(Vec::new())
    }

    pub fn push(&mut self, op: HostOp) {
        self.0.push(op);
    }

    pub fn iter(&self) -> impl Iterator<Item = &HostOp> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn into_vec(self) -> Vec<HostOp> {
        self.0
    }

    /// Append another batch in-place, preserving order.
    pub fn append(&mut self, mut other: OpBatch) {
        self.0.append(&mut other.0);
    }
}
