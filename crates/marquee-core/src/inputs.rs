//! Input contract for the engine.
//!
//! The host adapter translates raw browser events into `UiEvent`s and passes
//! them in batches to `Orchestrator::step` each frame. Events already carry
//! any target resolution the engine needs (element ids, link hrefs,
//! visibility fractions), so the core never touches the DOM.

use serde::{Deserialize, Serialize};

use crate::ids::ElementId;

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Inputs {
    #[serde(default)]
    pub events: Vec<UiEvent>,
}

impl Inputs {
    pub fn one(event: UiEvent) -> Self {
        Self {
            events: vec![event],
        }
    }
}

/// Keys the engine reacts to. Everything else stays host-side.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Escape,
    Other,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum UiEvent {
    /// Live pointer position in viewport px; never throttled by the host.
    PointerMove { x: f32, y: f32 },
    PointerDown,
    PointerUp,
    /// Pointer entered a registered interactive element.
    PointerEnter { element: ElementId },
    PointerLeave { element: ElementId },
    Click { element: ElementId },
    /// Click on a link the host registered; the host suppresses default
    /// navigation for these and lets the engine decide whether to commit.
    LinkClick { element: ElementId, href: String },
    Scroll { y: f32 },
    /// `element: None` means the window itself resized.
    Resize {
        element: Option<ElementId>,
        width: f32,
        height: f32,
    },
    KeyDown { key: Key },
    /// Visibility report for a reveal candidate: fraction of the element
    /// currently inside the viewport, in [0, 1].
    ElementVisible { element: ElementId, fraction: f32 },
    WindowLoaded,
    /// The form was submitted; fields are (name, value) pairs.
    SubmitRequested { fields: Vec<(String, String)> },
    /// The remote endpoint resolved. Transport failures arrive as
    /// `success: false`; the engine treats both identically.
    SubmitResolved { success: bool },
    /// `play()` was rejected by the platform (autoplay policy).
    PlaybackRejected { element: ElementId },
}
