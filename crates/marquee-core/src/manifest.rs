//! Stage manifest: the host's declaration of which targets exist on the
//! current page, plus the two environment capabilities the engine branches
//! on once at startup.
//!
//! Every section is optional. A missing section makes the corresponding
//! controller a no-op; it never aborts the rest of the orchestrator.

use serde::{Deserialize, Serialize};

use crate::error::StageError;
use crate::ids::ElementId;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StageManifest {
    /// Path of the current document, used to reject same-page transitions.
    pub location: String,
    /// Host reports a fine pointer with hover capability. Without it the
    /// cursor follower is skipped entirely.
    pub fine_pointer: bool,
    /// Host loaded the external tween/scroll-trigger provider. Without it
    /// reveals fall back to the class-toggle strategy.
    pub tween_provider: bool,
    /// Host can drive per-frame callbacks. Without it continuous loops stay
    /// inert (constructed but never started).
    pub frame_scheduler: bool,

    pub loader: Option<ElementId>,
    pub cursor: Option<CursorTargets>,
    pub nav: Option<NavTargets>,
    pub transition: Option<TransitionTargets>,
    pub hero_scene: Option<SceneTargets>,
    pub contact_scene: Option<SceneTargets>,
    pub particle_canvas: Option<SurfaceTargets>,
    pub reveals: Vec<RevealTarget>,
    pub counters: Vec<CounterTarget>,
    pub slider: Option<SliderTargets>,
    pub filter: Option<FilterTargets>,
    pub previews: Vec<PreviewTarget>,
    pub accordion: Vec<AccordionItem>,
    pub modal: Option<ModalTargets>,
    pub showreel: Option<ShowreelTargets>,
    pub form: Option<FormTargets>,
    pub anchors: Vec<AnchorLink>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CursorTargets {
    pub dot: ElementId,
    pub outline: ElementId,
    /// Root element carrying the hover/click state classes.
    pub root: ElementId,
    /// Interactive elements whose enter/leave drive the hover state.
    #[serde(default)]
    pub hover_targets: Vec<ElementId>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NavTargets {
    pub bar: ElementId,
    pub toggle: Option<ElementId>,
    pub menu: Option<ElementId>,
    #[serde(default)]
    pub menu_links: Vec<ElementId>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionTargets {
    pub overlay: ElementId,
    pub logo: Option<ElementId>,
    /// Internal links whose clicks may arm a transition.
    #[serde(default)]
    pub links: Vec<InternalLink>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InternalLink {
    pub element: ElementId,
    pub href: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneTargets {
    pub container: ElementId,
    pub width: f32,
    pub height: f32,
    /// Hero scene couples to the pointer; ambient scenes ignore it.
    #[serde(default)]
    pub pointer_coupled: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SurfaceTargets {
    pub canvas: ElementId,
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RevealTarget {
    pub element: ElementId,
    /// Stagger slot within the element's group; scales the tween delay.
    #[serde(default)]
    pub stagger: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CounterTarget {
    pub element: ElementId,
    pub target: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SliderTargets {
    pub testimonials: Vec<ElementId>,
    #[serde(default)]
    pub dots: Vec<ElementId>,
    pub prev: Option<ElementId>,
    pub next: Option<ElementId>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FilterTargets {
    /// Filter controls with the category each one selects ("all" included).
    pub buttons: Vec<FilterButton>,
    pub cards: Vec<FilterCard>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FilterButton {
    pub element: ElementId,
    pub category: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FilterCard {
    pub element: ElementId,
    pub category: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PreviewTarget {
    pub card: ElementId,
    pub video: ElementId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccordionItem {
    pub item: ElementId,
    pub question: ElementId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModalTargets {
    pub root: ElementId,
    pub overlay: ElementId,
    pub close: Option<ElementId>,
    pub player: ElementId,
    pub mute_button: Option<ElementId>,
    pub mute_label: Option<ElementId>,
    /// Clickable cards that open the modal, with their video sources.
    #[serde(default)]
    pub triggers: Vec<ModalTrigger>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModalTrigger {
    pub element: ElementId,
    pub src: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShowreelTargets {
    pub video: ElementId,
    pub play_button: ElementId,
    pub overlay: Option<ElementId>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FormTargets {
    pub form: ElementId,
    pub submit: ElementId,
    pub success_panel: Option<ElementId>,
    /// Original label of the submit control, restored after errors.
    pub submit_label: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnchorLink {
    pub link: ElementId,
    pub target: ElementId,
}

impl StageManifest {
    pub fn from_json(json: &str) -> Result<Self, StageError> {
        let manifest: StageManifest = serde_json::from_str(json)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Reject structurally unusable sections early. Empty collections are
    /// fine (the controller just has nothing to do); contradictions are not.
    pub fn validate(&self) -> Result<(), StageError> {
        if let Some(slider) = &self.slider {
            if !slider.dots.is_empty() && slider.dots.len() != slider.testimonials.len() {
                return Err(StageError::Manifest(format!(
                    "slider has {} testimonials but {} dots",
                    slider.testimonials.len(),
                    slider.dots.len()
                )));
            }
        }
        if let Some(filter) = &self.filter {
            if filter.buttons.iter().all(|b| b.category != "all") && !filter.buttons.is_empty() {
                log::debug!("filter manifest has no \"all\" control");
            }
        }
        Ok(())
    }
}
