//! marquee-core
//!
//! Host-agnostic orchestration engine for a marketing page's animation and
//! interaction layer. The host adapter (browser/wasm or a test harness)
//! registers its DOM targets in a [`StageManifest`], forwards input events,
//! and calls [`Orchestrator::step`] once per display frame; the engine
//! returns an [`Outputs`] batch of host operations to apply.
//!
//! Each controller owns a disjoint slice of UI state and is a no-op when
//! its manifest section is absent. The one deliberately shared piece is
//! [`ActivePlayback`], which the modal, the hover previews and the showreel
//! borrow per call so only one video is ever audible.

pub mod config;
pub mod controllers;
pub mod error;
pub mod follow;
pub mod ids;
pub mod inputs;
pub mod manifest;
pub mod ops;
pub mod outputs;
pub mod schedule;

use anyhow::Result;

pub use crate::config::Config;
pub use crate::error::StageError;
pub use crate::follow::DampedPoint;
pub use crate::ids::ElementId;
pub use crate::inputs::{Inputs, Key, UiEvent};
pub use crate::manifest::StageManifest;
pub use crate::ops::{HostOp, OpBatch, SceneState};
pub use crate::outputs::{Outputs, StageEvent};

use crate::controllers::accordion::AccordionController;
use crate::controllers::cursor::CursorFollower;
use crate::controllers::filter::FilterController;
use crate::controllers::form::FormController;
use crate::controllers::loader::LoaderGate;
use crate::controllers::modal::ModalController;
use crate::controllers::nav::NavigationController;
use crate::controllers::particles::ParticleField;
use crate::controllers::playback::{ActivePlayback, PreviewController, ShowreelController};
use crate::controllers::reveal::RevealController;
use crate::controllers::scene::SceneRenderer;
use crate::controllers::slider::SliderController;
use crate::controllers::transition::PageTransitionController;

#[derive(Debug)]
pub struct Orchestrator {
    cfg: Config,
    epoch: u64,
    viewport: (f32, f32),

    loader: Option<LoaderGate>,
    cursor: Option<CursorFollower>,
    hero: Option<SceneRenderer>,
    contact: Option<SceneRenderer>,
    particles: Option<ParticleField>,
    reveal: RevealController,
    nav: Option<NavigationController>,
    transition: Option<PageTransitionController>,
    modal: Option<ModalController>,
    playback: ActivePlayback,
    previews: PreviewController,
    showreel: Option<ShowreelController>,
    slider: Option<SliderController>,
    filter: Option<FilterController>,
    form: Option<FormController>,
    accordion: AccordionController,

    outputs: Outputs,
}

impl Orchestrator {
    /// Compose the stage. Controllers with missing targets come up inert;
    /// nothing here fails except a structurally invalid manifest.
    pub fn new(cfg: Config, manifest: &StageManifest) -> Result<Self, StageError> {
        manifest.validate()?;
        Ok(Self {
            loader: LoaderGate::new(manifest.loader),
            cursor: CursorFollower::new(
                &cfg,
                manifest.cursor.as_ref(),
                manifest.fine_pointer,
                manifest.frame_scheduler,
            ),
            hero: SceneRenderer::new(&cfg, manifest.hero_scene.as_ref(), manifest.frame_scheduler),
            contact: SceneRenderer::new(
                &cfg,
                manifest.contact_scene.as_ref(),
                manifest.frame_scheduler,
            ),
            particles: ParticleField::new(
                &cfg,
                manifest.particle_canvas.as_ref(),
                manifest.frame_scheduler,
            ),
            reveal: RevealController::new(
                &manifest.reveals,
                &manifest.counters,
                manifest.tween_provider,
            ),
            nav: NavigationController::new(manifest.nav.as_ref(), &manifest.anchors),
            transition: PageTransitionController::new(
                manifest.transition.as_ref(),
                &manifest.location,
            ),
            modal: ModalController::new(manifest.modal.as_ref()),
            playback: ActivePlayback::new(),
            previews: PreviewController::new(&manifest.previews),
            showreel: ShowreelController::new(manifest.showreel.as_ref()),
            slider: SliderController::new(&cfg, manifest.slider.as_ref()),
            filter: FilterController::new(manifest.filter.as_ref()),
            form: FormController::new(manifest.form.as_ref()),
            accordion: AccordionController::new(&manifest.accordion),
            cfg,
            epoch: 0,
            viewport: (1920.0, 1080.0),
            outputs: Outputs::default(),
        })
    }

    /// Convenience for hosts passing JSON blobs across the boundary.
    pub fn from_json(config_json: &str, manifest_json: &str) -> Result<Self> {
        let cfg: Config = serde_json::from_str(config_json)?;
        let manifest = StageManifest::from_json(manifest_json)?;
        Ok(Self::new(cfg, &manifest)?)
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Clear the transition in-flight flag (host-side cancellation path,
    /// e.g. a bfcache restore after an aborted navigation).
    pub fn cancel_transition(&mut self) {
        let mut out = std::mem::take(&mut self.outputs);
        if let Some(t) = self.transition.as_mut() {
            t.cancel(&mut out);
        }
        self.outputs = out;
    }

    /// Advance by dt seconds with the events that arrived since last step.
    /// Event reactions run first, then the continuous loops (each updates
    /// positions before rendering), then the timers.
    pub fn step(&mut self, dt: f32, inputs: Inputs) -> &Outputs {
        self.epoch = self.epoch.wrapping_add(1);
        let mut out = std::mem::take(&mut self.outputs);
        out.clear();

        for event in inputs.events {
            self.dispatch(event, &mut out);
        }

        if let Some(c) = self.cursor.as_mut() {
            c.tick(dt, &mut out);
        }
        if let Some(s) = self.hero.as_mut() {
            s.tick(dt, &self.cfg, &mut out);
        }
        if let Some(s) = self.contact.as_mut() {
            s.tick(dt, &self.cfg, &mut out);
        }
        if let Some(p) = self.particles.as_mut() {
            p.tick(dt, &self.cfg, &mut out);
        }

        if let Some(l) = self.loader.as_mut() {
            if l.tick(dt, &mut out) {
                self.reveal.initial_sweep(&self.cfg, &mut out);
            }
        }
        self.reveal.tick(dt, &self.cfg, &mut out);
        if let Some(s) = self.slider.as_mut() {
            s.tick(dt, &mut out);
        }
        if let Some(f) = self.filter.as_mut() {
            f.tick(dt, &mut out);
        }
        if let Some(f) = self.form.as_mut() {
            f.tick(dt, &mut out);
        }
        if let Some(t) = self.transition.as_mut() {
            t.tick(dt, &mut out);
        }

        self.outputs = out;
        &self.outputs
    }

    fn dispatch(&mut self, event: UiEvent, out: &mut Outputs) {
        match event {
            UiEvent::PointerMove { x, y } => {
                if let Some(c) = self.cursor.as_mut() {
                    c.on_pointer_move(x, y);
                }
                let (w, h) = self.viewport;
                let nx = (x / w) * 2.0 - 1.0;
                let ny = (y / h) * 2.0 - 1.0;
                for scene in [self.hero.as_mut(), self.contact.as_mut()]
                    .into_iter()
                    .flatten()
                {
                    scene.set_pointer_norm(nx, ny);
                }
            }
            UiEvent::PointerDown => {
                if let Some(c) = self.cursor.as_mut() {
                    c.on_pointer_down(out);
                }
            }
            UiEvent::PointerUp => {
                if let Some(c) = self.cursor.as_mut() {
                    c.on_pointer_up(out);
                }
            }
            UiEvent::PointerEnter { element } => {
                if let Some(c) = self.cursor.as_mut() {
                    c.on_pointer_enter(element, out);
                }
                self.previews
                    .on_pointer_enter(element, &mut self.playback, out);
            }
            UiEvent::PointerLeave { element } => {
                if let Some(c) = self.cursor.as_mut() {
                    c.on_pointer_leave(element, out);
                }
                self.previews
                    .on_pointer_leave(element, &mut self.playback, out);
            }
            UiEvent::Click { element } => {
                let consumed = self
                    .modal
                    .as_mut()
                    .map(|m| m.on_click(element, &mut self.playback, out))
                    .unwrap_or(false);
                if consumed {
                    return;
                }
                if let Some(n) = self.nav.as_mut() {
                    n.on_click(element, out);
                }
                if let Some(s) = self.slider.as_mut() {
                    s.on_click(element, out);
                }
                if let Some(f) = self.filter.as_mut() {
                    f.on_click(element, &self.cfg, out);
                }
                if let Some(s) = self.showreel.as_mut() {
                    s.on_click(element, &mut self.playback, out);
                }
                self.accordion.on_click(element, out);
            }
            UiEvent::LinkClick { element, href } => {
                // The transition sees link clicks before anything else can
                // commit a navigation side effect.
                if let Some(t) = self.transition.as_mut() {
                    t.on_link_click(element, &href, &self.cfg, out);
                }
                if let Some(n) = self.nav.as_mut() {
                    n.on_link_click(element, out);
                }
            }
            UiEvent::Scroll { y } => {
                if let Some(n) = self.nav.as_mut() {
                    n.on_scroll(y, &self.cfg, out);
                }
            }
            UiEvent::Resize {
                element,
                width,
                height,
            } => match element {
                None => self.viewport = (width.max(1.0), height.max(1.0)),
                Some(el) => {
                    for scene in [self.hero.as_mut(), self.contact.as_mut()]
                        .into_iter()
                        .flatten()
                    {
                        if scene.container() == el {
                            scene.resize(width, height, out);
                        }
                    }
                    if let Some(p) = self.particles.as_mut() {
                        if p.canvas() == el {
                            p.resize(width, height, &self.cfg);
                        }
                    }
                }
            },
            UiEvent::KeyDown { key } => {
                if key == Key::Escape {
                    if let Some(m) = self.modal.as_mut() {
                        m.on_escape(&mut self.playback, out);
                    }
                }
            }
            UiEvent::ElementVisible { element, fraction } => {
                self.reveal.observe(element, fraction, &self.cfg, out);
            }
            UiEvent::WindowLoaded => {
                if let Some(l) = self.loader.as_mut() {
                    l.on_window_loaded(&self.cfg);
                }
            }
            UiEvent::SubmitRequested { fields } => {
                if let Some(f) = self.form.as_mut() {
                    f.on_submit_requested(fields, out);
                }
            }
            UiEvent::SubmitResolved { success } => {
                if let Some(f) = self.form.as_mut() {
                    f.on_submit_resolved(success, &self.cfg, out);
                }
            }
            UiEvent::PlaybackRejected { element } => {
                if let Some(m) = self.modal.as_ref() {
                    m.on_playback_rejected(element);
                } else {
                    log::debug!("playback rejected for {element:?}, ignoring");
                }
            }
        }
    }

    // Accessors for hosts and tests that want to inspect state slices.

    pub fn modal_state(&self) -> Option<controllers::modal::ModalState> {
        self.modal.as_ref().map(|m| m.state())
    }

    pub fn active_slide(&self) -> Option<usize> {
        self.slider.as_ref().map(|s| s.active_index())
    }

    pub fn active_category(&self) -> Option<&str> {
        self.filter.as_ref().map(|f| f.active_category())
    }

    pub fn form_phase(&self) -> Option<controllers::form::FormPhase> {
        self.form.as_ref().map(|f| f.phase())
    }

    pub fn transition_in_flight(&self) -> bool {
        self.transition.as_ref().map(|t| t.in_flight()).unwrap_or(false)
    }

    pub fn active_playback(&self) -> Option<ElementId> {
        self.playback.current()
    }

    pub fn reveal_state(&self, element: ElementId) -> Option<controllers::reveal::RevealState> {
        self.reveal.state_of(element)
    }
}
