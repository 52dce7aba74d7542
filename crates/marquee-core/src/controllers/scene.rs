//! Decorative scene loop. The engine owns the phase accumulator and the
//! damped pointer response; the host's scene handle owns geometry and
//! materials and just renders the `SceneState` snapshot it receives.

use crate::config::Config;
use crate::ids::ElementId;
use crate::manifest::SceneTargets;
use crate::ops::{HostOp, SceneState};
use crate::outputs::Outputs;
use crate::schedule::FrameLoop;
use crate::DampedPoint;

/// Resting orientation of the hero centerpiece.
const BASE_TILT: f32 = 0.15;
const BASE_TURN: f32 = -0.4;

#[derive(Debug)]
pub struct SceneRenderer {
    container: ElementId,
    frame: FrameLoop,
    phase: f32,
    pointer: DampedPoint,
    /// Latest normalized pointer position in [-1, 1].
    pointer_norm: (f32, f32),
    pointer_coupled: bool,
    width: f32,
    height: f32,
}

impl SceneRenderer {
    pub fn new(cfg: &Config, targets: Option<&SceneTargets>, frame_scheduler: bool) -> Option<Self> {
        let targets = match targets {
            Some(t) => t,
            None => return None,
        };
        let mut frame = FrameLoop::new();
        if frame_scheduler {
            frame.start();
        }
        Some(Self {
            container: targets.container,
            frame,
            phase: 0.0,
            pointer: DampedPoint::new(cfg.scene_pointer_factor),
            pointer_norm: (0.0, 0.0),
            pointer_coupled: targets.pointer_coupled,
            width: targets.width.max(1.0),
            height: targets.height.max(1.0),
        })
    }

    pub fn container(&self) -> ElementId {
        self.container
    }

    pub fn set_pointer_norm(&mut self, nx: f32, ny: f32) {
        if self.pointer_coupled {
            self.pointer_norm = (nx, ny);
        }
    }

    /// Projection parameters follow the container; the phase accumulator
    /// does not reset, so motion is continuous across resizes.
    pub fn resize(&mut self, width: f32, height: f32, out: &mut Outputs) {
        self.width = width.max(1.0);
        self.height = height.max(1.0);
        out.push_op(HostOp::SceneResize {
            element: self.container,
            width: self.width,
            height: self.height,
        });
    }

    pub fn tick(&mut self, dt: f32, cfg: &Config, out: &mut Outputs) {
        if self.frame.tick(dt).is_none() {
            return;
        }
        self.phase += dt * cfg.scene_phase_rate;
        // Two-stage damping: the raw pointer is first scaled into the small
        // parallax range, then chased with the slow factor.
        let (tx, ty) = (self.pointer_norm.0 * 0.15, self.pointer_norm.1 * 0.1);
        self.pointer.step_toward(tx, ty);
        out.push_op(HostOp::SceneRender {
            element: self.container,
            state: self.state(),
        });
    }

    /// Visual parameters as a pure function of phase and pointer offset.
    pub fn state(&self) -> SceneState {
        let t = self.phase;
        if self.pointer_coupled {
            SceneState {
                phase: t,
                rotation: [
                    BASE_TILT + (t * 0.3).cos() * 0.05 - self.pointer.y,
                    BASE_TURN + (t * 0.5).sin() * 0.1 + self.pointer.x,
                    (t * 0.4).sin() * 0.02,
                ],
                float_offset: (t * 0.6).sin() * 0.1,
                pulse: 0.6 + (t * 2.0).sin() * 0.2,
                pointer_offset: [self.pointer.x, self.pointer.y],
            }
        } else {
            // Ambient scene: steady spin, no pointer parallax.
            SceneState {
                phase: t,
                rotation: [t * 0.25, t * 0.4, 0.0],
                float_offset: 0.0,
                pulse: 1.0,
                pointer_offset: [0.0, 0.0],
            }
        }
    }

    #[cfg(test)]
    pub fn phase(&self) -> f32 {
        self.phase
    }
}
