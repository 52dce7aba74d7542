//! 2D particle canvas: slow-drifting dots with distance-faded links.
//! The engine simulates; the host draws the emitted frame.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Config;
use crate::ids::ElementId;
use crate::manifest::SurfaceTargets;
use crate::ops::{HostOp, ParticleDot, ParticleLink};
use crate::outputs::Outputs;
use crate::schedule::FrameLoop;

#[derive(Debug, Clone)]
struct Particle {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    size: f32,
    opacity: f32,
}

#[derive(Debug)]
pub struct ParticleField {
    canvas: ElementId,
    frame: FrameLoop,
    width: f32,
    height: f32,
    particles: Vec<Particle>,
    rng: StdRng,
    link_distance: f32,
}

impl ParticleField {
    pub fn new(
        cfg: &Config,
        targets: Option<&SurfaceTargets>,
        frame_scheduler: bool,
    ) -> Option<Self> {
        let targets = targets?;
        let mut frame = FrameLoop::new();
        if frame_scheduler {
            frame.start();
        }
        let mut field = Self {
            canvas: targets.canvas,
            frame,
            width: targets.width.max(1.0),
            height: targets.height.max(1.0),
            particles: Vec::with_capacity(cfg.particle_count),
            rng: StdRng::seed_from_u64(cfg.particle_seed),
            link_distance: cfg.particle_link_distance,
        };
        field.seed(cfg);
        Some(field)
    }

    pub fn canvas(&self) -> ElementId {
        self.canvas
    }

    fn spawn(rng: &mut StdRng, cfg: &Config, width: f32, height: f32) -> Particle {
        Particle {
            x: rng.gen_range(0.0..width),
            y: rng.gen_range(0.0..height),
            vx: rng.gen_range(-0.5..0.5) * cfg.particle_speed * 2.0,
            vy: rng.gen_range(-0.5..0.5) * cfg.particle_speed * 2.0,
            size: rng.gen_range(0.5..2.5),
            opacity: rng.gen_range(0.1..0.6),
        }
    }

    fn seed(&mut self, cfg: &Config) {
        self.particles.clear();
        for _ in 0..cfg.particle_count {
            let p = Self::spawn(&mut self.rng, cfg, self.width, self.height);
            self.particles.push(p);
        }
    }

    /// Resizing rebuilds the field for the new bounds (matching the canvas
    /// reinitialization the surface itself performs).
    pub fn resize(&mut self, width: f32, height: f32, cfg: &Config) {
        self.width = width.max(1.0);
        self.height = height.max(1.0);
        self.seed(cfg);
    }

    pub fn tick(&mut self, dt: f32, cfg: &Config, out: &mut Outputs) {
        if self.frame.tick(dt).is_none() {
            return;
        }
        let (w, h) = (self.width, self.height);
        for i in 0..self.particles.len() {
            let p = &mut self.particles[i];
            p.x += p.vx;
            p.y += p.vy;
            let escaped = p.x < 0.0 || p.x > w || p.y < 0.0 || p.y > h;
            if escaped {
                self.particles[i] = Self::spawn(&mut self.rng, cfg, w, h);
            }
        }

        let dots: Vec<ParticleDot> = self
            .particles
            .iter()
            .map(|p| ParticleDot {
                x: p.x,
                y: p.y,
                size: p.size,
                opacity: p.opacity,
            })
            .collect();

        let mut links = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for b in self.particles.iter().skip(i + 1) {
                let dist = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
                if dist < self.link_distance {
                    links.push(ParticleLink {
                        from: [a.x, a.y],
                        to: [b.x, b.y],
                        opacity: 0.1 * (1.0 - dist / self.link_distance),
                    });
                }
            }
        }

        out.push_op(HostOp::ParticleFrame {
            element: self.canvas,
            dots,
            links,
        });
    }
}
