//! Tuning constants for the orchestration engine.

use serde::{Deserialize, Serialize};

/// Timing and damping constants. Defaults reproduce the production page;
/// tests override individual fields to compress delays.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Per-frame convergence factor of the cursor dot.
    pub cursor_dot_factor: f32,
    /// Per-frame convergence factor of the cursor outline.
    pub cursor_outline_factor: f32,
    /// Per-frame convergence factor of the scene pointer offset.
    pub scene_pointer_factor: f32,
    /// Scene phase advance in phase-units per second (0.003/frame at 60 fps).
    pub scene_phase_rate: f32,

    /// Scroll offset in px beyond which the nav switches to its scrolled style.
    pub nav_scroll_threshold: f32,

    /// Visibility fraction that triggers a reveal.
    pub reveal_threshold: f32,
    /// Seconds a reveal tween runs for.
    pub reveal_duration: f32,
    /// Seconds a counter takes to count up to its target.
    pub counter_duration: f32,

    /// Seconds between window load and loader dismissal.
    pub loader_delay: f32,
    /// Seconds between automatic slider advances.
    pub slider_interval: f32,
    /// Seconds a filtered-out card fades before leaving layout.
    pub filter_fade: f32,
    /// Next-tick delay before a restored card fades in.
    pub filter_enter_delay: f32,
    /// Seconds the form shows its error label before re-enabling.
    pub form_error_reset: f32,
    /// Seconds the page-transition exit animation runs before navigation.
    pub transition_duration: f32,

    pub particle_count: usize,
    /// Maximum particle drift speed in px per frame.
    pub particle_speed: f32,
    /// Distance in px under which two particles are linked.
    pub particle_link_distance: f32,
    /// Seed for particle placement; fixed so runs are reproducible.
    pub particle_seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cursor_dot_factor: 0.5,
            cursor_outline_factor: 0.15,
            scene_pointer_factor: 0.03,
            scene_phase_rate: 0.18,
            nav_scroll_threshold: 100.0,
            reveal_threshold: 0.1,
            reveal_duration: 0.8,
            counter_duration: 2.0,
            loader_delay: 2.0,
            slider_interval: 6.0,
            filter_fade: 0.3,
            filter_enter_delay: 0.05,
            form_error_reset: 3.0,
            transition_duration: 0.5,
            particle_count: 50,
            particle_speed: 0.5,
            particle_link_distance: 150.0,
            particle_seed: 0x6d61_7271,
        }
    }
}
