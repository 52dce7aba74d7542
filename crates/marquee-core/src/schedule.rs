//! Scheduling primitives: the continuous frame loop and the two timer shapes
//! the controllers need (one-shot countdown, recurring metronome).
//!
//! All of these advance only through `tick(dt)`, driven by the orchestrator's
//! step. Without a host calling step there is no hidden thread or callback;
//! the primitives are inert, which is the required behavior when the host
//! environment has no refresh-driven scheduler.

/// Continuous per-frame loop. At most one registration per instance:
/// `start` while running is a no-op, as is `stop` while stopped, and `stop`
/// is safe to call from within an update driven by `tick`.
#[derive(Debug, Default)]
pub struct FrameLoop {
    running: bool,
    elapsed: f32,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance the loop; returns the accumulated time while running.
    pub fn tick(&mut self, dt: f32) -> Option<f32> {
        if !self.running {
            return None;
        }
        self.elapsed += dt;
        Some(self.elapsed)
    }
}

/// Cancellable one-shot delay. Firing is exactly-once per arm.
#[derive(Debug, Default)]
pub struct Countdown {
    remaining: Option<f32>,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) the countdown. Re-arming replaces the pending delay.
    pub fn arm(&mut self, delay: f32) {
        self.remaining = Some(delay.max(0.0));
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }

    /// Advance; returns true exactly when the delay elapses.
    pub fn tick(&mut self, dt: f32) -> bool {
        match self.remaining {
            Some(rem) => {
                let rem = rem - dt;
                if rem <= 0.0 {
                    self.remaining = None;
                    true
                } else {
                    self.remaining = Some(rem);
                    false
                }
            }
            None => false,
        }
    }
}

/// Recurring timer. `rewind` resets the phase without stacking extra fires,
/// which is how manual slider navigation defers the next auto-advance.
#[derive(Debug)]
pub struct Metronome {
    period: f32,
    remaining: f32,
}

impl Metronome {
    pub fn new(period: f32) -> Self {
        Self {
            period: period.max(f32::EPSILON),
            remaining: period.max(f32::EPSILON),
        }
    }

    pub fn rewind(&mut self) {
        self.remaining = self.period;
    }

    /// Advance; returns the number of periods that elapsed this tick.
    pub fn tick(&mut self, dt: f32) -> u32 {
        self.remaining -= dt;
        let mut fired = 0;
        while self.remaining <= 0.0 {
            fired += 1;
            self.remaining += self.period;
        }
        fired
    }
}
