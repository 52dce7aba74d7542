//! Damped follow: per-frame linear interpolation of a tracked position
//! toward a target. With a fixed factor < 1 the position converges
//! geometrically, which reads as critically-damped motion without any
//! explicit velocity state.

use serde::{Deserialize, Serialize};

/// 2D position accumulator stepped once per frame.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize)]
pub struct DampedPoint {
    pub x: f32,
    pub y: f32,
    factor: f32,
}

impl DampedPoint {
    pub fn new(factor: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            factor: factor.clamp(0.0, 1.0),
        }
    }

    /// One frame of `pos += (target - pos) * factor`.
    pub fn step_toward(&mut self, tx: f32, ty: f32) {
        self.x += (tx - self.x) * self.factor;
        self.y += (ty - self.y) * self.factor;
    }

    /// Snap directly to the target (used when a surface resets).
    pub fn snap_to(&mut self, tx: f32, ty: f32) {
        self.x = tx;
        self.y = ty;
    }

    pub fn distance_to(&self, tx: f32, ty: f32) -> f32 {
        let dx = tx - self.x;
        let dy = ty - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_geometrically() {
        let mut p = DampedPoint::new(0.5);
        for _ in 0..32 {
            p.step_toward(100.0, -40.0);
        }
        assert!(p.distance_to(100.0, -40.0) < 1e-3);
    }

    #[test]
    fn slower_factor_lags_behind_faster() {
        let mut dot = DampedPoint::new(0.5);
        let mut outline = DampedPoint::new(0.15);
        for _ in 0..5 {
            dot.step_toward(10.0, 0.0);
            outline.step_toward(10.0, 0.0);
        }
        assert!(dot.x > outline.x);
    }
}
