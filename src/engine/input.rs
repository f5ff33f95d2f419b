// Aim input accumulation.
// Turns host-supplied device motion deltas into the per-frame raw input
// vector the force field consumes. Device sampling itself stays with the
// host; this layer only accumulates, scales and snapshots.

use glam::Vec2;

pub struct AimInput {
    /// Scale applied to accumulated motion when the frame is latched.
    sensitivity: f32,

    /// Motion accumulated since the last `end_frame`.
    accumulated: Vec2,

    /// This frame's raw input vector (already sensitivity-scaled).
    raw: Vec2,
}

impl AimInput {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            sensitivity,
            accumulated: Vec2::ZERO,
            raw: Vec2::ZERO,
        }
    }

    /// Feed one device motion delta. May be called any number of times per
    /// frame (once per pumped event).
    pub fn push_motion(&mut self, delta: Vec2) {
        self.accumulated += delta;
    }

    /// Latch the accumulated motion into this frame's raw vector and reset
    /// the accumulator. Call once per frame, after the host has pumped its
    /// events and before the cursor tick runs.
    pub fn end_frame(&mut self) {
        self.raw = self.accumulated * self.sensitivity;
        self.accumulated = Vec2::ZERO;
    }

    /// The raw input vector latched by the last `end_frame`.
    pub fn raw(&self) -> Vec2 {
        self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_and_scales_motion() {
        let mut aim = AimInput::new(2.0);
        aim.push_motion(Vec2::new(1.0, 0.0));
        aim.push_motion(Vec2::new(0.5, -1.0));
        aim.end_frame();
        assert_eq!(aim.raw(), Vec2::new(3.0, -2.0));
    }

    #[test]
    fn end_frame_resets_the_accumulator() {
        let mut aim = AimInput::new(1.0);
        aim.push_motion(Vec2::ONE);
        aim.end_frame();
        aim.end_frame();
        assert_eq!(aim.raw(), Vec2::ZERO);
    }

    #[test]
    fn raw_holds_until_next_latch() {
        let mut aim = AimInput::new(1.0);
        aim.push_motion(Vec2::X);
        aim.end_frame();
        aim.push_motion(Vec2::Y); // not latched yet
        assert_eq!(aim.raw(), Vec2::X);
    }
}
