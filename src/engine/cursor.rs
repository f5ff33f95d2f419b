// Cursor force-field engine.
//
// Owns the cursor's per-frame mutable state and the flip-transition state
// machine. One instance per tracked subject; tick() runs once per rendering
// frame and is never re-entered. Everything here is deterministic given the
// tuning, the initial state and the sequence of (input, dt, subject) ticks
// plus flip events, up to float rounding.

use glam::{Vec2, Vec3};

use super::config::CursorTuning;
use super::forces::{
    inner_zone_force, outer_boundary_force, smoothing_alpha, transition_pull,
    ARRIVAL_EPSILON, INTENT_THRESHOLD,
};

// ============================================================================
// STATE
// ============================================================================

/// Per-frame mutable cursor state. Owned exclusively by the engine; other
/// components only ever see [`CursorSnapshot`] copies.
#[derive(Debug, Clone)]
struct CursorState {
    /// Cursor position in display-surface units.
    position: Vec2,
    /// Low-pass-filtered composite force, applied as a per-frame
    /// displacement (kinematic integration, not an acceleration).
    smoothed_force: Vec2,
    /// Smoothed magnitude of recent raw input. Always >= 0.
    momentum: f32,
    /// Last direction the player expressed (unit) or zero if never any.
    /// Sticky: retained while input magnitude stays under the threshold.
    last_intent: Vec2,
}

/// Scripted retarget state. At most one transition is in flight; a new flip
/// overwrites the target without passing through `Idle`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlipTransition {
    Idle,
    Seeking { target: Vec2 },
}

/// Facing-change notification from the subject's movement layer.
///
/// Transient: consumed when deriving the transition target, never stored.
#[derive(Debug, Clone, Copy)]
pub struct FlipEvent {
    pub new_facing_right: bool,
    /// Subject world position at the moment of the flip.
    pub world_position: Vec3,
    /// Host clock at the moment of the flip, seconds.
    pub time: f32,
}

/// Read-only copy of the cursor state for consumers (rendering, debug).
#[derive(Debug, Clone, Copy)]
pub struct CursorSnapshot {
    pub position: Vec2,
    pub smoothed_force: Vec2,
    pub momentum: f32,
    pub transitioning: bool,
}

// ============================================================================
// ENGINE
// ============================================================================

pub struct CursorEngine {
    tuning: CursorTuning,
    state: CursorState,
    transition: FlipTransition,
}

impl CursorEngine {
    /// Build an engine with the cursor spawned at the subject's projected
    /// position offset by the optimum combat distance along screen x.
    ///
    /// `tuning` must come from [`CursorTuning::validated`]; construction does
    /// not re-check the zone ordering.
    pub fn new(tuning: CursorTuning, subject_screen_pos: Vec2) -> Self {
        let position = subject_screen_pos + Vec2::new(tuning.optimum_combat_distance, 0.0);
        Self {
            tuning,
            state: CursorState {
                position,
                smoothed_force: Vec2::ZERO,
                momentum: 0.0,
                last_intent: Vec2::ZERO,
            },
            transition: FlipTransition::Idle,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.state.position
    }

    pub fn transition(&self) -> FlipTransition {
        self.transition
    }

    pub fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot {
            position: self.state.position,
            smoothed_force: self.state.smoothed_force,
            momentum: self.state.momentum,
            transitioning: matches!(self.transition, FlipTransition::Seeking { .. }),
        }
    }

    /// Handle a facing flip: retarget the cursor to the mirror of its current
    /// offset across the subject's vertical axis.
    ///
    /// If the mirrored point would land inside 1.5x the inner zone radius it
    /// is pushed out to the optimum combat distance along its own direction,
    /// so the assist never drops the cursor into the repulsion zone. Safe to
    /// call any number of times between ticks; the last target wins.
    pub fn on_flip(&mut self, event: &FlipEvent, subject_screen_pos: Vec2) {
        let offset = self.state.position - subject_screen_pos;
        let mut mirrored = Vec2::new(-offset.x, offset.y);

        if mirrored.length() < 1.5 * self.tuning.inner_zone_radius {
            let dir = mirrored.normalize_or_zero();
            mirrored = if dir != Vec2::ZERO {
                dir * self.tuning.optimum_combat_distance
            } else {
                // Cursor exactly on the subject: mirror direction is
                // undefined, fall back to the new facing axis.
                let x = if event.new_facing_right { 1.0 } else { -1.0 };
                Vec2::new(x * self.tuning.optimum_combat_distance, 0.0)
            };
        }

        let target = subject_screen_pos + mirrored;
        log::debug!(
            "flip at t={:.3} (subject world {:.1}): retargeting cursor to ({:.1}, {:.1})",
            event.time,
            event.world_position,
            target.x,
            target.y
        );
        self.transition = FlipTransition::Seeking { target };
    }

    /// Advance the field by one frame and return the new cursor position.
    ///
    /// `raw_input` is the sensitivity-scaled aim vector for this frame, `dt`
    /// the elapsed seconds since the last tick, `subject_screen_pos` the
    /// subject's freshly projected position, `facing_right` the subject's
    /// current binary facing. Always produces a finite position.
    pub fn tick(
        &mut self,
        raw_input: Vec2,
        dt: f32,
        subject_screen_pos: Vec2,
        facing_right: bool,
    ) -> Vec2 {
        let input_magnitude = raw_input.length();

        // Momentum: first-order low-pass toward the input magnitude.
        let momentum_alpha = smoothing_alpha(self.tuning.momentum_rate, dt);
        self.state.momentum += (input_magnitude - self.state.momentum) * momentum_alpha;

        // Sticky directional intent.
        if input_magnitude > INTENT_THRESHOLD {
            self.state.last_intent = raw_input / input_magnitude;
        }

        let total_force = self.compute_total_force(raw_input, subject_screen_pos, facing_right);

        let force_alpha = smoothing_alpha(self.tuning.force_smoothing_rate, dt);
        self.state.smoothed_force += (total_force - self.state.smoothed_force) * force_alpha;

        self.state.position += self.state.smoothed_force;
        self.state.position
    }

    /// Compose the tick's total force: raw input as the baseline, plus the
    /// transition pull, inner-zone repulsion and outer-boundary terms when
    /// their conditions hold. Transition arrival/cancel is resolved here,
    /// before the contribution is taken.
    fn compute_total_force(
        &mut self,
        raw_input: Vec2,
        subject_screen_pos: Vec2,
        facing_right: bool,
    ) -> Vec2 {
        let mut total = raw_input;

        if let FlipTransition::Seeking { target } = self.transition {
            if raw_input.length() > self.tuning.input_break_threshold {
                // Player override: cancel the assist, no pull this tick.
                self.transition = FlipTransition::Idle;
            } else if (target - self.state.position).length() < ARRIVAL_EPSILON {
                self.transition = FlipTransition::Idle;
            } else {
                total += transition_pull(&self.tuning, self.state.position, target);
            }
        }

        let facing_dir = if facing_right { Vec2::X } else { -Vec2::X };
        total += inner_zone_force(
            &self.tuning,
            self.state.position,
            subject_screen_pos,
            facing_dir,
            self.state.last_intent,
            self.state.momentum,
        );
        total += outer_boundary_force(
            &self.tuning,
            self.state.position,
            subject_screen_pos,
            raw_input,
        );

        total
    }
}
