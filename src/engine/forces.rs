// Force rules for the cursor field.
//
// Each rule is a pure function (tuning, geometry, input) -> Vec2 so the
// zones can be tested in isolation; the engine sums whichever rules are
// active for the tick. Zero-length directions always collapse to a zero
// contribution rather than a NaN.

use glam::Vec2;

use super::config::CursorTuning;

/// Raw-input magnitude above which the player's direction is remembered as
/// the "last intent" (sticky; retained when input drops back to zero).
pub const INTENT_THRESHOLD: f32 = 0.1;

/// Transition arrival epsilon, in surface units.
pub const ARRIVAL_EPSILON: f32 = 1.0;

// ============================================================================
// SMOOTHING
// ============================================================================

/// Frame-rate-compensated blend factor for a first-order low-pass with the
/// given rate (1/sec). Equivalent to `lerp(current, target, rate * dt)` at
/// small `dt`; stays in (0, 1] for arbitrarily large frame times (a huge
/// `rate * dt` rounds to a full snap).
#[inline]
pub fn smoothing_alpha(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate * dt).exp()
}

// ============================================================================
// FORCE RULES
// ============================================================================

/// Pull toward an active flip-transition target.
///
/// Magnitude is capped at `flip_transition_speed` and never overshoots the
/// remaining distance. Arrival/cancellation are decided by the engine before
/// this is called.
pub fn transition_pull(tuning: &CursorTuning, cursor: Vec2, target: Vec2) -> Vec2 {
    let to_target = target - cursor;
    let dist = to_target.length();
    let dir = to_target.normalize_or_zero();
    dir * tuning.flip_transition_speed.min(dist)
}

/// Repulsion/acceleration contribution inside the inner zone.
///
/// Active when `distance(cursor, subject) < inner_zone_radius`. The push
/// direction starts outward from the subject, blends 0.4 toward the
/// subject's facing, and, when the player has expressed a direction, blends
/// a further 0.5 toward that intent while momentum scales the magnitude up.
pub fn inner_zone_force(
    tuning: &CursorTuning,
    cursor: Vec2,
    subject: Vec2,
    facing_dir: Vec2,
    last_intent: Vec2,
    momentum: f32,
) -> Vec2 {
    let distance = cursor.distance(subject);
    if distance >= tuning.inner_zone_radius {
        return Vec2::ZERO;
    }

    let repulsion_ratio = 1.0 - distance / tuning.inner_zone_radius;
    let outward = (cursor - subject).normalize_or_zero();

    let mut direction = outward.lerp(facing_dir, 0.4);
    let mut magnitude = tuning.repulsion_strength * repulsion_ratio;

    if last_intent != Vec2::ZERO {
        direction = direction.lerp(last_intent, 0.5);
        magnitude *= 1.0 + momentum * tuning.acceleration_factor;
    }

    // Cursor sitting exactly on the subject with no facing/intent: nothing
    // sensible to push along, contribute nothing.
    direction.normalize_or_zero() * magnitude
}

/// Elastic resistance plus tangential sliding beyond the outer boundary.
///
/// Active when `distance(cursor, subject) > boundary_start_distance`.
/// Resistance ramps quadratically with overshoot and points back at the
/// subject; the sliding term redirects the raw-input component along the
/// boundary tangent so the cursor can orbit instead of fighting the wall.
pub fn outer_boundary_force(
    tuning: &CursorTuning,
    cursor: Vec2,
    subject: Vec2,
    raw_input: Vec2,
) -> Vec2 {
    let to_subject = subject - cursor;
    let distance = to_subject.length();
    if distance <= tuning.boundary_start_distance {
        return Vec2::ZERO;
    }

    let overshoot = distance - tuning.boundary_start_distance;
    let span = tuning.max_distance - tuning.boundary_start_distance;
    let boundary_ratio = (overshoot / span).clamp(0.0, 1.0);
    let resistance = boundary_ratio * boundary_ratio * tuning.max_resistance_force;

    // distance > boundary_start > 0, so this normalize cannot degenerate.
    let toward = to_subject / distance;
    let resistance_force = toward * resistance;

    // 90-degree CCW rotation of the toward-subject direction.
    let tangent = Vec2::new(-toward.y, toward.x);
    let tangent_dot = raw_input.normalize_or_zero().dot(tangent);
    let sliding_force = tangent * tangent_dot * tuning.sliding_factor * resistance;

    resistance_force + sliding_force
}
