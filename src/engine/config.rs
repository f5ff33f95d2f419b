// Cursor tuning block.
// All force-field behavior is controlled from here; values are fixed for the
// lifetime of a CursorEngine (no runtime reconfiguration).

use thiserror::Error;

/// Tunable parameters for the cursor force field.
///
/// Distances are in display-surface units (the same space the projector
/// outputs). `Default` carries the values the game ships with.
///
/// Zone layout invariant, checked by [`CursorTuning::validated`]:
///   `inner_zone_radius < boundary_start_distance < max_distance`
/// Violating it would make the zone blending undefined, so construction
/// rejects it instead of clamping.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorTuning {
    /// Scale applied to raw device motion before it enters the field.
    pub sensitivity: f32,

    /// Hard outer range: resistance reaches its maximum here.
    pub max_distance: f32,

    /// Distance at which the outer elastic boundary starts pushing back.
    pub boundary_start_distance: f32,
    /// Resistance magnitude at `max_distance` (quadratic ramp from the start).
    pub max_resistance_force: f32,
    /// How much of the resistance is redirected along the boundary tangent.
    pub sliding_factor: f32,

    /// Radius of the repulsion zone around the subject.
    pub inner_zone_radius: f32,
    /// Peak repulsion magnitude at zero distance.
    pub repulsion_strength: f32,
    /// Momentum multiplier applied to repulsion when the player is steering.
    pub acceleration_factor: f32,
    /// Preferred cursor distance; used for the initial spawn offset and as
    /// the rescue distance when a flip would retarget into the inner zone.
    pub optimum_combat_distance: f32,

    /// Max per-tick pull toward the flip-transition target.
    pub flip_transition_speed: f32,
    /// Raw-input magnitude above which the player overrides a transition.
    pub input_break_threshold: f32,

    /// First-order low-pass rate for the momentum tracker (1/sec).
    pub momentum_rate: f32,
    /// First-order low-pass rate for force smoothing (1/sec).
    pub force_smoothing_rate: f32,
}

impl Default for CursorTuning {
    fn default() -> Self {
        Self {
            sensitivity: 1.0,
            max_distance: 120.0,
            boundary_start_distance: 100.0,
            max_resistance_force: 5.0,
            sliding_factor: 0.6,
            inner_zone_radius: 25.0,
            repulsion_strength: 8.0,
            acceleration_factor: 2.5,
            optimum_combat_distance: 60.0,
            flip_transition_speed: 10.0,
            input_break_threshold: 0.3,
            momentum_rate: 5.0,
            force_smoothing_rate: 8.0,
        }
    }
}

/// Why a tuning block was rejected at construction.
#[derive(Debug, Error, PartialEq)]
pub enum TuningError {
    #[error(
        "zone ordering violated: inner_zone_radius ({inner}) < \
         boundary_start_distance ({start}) < max_distance ({max}) required"
    )]
    ZoneOrdering { inner: f32, start: f32, max: f32 },

    #[error("{name} must be non-negative, got {value}")]
    Negative { name: &'static str, value: f32 },
}

impl CursorTuning {
    /// Validate and return the tuning block, or say why it is unusable.
    pub fn validated(self) -> Result<Self, TuningError> {
        let named = [
            ("sensitivity", self.sensitivity),
            ("max_distance", self.max_distance),
            ("boundary_start_distance", self.boundary_start_distance),
            ("max_resistance_force", self.max_resistance_force),
            ("sliding_factor", self.sliding_factor),
            ("inner_zone_radius", self.inner_zone_radius),
            ("repulsion_strength", self.repulsion_strength),
            ("acceleration_factor", self.acceleration_factor),
            ("optimum_combat_distance", self.optimum_combat_distance),
            ("flip_transition_speed", self.flip_transition_speed),
            ("input_break_threshold", self.input_break_threshold),
            ("momentum_rate", self.momentum_rate),
            ("force_smoothing_rate", self.force_smoothing_rate),
        ];
        for (name, value) in named {
            if value < 0.0 || !value.is_finite() {
                return Err(TuningError::Negative { name, value });
            }
        }

        if self.inner_zone_radius >= self.boundary_start_distance
            || self.boundary_start_distance >= self.max_distance
        {
            return Err(TuningError::ZoneOrdering {
                inner: self.inner_zone_radius,
                start: self.boundary_start_distance,
                max: self.max_distance,
            });
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tuning_is_valid() {
        assert!(CursorTuning::default().validated().is_ok());
    }

    #[test]
    fn rejects_inner_zone_reaching_boundary() {
        let tuning = CursorTuning {
            inner_zone_radius: 100.0,
            boundary_start_distance: 100.0,
            ..CursorTuning::default()
        };
        assert!(matches!(
            tuning.validated(),
            Err(TuningError::ZoneOrdering { .. })
        ));
    }

    #[test]
    fn rejects_boundary_start_past_max() {
        let tuning = CursorTuning {
            boundary_start_distance: 130.0,
            ..CursorTuning::default()
        };
        assert!(matches!(
            tuning.validated(),
            Err(TuningError::ZoneOrdering { .. })
        ));
    }

    #[test]
    fn rejects_negative_coefficients() {
        let tuning = CursorTuning {
            repulsion_strength: -1.0,
            ..CursorTuning::default()
        };
        assert_eq!(
            tuning.validated(),
            Err(TuningError::Negative { name: "repulsion_strength", value: -1.0 })
        );
    }

    #[test]
    fn rejects_non_finite_values() {
        let tuning = CursorTuning {
            max_distance: f32::NAN,
            ..CursorTuning::default()
        };
        assert!(matches!(tuning.validated(), Err(TuningError::Negative { .. })));
    }
}
