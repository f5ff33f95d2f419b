// Frame-loop systems for the cursor rig.
//
// Per-frame order (enforced by chaining in the host schedule):
//   1. detect_flip_system  — turns Facing edges into FacingFlipped events
//   2. cursor_update_system — drains pending flips, then ticks the engine
//
// Pending flips are always drained before the tick's force computation so a
// flip and the following tick are observed atomically together; multiple
// flips queued between ticks collapse to the last target.

use bevy_ecs::prelude::*;
use glam::Vec2;

use super::components::{Facing, FacingFlipped, Player, Transform};
use super::cursor::{CursorEngine, CursorSnapshot};
use super::projection::Projector;

// ============================================================================
// RESOURCES
// ============================================================================

/// Host-supplied inputs for the current frame. `dt` is explicit (scaled or
/// unscaled is the host's choice); nothing in the engine reads a global
/// clock.
#[derive(Resource, Debug, Clone, Copy)]
pub struct FrameInput {
    /// Sensitivity-scaled raw aim vector for this frame.
    pub raw: Vec2,
    /// Seconds elapsed since the previous tick.
    pub dt: f32,
    /// Host clock, seconds. Only used to stamp flip events.
    pub time: f32,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self { raw: Vec2::ZERO, dt: 1.0 / 60.0, time: 0.0 }
    }
}

/// Exclusive owner of the cursor engine. Nothing outside the cursor system
/// mutates it; readers go through [`CursorRig::snapshot`] or the
/// [`CursorOutput`] resource.
#[derive(Resource)]
pub struct CursorRig {
    engine: CursorEngine,
}

impl CursorRig {
    pub fn new(engine: CursorEngine) -> Self {
        Self { engine }
    }

    pub fn snapshot(&self) -> CursorSnapshot {
        self.engine.snapshot()
    }
}

/// The projector the cursor system uses to place the subject on the surface.
#[derive(Resource)]
pub struct SurfaceProjector(pub Projector);

/// Immutable per-frame copy of the cursor position for the rendering
/// consumer. Published at the end of every successful tick.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct CursorOutput {
    pub position: Vec2,
}

// ============================================================================
// SYSTEMS
// ============================================================================

/// Watch the player's facing and broadcast a [`FacingFlipped`] event on each
/// actual transition. The first observed facing only seeds the edge
/// detector; spawning is not a flip.
pub fn detect_flip_system(
    player: Query<(&Transform, &Facing), With<Player>>,
    frame: Res<FrameInput>,
    mut previous: Local<Option<bool>>,
    mut flips: EventWriter<FacingFlipped>,
) {
    let Ok((transform, facing)) = player.get_single() else {
        return;
    };

    let flipped = previous.is_some_and(|prev| prev != facing.right);
    *previous = Some(facing.right);

    if flipped {
        flips.send(FacingFlipped {
            new_facing_right: facing.right,
            world_position: transform.position,
            time: frame.time,
        });
    }
}

/// Project the subject, drain pending flip events into the engine, tick the
/// force field and publish the new cursor position.
///
/// A failed projection (no camera) is fatal for the tick: the frame is
/// skipped with a warning rather than guessing a position.
pub fn cursor_update_system(
    mut rig: ResMut<CursorRig>,
    mut flips: EventReader<FacingFlipped>,
    frame: Res<FrameInput>,
    projector: Res<SurfaceProjector>,
    player: Query<(&Transform, &Facing), With<Player>>,
    mut output: ResMut<CursorOutput>,
) {
    let Ok((transform, facing)) = player.get_single() else {
        return;
    };

    let subject = match projector.0.project(transform.position) {
        Ok(point) => point,
        Err(err) => {
            log::warn!("cursor tick skipped: {err}");
            flips.clear();
            return;
        }
    };

    // Drain flips before computing forces. The flip position is projected
    // with the same camera that just succeeded for the subject.
    for flip in flips.read() {
        let at = projector.0.project(flip.world_position).unwrap_or(subject);
        rig.engine.on_flip(&(*flip).into(), at);
    }

    let position = rig.engine.tick(frame.raw, frame.dt, subject, facing.right);
    output.position = position;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::CursorTuning;
    use crate::engine::cursor::FlipEvent;
    use crate::engine::projection::{SurfaceRect, WorldCamera};
    use glam::Vec3;

    fn test_world() -> (World, Schedule) {
        let mut world = World::new();

        let projector = Projector {
            camera: Some(WorldCamera::new()),
            surface: SurfaceRect { size: Vec2::new(1920.0, 1080.0) },
            ui_scale: None,
        };
        let tuning = CursorTuning::default().validated().unwrap();
        let subject = projector.project(Vec3::ZERO).unwrap();

        world.insert_resource(Events::<FacingFlipped>::default());
        world.insert_resource(FrameInput::default());
        world.insert_resource(CursorRig::new(CursorEngine::new(tuning, subject)));
        world.insert_resource(SurfaceProjector(projector));
        world.insert_resource(CursorOutput::default());
        world.spawn((Transform::default(), Facing::default(), Player));

        let mut schedule = Schedule::default();
        schedule.add_systems((detect_flip_system, cursor_update_system).chain());
        (world, schedule)
    }

    fn set_facing(world: &mut World, right: bool) {
        let mut query = world.query_filtered::<&mut Facing, With<Player>>();
        query.get_single_mut(world).unwrap().right = right;
    }

    fn end_frame(world: &mut World) {
        world.resource_mut::<Events<FacingFlipped>>().update();
    }

    #[test]
    fn spawn_does_not_count_as_flip() {
        let (mut world, mut schedule) = test_world();
        schedule.run(&mut world);
        let snapshot = world.resource::<CursorRig>().snapshot();
        assert!(!snapshot.transitioning);
    }

    #[test]
    fn facing_edge_starts_transition_same_frame() {
        let (mut world, mut schedule) = test_world();

        // Seed the edge detector, then flip.
        schedule.run(&mut world);
        end_frame(&mut world);
        set_facing(&mut world, false);
        schedule.run(&mut world);

        // The event was emitted and drained before the tick ran, so the
        // engine is already seeking by the time the frame ends.
        assert!(world.resource::<CursorRig>().snapshot().transitioning);
    }

    #[test]
    fn output_tracks_engine_position() {
        let (mut world, mut schedule) = test_world();
        world.resource_mut::<FrameInput>().raw = Vec2::new(0.5, 0.0);

        for _ in 0..5 {
            schedule.run(&mut world);
            end_frame(&mut world);
        }

        let output = world.resource::<CursorOutput>();
        let snapshot = world.resource::<CursorRig>().snapshot();
        assert_eq!(output.position, snapshot.position);
        assert!(snapshot.position.is_finite());
    }

    #[test]
    fn double_flip_between_ticks_keeps_last_target() {
        let (mut world, mut schedule) = test_world();
        schedule.run(&mut world);
        end_frame(&mut world);

        // Two flips queued between ticks, at different subject positions.
        // The drain applies both in order with no idle frame, so the engine
        // ends up exactly where a single second flip would have left it.
        world.send_event(FacingFlipped {
            new_facing_right: false,
            world_position: Vec3::ZERO,
            time: 0.1,
        });
        world.send_event(FacingFlipped {
            new_facing_right: true,
            world_position: Vec3::new(2.0, 0.0, 0.0),
            time: 0.2,
        });
        schedule.run(&mut world);

        let projector = &world.resource::<SurfaceProjector>().0;
        let tuning = CursorTuning::default().validated().unwrap();
        let subject = projector.project(Vec3::ZERO).unwrap();
        let mut reference = CursorEngine::new(tuning, subject);
        let flip_at = projector.project(Vec3::new(2.0, 0.0, 0.0)).unwrap();
        reference.on_flip(
            &FlipEvent { new_facing_right: true, world_position: Vec3::new(2.0, 0.0, 0.0), time: 0.2 },
            flip_at,
        );
        reference.tick(Vec2::ZERO, 1.0 / 60.0, subject, true);

        let rig = world.resource::<CursorRig>();
        assert!(rig.snapshot().transitioning);
        assert_eq!(rig.engine.transition(), reference.transition());
    }

    #[test]
    fn missing_camera_skips_tick_without_panicking() {
        let (mut world, mut schedule) = test_world();
        schedule.run(&mut world);
        let before = world.resource::<CursorOutput>().position;

        world.resource_mut::<SurfaceProjector>().0.camera = None;
        world.resource_mut::<FrameInput>().raw = Vec2::new(0.9, 0.0);
        schedule.run(&mut world);

        assert_eq!(world.resource::<CursorOutput>().position, before);
    }
}
