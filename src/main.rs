// Headless demo: runs the cursor force field against a scripted session.
//
// No window, no GPU. A player character walks on the ground plane, the aim
// input follows a scripted pattern with a little seeded jitter, and the
// character flips facing mid-run so the transition assist fires. The cursor
// track is logged; run with RUST_LOG=debug to also see flip retargets.

mod engine;

use bevy_ecs::prelude::*;
use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

use engine::{
    cursor_update_system, detect_flip_system, AimInput, CursorEngine, CursorOutput, CursorRig,
    CursorTuning, Facing, FacingFlipped, FrameInput, Player, Projector, SurfaceProjector,
    SurfaceRect, Transform, WorldCamera,
};

const DT: f32 = 1.0 / 60.0;
const FRAMES: u32 = 300;
const WALK_SPEED: f32 = 2.0; // world units per second
const FLIP_FRAME: u32 = 150;

fn main() {
    env_logger::init();

    let tuning = CursorTuning::default()
        .validated()
        .expect("default tuning satisfies the zone ordering");

    let projector = Projector {
        camera: Some(WorldCamera::new()),
        surface: SurfaceRect { size: Vec2::new(1920.0, 1080.0) },
        ui_scale: None,
    };

    let subject_world = Vec3::ZERO;
    let subject_screen = projector
        .project(subject_world)
        .expect("camera was just attached");

    let mut world = World::new();
    world.insert_resource(Events::<FacingFlipped>::default());
    world.insert_resource(FrameInput::default());
    world.insert_resource(CursorRig::new(CursorEngine::new(tuning.clone(), subject_screen)));
    world.insert_resource(SurfaceProjector(projector));
    world.insert_resource(CursorOutput::default());
    world.spawn((Transform::from_position(subject_world), Facing::default(), Player));

    let mut schedule = Schedule::default();
    schedule.add_systems((detect_flip_system, cursor_update_system).chain());

    let mut aim = AimInput::new(tuning.sensitivity);
    let mut rng = StdRng::seed_from_u64(7);

    log::info!("running {FRAMES} scripted frames at {}Hz", (1.0 / DT) as u32);

    for frame in 0..FRAMES {
        // Scripted aim: pull up-right for the first stretch, then let the
        // field take over. Jitter keeps the momentum tracker honest.
        if frame < 80 {
            let jitter = Vec2::new(rng.gen_range(-0.05..0.05), rng.gen_range(-0.05..0.05));
            aim.push_motion(Vec2::new(0.6, 0.25) + jitter);
        }
        aim.end_frame();

        {
            let mut input = world.resource_mut::<FrameInput>();
            input.raw = aim.raw();
            input.dt = DT;
            input.time += DT;
        }

        // The character walks the way it faces and turns around mid-run.
        let mut query = world.query_filtered::<(&mut Transform, &mut Facing), With<Player>>();
        if let Ok((mut transform, mut facing)) = query.get_single_mut(&mut world) {
            transform.position.x += facing.direction().x * WALK_SPEED * DT;
            if frame == FLIP_FRAME {
                facing.right = false;
            }
        }

        schedule.run(&mut world);
        world.resource_mut::<Events<FacingFlipped>>().update();

        if frame % 30 == 0 {
            let output = world.resource::<CursorOutput>();
            let snapshot = world.resource::<CursorRig>().snapshot();
            log::info!(
                "frame {frame:3}: cursor ({:7.2}, {:7.2}) force {:.3} momentum {:.3}{}",
                output.position.x,
                output.position.y,
                snapshot.smoothed_force.length(),
                snapshot.momentum,
                if snapshot.transitioning { " [flip assist]" } else { "" },
            );
        }
    }

    let final_pos = world.resource::<CursorOutput>().position;
    log::info!("done: cursor settled at ({:.2}, {:.2})", final_pos.x, final_pos.y);
}
