// Engine module - cursor force field and its frame-loop glue

pub mod components;
pub mod config;
pub mod cursor;
pub mod forces;
pub mod input;
pub mod projection;
pub mod systems;

// Re-export what the host binary consumes
pub use components::*;
pub use config::CursorTuning;
pub use cursor::CursorEngine;
pub use input::AimInput;
pub use projection::{Projector, SurfaceRect, WorldCamera};
pub use systems::{
    cursor_update_system, detect_flip_system, CursorOutput, CursorRig, FrameInput,
    SurfaceProjector,
};
