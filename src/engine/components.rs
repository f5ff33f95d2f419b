// Core ECS components for the cursor rig
// The tracked subject is an ordinary entity; the cursor engine only ever
// sees its projected position and facing, never the entity itself.

use bevy_ecs::prelude::*;
use glam::{Vec2, Vec3};

use super::cursor::FlipEvent;

/// Position of an entity in 3D world space.
#[derive(Component, Debug, Clone, Copy)]
pub struct Transform {
    pub position: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self { position: Vec3::ZERO }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self { position }
    }
}

/// Binary facing direction of a character.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Facing {
    pub right: bool,
}

impl Facing {
    /// Screen-space facing direction (unit x axis, signed).
    pub fn direction(&self) -> Vec2 {
        if self.right { Vec2::X } else { -Vec2::X }
    }
}

impl Default for Facing {
    fn default() -> Self {
        Self { right: true }
    }
}

/// Marker for the player-controlled subject the cursor tracks.
#[derive(Component, Debug, Clone, Copy)]
pub struct Player;

/// Broadcast when the tracked subject's facing direction changes.
///
/// Carries the new facing, the subject's world position at the moment of the
/// flip, and the host clock. Queued by `bevy_ecs` and drained at the start
/// of the next cursor tick.
#[derive(Event, Debug, Clone, Copy)]
pub struct FacingFlipped {
    pub new_facing_right: bool,
    pub world_position: Vec3,
    pub time: f32,
}

impl From<FacingFlipped> for FlipEvent {
    fn from(event: FacingFlipped) -> Self {
        FlipEvent {
            new_facing_right: event.new_facing_right,
            world_position: event.world_position,
            time: event.time,
        }
    }
}
