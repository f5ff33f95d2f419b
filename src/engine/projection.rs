// World-to-surface projection.
//
// Camera model:
//   - A "target" point on the XZ ground plane (Y=0) that the camera looks at
//   - Fixed pitch (elevation angle) and yaw (horizontal rotation)
//   - Distance along the look vector sets the framing
//
// The projector turns a 3D world point into a 2D point in the display
// surface's local space (origin at the surface center, +y up), which is the
// coordinate space the cursor engine works in.

use glam::{Mat4, Vec2, Vec3};
use thiserror::Error;

/// Clip-space w below which a point counts as degenerate (at or behind the
/// eye plane). Output is still finite in that case, just unusable.
const MIN_CLIP_W: f32 = 1e-4;

// ============================================================================
// WORLD CAMERA
// ============================================================================

/// Perspective camera orbiting a ground-plane target.
#[derive(Debug, Clone)]
pub struct WorldCamera {
    /// Point on the ground plane (X/Z) the camera looks at.
    pub target: Vec2,

    /// Distance from target along the look direction.
    pub distance: f32,

    /// Elevation angle in radians (0 = horizontal, PI/2 = straight down).
    pub pitch: f32,

    /// Horizontal rotation in radians (0 = looking along -Z axis).
    pub yaw: f32,

    /// Vertical field of view in radians.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl WorldCamera {
    pub fn new() -> Self {
        Self {
            target: Vec2::ZERO,
            distance: 30.0,
            pitch: 15.0_f32.to_radians(),
            yaw: 0.0,
            fov: 35.0_f32.to_radians(),
            near: 0.1,
            far: 200.0,
        }
    }

    /// World-space position of the camera eye.
    pub fn camera_position(&self) -> Vec3 {
        let target_3d = Vec3::new(self.target.x, 0.0, self.target.y);
        target_3d + self.eye_offset()
    }

    /// View matrix: looks from the camera eye toward the target.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(
            self.camera_position(),
            Vec3::new(self.target.x, 0.0, self.target.y),
            Vec3::Y,
        )
    }

    /// Perspective projection matrix.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov, aspect, self.near, self.far)
    }

    /// Combined view-projection matrix.
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    // Offset from target to camera eye based on pitch, yaw, and distance.
    fn eye_offset(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos() * self.distance,
            self.pitch.sin() * self.distance,
            self.yaw.cos() * self.pitch.cos() * self.distance,
        )
    }
}

impl Default for WorldCamera {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// PROJECTOR
// ============================================================================

/// Display surface dimensions in pixels. Local coordinates run
/// [-size/2, +size/2] on each axis with the origin at the center.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceRect {
    pub size: Vec2,
}

#[derive(Debug, Error, PartialEq)]
pub enum ProjectionError {
    #[error("no world camera attached to the projector")]
    MissingCamera,
}

/// Maps world positions into display-surface local space.
///
/// Stateless apart from its configuration; safe to call any number of times
/// per frame.
pub struct Projector {
    /// Rendering camera. Projection is a hard error without one, since there
    /// is no safe default position to guess.
    pub camera: Option<WorldCamera>,

    pub surface: SurfaceRect,

    /// Scale divisor applied when the surface is rendered through its own
    /// camera at a different reference resolution. `None` = overlay surface,
    /// equivalent to 1.0.
    pub ui_scale: Option<f32>,
}

impl Projector {
    /// Project a world point into surface-local coordinates.
    ///
    /// Total for every finite input given a camera: points at or behind the
    /// eye plane yield degenerate (but finite) output rather than an error,
    /// so a tick never sees a NaN.
    pub fn project(&self, world: Vec3) -> Result<Vec2, ProjectionError> {
        let camera = self.camera.as_ref().ok_or(ProjectionError::MissingCamera)?;

        let aspect = self.surface.size.x / self.surface.size.y;
        let clip = camera.view_projection(aspect) * world.extend(1.0);

        // Keep the perspective divide away from zero for behind-camera
        // points; the result is off-screen garbage the caller tolerates.
        let w = clip.w.signum() * clip.w.abs().max(MIN_CLIP_W);
        let ndc = Vec2::new(clip.x / w, clip.y / w);

        let local = ndc * self.surface.size * 0.5;
        Ok(local / self.ui_scale.unwrap_or(1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projector() -> Projector {
        Projector {
            camera: Some(WorldCamera::new()),
            surface: SurfaceRect { size: Vec2::new(1920.0, 1080.0) },
            ui_scale: None,
        }
    }

    #[test]
    fn camera_target_projects_to_surface_center() {
        let p = projector();
        let on_target = Vec3::ZERO; // camera target is the ground origin
        let local = p.project(on_target).unwrap();
        assert!(local.length() < 1e-3, "expected center, got {local}");
    }

    #[test]
    fn world_x_maps_to_surface_x() {
        let p = projector();
        let right = p.project(Vec3::new(1.0, 0.0, 0.0)).unwrap();
        let left = p.project(Vec3::new(-1.0, 0.0, 0.0)).unwrap();
        assert!(right.x > 0.0);
        assert!(left.x < 0.0);
        // Pure x offsets stay on the horizontal centerline at yaw 0.
        assert!(right.y.abs() < 1e-3);
    }

    #[test]
    fn world_height_maps_to_surface_up() {
        let p = projector();
        let above = p.project(Vec3::new(0.0, 1.0, 0.0)).unwrap();
        assert!(above.y > 0.0);
    }

    #[test]
    fn missing_camera_is_an_error() {
        let p = Projector {
            camera: None,
            surface: SurfaceRect { size: Vec2::new(1920.0, 1080.0) },
            ui_scale: None,
        };
        assert_eq!(p.project(Vec3::ZERO), Err(ProjectionError::MissingCamera));
    }

    #[test]
    fn behind_camera_point_is_finite() {
        let p = projector();
        let camera = p.camera.as_ref().unwrap();
        // Well behind the eye along the view direction.
        let behind = camera.camera_position() + camera.camera_position() * 2.0;
        let local = p.project(behind).unwrap();
        assert!(local.is_finite());
    }

    #[test]
    fn ui_scale_divides_output() {
        let mut p = projector();
        let base = p.project(Vec3::new(2.0, 0.5, 0.0)).unwrap();
        p.ui_scale = Some(2.0);
        let scaled = p.project(Vec3::new(2.0, 0.5, 0.0)).unwrap();
        assert!((scaled * 2.0 - base).length() < 1e-4);
    }
}
