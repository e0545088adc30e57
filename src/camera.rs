use glam::{Mat3, Mat4, Quat, Vec3};

use crate::path::Path;
use crate::sampler::PathSampler;

pub const DEFAULT_SPEED_FACTOR: f32 = 1.0;

/// Below this distance the camera is considered to sit on its look-at point
const MIN_AIM_DISTANCE_SQ: f32 = 1e-10;

/// Position and orientation read by the renderer every frame
///
/// Orientation follows the usual camera convention: local -Z looks forward,
/// local +Y is up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl CameraPose {
    pub const fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    pub const fn at(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.orientation * Vec3::X
    }

    pub fn up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }

    /// World-to-camera transform
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position).inverse()
    }

    /// Turn to face `target`; keeps the current orientation when the target is
    /// too close to define a direction
    pub fn look_at(&mut self, target: Vec3) {
        let to_target = target - self.position;
        if to_target.length_squared() < MIN_AIM_DISTANCE_SQ || !to_target.is_finite() {
            return;
        }
        self.orientation = look_rotation(to_target.normalize());
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}

/// Rotation whose -Z axis points along `forward`, with +Y as close to world
/// up as possible
fn look_rotation(forward: Vec3) -> Quat {
    // Looking straight up or down: world Y gives no horizon, fall back to Z
    let world_up = if forward.cross(Vec3::Y).length_squared() < 1e-8 {
        Vec3::Z
    } else {
        Vec3::Y
    };

    let right = forward.cross(world_up).normalize();
    let up = right.cross(forward);
    Quat::from_mat3(&Mat3::from_cols(right, up, -forward)).normalize()
}

/// Perspective parameters for turning a pose into clip space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn new(fov_y_degrees: f32, aspect: f32) -> Self {
        Self {
            fov_y: fov_y_degrees.to_radians(),
            aspect,
            near: 0.1,
            far: 1000.0,
        }
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self, pose: &CameraPose) -> Mat4 {
        self.matrix() * pose.view_matrix()
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(75.0, 16.0 / 9.0)
    }
}

/// Point the camera keeps facing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookAtTarget {
    point: Vec3,
}

impl LookAtTarget {
    pub const fn fixed(point: Vec3) -> Self {
        Self { point }
    }

    pub fn point(&self) -> Vec3 {
        self.point
    }
}

/// Moves the camera toward the scroll-selected path sample every frame
///
/// The pose is only ever advanced by smoothing. While no usable path exists
/// the driver does nothing and the pose stays where it was.
#[derive(Debug, Clone)]
pub struct CameraDriver {
    pose: CameraPose,
    look_at: LookAtTarget,
    speed_factor: f32,
    current_index: Option<usize>,
}

impl CameraDriver {
    pub fn new(initial: CameraPose, look_at: LookAtTarget) -> Self {
        Self {
            pose: initial,
            look_at,
            speed_factor: DEFAULT_SPEED_FACTOR,
            current_index: None,
        }
    }

    pub fn with_speed_factor(mut self, speed_factor: f32) -> Self {
        self.set_speed_factor(speed_factor);
        self
    }

    /// Negative or non-finite factors freeze the camera
    pub fn set_speed_factor(&mut self, speed_factor: f32) {
        self.speed_factor = if speed_factor.is_finite() {
            speed_factor.max(0.0)
        } else {
            0.0
        };
    }

    pub fn speed_factor(&self) -> f32 {
        self.speed_factor
    }

    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    pub fn look_at(&self) -> &LookAtTarget {
        &self.look_at
    }

    pub fn set_look_at(&mut self, look_at: LookAtTarget) {
        self.look_at = look_at;
    }

    /// Sample index chosen on the last successful update
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// A freshly loaded path starts out pointing at its last sample
    pub fn on_path_ready(&mut self, path: &Path) {
        self.current_index = path.len().checked_sub(1);
    }

    /// Fraction of the remaining distance covered this frame
    pub fn step_fraction(&self, dt: f32) -> f32 {
        let t = dt * self.speed_factor;
        if t.is_nan() {
            0.0
        } else {
            t.clamp(0.0, 1.0)
        }
    }

    /// Ease toward `target`, then re-aim from the new position
    pub fn step_toward(&mut self, target: Vec3, dt: f32) {
        let t = self.step_fraction(dt);
        self.pose.position = if t >= 1.0 {
            target
        } else {
            self.pose.position.lerp(target, t)
        };
        self.pose.look_at(self.look_at.point());
    }

    /// One frame of camera motion
    ///
    /// Returns the sample index followed this frame, or `None` when there is
    /// nothing to follow (path absent or degenerate) and the pose was left
    /// untouched.
    pub fn update(&mut self, path: Option<&Path>, offset: f32, dt: f32) -> Option<usize> {
        let path = path?;

        match PathSampler::resolve_index(path, offset) {
            Ok(index) => {
                self.current_index = Some(index);
                self.step_toward(path[index].position, dt);
                log::trace!(
                    "offset {offset:.4} -> sample {index}, camera at {:?}",
                    self.pose.position
                );
                Some(index)
            }
            Err(e) => {
                log::trace!("Holding camera: {e}");
                None
            }
        }
    }
}
