use glam::{Affine3A, Mat4, Vec3};

/// The viewpoint used to sort buckets.
///
/// Only the position and view direction matter to the render queue;
/// projection is owned by whatever produces the final image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: Vec3,
    direction: Vec3,
    up: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            direction: Vec3::NEG_Z,
            up: Vec3::Y,
        }
    }
}

impl Camera {
    /// Creates a camera at `position` looking along `direction`.
    ///
    /// A zero direction falls back to looking down -Z.
    #[must_use]
    pub fn new(position: Vec3, direction: Vec3) -> Self {
        Self {
            position,
            direction: direction.try_normalize().unwrap_or(Vec3::NEG_Z),
            up: Vec3::Y,
        }
    }

    /// Creates a camera at `position` looking at `target`.
    #[must_use]
    pub fn look_at(position: Vec3, target: Vec3) -> Self {
        Self::new(position, target - position)
    }

    /// Creates a camera from a world transform, looking down the local -Z axis.
    #[must_use]
    pub fn from_world_transform(world: &Affine3A) -> Self {
        let position = Vec3::from(world.translation);
        let direction = world.transform_vector3(Vec3::NEG_Z);
        let up = world.transform_vector3(Vec3::Y).try_normalize().unwrap_or(Vec3::Y);

        Self {
            position,
            direction: direction.try_normalize().unwrap_or(Vec3::NEG_Z),
            up,
        }
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Normalized view direction.
    #[inline]
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    #[inline]
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_direction(&mut self, direction: Vec3) {
        self.direction = direction.try_normalize().unwrap_or(Vec3::NEG_Z);
    }

    /// Right-handed view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.direction, self.up)
    }
}
