use glam::{Affine3A, EulerRot, Quat, Vec3};

/// Transform component.
///
/// Position, rotation and scale of a node relative to its parent. Rotation is
/// stored as XYZ Euler angles in radians so that choreography can animate and
/// accumulate each axis independently; the quaternion form is derived on
/// demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// XYZ Euler angles (radians).
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    /// Rotation as a quaternion.
    #[inline]
    #[must_use]
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Replaces the rotation from a quaternion (used when sampling clips).
    pub fn set_rotation_quat(&mut self, rotation: Quat) {
        let (x, y, z) = rotation.to_euler(EulerRot::XYZ);
        self.rotation = Vec3::new(x, y, z);
    }

    /// Rotates about the local Y axis by `angle` radians.
    ///
    /// The rotation is composed on the right, so it is applied in the node's
    /// own frame rather than the parent's.
    pub fn rotate_y(&mut self, angle: f32) {
        let rotation = self.rotation_quat() * Quat::from_rotation_y(angle);
        self.set_rotation_quat(rotation);
    }

    /// Local matrix built from the current TRS values.
    #[must_use]
    pub fn local_matrix(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation_quat(), self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_y_accumulates_on_identity() {
        let mut transform = Transform::new();
        for _ in 0..10 {
            transform.rotate_y(0.002);
        }
        assert!((transform.rotation.y - 0.02).abs() < 1e-5);
        assert!(transform.rotation.x.abs() < 1e-5);
    }

    #[test]
    fn local_matrix_applies_scale_then_translation() {
        let transform = Transform {
            position: Vec3::new(1.0, 0.0, 0.0),
            rotation: Vec3::ZERO,
            scale: Vec3::splat(2.0),
        };
        let p = transform.local_matrix().transform_point3(Vec3::ONE);
        assert!((p - Vec3::new(3.0, 2.0, 2.0)).length() < 1e-5);
    }
}
