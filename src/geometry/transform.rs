use crate::{Point3f, Vec3f};
use cgmath::{EuclideanSpace, InnerSpace, Matrix3, SquareMatrix};

/// A rotation + translation, applied as `p -> R*p + t`. Meshes and point clouds carry
/// one of these as their `currentTransform`; it is set once per collision call by the
/// dispatcher and treated as read-only for the rest of that call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigidTransform {
    pub rotation: Matrix3<f32>,
    pub translation: Vec3f,
}

impl RigidTransform {
    pub const fn new(rotation: Matrix3<f32>, translation: Vec3f) -> Self {
        Self { rotation, translation }
    }

    pub fn identity() -> Self {
        Self::new(Matrix3::identity(), Vec3f::new(0.0, 0.0, 0.0))
    }

    pub fn apply_point(&self, p: Point3f) -> Point3f {
        Point3f::from_vec(self.rotation * p.to_vec() + self.translation)
    }

    pub fn apply_vector(&self, v: Vec3f) -> Vec3f {
        self.rotation * v
    }

    /// Orthonormal rotation assumed, so the inverse rotation is just the transpose.
    pub fn inverse(&self) -> Self {
        let inv_rot = self.rotation.transpose();
        Self::new(inv_rot, -(inv_rot * self.translation))
    }

    /// `self^-1 * other`, i.e. express points given in `other`'s frame in `self`'s frame.
    /// Mirrors the source's `RigidTransform::mulInverseA`.
    pub fn to_local_of(&self, other: &Self) -> Self {
        let inv = self.inverse();
        Self::new(inv.rotation * other.rotation, inv.apply_point(Point3f::from_vec(other.translation)).to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point3f;
    use cgmath::Rad;

    #[test]
    fn identity_is_noop() {
        let t = RigidTransform::identity();
        let p = point3f!(1, 2, 3);
        assert_eq!(t.apply_point(p), p);
    }

    #[test]
    fn inverse_round_trips() {
        let rot = Matrix3::from_angle_z(Rad(0.7));
        let t = RigidTransform::new(rot, Vec3f::new(1.0, -2.0, 0.5));
        let p = point3f!(3, -1, 2);
        let round_tripped = t.inverse().apply_point(t.apply_point(p));
        assert!((round_tripped - p).magnitude() < 1e-5);
    }

    #[test]
    fn to_local_of_composes_inverse() {
        let rot = Matrix3::from_angle_y(Rad(0.3));
        let t1 = RigidTransform::new(rot, Vec3f::new(1.0, 0.0, 0.0));
        let t2 = RigidTransform::identity();
        let t21 = t1.to_local_of(&t2);
        // t2 is the identity, so t1^-1 * t2 should equal t1's inverse.
        assert_eq!(t21.rotation, t1.inverse().rotation);
    }
}
