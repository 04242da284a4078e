use crate::{Point3f, Vec3f};

/// Axis-aligned bounding box in world or local space.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Bounds3 {
    pub min: Point3f,
    pub max: Point3f,
}

impl Bounds3 {
    pub fn empty() -> Self {
        Self {
            min: Point3f::new(std::f32::MAX, std::f32::MAX, std::f32::MAX),
            max: Point3f::new(std::f32::MIN, std::f32::MIN, std::f32::MIN),
        }
    }

    pub fn with_bounds(min: Point3f, max: Point3f) -> Self {
        Self { min, max }
    }

    pub fn join(&self, other: &Self) -> Self {
        Self::with_bounds(
            Point3f::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            Point3f::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        )
    }

    pub fn join_point(&self, p: Point3f) -> Self {
        Self::with_bounds(
            Point3f::new(self.min.x.min(p.x), self.min.y.min(p.y), self.min.z.min(p.z)),
            Point3f::new(self.max.x.max(p.x), self.max.y.max(p.y), self.max.z.max(p.z)),
        )
    }

    pub fn diagonal(&self) -> Vec3f {
        self.max - self.min
    }

    pub fn centroid(&self) -> Point3f {
        self.min + self.diagonal() * 0.5
    }

    /// Grow the box isotropically by `margin` on every face. Negative margins shrink it.
    pub fn inflate(&self, margin: f32) -> Self {
        let d = Vec3f::new(margin, margin, margin);
        Self::with_bounds(self.min - d, self.max + d)
    }

    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Flattened `[xmin, xmax, ymin, ymax, zmin, zmax]`, the layout the host engine's
    /// `AABB()` callback expects.
    pub fn to_flat_array(&self) -> [f32; 6] {
        [self.min.x, self.max.x, self.min.y, self.max.y, self.min.z, self.max.z]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inflate_grows_every_face() {
        let b = Bounds3::with_bounds(Point3f::new(0.0, 0.0, 0.0), Point3f::new(1.0, 1.0, 1.0));
        let inflated = b.inflate(0.1);
        assert_eq!(inflated.min, Point3f::new(-0.1, -0.1, -0.1));
        assert_eq!(inflated.max, Point3f::new(1.1, 1.1, 1.1));
    }

    #[test]
    fn join_point_expands_empty_box() {
        let b = Bounds3::empty().join_point(Point3f::new(1.0, 2.0, 3.0));
        assert_eq!(b.min, b.max);
        assert_eq!(b.min, Point3f::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn overlaps_detects_separation() {
        let a = Bounds3::with_bounds(Point3f::new(0.0, 0.0, 0.0), Point3f::new(1.0, 1.0, 1.0));
        let b = Bounds3::with_bounds(Point3f::new(2.0, 2.0, 2.0), Point3f::new(3.0, 3.0, 3.0));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&a.inflate(1.5)));
    }
}
