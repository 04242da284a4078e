use crate::geometry::barycentric::BarycentricCoords;
use crate::geometry::segment::Segment;
use crate::{Point3f, Vec3f};
use cgmath::{EuclideanSpace, InnerSpace};

/// Three vertices in some local (mesh) frame. `Mesh` stores triangles as index triples
/// into its vertex array and hands out `Triangle` values on demand via `Mesh::triangle`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub a: Point3f,
    pub b: Point3f,
    pub c: Point3f,
}

impl Triangle {
    pub fn new(a: Point3f, b: Point3f, c: Point3f) -> Self {
        Self { a, b, c }
    }

    /// Unit outward normal via the right-hand rule over `(b-a, c-a)`. Undefined (but
    /// finite-ish) for a degenerate triangle; callers upstream treat near-zero-area
    /// triangles as a warning, not a hard error.
    pub fn normal(&self) -> Vec3f {
        (self.b - self.a).cross(self.c - self.a).normalize()
    }

    pub fn area(&self) -> f32 {
        0.5 * (self.b - self.a).cross(self.c - self.a).magnitude()
    }

    /// Edge `i` is the edge opposite vertex `i`, matching `FeatureType`/`EdgeIndex`'s
    /// convention: edge 0 is `b->c`, edge 1 is `c->a`, edge 2 is `a->b`.
    pub fn edge(&self, i: usize) -> Segment {
        match i {
            0 => Segment::new(self.b, self.c),
            1 => Segment::new(self.c, self.a),
            2 => Segment::new(self.a, self.b),
            _ => panic!("triangle edge index out of range: {}", i),
        }
    }

    /// Barycentric coordinates of `p` with respect to this triangle, via the standard
    /// dot-product (Cramer's rule) formulation. `p` need not lie exactly in the
    /// triangle's plane; it is first treated as the closest in-plane representation.
    pub fn barycentric_coords(&self, p: Point3f) -> BarycentricCoords {
        let v0 = self.b - self.a;
        let v1 = self.c - self.a;
        let v2 = p - self.a;

        let d00 = v0.dot(v0);
        let d01 = v0.dot(v1);
        let d11 = v1.dot(v1);
        let d20 = v2.dot(v0);
        let d21 = v2.dot(v1);
        let denom = d00 * d11 - d01 * d01;
        if denom.abs() < std::f32::EPSILON {
            // degenerate triangle: fall back to treating `a` as the whole triangle.
            return BarycentricCoords::new(1.0, 0.0, 0.0);
        }
        let v = (d11 * d20 - d01 * d21) / denom;
        let w = (d00 * d21 - d01 * d20) / denom;
        let u = 1.0 - v - w;
        BarycentricCoords::new(u, v, w)
    }

    pub fn point_at(&self, bary: BarycentricCoords) -> Point3f {
        Point3f::from_vec(
            bary.x * self.a.to_vec() + bary.y * self.b.to_vec() + bary.z * self.c.to_vec(),
        )
    }

    /// Closest point on the (solid, bounded) triangle to `p`. Standard region-based
    /// algorithm (Ericson, *Real-Time Collision Detection* §5.1.5): classify `p`
    /// against the triangle's three vertex/edge Voronoi regions before falling back to
    /// the face region.
    pub fn closest_point(&self, p: Point3f) -> Point3f {
        let (a, b, c) = (self.a, self.b, self.c);
        let ab = b - a;
        let ac = c - a;
        let ap = p - a;

        let d1 = ab.dot(ap);
        let d2 = ac.dot(ap);
        if d1 <= 0.0 && d2 <= 0.0 {
            return a;
        }

        let bp = p - b;
        let d3 = ab.dot(bp);
        let d4 = ac.dot(bp);
        if d3 >= 0.0 && d4 <= d3 {
            return b;
        }

        let vc = d1 * d4 - d3 * d2;
        if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
            let v = d1 / (d1 - d3);
            return a + ab * v;
        }

        let cp = p - c;
        let d5 = ab.dot(cp);
        let d6 = ac.dot(cp);
        if d6 >= 0.0 && d5 <= d6 {
            return c;
        }

        let vb = d5 * d2 - d1 * d6;
        if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
            let w = d2 / (d2 - d6);
            return a + ac * w;
        }

        let va = d3 * d6 - d5 * d4;
        if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
            let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
            return b + (c - b) * w;
        }

        let denom = 1.0 / (va + vb + vc);
        let v = vb * denom;
        let w = vc * denom;
        a + ab * v + ac * w
    }

    /// Separating-axis triangle/triangle intersection test. Used by the optional
    /// penetration filter to detect when the broad phase's witness points are
    /// unreliable because the two triangles already overlap past the margin.
    ///
    /// Beyond the usual 2 face-normal + 9 edge-cross-edge axes, this also tries each
    /// edge crossed with its own triangle's normal: those axes are what separate
    /// coplanar (or near-coplanar) triangles, where every edge-cross-edge axis
    /// degenerates to the shared normal direction and carries no separating power.
    pub fn intersects(&self, other: &Triangle) -> bool {
        let n1 = (self.b - self.a).cross(self.c - self.a);
        let n2 = (other.b - other.a).cross(other.c - other.a);
        let e1 = [self.b - self.a, self.c - self.b, self.a - self.c];
        let e2 = [other.b - other.a, other.c - other.b, other.a - other.c];

        let axes = [n1, n2]
            .iter()
            .copied()
            .chain(e1.iter().copied().flat_map(move |a| e2.iter().copied().map(move |b| a.cross(b))))
            .chain(e1.iter().copied().map(move |e| e.cross(n1)))
            .chain(e2.iter().copied().map(move |e| e.cross(n2)));

        for axis in axes {
            if axis.magnitude2() < 1e-12 {
                continue;
            }
            let (min1, max1) = project(self, axis);
            let (min2, max2) = project(other, axis);
            if max1 < min2 || max2 < min1 {
                return false;
            }
        }
        true
    }
}

fn project(tri: &Triangle, axis: Vec3f) -> (f32, f32) {
    let d0 = tri.a.to_vec().dot(axis);
    let d1 = tri.b.to_vec().dot(axis);
    let d2 = tri.c.to_vec().dot(axis);
    (d0.min(d1).min(d2), d0.max(d1).max(d2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point3f;

    fn unit_xy_triangle() -> Triangle {
        Triangle::new(point3f!(0, 0, 0), point3f!(1, 0, 0), point3f!(0, 1, 0))
    }

    #[test]
    fn normal_of_unit_triangle_is_z() {
        let t = unit_xy_triangle();
        assert!((t.normal() - Vec3f::new(0.0, 0.0, 1.0)).magnitude() < 1e-6);
    }

    #[test]
    fn barycentric_of_vertex_is_one_hot() {
        let t = unit_xy_triangle();
        let b = t.barycentric_coords(t.a);
        assert!((b.x - 1.0).abs() < 1e-5);
        assert!(b.y.abs() < 1e-5);
        assert!(b.z.abs() < 1e-5);
    }

    #[test]
    fn barycentric_of_centroid_is_uniform() {
        let t = unit_xy_triangle();
        let centroid = Point3f::from_vec((t.a.to_vec() + t.b.to_vec() + t.c.to_vec()) / 3.0);
        let b = t.barycentric_coords(centroid);
        assert!((b.x - 1.0 / 3.0).abs() < 1e-5);
        assert!((b.y - 1.0 / 3.0).abs() < 1e-5);
        assert!((b.z - 1.0 / 3.0).abs() < 1e-5);
    }

    #[test]
    fn closest_point_on_face_for_point_above_centroid() {
        let t = unit_xy_triangle();
        let centroid = Point3f::from_vec((t.a.to_vec() + t.b.to_vec() + t.c.to_vec()) / 3.0);
        let above = centroid + Vec3f::new(0.0, 0.0, 1.0);
        let cp = t.closest_point(above);
        assert!((cp - centroid).magnitude() < 1e-5);
    }

    #[test]
    fn closest_point_clamps_to_nearest_vertex() {
        let t = unit_xy_triangle();
        let far = point3f!(-5, -5, 0);
        assert_eq!(t.closest_point(far), t.a);
    }

    #[test]
    fn disjoint_triangles_do_not_intersect() {
        let t1 = unit_xy_triangle();
        let t2 = Triangle::new(point3f!(10, 0, 0), point3f!(11, 0, 0), point3f!(10, 1, 0));
        assert!(!t1.intersects(&t2));
    }

    #[test]
    fn overlapping_coplanar_triangles_intersect() {
        let t1 = unit_xy_triangle();
        let t2 = Triangle::new(point3f!(0.2, 0.2, 0), point3f!(1.2, 0.2, 0), point3f!(0.2, 1.2, 0));
        assert!(t1.intersects(&t2));
    }
}
