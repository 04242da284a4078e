use crate::diagnostics::DEGENERATE_FEATURE_WARNINGS;
use crate::feature::FeatureType;
use crate::mesh::Mesh;
use crate::normal::{edge_normal, vertex_normal};
use crate::tolerances::Tolerances;
use crate::{Point3f, Vec3f};
use cgmath::{EuclideanSpace, InnerSpace};

/// Contact normal derived from mesh topology for a mesh/mesh witness pair, used when
/// the two witness points are (numerically) coincident. `p1`/`p2` are in each mesh's
/// own local frame; the returned normal is in world frame and points out of `m2` into
/// `m1` (`spec.md` §4.2's sign convention).
///
/// Returns the zero vector (with a throttled warning) when either witness's
/// barycentric coordinates don't cleanly classify as vertex/edge/face -- in practice
/// unreachable for a valid (sum-to-1) barycentric triple, but handled rather than
/// assumed away, matching the source's fallthrough case.
pub fn contact_normal(m1: &Mesh, m2: &Mesh, p1: Point3f, p2: Point3f, t1: u32, t2: u32, tol: &Tolerances) -> Vec3f {
    let tri1 = m1.triangle(t1);
    let tri2 = m2.triangle(t2);
    let b1 = tri1.barycentric_coords(p1);
    let b2 = tri2.barycentric_coords(p2);
    let (type1, type2) = match (FeatureType::classify(b1, tol.barycentric_zero), FeatureType::classify(b2, tol.barycentric_zero)) {
        (Some(ft1), Some(ft2)) => (ft1, ft2),
        _ => {
            if DEGENERATE_FEATURE_WARNINGS.tick(tol.degenerate_warn_every) {
                tracing::warn!("mesh-mesh contact normal: degenerate witness triangle");
            }
            return Vec3f::new(0.0, 0.0, 0.0);
        }
    };

    use FeatureType::*;
    match type1 {
        // A face witness on m1 always wins, regardless of m2's feature -- this matches
        // the source's switch(type1), which handles `case 3` (face) without even
        // looking at type2.
        Face => {
            if type2 == Face {
                tracing::warn!("mesh-mesh contact normal: face-face witness, falling back to m1's negated normal");
            }
            return m1.transform.apply_vector(-tri1.normal());
        }
        Vertex(v1) => match type2 {
            Vertex(v2) => {
                let n1 = vertex_normal(m1, t1, v1);
                let n2 = vertex_normal(m2, t2, v2);
                return (n2 - n1).normalize();
            }
            Edge(e2) => {
                let n1 = vertex_normal(m1, t1, v1);
                let s = tri2.edge(e2);
                let ev = m2.transform.apply_vector(s.b - s.a);
                let mut n2 = edge_normal(m2, t2, e2);
                n2 -= n1 - ev * (ev.dot(n1) / ev.dot(ev));
                return n2.normalize();
            }
            Face => return m2.transform.apply_vector(tri2.normal()),
        },
        Edge(e1) => match type2 {
            Vertex(v2) => {
                let n2 = vertex_normal(m2, t2, v2);
                let s = tri1.edge(e1);
                let ev = m1.transform.apply_vector(s.b - s.a);
                let n1 = edge_normal(m1, t1, e1);
                let n2 = (n2 - ev * (ev.dot(n2) / ev.dot(ev))) - n1;
                return n2.normalize();
            }
            Edge(e2) => {
                let s1 = tri1.edge(e1);
                let ev1 = m1.transform.apply_vector(s1.b - s1.a).normalize();
                let s2 = tri2.edge(e2);
                let ev2 = m2.transform.apply_vector(s2.b - s2.a).normalize();
                let n = ev1.cross(ev2);
                let len = n.magnitude();
                let mut n = n / len;
                // orient so n points from m2 toward m1.
                let a1 = m1.transform.apply_point(s1.a).to_vec();
                let a2 = m2.transform.apply_point(s2.a).to_vec();
                if n.dot(a1) < n.dot(a2) {
                    n = -n;
                }
                return n;
            }
            Face => return m2.transform.apply_vector(tri2.normal()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point3f;

    fn flat_mesh_at(z: f32) -> Mesh {
        let vertices = vec![point3f!(-1, -1, z), point3f!(1, -1, z), point3f!(1, 1, z), point3f!(-1, 1, z)];
        Mesh::new(vec![[0, 1, 2], [0, 2, 3]], vertices).unwrap()
    }

    #[test]
    fn face_face_falls_back_to_m1_negated_normal() {
        let m1 = flat_mesh_at(0.0);
        let m2 = flat_mesh_at(1.0);
        let tol = Tolerances::default();
        let p = point3f!(0, 0, 0);
        let n = contact_normal(&m1, &m2, p, p, 0, 0, &tol);
        assert!((n - Vec3f::new(0.0, 0.0, -1.0)).magnitude() < 1e-5);
    }

    #[test]
    fn vertex_face_returns_m2_face_normal() {
        let m1 = flat_mesh_at(0.0);
        let m2 = flat_mesh_at(1.0);
        let tol = Tolerances::default();
        // vertex of m1's triangle 0, face witness on m2.
        let n = contact_normal(&m1, &m2, m1.triangle(0).a, point3f!(0, 0, 1), 0, 0, &tol);
        assert!((n - Vec3f::new(0.0, 0.0, 1.0)).magnitude() < 1e-5);
    }

    #[test]
    fn coincident_vertex_witness_normalizes_without_panicking() {
        let m1 = flat_mesh_at(0.0);
        let m2 = flat_mesh_at(0.0);
        let tol = Tolerances::default();
        let p = m1.triangle(0).a;
        let n = contact_normal(&m1, &m2, p, p, 0, 0, &tol);
        assert!(n.magnitude().is_finite());
    }
}
