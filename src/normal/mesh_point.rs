use crate::diagnostics::DEGENERATE_FEATURE_WARNINGS;
use crate::feature::FeatureType;
use crate::mesh::Mesh;
use crate::normal::{edge_normal, vertex_normal};
use crate::tolerances::Tolerances;
use crate::{Point3f, Vec3f};

/// Contact normal for a mesh/point-cloud witness pair, pointing out of the mesh toward
/// the point. `p` is the witness on `m`'s triangle `tri`, in `m`'s local frame.
///
/// `probe` is the point-cloud witness in world frame. The source's equivalent function
/// takes the analogous parameter but never reads it -- the returned normal depends only
/// on which mesh feature was hit, not on the probe's position. Kept here, unused, for
/// signature fidelity (`spec.md` §4.3, §9).
pub fn contact_normal(m: &Mesh, p: Point3f, tri: u32, _probe: Point3f, tol: &Tolerances) -> Vec3f {
    let t = m.triangle(tri);
    let b = t.barycentric_coords(p);
    match FeatureType::classify(b, tol.barycentric_zero) {
        Some(FeatureType::Vertex(v)) => -vertex_normal(m, tri, v),
        Some(FeatureType::Edge(e)) => -edge_normal(m, tri, e),
        Some(FeatureType::Face) => m.transform.apply_vector(-t.normal()),
        None => {
            if DEGENERATE_FEATURE_WARNINGS.tick(tol.degenerate_warn_every) {
                tracing::warn!("mesh-point contact normal: degenerate witness triangle");
            }
            Vec3f::new(0.0, 0.0, 0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point3f;
    use cgmath::InnerSpace;

    fn flat_mesh() -> Mesh {
        let vertices = vec![point3f!(-1, -1, 0), point3f!(1, -1, 0), point3f!(1, 1, 0), point3f!(-1, 1, 0)];
        Mesh::new(vec![[0, 1, 2], [0, 2, 3]], vertices).unwrap()
    }

    #[test]
    fn face_witness_returns_negated_mesh_normal() {
        let m = flat_mesh();
        let tol = Tolerances::default();
        let n = contact_normal(&m, point3f!(0, 0, 0), 0, point3f!(0, 0, 5), &tol);
        assert!((n - Vec3f::new(0.0, 0.0, -1.0)).magnitude() < 1e-5);
    }

    #[test]
    fn probe_position_does_not_affect_result() {
        let m = flat_mesh();
        let tol = Tolerances::default();
        let n1 = contact_normal(&m, point3f!(0, 0, 0), 0, point3f!(0, 0, 5), &tol);
        let n2 = contact_normal(&m, point3f!(0, 0, 0), 0, point3f!(100, -40, -3), &tol);
        assert_eq!(n1, n2);
    }
}
