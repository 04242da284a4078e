use crate::broadphase::BroadPhase;
use crate::contact::{reverse_contact, ContactGeom};
use crate::geometry_data::GeomId;
use crate::mesh::Mesh;
use crate::normal::mesh_point;
use crate::point_cloud::PointCloud;
use crate::tolerances::Tolerances;
use crate::Point3f;
use cgmath::{EuclideanSpace, InnerSpace};

/// Generates contacts between a triangle mesh and a point cloud (`spec.md` §4.5): for
/// each cloud point, find nearby mesh triangles via the broad phase and synthesize a
/// contact per triangle within margin.
pub fn mesh_point_cloud_collide(
    m1: &Mesh,
    outer_margin1: f32,
    pc2: &PointCloud,
    outer_margin2: f32,
    g1: GeomId,
    g2: GeomId,
    tol: &Tolerances,
    broad_phase: &dyn BroadPhase,
    out: &mut [ContactGeom],
) -> usize {
    let margin = outer_margin1 + outer_margin2;
    let max_contacts = out.len();
    let mut k = 0;

    for i in 0..pc2.points.len() {
        if k == max_contacts {
            break;
        }
        let pw = pc2.world_point(i);
        let nearby = broad_phase.nearby_triangles(m1, pw, margin, max_contacts - k);
        for hit in nearby {
            if k == max_contacts {
                break;
            }
            let n_raw = hit.closest - pw;
            let d = n_raw.magnitude();
            let n = if d < tol.normal_from_geometry {
                let p_local = m1.transform.inverse().apply_point(hit.closest);
                mesh_point::contact_normal(m1, p_local, hit.tri, pw, tol)
            } else if d > margin {
                continue;
            } else {
                n_raw / d
            };
            let len = n.magnitude();
            if len < tol.zero_normal || !len.is_finite() {
                continue;
            }
            let pos = Point3f::from_vec(0.5 * (hit.closest.to_vec() + pw.to_vec()) + ((outer_margin2 - outer_margin1) * 0.5) * n);
            let depth = (margin - d).max(0.0);
            out[k] = ContactGeom { pos, normal: n, depth, side1: hit.tri as i32, side2: i as i32, g1, g2 };
            k += 1;
        }
    }
    k
}

/// `mesh_point_cloud_collide` with the operands swapped, then each resulting contact
/// reversed so it still reads "point cloud against mesh" on the caller's terms.
pub fn point_cloud_mesh_collide(
    pc1: &PointCloud,
    outer_margin1: f32,
    m2: &Mesh,
    outer_margin2: f32,
    g1: GeomId,
    g2: GeomId,
    tol: &Tolerances,
    broad_phase: &dyn BroadPhase,
    out: &mut [ContactGeom],
) -> usize {
    let n = mesh_point_cloud_collide(m2, outer_margin2, pc1, outer_margin1, g2, g1, tol, broad_phase, out);
    for c in &mut out[..n] {
        reverse_contact(c);
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broadphase::BruteForceBroadPhase;
    use crate::point3f;

    fn flat_mesh() -> Mesh {
        let vertices = vec![point3f!(-1, -1, 0), point3f!(1, -1, 0), point3f!(1, 1, 0), point3f!(-1, 1, 0)];
        Mesh::new(vec![[0, 1, 2], [0, 2, 3]], vertices).unwrap()
    }

    fn scratch_buffer(n: usize) -> Vec<ContactGeom> {
        vec![
            ContactGeom {
                pos: point3f!(0, 0, 0),
                normal: crate::Vec3f::new(0.0, 0.0, 0.0),
                depth: 0.0,
                side1: 0,
                side2: 0,
                g1: GeomId(0),
                g2: GeomId(0),
            };
            n
        ]
    }

    #[test]
    fn point_above_face_contacts_with_upward_normal() {
        let m = flat_mesh();
        let pc = PointCloud::new(vec![point3f!(0, 0, 0.05)]);
        let tol = Tolerances::default();
        let bp = BruteForceBroadPhase;
        let mut out = scratch_buffer(4);
        let n = mesh_point_cloud_collide(&m, 0.1, &pc, 0.1, GeomId(1), GeomId(2), &tol, &bp, &mut out);
        assert!(n > 0);
        assert!(out[0].normal.z > 0.0);
    }

    #[test]
    fn point_cloud_mesh_collide_reverses_sides() {
        let m = flat_mesh();
        let pc = PointCloud::new(vec![point3f!(0, 0, 0.05)]);
        let tol = Tolerances::default();
        let bp = BruteForceBroadPhase;
        let mut direct = scratch_buffer(4);
        let n1 = mesh_point_cloud_collide(&m, 0.1, &pc, 0.1, GeomId(1), GeomId(2), &tol, &bp, &mut direct);
        let mut reversed = scratch_buffer(4);
        let n2 = point_cloud_mesh_collide(&pc, 0.1, &m, 0.1, GeomId(2), GeomId(1), &tol, &bp, &mut reversed);
        assert_eq!(n1, n2);
        assert!((reversed[0].normal + direct[0].normal).magnitude() < 1e-5);
        assert_eq!(reversed[0].g1, direct[0].g2);
    }
}
