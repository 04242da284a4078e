use crate::broadphase::BroadPhase;
use crate::contact::ContactGeom;
use crate::diagnostics::PENETRATION_WARNINGS;
use crate::geometry_data::GeomId;
use crate::mesh::Mesh;
use crate::normal::mesh_mesh::contact_normal;
use crate::tolerances::Tolerances;
use crate::Point3f;
use cgmath::{EuclideanSpace, InnerSpace};

/// A candidate contact, local-frame witnesses: `cp1` in `m1`'s local frame, `cp2` in
/// `m2`'s local frame.
struct Candidate {
    tri1: u32,
    tri2: u32,
    cp1: Point3f,
    cp2: Point3f,
}

/// Generates contacts between two triangle meshes (`spec.md` §4.4): broad-phase
/// witness search, optional triangle-vertex augmentation, margin-penetration filter,
/// then per-candidate normal/position/depth synthesis.
pub fn mesh_mesh_collide(
    m1: &Mesh,
    outer_margin1: f32,
    m2: &Mesh,
    outer_margin2: f32,
    g1: GeomId,
    g2: GeomId,
    tol: &Tolerances,
    broad_phase: &dyn BroadPhase,
    out: &mut [ContactGeom],
) -> usize {
    let max_contacts = out.len();
    let margin = outer_margin1 + outer_margin2;
    let pairs = broad_phase.mesh_mesh_pairs(m1, m2, margin);
    if pairs.is_empty() {
        return 0;
    }

    let t21 = m1.transform.to_local_of(&m2.transform);
    let t12 = m2.transform.to_local_of(&m1.transform);

    let mut candidates: Vec<Candidate> = pairs
        .iter()
        .map(|w| Candidate {
            tri1: w.tri1,
            tri2: w.tri2,
            cp1: m1.transform.inverse().apply_point(w.p1),
            cp2: m2.transform.inverse().apply_point(w.p2),
        })
        .collect();

    if tol.enable_vertex_augmentation {
        augment_with_triangle_vertices(m1, m2, &t12, &t21, margin, tol, &mut candidates);
    }

    filter_penetrating(m1, &t12, m2, tol, &mut candidates);

    let mut k = 0;
    for c in &candidates {
        if k == max_contacts {
            break;
        }
        let p1 = m1.transform.apply_point(c.cp1);
        let p2 = m2.transform.apply_point(c.cp2);
        let mut n = p1 - p2;
        let d = n.magnitude();
        if d < tol.normal_from_geometry {
            n = contact_normal(m1, m2, c.cp1, c.cp2, c.tri1, c.tri2, tol);
        } else if d > margin {
            continue;
        } else {
            n /= d;
        }
        let len = n.magnitude();
        if len < tol.zero_normal || !len.is_finite() {
            continue;
        }
        let pos = Point3f::from_vec(0.5 * (p1.to_vec() + p2.to_vec()) + ((outer_margin2 - outer_margin1) * 0.5) * n);
        let depth = (margin - d).max(0.0);
        out[k] = ContactGeom {
            pos,
            normal: n,
            depth,
            side1: c.tri1 as i32,
            side2: c.tri2 as i32,
            g1,
            g2,
        };
        k += 1;
    }
    k
}

/// Additional candidate witnesses from projecting each triangle's own vertices onto
/// the other triangle, deduplicated against the existing witness and each other.
/// Off by default (`Tolerances::enable_vertex_augmentation`).
///
/// One dedup check below intentionally compares witnesses from the two different
/// local frames (`cpc` in `m1`'s frame against `cpb2` in `m2`'s frame) instead of the
/// matching pair -- preserved here rather than silently corrected, see DESIGN.md.
fn augment_with_triangle_vertices(
    m1: &Mesh,
    m2: &Mesh,
    t12: &crate::geometry::RigidTransform,
    t21: &crate::geometry::RigidTransform,
    margin: f32,
    tol: &Tolerances,
    candidates: &mut Vec<Candidate>,
) {
    let tol2 = margin * margin;
    let cptol = tol.closest_point_dedup;
    let close = |a: Point3f, b: Point3f| (a - b).magnitude() < cptol;

    let base: Vec<Candidate> =
        candidates.iter().map(|c| Candidate { tri1: c.tri1, tri2: c.tri2, cp1: c.cp1, cp2: c.cp2 }).collect();

    for c in &base {
        let tri1 = m1.triangle(c.tri1);
        let tri2 = m2.triangle(c.tri2);
        let tri1loc = crate::geometry::Triangle::new(t12.apply_point(tri1.a), t12.apply_point(tri1.b), t12.apply_point(tri1.c));
        let tri2loc = crate::geometry::Triangle::new(t21.apply_point(tri2.a), t21.apply_point(tri2.b), t21.apply_point(tri2.c));

        let cpa = tri1.closest_point(tri2loc.a);
        let cpb = tri1.closest_point(tri2loc.b);
        let cpc = tri1.closest_point(tri2loc.c);
        let cpa2 = tri2.closest_point(tri1loc.a);
        let cpb2 = tri2.closest_point(tri1loc.b);
        let cpc2 = tri2.closest_point(tri1loc.c);

        let mut usecpa = (cpa - tri2loc.a).magnitude2() < tol2;
        let mut usecpb = (cpb - tri2loc.b).magnitude2() < tol2;
        let mut usecpc = (cpc - tri2loc.c).magnitude2() < tol2;
        let mut usecpa2 = (cpa2 - tri1loc.a).magnitude2() < tol2;
        let mut usecpb2 = (cpb2 - tri1loc.b).magnitude2() < tol2;
        let mut usecpc2 = (cpc2 - tri1loc.c).magnitude2() < tol2;

        if usecpa && close(cpa, c.cp1) {
            usecpa = false;
        }
        if usecpb && close(cpb, c.cp1) {
            usecpb = false;
        }
        if usecpc && close(cpc, c.cp1) {
            usecpc = false;
        }
        if usecpa2 && close(cpa2, c.cp2) {
            usecpa2 = false;
        }
        if usecpb2 && close(cpb2, c.cp2) {
            usecpb2 = false;
        }
        if usecpc2 && close(cpc2, c.cp2) {
            usecpc2 = false;
        }

        if usecpa {
            if usecpb && close(cpb, cpa) {
                usecpb = false;
            }
            if usecpc && close(cpc, cpa) {
                usecpc = false;
            }
        }
        if usecpb {
            if usecpc && close(cpc, cpb) {
                usecpc = false;
            }
        }
        if usecpa2 {
            if usecpb2 && close(cpb2, cpa2) {
                usecpb2 = false;
            }
            if usecpc2 && close(cpc2, cpa2) {
                usecpc2 = false;
            }
        }
        if usecpb {
            if usecpc2 && close(cpc, cpb2) {
                usecpc2 = false;
            }
        }

        if usecpa {
            candidates.push(Candidate { tri1: c.tri1, tri2: c.tri2, cp1: cpa, cp2: tri2.a });
        }
        if usecpb {
            candidates.push(Candidate { tri1: c.tri1, tri2: c.tri2, cp1: cpb, cp2: tri2.b });
        }
        if usecpc {
            candidates.push(Candidate { tri1: c.tri1, tri2: c.tri2, cp1: cpc, cp2: tri2.c });
        }
        if usecpa2 {
            candidates.push(Candidate { tri1: c.tri1, tri2: c.tri2, cp1: tri1.a, cp2: cpa2 });
        }
        if usecpb2 {
            candidates.push(Candidate { tri1: c.tri1, tri2: c.tri2, cp1: tri1.b, cp2: cpb2 });
        }
        if usecpc2 {
            candidates.push(Candidate { tri1: c.tri1, tri2: c.tri2, cp1: tri1.c, cp2: cpc2 });
        }
    }
}

/// Drops (or just flags, depending on `Tolerances::drop_penetrating_contacts`)
/// candidates whose source triangles already overlap past the margin -- when that
/// happens the broad phase's witness distance can't be trusted.
fn filter_penetrating(m1: &Mesh, t12: &crate::geometry::RigidTransform, m2: &Mesh, tol: &Tolerances, candidates: &mut Vec<Candidate>) {
    let mut penetrating = false;
    let checked: Vec<bool> = candidates
        .iter()
        .map(|c| {
            let tri1 = m1.triangle(c.tri1);
            let tri1loc = crate::geometry::Triangle::new(t12.apply_point(tri1.a), t12.apply_point(tri1.b), t12.apply_point(tri1.c));
            let tri2 = m2.triangle(c.tri2);
            let hit = tri1loc.intersects(&tri2);
            if hit {
                penetrating = true;
            }
            hit
        })
        .collect();

    if penetrating && PENETRATION_WARNINGS.tick(tol.penetration_warn_every) {
        tracing::warn!("mesh-mesh contact: triangles penetrate margin, contact detector may be unreliable");
    }

    if tol.drop_penetrating_contacts {
        let mut i = 0;
        candidates.retain(|_| {
            let keep = !checked[i];
            i += 1;
            keep
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broadphase::BruteForceBroadPhase;
    use crate::point3f;

    fn flat_mesh_at(z: f32) -> Mesh {
        let vertices = vec![point3f!(-1, -1, z), point3f!(1, -1, z), point3f!(1, 1, z), point3f!(-1, 1, z)];
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
    fn generates_contact_between_nearby_parallel_planes() {
        let m1 = flat_mesh_at(0.0);
        let m2 = flat_mesh_at(0.08);
        let tol = Tolerances::default();
        let bp = BruteForceBroadPhase;
        let mut out = scratch_buffer(16);
        let n = mesh_mesh_collide(&m1, 0.05, &m2, 0.05, GeomId(1), GeomId(2), &tol, &bp, &mut out);
        assert!(n > 0);
        for c in &out[..n] {
            assert!(c.depth >= 0.0);
            assert!(c.normal.magnitude() > 0.5);
        }
    }

    #[test]
    fn no_contact_when_meshes_are_far_apart() {
        let m1 = flat_mesh_at(0.0);
        let m2 = flat_mesh_at(10.0);
        let tol = Tolerances::default();
        let bp = BruteForceBroadPhase;
        let mut out = scratch_buffer(16);
        let n = mesh_mesh_collide(&m1, 0.05, &m2, 0.05, GeomId(1), GeomId(2), &tol, &bp, &mut out);
        assert_eq!(n, 0);
    }

    #[test]
    fn respects_max_contacts_cap() {
        let m1 = flat_mesh_at(0.0);
        let m2 = flat_mesh_at(0.08);
        let tol = Tolerances::default();
        let bp = BruteForceBroadPhase;
        let mut out = scratch_buffer(1);
        let n = mesh_mesh_collide(&m1, 0.05, &m2, 0.05, GeomId(1), GeomId(2), &tol, &bp, &mut out);
        assert_eq!(n, 1);
        assert_eq!(out.len(), 1);
    }
}
