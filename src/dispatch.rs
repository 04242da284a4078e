//! Top-level entry points a host engine calls per candidate geometry pair
//! (`spec.md` §4.6-§4.7): routes on the `Geometry` variant of each side, then stamps
//! the caller-supplied `GeomId`s onto every contact it produces.

use crate::broadphase::BroadPhase;
use crate::contact::mesh_mesh::mesh_mesh_collide;
use crate::contact::mesh_point_cloud::{mesh_point_cloud_collide, point_cloud_mesh_collide};
use crate::contact::ContactGeom;
use crate::geometry::{Bounds3, RigidTransform};
use crate::geometry_data::{CustomGeometryData, GeomId, Geometry};
use crate::tolerances::Tolerances;

/// Sets each geometry's current transform, then dispatches to the contact generator
/// for the pair's variant combination. Unimplemented pairs (anything touching
/// `Primitive`/`ImplicitSurface`) log once and return 0, matching the source's
/// `fprintf(stderr, "TODO: ...")` stubs.
pub fn collide(
    d1: &mut CustomGeometryData,
    t1: RigidTransform,
    g1: GeomId,
    d2: &mut CustomGeometryData,
    t2: RigidTransform,
    g2: GeomId,
    tol: &Tolerances,
    broad_phase: &dyn BroadPhase,
    out: &mut [ContactGeom],
) -> usize {
    set_transform(&mut d1.geometry, t1);
    set_transform(&mut d2.geometry, t2);
    let margin1 = geometry_margin(&d1.geometry) + d1.outer_margin;
    let margin2 = geometry_margin(&d2.geometry) + d2.outer_margin;

    match (&d1.geometry, &d2.geometry) {
        (Geometry::TriangleMesh(m1), Geometry::TriangleMesh(m2)) => {
            mesh_mesh_collide(m1, margin1, m2, margin2, g1, g2, tol, broad_phase, out)
        }
        (Geometry::TriangleMesh(m1), Geometry::PointCloud(pc2)) => {
            mesh_point_cloud_collide(m1, margin1, pc2, margin2, g1, g2, tol, broad_phase, out)
        }
        (Geometry::PointCloud(pc1), Geometry::TriangleMesh(m2)) => {
            point_cloud_mesh_collide(pc1, margin1, m2, margin2, g1, g2, tol, broad_phase, out)
        }
        (a, b) => {
            tracing::warn!("unsupported geometry pair for collision: {} / {}", a.type_name(), b.type_name());
            0
        }
    }
}

/// Axis-aligned world-frame bounding box of `d`, for the host engine's broad-phase
/// insertion (`spec.md` §4.7). Inflated by the geometry's own margin plus
/// `d.outer_margin`, matching the source's `AABB()` callback.
pub fn aabb(d: &CustomGeometryData, t: RigidTransform) -> [f32; 6] {
    let margin = geometry_margin(&d.geometry) + d.outer_margin;
    let local = match &d.geometry {
        Geometry::TriangleMesh(m) => mesh_local_bounds(m),
        Geometry::PointCloud(pc) => point_cloud_local_bounds(pc),
        Geometry::Primitive | Geometry::ImplicitSurface => Bounds3::empty(),
    };
    world_bounds(&local, t).inflate(margin).to_flat_array()
}

fn set_transform(g: &mut Geometry, t: RigidTransform) {
    match g {
        Geometry::TriangleMesh(m) => m.transform = t,
        Geometry::PointCloud(pc) => pc.transform = t,
        Geometry::Primitive | Geometry::ImplicitSurface => {}
    }
}

/// Per-geometry intrinsic margin. Neither `Mesh` nor `PointCloud` carries one of its
/// own in this crate (that distinction lives on the host's richer geometry type, out
/// of scope per `spec.md` §1); `outer_margin` on `CustomGeometryData` is the only
/// margin this crate adds.
fn geometry_margin(_g: &Geometry) -> f32 {
    0.0
}

fn mesh_local_bounds(m: &crate::mesh::Mesh) -> Bounds3 {
    let mut b = Bounds3::empty();
    for t in 0..m.n_triangles() as u32 {
        let tri = m.triangle(t);
        b = b.join_point(tri.a).join_point(tri.b).join_point(tri.c);
    }
    b
}

fn point_cloud_local_bounds(pc: &crate::point_cloud::PointCloud) -> Bounds3 {
    let mut b = Bounds3::empty();
    for &p in &pc.points {
        b = b.join_point(p);
    }
    b
}

fn world_bounds(local: &Bounds3, t: RigidTransform) -> Bounds3 {
    let corners = [
        (local.min.x, local.min.y, local.min.z),
        (local.min.x, local.min.y, local.max.z),
        (local.min.x, local.max.y, local.min.z),
        (local.min.x, local.max.y, local.max.z),
        (local.max.x, local.min.y, local.min.z),
        (local.max.x, local.min.y, local.max.z),
        (local.max.x, local.max.y, local.min.z),
        (local.max.x, local.max.y, local.max.z),
    ];
    let mut b = Bounds3::empty();
    for (x, y, z) in corners {
        b = b.join_point(t.apply_point(crate::Point3f::new(x, y, z)));
    }
    b
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broadphase::BruteForceBroadPhase;
    use crate::mesh::Mesh;
    use crate::point3f;

    fn flat_mesh_at(z: f32) -> Mesh {
        let vertices = vec![point3f!(-1, -1, z), point3f!(1, -1, z), point3f!(1, 1, z), point3f!(-1, 1, z)];
        Mesh::new(vec![[0, 1, 2], [0, 2, 3]], vertices).unwrap()
    }

    #[test]
    fn unsupported_pair_returns_zero_contacts() {
        let mut d1 = CustomGeometryData::new(Geometry::Primitive, 0.0);
        let mut d2 = CustomGeometryData::new(Geometry::TriangleMesh(flat_mesh_at(0.0)), 0.0);
        let tol = Tolerances::default();
        let bp = BruteForceBroadPhase;
        let mut out = Vec::new();
        let n = collide(&mut d1, RigidTransform::identity(), GeomId(1), &mut d2, RigidTransform::identity(), GeomId(2), &tol, &bp, &mut out);
        assert_eq!(n, 0);
    }

    #[test]
    fn aabb_covers_mesh_extent() {
        let d = CustomGeometryData::new(Geometry::TriangleMesh(flat_mesh_at(0.0)), 0.1);
        let bounds = aabb(&d, RigidTransform::identity());
        assert!(bounds[0] <= -1.0 - 0.1 + 1e-4);
        assert!(bounds[1] >= 1.0 + 0.1 - 1e-4);
    }
}
