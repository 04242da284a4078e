use crate::geometry::Segment;
use crate::mesh::Mesh;
use crate::Point3f;
use cgmath::{EuclideanSpace, InnerSpace};

/// A candidate close-enough triangle pair, in world frame, as found by a `BroadPhase`
/// implementation. `dist` is the distance between the witness points.
#[derive(Clone, Copy, Debug)]
pub struct TrianglePairWitness {
    pub tri1: u32,
    pub tri2: u32,
    pub p1: Point3f,
    pub p2: Point3f,
    pub dist: f32,
}

/// A candidate mesh triangle close to a probe point, in world frame.
#[derive(Clone, Copy, Debug)]
pub struct TrianglePointWitness {
    pub tri: u32,
    pub closest: Point3f,
    pub dist: f32,
}

/// The distance-query oracle the contact generators build on (`spec.md` §1's
/// Out-of-scope broad phase). A host engine with its own BVH implements this trait
/// directly; `BruteForceBroadPhase` is the crate's self-contained reference.
pub trait BroadPhase {
    /// Every triangle pair between `m1` and `m2` (both already in world frame via their
    /// own `transform`) whose closest-point distance is within `tol`.
    fn mesh_mesh_pairs(&self, m1: &Mesh, m2: &Mesh, tol: f32) -> Vec<TrianglePairWitness>;

    /// Every triangle of `m` within `tol` of `world_point`, capped at `max` results.
    fn nearby_triangles(&self, m: &Mesh, world_point: Point3f, tol: f32, max: usize) -> Vec<TrianglePointWitness>;
}

/// O(n*m) reference implementation: tests every triangle pair (or every triangle
/// against the probe point) directly. Not a performance target -- exists so the crate
/// is runnable and testable without a host engine's BVH (`spec.md` §4.8).
pub struct BruteForceBroadPhase;

impl BroadPhase for BruteForceBroadPhase {
    fn mesh_mesh_pairs(&self, m1: &Mesh, m2: &Mesh, tol: f32) -> Vec<TrianglePairWitness> {
        let mut out = Vec::new();
        for t1 in 0..m1.n_triangles() as u32 {
            let tri1 = m1.world_triangle(t1);
            for t2 in 0..m2.n_triangles() as u32 {
                let tri2 = m2.world_triangle(t2);
                let (p1, p2) = closest_points_triangle_triangle(&tri1, &tri2);
                let dist = (p1 - p2).magnitude();
                if dist <= tol {
                    out.push(TrianglePairWitness { tri1: t1, tri2: t2, p1, p2, dist });
                }
            }
        }
        out
    }

    fn nearby_triangles(&self, m: &Mesh, world_point: Point3f, tol: f32, max: usize) -> Vec<TrianglePointWitness> {
        let mut out = Vec::new();
        for t in 0..m.n_triangles() as u32 {
            let tri = m.world_triangle(t);
            let closest = tri.closest_point(world_point);
            let dist = (closest - world_point).magnitude();
            if dist <= tol {
                out.push(TrianglePointWitness { tri: t, closest, dist });
            }
        }
        out.sort_by(|a, b| a.dist.partial_cmp(&b.dist).unwrap());
        out.truncate(max);
        out
    }
}

/// Closest points between two (possibly intersecting) triangles: the minimum over each
/// triangle's vertices projected onto the other and every edge-edge pair. Not the
/// tightest possible algorithm but exact for disjoint triangles and good enough as a
/// witness generator for the margin-based filter downstream.
fn closest_points_triangle_triangle(t1: &crate::geometry::Triangle, t2: &crate::geometry::Triangle) -> (Point3f, Point3f) {
    let mut best: Option<(Point3f, Point3f, f32)> = None;
    let mut consider = |p1: Point3f, p2: Point3f| {
        let d = (p1 - p2).magnitude2();
        if best.map_or(true, |(_, _, bd)| d < bd) {
            best = Some((p1, p2, d));
        }
    };

    for &v in &[t1.a, t1.b, t1.c] {
        consider(v, t2.closest_point(v));
    }
    for &v in &[t2.a, t2.b, t2.c] {
        consider(t1.closest_point(v), v);
    }
    for i in 0..3 {
        let e1 = t1.edge(i);
        for j in 0..3 {
            let e2 = t2.edge(j);
            let (p1, p2) = e1.closest_points(&e2);
            consider(p1, p2);
        }
    }

    let (p1, p2, _) = best.expect("triangle has at least one vertex");
    (p1, p2)
}

/// Closest point on mesh `m` (world frame) to a segment, used by point-probe callers
/// that already have a segment witness rather than a single point. Currently unused by
/// the brute-force oracle itself but kept as a primitive other `BroadPhase`
/// implementations can build on.
pub fn closest_point_on_mesh_to_segment(m: &Mesh, seg: &Segment) -> (u32, Point3f, Point3f) {
    let mut best: Option<(u32, Point3f, Point3f, f32)> = None;
    for t in 0..m.n_triangles() as u32 {
        let tri = m.world_triangle(t);
        for i in 0..3 {
            let (p1, p2) = tri.edge(i).closest_points(seg);
            let d = (p1 - p2).magnitude2();
            if best.map_or(true, |(_, _, _, bd)| d < bd) {
                best = Some((t, p1, p2, d));
            }
        }
    }
    let (t, p1, p2, _) = best.expect("mesh has at least one triangle");
    (t, p1, p2)
}
