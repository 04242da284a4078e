//! Derives a unit contact normal from mesh topology when the raw witness-point
//! difference is numerically unreliable (coincident witnesses, grazing faces, parallel
//! edges). `spec.md` §4.2-§4.3.

pub mod mesh_mesh;
pub mod mesh_point;

use crate::mesh::Mesh;
use crate::Vec3f;
use cgmath::InnerSpace;

/// Average of the (local-frame, unit) normals of every triangle incident to vertex
/// `vnum` of triangle `tri`, re-normalized and rotated into world frame.
pub(crate) fn vertex_normal(m: &Mesh, tri: u32, vnum: usize) -> Vec3f {
    let v = m.vertex_index(tri, vnum);
    let n: Vec3f = m.incident_tris(v).iter().map(|&t| m.triangle_normal(t)).sum();
    m.transform.apply_vector(n.normalize())
}

/// Normal of triangle `tri` averaged with its neighbor across edge `e`, if any, then
/// rotated into world frame. A boundary edge (no neighbor) just uses `tri`'s own
/// (already-unit) normal, unnormalized-again — matching the source, which only
/// re-normalizes in the two-triangle branch.
pub(crate) fn edge_normal(m: &Mesh, tri: u32, e: usize) -> Vec3f {
    let mut n = m.triangle_normal(tri);
    if let Some(neighbor) = m.tri_neighbor(tri, e) {
        n += m.triangle_normal(neighbor);
        n = n.normalize();
    }
    m.transform.apply_vector(n)
}
