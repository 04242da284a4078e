use crate::geometry::{RigidTransform, Triangle};
use crate::Point3f;
use smallvec::SmallVec;
use std::collections::HashMap;

/// A triangle mesh in its own local frame, plus the topology tables the normal
/// resolver needs: for each vertex, every triangle that contains it; for each
/// triangle, the (up to three) neighbors across each edge.
///
/// Topology is computed once by `Mesh::new` and is immutable afterwards — there is no
/// setter for `triangles`/`vertices` once built. `transform` is the only mutable field,
/// set once per collision call by the dispatcher.
#[derive(Debug)]
pub struct Mesh {
    triangles: Vec<[u32; 3]>,
    vertices: Vec<Point3f>,
    incident_tris: Vec<SmallVec<[u32; 8]>>,
    tri_neighbors: Vec<[i32; 3]>,
    pub transform: RigidTransform,
}

#[derive(thiserror::Error, Debug)]
pub enum MeshError {
    #[error("triangle vertex index {index} out of range for {vertex_count} vertices")]
    VertexIndexOutOfRange { index: u32, vertex_count: usize },
}

impl Mesh {
    pub fn new(triangles: Vec<[u32; 3]>, vertices: Vec<Point3f>) -> Result<Self, MeshError> {
        for tri in &triangles {
            for &idx in tri {
                if idx as usize >= vertices.len() {
                    return Err(MeshError::VertexIndexOutOfRange { index: idx, vertex_count: vertices.len() });
                }
            }
        }
        let incident_tris = build_incident_tris(&triangles, vertices.len());
        let tri_neighbors = build_tri_neighbors(&triangles);
        Ok(Self {
            triangles,
            vertices,
            incident_tris,
            tri_neighbors,
            transform: RigidTransform::identity(),
        })
    }

    pub fn n_triangles(&self) -> usize {
        self.triangles.len()
    }

    pub fn triangle(&self, tri: u32) -> Triangle {
        let [i0, i1, i2] = self.triangles[tri as usize];
        Triangle::new(self.vertices[i0 as usize], self.vertices[i1 as usize], self.vertices[i2 as usize])
    }

    /// World-frame triangle, i.e. `triangle(tri)` transformed by `self.transform`.
    pub fn world_triangle(&self, tri: u32) -> Triangle {
        let Triangle { a, b, c } = self.triangle(tri);
        Triangle::new(self.transform.apply_point(a), self.transform.apply_point(b), self.transform.apply_point(c))
    }

    /// Local-frame vertex index `vnum` (0, 1, or 2) of triangle `tri`.
    pub fn vertex_index(&self, tri: u32, vnum: usize) -> u32 {
        self.triangles[tri as usize][vnum]
    }

    pub fn incident_tris(&self, vertex: u32) -> &[u32] {
        &self.incident_tris[vertex as usize]
    }

    /// Neighbor across edge `e` of triangle `tri` (`spec.md`'s edge-opposite-vertex
    /// convention), or `None` if that edge is a mesh boundary.
    pub fn tri_neighbor(&self, tri: u32, e: usize) -> Option<u32> {
        let n = self.tri_neighbors[tri as usize][e];
        if n < 0 {
            None
        } else {
            Some(n as u32)
        }
    }

    /// Local-frame unit normal of triangle `tri`, unaffected by `transform`.
    pub fn triangle_normal(&self, tri: u32) -> crate::Vec3f {
        self.triangle(tri).normal()
    }
}

fn build_incident_tris(triangles: &[[u32; 3]], n_vertices: usize) -> Vec<SmallVec<[u32; 8]>> {
    let mut incident = vec![SmallVec::new(); n_vertices];
    for (tri_id, tri) in triangles.iter().enumerate() {
        for &v in tri {
            incident[v as usize].push(tri_id as u32);
        }
    }
    incident
}

/// Edge `i` of a triangle is the edge opposite vertex `i`: edge 0 is `(v1, v2)`,
/// edge 1 is `(v2, v0)`, edge 2 is `(v0, v1)` — matching `Triangle::edge`.
fn edge_vertices(tri: [u32; 3], e: usize) -> (u32, u32) {
    match e {
        0 => (tri[1], tri[2]),
        1 => (tri[2], tri[0]),
        2 => (tri[0], tri[1]),
        _ => unreachable!(),
    }
}

fn build_tri_neighbors(triangles: &[[u32; 3]]) -> Vec<[i32; 3]> {
    let mut edge_owners: HashMap<(u32, u32), (u32, usize)> = HashMap::new();
    let mut neighbors = vec![[-1i32; 3]; triangles.len()];

    for (tri_id, &tri) in triangles.iter().enumerate() {
        for e in 0..3 {
            let (v0, v1) = edge_vertices(tri, e);
            let key = if v0 < v1 { (v0, v1) } else { (v1, v0) };
            match edge_owners.get(&key) {
                Some(&(other_tri, other_e)) => {
                    neighbors[tri_id][e] = other_tri as i32;
                    neighbors[other_tri as usize][other_e] = tri_id as i32;
                }
                None => {
                    edge_owners.insert(key, (tri_id as u32, e));
                }
            }
        }
    }
    neighbors
}
