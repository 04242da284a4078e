//! Synthesizes `ContactGeom`s from the witness points a `BroadPhase` query and a normal
//! resolver agree on. `spec.md` §4.4-§4.5.

pub mod mesh_mesh;
pub mod mesh_point_cloud;

use crate::geometry_data::GeomId;
use crate::{Point3f, Vec3f};

/// One contact point, matching ODE's `dContactGeom` layout (`spec.md` §3):
/// world-frame position, unit normal pointing from geometry 2 into geometry 1,
/// penetration depth, and the triangle/point indices each side's witness came from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactGeom {
    pub pos: Point3f,
    pub normal: Vec3f,
    pub depth: f32,
    pub side1: i32,
    pub side2: i32,
    pub g1: GeomId,
    pub g2: GeomId,
}

/// Swaps side1/side2 and g1/g2 and negates the normal, turning a contact described
/// "1 against 2" into the same contact described "2 against 1". Used by
/// `point_cloud_mesh_collide`, which is implemented as a call to
/// `mesh_point_cloud_collide` with the arguments swapped.
pub fn reverse_contact(c: &mut ContactGeom) {
    std::mem::swap(&mut c.g1, &mut c.g2);
    std::mem::swap(&mut c.side1, &mut c.side2);
    c.normal = -c.normal;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point3f;

    #[test]
    fn reverse_contact_swaps_sides_and_negates_normal() {
        let mut c = ContactGeom {
            pos: point3f!(0, 0, 0),
            normal: Vec3f::new(0.0, 0.0, 1.0),
            depth: 0.1,
            side1: 3,
            side2: 7,
            g1: GeomId(1),
            g2: GeomId(2),
        };
        reverse_contact(&mut c);
        assert_eq!(c.side1, 7);
        assert_eq!(c.side2, 3);
        assert_eq!(c.g1, GeomId(2));
        assert_eq!(c.g2, GeomId(1));
        assert_eq!(c.normal, Vec3f::new(0.0, 0.0, -1.0));
    }
}
