//! Contact generation bridge between triangle-mesh/point-cloud geometries and a
//! rigid-body dynamics engine. A host registers geometries via [`geometry_data`],
//! supplies a [`broadphase::BroadPhase`] distance-query oracle (or uses the bundled
//! brute-force one), and calls [`dispatch::collide`] per candidate geometry pair each
//! step; [`dispatch::aabb`] drives broad-phase insertion.

#[macro_use]
pub mod macros;

pub mod broadphase;
pub mod contact;
pub mod diagnostics;
pub mod dispatch;
pub mod feature;
pub mod geometry;
pub mod geometry_data;
pub mod mesh;
pub mod normal;
pub mod point_cloud;
pub mod tolerances;

pub type Float = f32;
pub type Point3f = cgmath::Point3<f32>;
pub type Vec3f = cgmath::Vector3<f32>;

pub use contact::ContactGeom;
pub use dispatch::{aabb, collide};
pub use geometry_data::{CustomGeometryData, GeomId, Geometry};
pub use tolerances::Tolerances;
