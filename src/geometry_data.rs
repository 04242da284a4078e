use crate::mesh::Mesh;
use crate::point_cloud::PointCloud;

/// An opaque handle to a registered geometry, supplied by the host engine and simply
/// stamped onto the contacts that reference it (`spec.md` §4.6). The crate never
/// interprets this value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct GeomId(pub u64);

/// The tagged variant the dispatcher switches on. `Primitive` and `ImplicitSurface`
/// carry no payload: per `spec.md` §1/§4.6 they are unimplemented dispatch stubs
/// upstream, kept here only so the 4x4 dispatch table has somewhere to route them.
#[derive(Debug)]
pub enum Geometry {
    Primitive,
    TriangleMesh(Mesh),
    PointCloud(PointCloud),
    ImplicitSurface,
}

impl Geometry {
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Primitive => "primitive",
            Geometry::TriangleMesh(_) => "triangle mesh",
            Geometry::PointCloud(_) => "point cloud",
            Geometry::ImplicitSurface => "implicit surface",
        }
    }

    pub fn as_mesh(&self) -> Option<&Mesh> {
        match self {
            Geometry::TriangleMesh(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_mesh_mut(&mut self) -> Option<&mut Mesh> {
        match self {
            Geometry::TriangleMesh(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_point_cloud(&self) -> Option<&PointCloud> {
        match self {
            Geometry::PointCloud(pc) => Some(pc),
            _ => None,
        }
    }

    pub fn as_point_cloud_mut(&mut self) -> Option<&mut PointCloud> {
        match self {
            Geometry::PointCloud(pc) => Some(pc),
            _ => None,
        }
    }
}

/// What the host engine registers per geometry: the geometry itself plus the extra
/// collision margin applied on top of whatever inner margin the geometry carries.
/// Mirrors the source's `CustomGeometryData { geometry, outerMargin }`.
#[derive(Debug)]
pub struct CustomGeometryData {
    pub geometry: Geometry,
    pub outer_margin: f32,
}

impl CustomGeometryData {
    pub fn new(geometry: Geometry, outer_margin: f32) -> Self {
        debug_assert!(outer_margin >= 0.0, "outer margin must be non-negative");
        Self { geometry, outer_margin }
    }
}
