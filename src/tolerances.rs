/// Tunable thresholds that the contact-generation pipeline was hardcoded around in the
/// system it was lifted from. Grouped into one struct (instead of scattered module
/// constants) so a host engine can retune them per-simulation without forking the crate.
///
/// `Default` reproduces the original literal values exactly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    /// A barycentric coordinate within this distance of zero is treated as zero when
    /// classifying a witness point's feature (vertex/edge/face). `τ_b` in the spec.
    pub barycentric_zero: f32,

    /// A resolved contact normal shorter than this (or non-finite) is discarded.
    pub zero_normal: f32,

    /// Below this witness-to-witness distance, the normal is re-derived from mesh
    /// topology instead of from the (numerically unstable) witness difference.
    pub normal_from_geometry: f32,

    /// Minimum separation between two candidate witness points for the optional
    /// triangle-vertex augmentation pass to treat them as distinct.
    pub closest_point_dedup: f32,

    /// Emit the degenerate-feature-classification warning once every N occurrences.
    pub degenerate_warn_every: u64,

    /// Emit the margin-penetration warning once every N occurrences.
    pub penetration_warn_every: u64,

    /// Whether contacts whose witness triangles already penetrate past the margin are
    /// dropped (`true`) or kept-but-flagged (`false`, the original behavior). See
    /// DESIGN.md for why this defaults to `false`.
    pub drop_penetrating_contacts: bool,

    /// Enable the optional triangle-vertex closest-point augmentation pass
    /// (`spec.md` §4.4 step 2). Off by default, matching the source's
    /// `gDoTriangleTriangleCollisionDetection = false`.
    pub enable_vertex_augmentation: bool,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            barycentric_zero: 1e-3,
            zero_normal: 1e-4,
            normal_from_geometry: 1e-5,
            closest_point_dedup: 1e-5,
            degenerate_warn_every: 10_000,
            penetration_warn_every: 1_000,
            drop_penetrating_contacts: false,
            enable_vertex_augmentation: false,
        }
    }
}
