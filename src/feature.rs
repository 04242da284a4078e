use crate::geometry::BarycentricCoords;

/// Which part of a triangle a barycentric-coordinate witness point lies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeatureType {
    /// Witness coincides with vertex `index` (0, 1, or 2).
    Vertex(usize),
    /// Witness lies on the edge opposite vertex `index` (see `Triangle::edge`).
    Edge(usize),
    /// Witness lies in the triangle's interior.
    Face,
}

impl FeatureType {
    /// Classify `b` against `tol`: a component within `tol` of zero doesn't count
    /// toward the "interior" tally. Zero zero-components -> `Face`, one -> `Edge`, two
    /// -> `Vertex`. Ties (more than one component simultaneously ~1, which shouldn't
    /// happen for a valid barycentric triple) resolve to the first matching component,
    /// matching the source's top-to-bottom `if` chain.
    ///
    /// Returns `None` for the (practically unreachable, since a valid barycentric
    /// triple sums to 1) case where all three components are simultaneously near
    /// zero — the source's `FeatureType` falls through its switch in this case, and
    /// callers log a throttled degenerate-triangle warning instead of resolving a
    /// normal.
    pub fn classify(b: BarycentricCoords, tol: f32) -> Option<Self> {
        let zero = [fuzzy_zero(b.x, tol), fuzzy_zero(b.y, tol), fuzzy_zero(b.z, tol)];
        let zero_count = zero.iter().filter(|&&z| z).count();
        match zero_count {
            2 => Some(FeatureType::Vertex(vertex_index(b, tol))),
            1 => Some(FeatureType::Edge(edge_index(b, tol))),
            0 => Some(FeatureType::Face),
            _ => None,
        }
    }
}

fn fuzzy_zero(v: f32, tol: f32) -> bool {
    v.abs() < tol
}

/// Index `i` such that `b_i ≈ 1`. Caller's contract: only meaningful when the
/// classified type is `Vertex`.
fn vertex_index(b: BarycentricCoords, tol: f32) -> usize {
    if (b.x - 1.0).abs() < tol {
        0
    } else if (b.y - 1.0).abs() < tol {
        1
    } else if (b.z - 1.0).abs() < tol {
        2
    } else {
        0
    }
}

/// Index `i` such that `b_i ≈ 0`; edge `i` is the edge opposite vertex `i`. Caller's
/// contract: only meaningful when the classified type is `Edge`.
fn edge_index(b: BarycentricCoords, tol: f32) -> usize {
    if fuzzy_zero(b.x, tol) {
        0
    } else if fuzzy_zero(b.y, tol) {
        1
    } else if fuzzy_zero(b.z, tol) {
        2
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f32 = 1e-3;

    #[test]
    fn vertex_is_exactly_one_component() {
        let b = BarycentricCoords::new(1.0, 0.0, 0.0);
        assert_eq!(FeatureType::classify(b, TOL), Some(FeatureType::Vertex(0)));
    }

    #[test]
    fn edge_is_exactly_one_zero_component() {
        let b = BarycentricCoords::new(0.5, 0.5, 0.0);
        assert_eq!(FeatureType::classify(b, TOL), Some(FeatureType::Edge(2)));
    }

    #[test]
    fn face_has_no_zero_components() {
        let b = BarycentricCoords::new(0.3, 0.3, 0.4);
        assert_eq!(FeatureType::classify(b, TOL), Some(FeatureType::Face));
    }

    #[test]
    fn near_zero_within_tolerance_still_counts() {
        let b = BarycentricCoords::new(0.9995, 0.0003, 0.0002);
        assert_eq!(FeatureType::classify(b, TOL), Some(FeatureType::Vertex(0)));
    }

    #[test]
    fn all_components_near_zero_is_degenerate() {
        // not reachable from a valid (sum-to-1) barycentric triple, but classify
        // must still handle it rather than silently picking a feature.
        let b = BarycentricCoords::new(0.0002, 0.0002, 0.0002);
        assert_eq!(FeatureType::classify(b, TOL), None);
    }
}
