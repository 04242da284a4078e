use crate::Point3f;
use cgmath::{EuclideanSpace, InnerSpace};

/// A directed line segment `a -> b`, used for triangle edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub a: Point3f,
    pub b: Point3f,
}

impl Segment {
    pub fn new(a: Point3f, b: Point3f) -> Self {
        Self { a, b }
    }

    /// Closest points `(p_self, p_other)` between the two segments. Classic
    /// closest-point-between-segments algorithm (Ericson §5.1.9); used by the
    /// brute-force broad-phase oracle's edge-edge witness search.
    pub fn closest_points(&self, other: &Segment) -> (Point3f, Point3f) {
        let d1 = self.b - self.a;
        let d2 = other.b - other.a;
        let r = self.a - other.a;

        let aa = d1.dot(d1);
        let ee = d2.dot(d2);
        let f = d2.dot(r);

        const EPS: f32 = 1e-10;

        let (mut s, mut t);
        if aa <= EPS && ee <= EPS {
            return (self.a, other.a);
        }
        if aa <= EPS {
            s = 0.0;
            t = (f / ee).clamp(0.0, 1.0);
        } else {
            let c = d1.dot(r);
            if ee <= EPS {
                t = 0.0;
                s = (-c / aa).clamp(0.0, 1.0);
            } else {
                let b = d1.dot(d2);
                let denom = aa * ee - b * b;
                s = if denom.abs() > EPS { ((b * f - c * ee) / denom).clamp(0.0, 1.0) } else { 0.0 };
                t = (b * s + f) / ee;

                if t < 0.0 {
                    t = 0.0;
                    s = (-c / aa).clamp(0.0, 1.0);
                } else if t > 1.0 {
                    t = 1.0;
                    s = ((b - c) / aa).clamp(0.0, 1.0);
                }
            }
        }

        (self.a + d1 * s, other.a + d2 * t)
    }
}
