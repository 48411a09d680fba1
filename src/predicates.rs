//! Closed-form geometric predicates for the 2D triangulation.
//!
//! Everything here is plain determinant arithmetic on [`DVec2`] values. Sign
//! classifications are orientation-normalized so callers never have to care
//! whether a triangle is wound clockwise or counter-clockwise.

use glam::{DMat3, DVec2, DVec3};

use crate::error::TriangulationError;

/// Relative tolerance for sign classification, scaled by the signed content
/// of the simplex under test.
pub const RELATIVE_TOLERANCE: f64 = 1e-6;

/// Doubled signed area of the triangle `abc`. Positive for counter-clockwise
/// winding, negative for clockwise, zero for collinear points.
#[inline]
pub fn orientation(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    (b - a).perp_dot(c - a)
}

/// True if `abc` is collinear (or has coincident vertices) within tolerance.
pub fn is_degenerate(a: DVec2, b: DVec2, c: DVec2) -> bool {
    let scale = (b - a).length() * (c - b).length();
    orientation(a, b, c).abs() <= RELATIVE_TOLERANCE * scale
}

// =============================================================================

/// Classification of a point against each facet of a triangle.
///
/// One sign per vertex: the triangle's signed content with that vertex
/// replaced by the query point, normalized by the orientation of the full
/// triangle. `+1` means the point is on the interior side of the facet
/// opposite that vertex, `0` on the facet's supporting line, `-1` strictly
/// outside across it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Relation {
    signs: [i8; 3],
}

impl Relation {
    /// True iff the point is strictly inside the triangle.
    pub fn is_inside(&self) -> bool {
        self.signs.iter().all(|&s| s > 0)
    }

    /// Index of the first vertex whose opposite facet carries the point, if
    /// any.
    pub fn on_facet(&self) -> Option<usize> {
        self.signs.iter().position(|&s| s == 0)
    }

    /// Index of the first vertex across whose opposite facet the point lies
    /// strictly outside, if any. `None` means the point is inside or on the
    /// triangle.
    pub fn outside_facet(&self) -> Option<usize> {
        self.signs.iter().position(|&s| s < 0)
    }
}

/// Classify `p` against each facet of the triangle `tri`.
///
/// Signs are classified against `RELATIVE_TOLERANCE * |content|`. A negative
/// content flips every sign (orientation normalization); an exactly zero
/// content (degenerate triangle) forces each sign to its absolute value.
pub fn relation(p: DVec2, tri: [DVec2; 3]) -> Relation {
    let content = orientation(tri[0], tri[1], tri[2]);
    let tolerance = RELATIVE_TOLERANCE * content.abs();

    let mut signs = [0i8; 3];
    for (i, sign) in signs.iter_mut().enumerate() {
        let mut substituted = tri;
        substituted[i] = p;
        let value = orientation(substituted[0], substituted[1], substituted[2]);

        let mut s: i8 = if value > tolerance {
            1
        } else if value < -tolerance {
            -1
        } else {
            0
        };
        if content < 0.0 {
            s = -s;
        } else if content == 0.0 {
            s = s.abs();
        }
        *sign = s;
    }

    Relation { signs }
}

// =============================================================================

/// Position of a point relative to a triangle's circumcircle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CirclePosition {
    Inside,
    On,
    Outside,
}

/// The core Delaunay predicate: where does `p` sit relative to the
/// circumcircle of `tri`?
///
/// Each vertex is translated by `-p` and lifted to a third coordinate equal
/// to its squared magnitude; the sign of the resulting 3x3 determinant is the
/// answer, flipped for clockwise triangles so the result is independent of
/// winding.
pub fn vs_circumcircle(p: DVec2, tri: [DVec2; 3]) -> CirclePosition {
    let da = tri[0] - p;
    let db = tri[1] - p;
    let dc = tri[2] - p;

    let m = DMat3::from_cols(
        DVec3::new(da.x, db.x, dc.x),
        DVec3::new(da.y, db.y, dc.y),
        DVec3::new(
            da.length_squared(),
            db.length_squared(),
            dc.length_squared(),
        ),
    );

    let content = orientation(tri[0], tri[1], tri[2]);
    let mut det = m.determinant();
    if content < 0.0 {
        det = -det;
    }

    let tolerance = RELATIVE_TOLERANCE * content.abs();
    if det > tolerance {
        CirclePosition::Inside
    } else if det < -tolerance {
        CirclePosition::Outside
    } else {
        CirclePosition::On
    }
}

/// Homogeneous coefficients `(A, B, C)` of the perpendicular bisector
/// `Ax + By + C = 0` of the segment `ab`.
pub fn bisector(a: DVec2, b: DVec2) -> DVec3 {
    let direction = b - a;
    let midpoint = (a + b) * 0.5;
    DVec3::new(direction.x, direction.y, -direction.dot(midpoint))
}

/// Circumcenter of the triangle `abc`: the intersection of two perpendicular
/// bisectors, computed as the homogeneous cross product of their line
/// coefficients and dehomogenized by the last coordinate.
pub fn circumcenter(a: DVec2, b: DVec2, c: DVec2) -> Result<DVec2, TriangulationError> {
    let center = bisector(a, b).cross(bisector(b, c));

    // The homogeneous weight equals the doubled signed area of abc.
    let scale = (b - a).length() * (c - b).length();
    if center.z.abs() <= RELATIVE_TOLERANCE * scale {
        return Err(TriangulationError::DegenerateTriangle { a, b, c });
    }

    Ok(DVec2::new(center.x / center.z, center.y / center.z))
}

// =============================================================================

#[cfg(test)]
mod test {
    use super::*;

    trait AlmostEqual {
        fn almost_equal(&self, other: Self, epsilon: Self) -> bool;
    }

    impl AlmostEqual for f64 {
        fn almost_equal(&self, other: Self, epsilon: Self) -> bool {
            (self - other).abs() < epsilon
        }
    }

    fn unit_triangle() -> [DVec2; 3] {
        [
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn test_orientation_signs() {
        let [a, b, c] = unit_triangle();
        assert!(orientation(a, b, c) > 0.0);
        assert!(orientation(a, c, b) < 0.0);
        assert_eq!(
            orientation(a, b, DVec2::new(2.0, 0.0)),
            0.0,
            "collinear points have zero content"
        );
    }

    #[test]
    fn test_degeneracy() {
        let a = DVec2::new(0.0, 0.0);
        let b = DVec2::new(1.0, 0.0);
        assert!(is_degenerate(a, b, DVec2::new(2.0, 0.0)));
        assert!(is_degenerate(a, b, b));
        assert!(!is_degenerate(a, b, DVec2::new(0.5, 0.5)));
    }

    #[test]
    fn test_relation_inside() {
        let rel = relation(DVec2::new(0.25, 0.25), unit_triangle());
        assert!(rel.is_inside());
        assert_eq!(rel.on_facet(), None);
        assert_eq!(rel.outside_facet(), None);
    }

    #[test]
    fn test_relation_outside_witness() {
        // Below the x-axis: outside across the facet opposite vertex 2.
        let rel = relation(DVec2::new(0.25, -1.0), unit_triangle());
        assert!(!rel.is_inside());
        assert_eq!(rel.outside_facet(), Some(2));

        // Left of the y-axis: outside across the facet opposite vertex 1.
        let rel = relation(DVec2::new(-1.0, 0.25), unit_triangle());
        assert_eq!(rel.outside_facet(), Some(1));

        // Beyond the hypotenuse: outside across the facet opposite vertex 0.
        let rel = relation(DVec2::new(1.0, 1.0), unit_triangle());
        assert_eq!(rel.outside_facet(), Some(0));
    }

    #[test]
    fn test_relation_on_facet() {
        // On the x-axis edge, strictly between its endpoints.
        let rel = relation(DVec2::new(0.5, 0.0), unit_triangle());
        assert!(!rel.is_inside());
        assert_eq!(rel.on_facet(), Some(2));
        assert_eq!(rel.outside_facet(), None);
    }

    #[test]
    fn test_relation_orientation_independent() {
        let [a, b, c] = unit_triangle();
        let p = DVec2::new(0.25, 0.25);
        assert!(relation(p, [a, b, c]).is_inside());
        assert!(relation(p, [a, c, b]).is_inside());
    }

    #[test]
    fn test_vs_circumcircle() {
        let tri = unit_triangle();
        // Circumcircle has center (0.5, 0.5) through all three vertices.
        assert_eq!(
            vs_circumcircle(DVec2::new(0.5, 0.5), tri),
            CirclePosition::Inside
        );
        assert_eq!(
            vs_circumcircle(DVec2::new(1.0, 1.0), tri),
            CirclePosition::On
        );
        assert_eq!(
            vs_circumcircle(DVec2::new(2.0, 2.0), tri),
            CirclePosition::Outside
        );
    }

    #[test]
    fn test_vs_circumcircle_orientation_independent() {
        let [a, b, c] = unit_triangle();
        let p = DVec2::new(0.5, 0.5);
        assert_eq!(vs_circumcircle(p, [a, b, c]), CirclePosition::Inside);
        assert_eq!(vs_circumcircle(p, [a, c, b]), CirclePosition::Inside);
    }

    #[test]
    fn test_bisector() {
        let line = bisector(DVec2::new(0.0, 0.0), DVec2::new(2.0, 0.0));
        // The bisector is the vertical line x = 1.
        for y in [-3.0, 0.0, 7.5] {
            let value = line.x * 1.0 + line.y * y + line.z;
            assert!(value.almost_equal(0.0, 1e-12));
        }
        // The endpoints sit on opposite sides.
        assert!(line.x * 0.0 + line.z < 0.0);
        assert!(line.x * 2.0 + line.z > 0.0);
    }

    #[test]
    fn test_circumcenter() {
        let center = circumcenter(
            DVec2::new(0.0, 0.0),
            DVec2::new(2.0, 0.0),
            DVec2::new(0.0, 2.0),
        )
        .unwrap();
        assert!(center.x.almost_equal(1.0, 1e-12));
        assert!(center.y.almost_equal(1.0, 1e-12));
    }

    #[test]
    fn test_circumcenter_equidistant() {
        let a = DVec2::new(-3.0, 1.0);
        let b = DVec2::new(4.0, 2.5);
        let c = DVec2::new(0.5, -6.0);
        let center = circumcenter(a, b, c).unwrap();

        let ra = center.distance(a);
        assert!(ra.almost_equal(center.distance(b), 1e-9));
        assert!(ra.almost_equal(center.distance(c), 1e-9));
    }

    #[test]
    fn test_circumcenter_rejects_collinear() {
        let result = circumcenter(
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(2.0, 2.0),
        );
        assert!(matches!(
            result,
            Err(TriangulationError::DegenerateTriangle { .. })
        ));
    }
}
