use glam::DVec2;
use thiserror::Error;

/// Errors surfaced by triangulation construction and queries.
///
/// An insertion either fully succeeds or fails before any graph mutation has
/// taken place; there are no partial-failure states to clean up.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TriangulationError {
    /// No live triangle contains the site. The bounding triangle supplied at
    /// construction was too small for this input.
    #[error("site {site} lies outside the bounding triangle")]
    OutOfBounds {
        /// The site that could not be located.
        site: DVec2,
    },

    /// Triangle construction was given collinear or coincident vertices.
    /// The engine performs no perturbation or recovery.
    #[error("degenerate triangle: {a}, {b}, {c}")]
    DegenerateTriangle {
        /// First vertex.
        a: DVec2,
        /// Second vertex.
        b: DVec2,
        /// Third vertex.
        c: DVec2,
    },

    /// A vertex argument does not belong to the triangle it was paired with.
    #[error("vertex {vertex} does not belong to this triangle")]
    ForeignVertex {
        /// The offending site index.
        vertex: u32,
    },

    /// A fan walk around a site did not close back on its starting triangle.
    /// Cannot occur for sites interior to the bounding triangle.
    #[error("triangle fan around site {site} is not closed")]
    OpenFan {
        /// The site whose fan was being walked.
        site: u32,
    },
}
