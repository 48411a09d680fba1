//! Triangles and their facets, addressed as indices into a site array.

use glam::DVec2;

use crate::error::TriangulationError;
use crate::predicates;

/// A facet of a triangle: in 2D, an edge, represented as a normalized pair of
/// indices into a site array.
///
/// Facets are transient bookkeeping values used while retriangulating a
/// cavity; they are never stored in the mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Facet {
    vtx: [u32; 2],
}

impl Facet {
    pub fn new(mut idx: [u32; 2]) -> Self {
        idx.sort_unstable();
        Self { vtx: idx }
    }

    pub fn vertices(&self) -> [u32; 2] {
        self.vtx
    }

    pub fn contains(&self, vertex: u32) -> bool {
        self.vtx.contains(&vertex)
    }
}

// =============================================================================

/// A triangle, represented as 3x indices into a site array, plus its
/// circumcenter.
///
/// A triangle is fixed at three vertices for its whole lifetime; there is no
/// mutation API. Graph-node identity lives in the arena key, never in this
/// value: two triangles over the same vertex set are distinct nodes.
#[derive(Clone, Debug)]
pub struct Triangle {
    vertices: [u32; 3],
    circumcenter: DVec2,
}

impl Triangle {
    /// Build a triangle over `vertices`, resolving coordinates through
    /// `points`. The circumcenter is computed here, once.
    ///
    /// Fails with [`TriangulationError::DegenerateTriangle`] for repeated
    /// indices or collinear coordinates; degenerate simplices are rejected
    /// before any triangle exists.
    pub fn new(points: &[DVec2], vertices: [u32; 3]) -> Result<Self, TriangulationError> {
        let [a, b, c] = vertices.map(|v| points[v as usize]);

        let distinct =
            vertices[0] != vertices[1] && vertices[1] != vertices[2] && vertices[0] != vertices[2];
        if !distinct || predicates::is_degenerate(a, b, c) {
            return Err(TriangulationError::DegenerateTriangle { a, b, c });
        }

        let circumcenter = predicates::circumcenter(a, b, c)?;
        Ok(Self {
            vertices,
            circumcenter,
        })
    }

    pub fn vertices(&self) -> [u32; 3] {
        self.vertices
    }

    pub fn contains(&self, vertex: u32) -> bool {
        self.vertices.contains(&vertex)
    }

    /// Center of the circle through all three vertices, cached at
    /// construction.
    pub fn circumcenter(&self) -> DVec2 {
        self.circumcenter
    }

    /// Resolve this triangle's vertex coordinates through `points`.
    pub fn realize(&self, points: &[DVec2]) -> [DVec2; 3] {
        self.vertices.map(|v| points[v as usize])
    }

    /// The facet not touching `vertex`.
    pub fn facet_opposite(&self, vertex: u32) -> Result<Facet, TriangulationError> {
        let [a, b, c] = self.vertices;
        match vertex {
            v if v == a => Ok(Facet::new([b, c])),
            v if v == b => Ok(Facet::new([a, c])),
            v if v == c => Ok(Facet::new([a, b])),
            _ => Err(TriangulationError::ForeignVertex { vertex }),
        }
    }

    /// Any vertex not in `excluded`, or `None` if all three are excluded.
    pub fn vertex_but_not(&self, excluded: &[u32]) -> Option<u32> {
        self.vertices
            .into_iter()
            .find(|v| !excluded.contains(v))
    }

    /// True iff `self` and `other` share exactly one facet, i.e. differ in
    /// exactly one vertex.
    pub fn is_neighbor(&self, other: &Triangle) -> bool {
        let shared = self
            .vertices
            .iter()
            .filter(|&&v| other.contains(v))
            .count();
        shared == 2
    }
}

// =============================================================================
