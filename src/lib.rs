//! Incremental 2D Delaunay triangulation with a Voronoi dual.
//!
//! Sites stream into a [`TriangulationEngine`] one at a time; each insertion
//! digs out and refills the local cavity of triangles whose circumcircle
//! contains the site, keeping the whole mesh Delaunay. [`VoronoiBuilder`]
//! wraps an engine and derives per-site cells from the finished mesh.

pub mod error;
pub mod graph;
pub mod predicates;
pub mod triangle;
pub mod triangulation;
pub mod voronoi;

pub use error::TriangulationError;
pub use graph::{AdjacencyGraph, TriangleKey};
pub use predicates::{CirclePosition, Relation};
pub use triangle::{Facet, Triangle};
pub use triangulation::TriangulationEngine;
pub use voronoi::VoronoiBuilder;
