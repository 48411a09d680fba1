//! Voronoi diagrams derived from the Delaunay triangulation.
//!
//! The Voronoi diagram is the triangulation's dual: each site's cell is the
//! polygon connecting the circumcenters of the triangles fanned around it.
//! Nothing is stored; cells are derived from the live mesh on demand.

use std::collections::HashSet;

use glam::DVec2;

use crate::error::TriangulationError;
use crate::triangulation::{TriangulationEngine, BOUNDING_CORNERS};

/// Default half-extent of the synthetic bounding triangle.
pub const DEFAULT_HALF_EXTENT: f64 = 10_000.0;

/// Builds Voronoi cells for a stream of sites.
///
/// Wraps one [`TriangulationEngine`] seeded with a bounding triangle of the
/// requested half-extent; every site added later must fall strictly inside
/// it.
#[derive(Debug)]
pub struct VoronoiBuilder {
    engine: TriangulationEngine,
}

impl VoronoiBuilder {
    /// Builder with the default half-extent of 10 000.
    pub fn new() -> Self {
        Self::with_half_extent(DEFAULT_HALF_EXTENT)
            .expect("the default bounding triangle is not degenerate")
    }

    /// Builder whose bounding triangle has corners `(-h, -h)`, `(h, -h)` and
    /// `(0, h)`. Fails for a half-extent small enough to be degenerate.
    pub fn with_half_extent(h: f64) -> Result<Self, TriangulationError> {
        let engine = TriangulationEngine::new(
            DVec2::new(-h, -h),
            DVec2::new(h, -h),
            DVec2::new(0.0, h),
        )?;
        Ok(Self { engine })
    }

    /// Record a site. No-op for a site coincident with one already added.
    pub fn add_point(&mut self, site: DVec2) -> Result<(), TriangulationError> {
        self.engine.insert(site)
    }

    /// Record each site in order, stopping at the first failure.
    pub fn add_points<T: Iterator<Item = DVec2>>(
        &mut self,
        sites: T,
    ) -> Result<(), TriangulationError> {
        for site in sites {
            self.engine.insert(site)?;
        }
        Ok(())
    }

    /// The distinct sites added so far, bounding corners excluded.
    pub fn sites(&self) -> &[DVec2] {
        self.engine.sites()
    }

    /// One Voronoi cell per distinct site: the circumcenters of the site's
    /// surrounding triangles, in consistent cyclic order.
    ///
    /// The processed set starts out holding the three synthetic corner
    /// sites, so the unbounded corner cells are never emitted.
    pub fn regions(&self) -> Result<Vec<Vec<DVec2>>, TriangulationError> {
        let mut done: HashSet<u32> = (0..BOUNDING_CORNERS).collect();
        let mut regions = Vec::new();

        for (key, triangle) in self.engine.triangles() {
            for vertex in triangle.vertices() {
                if !done.insert(vertex) {
                    continue;
                }
                let fan = self.engine.surrounding_triangles(vertex, key)?;
                let mut cell = Vec::with_capacity(fan.len());
                for fan_key in fan {
                    if let Some(t) = self.engine.triangle(fan_key) {
                        cell.push(t.circumcenter());
                    }
                }
                regions.push(cell);
            }
        }

        Ok(regions)
    }

    /// The live mesh flattened to plain coordinate triangles, for rendering
    /// collaborators.
    pub fn triangles(&self) -> Vec<[DVec2; 3]> {
        self.engine
            .triangles()
            .filter_map(|(key, _)| self.engine.realize(key))
            .collect()
    }
}

impl Default for VoronoiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
