//! Incremental Delaunay triangulation by cavity retriangulation.
//!
//! The engine owns an [`AdjacencyGraph`] of triangles over a growing site
//! array. Each insertion digs out the cavity of triangles whose circumcircle
//! contains the new site, then fans fresh triangles from the cavity rim to
//! the site, restoring the empty-circumcircle property with purely local
//! graph surgery.

use std::collections::HashSet;

use glam::DVec2;
use itertools::Itertools;
use log::debug;

use crate::error::TriangulationError;
use crate::graph::{AdjacencyGraph, TriangleKey};
use crate::predicates::{self, CirclePosition};
use crate::triangle::{Facet, Triangle};

/// Number of synthetic corner sites owned by the bounding triangle. They
/// occupy the first indices of the site array for the engine's lifetime.
pub const BOUNDING_CORNERS: u32 = 3;

#[derive(Debug)]
pub struct TriangulationEngine {
    /// All sites; indices `0..BOUNDING_CORNERS` are the bounding corners.
    points: Vec<DVec2>,
    graph: AdjacencyGraph,
    /// Cache seeding the next locate walk.
    most_recent: Option<TriangleKey>,
}

impl TriangulationEngine {
    /// Build an engine over the bounding triangle `abc`, which the caller
    /// guarantees strictly contains every future site. Undersizing makes
    /// later insertions fail with [`TriangulationError::OutOfBounds`].
    pub fn new(a: DVec2, b: DVec2, c: DVec2) -> Result<Self, TriangulationError> {
        let points = vec![a, b, c];
        let mut graph = AdjacencyGraph::new();
        let root = graph.insert(Triangle::new(&points, [0, 1, 2])?);

        Ok(Self {
            points,
            graph,
            most_recent: Some(root),
        })
    }

    /// Insert a site, restoring the empty-circumcircle invariant for the
    /// whole mesh before returning.
    ///
    /// Inserting a site coincident with an existing vertex is a no-op. A
    /// failed insertion leaves the mesh untouched.
    pub fn insert(&mut self, site: DVec2) -> Result<(), TriangulationError> {
        let start = self
            .locate(site)
            .ok_or(TriangulationError::OutOfBounds { site })?;

        if self.graph[start]
            .vertices()
            .iter()
            .any(|&v| self.points[v as usize] == site)
        {
            return Ok(());
        }

        let cavity = self.cavity(site, start);

        // Boundary facets by symmetric difference: a facet shared by two
        // cavity triangles cancels, one on the rim survives.
        let mut boundary: HashSet<Facet> = HashSet::new();
        for &key in &cavity {
            let triangle = &self.graph[key];
            for vertex in triangle.vertices() {
                let facet = triangle.facet_opposite(vertex)?;
                if !boundary.insert(facet) {
                    boundary.remove(&facet);
                }
            }
        }

        let cavity_set: HashSet<TriangleKey> = cavity.iter().copied().collect();
        let mut retained: Vec<TriangleKey> = Vec::new();
        for &key in &cavity {
            for &neighbor in self.graph.neighbors(key) {
                if !cavity_set.contains(&neighbor) && !retained.contains(&neighbor) {
                    retained.push(neighbor);
                }
            }
        }

        debug!(
            "insert {site}: cavity of {} triangles, {} boundary facets",
            cavity.len(),
            boundary.len()
        );

        // Realize every replacement triangle before touching the graph, so a
        // construction failure leaves the mesh exactly as it was.
        let site_id: u32 = self.points.len().try_into().unwrap();
        self.points.push(site);
        let mut fresh = Vec::with_capacity(boundary.len());
        for facet in &boundary {
            let [u, v] = facet.vertices();
            match Triangle::new(&self.points, [u, v, site_id]) {
                Ok(triangle) => fresh.push(triangle),
                Err(e) => {
                    self.points.pop();
                    return Err(e);
                }
            }
        }

        for &key in &cavity {
            self.graph.remove(key);
        }

        let created: Vec<TriangleKey> = fresh
            .into_iter()
            .map(|triangle| self.graph.insert(triangle))
            .collect();

        // Relink the patch: each new triangle against the retained rim
        // neighbors and its new siblings.
        let candidates: Vec<TriangleKey> = retained
            .iter()
            .chain(created.iter())
            .copied()
            .collect();
        for (&a, &b) in created.iter().cartesian_product(candidates.iter()) {
            if a != b && self.graph[a].is_neighbor(&self.graph[b]) {
                self.graph.connect(a, b);
            }
        }

        self.most_recent = created.first().copied();
        Ok(())
    }

    /// Flood-fill the set of triangles whose circumcircle does not exclude
    /// `site`, seeded at `start`. Each triangle is visited at most once and
    /// only accepted triangles propagate their neighbors, so the cost is
    /// bounded by the affected region rather than the whole mesh.
    fn cavity(&self, site: DVec2, start: TriangleKey) -> Vec<TriangleKey> {
        let mut cavity = Vec::new();
        let mut visited = HashSet::from([start]);
        let mut worklist = vec![start];

        while let Some(key) = worklist.pop() {
            let coords = self.graph[key].realize(&self.points);
            if predicates::vs_circumcircle(site, coords) == CirclePosition::Outside {
                continue;
            }
            cavity.push(key);
            for &neighbor in self.graph.neighbors(key) {
                if visited.insert(neighbor) {
                    worklist.push(neighbor);
                }
            }
        }

        cavity
    }

    /// Find a live triangle containing `point` (inside or on its boundary).
    ///
    /// Walks triangle to triangle from the most recently created one,
    /// stepping through whichever facet the point is outside of. Revisiting a
    /// triangle means the walk is cycling on a degenerate configuration; the
    /// walk then gives up and scans every live triangle instead. Returns
    /// `None` only if no triangle contains the point at all.
    pub fn locate(&self, point: DVec2) -> Option<TriangleKey> {
        let mut current = self
            .most_recent
            .filter(|&key| self.graph.contains(key))
            .or_else(|| self.graph.iter().next().map(|(key, _)| key))?;

        let mut visited = HashSet::new();
        loop {
            if !visited.insert(current) {
                debug!("locate walk revisited a triangle, falling back to full scan");
                return self.locate_exhaustive(point);
            }

            let triangle = &self.graph[current];
            let rel = predicates::relation(point, triangle.realize(&self.points));
            let Some(witness) = rel.outside_facet() else {
                return Some(current);
            };

            let vertex = triangle.vertices()[witness];
            match self.neighbor_opposite(vertex, current) {
                Ok(Some(next)) => current = next,
                // Walked off the hull; the scan settles whether any triangle
                // contains the point.
                _ => return self.locate_exhaustive(point),
            }
        }
    }

    fn locate_exhaustive(&self, point: DVec2) -> Option<TriangleKey> {
        self.graph
            .iter()
            .find(|(_, triangle)| {
                predicates::relation(point, triangle.realize(&self.points))
                    .outside_facet()
                    .is_none()
            })
            .map(|(key, _)| key)
    }

    /// The unique neighbor of `key` not containing `vertex`, i.e. the
    /// triangle across the facet opposite `vertex`. `Ok(None)` means the
    /// facet is on the hull.
    pub fn neighbor_opposite(
        &self,
        vertex: u32,
        key: TriangleKey,
    ) -> Result<Option<TriangleKey>, TriangulationError> {
        if !self.graph[key].contains(vertex) {
            return Err(TriangulationError::ForeignVertex { vertex });
        }
        Ok(self
            .graph
            .neighbors(key)
            .iter()
            .copied()
            .find(|&neighbor| !self.graph[neighbor].contains(vertex)))
    }

    /// Walk the closed fan of triangles sharing `site`, starting (and
    /// ending) at `start`, in consistent cyclic order. The fan of any site
    /// interior to the bounding triangle is closed; a hull gap surfaces as
    /// [`TriangulationError::OpenFan`].
    pub fn surrounding_triangles(
        &self,
        site: u32,
        start: TriangleKey,
    ) -> Result<Vec<TriangleKey>, TriangulationError> {
        if !self.graph[start].contains(site) {
            return Err(TriangulationError::ForeignVertex { vertex: site });
        }

        let mut fan = Vec::new();
        let mut current = start;
        let mut guide = self.graph[start]
            .vertex_but_not(&[site])
            .ok_or(TriangulationError::OpenFan { site })?;

        loop {
            fan.push(current);

            // The third vertex rotates in as the next guide, keeping the walk
            // turning in one direction around the site.
            let next_guide = self.graph[current]
                .vertex_but_not(&[site, guide])
                .ok_or(TriangulationError::OpenFan { site })?;
            let next = self
                .neighbor_opposite(guide, current)?
                .ok_or(TriangulationError::OpenFan { site })?;

            guide = next_guide;
            current = next;
            if current == start {
                break;
            }
        }

        Ok(fan)
    }

    // =========================================================================

    /// User-inserted sites, bounding corners excluded, in insertion order.
    pub fn sites(&self) -> &[DVec2] {
        &self.points[BOUNDING_CORNERS as usize..]
    }

    /// All sites including the bounding corners; triangle vertex indices
    /// resolve against this slice.
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    pub fn triangle_count(&self) -> usize {
        self.graph.len()
    }

    /// Live triangles with their graph handles.
    pub fn triangles(&self) -> impl Iterator<Item = (TriangleKey, &Triangle)> {
        self.graph.iter()
    }

    pub fn triangle(&self, key: TriangleKey) -> Option<&Triangle> {
        self.graph.get(key)
    }

    /// Vertex coordinates of a live triangle.
    pub fn realize(&self, key: TriangleKey) -> Option<[DVec2; 3]> {
        self.graph.get(key).map(|t| t.realize(&self.points))
    }
}

// =============================================================================
