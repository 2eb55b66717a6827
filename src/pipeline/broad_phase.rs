//! Enumeration of the pairs of geometries that may collide.

use crate::pipeline::{BodyHandle, BodySet, CollisionDetector, GeometryHandle};
use crate::utils::SortedPair;

impl CollisionDetector {
    /// Excludes a geometry from collision detection.
    pub fn disable_geometry(&mut self, handle: GeometryHandle) {
        let _ = self.disabled_geometries.insert(handle);
    }

    /// Includes back a geometry excluded by [`CollisionDetector::disable_geometry`].
    pub fn enable_geometry(&mut self, handle: GeometryHandle) {
        let _ = self.disabled_geometries.remove(&handle);
    }

    /// Is this geometry excluded from collision detection?
    pub fn is_geometry_disabled(&self, handle: GeometryHandle) -> bool {
        self.disabled_geometries.contains(&handle)
    }

    /// Prevents two geometries from being checked against each other.
    pub fn disable_pair(&mut self, handle1: GeometryHandle, handle2: GeometryHandle) {
        let _ = self
            .disabled_pairs
            .insert(SortedPair::new(handle1, handle2));
    }

    /// Allows back two geometries to be checked against each other.
    pub fn enable_pair(&mut self, handle1: GeometryHandle, handle2: GeometryHandle) {
        let _ = self
            .disabled_pairs
            .remove(&SortedPair::new(handle1, handle2));
    }

    /// Is the collision between these two geometries ignored?
    pub fn is_pair_disabled(&self, handle1: GeometryHandle, handle2: GeometryHandle) -> bool {
        self.disabled_pairs
            .contains(&SortedPair::new(handle1, handle2))
    }

    /// Registers the links of an articulated body.
    ///
    /// `adjacent_links` lists the pairs of links connected by a joint. If `disable_adjacent` is
    /// set, the geometries of two adjacent links are never checked against each other.
    pub fn add_articulated_body(
        &mut self,
        adjacent_links: &[(BodyHandle, BodyHandle)],
        disable_adjacent: bool,
    ) {
        if !disable_adjacent {
            return;
        }

        for (link1, link2) in adjacent_links {
            let geoms1 = self.geometries_of(*link1);
            let geoms2 = self.geometries_of(*link2);

            for g1 in &geoms1 {
                for g2 in &geoms2 {
                    self.disable_pair(*g1, *g2);
                }
            }

            log::debug!(
                "disabled {} geometry pairs between the links {:?} and {:?}",
                geoms1.len() * geoms2.len(),
                link1,
                link2
            );
        }
    }

    /// The geometries attached to `body`.
    pub fn geometries_of(&self, body: BodyHandle) -> Vec<GeometryHandle> {
        self.geometries()
            .filter(|(_, geom)| geom.body() == body)
            .map(|(handle, _)| handle)
            .collect()
    }

    /// Enumerates the pairs of geometries that may collide, each unordered pair exactly once.
    ///
    /// The pairs are sorted by handles. A pair is excluded if either geometry is disabled, if
    /// the pair itself is disabled, if both geometries are attached to the same body, or if
    /// both bodies are disabled.
    pub fn candidate_pairs(&self, bodies: &impl BodySet) -> Vec<(GeometryHandle, GeometryHandle)> {
        let geoms: Vec<_> = self
            .geometries()
            .filter(|(handle, _)| !self.is_geometry_disabled(*handle))
            .map(|(handle, geom)| (handle, geom.body(), bodies.is_enabled(geom.body())))
            .collect();
        let mut pairs = vec![];

        for (i, (h1, body1, enabled1)) in geoms.iter().enumerate() {
            for (h2, body2, enabled2) in &geoms[i + 1..] {
                if body1 == body2 || !(*enabled1 || *enabled2) || self.is_pair_disabled(*h1, *h2) {
                    continue;
                }

                pairs.push((*h1, *h2));
            }
        }

        pairs
    }
}
