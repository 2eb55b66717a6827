use crate::contact::{remove_duplicate_contacts, ContactEvent, FrictionType};
use crate::math::{GeneralizedVector, Isometry, Real, NEAR_ZERO};
use crate::partitioning::{BvTreeOptions, TraversalMode};
use crate::pipeline::narrow_phase::{
    self, determine_contacts_moving_points as moving_points,
    determine_contacts_points_rigid as points_rigid, ContactWindow, GeometryRef,
};
use crate::pipeline::{
    BodyHandle, BodyKind, BodySet, CollisionError, CollisionGeometry, GeometryHandle, SuperBody,
};
use crate::query::{
    bisect_time_of_impact, intersecting_triangle_pairs, intersection_test_meshes,
    self_intersection_test, TimeOfImpact,
};
use crate::shape::TriMesh;
use crate::utils::SortedPair;
use alloc::sync::Arc;
use hashbrown::{HashMap, HashSet};
use ordered_float::OrderedFloat;
use slab::Slab;

/// The generalized coordinates of the super bodies at one instant of a time step.
pub type StateMap = HashMap<SuperBody, GeneralizedVector>;

/// Parameters of a [`CollisionDetector`].
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CollisionDetectorConfig {
    /// The width of the time interval, in fractions of the step, bracketing each time of impact.
    pub eps_tolerance: Real,
    /// The half-thickness of the triangles against which moving vertices are tested.
    pub isect_tolerance: Real,
    /// Whether all the intersecting triangle pairs are collected at the time of impact of two
    /// rigid geometries, or only the first one found.
    pub mode: TraversalMode,
    /// The parameters of the bounding volume trees of the geometries.
    pub bv_tree: BvTreeOptions,
    /// The classification tolerance given to new contacts.
    pub default_contact_tolerance: Real,
    /// The sticking tolerance given to new contacts.
    pub default_stick_tolerance: Real,
    /// An optional hysteresis band on the stick/slip transition of contacts.
    pub friction_hysteresis: Option<Real>,
}

impl Default for CollisionDetectorConfig {
    fn default() -> Self {
        Self {
            eps_tolerance: 1.0e-4,
            isect_tolerance: 1.0e-4,
            mode: TraversalMode::AllContacts,
            bv_tree: BvTreeOptions::default(),
            default_contact_tolerance: NEAR_ZERO,
            default_stick_tolerance: NEAR_ZERO,
            friction_hysteresis: None,
        }
    }
}

/// The motion of a super body during a time step, interpolated linearly in generalized
/// coordinates.
struct StateSweep<'a> {
    body: SuperBody,
    q0: &'a GeneralizedVector,
    q1: &'a GeneralizedVector,
}

impl<'a> StateSweep<'a> {
    fn new(body: SuperBody, q0: &'a StateMap, q1: &'a StateMap) -> Result<Self, CollisionError> {
        Ok(Self {
            body,
            q0: q0.get(&body).ok_or(CollisionError::MissingState(body))?,
            q1: q1.get(&body).ok_or(CollisionError::MissingState(body))?,
        })
    }

    fn at(&self, s: Real) -> GeneralizedVector {
        self.q0 * (1.0 - s) + self.q1 * s
    }

    fn velocity(&self, dt: Real) -> GeneralizedVector {
        (self.q1 - self.q0) / dt
    }
}

/// Finds the first impacts between the triangle meshes attached to a set of bodies.
///
/// The detector owns the collision geometries and the contacts found during the last call to
/// [`CollisionDetector::is_contact`]. The bodies themselves are only accessed through a
/// [`BodySet`].
#[derive(Clone, Debug, Default)]
pub struct CollisionDetector {
    pub(super) config: CollisionDetectorConfig,
    pub(super) geometries: Slab<CollisionGeometry>,
    pub(super) disabled_geometries: HashSet<GeometryHandle>,
    pub(super) disabled_pairs: HashSet<SortedPair<GeometryHandle>>,
    contacts: Vec<ContactEvent>,
}

impl CollisionDetector {
    /// Creates an empty collision detector.
    pub fn new(config: CollisionDetectorConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// The parameters of this detector.
    #[inline]
    pub fn config(&self) -> &CollisionDetectorConfig {
        &self.config
    }

    /// The contacts found by the last call to [`CollisionDetector::is_contact`], sorted by time.
    #[inline]
    pub fn contacts(&self) -> &[ContactEvent] {
        &self.contacts
    }

    /// Mutable access to the contacts found by the last call to
    /// [`CollisionDetector::is_contact`].
    #[inline]
    pub fn contacts_mut(&mut self) -> &mut Vec<ContactEvent> {
        &mut self.contacts
    }

    /// Attaches a triangle mesh to `body`, placed at `offset` relative to the body frame.
    ///
    /// The mesh of a deformable body is expected in world space with an identity offset.
    pub fn add_geometry(
        &mut self,
        mesh: Arc<TriMesh>,
        body: BodyHandle,
        offset: Isometry<Real>,
    ) -> GeometryHandle {
        let geom = CollisionGeometry::new(mesh, body, offset, &self.config.bv_tree);
        let handle = GeometryHandle(self.geometries.insert(geom) as u32);
        log::debug!("added geometry {:?} to body {:?}", handle, body);
        handle
    }

    /// Removes a geometry, and every disabled pair it is part of.
    pub fn remove_geometry(&mut self, handle: GeometryHandle) -> Option<CollisionGeometry> {
        let geom = self.geometries.try_remove(handle.0 as usize)?;
        let _ = self.disabled_geometries.remove(&handle);
        self.disabled_pairs.retain(|pair| !pair.contains(&handle));
        Some(geom)
    }

    /// The geometry identified by `handle`.
    #[inline]
    pub fn geometry(&self, handle: GeometryHandle) -> Option<&CollisionGeometry> {
        self.geometries.get(handle.0 as usize)
    }

    /// All the geometries of this detector, in handle order.
    pub fn geometries(&self) -> impl Iterator<Item = (GeometryHandle, &CollisionGeometry)> {
        self.geometries
            .iter()
            .map(|(i, geom)| (GeometryHandle(i as u32), geom))
    }

    /// The number of geometries of this detector.
    #[inline]
    pub fn num_geometries(&self) -> usize {
        self.geometries.len()
    }

    fn geometry_ref(&self, handle: GeometryHandle) -> Result<GeometryRef<'_>, CollisionError> {
        let geom = self
            .geometry(handle)
            .ok_or(CollisionError::UnknownGeometry(handle))?;
        Ok(GeometryRef { handle, geom })
    }

    /// Refreshes the world-space position, or vertices, of every geometry.
    pub fn update_geometries(&mut self, bodies: &impl BodySet) -> Result<(), CollisionError> {
        let options = self.config.bv_tree;
        for (_, geom) in self.geometries.iter_mut() {
            geom.update(bodies, &options)?;
        }
        Ok(())
    }

    fn update_some_geometries(
        &mut self,
        bodies: &impl BodySet,
        handles: &[GeometryHandle],
    ) -> Result<(), CollisionError> {
        let options = self.config.bv_tree;
        for handle in handles {
            self.geometries
                .get_mut(handle.0 as usize)
                .ok_or(CollisionError::UnknownGeometry(*handle))?
                .update(bodies, &options)?;
        }
        Ok(())
    }

    // Moves the super bodies to the parameter `s` of their sweeps, then refreshes `handles`.
    fn move_to(
        &mut self,
        bodies: &mut impl BodySet,
        sweeps: &[StateSweep],
        s: Real,
        handles: &[GeometryHandle],
    ) -> Result<(), CollisionError> {
        for sweep in sweeps {
            bodies.set_generalized_coordinates(sweep.body, &sweep.at(s));
        }
        self.update_some_geometries(&*bodies, handles)
    }

    /// Tests if two geometries intersect at their current positions.
    ///
    /// A geometry tested against itself is checked for self-intersections, ignoring triangles
    /// sharing a vertex.
    pub fn geometries_intersect(&self, handle1: GeometryHandle, handle2: GeometryHandle) -> bool {
        let (Some(geom1), Some(geom2)) = (self.geometry(handle1), self.geometry(handle2)) else {
            return false;
        };

        if handle1 == handle2 {
            self_intersection_test(geom1.mesh())
        } else {
            intersection_test_meshes(geom1.positioned_mesh(), geom2.positioned_mesh())
        }
    }

    /// Tests if any candidate pair of geometries currently intersects.
    ///
    /// The geometries are refreshed from `bodies` first. Self-intersections of deformable
    /// geometries are tested too.
    pub fn is_collision(&mut self, bodies: &impl BodySet) -> Result<bool, CollisionError> {
        self.update_geometries(bodies)?;

        if self
            .candidate_pairs(bodies)
            .into_iter()
            .any(|(h1, h2)| self.geometries_intersect(h1, h2))
        {
            return Ok(true);
        }

        Ok(self
            .self_check_candidates(bodies)
            .into_iter()
            .any(|h| self.geometries_intersect(h, h)))
    }

    /// Finds the contacts happening between the states `q0` and `q1` of a time step of
    /// duration `dt`.
    ///
    /// For each candidate pair of geometries intersecting at `q1`, the first time of impact is
    /// bracketed by bisection over the linear interpolation of the generalized coordinates of
    /// the involved super bodies. These are then left at the last contact-free state with the
    /// generalized velocity `(q1 - q0) / dt`, and contacts are determined over the bracketing
    /// interval. Deformable geometries are checked against themselves the same way.
    ///
    /// The contacts, available through [`CollisionDetector::contacts`], are sorted by time and
    /// free of duplicates. Returns `true` if at least one contact was found, and fails with
    /// [`CollisionError::InvalidTimeStep`] if `dt` is not a positive finite duration.
    pub fn is_contact(
        &mut self,
        dt: Real,
        q0: &StateMap,
        q1: &StateMap,
        bodies: &mut impl BodySet,
    ) -> Result<bool, CollisionError> {
        self.contacts.clear();
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(CollisionError::InvalidTimeStep);
        }
        self.update_geometries(&*bodies)?;

        let pairs = self.candidate_pairs(&*bodies);
        log::debug!("{} candidate geometry pairs", pairs.len());

        for (h1, h2) in pairs {
            self.check_pair(dt, h1, h2, q0, q1, bodies)?;
        }

        for handle in self.self_check_candidates(&*bodies) {
            self.check_pair(dt, handle, handle, q0, q1, bodies)?;
        }

        let num_found = self.contacts.len();
        self.contacts.retain(|c| (c.normal.norm() - 1.0).abs() <= NEAR_ZERO);
        remove_duplicate_contacts(&mut self.contacts);
        self.contacts.sort_by_key(|c| OrderedFloat(c.t));

        for contact in &mut self.contacts {
            contact.tol = self.config.default_contact_tolerance;
            contact.stick_tol = self.config.default_stick_tolerance;
        }

        log::debug!(
            "{} contacts found ({} before filtering)",
            self.contacts.len(),
            num_found
        );

        Ok(!self.contacts.is_empty())
    }

    // The enabled deformable geometries, checked for self-contacts.
    fn self_check_candidates(&self, bodies: &impl BodySet) -> Vec<GeometryHandle> {
        self.geometries()
            .filter(|(handle, geom)| {
                !self.disabled_geometries.contains(handle)
                    && bodies.is_enabled(geom.body())
                    && bodies.body_kind(geom.body()) == BodyKind::Deformable
            })
            .map(|(handle, _)| handle)
            .collect()
    }

    fn check_pair(
        &mut self,
        dt: Real,
        h1: GeometryHandle,
        h2: GeometryHandle,
        q0: &StateMap,
        q1: &StateMap,
        bodies: &mut impl BodySet,
    ) -> Result<(), CollisionError> {
        let body1 = self.geometry_ref(h1)?.geom.body();
        let body2 = self.geometry_ref(h2)?.geom.body();
        let sb1 = bodies.super_body(body1);
        let sb2 = bodies.super_body(body2);

        let mut sweeps = vec![StateSweep::new(sb1, q0, q1)?];
        if sb2 != sb1 {
            sweeps.push(StateSweep::new(sb2, q0, q1)?);
        }
        let handles = if h1 == h2 { vec![h1] } else { vec![h1, h2] };

        self.move_to(bodies, &sweeps, 1.0, &handles)?;
        if !self.geometries_intersect(h1, h2) {
            return Ok(());
        }

        let eps = self.config.eps_tolerance;
        let mut failure = None;
        let toi = bisect_time_of_impact(eps, |s| {
            match self.move_to(bodies, &sweeps, s, &handles) {
                Ok(()) => self.geometries_intersect(h1, h2),
                Err(err) => {
                    failure = Some(err);
                    true
                }
            }
        });

        if let Some(err) = failure {
            return Err(err);
        }

        log::debug!(
            "time of impact between {:?} and {:?} in [{}, {}]",
            h1,
            h2,
            toi.t,
            toi.contact_time()
        );

        for sweep in &sweeps {
            bodies.set_generalized_velocity(sweep.body, &sweep.velocity(dt));
        }

        let candidates = if h1 != h2
            && bodies.body_kind(body1) == BodyKind::Rigid
            && bodies.body_kind(body2) == BodyKind::Rigid
        {
            self.move_to(bodies, &sweeps, toi.contact_time(), &handles)?;
            let g1 = self.geometry_ref(h1)?.geom.positioned_mesh();
            let g2 = self.geometry_ref(h2)?.geom.positioned_mesh();
            intersecting_triangle_pairs(g1, g2, self.config.mode)
        } else {
            vec![]
        };

        self.move_to(bodies, &sweeps, toi.t, &handles)?;
        self.determine_contacts(dt, h1, h2, &toi, &candidates, &*bodies)
    }

    fn determine_contacts(
        &mut self,
        dt: Real,
        h1: GeometryHandle,
        h2: GeometryHandle,
        toi: &TimeOfImpact,
        candidates: &[(u32, u32)],
        bodies: &impl BodySet,
    ) -> Result<(), CollisionError> {
        let window = ContactWindow {
            t: toi.t,
            h: toi.h,
            duration: toi.h * dt,
            isect_tolerance: self.config.isect_tolerance,
        };
        let g1 = self.geometry_ref(h1)?;
        let g2 = self.geometry_ref(h2)?;
        let kind1 = bodies.body_kind(g1.geom.body());
        let kind2 = bodies.body_kind(g2.geom.body());
        let mut found = vec![];

        let out = &mut found;

        // Across a rigid/deformable pair, the vertices of each side are tested against the
        // triangles of the other.
        match (kind1, kind2) {
            _ if h1 == h2 => moving_points(g1, g1, g1, bodies, &window, out),
            (BodyKind::Rigid, BodyKind::Rigid) => {
                narrow_phase::determine_contacts_rigid(g1, g2, candidates, bodies, &window, out)
            }
            (BodyKind::Rigid, BodyKind::Deformable) => {
                moving_points(g1, g1, g2, bodies, &window, out);
                points_rigid(g1, g2, g1, bodies, &window, out);
            }
            (BodyKind::Deformable, BodyKind::Rigid) => {
                moving_points(g1, g2, g1, bodies, &window, out);
                points_rigid(g1, g1, g2, bodies, &window, out);
            }
            (BodyKind::Deformable, BodyKind::Deformable) => {
                moving_points(g1, g1, g2, bodies, &window, out)
            }
        }

        log::debug!("{} contacts between {:?} and {:?}", found.len(), h1, h2);
        self.contacts.append(&mut found);
        Ok(())
    }

    /// Computes the tangents and friction regime of every contact.
    ///
    /// With a [`CollisionDetectorConfig::friction_hysteresis`] band, a contact keeps slipping
    /// while its tangential speed stays within the band below its sticking tolerance, if the
    /// closest contact between the same geometries in `previous` was slipping.
    pub fn determine_contact_tangents(
        &mut self,
        bodies: &impl BodySet,
        previous: &[ContactEvent],
    ) {
        for contact in &mut self.contacts {
            let band = self.config.friction_hysteresis.filter(|band| *band > 0.0);
            let prev_type = band.and_then(|_| previous_friction_type(contact, previous));

            match (band, prev_type) {
                (Some(band), Some(prev)) => {
                    contact.determine_tangents_with_previous(bodies, prev, band)
                }
                _ => contact.determine_tangents(bodies),
            }
        }
    }
}

// The friction regime of the contact of `previous` closest to `contact` between the same
// geometries.
fn previous_friction_type(
    contact: &ContactEvent,
    previous: &[ContactEvent],
) -> Option<FrictionType> {
    previous
        .iter()
        .filter(|prev| prev.geom1 == contact.geom1 && prev.geom2 == contact.geom2)
        .min_by_key(|prev| OrderedFloat(na::distance_squared(&prev.point, &contact.point)))
        .map(|prev| prev.friction_type)
}
