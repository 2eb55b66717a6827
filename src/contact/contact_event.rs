use crate::contact::ContactParameters;
use crate::math::{Point, Real, Vector, NEAR_ZERO};
use crate::pipeline::{BodyHandle, BodyKind, BodySet, GeometryHandle, SuperBody};
use crate::shape::Triangle;
use crate::utils;

/// The kind of an event reported to the simulator.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum EventType {
    /// A contact between two geometries.
    #[default]
    Contact,
    /// A joint reaching one of its limits.
    Limit,
    /// A bilateral constraint event.
    Constraint,
}

/// The friction regime of a contact.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum FrictionType {
    /// The tangents have not been computed yet.
    #[default]
    Undetermined,
    /// The tangential relative velocity is (nearly) zero.
    Sticking,
    /// The bodies slide along each other.
    Slipping,
}

/// The classification of a contact by the sign of its normal relative velocity.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DistanceClass {
    /// The bodies move apart.
    Separating,
    /// The bodies neither approach nor separate.
    Resting,
    /// The bodies move toward each other.
    Impacting,
}

impl DistanceClass {
    /// Classifies a normal relative velocity with the tolerance `tol`.
    #[inline]
    pub fn from_velocity(vel: Real, tol: Real) -> Self {
        if vel > tol {
            DistanceClass::Separating
        } else if vel < -tol {
            DistanceClass::Impacting
        } else {
            DistanceClass::Resting
        }
    }
}

/// A contact between two collision geometries at some instant of a time step.
///
/// The normal points from the second body toward the first one, so the relative normal velocity
/// `n · (v1 - v2)` is negative when the bodies approach each other.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ContactEvent {
    /// The kind of this event.
    pub event_type: EventType,
    /// The time of the event, as a fraction of the time step, in `[0, 1]`.
    pub t: Real,
    /// The contact point, in world-space.
    pub point: Point<Real>,
    /// The unit contact normal, in world-space.
    pub normal: Vector<Real>,
    /// The first contact tangent.
    pub tangent1: Vector<Real>,
    /// The second contact tangent.
    pub tangent2: Vector<Real>,
    /// The first geometry in contact.
    pub geom1: GeometryHandle,
    /// The second geometry in contact.
    pub geom2: GeometryHandle,
    /// The body of the first geometry.
    pub body1: BodyHandle,
    /// The body of the second geometry.
    pub body2: BodyHandle,
    /// The Coulomb friction coefficient.
    pub mu_coulomb: Real,
    /// The viscous friction coefficient.
    pub mu_viscous: Real,
    /// The coefficient of restitution.
    pub restitution: Real,
    /// The number of edges of the polyhedral approximation of the friction cone.
    pub friction_cone_edges: usize,
    /// The tolerance used to classify the normal relative velocity.
    pub tol: Real,
    /// The tangential speed below which the contact is sticking.
    pub stick_tol: Real,
    /// The friction regime, set by [`ContactEvent::determine_tangents`].
    pub friction_type: FrictionType,
}

impl ContactEvent {
    /// Creates a contact at time `t` against the face of `triangle`.
    ///
    /// The normal is the normal of `triangle`, flipped if necessary so that it opposes
    /// `relative_velocity`, the velocity of the contact point of the first body relative to the
    /// second body. A degenerate triangle yields a zero normal.
    pub fn new_contact(
        t: Real,
        geom1: GeometryHandle,
        geom2: GeometryHandle,
        body1: BodyHandle,
        body2: BodyHandle,
        point: Point<Real>,
        relative_velocity: &Vector<Real>,
        triangle: &Triangle,
    ) -> Self {
        let mut normal = triangle
            .normal()
            .map(|n| n.into_inner())
            .unwrap_or_else(Vector::zeros);

        if relative_velocity.dot(&normal) > 0.0 {
            normal = -normal;
        }

        let params = ContactParameters::default();

        Self {
            event_type: EventType::Contact,
            t,
            point,
            normal,
            tangent1: Vector::zeros(),
            tangent2: Vector::zeros(),
            geom1,
            geom2,
            body1,
            body2,
            mu_coulomb: params.mu_coulomb,
            mu_viscous: params.mu_viscous,
            restitution: params.restitution,
            friction_cone_edges: params.friction_cone_edges,
            tol: NEAR_ZERO,
            stick_tol: NEAR_ZERO,
            friction_type: FrictionType::Undetermined,
        }
    }

    /// Copies the friction and restitution parameters into this contact.
    pub fn set_contact_parameters(&mut self, params: &ContactParameters) {
        self.mu_coulomb = params.mu_coulomb;
        self.mu_viscous = params.mu_viscous;
        self.restitution = params.restitution;
        self.friction_cone_edges = params.friction_cone_edges;
    }

    /// The velocity of the contact point on the first body relative to the second body.
    pub fn relative_velocity(&self, bodies: &impl BodySet) -> Vector<Real> {
        bodies.point_velocity(self.body1, &self.point)
            - bodies.point_velocity(self.body2, &self.point)
    }

    /// The relative normal velocity at the contact point.
    ///
    /// Positive values indicate separation, negative values indicate an impact.
    pub fn contact_velocity(&self, bodies: &impl BodySet) -> Real {
        self.normal.dot(&self.relative_velocity(bodies))
    }

    /// Classifies this contact as separating, resting or impacting using its tolerance `tol`.
    pub fn distance_class(&self, bodies: &impl BodySet) -> DistanceClass {
        let vel = self.contact_velocity(bodies);
        log::trace!("contact velocity: {}, tolerance: {}", vel, self.tol);
        DistanceClass::from_velocity(vel, self.tol)
    }

    /// Is this contact impacting?
    #[inline]
    pub fn is_impacting(&self, bodies: &impl BodySet) -> bool {
        self.distance_class(bodies) == DistanceClass::Impacting
    }

    /// The relative normal acceleration at the contact point.
    ///
    /// Computed as `n · (v1 - v2) + 2 ṅ · (a1 - a2)` where `ṅ` is the time derivative of the
    /// normal, i.e., `ω2 × n` if the second body is rigid and zero otherwise.
    pub fn contact_acceleration(&self, bodies: &impl BodySet) -> Real {
        let accel_at = |body: BodyHandle| {
            let origin = Point::from(bodies.position(body).translation.vector);
            bodies.acceleration(body).shift_to(&origin, &self.point).linvel
        };

        let ndot = match bodies.body_kind(self.body2) {
            BodyKind::Rigid => bodies.velocity(self.body2).angvel.cross(&self.normal),
            BodyKind::Deformable => Vector::zeros(),
        };

        let rel_accel = accel_at(self.body1) - accel_at(self.body2);
        self.contact_velocity(bodies) + 2.0 * ndot.dot(&rel_accel)
    }

    /// A velocity-scaled classification tolerance for this contact, never smaller than one.
    pub fn contact_tolerance(&self, bodies: &impl BodySet) -> Real {
        self.relative_velocity(bodies).norm().max(1.0)
    }

    /// Computes the contact tangents and the friction regime.
    ///
    /// If the tangential relative velocity is smaller than `stick_tol`, the contact is sticking
    /// and the tangents are an arbitrary completion of the normal into an orthonormal basis.
    /// Otherwise the contact is slipping and the first tangent is aligned with the tangential
    /// velocity.
    pub fn determine_tangents(&mut self, bodies: &impl BodySet) {
        let tangent_vel = self.tangential_velocity(bodies);
        let speed = tangent_vel.norm();

        if speed < self.stick_tol {
            self.set_sticking();
        } else {
            self.set_slipping(&tangent_vel, speed);
        }
    }

    /// Computes the contact tangents with a hysteresis band on the stick/slip transition.
    ///
    /// A contact that was slipping at the previous step keeps slipping until its tangential
    /// speed drops below `stick_tol - band`.
    pub fn determine_tangents_with_previous(
        &mut self,
        bodies: &impl BodySet,
        previous: FrictionType,
        band: Real,
    ) {
        let tangent_vel = self.tangential_velocity(bodies);
        let speed = tangent_vel.norm();
        let threshold = if previous == FrictionType::Slipping {
            self.stick_tol - band
        } else {
            self.stick_tol
        };

        if speed < threshold || speed == 0.0 {
            self.set_sticking();
        } else {
            self.set_slipping(&tangent_vel, speed);
        }
    }

    fn tangential_velocity(&self, bodies: &impl BodySet) -> Vector<Real> {
        let rvel = self.relative_velocity(bodies);
        rvel - self.normal * self.normal.dot(&rvel)
    }

    fn set_sticking(&mut self) {
        let [t1, t2] = utils::orthonormal_basis(&self.normal);
        self.friction_type = FrictionType::Sticking;
        self.tangent1 = t1;
        self.tangent2 = t2;
    }

    fn set_slipping(&mut self, tangent_vel: &Vector<Real>, speed: Real) {
        self.friction_type = FrictionType::Slipping;
        self.tangent1 = tangent_vel / speed;
        self.tangent2 = self
            .normal
            .cross(&self.tangent1)
            .try_normalize(0.0)
            .unwrap_or_else(Vector::zeros);
    }

    /// The super bodies of the two bodies in contact.
    ///
    /// A body that is not part of an articulation and that is disabled has no super body.
    pub fn super_bodies(&self, bodies: &impl BodySet) -> [Option<SuperBody>; 2] {
        [self.body1, self.body2].map(|body| match bodies.super_body(body) {
            SuperBody::Single(_) if !bodies.is_enabled(body) => None,
            sb => Some(sb),
        })
    }

    /// Do both contacts involve a common super body?
    ///
    /// Disabled single bodies are ignored, like in [`ContactEvent::super_bodies`].
    pub fn is_linked(&self, other: &ContactEvent, bodies: &impl BodySet) -> bool {
        let others = other.super_bodies(bodies);
        self.super_bodies(bodies)
            .into_iter()
            .flatten()
            .any(|sb| others.contains(&Some(sb)))
    }

    /// Swaps the roles of the two bodies.
    ///
    /// The normal is negated so that it still points toward the first body. The second tangent
    /// is negated to keep the contact frame right-handed.
    pub fn flip(&mut self) {
        core::mem::swap(&mut self.geom1, &mut self.geom2);
        core::mem::swap(&mut self.body1, &mut self.body2);
        self.normal = -self.normal;
        self.tangent2 = -self.tangent2;
    }
}

/// Removes the contacts happening at the same time and place as a contact earlier in the list.
///
/// Two contacts are duplicates if their times differ by less than [`NEAR_ZERO`] and their points
/// are closer than [`NEAR_ZERO`]. The first one is kept and the order of the list is preserved.
pub fn remove_duplicate_contacts(contacts: &mut Vec<ContactEvent>) {
    let mut kept: Vec<ContactEvent> = Vec::with_capacity(contacts.len());

    for contact in contacts.drain(..) {
        let is_duplicate = kept.iter().any(|other| {
            (other.t - contact.t).abs() < NEAR_ZERO
                && na::distance(&other.point, &contact.point) < NEAR_ZERO
        });

        if !is_duplicate {
            kept.push(contact);
        }
    }

    *contacts = kept;
}
