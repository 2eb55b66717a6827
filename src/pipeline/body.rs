//! The view of the simulated bodies needed by collision detection.

use crate::math::{GeneralizedVector, Isometry, Point, Real, Vector};

/// The index of a single body of the simulation.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyHandle(pub u32);

/// The index of an articulated body, i.e., a group of rigid links connected by joints.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArticulationHandle(pub u32);

/// The body owning a set of generalized coordinates.
///
/// A rigid link of an articulated body has no coordinates of its own: its configuration is
/// determined by the coordinates of the whole articulation.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SuperBody {
    /// A body that is not part of an articulation.
    Single(BodyHandle),
    /// An articulated body.
    Articulated(ArticulationHandle),
}

/// The nature of a single body.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BodyKind {
    /// A rigid body. Its collision geometries move rigidly with it.
    Rigid,
    /// A deformable body. Its collision meshes are re-read from the body at every update.
    Deformable,
}

/// The linear and angular parts of the velocity (or acceleration) of a rigid body.
///
/// The linear part is the velocity of the point of the body located at its origin.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Velocity {
    /// The linear part.
    pub linvel: Vector<Real>,
    /// The angular part.
    pub angvel: Vector<Real>,
}

impl Velocity {
    /// Creates a new velocity.
    #[inline]
    pub fn new(linvel: Vector<Real>, angvel: Vector<Real>) -> Self {
        Self { linvel, angvel }
    }

    /// The zero velocity.
    #[inline]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Re-expresses this velocity, given at `origin`, at the point `point`.
    ///
    /// The angular part is unchanged and the linear part becomes the velocity of `point`
    /// assuming it is rigidly attached to the body.
    #[inline]
    pub fn shift_to(&self, origin: &Point<Real>, point: &Point<Real>) -> Self {
        Self {
            linvel: self.linvel + self.angvel.cross(&(point - origin)),
            angvel: self.angvel,
        }
    }
}

/// The interface through which collision detection reads and writes the state of the bodies.
///
/// The collision detector never owns bodies: it holds [`BodyHandle`]s and queries a `BodySet` for
/// positions, velocities and generalized coordinates. All the vectors and positions are
/// expressed in the world frame.
pub trait BodySet {
    /// Is the body rigid or deformable?
    fn body_kind(&self, body: BodyHandle) -> BodyKind;

    /// Is this body enabled?
    ///
    /// Disabled bodies are not simulated. Two geometries attached to disabled bodies are never
    /// checked against each other.
    fn is_enabled(&self, body: BodyHandle) -> bool;

    /// The super body owning the generalized coordinates of this body.
    fn super_body(&self, body: BodyHandle) -> SuperBody;

    /// The links of an articulated body.
    fn articulation_links(&self, articulation: ArticulationHandle) -> Vec<BodyHandle>;

    /// The current position of the body frame.
    fn position(&self, body: BodyHandle) -> Isometry<Real>;

    /// The current velocity of the body, expressed at the body origin.
    fn velocity(&self, body: BodyHandle) -> Velocity;

    /// The current acceleration of the body, expressed at the body origin.
    fn acceleration(&self, body: BodyHandle) -> Velocity;

    /// The velocity of the material point of `body` currently located at `point`.
    ///
    /// Deformable bodies must override this since their velocity field is not rigid.
    fn point_velocity(&self, body: BodyHandle, point: &Point<Real>) -> Vector<Real> {
        let origin = Point::from(self.position(body).translation.vector);
        self.velocity(body).shift_to(&origin, point).linvel
    }

    /// The current world-space vertices of the mesh of a deformable body.
    ///
    /// The vertices must be ordered like the vertices of the mesh the body was registered with.
    /// Returns `None` for rigid bodies.
    fn deformed_vertices(&self, body: BodyHandle) -> Option<Vec<Point<Real>>>;

    /// The generalized coordinates of a super body.
    fn generalized_coordinates(&self, body: SuperBody) -> GeneralizedVector;

    /// Sets the generalized coordinates of a super body, updating the positions of its bodies.
    fn set_generalized_coordinates(&mut self, body: SuperBody, q: &GeneralizedVector);

    /// Sets the generalized velocity of a super body, updating the velocities of its bodies.
    fn set_generalized_velocity(&mut self, body: SuperBody, qd: &GeneralizedVector);
}
