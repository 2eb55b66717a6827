use crate::math::Real;

/// Errors raised when building invalid [`ContactParameters`].
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContactParametersError {
    /// The friction cone must be approximated with at least four edges.
    #[error("the friction cone needs at least 4 edges, got {0}")]
    TooFewConeEdges(usize),
    /// A friction or restitution coefficient is negative.
    #[error("the coefficient `{0}` must be non-negative")]
    NegativeCoefficient(&'static str),
}

/// Friction and restitution parameters of the contacts between two bodies.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ContactParameters {
    /// The Coulomb friction coefficient.
    pub mu_coulomb: Real,
    /// The viscous friction coefficient.
    pub mu_viscous: Real,
    /// The coefficient of restitution.
    pub restitution: Real,
    /// The number of edges of the polyhedral approximation of the friction cone.
    pub friction_cone_edges: usize,
}

impl Default for ContactParameters {
    fn default() -> Self {
        Self {
            mu_coulomb: 0.0,
            mu_viscous: 0.0,
            restitution: 0.0,
            friction_cone_edges: 4,
        }
    }
}

impl ContactParameters {
    /// Creates validated contact parameters.
    pub fn new(
        mu_coulomb: Real,
        mu_viscous: Real,
        restitution: Real,
        friction_cone_edges: usize,
    ) -> Result<Self, ContactParametersError> {
        if friction_cone_edges < 4 {
            return Err(ContactParametersError::TooFewConeEdges(friction_cone_edges));
        }

        for (name, value) in [
            ("mu_coulomb", mu_coulomb),
            ("mu_viscous", mu_viscous),
            ("restitution", restitution),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(ContactParametersError::NegativeCoefficient(name));
            }
        }

        Ok(Self {
            mu_coulomb,
            mu_viscous,
            restitution,
            friction_cone_edges,
        })
    }
}
