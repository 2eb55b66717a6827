use crate::contact::{ContactEvent, ContactParameters};
use crate::math::Real;
use crate::pipeline::{BodyHandle, BodySet};
use crate::utils::SortedPair;
use hashbrown::HashMap;

/// Classification tolerances of the contacts between pairs of bodies, persisted across steps.
#[derive(Clone, Debug, Default)]
pub struct EventToleranceCache {
    tolerances: HashMap<SortedPair<BodyHandle>, Real>,
}

impl EventToleranceCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached tolerance for a pair of bodies, or `default` if there is none.
    pub fn tolerance_for(&self, pair: SortedPair<BodyHandle>, default: Real) -> Real {
        self.tolerances.get(&pair).copied().unwrap_or(default)
    }

    /// Stores the velocity-scaled tolerance of each contact for its pair of bodies.
    ///
    /// If several contacts involve the same pair, the largest tolerance is kept.
    pub fn update(&mut self, contacts: &[ContactEvent], bodies: &impl BodySet) {
        let mut fresh: HashMap<SortedPair<BodyHandle>, Real> = HashMap::new();

        for contact in contacts {
            let tol = contact.contact_tolerance(bodies);
            let entry = fresh
                .entry(SortedPair::new(contact.body1, contact.body2))
                .or_insert(tol);
            *entry = entry.max(tol);
        }

        self.tolerances.extend(fresh);
    }

    /// Sets the tolerance of each contact from the cache, using `default` for unknown pairs.
    pub fn apply(&self, contacts: &mut [ContactEvent], default: Real) {
        for contact in contacts {
            contact.tol = self.tolerance_for(SortedPair::new(contact.body1, contact.body2), default);
        }
    }

    /// The number of cached pairs.
    pub fn len(&self) -> usize {
        self.tolerances.len()
    }

    /// Is the cache empty?
    pub fn is_empty(&self) -> bool {
        self.tolerances.is_empty()
    }

    /// Removes all cached tolerances.
    pub fn clear(&mut self) {
        self.tolerances.clear();
    }
}

/// Contact parameters for pairs of bodies, with a default for the pairs not listed.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default)]
pub struct ContactParameterTable {
    default: ContactParameters,
    pairs: HashMap<SortedPair<BodyHandle>, ContactParameters>,
}

impl ContactParameterTable {
    /// Creates a table where every pair of bodies uses `default`.
    pub fn new(default: ContactParameters) -> Self {
        Self {
            default,
            pairs: HashMap::new(),
        }
    }

    /// Sets the parameters for the contacts between `body1` and `body2`.
    ///
    /// Returns the parameters previously set for this pair, if any.
    pub fn insert(
        &mut self,
        body1: BodyHandle,
        body2: BodyHandle,
        params: ContactParameters,
    ) -> Option<ContactParameters> {
        self.pairs.insert(SortedPair::new(body1, body2), params)
    }

    /// The parameters used for the contacts between `body1` and `body2`.
    pub fn get(&self, body1: BodyHandle, body2: BodyHandle) -> &ContactParameters {
        self.pairs
            .get(&SortedPair::new(body1, body2))
            .unwrap_or(&self.default)
    }

    /// Copies the parameters of the matching pair into each contact.
    pub fn apply(&self, contacts: &mut [ContactEvent]) {
        for contact in contacts {
            contact.set_contact_parameters(self.get(contact.body1, contact.body2));
        }
    }
}
