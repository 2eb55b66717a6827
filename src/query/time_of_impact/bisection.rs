use crate::math::Real;

/// The bracket of the first time of impact found by [`bisect_time_of_impact`].
///
/// The configuration at `t` is contact-free while the configuration at `t + h` is in contact.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct TimeOfImpact {
    /// The latest parameter known to be contact-free.
    pub t: Real,
    /// The width of the bracket.
    pub h: Real,
}

impl TimeOfImpact {
    /// The earliest parameter known to be in contact, i.e., `t + h`.
    #[inline]
    pub fn contact_time(&self) -> Real {
        self.t + self.h
    }
}

/// Brackets the first time of impact within `[0, 1]` by bisection.
///
/// The configuration at parameter `1` must be in contact. The closure `in_contact` is called with
/// parameters in `(0, 1]` and must return whether the configuration at that parameter is in
/// contact. The bisection stops once the bracket width falls below `eps_tolerance`, i.e., after
/// `ceil(log2(1 / eps_tolerance))` iterations.
///
/// If the configuration at the returned `t` is itself in contact (for example because the
/// configuration at `0` already interpenetrates), the returned `t` is `0`.
pub fn bisect_time_of_impact(
    eps_tolerance: Real,
    mut in_contact: impl FnMut(Real) -> bool,
) -> TimeOfImpact {
    let eps = eps_tolerance.max(Real::EPSILON);
    let mut t = 0.0;
    let mut h = 1.0;

    while h > eps {
        h *= 0.5;

        if !in_contact(t + h) {
            t += h;
        }
    }

    TimeOfImpact { t, h }
}
