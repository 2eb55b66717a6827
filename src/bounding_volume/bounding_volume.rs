use crate::math::{Point, Real};

/// Operations shared by the volumes that can be merged and tested without a frame change.
///
/// Oriented volumes ([`Obb`](crate::bounding_volume::Obb),
/// [`SweptRect`](crate::bounding_volume::SweptRect), ...) are only compared through
/// [`BoundingVolumeKind`](crate::bounding_volume::BoundingVolumeKind).
pub trait BoundingVolume: Sized {
    /// A point inside of this volume, ideally its center.
    fn center(&self) -> Point<Real>;

    /// Does this volume overlap `other`? Touching volumes overlap.
    fn intersects(&self, other: &Self) -> bool;

    /// Is `other` entirely inside of this volume?
    fn contains(&self, other: &Self) -> bool;

    /// The smallest volume of this kind enclosing both `self` and `other`.
    fn merged(&self, other: &Self) -> Self;

    /// This volume grown by `amount` in every direction.
    ///
    /// `amount` must be non-negative.
    fn loosened(&self, amount: Real) -> Self;
}
