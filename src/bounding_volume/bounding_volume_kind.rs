use crate::bounding_volume::{Aabb, BoundingSphere, BoundingVolume, Obb, SweptRect, SweptSegment};
use crate::math::{Isometry, Point, Real, Vector};
use crate::query::details::distance_segment_segment;

/// The kind of bounding volume used by the nodes of a [`BvTree`](crate::partitioning::BvTree).
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoundingVolumeType {
    /// Oriented boxes fitted on the principal axes of the enclosed vertices.
    #[default]
    Obb,
    /// Axis-aligned boxes.
    Aabb,
    /// Spheres.
    Sphere,
    /// Rectangles swept by a sphere.
    SweptRect,
    /// Segments swept by a sphere.
    SweptSegment,
}

/// A bounding volume of any of the supported kinds.
///
/// Intersection tests between any two kinds are supported.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
pub enum BoundingVolumeKind {
    /// An oriented box.
    Obb(Obb),
    /// An axis-aligned box.
    Aabb(Aabb),
    /// A sphere.
    Sphere(BoundingSphere),
    /// A rectangle swept by a sphere.
    SweptRect(SweptRect),
    /// A segment swept by a sphere.
    SweptSegment(SweptSegment),
    /// A volume intersecting everything.
    ///
    /// Used when no meaningful volume can be computed. It forces the exact geometric tests to run.
    PassThrough,
}

impl BoundingVolumeKind {
    /// Computes a bounding volume of the given type enclosing all the given points.
    ///
    /// Returns [`BoundingVolumeKind::PassThrough`] if `pts` is empty or contains non-finite
    /// coordinates.
    pub fn enclose(ty: BoundingVolumeType, pts: &[Point<Real>]) -> Self {
        if pts.is_empty() || pts.iter().any(|pt| !pt.coords.iter().all(|x| x.is_finite())) {
            return Self::PassThrough;
        }

        match ty {
            BoundingVolumeType::Obb => Self::Obb(Obb::from_points(pts)),
            BoundingVolumeType::Aabb => Self::Aabb(Aabb::from_points(pts.iter().copied())),
            BoundingVolumeType::Sphere => Self::Sphere(BoundingSphere::from_points(pts)),
            BoundingVolumeType::SweptRect => Self::SweptRect(SweptRect::from_points(pts)),
            BoundingVolumeType::SweptSegment => Self::SweptSegment(SweptSegment::from_points(pts)),
        }
    }

    /// Is this the pass-through volume?
    #[inline]
    pub fn is_pass_through(&self) -> bool {
        matches!(self, Self::PassThrough)
    }

    /// The center of this volume, if it has one.
    pub fn center(&self) -> Option<Point<Real>> {
        match self {
            Self::Obb(obb) => Some(obb.center),
            Self::Aabb(aabb) => Some(aabb.center()),
            Self::Sphere(sphere) => Some(sphere.center),
            Self::SweptRect(rect) => Some(rect.center),
            Self::SweptSegment(capsule) => Some(capsule.center()),
            Self::PassThrough => None,
        }
    }

    /// The Aabb enclosing this volume, if it is bounded.
    pub fn aabb(&self) -> Option<Aabb> {
        match self {
            Self::Obb(obb) => Some(obb.aabb()),
            Self::Aabb(aabb) => Some(*aabb),
            Self::Sphere(sphere) => Some(sphere.aabb()),
            Self::SweptRect(rect) => Some(rect.aabb()),
            Self::SweptSegment(capsule) => Some(capsule.aabb()),
            Self::PassThrough => None,
        }
    }

    /// Enlarges this volume by `amount` in every direction.
    pub fn loosened(&self, amount: Real) -> Self {
        match self {
            Self::Obb(obb) => Self::Obb(obb.loosened(amount)),
            Self::Aabb(aabb) => Self::Aabb(aabb.loosened(amount)),
            Self::Sphere(sphere) => Self::Sphere(sphere.loosened(amount)),
            Self::SweptRect(rect) => Self::SweptRect(rect.loosened(amount)),
            Self::SweptSegment(capsule) => Self::SweptSegment(capsule.loosened(amount)),
            Self::PassThrough => Self::PassThrough,
        }
    }

    /// Transforms this volume by `m`.
    ///
    /// An Aabb transformed by a transformation with a non-identity rotation becomes an Obb.
    pub fn transform_by(&self, m: &Isometry<Real>) -> Self {
        match self {
            Self::Obb(obb) => Self::Obb(obb.transform_by(m)),
            Self::Aabb(aabb) => {
                if m.rotation.imag() == Vector::zeros() {
                    let shift = m.translation.vector;
                    Self::Aabb(Aabb::new(aabb.mins + shift, aabb.maxs + shift))
                } else {
                    Self::Obb(aabb.transform_by(m))
                }
            }
            Self::Sphere(sphere) => Self::Sphere(sphere.transform_by(m)),
            Self::SweptRect(rect) => Self::SweptRect(rect.transform_by(m)),
            Self::SweptSegment(capsule) => Self::SweptSegment(capsule.transform_by(m)),
            Self::PassThrough => Self::PassThrough,
        }
    }

    /// Tests if `other`, transformed by `pos12`, intersects `self`.
    ///
    /// The transformation `pos12` maps points from the frame of `other` into the frame of `self`.
    #[inline]
    pub fn intersects_with_transform(&self, other: &Self, pos12: &Isometry<Real>) -> bool {
        self.intersects(&other.transform_by(pos12))
    }

    /// Tests if two volumes expressed in the same frame intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        use BoundingVolumeKind as Bv;

        match (self, other) {
            (Bv::PassThrough, _) | (_, Bv::PassThrough) => true,
            (Bv::Obb(a), Bv::Obb(b)) => a.intersects(b),
            (Bv::Aabb(a), Bv::Aabb(b)) => BoundingVolume::intersects(a, b),
            (Bv::Sphere(a), Bv::Sphere(b)) => BoundingVolume::intersects(a, b),
            (Bv::Obb(obb), Bv::Aabb(aabb)) | (Bv::Aabb(aabb), Bv::Obb(obb)) => {
                obb.intersects(&aabb.to_obb())
            }
            (Bv::Obb(obb), Bv::Sphere(sphere)) | (Bv::Sphere(sphere), Bv::Obb(obb)) => {
                obb.distance_squared_to_point(&sphere.center) <= sphere.radius * sphere.radius
            }
            (Bv::Aabb(aabb), Bv::Sphere(sphere)) | (Bv::Sphere(sphere), Bv::Aabb(aabb)) => {
                aabb.distance_squared_to_local_point(&sphere.center)
                    <= sphere.radius * sphere.radius
            }
            (Bv::SweptRect(rect), Bv::Sphere(sphere))
            | (Bv::Sphere(sphere), Bv::SweptRect(rect)) => {
                rect.distance_to_point(&sphere.center) <= sphere.radius + rect.radius
            }
            (Bv::SweptSegment(capsule), Bv::Sphere(sphere))
            | (Bv::Sphere(sphere), Bv::SweptSegment(capsule)) => {
                capsule.distance_to_point(&sphere.center) <= sphere.radius + capsule.radius
            }
            (Bv::SweptRect(a), Bv::SweptRect(b)) => a.distance_to_rect(b) <= a.radius + b.radius,
            (Bv::SweptRect(rect), Bv::SweptSegment(capsule))
            | (Bv::SweptSegment(capsule), Bv::SweptRect(rect)) => {
                rect.distance_to_segment(&capsule.segment) <= rect.radius + capsule.radius
            }
            (Bv::SweptSegment(a), Bv::SweptSegment(b)) => {
                distance_segment_segment(&a.segment, &b.segment) <= a.radius + b.radius
            }
            (Bv::Obb(obb), Bv::SweptRect(rect)) | (Bv::SweptRect(rect), Bv::Obb(obb)) => {
                obb.intersects(&rect.to_obb())
            }
            (Bv::Obb(obb), Bv::SweptSegment(capsule))
            | (Bv::SweptSegment(capsule), Bv::Obb(obb)) => obb.intersects(&capsule.to_obb()),
            (Bv::Aabb(aabb), Bv::SweptRect(rect)) | (Bv::SweptRect(rect), Bv::Aabb(aabb)) => {
                aabb.to_obb().intersects(&rect.to_obb())
            }
            (Bv::Aabb(aabb), Bv::SweptSegment(capsule))
            | (Bv::SweptSegment(capsule), Bv::Aabb(aabb)) => {
                aabb.to_obb().intersects(&capsule.to_obb())
            }
        }
    }
}

impl From<Obb> for BoundingVolumeKind {
    fn from(obb: Obb) -> Self {
        Self::Obb(obb)
    }
}

impl From<Aabb> for BoundingVolumeKind {
    fn from(aabb: Aabb) -> Self {
        Self::Aabb(aabb)
    }
}

impl From<BoundingSphere> for BoundingVolumeKind {
    fn from(sphere: BoundingSphere) -> Self {
        Self::Sphere(sphere)
    }
}

impl From<SweptRect> for BoundingVolumeKind {
    fn from(rect: SweptRect) -> Self {
        Self::SweptRect(rect)
    }
}

impl From<SweptSegment> for BoundingVolumeKind {
    fn from(capsule: SweptSegment) -> Self {
        Self::SweptSegment(capsule)
    }
}
