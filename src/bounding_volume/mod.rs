//! The volumes enclosing the nodes of a [`BvTree`](crate::partitioning::BvTree), and the
//! intersection tests between any two of them.

pub use self::aabb::Aabb;
pub use self::bounding_sphere::BoundingSphere;
pub use self::bounding_volume::BoundingVolume;
pub use self::bounding_volume_kind::{BoundingVolumeKind, BoundingVolumeType};
pub use self::obb::Obb;
pub use self::swept_rect::SweptRect;
pub use self::swept_segment::SweptSegment;

mod aabb;
mod bounding_sphere;
mod bounding_volume;
mod bounding_volume_kind;
mod obb;
mod swept_rect;
mod swept_segment;
