//! Contact events and the reduction of groups of simultaneous contacts.

pub use self::contact_event::{
    remove_duplicate_contacts, ContactEvent, DistanceClass, EventType, FrictionType,
};
pub use self::groups::{determine_connected_contacts, remove_inactive_groups};
pub use self::parameters::{ContactParameters, ContactParametersError};
pub use self::reduction::{
    calc_dimensionality, determine_convex_set, determine_minimal_set, determine_segment_endpoints,
};
pub use self::tolerances::{ContactParameterTable, EventToleranceCache};

mod contact_event;
mod groups;
mod parameters;
mod reduction;
mod tolerances;
