mod broad_phase;
mod contact_groups;
mod deformable;
mod falling_box;
pub mod test_bodies;
