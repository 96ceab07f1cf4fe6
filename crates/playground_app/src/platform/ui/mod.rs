pub mod constants;
pub mod events;
pub mod layout;
pub mod render;
pub mod surface;
