pub mod model;
pub mod origin;
