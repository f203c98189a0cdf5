pub mod dynamic_height;
pub mod interpolation;
pub mod montgomery;
