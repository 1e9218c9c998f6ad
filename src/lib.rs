pub mod camera;
pub mod config;
pub mod error;
pub mod field;
pub mod marcher;
pub mod math;
pub mod noise;
pub mod render;
pub mod shader;

pub use field::DensityField;
