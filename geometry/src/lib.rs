mod features;
mod point;
mod simplify;
pub mod transform;

pub use features::angles;
pub use point::{ParsePointError, Point};
pub use simplify::{simplify, DENSIFY_TOLERANCE};
