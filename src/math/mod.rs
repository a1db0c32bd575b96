mod color;
mod transform;

pub use color::{hex_to_linear, hsv_to_rgb, srgb_to_linear};
pub use transform::Transform;
