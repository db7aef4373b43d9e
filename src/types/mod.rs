//! Value types for light attributes and send strategies.

mod brightness;
mod color;
mod color_mode;
mod kelvin;
mod send_mode;

pub use brightness::{Brightness, BrightnessScale};
pub use color::Color;
pub use color_mode::ColorMode;
pub use kelvin::{Kelvin, KelvinRange};
pub use send_mode::SendMode;
