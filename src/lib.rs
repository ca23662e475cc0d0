//! Procedural generation of square gradient icons with a centered text label.

pub mod config;
pub mod font;
pub mod gradient;
pub mod icon_gen;

pub use config::IconConfig;
pub use gradient::Color;
pub use icon_gen::{create_icon, create_icon_with, generate_icons};
