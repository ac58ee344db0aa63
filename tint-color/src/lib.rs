//! Color primitives shared by the `tint` picker crates.
//!
//! - [`ColorValue`] is a packed 32-bit ARGB color with a canonical
//!   `#RRGGBB` / `#AARRGGBB` text form.
//! - [`ColorShape`] describes how color cells are clipped when rendered.
//! - [`ColorSwatch`] selects one intensity tier of the built-in material
//!   palette.

mod color;
mod palette;
mod shape;

pub use color::{ColorValue, NEUTRAL_GRAY, ParseColorError};
pub use palette::ColorSwatch;
pub use shape::ColorShape;
