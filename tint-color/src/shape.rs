use serde::{Deserialize, Serialize};

/// Outline used for color cells in swatch grids and recent-color strips.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
pub enum ColorShape {
    #[default]
    Circle,
    Square,
}
