use serde::{Deserialize, Serialize};

use crate::ColorValue;

/// Intensity tier of the built-in material palette.
///
/// Every tier lists the same nineteen hues in the same order: red, pink,
/// purple, deep purple, indigo, blue, light blue, cyan, teal, green,
/// light green, lime, yellow, amber, orange, deep orange, brown, grey and
/// blue grey.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
pub enum ColorSwatch {
    S100,
    S300,
    #[default]
    S500,
    S700,
    S900,
}

const SWATCH_100: [&str; 19] = [
    "#FFCDD2", "#F8BBD0", "#E1BEE7", "#D1C4E9", "#C5CAE9", "#BBDEFB",
    "#B3E5FC", "#B2EBF2", "#B2DFDB", "#C8E6C9", "#DCEDC8", "#F0F4C3",
    "#FFF9C4", "#FFECB3", "#FFE0B2", "#FFCCBC", "#D7CCC8", "#F5F5F5",
    "#CFD8DC",
];

const SWATCH_300: [&str; 19] = [
    "#E57373", "#F06292", "#BA68C8", "#9575CD", "#7986CB", "#64B5F6",
    "#4FC3F7", "#4DD0E1", "#4DB6AC", "#81C784", "#AED581", "#DCE775",
    "#FFF176", "#FFD54F", "#FFB74D", "#FF8A65", "#A1887F", "#E0E0E0",
    "#90A4AE",
];

const SWATCH_500: [&str; 19] = [
    "#F44336", "#E91E63", "#9C27B0", "#673AB7", "#3F51B5", "#2196F3",
    "#03A9F4", "#00BCD4", "#009688", "#4CAF50", "#8BC34A", "#CDDC39",
    "#FFEB3B", "#FFC107", "#FF9800", "#FF5722", "#795548", "#9E9E9E",
    "#607D8B",
];

const SWATCH_700: [&str; 19] = [
    "#D32F2F", "#C2185B", "#7B1FA2", "#512DA8", "#303F9F", "#1976D2",
    "#0288D1", "#0097A7", "#00796B", "#388E3C", "#689F38", "#AFB42B",
    "#FBC02D", "#FFA000", "#F57C00", "#E64A19", "#5D4037", "#616161",
    "#455A64",
];

const SWATCH_900: [&str; 19] = [
    "#B71C1C", "#880E4F", "#4A148C", "#311B92", "#1A237E", "#0D47A1",
    "#01579B", "#006064", "#004D40", "#1B5E20", "#33691E", "#827717",
    "#F57F17", "#FF6F00", "#E65100", "#BF360C", "#3E2723", "#212121",
    "#263238",
];

impl ColorSwatch {
    pub const ALL: [ColorSwatch; 5] = [
        ColorSwatch::S100,
        ColorSwatch::S300,
        ColorSwatch::S500,
        ColorSwatch::S700,
        ColorSwatch::S900,
    ];

    /// Material intensity number of this tier.
    pub fn level(self) -> u16 {
        match self {
            ColorSwatch::S100 => 100,
            ColorSwatch::S300 => 300,
            ColorSwatch::S500 => 500,
            ColorSwatch::S700 => 700,
            ColorSwatch::S900 => 900,
        }
    }

    /// Canonical hex strings of this tier, in hue order.
    pub fn hex_values(self) -> &'static [&'static str] {
        match self {
            ColorSwatch::S100 => &SWATCH_100,
            ColorSwatch::S300 => &SWATCH_300,
            ColorSwatch::S500 => &SWATCH_500,
            ColorSwatch::S700 => &SWATCH_700,
            ColorSwatch::S900 => &SWATCH_900,
        }
    }

    pub fn colors(self) -> Vec<ColorValue> {
        self.hex_values()
            .iter()
            .filter_map(|hex| hex.parse().ok())
            .collect()
    }
}
