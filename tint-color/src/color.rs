use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Neutral gray used when a session has no usable default color.
pub const NEUTRAL_GRAY: ColorValue = ColorValue::rgb(0x9E, 0x9E, 0x9E);

const OPAQUE: u32 = 0xFF00_0000;

/// Named colors understood by [`ColorValue::from_str`], lower-case.
const NAMED_COLORS: [(&str, u32); 23] = [
    ("black", 0xFF00_0000),
    ("darkgray", 0xFF44_4444),
    ("gray", 0xFF88_8888),
    ("lightgray", 0xFFCC_CCCC),
    ("white", 0xFFFF_FFFF),
    ("red", 0xFFFF_0000),
    ("green", 0xFF00_FF00),
    ("blue", 0xFF00_00FF),
    ("yellow", 0xFFFF_FF00),
    ("cyan", 0xFF00_FFFF),
    ("magenta", 0xFFFF_00FF),
    ("aqua", 0xFF00_FFFF),
    ("fuchsia", 0xFFFF_00FF),
    ("darkgrey", 0xFF44_4444),
    ("grey", 0xFF88_8888),
    ("lightgrey", 0xFFCC_CCCC),
    ("lime", 0xFF00_FF00),
    ("maroon", 0xFF80_0000),
    ("navy", 0xFF00_0080),
    ("olive", 0xFF80_8000),
    ("purple", 0xFF80_0080),
    ("silver", 0xFFC0_C0C0),
    ("teal", 0xFF00_8080),
];

/// Errors produced while parsing a textual color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    #[error("color string is empty")]
    Empty,

    #[error("color `{0}` must have 6 or 8 hex digits after `#`")]
    InvalidLength(String),

    #[error("color `{0}` contains a non-hex digit")]
    InvalidDigit(String),

    #[error("unknown color name `{0}`")]
    UnknownName(String),
}

/// A packed 32-bit ARGB color.
///
/// The canonical text form is upper-case `#RRGGBB` for fully opaque colors
/// and `#AARRGGBB` otherwise, so formatting and parsing are lossless.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ColorValue(u32);

impl ColorValue {
    pub const BLACK: Self = Self::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);

    /// Wrap a raw ARGB integer.
    pub const fn from_argb(argb: u32) -> Self {
        Self(argb)
    }

    /// Build an opaque color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::argb(0xFF, r, g, b)
    }

    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(
            (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32,
        )
    }

    pub const fn to_argb(self) -> u32 {
        self.0
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    pub const fn is_opaque(self) -> bool {
        self.0 & OPAQUE == OPAQUE
    }

    /// Return the same color with a different alpha channel.
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self((self.0 & 0x00FF_FFFF) | (alpha as u32) << 24)
    }

    /// Perceived darkness test used to pick readable foregrounds.
    ///
    /// Alpha is ignored; a color counts as dark when its weighted
    /// luminance is below half of the full range.
    pub fn is_dark(self) -> bool {
        let luminance = 0.299 * f64::from(self.red())
            + 0.587 * f64::from(self.green())
            + 0.114 * f64::from(self.blue());
        1.0 - luminance / 255.0 >= 0.5
    }

    /// Foreground (black or white) that stays readable on this color.
    pub fn contrasting(self) -> Self {
        if self.is_dark() { Self::WHITE } else { Self::BLACK }
    }
}

impl Display for ColorValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:06X}", self.0 & 0x00FF_FFFF)
        } else {
            write!(f, "#{:08X}", self.0)
        }
    }
}

impl FromStr for ColorValue {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseColorError::Empty);
        }

        let Some(digits) = trimmed.strip_prefix('#') else {
            return parse_named(trimmed);
        };

        if !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidDigit(trimmed.to_string()));
        }

        let value = match digits.len() {
            6 => u32::from_str_radix(digits, 16).map(|rgb| rgb | OPAQUE),
            8 => u32::from_str_radix(digits, 16),
            _ => {
                return Err(ParseColorError::InvalidLength(
                    trimmed.to_string(),
                ));
            },
        };

        value
            .map(Self)
            .map_err(|_| ParseColorError::InvalidDigit(trimmed.to_string()))
    }
}

fn parse_named(name: &str) -> Result<ColorValue, ParseColorError> {
    let lowered = name.to_ascii_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(candidate, _)| *candidate == lowered)
        .map(|(_, argb)| ColorValue(*argb))
        .ok_or_else(|| ParseColorError::UnknownName(name.to_string()))
}

impl TryFrom<String> for ColorValue {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ColorValue> for String {
    fn from(value: ColorValue) -> Self {
        value.to_string()
    }
}

impl From<u32> for ColorValue {
    fn from(argb: u32) -> Self {
        Self(argb)
    }
}

impl From<ColorValue> for u32 {
    fn from(value: ColorValue) -> Self {
        value.0
    }
}
