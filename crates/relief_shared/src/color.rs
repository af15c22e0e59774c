//! Premultiplied RGBA colors as they appear in style documents.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while parsing a style color.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// The string is not a supported color notation.
    #[error("unsupported color notation: {0:?}")]
    Unsupported(String),

    /// A hex digit was malformed.
    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),

    /// A component was outside `0..=1`.
    #[error("color component out of range: {0}")]
    OutOfRange(String),
}

/// Premultiplied RGBA color in linear `0..=1` components.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
#[serde(try_from = "ColorValue", into = "String")]
pub struct Color {
    /// Red, premultiplied
    pub r: f32,
    /// Green, premultiplied
    pub g: f32,
    /// Blue, premultiplied
    pub b: f32,
    /// Alpha
    pub a: f32,
}

impl Color {
    /// Creates a color from premultiplied components.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Premultiplies straight-alpha components.
    #[must_use]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::new(r * a, g * a, b * a, a)
    }

    /// Opaque black
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Opaque white
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Fully transparent
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Converts to array
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`.
    ///
    /// # Errors
    /// Returns an error for any other notation or malformed digits.
    pub fn parse(text: &str) -> Result<Self, ColorParseError> {
        let trimmed = text.trim();
        let Some(hex) = trimmed.strip_prefix('#') else {
            return Err(ColorParseError::Unsupported(text.to_owned()));
        };
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidHex(text.to_owned()));
        }

        let digits: Vec<u8> = match hex.len() {
            3 => hex
                .chars()
                .map(|c| c.to_digit(16).map_or(0, |d| (d * 17) as u8))
                .collect(),
            6 | 8 => (0..hex.len())
                .step_by(2)
                .map(|i| u8::from_str_radix(&hex[i..i + 2], 16))
                .collect::<Result<_, _>>()
                .map_err(|_| ColorParseError::InvalidHex(text.to_owned()))?,
            _ => return Err(ColorParseError::InvalidHex(text.to_owned())),
        };

        let channel = |i: usize| digits.get(i).map_or(1.0, |d| f32::from(*d) / 255.0);
        Ok(Self::from_straight(channel(0), channel(1), channel(2), channel(3)))
    }

    /// Formats as `#rrggbbaa` with straight alpha, the inverse of [`Color::parse`].
    #[must_use]
    pub fn to_hex(self) -> String {
        if self.a <= 0.0 {
            return "#00000000".to_owned();
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        let [r, g, b] = [self.r, self.g, self.b].map(|c| byte(c / self.a));
        format!("#{r:02x}{g:02x}{b:02x}{:02x}", byte(self.a))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Wire forms a style document may use for a color.
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorValue {
    Css(String),
    Components([f32; 4]),
}

impl TryFrom<ColorValue> for Color {
    type Error = ColorParseError;

    fn try_from(value: ColorValue) -> Result<Self, Self::Error> {
        match value {
            ColorValue::Css(text) => Self::parse(&text),
            ColorValue::Components([r, g, b, a]) => {
                if [r, g, b, a].iter().any(|c| !(0.0..=1.0).contains(c)) {
                    return Err(ColorParseError::OutOfRange(format!("[{r}, {g}, {b}, {a}]")));
                }
                Ok(Self::from_straight(r, g, b, a))
            }
        }
    }
}
