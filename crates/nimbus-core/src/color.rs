//! Color handling for Nimbus diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, providing convenience methods for working with colors
//! in diagram definitions and converting them into Graphviz-compatible values.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{DynamicColor, Srgb};

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use nimbus_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let brown = Color::new("brown").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns the color as a `#rrggbb` hex string, or `#rrggbbaa` when the
    /// color is not fully opaque.
    ///
    /// Graphviz does not understand CSS functional notation, so every color
    /// handed to a renderer goes through this conversion.
    ///
    /// # Examples
    ///
    /// ```
    /// use nimbus_core::color::Color;
    ///
    /// let red = Color::new("red").unwrap();
    /// assert_eq!(red.to_hex(), "#ff0000");
    ///
    /// let faded = red.with_alpha(0.5);
    /// assert_eq!(faded.to_hex().len(), 9);
    /// ```
    pub fn to_hex(self) -> String {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        if rgba.a == u8::MAX {
            format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                rgba.r, rgba.g, rgba.b, rgba.a
            )
        }
    }

    /// Creates a new color with the specified alpha (transparency) value.
    ///
    /// # Arguments
    ///
    /// * `alpha` - The alpha value to set, between 0.0 (fully transparent)
    ///   and 1.0 (fully opaque)
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha (transparency) component of this color.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}
