extern crate serde;

use serde::{Serialize, Deserialize};

/// Horizontal alignment of printed lines
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Justification {
    Left,
    Center,
    Right
}

impl Justification {
    pub fn as_byte(&self) -> u8 {
        match self {
            Justification::Left => 0x00,
            Justification::Center => 0x01,
            Justification::Right => 0x02
        }
    }
}

/// Underline thickness
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Underline {
    Off,
    /// One dot thick
    Thin,
    /// Two dots thick
    Thick
}

impl Underline {
    /// Maps 0, 1 and 2 to the three thicknesses. Anything above 2 is thick.
    pub fn from_level(level: u8) -> Underline {
        match level {
            0 => Underline::Off,
            1 => Underline::Thin,
            _ => Underline::Thick
        }
    }

    pub fn as_byte(&self) -> u8 {
        match self {
            Underline::Off => 0x00,
            Underline::Thin => 0x01,
            Underline::Thick => 0x02
        }
    }
}

/// Current formatting of a print session
///
/// There is exactly one live style per [Printer](crate::Printer). Setters overwrite a single field, nothing is ever stacked.
///
/// ```rust
/// use escpos_markdown::{Style, Justification};
///
/// let style = Style::default();
/// assert_eq!((style.width, style.height), (1, 1));
/// assert_eq!(style.justify, Justification::Left);
/// ```
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Style {
    pub bold: bool,
    /// Width multiplier, 1 to 8
    pub width: u8,
    /// Height multiplier, 1 to 8
    pub height: u8,
    pub underline: Underline,
    /// White text over black background
    pub reverse: bool,
    pub upside_down: bool,
    /// 90 degrees clockwise
    pub rotate: bool,
    pub justify: Justification
}

impl Default for Style {
    fn default() -> Style {
        Style {
            bold: false,
            width: 1,
            height: 1,
            underline: Underline::Off,
            reverse: false,
            upside_down: false,
            rotate: false,
            justify: Justification::Left
        }
    }
}
