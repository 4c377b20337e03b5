//! Per-nucleotide colors.
//!
//! Colors are ordinary per-nucleotide data: [`colors_by_sequence()`] and
//! [`colors_by_position()`] return a [`Track`], so they are reprojected the
//! same way as any other categorical track (positions that nothing maps onto
//! receive [`Style::neutral`]).

use std::str::FromStr;

use crate::Sequence;
use crate::data::Track;

/// An error related to parsing a [`Color`].
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The string is not a `#rrggbb` or `#rrggbbaa` hex color.
    InvalidHex(String),

    /// The string does not name a palette.
    UnknownPalette(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidHex(value) => write!(
                f,
                "invalid hex color `{value}`: expected `#rrggbb` or `#rrggbbaa`"
            ),
            Error::UnknownPalette(value) => {
                write!(f, "unknown palette `{value}`: expected `new` or `old`")
            }
        }
    }
}

impl std::error::Error for Error {}

/// An 8-bit RGBA color.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Color {
    /// The red channel.
    pub r: u8,

    /// The green channel.
    pub g: u8,

    /// The blue channel.
    pub b: u8,

    /// The alpha channel.
    pub a: u8,
}

impl Color {
    /// Creates a new, opaque [`Color`].
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a new [`Color`] with an alpha channel.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl From<colorgrad::Color> for Color {
    fn from(color: colorgrad::Color) -> Self {
        let [r, g, b, a] = color.to_rgba8();
        Self { r, g, b, a }
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Parses a `#rrggbb` or `#rrggbbaa` hex color.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::color::Color;
    ///
    /// assert_eq!("#366ef0".parse::<Color>()?, Color::rgb(0x36, 0x6e, 0xf0));
    /// assert_eq!("#366EF080".parse::<Color>()?, Color::rgba(0x36, 0x6e, 0xf0, 0x80));
    /// assert!("366ef0".parse::<Color>().is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidHex(s.to_string());

        let digits = s.strip_prefix('#').ok_or_else(invalid)?;

        if !matches!(digits.len(), 6 | 8) || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());

        let a = match digits.len() {
            8 => channel(6)?,
            _ => 255,
        };

        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;

        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }

        Ok(())
    }
}

/// A nucleotide color scheme.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Palette {
    /// Blue for A, light blue for U, red for G, and light red for C.
    #[default]
    New,

    /// Red for A, yellow for U, blue for G, and green for C.
    Old,
}

impl Palette {
    /// Gets the color of a nucleotide, or [`None`] for anything other than
    /// A, C, G, and U.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::color::Color;
    /// use rnalign::color::Palette;
    ///
    /// assert_eq!(Palette::New.color('A'), Some(Color::rgb(0x36, 0x6e, 0xf0)));
    /// assert_eq!(Palette::Old.color('c'), Some(Color::rgb(0x00, 0xc2, 0x00)));
    /// assert_eq!(Palette::New.color('N'), None);
    /// ```
    pub fn color(&self, nucleotide: char) -> Option<Color> {
        let color = match (self, nucleotide.to_ascii_uppercase()) {
            (Palette::New, 'A') => Color::rgb(0x36, 0x6e, 0xf0),
            (Palette::New, 'U') => Color::rgb(0x9b, 0xb9, 0xff),
            (Palette::New, 'G') => Color::rgb(0xf0, 0x4c, 0x4c),
            (Palette::New, 'C') => Color::rgb(0xff, 0xa7, 0x7c),
            (Palette::Old, 'A') => Color::rgb(0xf2, 0x00, 0x00),
            (Palette::Old, 'U') => Color::rgb(0xf2, 0x8f, 0x00),
            (Palette::Old, 'G') => Color::rgb(0x00, 0x50, 0x9d),
            (Palette::Old, 'C') => Color::rgb(0x00, 0xc2, 0x00),
            _ => return None,
        };

        Some(color)
    }
}

impl FromStr for Palette {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Palette::New),
            "old" => Ok(Palette::Old),
            _ => Err(Error::UnknownPalette(s.to_string())),
        }
    }
}

/// Styling shared by every colored track.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Style {
    /// The nucleotide color scheme.
    pub palette: Palette,

    /// The color of positions without data.
    pub neutral: Color,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            neutral: Color::rgb(0x80, 0x80, 0x80),
        }
    }
}

/// Colors each nucleotide of a sequence by its identity.
///
/// Nucleotides without a palette color (`N`, `.`, and `-`) get the neutral
/// color.
///
/// # Examples
///
/// ```
/// use rnalign::color::colors_by_sequence;
/// use rnalign::color::Style;
/// use rnalign::Sequence;
///
/// let style = Style::default();
/// let colors = colors_by_sequence(&"AN".parse::<Sequence>()?, &style);
///
/// assert_eq!(colors.values()[0].to_string(), "#366ef0");
/// assert_eq!(colors.values()[1], style.neutral);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn colors_by_sequence(sequence: &Sequence, style: &Style) -> Track<Color> {
    let values = sequence
        .as_str()
        .chars()
        .map(|c| style.palette.color(c).unwrap_or(style.neutral))
        .collect();

    Track::try_new(sequence.clone(), values, style.neutral)
        .unwrap_or_else(|_| unreachable!("one color is produced per nucleotide"))
}

/// Colors each nucleotide of a sequence by its position, spanning a rainbow
/// from the first nucleotide to the last.
///
/// # Examples
///
/// ```
/// use rnalign::color::colors_by_position;
/// use rnalign::color::Style;
/// use rnalign::Sequence;
///
/// let colors = colors_by_position(&"AUCGAUCG".parse::<Sequence>()?, &Style::default());
///
/// assert_eq!(colors.values().len(), 8);
/// assert_ne!(colors.values()[0], colors.values()[7]);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn colors_by_position(sequence: &Sequence, style: &Style) -> Track<Color> {
    let gradient = colorgrad::rainbow();
    let length = sequence.len();

    let values = (0..length)
        .map(|n| Color::from(gradient.at(n as f64 / length as f64)))
        .collect();

    Track::try_new(sequence.clone(), values, style.neutral)
        .unwrap_or_else(|_| unreachable!("one color is produced per nucleotide"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AlignmentMap;
    use crate::data::Dataset;

    #[test]
    fn test_display_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let color = Color::rgba(1, 2, 3, 4);
        assert_eq!(color.to_string(), "#01020304");
        assert_eq!(color.to_string().parse::<Color>()?, color);

        Ok(())
    }

    #[test]
    fn test_invalid_hex() {
        let err = "#12345".parse::<Color>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid hex color `#12345`: expected `#rrggbb` or `#rrggbbaa`"
        );
        assert!("#gg0000".parse::<Color>().is_err());
    }

    #[test]
    fn test_unmapped_colors_are_neutral() -> Result<(), Box<dyn std::error::Error>> {
        let source = "AUG".parse::<Sequence>()?;
        let target = "AUUG".parse::<Sequence>()?;
        let map = AlignmentMap::try_from_forward(source.clone(), target, vec![0, 1, 2, 4])?;

        let style = Style {
            palette: Palette::Old,
            neutral: Color::rgb(0, 0, 0),
        };

        let colors = colors_by_sequence(&source, &style)
            .get_aligned_data(&map)?
            .into_inner();

        assert_eq!(
            colors.values(),
            &[
                Palette::Old.color('A').unwrap(),
                Palette::Old.color('U').unwrap(),
                Color::rgb(0, 0, 0),
                Palette::Old.color('G').unwrap(),
            ]
        );

        Ok(())
    }
}
