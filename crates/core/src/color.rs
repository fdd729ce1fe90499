//! Colors and the named-color palette.

use crate::error::{Error, Result};
use crate::lighting::InputWarning;
use crate::protocol::to_byte;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// A 24-bit color, sent on the wire as three bytes R, G, B.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from untrusted integer components.
    pub fn try_from_components(r: i64, g: i64, b: i64) -> Result<Self> {
        Ok(Self::new(to_byte(r)?, to_byte(g)?, to_byte(b)?))
    }

    /// Wire representation.
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Build a color from integer components, substituting white when any
/// component is outside 0..=255.
pub fn rgb_or_white(r: i64, g: i64, b: i64) -> (Rgb, Option<InputWarning>) {
    match Rgb::try_from_components(r, g, b) {
        Ok(rgb) => (rgb, None),
        Err(_) => (Rgb::WHITE, Some(InputWarning::InvalidRgb { r, g, b })),
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Accepts `#rrggbb`, `0xrrggbb` or a decimal triple `r,g,b`.
impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.contains(',') {
            let parts = s
                .split(',')
                .map(|p| {
                    p.trim()
                        .parse::<i64>()
                        .map_err(|e| Error::Config(format!("invalid color component '{p}': {e}")))
                })
                .collect::<Result<Vec<i64>>>()?;
            return match parts.as_slice() {
                [r, g, b] => Self::try_from_components(*r, *g, *b),
                _ => Err(Error::Config(format!(
                    "expected three color components, got '{s}'"
                ))),
            };
        }

        let hex = s
            .strip_prefix('#')
            .or_else(|| s.strip_prefix("0x"))
            .ok_or_else(|| Error::Config(format!("unrecognized color '{s}'")))?;
        if hex.len() != 6 {
            return Err(Error::Config(format!("expected 6 hex digits, got '{s}'")));
        }
        let value = u32::from_str_radix(hex, 16)
            .map_err(|e| Error::Config(format!("invalid hex color '{s}': {e}")))?;
        Ok(Self::new(
            ((value >> 16) & 0xFF) as u8,
            ((value >> 8) & 0xFF) as u8,
            (value & 0xFF) as u8,
        ))
    }
}

impl TryFrom<String> for Rgb {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(rgb: Rgb) -> Self {
        rgb.to_string()
    }
}

/// Built-in named colors.
pub const DEFAULT_COLORS: &[(&str, Rgb)] = &[
    ("red", Rgb::new(255, 0, 0)),
    ("green", Rgb::new(0, 255, 0)),
    ("blue", Rgb::new(0, 0, 255)),
    ("aqua", Rgb::new(0, 200, 50)),
    ("orange", Rgb::new(255, 50, 0)),
    ("white", Rgb::new(255, 255, 255)),
];

/// Immutable name → color table.
///
/// Deserializing a palette layers the given entries over the built-in colors,
/// so a config file only needs to list additions or overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Rgb>", into = "BTreeMap<String, Rgb>")]
pub struct Palette {
    colors: BTreeMap<String, Rgb>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS
                .iter()
                .map(|(name, rgb)| (name.to_string(), *rgb))
                .collect(),
        }
    }
}

impl From<BTreeMap<String, Rgb>> for Palette {
    fn from(extra: BTreeMap<String, Rgb>) -> Self {
        let mut palette = Self::default();
        for (name, rgb) in extra {
            palette.colors.insert(normalize(&name), rgb);
        }
        palette
    }
}

impl From<Palette> for BTreeMap<String, Rgb> {
    fn from(palette: Palette) -> Self {
        palette.colors
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

impl Palette {
    /// Look up a color by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<Rgb> {
        self.colors.get(&normalize(name)).copied()
    }

    /// All entries, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Rgb)> {
        self.colors.iter().map(|(name, rgb)| (name.as_str(), *rgb))
    }

    /// Look up a color by name, substituting white when it is unknown.
    pub fn resolve(&self, name: &str) -> (Rgb, Option<InputWarning>) {
        match self.get(name) {
            Some(rgb) => (rgb, None),
            None => (
                Rgb::WHITE,
                Some(InputWarning::UnknownColorName {
                    name: name.to_string(),
                }),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_has_builtin_colors() {
        let palette = Palette::default();
        assert_eq!(palette.get("red"), Some(Rgb::new(255, 0, 0)));
        assert_eq!(palette.get("aqua"), Some(Rgb::new(0, 200, 50)));
        assert_eq!(palette.get("orange"), Some(Rgb::new(255, 50, 0)));
        assert_eq!(palette.get("white"), Some(Rgb::WHITE));
        assert_eq!(palette.iter().count(), 6);
    }

    #[test]
    fn palette_lookup_is_case_insensitive() {
        let palette = Palette::default();
        assert_eq!(palette.get(" Blue "), Some(Rgb::new(0, 0, 255)));
    }

    #[test]
    fn palette_resolve_unknown_falls_back_to_white() {
        let (rgb, warning) = Palette::default().resolve("mauve");
        assert_eq!(rgb, Rgb::WHITE);
        assert_eq!(
            warning,
            Some(InputWarning::UnknownColorName {
                name: "mauve".into()
            })
        );
    }

    #[test]
    fn rgb_or_white_accepts_valid_components() {
        assert_eq!(rgb_or_white(255, 0, 0), (Rgb::new(255, 0, 0), None));
        assert_eq!(rgb_or_white(0, 0, 0), (Rgb::new(0, 0, 0), None));
    }

    #[test]
    fn rgb_or_white_rejects_out_of_range() {
        let (rgb, warning) = rgb_or_white(300, 0, 0);
        assert_eq!(rgb, Rgb::WHITE);
        assert_eq!(warning, Some(InputWarning::InvalidRgb { r: 300, g: 0, b: 0 }));

        let (rgb, _) = rgb_or_white(0, -1, 0);
        assert_eq!(rgb, Rgb::WHITE);
    }

    #[test]
    fn rgb_parses_hex_and_triples() {
        assert_eq!("#ff3200".parse::<Rgb>().unwrap(), Rgb::new(255, 50, 0));
        assert_eq!("0x00C832".parse::<Rgb>().unwrap(), Rgb::new(0, 200, 50));
        assert_eq!("10, 20, 30".parse::<Rgb>().unwrap(), Rgb::new(10, 20, 30));
    }

    #[test]
    fn rgb_parse_rejects_garbage() {
        assert!("red".parse::<Rgb>().is_err());
        assert!("#fff".parse::<Rgb>().is_err());
        assert!("1,2".parse::<Rgb>().is_err());
        assert!("256,0,0".parse::<Rgb>().is_err());
    }

    #[test]
    fn rgb_display_is_hex() {
        assert_eq!(Rgb::new(0, 200, 50).to_string(), "#00c832");
    }

    #[test]
    fn palette_deserialize_layers_over_defaults() {
        let palette: Palette =
            serde_json::from_str(r##"{"Purple": "#800080", "red": "200,0,0"}"##).unwrap();
        assert_eq!(palette.get("purple"), Some(Rgb::new(128, 0, 128)));
        assert_eq!(palette.get("red"), Some(Rgb::new(200, 0, 0)));
        assert_eq!(palette.get("green"), Some(Rgb::new(0, 255, 0)));
    }
}
