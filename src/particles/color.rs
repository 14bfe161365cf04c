//! Particle color resolution.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// `#bb40ec`, used whenever the theme color cannot be resolved.
pub const FALLBACK_COLOR: Rgb = Rgb { r: 187, g: 64, b: 236 };

impl Rgb {
    /// Parse `#rrggbb` or `#rgb` (surrounding whitespace allowed).
    pub fn parse_hex(s: &str) -> Option<Rgb> {
        let hex = s.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let channel = |h: &str| u8::from_str_radix(h, 16).ok();
        match hex.len() {
            6 => Some(Rgb {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
            }),
            3 => {
                // #abc == #aabbcc
                let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Some(Rgb { r: short(0)?, g: short(1)?, b: short(2)? })
            }
            _ => None,
        }
    }

    /// First parsable candidate, else the fallback color.
    pub fn resolve<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Rgb {
        candidates
            .into_iter()
            .flatten()
            .find_map(Rgb::parse_hex)
            .unwrap_or(FALLBACK_COLOR)
    }

    /// CSS `rgba(...)` string at the given opacity.
    pub fn rgba(&self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
