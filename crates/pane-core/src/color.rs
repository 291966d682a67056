use crate::error::{PaneError, PaneResult};

/// Color in 0.0..=1.0 space with alpha channel
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba { r: 1.0, g: 1.0, b: 1.0, a: 1.0 }
    }
}

impl std::fmt::Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgba({:.2}, {:.2}, {:.2}, {:.2})", self.r, self.g, self.b, self.a)
    }
}

impl Rgba {
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(mut self, a: f64) -> Self {
        self.a = a.clamp(0.0, 1.0);
        self
    }

    /// Parse the color notations profiles are stored in.
    ///
    /// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` and
    /// `rgba(r, g, b, a)` with 0-255 channels and a 0.0-1.0 alpha.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Some(hex) = value.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        if let Some(body) = value.strip_prefix("rgba(").and_then(|s| s.strip_suffix(')')) {
            let parts: Vec<&str> = body.split(',').map(str::trim).collect();
            if parts.len() != 4 {
                return None;
            }
            let a: f64 = parts[3].parse().ok()?;
            return Some(Self::parse_channels(&parts[..3])?.with_alpha(a));
        }
        if let Some(body) = value.strip_prefix("rgb(").and_then(|s| s.strip_suffix(')')) {
            let parts: Vec<&str> = body.split(',').map(str::trim).collect();
            if parts.len() != 3 {
                return None;
            }
            return Self::parse_channels(&parts);
        }
        None
    }

    /// Like [`Rgba::parse`], reporting which setting carried the bad value.
    pub fn parse_field(field: &str, value: &str) -> PaneResult<Self> {
        Self::parse(value).ok_or_else(|| PaneError::InvalidColor {
            field: field.to_string(),
            value: value.to_string(),
        })
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| v as f64 / 255.0);
        match hex.len() {
            3 => {
                let expand = |i: usize| channel(&hex[i..i + 1].repeat(2));
                Some(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Some(Self::rgb(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
            8 => Some(Self::rgba(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                channel(&hex[6..8])?,
            )),
            _ => None,
        }
    }

    fn parse_channels(parts: &[&str]) -> Option<Self> {
        let mut out = [0.0; 3];
        for (slot, part) in out.iter_mut().zip(parts) {
            let v: u8 = part.parse().ok()?;
            *slot = v as f64 / 255.0;
        }
        Some(Self::rgb(out[0], out[1], out[2]))
    }

    pub fn to_hex(&self) -> String {
        let c = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", c(self.r), c(self.g), c(self.b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(Rgba::parse("#ffffff"), Some(Rgba::rgb(1.0, 1.0, 1.0)));
        assert_eq!(Rgba::parse("#000"), Some(Rgba::rgb(0.0, 0.0, 0.0)));
        let c = Rgba::parse("#ff000080").unwrap();
        assert_eq!(c.r, 1.0);
        assert!((c.a - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_functional_forms() {
        assert_eq!(Rgba::parse("rgb(255, 0, 0)"), Some(Rgba::rgb(1.0, 0.0, 0.0)));
        assert_eq!(Rgba::parse("rgba(0,0,255,0.5)"), Some(Rgba::rgba(0.0, 0.0, 1.0, 0.5)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Rgba::parse("not-a-color"), None);
        assert_eq!(Rgba::parse("#12345"), None);
        assert_eq!(Rgba::parse("#gggggg"), None);
        assert_eq!(Rgba::parse("rgb(300, 0, 0)"), None);
        assert!(Rgba::parse_field("foreground", "#xyz").is_err());
    }

    #[test]
    fn test_hex_round_trip_of_palette_entry() {
        assert_eq!(Rgba::parse("#cc0000").unwrap().to_hex(), "#cc0000");
    }
}
