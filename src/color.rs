/// Channel values used whenever a color string cannot be parsed.
pub const FALLBACK_RGB: Rgb = Rgb {
    r: 59,
    g: 130,
    b: 246,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }

    /// Accepts `#rgb` and `#rrggbb`.
    pub fn parse_hex(input: &str) -> Option<Self> {
        let digits = input.strip_prefix('#')?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        match digits.len() {
            3 => {
                let mut channels = digits.chars().map(|c| {
                    let v = c.to_digit(16).unwrap_or(0) as u8;
                    v * 16 + v
                });
                Some(Self::new(channels.next()?, channels.next()?, channels.next()?))
            }
            6 => {
                let n = u32::from_str_radix(digits, 16).ok()?;
                Some(Self::new(
                    ((n >> 16) & 0xff) as u8,
                    ((n >> 8) & 0xff) as u8,
                    (n & 0xff) as u8,
                ))
            }
            _ => None,
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_rgba(self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, format_alpha(alpha))
    }
}

/// Converts a hex color and an opacity percentage into an `rgba(...)` string.
///
/// Malformed input never fails: it yields [`FALLBACK_RGB`] at the requested alpha.
pub fn hex_to_rgba(hex: &str, opacity_percent: f64) -> String {
    let alpha = opacity_percent / 100.0;
    match Rgb::parse_hex(hex) {
        Some(rgb) => rgb.to_rgba(alpha),
        None => {
            tracing::debug!(hex, "unparseable hex color; using fallback");
            FALLBACK_RGB.to_rgba(alpha)
        }
    }
}

/// Shortest decimal form, matching what browsers print for `n / 100`.
pub fn format_alpha(alpha: f64) -> String {
    if !alpha.is_finite() {
        return "1".to_string();
    }
    format!("{alpha}")
}
