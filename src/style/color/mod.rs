mod hex_color;

pub use hex_color::parse_hex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn to_rgba_u8(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const fn alpha(self) -> u8 {
        self.a
    }

    pub const fn with_alpha(mut self, a: u8) -> Self {
        self.a = a;
        self
    }

    /// Parses `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`. Invalid input yields transparent.
    pub fn hex(raw: &str) -> Self {
        match parse_hex(raw) {
            Some([r, g, b, a]) => Self::rgba(r, g, b, a),
            None => Self::TRANSPARENT,
        }
    }

    pub const fn transparent() -> Self {
        Self::TRANSPARENT
    }

    pub fn is_transparent(self) -> bool {
        self == Self::TRANSPARENT
    }

    /// Per-channel linear interpolation, `t` clamped to `[0, 1]`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn hex_parses_all_supported_lengths() {
        assert_eq!(Color::hex("#fff"), Color::WHITE);
        assert_eq!(Color::hex("#0008"), Color::rgba(0, 0, 0, 0x88));
        assert_eq!(Color::hex("#1976D2"), Color::rgb(0x19, 0x76, 0xD2));
        assert_eq!(Color::hex("#11223344"), Color::rgba(0x11, 0x22, 0x33, 0x44));
    }

    #[test]
    fn invalid_hex_is_transparent() {
        assert!(Color::hex("1976D2").is_transparent());
        assert!(Color::hex("#12345").is_transparent());
        assert!(Color::hex("#ggg").is_transparent());
    }

    #[test]
    fn lerp_hits_both_ends_and_midpoint() {
        let a = Color::rgba(0, 0, 0, 0);
        let b = Color::rgba(200, 100, 50, 255);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Color::rgba(100, 50, 25, 128));
        assert_eq!(a.lerp(b, 4.0), b);
    }
}
