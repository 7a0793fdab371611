use std::str::FromStr;

use crate::error::{Result, UiError};

/// A size or offset in one of the two supported units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f32),
    Percent(f32),
}

impl Length {
    pub const fn px(value: f32) -> Self {
        Self::Px(value)
    }

    pub const fn percent(value: f32) -> Self {
        Self::Percent(value)
    }

    pub const fn value(self) -> f32 {
        match self {
            Self::Px(v) | Self::Percent(v) => v,
        }
    }

    pub const fn is_percent(self) -> bool {
        matches!(self, Self::Percent(_))
    }

    /// Parses `"12px"`, `"50%"` or a bare integer (pixels).
    pub fn parse(literal: &str) -> Result<Self> {
        let trimmed = literal.trim();
        let invalid = || UiError::InvalidLiteral(literal.to_string());

        if let Some(number) = trimmed.strip_suffix("px") {
            return number.trim().parse::<f32>().map(Self::Px).map_err(|_| invalid());
        }
        if let Some(number) = trimmed.strip_suffix('%') {
            return number
                .trim()
                .parse::<f32>()
                .map(Self::Percent)
                .map_err(|_| invalid());
        }
        trimmed
            .parse::<i32>()
            .map(|v| Self::Px(v as f32))
            .map_err(|_| invalid())
    }

    /// Pixels are multiplied by `ui_scale`; percentages resolve against
    /// `reference` and stay unresolved when it is unknown.
    pub fn resolve(self, reference: Option<f32>, ui_scale: f32) -> Option<f32> {
        match self {
            Self::Px(v) => Some(v * ui_scale),
            Self::Percent(v) => reference.map(|base| base * v / 100.0),
        }
    }

    /// Interpolates values of the same unit. Mixed units snap to `other`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        match (self, other) {
            (Self::Px(a), Self::Px(b)) => Self::Px(lerp(a, b, t)),
            (Self::Percent(a), Self::Percent(b)) => Self::Percent(lerp(a, b, t)),
            _ => other,
        }
    }
}

impl FromStr for Length {
    type Err = UiError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<f32> for Length {
    fn from(value: f32) -> Self {
        Self::Px(value)
    }
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Both sides must be present for the result to be present.
pub fn lerp_optional(a: Option<Length>, b: Option<Length>, t: f32) -> Option<Length> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.lerp(b, t)),
        _ => None,
    }
}

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= 0.0001
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_pixels_percent_and_bare_integers() {
        assert_eq!(Length::parse("12px").expect("px"), Length::Px(12.0));
        assert_eq!(Length::parse("50%").expect("percent"), Length::Percent(50.0));
        assert_eq!(Length::parse("7").expect("bare"), Length::Px(7.0));
        assert_eq!("2.5px".parse::<Length>().expect("float px"), Length::Px(2.5));
    }

    #[test]
    fn parse_rejects_malformed_literals() {
        for literal in ["12xx", "px", "%", "1.5", "", "abc%"] {
            assert_eq!(
                Length::parse(literal),
                Err(UiError::InvalidLiteral(literal.to_string())),
                "{literal}"
            );
        }
    }

    #[test]
    fn resolve_scales_pixels_and_leaves_percent_to_reference() {
        assert_eq!(Length::px(10.0).resolve(None, 2.0), Some(20.0));
        assert_eq!(Length::percent(50.0).resolve(Some(300.0), 2.0), Some(150.0));
        assert_eq!(Length::percent(50.0).resolve(None, 1.0), None);
    }

    #[test]
    fn optional_lerp_requires_both_sides() {
        let a = Some(Length::px(0.0));
        let b = Some(Length::px(10.0));
        assert_eq!(lerp_optional(a, b, 0.25), Some(Length::px(2.5)));
        assert_eq!(lerp_optional(None, b, 0.25), None);
        assert_eq!(lerp_optional(a, None, 0.25), None);
        assert_eq!(
            lerp_optional(a, Some(Length::percent(40.0)), 0.25),
            Some(Length::percent(40.0))
        );
    }
}
