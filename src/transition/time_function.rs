use std::f32::consts::PI;
use std::fmt;

/// A caller-supplied easing curve over `[0, 1]`.
#[derive(Clone, Copy)]
pub struct TimingCurve(pub fn(f32) -> f32);

impl PartialEq for TimingCurve {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::fn_addr_eq(self.0, other.0)
    }
}

impl fmt::Debug for TimingCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TimingCurve(..)")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum TimeFunction {
    #[default]
    Linear,
    SmoothStep,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutSine,
    EaseInOutCubic,
    /// Falls back to linear when no curve is supplied.
    Custom(Option<TimingCurve>),
}

impl TimeFunction {
    pub const fn custom(curve: fn(f32) -> f32) -> Self {
        Self::Custom(Some(TimingCurve(curve)))
    }

    pub fn sample(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseInCubic => t * t * t,
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Self::Custom(Some(curve)) => (curve.0)(t),
            Self::Custom(None) => t,
        }
    }
}

/// Progress through a delayed timeline, or `None` while still inside the delay.
pub fn normalized_timeline_progress(
    elapsed_seconds: f32,
    delay_seconds: f32,
    duration_seconds: f32,
) -> Option<f32> {
    if elapsed_seconds < delay_seconds {
        return None;
    }
    if duration_seconds <= f32::EPSILON {
        return Some(1.0);
    }
    Some(((elapsed_seconds - delay_seconds) / duration_seconds).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [TimeFunction; 6] = [
        TimeFunction::Linear,
        TimeFunction::SmoothStep,
        TimeFunction::EaseInCubic,
        TimeFunction::EaseOutCubic,
        TimeFunction::EaseInOutSine,
        TimeFunction::EaseInOutCubic,
    ];

    #[test]
    fn curves_fix_both_endpoints() {
        for timing in ALL {
            assert!(timing.sample(0.0).abs() < 1e-6, "{timing:?}");
            assert!((timing.sample(1.0) - 1.0).abs() < 1e-6, "{timing:?}");
            assert!((timing.sample(2.0) - 1.0).abs() < 1e-6, "{timing:?}");
        }
    }

    #[test]
    fn curves_match_closed_forms() {
        assert!((TimeFunction::SmoothStep.sample(0.25) - 0.15625).abs() < 1e-6);
        assert!((TimeFunction::EaseInCubic.sample(0.5) - 0.125).abs() < 1e-6);
        assert!((TimeFunction::EaseOutCubic.sample(0.5) - 0.875).abs() < 1e-6);
        assert!((TimeFunction::EaseInOutSine.sample(0.5) - 0.5).abs() < 1e-6);
        assert!((TimeFunction::EaseInOutCubic.sample(0.25) - 0.0625).abs() < 1e-6);
        assert!((TimeFunction::EaseInOutCubic.sample(0.75) - 0.9375).abs() < 1e-6);
    }

    #[test]
    fn custom_curve_without_function_is_linear() {
        assert_eq!(TimeFunction::Custom(None).sample(0.3), 0.3);
        assert_eq!(TimeFunction::custom(|t| t * t).sample(0.5), 0.25);
    }

    #[test]
    fn timeline_progress_waits_for_delay() {
        assert_eq!(normalized_timeline_progress(0.1, 0.2, 1.0), None);
        assert_eq!(normalized_timeline_progress(0.7, 0.2, 1.0), Some(0.5));
        assert_eq!(normalized_timeline_progress(0.3, 0.2, 0.0), Some(1.0));
    }
}
