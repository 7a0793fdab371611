use super::TimeFunction;

/// How to blend into a descriptor after an interaction-state change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub duration_seconds: f32,
    pub delay_seconds: f32,
    pub timing: TimeFunction,
}

impl Transition {
    pub const fn new(duration_seconds: f32) -> Self {
        Self {
            duration_seconds,
            delay_seconds: 0.0,
            timing: TimeFunction::Linear,
        }
    }

    pub const fn delay(mut self, delay_seconds: f32) -> Self {
        self.delay_seconds = delay_seconds;
        self
    }

    pub const fn timing(mut self, timing: TimeFunction) -> Self {
        self.timing = timing;
        self
    }

    pub fn total_duration(&self) -> f32 {
        self.duration_seconds + self.delay_seconds
    }

    /// Eased progress at `elapsed` seconds after the state change. Inside the
    /// delay this is `0`; at or past the end it is `1`.
    pub fn progress(&self, elapsed_seconds: f32) -> f32 {
        match super::normalized_timeline_progress(
            elapsed_seconds,
            self.delay_seconds,
            self.duration_seconds,
        ) {
            Some(linear) => self.timing.sample(linear),
            None => 0.0,
        }
    }
}
