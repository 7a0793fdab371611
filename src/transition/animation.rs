use super::{Transition, blend};
use crate::style::Descriptor;

#[derive(Debug, Clone, PartialEq)]
pub struct KeyFrame {
    /// Governs the segment that starts at this keyframe.
    pub transition: Transition,
    pub layout: Descriptor,
}

impl KeyFrame {
    pub fn new(transition: Transition, layout: Descriptor) -> Self {
        Self { transition, layout }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    Once,
    Count(u32),
    Forever,
}

/// A keyframe sequence played after a state's transition has settled.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    key_frames: Vec<KeyFrame>,
    loop_mode: LoopMode,
    elapsed_seconds: f32,
    current_frame: usize,
    iterations_complete: u32,
    is_complete: bool,
}

impl Animation {
    pub fn new(key_frames: Vec<KeyFrame>, loop_mode: LoopMode) -> Self {
        Self {
            key_frames,
            loop_mode,
            elapsed_seconds: 0.0,
            current_frame: 0,
            iterations_complete: 0,
            is_complete: false,
        }
    }

    pub fn key_frames(&self) -> &[KeyFrame] {
        &self.key_frames
    }

    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn iterations_complete(&self) -> u32 {
        self.iterations_complete
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn reset(&mut self) {
        self.elapsed_seconds = 0.0;
        self.current_frame = 0;
        self.iterations_complete = 0;
        self.is_complete = false;
    }

    /// Advances by `dt_seconds` and returns the blended descriptor for this
    /// frame, or `None` when there are no keyframes.
    ///
    /// Looping modes play the wrap-around segment from the last keyframe back
    /// to the first. On the final iteration the sequence stops on the last
    /// keyframe and holds there.
    pub fn update(&mut self, dt_seconds: f32) -> Option<Descriptor> {
        let last = self.key_frames.len().checked_sub(1)?;
        if self.is_complete {
            return Some(self.key_frames[last].layout.clone());
        }

        // Time past a segment's end carries into the next one, so long frames
        // can cross several keyframes at once.
        self.elapsed_seconds += dt_seconds.max(0.0);
        for _ in 0..self.key_frames.len() {
            if self.current_frame == last && self.on_final_iteration() {
                break;
            }
            let duration = self.key_frames[self.current_frame].transition.total_duration();
            if self.elapsed_seconds < duration {
                break;
            }
            self.elapsed_seconds -= duration;
            self.current_frame += 1;
            if self.current_frame > last {
                self.current_frame = 0;
                self.iterations_complete += 1;
            }
        }

        if self.current_frame == last && self.on_final_iteration() {
            self.is_complete = true;
            tracing::trace!(iterations = self.iterations_complete, "animation complete");
            return Some(self.key_frames[last].layout.clone());
        }

        let from = &self.key_frames[self.current_frame];
        let to = &self.key_frames[(self.current_frame + 1) % self.key_frames.len()];
        Some(blend(
            &from.layout,
            &to.layout,
            Some(&from.transition),
            self.elapsed_seconds,
        ))
    }

    fn on_final_iteration(&self) -> bool {
        match self.loop_mode {
            LoopMode::Once => true,
            LoopMode::Count(count) => self.iterations_complete + 1 >= count,
            LoopMode::Forever => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::FontId;

    fn frame(gap: f32) -> KeyFrame {
        KeyFrame::new(
            Transition::new(1.0),
            Descriptor::with_font(FontId::new("f")).gap(gap),
        )
    }

    #[test]
    fn loop_once_holds_on_final_keyframe() {
        let mut animation =
            Animation::new(vec![frame(0.0), frame(10.0), frame(20.0)], LoopMode::Once);

        let first = animation.update(0.5).expect("has frames");
        assert!((first.gap - 5.0).abs() < 1e-4);

        let second = animation.update(0.5).expect("has frames");
        assert_eq!(animation.current_frame(), 1);
        assert_eq!(second.gap, 10.0);

        animation.update(1.0);
        assert!(animation.is_complete());
        for _ in 0..5 {
            assert_eq!(animation.update(0.7).map(|d| d.gap), Some(20.0));
        }
    }

    #[test]
    fn forever_wraps_back_to_first_keyframe() {
        let mut animation = Animation::new(vec![frame(0.0), frame(10.0)], LoopMode::Forever);
        animation.update(1.0);
        assert_eq!(animation.current_frame(), 1);
        let wrapping = animation.update(0.5).expect("has frames");
        assert!((wrapping.gap - 5.0).abs() < 1e-4);
        animation.update(0.5);
        assert_eq!(animation.current_frame(), 0);
        assert_eq!(animation.iterations_complete(), 1);
        assert!(!animation.is_complete());
    }

    #[test]
    fn overshoot_carries_into_following_segments() {
        let mut animation =
            Animation::new(vec![frame(0.0), frame(10.0), frame(20.0)], LoopMode::Forever);

        let mid = animation.update(1.25).expect("has frames");
        assert_eq!(animation.current_frame(), 1);
        assert!((mid.gap - 12.5).abs() < 1e-4);

        let wrapping = animation.update(1.5).expect("has frames");
        assert_eq!(animation.current_frame(), 2);
        assert!((wrapping.gap - 5.0).abs() < 1e-4);
    }

    #[test]
    fn count_completes_after_requested_iterations() {
        let mut animation = Animation::new(vec![frame(0.0), frame(10.0)], LoopMode::Count(2));
        for _ in 0..3 {
            animation.update(1.0);
        }
        assert!(animation.is_complete());
        assert_eq!(animation.iterations_complete(), 1);

        animation.reset();
        assert!(!animation.is_complete());
        assert_eq!(animation.current_frame(), 0);
    }

    #[test]
    fn empty_animation_yields_nothing() {
        let mut animation = Animation::new(Vec::new(), LoopMode::Forever);
        assert_eq!(animation.update(0.1), None);
    }
}
