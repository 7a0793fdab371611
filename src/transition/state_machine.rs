use super::{Animation, blend};
use crate::style::{Descriptor, ElementState};

/// Resolves the descriptor an element should use this frame from its base
/// descriptor and current interaction state.
#[derive(Debug, Clone)]
pub struct StyleStateMachine {
    state: ElementState,
    elapsed_seconds: f32,
    previous: Descriptor,
    resolved: Descriptor,
    animation: Option<Animation>,
}

impl StyleStateMachine {
    pub fn new(base: &Descriptor) -> Self {
        Self {
            state: ElementState::NEUTRAL,
            elapsed_seconds: 0.0,
            previous: base.clone(),
            resolved: base.clone(),
            animation: None,
        }
    }

    pub fn state(&self) -> &ElementState {
        &self.state
    }

    pub fn resolved(&self) -> &Descriptor {
        &self.resolved
    }

    /// Returns `true` when the state actually changed. The current resolved
    /// descriptor becomes the starting point of the next blend.
    pub fn set_state(&mut self, state: ElementState) -> bool {
        if self.state == state {
            return false;
        }
        tracing::trace!(from = self.state.as_str(), to = state.as_str(), "style state change");
        self.state = state;
        self.elapsed_seconds = 0.0;
        self.previous = self.resolved.clone();
        self.animation = None;
        true
    }

    /// Restarts the blend from the current resolution without changing state.
    /// Used when the base descriptor itself is swapped out.
    pub fn retarget(&mut self) {
        self.elapsed_seconds = 0.0;
        self.previous = self.resolved.clone();
        self.animation = None;
    }

    pub fn update(&mut self, base: &Descriptor, dt_seconds: f32) -> &Descriptor {
        let dt_seconds = dt_seconds.max(0.0);
        let target = base.layout_for_state(&self.state);

        self.resolved = match target.transition.as_ref() {
            None => target.clone(),
            Some(transition) => {
                self.elapsed_seconds += dt_seconds;
                if self.elapsed_seconds < transition.total_duration() {
                    blend(
                        &self.previous,
                        target,
                        Some(transition),
                        self.elapsed_seconds,
                    )
                } else if let Some(spec) = target.animation.as_ref() {
                    let animation = self.animation.get_or_insert_with(|| spec.clone());
                    animation
                        .update(dt_seconds)
                        .unwrap_or_else(|| target.clone())
                } else {
                    target.clone()
                }
            }
        };
        &self.resolved
    }

    /// Jumps straight to `state` with no blend and restarts its animation.
    pub fn reset(&mut self, base: &Descriptor, state: ElementState) {
        let target = base.layout_for_state(&state).clone();
        self.state = state;
        self.elapsed_seconds = 0.0;
        self.previous = target.clone();
        self.resolved = target;
        self.animation = None;
    }
}
