use super::{AxisExt, ElementId, Gui};
use crate::style::{AlignItems, Axis, Descriptor, Overflow};
use crate::ui::KeyModifiers;

fn overflow_along(layout: &Descriptor, axis: Axis) -> Overflow {
    match axis {
        Axis::Horizontal => layout.overflow_x,
        Axis::Vertical => layout.overflow_y,
    }
}

/// The legal scroll range on `axis`. Content flowing along the axis scrolls
/// towards negative offsets; cross-axis content scrolls according to how it is
/// aligned.
pub(crate) fn scroll_range(layout: &Descriptor, axis: Axis, max_scroll: f32) -> (f32, f32) {
    let max = max_scroll.max(0.0);
    if layout.flex_direction.is_parallel_with(axis) {
        return (-max, 0.0);
    }
    match layout.align_items {
        AlignItems::FlexStart => (-max, 0.0),
        AlignItems::FlexEnd => (0.0, max),
        AlignItems::Center => {
            let half = (max / 2.0).trunc();
            (-half, half)
        }
    }
}

impl Gui {
    /// Clamped scroll value for `axis`, or `None` when the element is gone.
    fn clamp_scroll(&self, id: ElementId, axis: Axis, value: f32) -> Option<f32> {
        let element = self.nodes.get(id)?;
        let (min, max) = scroll_range(
            element.current_layout(),
            axis,
            element.geometry.max_scroll.along(axis),
        );
        Some(value.clamp(min, max))
    }

    fn set_scroll(&mut self, id: ElementId, axis: Axis, value: f32) {
        let scrolls = self
            .nodes
            .get(id)
            .is_some_and(|element| {
                overflow_along(element.current_layout(), axis) == Overflow::Scroll
            });
        if !scrolls {
            return;
        }
        let Some(value) = self.clamp_scroll(id, axis, value) else {
            return;
        };
        if let Some(element) = self.nodes.get_mut(id) {
            element.scroll.offset.set_along(axis, value);
            element.scroll.target.set_along(axis, value);
        }
    }

    fn set_scroll_target(&mut self, id: ElementId, axis: Axis, value: f32) {
        let Some(value) = self.clamp_scroll(id, axis, value) else {
            return;
        };
        if let Some(element) = self.nodes.get_mut(id) {
            element.scroll.target.set_along(axis, value);
        }
    }

    /// Jumps the horizontal scroll offset. Ignored unless `overflow_x` scrolls.
    pub fn set_scroll_x(&mut self, id: ElementId, value: f32) {
        self.set_scroll(id, Axis::Horizontal, value);
    }

    /// Jumps the vertical scroll offset. Ignored unless `overflow_y` scrolls.
    pub fn set_scroll_y(&mut self, id: ElementId, value: f32) {
        self.set_scroll(id, Axis::Vertical, value);
    }

    pub fn set_scroll_target_x(&mut self, id: ElementId, value: f32) {
        self.set_scroll_target(id, Axis::Horizontal, value);
    }

    pub fn set_scroll_target_y(&mut self, id: ElementId, value: f32) {
        self.set_scroll_target(id, Axis::Vertical, value);
    }

    /// Moves the scroll target of `id` by `distance` pixels and notifies the
    /// element's `on_scroll` hook. Positive vertical distances reveal content
    /// above; positive horizontal distances reveal content to the right.
    ///
    /// Returns `true` when the target actually moved.
    pub fn do_scrolling(&mut self, id: ElementId, axis: Axis, distance: i32) -> bool {
        let Some(element) = self.nodes.get(id) else {
            return false;
        };
        let layout = element.current_layout();
        let before = element.scroll.target;
        let applied = overflow_along(layout, axis) == Overflow::Scroll;

        if applied {
            match axis {
                Axis::Vertical => self.set_scroll_target_y(id, before.y + distance as f32),
                Axis::Horizontal => self.set_scroll_target_x(id, before.x - distance as f32),
            }
        }

        self.with_behavior(id, (), |behavior, cx| behavior.on_scroll(cx, axis, distance));

        applied
            && self
                .nodes
                .get(id)
                .is_some_and(|element| element.scroll.target != before)
    }

    /// Moves the scroll offset of `id` towards its target for one frame.
    /// Returns `true` when the offset changed and children need re-placing.
    pub(crate) fn advance_smooth_scroll(&mut self, id: ElementId, dt_seconds: f32) -> bool {
        let smooth = self.config.smooth_scrolling;
        let speed = self.config.smooth_scroll_lerp_speed;
        let Some(element) = self.nodes.get_mut(id) else {
            return false;
        };
        let layout = element.current_layout();
        if layout.overflow_x != Overflow::Scroll && layout.overflow_y != Overflow::Scroll {
            return false;
        }
        let offset = element.scroll.offset;
        let target = element.scroll.target;
        if offset == target {
            return false;
        }

        element.scroll.offset = if smooth {
            let t = (speed * dt_seconds).clamp(0.0, 1.0);
            let next = offset.lerp(target, t);
            if next.distance(target) < 1.0 {
                target
            } else {
                next
            }
        } else {
            target
        };
        true
    }

    /// Routes a wheel delta to the innermost element under the pointer that
    /// can still scroll. Input a child consumes stops there; otherwise it
    /// bubbles to the enclosing containers. Holding shift turns vertical
    /// wheel input horizontal.
    pub fn scroll_event(&mut self, axis: Axis, distance: i32, modifiers: KeyModifiers) -> bool {
        let (axis, distance) = if self.config.hold_shift_to_scroll_horizontally
            && modifiers.contains(KeyModifiers::SHIFT)
            && axis == Axis::Vertical
        {
            (Axis::Horizontal, -distance)
        } else {
            (axis, distance)
        };
        let scaled = (distance as f32 * self.config.scroll_scale) as i32;
        tracing::trace!(?axis, distance = scaled, "scroll event");
        self.scroll_element_tree(self.root, axis, scaled)
    }

    fn scroll_element_tree(&mut self, id: ElementId, axis: Axis, distance: i32) -> bool {
        let children = match self.nodes.get(id) {
            Some(element) => element.children.clone(),
            None => return false,
        };
        for child in children {
            if self.scroll_element_tree(child, axis, distance) {
                return true;
            }
        }

        let Some(element) = self.nodes.get(id) else {
            return false;
        };
        let layout = element.current_layout();
        let reachable = layout.allow_scrolling_from_anywhere || element.pointer.mouse_is_contained;
        reachable && self.do_scrolling(id, axis, distance)
    }
}
