use glam::Vec2;

use super::{AxisExt, ElementId, Gui};
use crate::style::{Axis, ElementState, Overflow, Side};

impl Gui {
    pub fn change_focus_left(&mut self) -> bool {
        self.change_focus(Axis::Horizontal, Side::Start)
    }

    pub fn change_focus_right(&mut self) -> bool {
        self.change_focus(Axis::Horizontal, Side::End)
    }

    pub fn change_focus_up(&mut self) -> bool {
        self.change_focus(Axis::Vertical, Side::Start)
    }

    pub fn change_focus_down(&mut self) -> bool {
        self.change_focus(Axis::Vertical, Side::End)
    }

    /// Moves focus one step along `axis`. With nothing focused the first
    /// focusable element in document order is picked. Returns `true` when the
    /// input changed focus or was absorbed by the focused element.
    pub fn change_focus(&mut self, axis: Axis, side: Side) -> bool {
        let current = self.focused.filter(|id| self.nodes.contains_key(*id));

        let candidate = match current {
            None => self.first_focusable(self.root),
            Some(id) => {
                let overrides = self
                    .nodes
                    .get(id)
                    .is_some_and(|element| element.override_focus_change);
                if overrides
                    && self.with_behavior(id, false, |behavior, cx| {
                        behavior.consume_focus(cx, axis, side)
                    })
                {
                    return true;
                }
                let origin = self
                    .nodes
                    .get(id)
                    .map(|element| element.position())
                    .unwrap_or_default();
                self.next_focusable(id, axis, side, origin)
            }
        };

        let Some(next) = candidate else {
            return false;
        };
        if Some(next) == current {
            return false;
        }

        tracing::debug!(from = ?current, to = ?next, ?axis, ?side, "focus change");
        if let Some(previous) = current {
            self.set_state(previous, ElementState::NEUTRAL);
        }
        self.focused = Some(next);
        self.set_state(next, ElementState::HOVERED);
        self.scroll_element_into_view(next);
        true
    }

    /// Depth-first, first focusable wins.
    fn first_focusable(&self, id: ElementId) -> Option<ElementId> {
        let element = self.nodes.get(id)?;
        if element.focusable {
            return Some(id);
        }
        element
            .children
            .iter()
            .filter(|&&child| self.nodes.get(child).is_some_and(|c| c.has_focusable_in_tree()))
            .find_map(|&child| self.first_focusable(child))
    }

    /// The focusable element reached by always taking the child nearest `side`.
    fn furthest_focusable(&self, id: ElementId, side: Side) -> Option<ElementId> {
        let element = self.nodes.get(id)?;
        if element.focusable {
            return Some(id);
        }
        let has_focusable =
            |child: &&ElementId| self.nodes.get(**child).is_some_and(|c| c.has_focusable_in_tree());
        let child = match side {
            Side::Start => element.children.iter().find(has_focusable),
            Side::End => element.children.iter().rev().find(has_focusable),
        }?;
        self.furthest_focusable(*child, side)
    }

    /// Descends one level at a time into the child nearest `origin` along
    /// that level's flex direction, skipping children with nothing focusable.
    fn closest_focusable_to(&self, id: ElementId, origin: Vec2) -> Option<ElementId> {
        let element = self.nodes.get(id)?;
        if element.focusable {
            return Some(id);
        }
        let axis = element.current_layout().flex_direction.main_axis();

        let mut best: Option<(ElementId, f32)> = None;
        for &child_id in &element.children {
            let Some(child) = self.nodes.get(child_id) else {
                continue;
            };
            if !child.has_focusable_in_tree() {
                continue;
            }
            let distance = (child.position().along(axis) - origin.along(axis)).abs();
            if best.is_none_or(|(_, closest)| distance < closest) {
                best = Some((child_id, distance));
            }
        }
        let (closest, _) = best?;
        self.closest_focusable_to(closest, origin)
    }

    fn next_focusable(
        &self,
        id: ElementId,
        axis: Axis,
        side: Side,
        origin: Vec2,
    ) -> Option<ElementId> {
        let parent_id = self.nodes.get(id)?.parent?;
        let parent = self.nodes.get(parent_id)?;

        if parent.current_layout().flex_direction.is_parallel_with(axis) {
            let index = parent.children.iter().position(|&child| child == id)?;
            let sibling = match side {
                Side::Start => index.checked_sub(1),
                Side::End => Some(index + 1),
            }
            .and_then(|index| parent.children.get(index).copied());

            if let Some(sibling_id) = sibling
                && let Some(sibling) = self.nodes.get(sibling_id)
            {
                if sibling.focusable {
                    return Some(sibling_id);
                }
                if sibling.has_focusable_in_tree() {
                    let found = if sibling.current_layout().flex_direction.is_parallel_with(axis) {
                        self.furthest_focusable(sibling_id, side.invert())
                    } else {
                        self.closest_focusable_to(sibling_id, origin)
                    };
                    if found.is_some() {
                        return found;
                    }
                }
            }
        }

        self.next_focusable(parent_id, axis, side, origin)
    }

    /// Scrolls every scrolling ancestor of `id` just far enough to show its
    /// bounding rectangle plus the ancestor's scroll padding.
    pub fn scroll_element_into_view(&mut self, id: ElementId) {
        let mut cursor = self.nodes.get(id).and_then(|element| element.parent);
        while let Some(ancestor) = cursor {
            let Some(element) = self.nodes.get(ancestor) else {
                break;
            };
            let layout = element.current_layout();
            if layout.overflow_x == Overflow::Scroll || layout.overflow_y == Overflow::Scroll {
                self.scroll_into_view(ancestor, id);
            }
            cursor = self.nodes.get(ancestor).and_then(|element| element.parent);
        }
    }

    fn scroll_into_view(&mut self, container: ElementId, target: ElementId) {
        let (Some(parent), Some(child)) = (self.nodes.get(container), self.nodes.get(target)) else {
            return;
        };
        let layout = parent.current_layout();
        let inner = parent.inner_rect();
        let bounding = child.bounding_rect();
        let padding = layout.scaled_scroll_padding(self.config.ui_scale) as i32;
        let scrolls_x = layout.overflow_x == Overflow::Scroll;
        let scrolls_y = layout.overflow_y == Overflow::Scroll;

        if scrolls_y {
            let diff_top = inner.top() - bounding.top();
            let diff_bottom = bounding.bottom() - inner.bottom();
            if diff_top > 0 {
                self.do_scrolling(container, Axis::Vertical, diff_top + padding);
            } else if diff_bottom > 0 {
                self.do_scrolling(container, Axis::Vertical, -(diff_bottom + padding));
            }
        }
        if scrolls_x {
            let diff_left = inner.left() - bounding.left();
            let diff_right = bounding.right() - inner.right();
            if diff_left > 0 {
                self.do_scrolling(container, Axis::Horizontal, -(diff_left + padding));
            } else if diff_right > 0 {
                self.do_scrolling(container, Axis::Horizontal, diff_right + padding);
            }
        }
    }
}
