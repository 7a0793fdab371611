use glam::{Affine2, Vec2};

use super::Behavior;
use crate::geometry::Rect;
use crate::style::{Axis, Descriptor, ElementState};
use crate::transition::StyleStateMachine;

slotmap::new_key_type! {
    /// Stable handle to an element owned by a [`super::Gui`].
    pub struct ElementId;
}

/// A value per layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PerAxis<T> {
    pub horizontal: T,
    pub vertical: T,
}

impl<T: Copy> PerAxis<T> {
    pub const fn new(horizontal: T, vertical: T) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub fn get(&self, axis: Axis) -> T {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }

    pub fn set(&mut self, axis: Axis, value: T) {
        match axis {
            Axis::Horizontal => self.horizontal = value,
            Axis::Vertical => self.vertical = value,
        }
    }
}

pub(crate) trait AxisExt {
    fn along(self, axis: Axis) -> f32;
    fn set_along(&mut self, axis: Axis, value: f32);
}

impl AxisExt for Vec2 {
    fn along(self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    fn set_along(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::Horizontal => self.x = value,
            Axis::Vertical => self.y = value,
        }
    }
}

/// Per-axis constraints resolved top-down during the dimension pass. `None`
/// means the value is unresolved and the next rule in line applies.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct AxisConstraints {
    pub start: Option<f32>,
    pub end: Option<f32>,
    pub specified: Option<f32>,
    pub specified_max: Option<f32>,
}

impl AxisConstraints {
    /// The specified size clamped by the specified max.
    pub fn specified_actual(&self) -> Option<f32> {
        let size = self.specified?;
        Some(match self.specified_max {
            Some(max) => size.min(max),
            None => size,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct Geometry {
    pub constraints: PerAxis<AxisConstraints>,
    pub size: Vec2,
    pub outer_size: Vec2,
    pub max_scroll: Vec2,
    pub position: Vec2,
    pub outer: Rect,
    pub bounding: Rect,
    pub inner: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct ScrollState {
    pub offset: Vec2,
    pub target: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct PointerState {
    pub transformed_mouse: Vec2,
    pub mouse_is_contained: bool,
    pub did_mouse_move: bool,
}

pub struct Element {
    pub(crate) layout: Descriptor,
    pub(crate) styles: StyleStateMachine,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    pub(crate) is_root: bool,
    pub(crate) focusable: bool,
    pub(crate) focusable_in_tree: usize,
    pub(crate) override_focus_change: bool,
    pub(crate) behavior: Option<Box<dyn Behavior>>,
    pub(crate) intrinsic_size: Option<Vec2>,
    pub(crate) geometry: Geometry,
    pub(crate) scroll: ScrollState,
    pub(crate) pointer: PointerState,
    pub(crate) current_transform: Option<Affine2>,
}

impl Element {
    pub(crate) fn new(layout: Descriptor) -> Self {
        let styles = StyleStateMachine::new(&layout);
        Self {
            layout,
            styles,
            parent: None,
            children: Vec::new(),
            is_root: false,
            focusable: false,
            focusable_in_tree: 0,
            override_focus_change: false,
            behavior: None,
            intrinsic_size: None,
            geometry: Geometry::default(),
            scroll: ScrollState::default(),
            pointer: PointerState::default(),
            current_transform: None,
        }
    }

    /// The base descriptor, including its per-state sub-layouts.
    pub fn layout(&self) -> &Descriptor {
        &self.layout
    }

    /// The descriptor resolved for this frame.
    pub fn current_layout(&self) -> &Descriptor {
        self.styles.resolved()
    }

    pub fn state(&self) -> &ElementState {
        self.styles.state()
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }

    pub fn is_focusable(&self) -> bool {
        self.focusable
    }

    /// Focusable elements in this subtree, counting this element.
    pub fn focusable_in_tree(&self) -> usize {
        self.focusable_in_tree
    }

    pub fn has_focusable_in_tree(&self) -> bool {
        self.focusable_in_tree > 0
    }

    pub fn overrides_focus_change(&self) -> bool {
        self.override_focus_change
    }

    /// Top-left of the bounding box, in float precision.
    pub fn position(&self) -> Vec2 {
        self.geometry.position
    }

    pub fn size(&self) -> Vec2 {
        self.geometry.size
    }

    pub fn outer_size(&self) -> Vec2 {
        self.geometry.outer_size
    }

    pub fn outer_rect(&self) -> Rect {
        self.geometry.outer
    }

    pub fn bounding_rect(&self) -> Rect {
        self.geometry.bounding
    }

    pub fn inner_rect(&self) -> Rect {
        self.geometry.inner
    }

    pub fn max_scroll(&self) -> Vec2 {
        self.geometry.max_scroll
    }

    pub fn scroll(&self) -> Vec2 {
        self.scroll.offset
    }

    pub fn scroll_target(&self) -> Vec2 {
        self.scroll.target
    }

    pub fn mouse_is_contained(&self) -> bool {
        self.pointer.mouse_is_contained
    }

    pub fn transformed_mouse(&self) -> Vec2 {
        self.pointer.transformed_mouse
    }

    pub fn did_mouse_move(&self) -> bool {
        self.pointer.did_mouse_move
    }

    /// The transform applied around this element's center, when non-identity.
    pub fn current_transform(&self) -> Option<Affine2> {
        self.current_transform
    }

    pub fn intrinsic_size(&self) -> Option<Vec2> {
        self.intrinsic_size
    }

    pub fn requires_complicated_draw(&self) -> bool {
        self.current_layout().requires_complicated_draw()
    }
}
