use std::cell::RefCell;
use std::rc::Rc;

use crate::config::UiConfig;
use crate::error::Result;
use crate::geometry::Rect;
use crate::render::Renderer;
use crate::style::{
    AlignItems, Axis, Descriptor, ElementState, FlexDirection, JustifyContent, Length, PositionMode,
    Side,
};
use crate::ui::{ButtonState, MouseButton, ValueChangeEvent, ValueChangeHandlerProp};
use crate::view::{AxisExt, Behavior, Element, ElementContext, ElementId, Gui};

#[derive(Debug)]
struct SliderModel {
    min: f32,
    max: f32,
    value: f32,
    value_target: f32,
    nudge_lerp_speed: f32,
    nudge_increment: f32,
    is_dragging: bool,
    element: ElementId,
    on_value_change: Option<ValueChangeHandlerProp>,
    on_value_target_change: Option<ValueChangeHandlerProp>,
}

impl SliderModel {
    fn range(&self) -> f32 {
        self.max - self.min
    }

    fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min.min(self.max), self.max.max(self.min))
    }
}

/// Shared handle to a slider's value. Cloning is cheap; every clone sees the
/// same state. Change handlers run after the internal borrow is released, so
/// they may read the slider freely.
#[derive(Debug, Clone)]
pub struct SliderValue(Rc<RefCell<SliderModel>>);

impl SliderValue {
    pub fn min(&self) -> f32 {
        self.0.borrow().min
    }

    pub fn max(&self) -> f32 {
        self.0.borrow().max
    }

    pub fn value(&self) -> f32 {
        self.0.borrow().value
    }

    /// Where the value is heading when it is not being dragged.
    pub fn target(&self) -> f32 {
        self.0.borrow().value_target
    }

    pub fn is_dragging(&self) -> bool {
        self.0.borrow().is_dragging
    }

    /// Position of the value within `[min, max]`, or 0 for an empty range.
    pub fn proportion(&self) -> f32 {
        let model = self.0.borrow();
        let range = model.range();
        if range == 0.0 {
            0.0
        } else {
            (model.value - model.min) / range
        }
    }

    pub fn set_value(&self, value: f32) {
        let notify = {
            let mut model = self.0.borrow_mut();
            let value = model.clamp(value);
            if value == model.value {
                return;
            }
            model.value = value;
            (model.on_value_change.clone(), model.element, value)
        };
        fire(notify);
    }

    pub fn set_target(&self, value: f32) {
        let notify = {
            let mut model = self.0.borrow_mut();
            let value = model.clamp(value);
            if value == model.value_target {
                return;
            }
            model.value_target = value;
            (model.on_value_target_change.clone(), model.element, value)
        };
        fire(notify);
    }

    fn set_dragging(&self, dragging: bool) {
        self.0.borrow_mut().is_dragging = dragging;
    }

    /// Sets value and target together, as a drag does.
    fn jump_to(&self, value: f32) {
        self.set_value(value);
        self.set_target(value);
    }

    /// Moves the value towards its target for one frame, snapping once it is
    /// within a thousandth of the range.
    fn approach_target(&self, dt_seconds: f32) {
        let next = {
            let model = self.0.borrow();
            if model.value == model.value_target {
                return;
            }
            let t = (model.nudge_lerp_speed * dt_seconds).clamp(0.0, 1.0);
            let next = model.value + (model.value_target - model.value) * t;
            if (model.value_target - next).abs() < 0.001 * model.range().abs() {
                model.value_target
            } else {
                next
            }
        };
        self.set_value(next);
    }

    fn nudge(&self, direction: f32) -> bool {
        let (before, step) = {
            let model = self.0.borrow();
            (model.value_target, model.nudge_increment * model.range())
        };
        self.set_target(before + direction * step);
        self.target() != before
    }
}

fn fire((handler, target, value): (Option<ValueChangeHandlerProp>, ElementId, f32)) {
    if let Some(handler) = handler {
        handler.call(&mut ValueChangeEvent { target, value });
    }
}

pub struct SliderProps {
    pub min: f32,
    pub max: f32,
    pub value: f32,
    pub nudge_lerp_speed: f32,
    /// Fraction of the range moved per directional input.
    pub nudge_increment: f32,
    pub on_value_change: Option<ValueChangeHandlerProp>,
    pub on_value_target_change: Option<ValueChangeHandlerProp>,
}

impl SliderProps {
    pub fn new(min: f32, max: f32, value: f32) -> Self {
        Self {
            min,
            max,
            value,
            nudge_lerp_speed: 12.0,
            nudge_increment: 0.1,
            on_value_change: None,
            on_value_target_change: None,
        }
    }

    pub fn nudge(mut self, increment: f32, lerp_speed: f32) -> Self {
        self.nudge_increment = increment;
        self.nudge_lerp_speed = lerp_speed;
        self
    }

    pub fn on_value_change(mut self, handler: impl Into<ValueChangeHandlerProp>) -> Self {
        self.on_value_change = Some(handler.into());
        self
    }

    pub fn on_value_target_change(mut self, handler: impl Into<ValueChangeHandlerProp>) -> Self {
        self.on_value_target_change = Some(handler.into());
        self
    }
}

/// The elements making up a slider. `track` is detached; attach it where the
/// slider belongs.
#[derive(Debug, Clone)]
pub struct SliderParts {
    pub track: ElementId,
    pub handle_container: ElementId,
    pub handle: ElementId,
    pub value: SliderValue,
}

/// Builds a track laid out by `track_layout` holding a focusable handle laid
/// out by `handle_layout`. The track's flex direction picks the slider axis;
/// `JustifyContent::FlexEnd` runs it backwards.
pub fn build_slider(
    gui: &mut Gui,
    props: SliderProps,
    track_layout: Descriptor,
    handle_layout: Descriptor,
) -> Result<SliderParts> {
    let container_layout = Descriptor::with_font(track_layout.font.clone())
        .size(0.0, 0.0)
        .position_mode(PositionMode::Relative)
        .justify_content(JustifyContent::Center)
        .align_items(AlignItems::Center);

    let track = gui.create_element(track_layout);
    let handle_container = gui.create_element(container_layout);
    let handle = gui.create_element(handle_layout);
    gui.add_child(track, handle_container)?;
    gui.add_child(handle_container, handle)?;

    let mut model = SliderModel {
        min: props.min,
        max: props.max,
        value: props.value,
        value_target: props.value,
        nudge_lerp_speed: props.nudge_lerp_speed,
        nudge_increment: props.nudge_increment,
        is_dragging: false,
        element: track,
        on_value_change: props.on_value_change,
        on_value_target_change: props.on_value_target_change,
    };
    model.value = model.clamp(model.value);
    model.value_target = model.value;
    let value = SliderValue(Rc::new(RefCell::new(model)));

    gui.set_behavior(
        track,
        SliderTrack {
            value: value.clone(),
            handle_container,
            handle,
        },
    );
    gui.set_behavior(
        handle,
        SliderHandle {
            value: value.clone(),
            track,
        },
    );

    Ok(SliderParts {
        track,
        handle_container,
        handle,
        value,
    })
}

struct SliderTrack {
    value: SliderValue,
    handle_container: ElementId,
    handle: ElementId,
}

impl SliderTrack {
    fn value_from_pointer(&self, cx: &ElementContext<'_>) -> Option<f32> {
        let layout = cx.current_layout()?;
        let axis = layout.flex_direction.main_axis();
        let reversed = layout.justify_content == JustifyContent::FlexEnd;
        let bounding = cx.bounding_rect();
        let size = bounding.size().along(axis);
        let offset = cx.transformed_mouse().along(axis) - bounding.location().along(axis);

        let proportion = if size == 0.0 {
            0.0
        } else {
            (offset / size).clamp(0.0, 1.0)
        };
        let proportion = if reversed { 1.0 - proportion } else { proportion };
        Some(self.value.min() + proportion * (self.value.max() - self.value.min()))
    }

    fn place_handle(&self, cx: &mut ElementContext<'_>) {
        let Some(layout) = cx.current_layout() else {
            return;
        };
        let direction = layout.flex_direction;
        let reversed = layout.justify_content == JustifyContent::FlexEnd;
        let extent = cx.bounding_rect().size().along(direction.main_axis());
        let ui_scale = cx.config().ui_scale;

        let mut offset = self.value.proportion() * extent / ui_scale;
        if reversed {
            offset = -offset;
        }
        let Some(container) = cx.gui_mut().layout_mut(self.handle_container) else {
            return;
        };
        match direction {
            FlexDirection::Row => container.left = Some(Length::px(offset)),
            FlexDirection::Column => container.top = Some(Length::px(offset)),
        }
    }
}

impl Behavior for SliderTrack {
    fn on_update(&mut self, cx: &mut ElementContext<'_>, dt_seconds: f32) {
        if self.value.is_dragging() {
            if let Some(value) = self.value_from_pointer(cx) {
                self.value.jump_to(value);
            }
            cx.gui_mut().set_state(self.handle, ElementState::ACTIVATED);
        } else {
            self.value.approach_target(dt_seconds);
        }
        self.place_handle(cx);
    }

    fn on_mouse_event(
        &mut self,
        cx: &mut ElementContext<'_>,
        button: MouseButton,
        state: ButtonState,
    ) {
        if button != MouseButton::PRIMARY {
            return;
        }
        match state {
            ButtonState::Pressed if cx.mouse_is_contained() => {
                self.value.set_dragging(true);
                if let Some(value) = self.value_from_pointer(cx) {
                    self.value.jump_to(value);
                }
            }
            ButtonState::Released => self.value.set_dragging(false),
            ButtonState::Pressed => {}
        }
    }

    /// Fills the track from its start up to the handle.
    fn draw(&self, element: &Element, _config: &UiConfig, renderer: &mut dyn Renderer) {
        let layout = element.current_layout();
        if layout.foreground_color.is_transparent() {
            return;
        }
        let bounding = element.bounding_rect();
        let reversed = layout.justify_content == JustifyContent::FlexEnd;
        let proportion = self.value.proportion();

        let fill = match layout.flex_direction.main_axis() {
            Axis::Horizontal => {
                let width = (bounding.width as f32 * proportion) as i32;
                let x = if reversed { bounding.right() - width } else { bounding.x };
                Rect::new(x, bounding.y, width, bounding.height)
            }
            Axis::Vertical => {
                let height = (bounding.height as f32 * proportion) as i32;
                let y = if reversed { bounding.bottom() - height } else { bounding.y };
                Rect::new(bounding.x, y, bounding.width, height)
            }
        };
        renderer.draw_rect(fill, layout.foreground_color);
    }
}

/// The draggable knob. Directional input along the slider nudges the target
/// instead of moving focus, as long as there is room to move.
struct SliderHandle {
    value: SliderValue,
    track: ElementId,
}

impl Behavior for SliderHandle {
    fn focusable(&self) -> bool {
        true
    }

    fn override_focus_change(&self) -> bool {
        true
    }

    fn on_mouse_event(
        &mut self,
        cx: &mut ElementContext<'_>,
        button: MouseButton,
        state: ButtonState,
    ) {
        if button != MouseButton::PRIMARY {
            return;
        }
        match state {
            ButtonState::Pressed if cx.mouse_is_contained() => self.value.set_dragging(true),
            ButtonState::Released if cx.state() == ElementState::ACTIVATED => {
                let state = if cx.mouse_is_contained() {
                    ElementState::HOVERED
                } else {
                    ElementState::NEUTRAL
                };
                cx.set_state(state);
            }
            _ => {}
        }
    }

    fn consume_focus(&mut self, cx: &mut ElementContext<'_>, axis: Axis, side: Side) -> bool {
        let Some(track) = cx.gui().element(self.track) else {
            return false;
        };
        let layout = track.current_layout();
        if !layout.flex_direction.is_parallel_with(axis) {
            return false;
        }
        let mut direction = match side {
            Side::Start => -1.0,
            Side::End => 1.0,
        };
        if layout.justify_content == JustifyContent::FlexEnd {
            direction = -direction;
        }
        self.value.nudge(direction)
    }
}
