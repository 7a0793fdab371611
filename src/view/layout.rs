use glam::Vec2;
use once_cell::sync::Lazy;

use super::element::AxisConstraints;
use super::{AxisExt, Element, ElementId, Gui, PerAxis};
use crate::geometry::Rect;
use crate::style::{
    AlignItems, Axis, Descriptor, EdgeInsets, FlexDirection, JustifyContent, Length, PositionMode,
};

static TRACE_LAYOUT: Lazy<bool> =
    Lazy::new(|| std::env::var_os("FLEXGUI_TRACE_LAYOUT").is_some());

const AXES: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

fn edges_along(insets: &EdgeInsets<f32>, axis: Axis) -> f32 {
    match axis {
        Axis::Horizontal => insets.horizontal(),
        Axis::Vertical => insets.vertical(),
    }
}

fn size_along(layout: &Descriptor, axis: Axis) -> Option<Length> {
    match axis {
        Axis::Horizontal => layout.width,
        Axis::Vertical => layout.height,
    }
}

fn max_size_along(layout: &Descriptor, axis: Axis) -> Option<Length> {
    match axis {
        Axis::Horizontal => layout.max_width,
        Axis::Vertical => layout.max_height,
    }
}

fn offsets_along(layout: &Descriptor, axis: Axis) -> (Option<Length>, Option<Length>) {
    match axis {
        Axis::Horizontal => (layout.left, layout.right),
        Axis::Vertical => (layout.top, layout.bottom),
    }
}

/// A float rectangle used while flowing children; rounding happens only when
/// rectangles are stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FlowBox {
    pub origin: Vec2,
    pub size: Vec2,
}

/// Where the first in-flow child starts on the main axis and the spacing
/// between consecutive in-flow children.
pub(crate) fn main_axis_start_and_gap(
    justify: JustifyContent,
    direction: FlexDirection,
    inner: FlowBox,
    gap: f32,
    child_main_sizes: &[f32],
) -> (f32, f32) {
    let axis = direction.main_axis();
    let start = inner.origin.along(axis);
    let available = inner.size.along(axis);
    let count = child_main_sizes.len();
    let sum: f32 = child_main_sizes.iter().sum();
    let gaps = count.saturating_sub(1) as f32 * gap;

    match justify {
        JustifyContent::FlexStart => (start, gap),
        JustifyContent::Center => (start + (available - sum - gaps) / 2.0, gap),
        JustifyContent::FlexEnd => (start + available - sum - gaps, gap),
        JustifyContent::SpaceBetween => {
            let spread = if count > 1 {
                (available - sum) / (count - 1) as f32
            } else {
                0.0
            };
            (start, spread)
        }
    }
}

pub(crate) fn cross_offset(
    align: AlignItems,
    direction: FlexDirection,
    inner: FlowBox,
    child_outer: Vec2,
) -> f32 {
    let axis = match direction.main_axis() {
        Axis::Horizontal => Axis::Vertical,
        Axis::Vertical => Axis::Horizontal,
    };
    let start = inner.origin.along(axis);
    let leftover = inner.size.along(axis) - child_outer.along(axis);
    match align {
        AlignItems::FlexStart => start,
        AlignItems::FlexEnd => start + leftover,
        AlignItems::Center => start + leftover / 2.0,
    }
}

impl Gui {
    pub(crate) fn layout_pass(&mut self) {
        let root = self.root;
        self.compute_dimensions(root);
        self.update_rectangles(root, 0.0, 0.0, FlexDirection::Row);
    }

    /// Phase one. Offsets and specified sizes resolve top-down so children can
    /// reference them; final sizes resolve bottom-up from the children.
    fn compute_dimensions(&mut self, id: ElementId) {
        let Some(constraints) = self.resolve_constraints(id) else {
            return;
        };
        let children = match self.nodes.get_mut(id) {
            Some(element) => {
                element.geometry.constraints = constraints;
                element.children.clone()
            }
            None => return,
        };

        for &child in &children {
            self.compute_dimensions(child);
        }

        let child_outer: Vec<Vec2> = children
            .iter()
            .filter_map(|&child| self.nodes.get(child))
            .filter(|child| child.current_layout().position_mode.is_normal_flow())
            .map(Element::outer_size)
            .collect();

        let ui_scale = self.config.ui_scale;
        let Some(element) = self.nodes.get_mut(id) else {
            return;
        };
        let layout = element.styles.resolved();
        let padding = layout.scaled_padding(ui_scale);
        let margin = layout.scaled_margin(ui_scale);
        let gap = layout.scaled_gap(ui_scale);
        let direction = layout.flex_direction;

        let mut size = Vec2::ZERO;
        let mut max_scroll = Vec2::ZERO;
        for axis in AXES {
            let padding = edges_along(&padding, axis);
            let size_of_children = if child_outer.is_empty() {
                0.0
            } else if direction.is_parallel_with(axis) {
                child_outer.iter().map(|outer| outer.along(axis) + gap).sum::<f32>() - gap
            } else {
                child_outer
                    .iter()
                    .map(|outer| outer.along(axis))
                    .fold(0.0, f32::max)
            };

            let axis_constraints = constraints.get(axis);
            let computed = axis_constraints
                .specified_actual()
                .unwrap_or(padding + size_of_children);
            let final_size = match axis_constraints.specified_max {
                Some(max) => computed.min(max),
                None => computed,
            };

            size.set_along(axis, final_size);
            let overflow = (size_of_children - (final_size - padding)) as i32;
            max_scroll.set_along(axis, overflow.max(0) as f32);
        }

        element.geometry.size = size;
        element.geometry.outer_size = size + Vec2::new(margin.horizontal(), margin.vertical());
        element.geometry.max_scroll = max_scroll;
    }

    fn resolve_constraints(&self, id: ElementId) -> Option<PerAxis<AxisConstraints>> {
        let element = self.nodes.get(id)?;
        let parent = element.parent.and_then(|parent| self.nodes.get(parent));
        let layout = element.current_layout();
        let ui_scale = self.config.ui_scale;
        let font_scale = layout.effective_font_scale(&self.config);
        let margin = layout.scaled_margin(ui_scale);
        let padding = layout.scaled_padding(ui_scale);
        let parent_padding = parent.map(|parent| parent.current_layout().scaled_padding(ui_scale));

        let mut resolved = PerAxis::<AxisConstraints>::default();
        for axis in AXES {
            let screen = self.config.screen_size.along(axis);
            let margins = edges_along(&margin, axis);
            let own_padding = edges_along(&padding, axis);
            let parent_padding = parent_padding.map_or(0.0, |p| edges_along(&p, axis));
            // `None` when there is no parent; `Some(None)` when the parent's
            // size still depends on its children.
            let parent_size =
                parent.map(|parent| parent.geometry.constraints.get(axis).specified_actual());

            let reference = match parent_size {
                None => Some(screen),
                Some(size) => size,
            };
            let (start, end) = offsets_along(layout, axis);
            let start = start.and_then(|length| length.resolve(reference, ui_scale));
            let end = end.and_then(|length| length.resolve(reference, ui_scale));

            let explicit = size_along(layout, axis).map(|length| match length {
                Length::Px(value) => Some(value * ui_scale),
                Length::Percent(percent) => match parent_size {
                    None => Some((screen - margins) * percent / 100.0),
                    Some(size) => {
                        size.map(|size| (size - margins - parent_padding) * percent / 100.0)
                    }
                },
            });
            let specified = match explicit {
                Some(size) => size,
                None => {
                    let from_offsets = match (start, end) {
                        (Some(start), Some(end)) => match layout.position_mode {
                            PositionMode::Static | PositionMode::Relative => None,
                            PositionMode::RelativeToParent => match parent_size {
                                None => Some(screen - start - end - margins),
                                Some(size) => {
                                    size.map(|size| size - start - end - margins - parent_padding)
                                }
                            },
                            PositionMode::Fixed => Some(screen - start - end - margins),
                        },
                        _ => None,
                    };
                    from_offsets.or_else(|| {
                        element
                            .intrinsic_size
                            .map(|intrinsic| intrinsic.along(axis) * font_scale + own_padding)
                    })
                }
            };

            let specified_max = max_size_along(layout, axis).and_then(|length| match length {
                Length::Px(value) => Some(value * ui_scale),
                Length::Percent(percent) => match parent_size {
                    None => Some(screen * percent / 100.0),
                    Some(size) => size.map(|size| (size - parent_padding) * percent / 100.0),
                },
            });

            resolved.set(
                axis,
                AxisConstraints {
                    start,
                    end,
                    specified,
                    specified_max,
                },
            );
        }
        Some(resolved)
    }

    /// Phase two. Places `id` at the flow cursor `(main, cross)` given by its
    /// parent, then flows its children.
    fn update_rectangles(
        &mut self,
        id: ElementId,
        main: f32,
        cross: f32,
        parent_direction: FlexDirection,
    ) {
        let screen = self.config.screen_size;
        let ui_scale = self.config.ui_scale;
        let Some(element) = self.nodes.get(id) else {
            return;
        };
        let container = element
            .parent
            .and_then(|parent| self.nodes.get(parent))
            .map(|parent| {
                let inner = parent.geometry.inner;
                (inner.location(), inner.size())
            });

        let layout = element.current_layout();
        let constraints = element.geometry.constraints;
        let outer_size = element.geometry.outer_size;
        let (mut x, mut y) = match parent_direction {
            FlexDirection::Row => (main, cross),
            FlexDirection::Column => (cross, main),
        };

        let place = |origin: Vec2, extent: Vec2| -> Vec2 {
            let mut placed = Vec2::ZERO;
            for axis in AXES {
                let c = constraints.get(axis);
                let start = origin.along(axis);
                let value = match (c.start, c.end) {
                    (Some(offset), _) => start + offset,
                    (None, Some(offset)) => {
                        start + extent.along(axis) - offset - outer_size.along(axis)
                    }
                    (None, None) => start,
                };
                placed.set_along(axis, value);
            }
            placed
        };

        match layout.position_mode {
            PositionMode::Static => {}
            PositionMode::Relative => {
                let h = constraints.horizontal;
                let v = constraints.vertical;
                x += h.start.unwrap_or(0.0) - h.end.unwrap_or(0.0);
                y += v.start.unwrap_or(0.0) - v.end.unwrap_or(0.0);
            }
            PositionMode::RelativeToParent => {
                let (origin, extent) = container.unwrap_or((Vec2::ZERO, screen));
                let placed = place(origin, extent);
                (x, y) = (placed.x, placed.y);
            }
            PositionMode::Fixed => {
                let placed = place(Vec2::ZERO, screen);
                (x, y) = (placed.x, placed.y);
            }
        }

        let margin = layout.scaled_margin(ui_scale);
        let padding = layout.scaled_padding(ui_scale);
        let position = Vec2::new(x + margin.left, y + margin.top);
        let outer = Rect::from_f32(x, y, outer_size.x, outer_size.y);
        let bounding = outer.shrink(margin);
        let inner = bounding.shrink(padding);

        if *TRACE_LAYOUT {
            tracing::trace!(
                ?id,
                x = bounding.x,
                y = bounding.y,
                width = bounding.width,
                height = bounding.height,
                "layout"
            );
        }

        if let Some(element) = self.nodes.get_mut(id) {
            element.geometry.position = position;
            element.geometry.outer = outer;
            element.geometry.bounding = bounding;
            element.geometry.inner = inner;
        }

        self.with_behavior(id, (), |behavior, cx| behavior.after_rectangle_compute(cx));
        self.update_child_rectangles(id);
    }

    /// Flows the children of `id` inside its inner box, shifted by its
    /// current scroll offset.
    pub(crate) fn update_child_rectangles(&mut self, id: ElementId) {
        let ui_scale = self.config.ui_scale;
        let Some(element) = self.nodes.get(id) else {
            return;
        };
        if element.children.is_empty() {
            return;
        }

        let layout = element.current_layout();
        let padding = layout.scaled_padding(ui_scale);
        let direction = layout.flex_direction;
        let justify = layout.justify_content;
        let align = layout.align_items;
        let gap = layout.scaled_gap(ui_scale);
        let inner = FlowBox {
            origin: element.geometry.position
                + Vec2::new(padding.left, padding.top)
                + element.scroll.offset,
            size: element.geometry.size - Vec2::new(padding.horizontal(), padding.vertical()),
        };

        let children: Vec<(ElementId, Vec2, bool)> = element
            .children
            .iter()
            .filter_map(|&child| {
                let node = self.nodes.get(child)?;
                let in_flow = node.current_layout().position_mode.is_normal_flow();
                Some((child, node.outer_size(), in_flow))
            })
            .collect();
        let main_sizes: Vec<f32> = children
            .iter()
            .filter(|(_, _, in_flow)| *in_flow)
            .map(|(_, outer, _)| outer.along(direction.main_axis()))
            .collect();

        let (mut main, gap) = main_axis_start_and_gap(justify, direction, inner, gap, &main_sizes);
        for (child, outer, in_flow) in children {
            let cross = cross_offset(align, direction, inner, outer);
            self.update_rectangles(child, main, cross, direction);
            if in_flow {
                main += outer.along(direction.main_axis()) + gap;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UiConfig;
    use crate::style::{FontId, Overflow};

    fn layout() -> Descriptor {
        Descriptor::with_font(FontId::new("body"))
    }

    fn gui() -> Gui {
        Gui::new(
            UiConfig::new().screen_size(800.0, 600.0),
            layout().size(Length::percent(100.0), Length::percent(100.0)),
        )
    }

    fn attach(gui: &mut Gui, parent: ElementId, layout: Descriptor) -> ElementId {
        let id = gui.create_element(layout);
        gui.add_child(parent, id).unwrap();
        id
    }

    fn rects(gui: &Gui) -> Vec<(Rect, Rect, Rect)> {
        let mut out = Vec::new();
        gui.for_each(gui.root(), |_, element| {
            out.push((element.outer_rect(), element.bounding_rect(), element.inner_rect()));
        });
        out
    }

    #[test]
    fn root_fills_the_screen() {
        let mut gui = gui();
        gui.refresh();
        let root = gui.element(gui.root()).unwrap();
        assert_eq!(root.bounding_rect(), Rect::new(0, 0, 800, 600));
    }

    #[test]
    fn layout_is_idempotent() {
        let mut gui = gui();
        let root = gui.root();
        let row = attach(
            &mut gui,
            root,
            layout()
                .flex_direction(FlexDirection::Row)
                .padding(7.0)
                .gap(3.3)
                .justify_content(JustifyContent::Center)
                .align_items(AlignItems::Center),
        );
        for width in [10.5, 20.25, 33.0] {
            attach(&mut gui, row, layout().size(width, 12.7).margin(1.5));
        }

        gui.refresh();
        let first = rects(&gui);
        gui.refresh();
        assert_eq!(first, rects(&gui));
    }

    #[test]
    fn percent_width_resolves_against_parent() {
        let mut gui = gui();
        let root = gui.root();
        let parent = attach(&mut gui, root, layout().size(200.0, 100.0));
        let child = attach(&mut gui, parent, layout().width(Length::percent(50.0)).height(10.0));
        gui.refresh();
        assert_eq!(gui.element(child).unwrap().outer_rect().width, 100);

        gui.update_screen_size(1920.0, 1080.0);
        gui.refresh();
        assert_eq!(gui.element(child).unwrap().outer_rect().width, 100);
    }

    #[test]
    fn percent_against_content_sized_parent_is_unresolved() {
        let mut gui = gui();
        let root = gui.root();
        let parent = attach(&mut gui, root, layout());
        let child = attach(
            &mut gui,
            parent,
            layout().width(Length::percent(50.0)).left(Length::percent(10.0)),
        );
        gui.refresh();
        let element = gui.element(child).unwrap();
        assert_eq!(element.size().x, 0.0);
        assert_eq!(element.geometry.constraints.horizontal.start, None);
    }

    #[test]
    fn space_between_distributes_evenly() {
        let mut gui = gui();
        let root = gui.root();
        let row = attach(
            &mut gui,
            root,
            layout()
                .size(300.0, 50.0)
                .flex_direction(FlexDirection::Row)
                .justify_content(JustifyContent::SpaceBetween)
                .gap(4.0),
        );
        let children: Vec<_> = [40.0, 60.0, 50.0]
            .into_iter()
            .map(|width| attach(&mut gui, row, layout().size(width, 20.0)))
            .collect();
        gui.refresh();

        let lefts: Vec<i32> = children
            .iter()
            .map(|&id| gui.element(id).unwrap().outer_rect().x)
            .collect();
        assert_eq!(lefts, vec![0, 115, 250]);
        let right = gui.element(children[2]).unwrap().outer_rect().right();
        assert_eq!(right, 300);
    }

    #[test]
    fn justify_and_align_position_children() {
        let mut gui = gui();
        let root = gui.root();
        let column = attach(
            &mut gui,
            root,
            layout()
                .size(100.0, 100.0)
                .padding(10.0)
                .gap(5.0)
                .justify_content(JustifyContent::FlexEnd)
                .align_items(AlignItems::Center),
        );
        let a = attach(&mut gui, column, layout().size(20.0, 20.0));
        let b = attach(&mut gui, column, layout().size(40.0, 30.0));
        gui.refresh();

        // Inner box is 80x80 at (10, 10); content is 20 + 5 + 30 tall.
        assert_eq!(gui.element(a).unwrap().outer_rect(), Rect::new(40, 35, 20, 20));
        assert_eq!(gui.element(b).unwrap().outer_rect(), Rect::new(30, 60, 40, 30));
    }

    #[test]
    fn content_sized_parent_wraps_children() {
        let mut gui = gui();
        let root = gui.root();
        let row = attach(
            &mut gui,
            root,
            layout()
                .flex_direction(FlexDirection::Row)
                .padding(5.0)
                .gap(10.0)
                .margin(2.0),
        );
        attach(&mut gui, row, layout().size(30.0, 10.0));
        attach(&mut gui, row, layout().size(20.0, 25.0));
        // Out of flow children take no space.
        attach(
            &mut gui,
            row,
            layout()
                .size(500.0, 500.0)
                .position_mode(PositionMode::RelativeToParent),
        );
        gui.refresh();

        let element = gui.element(row).unwrap();
        assert_eq!(element.size(), Vec2::new(70.0, 35.0));
        assert_eq!(element.outer_size(), Vec2::new(74.0, 39.0));
        assert_eq!(element.bounding_rect(), Rect::new(2, 2, 70, 35));
        assert_eq!(element.inner_rect(), Rect::new(7, 7, 60, 25));
    }

    #[test]
    fn max_size_clamps_and_records_scroll_extent() {
        let mut gui = gui();
        let root = gui.root();
        let list = attach(
            &mut gui,
            root,
            layout()
                .width(100.0)
                .max_height(50.0)
                .overflow(Overflow::Visible, Overflow::Scroll),
        );
        for _ in 0..4 {
            attach(&mut gui, list, layout().size(100.0, 30.0));
        }
        gui.refresh();

        let element = gui.element(list).unwrap();
        assert_eq!(element.size(), Vec2::new(100.0, 50.0));
        assert_eq!(element.max_scroll(), Vec2::new(0.0, 70.0));
    }

    #[test]
    fn relative_offsets_do_not_move_siblings() {
        let mut gui = gui();
        let root = gui.root();
        let column = attach(&mut gui, root, layout());
        let shifted = attach(
            &mut gui,
            column,
            layout()
                .size(10.0, 10.0)
                .position_mode(PositionMode::Relative)
                .left(5.0)
                .top(3.0),
        );
        let next = attach(&mut gui, column, layout().size(10.0, 10.0));
        gui.refresh();

        assert_eq!(gui.element(shifted).unwrap().outer_rect(), Rect::new(5, 3, 10, 10));
        assert_eq!(gui.element(next).unwrap().outer_rect(), Rect::new(0, 10, 10, 10));
    }

    #[test]
    fn positioned_children_anchor_to_parent_and_screen() {
        let mut gui = gui();
        let root = gui.root();
        let panel = attach(&mut gui, root, layout().size(200.0, 100.0).margin(20.0).padding(10.0));
        let badge = attach(
            &mut gui,
            panel,
            layout()
                .size(30.0, 20.0)
                .position_mode(PositionMode::RelativeToParent)
                .right(0.0)
                .bottom(5.0),
        );
        let stretched = attach(
            &mut gui,
            panel,
            layout()
                .position_mode(PositionMode::RelativeToParent)
                .left(10.0)
                .right(10.0)
                .height(4.0),
        );
        let toast = attach(
            &mut gui,
            panel,
            layout()
                .size(100.0, 40.0)
                .position_mode(PositionMode::Fixed)
                .right(0.0)
                .top(Length::percent(50.0)),
        );
        gui.refresh();

        // Panel inner rect is (30, 30, 180, 80). Offsets of the fixed toast
        // still resolve percentages against the panel's height.
        assert_eq!(gui.element(badge).unwrap().outer_rect(), Rect::new(180, 85, 30, 20));
        assert_eq!(gui.element(stretched).unwrap().outer_rect(), Rect::new(40, 30, 160, 4));
        assert_eq!(gui.element(toast).unwrap().outer_rect(), Rect::new(700, 50, 100, 40));
    }

    #[test]
    fn ui_scale_multiplies_pixel_values() {
        let mut gui = Gui::new(
            UiConfig::new().screen_size(800.0, 600.0).ui_scale(2.0),
            layout(),
        );
        let root = gui.root();
        let child = attach(&mut gui, root, layout().size(10.0, 5.0).padding(1.0));
        gui.refresh();
        let element = gui.element(child).unwrap();
        assert_eq!(element.bounding_rect(), Rect::new(0, 0, 20, 10));
        assert_eq!(element.inner_rect(), Rect::new(2, 2, 16, 6));
    }

    #[test]
    fn main_axis_helpers_match_justify_rules() {
        let inner = FlowBox {
            origin: Vec2::new(10.0, 0.0),
            size: Vec2::new(100.0, 40.0),
        };
        let sizes = [20.0, 30.0];
        let row = FlexDirection::Row;
        let start_and_gap =
            |justify, sizes: &[f32]| main_axis_start_and_gap(justify, row, inner, 5.0, sizes);
        assert_eq!(start_and_gap(JustifyContent::FlexStart, &sizes), (10.0, 5.0));
        assert_eq!(start_and_gap(JustifyContent::Center, &sizes), (32.5, 5.0));
        assert_eq!(start_and_gap(JustifyContent::FlexEnd, &sizes), (55.0, 5.0));
        assert_eq!(start_and_gap(JustifyContent::SpaceBetween, &sizes), (10.0, 50.0));
        assert_eq!(start_and_gap(JustifyContent::SpaceBetween, &[20.0]), (10.0, 0.0));

        assert_eq!(cross_offset(AlignItems::FlexEnd, row, inner, Vec2::new(0.0, 10.0)), 30.0);
        assert_eq!(cross_offset(AlignItems::Center, row, inner, Vec2::new(0.0, 10.0)), 15.0);
    }
}
