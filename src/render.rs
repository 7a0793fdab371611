use glam::{Affine2, Vec2};

use crate::geometry::Rect;
use crate::style::{Color, EdgeInsets, FontId, ImageId, NineSlice, Overflow};
use crate::text::TextLine;
use crate::view::{Element, ElementId, Gui};

/// Drawing backend driven by [`Gui::draw`]. Regions are in screen pixels
/// before the innermost pushed transform is applied.
pub trait Renderer {
    fn draw_rect(&mut self, region: Rect, color: Color);

    fn draw_line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color);

    fn draw_rect_outline(&mut self, region: Rect, color: Color, thickness: f32, inset: f32);

    fn draw_image(&mut self, image: &ImageId, region: Rect, source: Option<Rect>, tint: Color);

    /// `image` is the element's image, if any; slicing comes from `nine_slice`.
    fn draw_nine_slice(
        &mut self,
        image: Option<&ImageId>,
        nine_slice: &NineSlice,
        region: Rect,
        tint: Color,
    );

    fn draw_text(&mut self, lines: &[TextLine], font: &FontId, scale: f32, color: Color);

    /// Clips subsequent draws to `region` until the matching [`Renderer::pop_clip`].
    /// Regions arrive already intersected with every enclosing clip.
    fn push_clip(&mut self, region: Rect);

    fn pop_clip(&mut self);

    /// Replaces the active transform with `transform`, which already includes
    /// every enclosing transform.
    fn push_transform(&mut self, transform: Affine2);

    fn pop_transform(&mut self);
}

/// Axis-aligned bounds of `rect` after `transform`.
pub fn transform_rect(rect: Rect, transform: Affine2) -> Rect {
    if transform == Affine2::IDENTITY {
        return rect;
    }
    let left = rect.left() as f32;
    let top = rect.top() as f32;
    let right = rect.right() as f32;
    let bottom = rect.bottom() as f32;
    let corners = [
        Vec2::new(left, top),
        Vec2::new(right, top),
        Vec2::new(left, bottom),
        Vec2::new(right, bottom),
    ]
    .map(|corner| transform.transform_point2(corner));

    let min = corners.iter().copied().fold(Vec2::splat(f32::MAX), Vec2::min);
    let max = corners.iter().copied().fold(Vec2::splat(f32::MIN), Vec2::max);
    let x = min.x.floor() as i32;
    let y = min.y.floor() as i32;
    Rect::new(x, y, max.x.ceil() as i32 - x, max.y.ceil() as i32 - y)
}

impl Gui {
    fn screen_rect(&self) -> Rect {
        let screen = self.config.screen_size;
        Rect::from_f32(0.0, 0.0, screen.x, screen.y)
    }

    /// The region an element clips its children to, in its own untransformed
    /// space: the inner rectangle on clipping axes and the screen elsewhere.
    pub fn clip_rect(&self, id: ElementId) -> Rect {
        let screen = self.screen_rect();
        let Some(element) = self.nodes.get(id) else {
            return screen;
        };
        let layout = element.current_layout();
        let inner = element.inner_rect();
        let (x, width) = if layout.overflow_x != Overflow::Visible {
            (inner.x, inner.width)
        } else {
            (screen.x, screen.width)
        };
        let (y, height) = if layout.overflow_y != Overflow::Visible {
            (inner.y, inner.height)
        } else {
            (screen.y, screen.height)
        };
        Rect::new(x, y, width, height)
    }

    /// Paints the whole tree, parents before children.
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        self.draw_tree(self.root, Affine2::IDENTITY, self.screen_rect(), renderer);
    }

    fn draw_tree(
        &self,
        id: ElementId,
        transform: Affine2,
        clip: Rect,
        renderer: &mut dyn Renderer,
    ) {
        let Some(element) = self.nodes.get(id) else {
            return;
        };

        if !element.requires_complicated_draw() {
            self.draw_element(element, renderer);
            for &child in &element.children {
                self.draw_tree(child, transform, clip, renderer);
            }
            return;
        }

        let transform = transform * element.current_transform.unwrap_or(Affine2::IDENTITY);
        let clip = clip.intersect(&transform_rect(self.clip_rect(id), transform));

        renderer.push_transform(transform);
        self.draw_element(element, renderer);
        renderer.push_clip(clip);
        for &child in &element.children {
            self.draw_tree(child, transform, clip, renderer);
        }
        renderer.pop_clip();
        renderer.pop_transform();
    }

    fn draw_element(&self, element: &Element, renderer: &mut dyn Renderer) {
        let layout = element.current_layout();
        let bounding = element.bounding_rect();

        if !layout.background_color.is_transparent() {
            renderer.draw_rect(bounding, layout.background_color);
        }

        if let Some(nine_slice) = &layout.nine_slice {
            renderer.draw_nine_slice(
                layout.image.as_ref(),
                nine_slice,
                bounding,
                layout.image_color,
            );
        } else if let Some(image) = &layout.image {
            renderer.draw_image(image, bounding, layout.source_rectangle, layout.image_color);
        }

        if let Some(behavior) = &element.behavior {
            behavior.draw(element, &self.config, renderer);
        }

        draw_borders(
            renderer,
            bounding,
            layout.scaled_border_thickness(self.config.ui_scale),
            layout.border_color,
        );

        if self.config.draw_debug_borders {
            let config = &self.config;
            renderer.draw_rect_outline(element.outer_rect(), config.debug_outer_color, 1.0, 0.5);
            renderer.draw_rect_outline(bounding, config.debug_bounding_color, 1.0, 0.5);
            renderer.draw_rect_outline(element.inner_rect(), config.debug_inner_color, 1.0, 0.5);
        }
    }
}

/// Borders under one pixel are drawn one pixel wide with proportionally less alpha.
fn border_stroke(thickness: f32, color: Color) -> Option<(f32, Color)> {
    if thickness <= 0.0 {
        return None;
    }
    let (thickness, color) = if thickness < 1.0 {
        (1.0, color.with_alpha((color.alpha() as f32 * thickness) as u8))
    } else {
        (thickness, color)
    };
    (color.alpha() > 0).then_some((thickness, color))
}

fn draw_borders(
    renderer: &mut dyn Renderer,
    bounding: Rect,
    thickness: EdgeInsets<f32>,
    colors: EdgeInsets<Color>,
) {
    let left = bounding.left() as f32;
    let top = bounding.top() as f32;
    let right = bounding.right() as f32;
    let bottom = bounding.bottom() as f32;

    if let Some((t, color)) = border_stroke(thickness.top, colors.top) {
        let y = top + t / 2.0;
        renderer.draw_line(Vec2::new(left, y), Vec2::new(right, y), t, color);
    }
    if let Some((t, color)) = border_stroke(thickness.right, colors.right) {
        let x = right - t / 2.0;
        renderer.draw_line(Vec2::new(x, top), Vec2::new(x, bottom), t, color);
    }
    if let Some((t, color)) = border_stroke(thickness.bottom, colors.bottom) {
        let y = bottom - t / 2.0;
        renderer.draw_line(Vec2::new(left, y), Vec2::new(right, y), t, color);
    }
    if let Some((t, color)) = border_stroke(thickness.left, colors.left) {
        let x = left + t / 2.0;
        renderer.draw_line(Vec2::new(x, top), Vec2::new(x, bottom), t, color);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::UiConfig;
    use crate::style::Descriptor;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Command {
        Rect(Rect, Color),
        Line(Vec2, Vec2, f32, Color),
        Outline(Rect, Color),
        Image(ImageId, Rect),
        NineSlice(Option<ImageId>, Rect),
        Text(Vec<String>, Color),
        PushClip(Rect),
        PopClip,
        PushTransform(Affine2),
        PopTransform,
    }

    #[derive(Default)]
    pub(crate) struct Recorder {
        pub commands: Vec<Command>,
    }

    impl Renderer for Recorder {
        fn draw_rect(&mut self, region: Rect, color: Color) {
            self.commands.push(Command::Rect(region, color));
        }

        fn draw_line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color) {
            self.commands.push(Command::Line(from, to, thickness, color));
        }

        fn draw_rect_outline(&mut self, region: Rect, color: Color, _thickness: f32, _inset: f32) {
            self.commands.push(Command::Outline(region, color));
        }

        fn draw_image(
            &mut self,
            image: &ImageId,
            region: Rect,
            _source: Option<Rect>,
            _tint: Color,
        ) {
            self.commands.push(Command::Image(image.clone(), region));
        }

        fn draw_nine_slice(
            &mut self,
            image: Option<&ImageId>,
            _nine_slice: &NineSlice,
            region: Rect,
            _tint: Color,
        ) {
            self.commands.push(Command::NineSlice(image.cloned(), region));
        }

        fn draw_text(&mut self, lines: &[TextLine], _font: &FontId, _scale: f32, color: Color) {
            let text = lines.iter().map(|line| line.text.clone()).collect();
            self.commands.push(Command::Text(text, color));
        }

        fn push_clip(&mut self, region: Rect) {
            self.commands.push(Command::PushClip(region));
        }

        fn pop_clip(&mut self) {
            self.commands.push(Command::PopClip);
        }

        fn push_transform(&mut self, transform: Affine2) {
            self.commands.push(Command::PushTransform(transform));
        }

        fn pop_transform(&mut self) {
            self.commands.push(Command::PopTransform);
        }
    }

    fn layout() -> Descriptor {
        Descriptor::with_font(FontId::new("body"))
    }

    fn gui() -> Gui {
        Gui::new(UiConfig::new().screen_size(800.0, 600.0), layout())
    }

    fn record(gui: &Gui) -> Vec<Command> {
        let mut recorder = Recorder::default();
        gui.draw(&mut recorder);
        recorder.commands
    }

    #[test]
    fn element_layers_draw_in_order() {
        let mut gui = gui();
        let red = Color::rgb(255, 0, 0);
        let blue = Color::rgb(0, 0, 255);
        let id = gui.create_element(
            layout()
                .size(40.0, 20.0)
                .background_color(red)
                .image(ImageId::new("icon"))
                .border_thickness(2.0)
                .border_color(blue),
        );
        gui.add_child(gui.root(), id).unwrap();
        gui.refresh();

        let bounds = Rect::new(0, 0, 40, 20);
        assert_eq!(
            record(&gui),
            vec![
                Command::Rect(bounds, red),
                Command::Image(ImageId::new("icon"), bounds),
                Command::Line(Vec2::new(0.0, 1.0), Vec2::new(40.0, 1.0), 2.0, blue),
                Command::Line(Vec2::new(39.0, 0.0), Vec2::new(39.0, 20.0), 2.0, blue),
                Command::Line(Vec2::new(0.0, 19.0), Vec2::new(40.0, 19.0), 2.0, blue),
                Command::Line(Vec2::new(1.0, 0.0), Vec2::new(1.0, 20.0), 2.0, blue),
            ]
        );
    }

    #[test]
    fn nine_slice_replaces_the_plain_image() {
        let mut gui = gui();
        let id = gui.create_element(
            layout()
                .size(40.0, 20.0)
                .image(ImageId::new("frame"))
                .nine_slice(NineSlice::new(12, 12, 4, 4, 4, 4)),
        );
        gui.add_child(gui.root(), id).unwrap();
        gui.refresh();

        assert_eq!(
            record(&gui),
            vec![Command::NineSlice(Some(ImageId::new("frame")), Rect::new(0, 0, 40, 20))]
        );
    }

    #[test]
    fn thin_borders_fade_instead_of_vanishing() {
        assert_eq!(
            border_stroke(0.5, Color::rgb(10, 20, 30)),
            Some((1.0, Color::rgba(10, 20, 30, 127)))
        );
        assert_eq!(border_stroke(0.0, Color::WHITE), None);
        assert_eq!(border_stroke(0.001, Color::WHITE), None);
        assert_eq!(border_stroke(3.0, Color::TRANSPARENT), None);
    }

    #[test]
    fn clipping_container_wraps_children_in_clip() {
        let mut gui = gui();
        let gray = Color::rgb(9, 9, 9);
        let list = gui.create_element(
            layout()
                .size(100.0, 50.0)
                .padding(5.0)
                .overflow(Overflow::Visible, Overflow::Scroll),
        );
        let row = gui.create_element(layout().size(90.0, 80.0).background_color(gray));
        gui.add_child(gui.root(), list).unwrap();
        gui.add_child(list, row).unwrap();
        gui.refresh();

        assert_eq!(gui.clip_rect(list), Rect::new(0, 5, 800, 40));
        assert_eq!(
            record(&gui),
            vec![
                Command::PushTransform(Affine2::IDENTITY),
                Command::PushClip(Rect::new(0, 5, 800, 40)),
                Command::Rect(Rect::new(5, 5, 90, 80), gray),
                Command::PopClip,
                Command::PopTransform,
            ]
        );
    }

    #[test]
    fn transforms_accumulate_into_clip_and_transform_stack() {
        let mut gui = gui();
        let shift = Affine2::from_translation(Vec2::new(10.0, 0.0));
        let moved = gui.create_element(layout().size(20.0, 20.0).transform(shift));
        gui.add_child(gui.root(), moved).unwrap();
        gui.update(0.016, Vec2::ZERO);

        let commands = record(&gui);
        assert_eq!(commands[0], Command::PushTransform(shift));
        assert_eq!(commands[1], Command::PushClip(Rect::new(10, 0, 790, 600)));
        assert_eq!(commands.len(), 4);
    }

    #[test]
    fn debug_borders_outline_every_box() {
        let mut gui = Gui::new(
            UiConfig::new().screen_size(800.0, 600.0).draw_debug_borders(true),
            layout().size(10.0, 10.0).margin(2.0).padding(1.0),
        );
        gui.refresh();
        let config = gui.config().clone();
        assert_eq!(
            record(&gui),
            vec![
                Command::Outline(Rect::new(0, 0, 14, 14), config.debug_outer_color),
                Command::Outline(Rect::new(2, 2, 10, 10), config.debug_bounding_color),
                Command::Outline(Rect::new(3, 3, 8, 8), config.debug_inner_color),
            ]
        );
    }

    #[test]
    fn transform_rect_takes_axis_aligned_bounds() {
        let rect = Rect::new(0, 0, 10, 20);
        assert_eq!(transform_rect(rect, Affine2::IDENTITY), rect);
        let scaled = Affine2::from_scale(Vec2::new(2.0, 0.5));
        assert_eq!(transform_rect(rect, scaled), Rect::new(0, 0, 20, 10));
    }
}
