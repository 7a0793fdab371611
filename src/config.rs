use glam::Vec2;

use crate::style::{Color, FontId};

/// Process-wide UI settings, owned by a [`crate::view::Gui`] and read during
/// layout and input routing.
#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
    pub ui_scale: f32,
    pub scale_font_with_ui_scale: bool,
    pub default_font: Option<FontId>,
    pub screen_size: Vec2,
    /// Multiplier applied to raw wheel deltas.
    pub scroll_scale: f32,
    pub smooth_scrolling: bool,
    /// Fraction of the remaining scroll distance closed per second.
    pub smooth_scroll_lerp_speed: f32,
    pub hold_shift_to_scroll_horizontally: bool,
    /// Pointer travel, in pixels, after which a pressed button stops counting as a click.
    pub drag_forgiveness: f32,
    /// Scroll step for directional input on focusable drag-scroll containers.
    pub drag_scroll_distance: i32,
    pub draw_debug_borders: bool,
    pub debug_outer_color: Color,
    pub debug_bounding_color: Color,
    pub debug_inner_color: Color,
}

impl UiConfig {
    pub const fn new() -> Self {
        Self {
            ui_scale: 1.0,
            scale_font_with_ui_scale: true,
            default_font: None,
            screen_size: Vec2::ZERO,
            scroll_scale: 0.3,
            smooth_scrolling: true,
            smooth_scroll_lerp_speed: 12.0,
            hold_shift_to_scroll_horizontally: true,
            drag_forgiveness: 8.0,
            drag_scroll_distance: 100,
            draw_debug_borders: false,
            debug_outer_color: Color::rgb(0, 255, 255),
            debug_bounding_color: Color::rgb(255, 0, 255),
            debug_inner_color: Color::rgb(255, 255, 0),
        }
    }

    pub const fn ui_scale(mut self, ui_scale: f32) -> Self {
        self.ui_scale = ui_scale;
        self
    }

    pub const fn scale_font_with_ui_scale(mut self, enabled: bool) -> Self {
        self.scale_font_with_ui_scale = enabled;
        self
    }

    pub fn default_font(mut self, font: FontId) -> Self {
        self.default_font = Some(font);
        self
    }

    pub const fn screen_size(mut self, width: f32, height: f32) -> Self {
        self.screen_size = Vec2::new(width, height);
        self
    }

    pub const fn scroll_scale(mut self, scroll_scale: f32) -> Self {
        self.scroll_scale = scroll_scale;
        self
    }

    pub const fn smooth_scrolling(mut self, enabled: bool, lerp_speed: f32) -> Self {
        self.smooth_scrolling = enabled;
        self.smooth_scroll_lerp_speed = lerp_speed;
        self
    }

    pub const fn hold_shift_to_scroll_horizontally(mut self, enabled: bool) -> Self {
        self.hold_shift_to_scroll_horizontally = enabled;
        self
    }

    pub const fn drag_forgiveness(mut self, pixels: f32) -> Self {
        self.drag_forgiveness = pixels;
        self
    }

    pub const fn drag_scroll_distance(mut self, pixels: i32) -> Self {
        self.drag_scroll_distance = pixels;
        self
    }

    pub const fn draw_debug_borders(mut self, enabled: bool) -> Self {
        self.draw_debug_borders = enabled;
        self
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self::new()
    }
}
