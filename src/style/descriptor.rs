use glam::Affine2;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::{
    AlignItems, Color, FlexDirection, JustifyContent, Length, NineSlice, Overflow, PositionMode,
    TextAlign, TextAlignVertical, WordWrap,
};
use crate::config::UiConfig;
use crate::error::{Result, UiError};
use crate::geometry::Rect;
use crate::transition::{Animation, Transition};

/// Interaction state tag used to pick a sub-layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementState(SmolStr);

impl ElementState {
    pub const NEUTRAL: Self = Self(SmolStr::new_inline("neutral"));
    pub const HOVERED: Self = Self(SmolStr::new_inline("hovered"));
    pub const ACTIVATED: Self = Self(SmolStr::new_inline("activated"));

    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ElementState {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontId(pub SmolStr);

impl FontId {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self(name.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageId(pub SmolStr);

impl ImageId {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self(name.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeInsets<T> {
    pub top: T,
    pub right: T,
    pub bottom: T,
    pub left: T,
}

impl<T: Copy> EdgeInsets<T> {
    pub const fn new(top: T, right: T, bottom: T, left: T) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(value: T) -> Self {
        Self::new(value, value, value, value)
    }

    pub const fn symmetric(vertical: T, horizontal: T) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    pub fn map<U>(self, f: impl Fn(T) -> U) -> EdgeInsets<U> {
        EdgeInsets {
            top: f(self.top),
            right: f(self.right),
            bottom: f(self.bottom),
            left: f(self.left),
        }
    }

    pub fn zip_with<U: Copy, R>(
        self,
        other: EdgeInsets<U>,
        f: impl Fn(T, U) -> R,
    ) -> EdgeInsets<R> {
        EdgeInsets {
            top: f(self.top, other.top),
            right: f(self.right, other.right),
            bottom: f(self.bottom, other.bottom),
            left: f(self.left, other.left),
        }
    }
}

impl EdgeInsets<f32> {
    pub const ZERO: Self = Self::uniform(0.0);

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    pub fn scaled(self, scale: f32) -> Self {
        self.map(|v| v * scale)
    }
}

impl Default for EdgeInsets<f32> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Default for EdgeInsets<Color> {
    fn default() -> Self {
        Self::uniform(Color::TRANSPARENT)
    }
}

/// Every visual and geometric property of an element in one interaction state.
///
/// Spacing values are stored unscaled; the `scaled_*` accessors apply the
/// UI scale at read time. Percent values are resolved by the layout engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    pub width: Option<Length>,
    pub height: Option<Length>,
    pub max_width: Option<Length>,
    pub max_height: Option<Length>,
    pub left: Option<Length>,
    pub right: Option<Length>,
    pub top: Option<Length>,
    pub bottom: Option<Length>,
    pub margin: EdgeInsets<f32>,
    pub padding: EdgeInsets<f32>,
    pub border_thickness: EdgeInsets<f32>,
    pub gap: f32,

    pub flex_direction: FlexDirection,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
    pub position_mode: PositionMode,
    pub overflow_x: Overflow,
    pub overflow_y: Overflow,
    pub allow_scrolling_from_anywhere: bool,
    pub scroll_padding: f32,

    pub background_color: Color,
    pub foreground_color: Color,
    pub border_color: EdgeInsets<Color>,
    pub image: Option<ImageId>,
    pub image_color: Color,
    pub source_rectangle: Option<Rect>,
    pub nine_slice: Option<NineSlice>,

    pub font: FontId,
    pub font_scale: f32,
    pub text_align: TextAlign,
    pub text_align_vertical: TextAlignVertical,
    pub word_wrap: WordWrap,

    pub transform: Affine2,

    pub transition: Option<Transition>,
    pub animation: Option<Animation>,

    sub_layouts: FxHashMap<ElementState, Descriptor>,
}

impl Descriptor {
    /// Builds a descriptor using the configured default font.
    pub fn new(config: &UiConfig) -> Result<Self> {
        config
            .default_font
            .clone()
            .map(Self::with_font)
            .ok_or(UiError::FontNotInitialized)
    }

    pub fn with_font(font: FontId) -> Self {
        Self {
            width: None,
            height: None,
            max_width: None,
            max_height: None,
            left: None,
            right: None,
            top: None,
            bottom: None,
            margin: EdgeInsets::ZERO,
            padding: EdgeInsets::ZERO,
            border_thickness: EdgeInsets::ZERO,
            gap: 0.0,
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::FlexStart,
            align_items: AlignItems::FlexStart,
            position_mode: PositionMode::Static,
            overflow_x: Overflow::Visible,
            overflow_y: Overflow::Visible,
            allow_scrolling_from_anywhere: false,
            scroll_padding: 0.0,
            background_color: Color::TRANSPARENT,
            foreground_color: Color::TRANSPARENT,
            border_color: EdgeInsets::uniform(Color::TRANSPARENT),
            image: None,
            image_color: Color::WHITE,
            source_rectangle: None,
            nine_slice: None,
            font,
            font_scale: 1.0,
            text_align: TextAlign::Center,
            text_align_vertical: TextAlignVertical::Middle,
            word_wrap: WordWrap::None,
            transform: Affine2::IDENTITY,
            transition: None,
            animation: None,
            sub_layouts: FxHashMap::default(),
        }
    }

    /// The descriptor to use for `state`, falling back to `self`.
    pub fn layout_for_state(&self, state: &ElementState) -> &Descriptor {
        if *state == ElementState::NEUTRAL {
            return self;
        }
        self.sub_layouts.get(state).unwrap_or(self)
    }

    pub fn sub_layout(&self, state: &ElementState) -> Option<&Descriptor> {
        self.sub_layouts.get(state)
    }

    pub fn sub_layout_mut(&mut self, state: &ElementState) -> Option<&mut Descriptor> {
        self.sub_layouts.get_mut(state)
    }

    pub fn set_sub_layout(&mut self, state: ElementState, layout: Descriptor) {
        self.sub_layouts.insert(state, layout);
    }

    pub fn with_sub_layout(mut self, state: ElementState, layout: Descriptor) -> Self {
        self.set_sub_layout(state, layout);
        self
    }

    pub fn remove_sub_layout(&mut self, state: &ElementState) -> Option<Descriptor> {
        self.sub_layouts.remove(state)
    }

    pub fn requires_complicated_draw(&self) -> bool {
        self.overflow_x != Overflow::Visible
            || self.overflow_y != Overflow::Visible
            || self.transform != Affine2::IDENTITY
    }

    pub fn scaled_margin(&self, ui_scale: f32) -> EdgeInsets<f32> {
        self.margin.scaled(ui_scale)
    }

    pub fn scaled_padding(&self, ui_scale: f32) -> EdgeInsets<f32> {
        self.padding.scaled(ui_scale)
    }

    pub fn scaled_border_thickness(&self, ui_scale: f32) -> EdgeInsets<f32> {
        self.border_thickness.scaled(ui_scale)
    }

    pub fn scaled_gap(&self, ui_scale: f32) -> f32 {
        self.gap * ui_scale
    }

    pub fn scaled_scroll_padding(&self, ui_scale: f32) -> f32 {
        self.scroll_padding * ui_scale
    }

    pub fn effective_font_scale(&self, config: &UiConfig) -> f32 {
        if config.scale_font_with_ui_scale {
            self.font_scale * config.ui_scale
        } else {
            self.font_scale
        }
    }

    pub fn width(mut self, width: impl Into<Length>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn height(mut self, height: impl Into<Length>) -> Self {
        self.height = Some(height.into());
        self
    }

    pub fn size(self, width: impl Into<Length>, height: impl Into<Length>) -> Self {
        self.width(width).height(height)
    }

    pub fn max_width(mut self, max_width: impl Into<Length>) -> Self {
        self.max_width = Some(max_width.into());
        self
    }

    pub fn max_height(mut self, max_height: impl Into<Length>) -> Self {
        self.max_height = Some(max_height.into());
        self
    }

    pub fn left(mut self, left: impl Into<Length>) -> Self {
        self.left = Some(left.into());
        self
    }

    pub fn right(mut self, right: impl Into<Length>) -> Self {
        self.right = Some(right.into());
        self
    }

    pub fn top(mut self, top: impl Into<Length>) -> Self {
        self.top = Some(top.into());
        self
    }

    pub fn bottom(mut self, bottom: impl Into<Length>) -> Self {
        self.bottom = Some(bottom.into());
        self
    }

    pub fn margin(mut self, all: f32) -> Self {
        self.margin = EdgeInsets::uniform(all);
        self
    }

    pub fn margin2(mut self, vertical: f32, horizontal: f32) -> Self {
        self.margin = EdgeInsets::symmetric(vertical, horizontal);
        self
    }

    pub fn margin4(mut self, top: f32, right: f32, bottom: f32, left: f32) -> Self {
        self.margin = EdgeInsets::new(top, right, bottom, left);
        self
    }

    pub fn padding(mut self, all: f32) -> Self {
        self.padding = EdgeInsets::uniform(all);
        self
    }

    pub fn padding2(mut self, vertical: f32, horizontal: f32) -> Self {
        self.padding = EdgeInsets::symmetric(vertical, horizontal);
        self
    }

    pub fn padding4(mut self, top: f32, right: f32, bottom: f32, left: f32) -> Self {
        self.padding = EdgeInsets::new(top, right, bottom, left);
        self
    }

    pub fn border_thickness(mut self, all: f32) -> Self {
        self.border_thickness = EdgeInsets::uniform(all);
        self
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = EdgeInsets::uniform(color);
        self
    }

    pub fn gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    pub fn flex_direction(mut self, flex_direction: FlexDirection) -> Self {
        self.flex_direction = flex_direction;
        self
    }

    pub fn justify_content(mut self, justify_content: JustifyContent) -> Self {
        self.justify_content = justify_content;
        self
    }

    pub fn align_items(mut self, align_items: AlignItems) -> Self {
        self.align_items = align_items;
        self
    }

    pub fn position_mode(mut self, position_mode: PositionMode) -> Self {
        self.position_mode = position_mode;
        self
    }

    pub fn overflow(mut self, overflow_x: Overflow, overflow_y: Overflow) -> Self {
        self.overflow_x = overflow_x;
        self.overflow_y = overflow_y;
        self
    }

    pub fn allow_scrolling_from_anywhere(mut self, allow: bool) -> Self {
        self.allow_scrolling_from_anywhere = allow;
        self
    }

    pub fn scroll_padding(mut self, scroll_padding: f32) -> Self {
        self.scroll_padding = scroll_padding;
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn foreground_color(mut self, color: Color) -> Self {
        self.foreground_color = color;
        self
    }

    pub fn image(mut self, image: ImageId) -> Self {
        self.image = Some(image);
        self
    }

    pub fn image_color(mut self, color: Color) -> Self {
        self.image_color = color;
        self
    }

    pub fn source_rectangle(mut self, source: Rect) -> Self {
        self.source_rectangle = Some(source);
        self
    }

    pub fn nine_slice(mut self, nine_slice: NineSlice) -> Self {
        self.nine_slice = Some(nine_slice);
        self
    }

    pub fn font(mut self, font: FontId) -> Self {
        self.font = font;
        self
    }

    pub fn font_scale(mut self, font_scale: f32) -> Self {
        self.font_scale = font_scale;
        self
    }

    pub fn text_align(mut self, horizontal: TextAlign, vertical: TextAlignVertical) -> Self {
        self.text_align = horizontal;
        self.text_align_vertical = vertical;
        self
    }

    pub fn word_wrap(mut self, word_wrap: WordWrap) -> Self {
        self.word_wrap = word_wrap;
        self
    }

    pub fn transform(mut self, transform: Affine2) -> Self {
        self.transform = transform;
        self
    }

    pub fn transition(mut self, transition: Transition) -> Self {
        self.transition = Some(transition);
        self
    }

    pub fn animation(mut self, animation: Animation) -> Self {
        self.animation = Some(animation);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Descriptor {
        Descriptor::with_font(FontId::new("body"))
    }

    #[test]
    fn new_requires_default_font() {
        assert_eq!(
            Descriptor::new(&UiConfig::new()),
            Err(UiError::FontNotInitialized)
        );
        let config = UiConfig::new().default_font(FontId::new("body"));
        let descriptor = Descriptor::new(&config).expect("font is set");
        assert_eq!(descriptor.font, FontId::new("body"));
        assert_eq!(descriptor.flex_direction, FlexDirection::Column);
        assert_eq!(descriptor.image_color, Color::WHITE);
        assert!(descriptor.background_color.is_transparent());
    }

    #[test]
    fn layout_for_state_falls_back_to_self() {
        let hovered = base().background_color(Color::rgb(1, 2, 3));
        let descriptor = base().with_sub_layout(ElementState::HOVERED, hovered.clone());

        assert_eq!(descriptor.layout_for_state(&ElementState::HOVERED), &hovered);
        assert_eq!(
            descriptor.layout_for_state(&ElementState::ACTIVATED),
            &descriptor
        );
        assert_eq!(descriptor.layout_for_state(&ElementState::NEUTRAL), &descriptor);
    }

    #[test]
    fn clone_deep_copies_sub_layouts() {
        let original = base().with_sub_layout(ElementState::HOVERED, base().gap(4.0));
        let mut copy = original.clone();
        copy.sub_layout_mut(&ElementState::HOVERED)
            .expect("sub layout exists")
            .gap = 9.0;

        assert_eq!(
            original
                .sub_layout(&ElementState::HOVERED)
                .map(|layout| layout.gap),
            Some(4.0)
        );
    }

    #[test]
    fn spacing_setters_follow_css_shorthand_order() {
        let descriptor = base().margin2(1.0, 2.0).padding4(1.0, 2.0, 3.0, 4.0);
        assert_eq!(descriptor.margin, EdgeInsets::new(1.0, 2.0, 1.0, 2.0));
        assert_eq!(descriptor.padding.left, 4.0);
        assert_eq!(descriptor.scaled_padding(2.0).horizontal(), 12.0);
    }

    #[test]
    fn complicated_draw_needs_clip_or_transform() {
        assert!(!base().requires_complicated_draw());
        assert!(base()
            .overflow(Overflow::Visible, Overflow::Scroll)
            .requires_complicated_draw());
        assert!(base()
            .transform(Affine2::from_angle(0.5))
            .requires_complicated_draw());
    }

    #[test]
    fn font_scale_follows_ui_scale_when_enabled() {
        let descriptor = base().font_scale(2.0);
        let config = UiConfig::new().ui_scale(1.5);
        assert_eq!(descriptor.effective_font_scale(&config), 3.0);
        let config = config.scale_font_with_ui_scale(false);
        assert_eq!(descriptor.effective_font_scale(&config), 2.0);
    }
}
