use glam::Vec2;

use crate::config::UiConfig;
use crate::render::Renderer;
use crate::text::{TextLine, align_lines, block_size, split_lines};
use crate::view::{Behavior, Element, ElementContext};

/// Text content measured with the host's [`crate::text::TextMeasurer`].
///
/// The unscaled size of the laid-out text block is published as the
/// element's intrinsic size, so content-sized labels grow to fit their text.
pub struct Label {
    text: String,
    getter: Option<Box<dyn FnMut() -> String>>,
    lines: Vec<TextLine>,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            getter: None,
            lines: Vec::new(),
        }
    }

    /// A label whose text is pulled from `getter` every frame.
    pub fn from_getter(mut getter: impl FnMut() -> String + 'static) -> Self {
        Self {
            text: getter(),
            getter: Some(Box::new(getter)),
            lines: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Lines from the latest rectangle pass, positioned in screen space.
    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }

    pub(crate) fn pull_text(&mut self) {
        if let Some(getter) = self.getter.as_mut() {
            let text = getter();
            if text != self.text {
                self.text = text;
            }
        }
    }

    pub(crate) fn layout_text(&mut self, cx: &mut ElementContext<'_>) {
        let Some(measurer) = cx.measurer() else {
            return;
        };
        if self.text.is_empty() {
            self.lines.clear();
            cx.set_intrinsic_size(None);
            return;
        }
        let Some(element) = cx.element() else {
            return;
        };

        let layout = element.current_layout();
        let scale = layout.effective_font_scale(cx.config());
        let padding = layout.scaled_padding(cx.config().ui_scale);
        let size = element.size();
        let wrap_width = if size.x <= 0.0 {
            0.0
        } else {
            size.x - padding.horizontal()
        };

        let mut lines = split_lines(
            measurer.as_ref(),
            &self.text,
            &layout.font,
            scale,
            wrap_width,
            layout.word_wrap,
        );
        align_lines(
            &mut lines,
            element.position(),
            size,
            [padding.top, padding.right, padding.bottom, padding.left],
            layout.text_align,
            layout.text_align_vertical,
        );

        let block = block_size(&lines);
        let intrinsic = if scale > 0.0 { block / scale } else { Vec2::ZERO };
        self.lines = lines;
        cx.set_intrinsic_size(Some(intrinsic));
    }

    pub(crate) fn draw_text(
        &self,
        element: &Element,
        config: &UiConfig,
        renderer: &mut dyn Renderer,
    ) {
        let layout = element.current_layout();
        if self.lines.is_empty() || layout.foreground_color.is_transparent() {
            return;
        }
        renderer.draw_text(
            &self.lines,
            &layout.font,
            layout.effective_font_scale(config),
            layout.foreground_color,
        );
    }
}

impl Behavior for Label {
    fn on_update(&mut self, _cx: &mut ElementContext<'_>, _dt_seconds: f32) {
        self.pull_text();
    }

    fn after_rectangle_compute(&mut self, cx: &mut ElementContext<'_>) {
        self.layout_text(cx);
    }

    fn draw(&self, element: &Element, config: &UiConfig, renderer: &mut dyn Renderer) {
        self.draw_text(element, config, renderer);
    }
}
