use glam::Vec2;

use crate::style::{FontId, TextAlign, TextAlignVertical, WordWrap};

/// External text measurement. Sizes are in screen pixels at `scale`.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font: &FontId, scale: f32) -> Vec2;
}

/// One laid-out line of a label.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub size: Vec2,
    pub position: Vec2,
}

impl TextLine {
    fn new(text: &str, size: Vec2) -> Self {
        Self {
            text: text.to_string(),
            size,
            position: Vec2::ZERO,
        }
    }
}

/// Greedy line breaking. `max_width <= 0` disables wrapping.
///
/// Word wrap backs off to the last whitespace in the current line (or the
/// overflowing whitespace itself) and drops it; without one it breaks before
/// the overflowing character.
/// Break word always breaks before the overflowing character. A single
/// character wider than the line still gets a line of its own.
pub fn split_lines(
    measurer: &dyn TextMeasurer,
    text: &str,
    font: &FontId,
    scale: f32,
    max_width: f32,
    wrap: WordWrap,
) -> Vec<TextLine> {
    if text.is_empty() {
        return Vec::new();
    }
    let measure = |s: &str| measurer.measure(s, font, scale);
    if wrap == WordWrap::None || max_width <= 0.0 {
        return vec![TextLine::new(text, measure(text))];
    }

    let mut lines = Vec::new();
    let mut line_start = 0usize;
    let mut last_whitespace: Option<usize> = None;

    for (index, ch) in text.char_indices() {
        if index < line_start {
            continue;
        }
        let end = index + ch.len_utf8();
        if measure(&text[line_start..end]).x > max_width && index > line_start {
            let space = if ch.is_whitespace() {
                Some(index)
            } else {
                last_whitespace
            };
            match (wrap, space) {
                (WordWrap::WordWrap, Some(space)) if space > line_start => {
                    let line = &text[line_start..space];
                    lines.push(TextLine::new(line, measure(line)));
                    line_start = space + text[space..].chars().next().map_or(1, char::len_utf8);
                }
                _ => {
                    let line = &text[line_start..index];
                    lines.push(TextLine::new(line, measure(line)));
                    line_start = index;
                }
            }
            last_whitespace = None;
        }
        if ch.is_whitespace() && index >= line_start {
            last_whitespace = Some(index);
        }
    }

    let rest = &text[line_start..];
    lines.push(TextLine::new(rest, measure(rest)));
    lines
}

/// Widest line by summed line heights.
pub fn block_size(lines: &[TextLine]) -> Vec2 {
    lines.iter().fold(Vec2::ZERO, |acc, line| {
        Vec2::new(acc.x.max(line.size.x), acc.y + line.size.y)
    })
}

/// Positions `lines` inside the box at `position` of `size`, inset by padding
/// given as `[top, right, bottom, left]`.
pub fn align_lines(
    lines: &mut [TextLine],
    position: Vec2,
    size: Vec2,
    padding: [f32; 4],
    align: TextAlign,
    align_vertical: TextAlignVertical,
) {
    let [pad_top, pad_right, pad_bottom, pad_left] = padding;
    let total_height = block_size(lines).y;

    let mut y = match align_vertical {
        TextAlignVertical::Top => position.y + pad_top,
        TextAlignVertical::Middle => position.y + (size.y - total_height) / 2.0,
        TextAlignVertical::Bottom => position.y + size.y - pad_bottom - total_height,
    };

    for line in lines.iter_mut() {
        let x = match align {
            TextAlign::Left => position.x + pad_left,
            TextAlign::Center => position.x + (size.x - line.size.x) / 2.0,
            TextAlign::Right => position.x + size.x - pad_right - line.size.x,
        };
        line.position = Vec2::new(x, y);
        y += line.size.y;
    }
}
