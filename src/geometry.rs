use glam::Vec2;

use crate::style::EdgeInsets;

/// Axis-aligned integer rectangle in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a rectangle from float geometry, rounding half up.
    pub fn from_f32(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(
            (x + 0.5).floor() as i32,
            (y + 0.5).floor() as i32,
            (width + 0.5).floor() as i32,
            (height + 0.5).floor() as i32,
        )
    }

    pub const fn left(&self) -> i32 {
        self.x
    }

    pub const fn top(&self) -> i32 {
        self.y
    }

    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn location(&self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: Vec2) -> bool {
        self.x as f32 <= point.x
            && point.x < self.right() as f32
            && self.y as f32 <= point.y
            && point.y < self.bottom() as f32
    }

    pub fn contains_x(&self, x: f32) -> bool {
        self.x as f32 <= x && x < self.right() as f32
    }

    pub fn contains_y(&self, y: f32) -> bool {
        self.y as f32 <= y && y < self.bottom() as f32
    }

    /// Shrinks each edge by the matching inset, truncating to whole pixels.
    pub fn shrink(&self, insets: EdgeInsets<f32>) -> Self {
        Self::new(
            (self.x as f32 + insets.left) as i32,
            (self.y as f32 + insets.top) as i32,
            (self.width as f32 - insets.left - insets.right) as i32,
            (self.height as f32 - insets.top - insets.bottom) as i32,
        )
    }

    pub fn intersect(&self, other: &Self) -> Self {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right > left && bottom > top {
            Self::new(left, top, right - left, bottom - top)
        } else {
            Self::ZERO
        }
    }
}
