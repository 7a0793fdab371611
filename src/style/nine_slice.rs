use crate::geometry::Rect;

/// Slicing metadata for a stretchable frame image.
///
/// Cells are indexed row-major:
/// ```text
/// 0 1 2
/// 3 4 5
/// 6 7 8
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NineSlice {
    pub width: i32,
    pub height: i32,
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
    pub scale: i32,
}

impl NineSlice {
    pub const fn new(
        width: i32,
        height: i32,
        left: i32,
        right: i32,
        top: i32,
        bottom: i32,
    ) -> Self {
        Self {
            width,
            height,
            left,
            right,
            top,
            bottom,
            scale: 1,
        }
    }

    pub const fn scale(mut self, scale: i32) -> Self {
        self.scale = scale;
        self
    }

    pub fn source_rects(&self) -> [Rect; 9] {
        let right_x = self.width - self.right;
        let bottom_y = self.height - self.bottom;
        let mid_w = self.width - self.left - self.right;
        let mid_h = self.height - self.top - self.bottom;

        [
            Rect::new(0, 0, self.left, self.top),
            Rect::new(self.left, 0, mid_w, self.top),
            Rect::new(right_x, 0, self.right, self.top),
            Rect::new(0, self.top, self.left, mid_h),
            Rect::new(self.left, self.top, mid_w, mid_h),
            Rect::new(right_x, self.top, self.right, mid_h),
            Rect::new(0, bottom_y, self.left, self.bottom),
            Rect::new(self.left, bottom_y, mid_w, self.bottom),
            Rect::new(right_x, bottom_y, self.right, self.bottom),
        ]
    }

    /// Corners keep their scaled size; edges and center stretch to fill `dest`.
    pub fn destination_rects(&self, dest: Rect) -> [Rect; 9] {
        let s = self.scale;
        let (top, bottom) = (self.top * s, self.bottom * s);
        let (left, right) = (self.left * s, self.right * s);
        let (x, y) = (dest.x, dest.y);
        let right_x = dest.width - right;
        let bottom_y = dest.height - bottom;
        let mid_w = dest.width - left - right;
        let mid_h = dest.height - top - bottom;

        [
            Rect::new(x, y, left, top),
            Rect::new(x + left, y, mid_w, top),
            Rect::new(x + right_x, y, right, top),
            Rect::new(x, y + top, left, mid_h),
            Rect::new(x + left, y + top, mid_w, mid_h),
            Rect::new(x + right_x, y + top, right, mid_h),
            Rect::new(x, y + bottom_y, left, bottom),
            Rect::new(x + left, y + bottom_y, mid_w, bottom),
            Rect::new(x + right_x, y + bottom_y, right, bottom),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_corners_keep_scaled_size() {
        let slice = NineSlice::new(12, 12, 4, 4, 4, 4).scale(2);
        let dest = slice.destination_rects(Rect::new(100, 50, 60, 40));
        assert_eq!(dest[0], Rect::new(100, 50, 8, 8));
        assert_eq!(dest[4], Rect::new(108, 58, 44, 24));
        assert_eq!(dest[8], Rect::new(152, 82, 8, 8));
    }

    #[test]
    fn source_center_is_the_unsliced_middle() {
        let slice = NineSlice::new(16, 10, 3, 5, 2, 2);
        assert_eq!(slice.source_rects()[4], Rect::new(3, 2, 8, 6));
    }
}
