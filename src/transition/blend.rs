use glam::{Affine2, Mat2};

use super::Transition;
use crate::style::{Color, Descriptor, EdgeInsets, lerp, lerp_optional};

/// Blends `old` toward `new` at `elapsed` seconds after a state change.
///
/// Interpolable fields (spacing, sizes, offsets, colors, font scale and the
/// transform) are mixed pairwise; everything else is taken from `new`. The
/// inputs are never mutated.
pub fn blend(
    old: &Descriptor,
    new: &Descriptor,
    transition: Option<&Transition>,
    elapsed_seconds: f32,
) -> Descriptor {
    let Some(transition) = transition else {
        return new.clone();
    };
    if old == new || elapsed_seconds - transition.delay_seconds >= transition.duration_seconds {
        return new.clone();
    }

    let t = transition.progress(elapsed_seconds);
    let mut result = new.clone();

    result.font_scale = lerp(old.font_scale, new.font_scale, t);
    result.transform = lerp_affine(old.transform, new.transform, t);

    result.background_color = old.background_color.lerp(new.background_color, t);
    result.foreground_color = old.foreground_color.lerp(new.foreground_color, t);
    result.image_color = old.image_color.lerp(new.image_color, t);
    result.border_color = old
        .border_color
        .zip_with(new.border_color, |a: Color, b| a.lerp(b, t));

    result.left = lerp_optional(old.left, new.left, t);
    result.right = lerp_optional(old.right, new.right, t);
    result.top = lerp_optional(old.top, new.top, t);
    result.bottom = lerp_optional(old.bottom, new.bottom, t);
    result.width = lerp_optional(old.width, new.width, t);
    result.height = lerp_optional(old.height, new.height, t);
    result.max_width = lerp_optional(old.max_width, new.max_width, t);
    result.max_height = lerp_optional(old.max_height, new.max_height, t);

    result.margin = lerp_insets(old.margin, new.margin, t);
    result.padding = lerp_insets(old.padding, new.padding, t);
    result.border_thickness = lerp_insets(old.border_thickness, new.border_thickness, t);
    result.gap = lerp(old.gap, new.gap, t);
    result.scroll_padding = lerp(old.scroll_padding, new.scroll_padding, t);

    result
}

fn lerp_insets(a: EdgeInsets<f32>, b: EdgeInsets<f32>, t: f32) -> EdgeInsets<f32> {
    a.zip_with(b, |a, b| lerp(a, b, t))
}

fn lerp_affine(a: Affine2, b: Affine2, t: f32) -> Affine2 {
    Affine2::from_mat2_translation(
        Mat2::from_cols(
            a.matrix2.x_axis.lerp(b.matrix2.x_axis, t),
            a.matrix2.y_axis.lerp(b.matrix2.y_axis, t),
        ),
        a.translation.lerp(b.translation, t),
    )
}
