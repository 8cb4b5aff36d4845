//! Rasterizers
//!
//! One algorithm per drawable kind. Each is a pure function of the
//! drawable's current state and the framebuffer; the render cycle calls
//! them in ascending slot order, so later drawables paint over earlier ones.

pub mod image;
pub mod line;
pub mod rect;
pub mod text;

use crate::drawable::{Drawable, Shape};
use crate::framebuffer::Framebuffer;

pub use image::draw_image;
pub use line::draw_line;
pub use rect::draw_rectangle;
pub use text::draw_text;

/// Paint one drawable into the framebuffer
pub fn paint<const W: usize, const P: usize>(drawable: &Drawable<'_>, fb: &mut Framebuffer<W, P>) {
    let (x0, y0) = (drawable.x0, drawable.y0);
    match &drawable.shape {
        Shape::Text {
            text,
            font_scale,
            inverted,
        } => draw_text(fb, x0, y0, text, *font_scale, *inverted),
        Shape::Line { end_x, end_y } => draw_line(fb, x0, y0, *end_x, *end_y),
        Shape::Rectangle {
            width,
            height,
            color,
        } => draw_rectangle(fb, x0, y0, *width, *height, *color),
        Shape::Image { bitmap } => draw_image(fb, x0, y0, bitmap),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawable::Color;

    #[test]
    fn test_later_drawables_paint_over_earlier() {
        let mut fb = Framebuffer::<16, 2>::new();
        paint(&Drawable::rectangle(0, 0, 3, 8, Color::White), &mut fb);
        paint(&Drawable::rectangle(1, 0, 1, 8, Color::Black), &mut fb);

        assert_eq!(fb.byte(0, 0), 0xFF);
        assert_eq!(fb.byte(0, 1), 0x00);
        assert_eq!(fb.byte(0, 2), 0x00);
        assert_eq!(fb.byte(0, 3), 0xFF);
    }

    #[test]
    fn test_dispatch_covers_every_kind() {
        let mut fb = Framebuffer::<32, 4>::new();
        paint(&Drawable::text(0, 0, "A", 1, false), &mut fb);
        paint(&Drawable::line(0, 20, 5, 20), &mut fb);
        paint(&Drawable::image(10, 24, &[1, 8, 0xFF]).unwrap(), &mut fb);

        assert_eq!(fb.byte(0, 0), 0x7E);
        assert!(fb.pixel(5, 20));
        assert_eq!(fb.byte(3, 10), 0xFF);
    }
}
