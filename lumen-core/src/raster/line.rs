//! Line rasterizer
//!
//! Incremental walk from the start point to the end point. Each axis keeps
//! a sub-pixel accumulator seeded at 0.5; every iteration adds that axis'
//! per-step advance (`|slope|` for y, its reciprocal for x) and the axis
//! moves one pixel once the accumulator reaches 1.0. The dominant axis
//! therefore moves every iteration and the minor axis rounds
//! symmetrically.

use crate::framebuffer::Framebuffer;

/// Per-step advance standing in for an infinite slope
const STEEP: f32 = 99_999.0;

/// Draw a segment from `(x0, y0)` to `(x1, y1)`, both ends included
///
/// Plots `max(|dx|, |dy|) + 1` pixels, so a degenerate segment still
/// lights its single point.
pub fn draw_line<const W: usize, const P: usize>(
    fb: &mut Framebuffer<W, P>,
    x0: u8,
    y0: u8,
    x1: u8,
    y1: u8,
) {
    let dx = x1 as i16 - x0 as i16;
    let dy = y1 as i16 - y0 as i16;

    let (y_step, x_step) = if dy == 0 {
        (0.0, STEEP)
    } else if dx == 0 {
        (STEEP, 0.0)
    } else {
        let slope = dy as f32 / dx as f32;
        let slope = if slope < 0.0 { -slope } else { slope };
        (slope, 1.0 / slope)
    };

    let x_dir: i16 = if dx > 0 { 1 } else { -1 };
    let y_dir: i16 = if dy > 0 { 1 } else { -1 };
    let iterations = dx.unsigned_abs().max(dy.unsigned_abs()) + 1;

    let (mut x, mut y) = (x0 as i16, y0 as i16);
    let (mut x_acc, mut y_acc) = (0.5f32, 0.5f32);

    for _ in 0..iterations {
        if x >= 0 && y >= 0 {
            fb.set_pixel(x as usize, y as usize);
        }

        y_acc += y_step;
        if y_acc >= 1.0 {
            y += y_dir;
            y_acc = fract(y_acc);
        }

        x_acc += x_step;
        if x_acc >= 1.0 {
            x += x_dir;
            x_acc = fract(x_acc);
        }
    }
}

fn fract(v: f32) -> f32 {
    v - (v as i32) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    type Fb = Framebuffer<128, 8>;

    fn lit(fb: &Fb) -> usize {
        fb.raw().iter().map(|b| b.count_ones() as usize).sum()
    }

    #[test]
    fn test_horizontal_line_exact_pixels() {
        let mut fb = Fb::new();
        draw_line(&mut fb, 0, 0, 7, 0);
        assert_eq!(fb.byte(0, 0), 0x01);
        for x in 0..8 {
            assert!(fb.pixel(x, 0));
        }
        assert_eq!(lit(&fb), 8);
    }

    #[test]
    fn test_reverse_horizontal_line() {
        let mut fb = Fb::new();
        draw_line(&mut fb, 7, 3, 0, 3);
        for x in 0..8 {
            assert!(fb.pixel(x, 3));
        }
        assert_eq!(lit(&fb), 8);
    }

    #[test]
    fn test_vertical_line() {
        let mut fb = Fb::new();
        draw_line(&mut fb, 3, 2, 3, 12);
        for y in 2..=12 {
            assert!(fb.pixel(3, y));
        }
        assert_eq!(lit(&fb), 11);
    }

    #[test]
    fn test_single_point() {
        let mut fb = Fb::new();
        draw_line(&mut fb, 9, 9, 9, 9);
        assert!(fb.pixel(9, 9));
        assert_eq!(lit(&fb), 1);
    }

    #[test]
    fn test_diagonal() {
        let mut fb = Fb::new();
        draw_line(&mut fb, 0, 10, 5, 5);
        for i in 0..=5 {
            assert!(fb.pixel(i, 10 - i), "missing ({}, {})", i, 10 - i);
        }
        assert_eq!(lit(&fb), 6);
    }

    #[test]
    fn test_shallow_line_rounds_symmetrically() {
        let mut fb = Fb::new();
        draw_line(&mut fb, 0, 0, 4, 2);
        let expected = [(0, 0), (1, 1), (2, 1), (3, 2), (4, 2)];
        for (x, y) in expected {
            assert!(fb.pixel(x, y), "missing ({}, {})", x, y);
        }
        assert_eq!(lit(&fb), expected.len());
    }

    #[test]
    fn test_steep_line_reaches_end() {
        let mut fb = Fb::new();
        draw_line(&mut fb, 2, 0, 4, 8);
        assert!(fb.pixel(2, 0));
        assert!(fb.pixel(4, 8));
        assert_eq!(lit(&fb), 9);
    }

    #[test]
    fn test_offscreen_end_is_clipped() {
        let mut fb = Fb::new();
        draw_line(&mut fb, 120, 60, 200, 60);
        for x in 120..128 {
            assert!(fb.pixel(x, 60));
        }
        assert_eq!(lit(&fb), 8);
    }
}
