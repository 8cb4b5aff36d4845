//! Rectangle rasterizer
//!
//! Fills column by column across three vertical zones: a possibly partial
//! top page, whole interior pages, and a possibly partial bottom page.
//! White ORs the masks in, black ANDs their complement, so the same
//! routine both fills and erases.

use crate::drawable::Color;
use crate::framebuffer::{Framebuffer, PAGE_HEIGHT};

/// Fill columns `x0..=x0+width` over rows `y0..y0+height`
pub fn draw_rectangle<const W: usize, const P: usize>(
    fb: &mut Framebuffer<W, P>,
    x0: u8,
    y0: u8,
    width: u8,
    height: u8,
    color: Color,
) {
    let left = x0 as usize;
    let right = (left + width as usize).min(W.saturating_sub(1));
    let top = y0 as usize;
    let bottom = top + height as usize;

    let top_page = top / PAGE_HEIGHT;
    let bottom_page = bottom / PAGE_HEIGHT;
    let rem_top = top % PAGE_HEIGHT;
    let rem_bottom = bottom % PAGE_HEIGHT;

    let top_mask = if top_page == bottom_page {
        (0xFF << rem_top) & low_bits(rem_bottom)
    } else {
        0xFF << rem_top
    };

    for col in left..=right {
        apply(fb, top_page, col, top_mask, color);
    }

    for page in top_page + 1..bottom_page.min(P) {
        let fill = match color {
            Color::White => 0xFF,
            Color::Black => 0x00,
        };
        for col in left..=right {
            fb.write(page, col, fill);
        }
    }

    if rem_bottom != 0 && bottom_page != top_page {
        for col in left..=right {
            apply(fb, bottom_page, col, low_bits(rem_bottom), color);
        }
    }
}

/// Mask with the lowest `bits` bits set (`bits < 8`)
fn low_bits(bits: usize) -> u8 {
    (0xFFu16 >> (PAGE_HEIGHT - bits)) as u8
}

fn apply<const W: usize, const P: usize>(
    fb: &mut Framebuffer<W, P>,
    page: usize,
    col: usize,
    mask: u8,
    color: Color,
) {
    match color {
        Color::White => fb.or_mask(page, col, mask),
        Color::Black => fb.and_mask(page, col, !mask),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Fb = Framebuffer<128, 8>;

    fn lit_in(fb: &Fb, xs: core::ops::Range<usize>, ys: core::ops::Range<usize>) -> bool {
        xs.clone().all(|x| ys.clone().all(|y| fb.pixel(x, y)))
    }

    #[test]
    fn test_fill_then_erase_round_trip() {
        let mut fb = Fb::new();
        draw_rectangle(&mut fb, 2, 3, 5, 10, Color::White);
        assert!(fb.raw().iter().any(|&b| b != 0));
        draw_rectangle(&mut fb, 2, 3, 5, 10, Color::Black);
        assert!(fb.raw().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_multi_page_coverage() {
        let mut fb = Fb::new();
        draw_rectangle(&mut fb, 2, 3, 5, 10, Color::White);
        // columns 2..=7, rows 3..13
        assert!(lit_in(&fb, 2..8, 3..13));
        assert!(!fb.pixel(1, 5) && !fb.pixel(8, 5));
        assert!(!fb.pixel(4, 2) && !fb.pixel(4, 13));
        assert_eq!(fb.byte(0, 2), 0xF8);
        assert_eq!(fb.byte(1, 2), 0x1F);
    }

    #[test]
    fn test_same_page_mask() {
        let mut fb = Fb::new();
        draw_rectangle(&mut fb, 0, 3, 0, 3, Color::White);
        assert_eq!(fb.byte(0, 0), 0b0011_1000);
        assert_eq!(fb.byte(0, 1), 0);
    }

    #[test]
    fn test_interior_pages_are_solid() {
        let mut fb = Fb::new();
        draw_rectangle(&mut fb, 10, 8, 2, 24, Color::White);
        for page in 1..4 {
            for col in 10..=12 {
                assert_eq!(fb.byte(page, col), 0xFF);
            }
        }
        assert_eq!(fb.byte(4, 10), 0);

        draw_rectangle(&mut fb, 10, 8, 2, 24, Color::Black);
        assert!(fb.raw().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_black_preserves_outside_bits() {
        let mut fb = Fb::new();
        fb.fill(0xFF);
        draw_rectangle(&mut fb, 4, 2, 1, 4, Color::Black);
        assert_eq!(fb.byte(0, 4), 0b1100_0011);
        assert_eq!(fb.byte(0, 3), 0xFF);
        assert_eq!(fb.byte(0, 6), 0xFF);
    }

    #[test]
    fn test_clipped_at_edges() {
        let mut fb = Fb::new();
        draw_rectangle(&mut fb, 120, 50, 255, 255, Color::White);
        assert!(lit_in(&fb, 120..128, 50..64));
        assert!(!fb.pixel(119, 60));
    }

    #[test]
    fn test_fully_offscreen_is_noop() {
        let mut fb = Fb::new();
        draw_rectangle(&mut fb, 200, 100, 10, 10, Color::White);
        assert!(fb.raw().iter().all(|&b| b == 0));
    }
}
