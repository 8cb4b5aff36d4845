//! Text rasterizer
//!
//! Scale 1 blits whole glyph columns. A page-aligned anchor writes each
//! column byte straight into its page; an unaligned anchor splits every
//! column across two pages. Larger scales replicate each glyph bit into a
//! `scale x scale` block pixel by pixel.

use crate::font::{glyph, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::framebuffer::{Framebuffer, PAGE_HEIGHT};

/// Draw `text` with its top-left corner at `(x0, y0)`
///
/// Stops at an embedded NUL. There is no wrapping; glyphs past the right
/// or bottom edge are clipped. Reverse video only applies at scale 1.
pub fn draw_text<const W: usize, const P: usize>(
    fb: &mut Framebuffer<W, P>,
    x0: u8,
    y0: u8,
    text: &str,
    font_scale: u8,
    inverted: bool,
) {
    let scale = font_scale.max(1) as usize;
    let y = y0 as usize;
    let mut x = x0 as usize;

    for ch in text.chars().take_while(|&c| c != '\0') {
        if x >= W {
            break;
        }
        let columns = glyph(ch);
        if scale == 1 {
            blit_glyph(fb, x, y, columns, inverted);
        } else {
            scale_glyph(fb, x, y, columns, scale);
        }
        x += GLYPH_WIDTH * scale;
    }
}

fn blit_glyph<const W: usize, const P: usize>(
    fb: &mut Framebuffer<W, P>,
    x: usize,
    y: usize,
    columns: &[u8; GLYPH_WIDTH],
    inverted: bool,
) {
    let page = y / PAGE_HEIGHT;
    let aligned = y % PAGE_HEIGHT == 0;
    for (i, &column) in columns.iter().enumerate() {
        let byte = if inverted { !column } else { column };
        if aligned {
            fb.write(page, x + i, byte);
        } else {
            fb.or_column(x + i, y, byte);
        }
    }
}

fn scale_glyph<const W: usize, const P: usize>(
    fb: &mut Framebuffer<W, P>,
    x: usize,
    y: usize,
    columns: &[u8; GLYPH_WIDTH],
    scale: usize,
) {
    for col in 0..GLYPH_WIDTH * scale {
        let column = columns[col / scale];
        for row in 0..GLYPH_HEIGHT * scale {
            if column & (1 << (row / scale)) != 0 {
                fb.set_pixel(x + col, y + row);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FONT_6X8;
    use proptest::prelude::*;

    type Fb = Framebuffer<128, 8>;

    #[test]
    fn test_aligned_text_is_direct_glyph_copy() {
        let mut fb = Fb::new();
        draw_text(&mut fb, 10, 16, "Hi", 1, false);

        let page = fb.page(2).unwrap();
        assert_eq!(&page[10..16], glyph('H'));
        assert_eq!(&page[16..22], glyph('i'));
        assert!(fb.page(1).unwrap().iter().all(|&b| b == 0));
        assert!(fb.page(3).unwrap().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_aligned_write_replaces_existing_bits() {
        let mut fb = Fb::new();
        fb.fill(0xFF);
        draw_text(&mut fb, 0, 0, " ", 1, false);
        assert_eq!(&fb.page(0).unwrap()[0..6], &[0; 6]);
        assert_eq!(fb.byte(0, 6), 0xFF);
    }

    #[test]
    fn test_inverted_aligned_text() {
        let mut fb = Fb::new();
        draw_text(&mut fb, 0, 8, "A", 1, true);
        let expected: [u8; 6] = core::array::from_fn(|i| !glyph('A')[i]);
        assert_eq!(&fb.page(1).unwrap()[0..6], &expected);
    }

    #[test]
    fn test_inverted_unaligned_band_is_eight_rows() {
        let mut fb = Fb::new();
        draw_text(&mut fb, 0, 3, " ", 1, true);
        for col in 0..6 {
            for y in 0..16 {
                assert_eq!(fb.pixel(col, y), (3..11).contains(&y), "col {} row {}", col, y);
            }
        }
    }

    #[test]
    fn test_stops_at_nul() {
        let mut with_nul = Fb::new();
        draw_text(&mut with_nul, 0, 0, "AB\0CD", 1, false);
        let mut plain = Fb::new();
        draw_text(&mut plain, 0, 0, "AB", 1, false);
        assert_eq!(with_nul.raw(), plain.raw());
    }

    #[test]
    fn test_right_edge_is_clipped() {
        let mut fb = Fb::new();
        draw_text(&mut fb, 124, 0, "WWW", 1, false);
        assert_eq!(&fb.page(0).unwrap()[124..128], &glyph('W')[0..4]);
        assert!(fb.page(1).unwrap().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_bottom_page_unaligned_is_clipped() {
        let mut fb = Fb::new();
        draw_text(&mut fb, 0, 60, "|", 1, false);
        // '|' is 0x7F in column 2: rows 60..=63 survive
        assert_eq!(fb.byte(7, 2), 0xF0);
    }

    #[test]
    fn test_scaled_glyph_replicates_bits() {
        let mut fb = Fb::new();
        draw_text(&mut fb, 0, 0, ".", 2, false);
        // '.' is 0x60 in columns 1 and 2: rows 5,6 -> 10..14 at scale 2
        for x in 0..12 {
            for y in 0..16 {
                let on = (2..6).contains(&x) && (10..14).contains(&y);
                assert_eq!(fb.pixel(x, y), on, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_scaled_text_ignores_inversion() {
        let mut plain = Fb::new();
        draw_text(&mut plain, 3, 5, "ok", 3, false);
        let mut inverted = Fb::new();
        draw_text(&mut inverted, 3, 5, "ok", 3, true);
        assert_eq!(plain.raw(), inverted.raw());
    }

    #[test]
    fn test_scaled_advance() {
        let mut fb = Fb::new();
        draw_text(&mut fb, 0, 0, "||", 4, false);
        // '|' column 2 -> x 8..12 and 32..36
        assert!(fb.pixel(8, 0) && fb.pixel(11, 27));
        assert!(fb.pixel(32, 0) && fb.pixel(35, 27));
        assert!(!fb.pixel(12, 0));
    }

    proptest! {
        #[test]
        fn prop_split_write_equals_shifted_aligned_write(
            chars in proptest::collection::vec(0usize..FONT_6X8.len(), 1..6),
            page in 0u8..7,
            rem in 1u8..8,
            inverted in any::<bool>(),
        ) {
            let text: heapless::String<8> =
                chars.iter().map(|&i| (b' ' + i as u8) as char).collect();

            let mut aligned = Fb::new();
            draw_text(&mut aligned, 0, page * 8, &text, 1, inverted);
            let mut split = Fb::new();
            draw_text(&mut split, 0, page * 8 + rem, &text, 1, inverted);

            let page = page as usize;
            for col in 0..128 {
                let word = split.byte(page, col) as u16 | (split.byte(page + 1, col) as u16) << 8;
                prop_assert_eq!(word, (aligned.byte(page, col) as u16) << rem);
            }
        }
    }
}
