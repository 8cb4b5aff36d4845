//! Image rasterizer
//!
//! Bitmaps are stored as page rows, so a page-aligned image is a straight
//! OR of each row into its page. An unaligned image splits each byte across
//! two pages, never spilling below the page holding its last row.

use crate::drawable::Bitmap;
use crate::framebuffer::{Framebuffer, PAGE_HEIGHT};

/// OR `bitmap` into the framebuffer with its top-left corner at `(x0, y0)`
pub fn draw_image<const W: usize, const P: usize>(
    fb: &mut Framebuffer<W, P>,
    x0: u8,
    y0: u8,
    bitmap: &Bitmap<'_>,
) {
    let height = bitmap.height() as usize;
    if height == 0 {
        return;
    }
    let left = x0 as usize;
    let top = y0 as usize;
    let last_page = (top + height - 1) / PAGE_HEIGHT;
    let rem = top % PAGE_HEIGHT;

    for row in 0..bitmap.pages() {
        let page = top / PAGE_HEIGHT + row;
        for (i, &byte) in bitmap.page_row(row).iter().enumerate() {
            let col = left + i;
            fb.or_mask(page, col, byte << rem);
            if rem != 0 && page < last_page {
                fb.or_mask(page + 1, col, byte >> (PAGE_HEIGHT - rem));
            }
        }
    }
}
