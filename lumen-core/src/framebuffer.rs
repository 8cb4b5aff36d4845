//! Page-organized 1bpp framebuffer
//!
//! The canvas is `P` pages of 8 pixel rows by `W` columns. Byte
//! `buffer[page][col]` holds pixels `(col, page*8 ..= page*8 + 7)`, bit 0 at
//! the top, which is exactly the layout SSD1306-class controllers expect in
//! horizontal addressing mode.
//!
//! Every primitive clips: coordinates outside the canvas are ignored rather
//! than written past the buffer.

/// Pixel rows per page
pub const PAGE_HEIGHT: usize = 8;

/// Page-organized monochrome canvas
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer<const W: usize, const P: usize> {
    buffer: [[u8; W]; P],
}

impl<const W: usize, const P: usize> Default for Framebuffer<W, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const P: usize> core::fmt::Debug for Framebuffer<W, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Framebuffer")
            .field("width", &W)
            .field("pages", &P)
            .finish()
    }
}

impl<const W: usize, const P: usize> Framebuffer<W, P> {
    /// Width in pixels
    pub const WIDTH: usize = W;
    /// Number of 8-row pages
    pub const PAGES: usize = P;
    /// Height in pixels
    pub const HEIGHT: usize = P * PAGE_HEIGHT;
    /// Buffer size in bytes
    pub const SIZE: usize = P * W;

    /// Create a blank framebuffer
    pub const fn new() -> Self {
        Self {
            buffer: [[0; W]; P],
        }
    }

    /// Zero every byte
    pub fn clear(&mut self) {
        self.fill(0);
    }

    /// Set every byte to `byte`
    pub fn fill(&mut self, byte: u8) {
        for page in self.buffer.iter_mut() {
            page.fill(byte);
        }
    }

    /// Turn a pixel on
    pub fn set_pixel(&mut self, x: usize, y: usize) {
        if let Some(byte) = self.byte_mut(y / PAGE_HEIGHT, x) {
            *byte |= 1 << (y % PAGE_HEIGHT);
        }
    }

    /// Turn a pixel off
    pub fn clear_pixel(&mut self, x: usize, y: usize) {
        if let Some(byte) = self.byte_mut(y / PAGE_HEIGHT, x) {
            *byte &= !(1 << (y % PAGE_HEIGHT));
        }
    }

    /// Read a pixel; out-of-range pixels read as off
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.byte(y / PAGE_HEIGHT, x) & (1 << (y % PAGE_HEIGHT)) != 0
    }

    /// Read one column byte of a page; out of range reads as zero
    pub fn byte(&self, page: usize, col: usize) -> u8 {
        self.buffer
            .get(page)
            .and_then(|p| p.get(col))
            .copied()
            .unwrap_or(0)
    }

    /// Overwrite one column byte of a page
    pub fn write(&mut self, page: usize, col: usize, value: u8) {
        if let Some(byte) = self.byte_mut(page, col) {
            *byte = value;
        }
    }

    /// OR `mask` into one column byte of a page
    pub fn or_mask(&mut self, page: usize, col: usize, mask: u8) {
        if let Some(byte) = self.byte_mut(page, col) {
            *byte |= mask;
        }
    }

    /// AND `mask` into one column byte of a page
    pub fn and_mask(&mut self, page: usize, col: usize, mask: u8) {
        if let Some(byte) = self.byte_mut(page, col) {
            *byte &= mask;
        }
    }

    /// OR a column byte whose bit 0 lands on pixel row `y`
    ///
    /// When `y` is not page aligned the byte straddles two pages: the low
    /// part goes into page `y / 8` shifted up by `y % 8`, the remainder into
    /// the next page shifted down by `8 - y % 8`.
    pub fn or_column(&mut self, col: usize, y: usize, value: u8) {
        let page = y / PAGE_HEIGHT;
        let rem = y % PAGE_HEIGHT;
        if rem == 0 {
            self.or_mask(page, col, value);
        } else {
            self.or_mask(page, col, value << rem);
            self.or_mask(page + 1, col, value >> (PAGE_HEIGHT - rem));
        }
    }

    /// One page as a column slice
    pub fn page(&self, page: usize) -> Option<&[u8; W]> {
        self.buffer.get(page)
    }

    /// Whole buffer, page after page, ready for transmission
    pub fn raw(&self) -> &[u8] {
        self.buffer.as_flattened()
    }

    fn byte_mut(&mut self, page: usize, col: usize) -> Option<&mut u8> {
        self.buffer.get_mut(page).and_then(|p| p.get_mut(col))
    }
}
