//! Drawable object model
//!
//! A drawable is an anchor `(x0, y0)` plus one [`Shape`]. The shape variant
//! is the drawable's kind, so a slot can never expose the fields of a kind
//! it does not hold.

use heapless::String;

/// Maximum characters a text field holds (one full line at scale 1)
pub const MAX_TEXT_LEN: usize = 21;

/// Largest supported font scale
pub const MAX_FONT_SCALE: u8 = 4;

/// Owned, bounded text content
pub type Text = String<MAX_TEXT_LEN>;

/// Errors raised by the registry and drawable constructors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrawableError {
    /// Every slot is in use
    AllocationFailed,
    /// Identifier is out of range or refers to a freed slot
    InvalidReference,
    /// Setter does not apply to this drawable's kind
    KindMismatch,
    /// Image bitmap is shorter than its width/height header claims
    InvalidBitmap,
}

/// Externally visible drawable identifier (the registry slot index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrawableId(pub(crate) u8);

impl DrawableId {
    /// Slot index
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Raw identifier value
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// Fill color for rectangles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// Pixels on
    #[default]
    White,
    /// Pixels off (erase)
    Black,
}

/// Drawable kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Kind {
    Text,
    Line,
    Rectangle,
    Image,
}

/// Pre-rendered page-organized image
///
/// Byte 0 is the width, byte 1 the height; then `ceil(height / 8)` page
/// rows of `width` bytes each, bit 0 at the top of the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bitmap<'a> {
    data: &'a [u8],
}

impl<'a> Bitmap<'a> {
    /// Validate a header-prefixed bitmap
    pub fn new(data: &'a [u8]) -> Result<Self, DrawableError> {
        let [width, height, ..] = data else {
            return Err(DrawableError::InvalidBitmap);
        };
        let pages = (*height as usize).div_ceil(8);
        if data.len() < 2 + *width as usize * pages {
            return Err(DrawableError::InvalidBitmap);
        }
        Ok(Self { data })
    }

    /// Width in pixels
    pub fn width(&self) -> u8 {
        self.data[0]
    }

    /// Height in pixels
    pub fn height(&self) -> u8 {
        self.data[1]
    }

    /// Number of page rows in the payload
    pub fn pages(&self) -> usize {
        (self.height() as usize).div_ceil(8)
    }

    /// Column bytes of one page row
    pub fn page_row(&self, page: usize) -> &'a [u8] {
        let width = self.width() as usize;
        let start = 2 + page * width;
        self.data.get(start..start + width).unwrap_or(&[])
    }

    /// Raw header-prefixed bytes
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }
}

/// Kind-specific drawable state
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Shape<'a> {
    /// Text field; `font_scale` is always in `1..=4`
    Text {
        text: Text,
        font_scale: u8,
        inverted: bool,
    },
    /// Segment from the anchor to `(end_x, end_y)`
    Line { end_x: u8, end_y: u8 },
    /// Filled box anchored at the top-left corner
    Rectangle { width: u8, height: u8, color: Color },
    /// Borrowed bitmap
    Image { bitmap: Bitmap<'a> },
}

impl Shape<'_> {
    /// Kind tag of this shape
    pub fn kind(&self) -> Kind {
        match self {
            Shape::Text { .. } => Kind::Text,
            Shape::Line { .. } => Kind::Line,
            Shape::Rectangle { .. } => Kind::Rectangle,
            Shape::Image { .. } => Kind::Image,
        }
    }
}

/// A renderable object: anchor plus shape
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Drawable<'a> {
    /// Left edge (start point for lines)
    pub x0: u8,
    /// Top edge (start point for lines)
    pub y0: u8,
    /// Kind-specific state
    pub shape: Shape<'a>,
}

impl<'a> Drawable<'a> {
    /// Text field; over-long text is truncated and the scale normalized
    pub fn text(x0: u8, y0: u8, text: &str, font_scale: u8, inverted: bool) -> Self {
        Self {
            x0,
            y0,
            shape: Shape::Text {
                text: bounded_text(text),
                font_scale: normalize_font_scale(font_scale),
                inverted,
            },
        }
    }

    /// Line from `(x0, y0)` to `(x1, y1)`
    pub fn line(x0: u8, y0: u8, x1: u8, y1: u8) -> Self {
        Self {
            x0,
            y0,
            shape: Shape::Line {
                end_x: x1,
                end_y: y1,
            },
        }
    }

    /// Rectangle in the given color
    pub fn rectangle(x0: u8, y0: u8, width: u8, height: u8, color: Color) -> Self {
        Self {
            x0,
            y0,
            shape: Shape::Rectangle {
                width,
                height,
                color,
            },
        }
    }

    /// Image from a header-prefixed bitmap
    pub fn image(x0: u8, y0: u8, bitmap: &'a [u8]) -> Result<Self, DrawableError> {
        Ok(Self {
            x0,
            y0,
            shape: Shape::Image {
                bitmap: Bitmap::new(bitmap)?,
            },
        })
    }

    /// Kind tag
    pub fn kind(&self) -> Kind {
        self.shape.kind()
    }
}

/// Reduce a requested font scale into `1..=4`
///
/// The scale is taken modulo 5; a result of zero becomes 1.
pub fn normalize_font_scale(scale: u8) -> u8 {
    match scale % (MAX_FONT_SCALE + 1) {
        0 => 1,
        s => s,
    }
}

/// Copy `text` into bounded storage, dropping what does not fit
pub fn bounded_text(text: &str) -> Text {
    let mut out = Text::new();
    for ch in text.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}
