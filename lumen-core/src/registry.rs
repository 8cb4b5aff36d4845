//! Drawable registry
//!
//! Fixed-capacity slot table. A slot index is the drawable's identifier:
//! allocation always claims the lowest free slot, freeing empties it, and
//! the storage itself is never grown or moved.
//!
//! The registry never touches the framebuffer; changes become visible at
//! the next render cycle.

use crate::drawable::{
    bounded_text, normalize_font_scale, Bitmap, Color, Drawable, DrawableError, DrawableId, Kind,
    Shape,
};

/// Default number of drawable slots
pub const DEFAULT_CAPACITY: usize = 40;

/// Fixed-capacity table of drawables
#[derive(Debug, Clone)]
pub struct Registry<'a, const N: usize = DEFAULT_CAPACITY> {
    slots: [Option<Drawable<'a>>; N],
    /// Largest valid x coordinate, used to clamp line endpoints
    max_x: u8,
    /// Largest valid y coordinate, used to clamp line endpoints
    max_y: u8,
}

impl<'a, const N: usize> Registry<'a, N> {
    const IDS_FIT_IN_U8: () = assert!(N <= u8::MAX as usize + 1, "slot index must fit a u8");

    /// Create an empty registry for a `width` x `height` pixel display
    pub fn new(width: usize, height: usize) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::IDS_FIT_IN_U8;
        Self {
            slots: core::array::from_fn(|_| None),
            max_x: width.saturating_sub(1).min(u8::MAX as usize) as u8,
            max_y: height.saturating_sub(1).min(u8::MAX as usize) as u8,
        }
    }

    /// Number of slots
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of slots in use
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Check if no slot is in use
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Check if every slot is in use
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Check if `id` refers to a slot in use
    pub fn is_used(&self, id: DrawableId) -> bool {
        self.get(id).is_some()
    }

    /// Place a drawable into the lowest free slot
    ///
    /// On failure the registry is left untouched. A text field's font scale
    /// is normalized on the way in.
    pub fn allocate(&mut self, mut drawable: Drawable<'a>) -> Result<DrawableId, DrawableError> {
        if let Shape::Text { font_scale, .. } = &mut drawable.shape {
            *font_scale = normalize_font_scale(*font_scale);
        }
        let Some(index) = self.slots.iter().position(Option::is_none) else {
            #[cfg(feature = "defmt")]
            defmt::warn!("drawable registry full ({} slots)", N);
            return Err(DrawableError::AllocationFailed);
        };
        self.slots[index] = Some(drawable);
        Ok(DrawableId(index as u8))
    }

    /// Create a text field
    pub fn create_text(
        &mut self,
        x0: u8,
        y0: u8,
        text: &str,
        font_scale: u8,
        inverted: bool,
    ) -> Result<DrawableId, DrawableError> {
        self.allocate(Drawable::text(x0, y0, text, font_scale, inverted))
    }

    /// Create a line from `(x0, y0)` to `(x1, y1)`
    pub fn create_line(
        &mut self,
        x0: u8,
        y0: u8,
        x1: u8,
        y1: u8,
    ) -> Result<DrawableId, DrawableError> {
        self.allocate(Drawable::line(x0, y0, x1, y1))
    }

    /// Create a white (filled) rectangle
    pub fn create_rectangle(
        &mut self,
        x0: u8,
        y0: u8,
        width: u8,
        height: u8,
    ) -> Result<DrawableId, DrawableError> {
        self.allocate(Drawable::rectangle(x0, y0, width, height, Color::White))
    }

    /// Create an image from a header-prefixed bitmap
    pub fn create_image(
        &mut self,
        x0: u8,
        y0: u8,
        bitmap: &'a [u8],
    ) -> Result<DrawableId, DrawableError> {
        self.allocate(Drawable::image(x0, y0, bitmap)?)
    }

    /// Release a slot
    ///
    /// Identifiers are recycled: once freed, `id` may be handed out again by
    /// the next allocation, so callers must drop their copy of it.
    pub fn free(&mut self, id: DrawableId) -> Result<(), DrawableError> {
        self.slots
            .get_mut(id.index())
            .and_then(Option::take)
            .map(|_| ())
            .ok_or(DrawableError::InvalidReference)
    }

    /// Free every slot
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
    }

    /// Drawable held by `id`
    pub fn get(&self, id: DrawableId) -> Option<&Drawable<'a>> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    /// Used slots in ascending identifier order
    pub fn iter(&self) -> impl Iterator<Item = (DrawableId, &Drawable<'a>)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|d| (DrawableId(i as u8), d)))
    }

    /// Move any drawable's anchor
    ///
    /// Not validated against the display size; rasterizers clip.
    pub fn move_to(&mut self, id: DrawableId, x0: u8, y0: u8) -> Result<(), DrawableError> {
        let drawable = self.slot_mut(id)?;
        drawable.x0 = x0;
        drawable.y0 = y0;
        Ok(())
    }

    /// Replace a text field's content
    pub fn set_text(&mut self, id: DrawableId, text: &str) -> Result<(), DrawableError> {
        match self.shape_mut(id, Kind::Text)? {
            Shape::Text { text: current, .. } => {
                *current = bounded_text(text);
                Ok(())
            }
            _ => Err(DrawableError::KindMismatch),
        }
    }

    /// Switch a text field between normal and reverse video
    pub fn set_inverted(&mut self, id: DrawableId, inverted: bool) -> Result<(), DrawableError> {
        match self.shape_mut(id, Kind::Text)? {
            Shape::Text { inverted: current, .. } => {
                *current = inverted;
                Ok(())
            }
            _ => Err(DrawableError::KindMismatch),
        }
    }

    /// Change a text field's font scale
    pub fn set_font_scale(&mut self, id: DrawableId, font_scale: u8) -> Result<(), DrawableError> {
        match self.shape_mut(id, Kind::Text)? {
            Shape::Text {
                font_scale: current,
                ..
            } => {
                *current = normalize_font_scale(font_scale);
                Ok(())
            }
            _ => Err(DrawableError::KindMismatch),
        }
    }

    /// Move a line's end point, clamped to the display
    pub fn set_line_endpoint(
        &mut self,
        id: DrawableId,
        x1: u8,
        y1: u8,
    ) -> Result<(), DrawableError> {
        let (max_x, max_y) = (self.max_x, self.max_y);
        match self.shape_mut(id, Kind::Line)? {
            Shape::Line { end_x, end_y } => {
                *end_x = x1.min(max_x);
                *end_y = y1.min(max_y);
                Ok(())
            }
            _ => Err(DrawableError::KindMismatch),
        }
    }

    /// Resize a rectangle
    pub fn set_rectangle_size(
        &mut self,
        id: DrawableId,
        width: u8,
        height: u8,
    ) -> Result<(), DrawableError> {
        match self.shape_mut(id, Kind::Rectangle)? {
            Shape::Rectangle {
                width: w,
                height: h,
                ..
            } => {
                *w = width;
                *h = height;
                Ok(())
            }
            _ => Err(DrawableError::KindMismatch),
        }
    }

    /// Switch a rectangle between fill (white) and erase (black)
    pub fn set_rectangle_color(
        &mut self,
        id: DrawableId,
        color: Color,
    ) -> Result<(), DrawableError> {
        match self.shape_mut(id, Kind::Rectangle)? {
            Shape::Rectangle { color: current, .. } => {
                *current = color;
                Ok(())
            }
            _ => Err(DrawableError::KindMismatch),
        }
    }

    /// Swap an image's bitmap
    pub fn set_image(&mut self, id: DrawableId, bitmap: &'a [u8]) -> Result<(), DrawableError> {
        let bitmap = Bitmap::new(bitmap)?;
        match self.shape_mut(id, Kind::Image)? {
            Shape::Image { bitmap: current } => {
                *current = bitmap;
                Ok(())
            }
            _ => Err(DrawableError::KindMismatch),
        }
    }

    /// Shape of `id`, provided it is of `kind`
    fn shape_mut(&mut self, id: DrawableId, kind: Kind) -> Result<&mut Shape<'a>, DrawableError> {
        let drawable = self.slot_mut(id)?;
        if drawable.kind() != kind {
            #[cfg(feature = "defmt")]
            defmt::debug!("{} setter on {} drawable {}", kind, drawable.kind(), id);
            return Err(DrawableError::KindMismatch);
        }
        Ok(&mut drawable.shape)
    }

    fn slot_mut(&mut self, id: DrawableId) -> Result<&mut Drawable<'a>, DrawableError> {
        self.slots
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(DrawableError::InvalidReference)
    }
}
