//! Status icons
//!
//! 16x16 page-organized bitmaps with the `[width, height, rows...]` header
//! the core `Bitmap` expects.

/// Cloud connection established
pub static CLOUD_ICON: [u8; 34] = [
    0x10, 0x10, 0x00, 0xE0, 0xF8, 0x3C, 0x9C, 0x1E, 0x76, 0xF6, 0xC6, 0x0E, 0x7E, 0xFC, 0x7C,
    0x98, 0xC0, 0x00, 0x00, 0x0B, 0x19, 0x3E, 0x3F, 0x7E, 0x70, 0x63, 0x6F, 0x6E, 0x78, 0x3B,
    0x3C, 0x1F, 0x07, 0x00,
];

/// Wi-Fi associated
pub static WIFI_ICON: [u8; 34] = [
    0x10, 0x10, 0x00, 0x60, 0x30, 0xB0, 0x98, 0xD8, 0xD8, 0xC8, 0xC8, 0xD8, 0xD8, 0x98, 0xB0,
    0x30, 0x60, 0x00, 0x00, 0x00, 0x00, 0x01, 0x01, 0x04, 0x06, 0x16, 0x16, 0x06, 0x04, 0x01,
    0x01, 0x00, 0x00, 0x00,
];

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::Bitmap;

    #[test]
    fn test_icons_are_valid_bitmaps() {
        for icon in [&CLOUD_ICON, &WIFI_ICON] {
            let bitmap = Bitmap::new(icon).unwrap();
            assert_eq!(bitmap.width(), 16);
            assert_eq!(bitmap.height(), 16);
            assert_eq!(bitmap.pages(), 2);
        }
    }
}
