//! Zero-copy field access over a BMP byte buffer.
//!
//! Every accessor decodes little-endian bytes at a fixed offset and returns
//! `None` when the field extends past the end of the buffer. Nothing is
//! checked here; [`crate::validate`] decides what an unreadable field means.

use rgb::alt::BGR8;

/// BITMAPFILEHEADER (14 bytes) plus BITMAPINFOHEADER (40 bytes).
pub const HEADERS_SIZE: usize = 54;

/// Bytes per palette entry: blue, green, red, reserved.
pub const PALETTE_ENTRY_SIZE: usize = 4;

pub(crate) mod offsets {
    pub const MAGIC: usize = 0;
    pub const FILE_SIZE: usize = 2;
    pub const RESERVED_1: usize = 6;
    pub const RESERVED_2: usize = 8;
    pub const BITMAP_OFFSET: usize = 10;
    pub const DIB_HEADER_SIZE: usize = 14;
    pub const WIDTH: usize = 18;
    pub const HEIGHT: usize = 22;
    pub const COLOR_PLANES: usize = 26;
    pub const BITS_PER_PIXEL: usize = 28;
    pub const COMPRESSION: usize = 30;
    pub const RAW_BITMAP_SIZE: usize = 34;
    pub const H_RESOLUTION: usize = 38;
    pub const V_RESOLUTION: usize = 42;
    pub const COLORS: usize = 46;
    pub const IMPORTANT_COLORS: usize = 50;
}

/// Borrowed, structurally typed view of a BMP file.
///
/// Construction never fails and never copies.
#[derive(Clone, Copy, Debug)]
pub struct RawBufferView<'a> {
    data: &'a [u8],
}

impl<'a> RawBufferView<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// The whole underlying buffer.
    pub fn bytes(&self) -> &'a [u8] {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn array<const N: usize>(&self, offset: usize) -> Option<[u8; N]> {
        let end = offset.checked_add(N)?;
        self.data.get(offset..end)?.try_into().ok()
    }

    fn u16_at(&self, offset: usize) -> Option<u16> {
        self.array(offset).map(u16::from_le_bytes)
    }

    fn u32_at(&self, offset: usize) -> Option<u32> {
        self.array(offset).map(u32::from_le_bytes)
    }

    fn i32_at(&self, offset: usize) -> Option<i32> {
        self.array(offset).map(i32::from_le_bytes)
    }

    // ── File header ─────────────────────────────────────────────────

    pub fn magic(&self) -> Option<[u8; 2]> {
        self.array(offsets::MAGIC)
    }

    pub fn declared_file_size(&self) -> Option<u32> {
        self.u32_at(offsets::FILE_SIZE)
    }

    /// The two application-defined reserved fields.
    pub fn reserved(&self) -> Option<(u16, u16)> {
        Some((
            self.u16_at(offsets::RESERVED_1)?,
            self.u16_at(offsets::RESERVED_2)?,
        ))
    }

    pub fn bitmap_offset(&self) -> Option<u32> {
        self.u32_at(offsets::BITMAP_OFFSET)
    }

    // ── DIB header ──────────────────────────────────────────────────

    pub fn dib_header_size(&self) -> Option<u32> {
        self.u32_at(offsets::DIB_HEADER_SIZE)
    }

    pub fn width(&self) -> Option<i32> {
        self.i32_at(offsets::WIDTH)
    }

    /// Positive: rows stored bottom-to-top. Negative: top-to-bottom.
    pub fn height(&self) -> Option<i32> {
        self.i32_at(offsets::HEIGHT)
    }

    pub fn color_planes(&self) -> Option<u16> {
        self.u16_at(offsets::COLOR_PLANES)
    }

    pub fn bits_per_pixel(&self) -> Option<u16> {
        self.u16_at(offsets::BITS_PER_PIXEL)
    }

    pub fn compression_method(&self) -> Option<u32> {
        self.u32_at(offsets::COMPRESSION)
    }

    pub fn raw_bitmap_size(&self) -> Option<u32> {
        self.u32_at(offsets::RAW_BITMAP_SIZE)
    }

    pub fn h_resolution(&self) -> Option<i32> {
        self.i32_at(offsets::H_RESOLUTION)
    }

    pub fn v_resolution(&self) -> Option<i32> {
        self.i32_at(offsets::V_RESOLUTION)
    }

    /// Declared palette colors; 0 means the depth's default.
    pub fn declared_color_count(&self) -> Option<u32> {
        self.u32_at(offsets::COLORS)
    }

    pub fn declared_important_color_count(&self) -> Option<u32> {
        self.u32_at(offsets::IMPORTANT_COLORS)
    }

    // ── Palette and pixel rows ──────────────────────────────────────

    /// Palette entry `index`, read from directly after the 54 header bytes.
    pub fn palette_entry(&self, index: usize) -> Option<BGR8> {
        let offset = index
            .checked_mul(PALETTE_ENTRY_SIZE)?
            .checked_add(HEADERS_SIZE)?;
        let [b, g, r, _reserved] = self.array::<4>(offset)?;
        Some(BGR8 { b, g, r })
    }

    /// Bytes of the `y`-th physically stored row.
    ///
    /// Clipped to the buffer: a row that is partly or entirely past the end
    /// comes back short or empty.
    pub fn row_bytes(&self, y: usize, row_stride: usize) -> &'a [u8] {
        let Some(offset) = self.bitmap_offset() else {
            return &[];
        };
        let start = y
            .checked_mul(row_stride)
            .and_then(|s| s.checked_add(offset as usize));
        match start.and_then(|s| self.data.get(s..)) {
            Some(rest) => &rest[..rest.len().min(row_stride)],
            None => &[],
        }
    }
}
