//! BMP fixture builder shared by the integration tests.
#![allow(dead_code)]

/// Byte offsets of the header fields patched by tests.
pub mod at {
    pub const FILE_SIZE: usize = 2;
    pub const BITMAP_OFFSET: usize = 10;
    pub const WIDTH: usize = 18;
    pub const HEIGHT: usize = 22;
    pub const PLANES: usize = 26;
    pub const BPP: usize = 28;
    pub const COMPRESSION: usize = 30;
    pub const RAW_SIZE: usize = 34;
    pub const COLORS: usize = 46;
    pub const IMPORTANT: usize = 50;
}

pub fn stride(width: u32, bpp: u16) -> usize {
    (width as usize * bpp as usize).div_ceil(32) * 4
}

/// Builds uncompressed BITMAPINFOHEADER files.
#[derive(Clone, Debug)]
pub struct Fixture {
    bpp: u16,
    width: i32,
    height: i32,
    palette: Vec<[u8; 3]>,
    declared_colors: u32,
    important_colors: u32,
    rows: Vec<Vec<u8>>,
    gap: usize,
    trailing: usize,
}

impl Fixture {
    /// All-zero pixels; indexed depths get a full palette where entry `i`
    /// is `(b, g, r) = (i, 255 - i, i / 2)`.
    pub fn new(bpp: u16, width: i32, height: i32) -> Self {
        let palette = if bpp <= 8 {
            (0..1usize << bpp)
                .map(|i| [i as u8, 255 - i as u8, (i / 2) as u8])
                .collect()
        } else {
            Vec::new()
        };
        Self {
            bpp,
            width,
            height,
            palette,
            declared_colors: 0,
            important_colors: 0,
            rows: Vec::new(),
            gap: 0,
            trailing: 0,
        }
    }

    /// Replace the palette (BGR entries) and declare its length.
    pub fn palette(mut self, entries: &[[u8; 3]]) -> Self {
        self.palette = entries.to_vec();
        self.declared_colors = entries.len() as u32;
        self
    }

    pub fn important_colors(mut self, n: u32) -> Self {
        self.important_colors = n;
        self
    }

    /// Rows in storage order; each is padded with zeros to the stride.
    pub fn rows(mut self, rows: &[&[u8]]) -> Self {
        self.rows = rows.iter().map(|r| r.to_vec()).collect();
        self
    }

    /// Unused bytes between the palette and the pixel data.
    pub fn gap(mut self, n: usize) -> Self {
        self.gap = n;
        self
    }

    /// Bytes after the pixel data.
    pub fn trailing(mut self, n: usize) -> Self {
        self.trailing = n;
        self
    }

    pub fn stride(&self) -> usize {
        stride(self.width.unsigned_abs(), self.bpp)
    }

    pub fn build(&self) -> Vec<u8> {
        let stride = self.stride();
        let rows = self.height.unsigned_abs() as usize;
        let raw = stride * rows;
        let offset = 54 + self.palette.len() * 4 + self.gap;
        let total = offset + raw + self.trailing;

        let mut out = Vec::with_capacity(total);
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&(total as u32).to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes()); // reserved
        out.extend_from_slice(&(offset as u32).to_le_bytes());
        out.extend_from_slice(&40u32.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes()); // planes
        out.extend_from_slice(&self.bpp.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes()); // compression
        out.extend_from_slice(&(raw as u32).to_le_bytes());
        out.extend_from_slice(&2835i32.to_le_bytes()); // 72 DPI
        out.extend_from_slice(&2835i32.to_le_bytes());
        out.extend_from_slice(&self.declared_colors.to_le_bytes());
        out.extend_from_slice(&self.important_colors.to_le_bytes());

        for [b, g, r] in &self.palette {
            out.extend_from_slice(&[*b, *g, *r, 0]);
        }
        out.resize(offset, 0);

        for y in 0..rows {
            let mut row = self.rows.get(y).cloned().unwrap_or_default();
            row.resize(stride, 0);
            out.extend_from_slice(&row);
        }
        out.resize(total, 0);
        out
    }
}

pub fn patch_u16(data: &mut [u8], offset: usize, value: u16) {
    data[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

pub fn patch_u32(data: &mut [u8], offset: usize, value: u32) {
    data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

pub fn patch_i32(data: &mut [u8], offset: usize, value: i32) {
    data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

pub fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(data[offset..offset + 4].try_into().unwrap())
}
