//! Lazy pixel decoder for validated uncompressed BMPs.
//!
//! Output is in display order: `y = 0` is the visually top row whatever the
//! storage order, `x = 0` is the leftmost column. Indexed depths are packed
//! most-significant bits first within each byte.

use core::iter::FusedIterator;

use rgb::alt::BGR8;

use crate::depth::BitDepth;
use crate::error::BmpError;
use crate::validate::BmpInfo;
use crate::view::RawBufferView;

/// Value of one decoded pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelValue {
    /// Palette index and the palette color it resolves to.
    Indexed { index: u8, color: BGR8 },
    /// 24-bit pixel stored as blue, green, red.
    Direct(BGR8),
}

impl PixelValue {
    pub fn color(&self) -> BGR8 {
        match *self {
            Self::Indexed { color, .. } | Self::Direct(color) => color,
        }
    }

    pub fn index(&self) -> Option<u8> {
        match *self {
            Self::Indexed { index, .. } => Some(index),
            Self::Direct(_) => None,
        }
    }
}

/// A pixel tagged with its display position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedPixel {
    pub x: u32,
    pub y: u32,
    pub value: PixelValue,
}

/// Decode the pixels of `data`, which must have passed validation as `info`.
pub fn decode_pixels<'a>(data: &'a [u8], info: &BmpInfo) -> Pixels<'a> {
    Pixels::new(RawBufferView::new(data), info)
}

/// Forward-only iterator over the pixels of one image.
///
/// Yields exactly `width * |height|` pixels for a conforming file. A pixel
/// that cannot be decoded (an index past the declared palette, or a row
/// shorter than its stride) yields one error, after which the iterator is
/// exhausted.
#[derive(Clone, Debug)]
pub struct Pixels<'a> {
    view: RawBufferView<'a>,
    depth: BitDepth,
    width: u32,
    height: u32,
    flipped: bool,
    stride: usize,
    palette_len: usize,
    x: u32,
    y: u32,
    row: &'a [u8],
    done: bool,
}

impl<'a> Pixels<'a> {
    pub fn new(view: RawBufferView<'a>, info: &BmpInfo) -> Self {
        let palette_len = if info.depth.is_indexed() {
            info.palette_colors() as usize
        } else {
            0
        };
        Self {
            view,
            depth: info.depth,
            width: info.width,
            height: info.abs_height(),
            flipped: info.is_flipped(),
            stride: usize::try_from(info.row_stride()).unwrap_or(usize::MAX),
            palette_len,
            x: 0,
            y: 0,
            row: &[],
            done: info.width == 0 || info.abs_height() == 0,
        }
    }

    /// Pixels not yet yielded.
    pub fn remaining(&self) -> u64 {
        if self.done {
            return 0;
        }
        let consumed = u64::from(self.y) * u64::from(self.width) + u64::from(self.x);
        u64::from(self.width) * u64::from(self.height) - consumed
    }

    /// Physical row holding display row `y`.
    fn stored_row(&self, y: u32) -> usize {
        if self.flipped {
            (self.height - 1 - y) as usize
        } else {
            y as usize
        }
    }

    fn decode_at(&self, x: u32) -> Result<PixelValue, BmpError> {
        let x = x as usize;
        if !self.depth.is_indexed() {
            let start = x * 3;
            let bgr = self
                .row
                .get(start..start + 3)
                .ok_or(BmpError::UnexpectedEof)?;
            return Ok(PixelValue::Direct(BGR8 {
                b: bgr[0],
                g: bgr[1],
                r: bgr[2],
            }));
        }

        let per_byte = self.depth.pixels_per_byte();
        let byte = *self
            .row
            .get(x / per_byte)
            .ok_or(BmpError::UnexpectedEof)?;
        let shift = (per_byte - 1 - x % per_byte) * usize::from(self.depth.bits());
        let index = (byte >> shift) & self.depth.index_mask();

        if usize::from(index) >= self.palette_len {
            return Err(BmpError::PaletteIndexOutOfRange {
                index,
                palette_len: self.palette_len,
                x: x as u32,
                y: self.y,
            });
        }
        let color = self
            .view
            .palette_entry(usize::from(index))
            .ok_or(BmpError::UnexpectedEof)?;
        Ok(PixelValue::Indexed { index, color })
    }
}

impl Iterator for Pixels<'_> {
    type Item = Result<DecodedPixel, BmpError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.x == 0 {
            self.row = self.view.row_bytes(self.stored_row(self.y), self.stride);
        }

        let (x, y) = (self.x, self.y);
        let value = match self.decode_at(x) {
            Ok(value) => value,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };

        self.x += 1;
        if self.x == self.width {
            self.x = 0;
            self.y += 1;
            if self.y == self.height {
                self.done = true;
            }
        }
        Some(Ok(DecodedPixel { x, y, value }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, usize::try_from(self.remaining()).ok())
    }
}

impl FusedIterator for Pixels<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate;
    use alloc::vec;
    use alloc::vec::Vec;

    /// 2-color 8x1 image, one packed byte per row.
    fn one_bit(row: u8, colors: u32) -> Vec<u8> {
        let mut data = vec![0u8; 54 + 8 + 4];
        let total = data.len() as u32;
        data[0..2].copy_from_slice(b"BM");
        data[2..6].copy_from_slice(&total.to_le_bytes());
        data[10..14].copy_from_slice(&62u32.to_le_bytes());
        data[18..22].copy_from_slice(&8i32.to_le_bytes());
        data[22..26].copy_from_slice(&1i32.to_le_bytes());
        data[26..28].copy_from_slice(&1u16.to_le_bytes());
        data[28..30].copy_from_slice(&1u16.to_le_bytes());
        data[34..38].copy_from_slice(&4u32.to_le_bytes());
        data[46..50].copy_from_slice(&colors.to_le_bytes());
        data[54..58].copy_from_slice(&[0, 0, 0, 0]);
        data[58..62].copy_from_slice(&[0xff, 0xff, 0xff, 0]);
        data[62] = row;
        data
    }

    #[test]
    fn one_bit_is_msb_first() {
        let data = one_bit(0b1010_0001, 0);
        let info = validate(&data).unwrap().info;
        let indices: Vec<u8> = decode_pixels(&data, &info)
            .map(|p| p.unwrap().value.index().unwrap())
            .collect();
        assert_eq!(indices, [1, 0, 1, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn index_past_declared_palette_stops_decoding() {
        // One declared color, but the third pixel uses index 1.
        let mut data = one_bit(0b0010_0000, 1);
        // Shrink the palette region: offset 58, drop 4 bytes.
        data.drain(58..62);
        let total = data.len() as u32;
        data[2..6].copy_from_slice(&total.to_le_bytes());
        data[10..14].copy_from_slice(&58u32.to_le_bytes());
        let info = validate(&data).unwrap().info;

        let mut pixels = decode_pixels(&data, &info);
        assert!(pixels.next().unwrap().is_ok());
        assert!(pixels.next().unwrap().is_ok());
        let err = pixels.next().unwrap().unwrap_err();
        assert!(matches!(
            err,
            BmpError::PaletteIndexOutOfRange {
                index: 1,
                palette_len: 1,
                x: 2,
                y: 0
            }
        ));
        assert!(pixels.next().is_none());
    }

    #[test]
    fn remaining_counts_down() {
        let data = one_bit(0, 0);
        let info = validate(&data).unwrap().info;
        let mut pixels = decode_pixels(&data, &info);
        assert_eq!(pixels.remaining(), 8);
        pixels.next();
        assert_eq!(pixels.remaining(), 7);
        assert_eq!(pixels.count(), 7);
    }
}
