//! Text rendering of validated fields and decoded pixels.
//!
//! Field lines are padded so every value ends in column 39.

use core::fmt::{self, Write};

use crate::decode::{DecodedPixel, PixelValue, Pixels};
use crate::depth::BitDepth;
use crate::validate::{BmpInfo, Field};

/// Header line printed above the pixel listing.
pub const PIXEL_LISTING_HEADER: &str = "Bitmap Data (index:Blue Green Red):";

/// Write one field line, newline included.
pub fn write_field(out: &mut impl Write, field: &Field) -> fmt::Result {
    match *field {
        Field::Magic => writeln!(out, "Magic: {:>32}", "BM"),
        Field::FileSize(v) => writeln!(out, "File Size: {v:>28}"),
        Field::BitsPerPixel(d) => writeln!(out, "Bits per Pixel: {:>23}", d.bits()),
        Field::BitmapOffset(v) => writeln!(out, "Bitmap Offset: {v:>24}"),
        Field::RawBitmapSize(v) => writeln!(out, "Bitmap Size (raw): {v:>20}"),
        Field::Width(v) => writeln!(out, "Image Width: {v:>26}"),
        Field::Height(h) => {
            let marker = if h > 0 { "(flipped)" } else { "" };
            writeln!(out, "Image Height: {marker:>9} {:>15}", h.unsigned_abs())
        }
        Field::ColorPlanes(v) => writeln!(out, "Color Planes: {v:>25}"),
        Field::Compression(_) => writeln!(out, "Compression: {:>26}", "none"),
        Field::HorizontalResolution(v) => writeln!(out, "Horizontal Resolution: {v:>16}"),
        Field::VerticalResolution(v) => writeln!(out, "Vertical Resolution: {v:>18}"),
        Field::PaletteColors { declared, resolved } => {
            if declared == 0 && resolved != 0 {
                writeln!(out, "Number of Palette Colors: {:>9} {resolved:>3}", "0 =")
            } else {
                writeln!(out, "Number of Palette Colors: {declared:>13}")
            }
        }
        Field::ImportantColors(v) => writeln!(out, "Number of Important Palette Colors: {v:>3}"),
    }
}

/// All field lines of a validated file.
#[derive(Clone, Copy, Debug)]
pub struct FieldReport<'a>(pub &'a BmpInfo);

impl fmt::Display for FieldReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for field in self.0.fields() {
            write_field(f, &field)?;
        }
        Ok(())
    }
}

/// Write one pixel followed by `-`, or by a newline when it ends its row.
///
/// Indexed pixels print as `index:bbggrr` with the index zero-padded to
/// the depth's digit count, direct pixels as `bbggrr`.
pub fn write_pixel(
    out: &mut impl Write,
    pixel: &DecodedPixel,
    depth: BitDepth,
    width: u32,
) -> fmt::Result {
    let c = pixel.value.color();
    if let PixelValue::Indexed { index, .. } = pixel.value {
        write!(out, "{index:0digits$}:", digits = depth.index_digits())?;
    }
    write!(out, "{:02x}{:02x}{:02x}", c.b, c.g, c.r)?;
    out.write_char(if pixel.x + 1 < width { '-' } else { '\n' })
}

/// The full pixel listing, header line included.
///
/// Formatting fails with [`fmt::Error`] at the first pixel that cannot be
/// decoded; drive [`write_pixel`] directly to see the underlying error.
#[derive(Clone, Debug)]
pub struct PixelListing<'a> {
    pixels: Pixels<'a>,
    depth: BitDepth,
    width: u32,
}

impl<'a> PixelListing<'a> {
    pub fn new(pixels: Pixels<'a>, info: &BmpInfo) -> Self {
        Self {
            pixels,
            depth: info.depth,
            width: info.width,
        }
    }
}

impl fmt::Display for PixelListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{PIXEL_LISTING_HEADER}")?;
        for pixel in self.pixels.clone() {
            let pixel = pixel.map_err(|_| fmt::Error)?;
            write_pixel(f, &pixel, self.depth, self.width)?;
        }
        Ok(())
    }
}
