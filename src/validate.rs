//! Ordered structural validation of an uncompressed BMP.
//!
//! [`validate_with`] runs the checks listed in [`Check::ALL`] one after the
//! other and stops at the first failure. Each passing check hands the value
//! it just verified to the caller's event sink, so a reporter can print the
//! fields in the same pass.

use alloc::vec::Vec;
use core::fmt;

use crate::depth::{BitDepth, row_stride};
use crate::error::{BmpError, Check};
use crate::view::{HEADERS_SIZE, PALETTE_ENTRY_SIZE, RawBufferView, offsets};

/// A header field that passed validation, in report order.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Magic,
    FileSize(u32),
    BitsPerPixel(BitDepth),
    BitmapOffset(u32),
    RawBitmapSize(u32),
    Width(u32),
    /// Raw signed height; positive means the rows are stored flipped.
    Height(i32),
    ColorPlanes(u16),
    /// Always 0 once validated.
    Compression(u32),
    HorizontalResolution(i32),
    VerticalResolution(i32),
    /// `resolved` is the default palette size when `declared` is 0.
    PaletteColors { declared: u32, resolved: u32 },
    ImportantColors(u32),
}

/// Non-fatal finding recorded while validation continues.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advisory {
    /// Gap between the palette and the pixel data.
    OffsetLargerThanNecessary { minimum: u64, actual: u32 },
    /// Bytes after the end of the pixel data.
    TrailingBytes { count: u64 },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::OffsetLargerThanNecessary { minimum, actual } => write!(
                f,
                "bitmap offset larger than necessary > {minimum}: {actual}"
            ),
            Self::TrailingBytes { count } => {
                write!(f, "file contains bytes after bitmap: {count}")
            }
        }
    }
}

/// What the validator reports while it runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationEvent {
    Passed(Field),
    Advisory(Advisory),
}

/// Every header field of a file that passed all checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BmpInfo {
    pub file_size: u32,
    pub bitmap_offset: u32,
    /// Informational, not validated (40 for BITMAPINFOHEADER).
    pub dib_header_size: u32,
    pub width: u32,
    pub height: i32,
    pub color_planes: u16,
    pub depth: BitDepth,
    pub compression: u32,
    pub raw_bitmap_size: u32,
    pub h_resolution: i32,
    pub v_resolution: i32,
    pub declared_colors: u32,
    pub important_colors: u32,
}

impl BmpInfo {
    /// Rows are stored bottom-to-top.
    pub fn is_flipped(&self) -> bool {
        self.height > 0
    }

    pub fn abs_height(&self) -> u32 {
        self.height.unsigned_abs()
    }

    pub fn row_stride(&self) -> u64 {
        row_stride(self.width, self.depth.bits())
    }

    /// Number of pixels the decoder yields.
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.abs_height())
    }

    /// Palette entries in use: the declared count, or the depth's default.
    pub fn palette_colors(&self) -> u32 {
        resolve_colors(self.declared_colors, self.depth)
    }

    /// Fields in report order.
    pub fn fields(&self) -> [Field; 13] {
        [
            Field::Magic,
            Field::FileSize(self.file_size),
            Field::BitsPerPixel(self.depth),
            Field::BitmapOffset(self.bitmap_offset),
            Field::RawBitmapSize(self.raw_bitmap_size),
            Field::Width(self.width),
            Field::Height(self.height),
            Field::ColorPlanes(self.color_planes),
            Field::Compression(self.compression),
            Field::HorizontalResolution(self.h_resolution),
            Field::VerticalResolution(self.v_resolution),
            Field::PaletteColors {
                declared: self.declared_colors,
                resolved: self.palette_colors(),
            },
            Field::ImportantColors(self.important_colors),
        ]
    }
}

/// Validation result: the field set plus accumulated advisories.
#[derive(Clone, Debug)]
pub struct Validated {
    pub info: BmpInfo,
    pub advisories: Vec<Advisory>,
}

/// Run every check, collecting advisories.
pub fn validate(data: &[u8]) -> Result<Validated, BmpError> {
    let mut advisories = Vec::new();
    let info = validate_with(data, |event| {
        if let ValidationEvent::Advisory(a) = event {
            advisories.push(a);
        }
    })?;
    Ok(Validated { info, advisories })
}

/// Run every check, reporting each passed field and advisory to `events`
/// as soon as it is known.
pub fn validate_with(
    data: &[u8],
    mut events: impl FnMut(ValidationEvent),
) -> Result<BmpInfo, BmpError> {
    let view = RawBufferView::new(data);
    let len = data.len();
    let file_size = len as u64;

    // 1. Magic
    let magic = field(Check::Magic, offsets::MAGIC + 2, len, view.magic())?;
    if &magic != b"BM" {
        return Err(BmpError::Structural {
            check: Check::Magic,
            expected: u64::from(u16::from_be_bytes(*b"BM")),
            actual: u64::from(u16::from_be_bytes(magic)),
        });
    }
    events(ValidationEvent::Passed(Field::Magic));

    // 2. Declared size
    let declared_size = field(
        Check::FileSize,
        offsets::FILE_SIZE + 4,
        len,
        view.declared_file_size(),
    )?;
    if u64::from(declared_size) != file_size {
        return Err(BmpError::Structural {
            check: Check::FileSize,
            expected: file_size,
            actual: u64::from(declared_size),
        });
    }
    events(ValidationEvent::Passed(Field::FileSize(declared_size)));

    // 3. Bit depth
    let bits = field(
        Check::BitsPerPixel,
        offsets::BITS_PER_PIXEL + 2,
        len,
        view.bits_per_pixel(),
    )?;
    let depth = BitDepth::from_bits(bits).ok_or(BmpError::Structural {
        check: Check::BitsPerPixel,
        expected: 24,
        actual: u64::from(bits),
    })?;
    events(ValidationEvent::Passed(Field::BitsPerPixel(depth)));

    // 4. Palette size
    let declared_colors = field(
        Check::PaletteColors,
        offsets::COLORS + 4,
        len,
        view.declared_color_count(),
    )?;
    if declared_colors > depth.max_palette_colors() {
        return Err(BmpError::Structural {
            check: Check::PaletteColors,
            expected: u64::from(depth.max_palette_colors()),
            actual: u64::from(declared_colors),
        });
    }

    // 5. Offset inside the file
    let bitmap_offset = field(
        Check::OffsetPastEnd,
        offsets::BITMAP_OFFSET + 4,
        len,
        view.bitmap_offset(),
    )?;
    if u64::from(bitmap_offset) > file_size {
        return Err(BmpError::Structural {
            check: Check::OffsetPastEnd,
            expected: file_size,
            actual: u64::from(bitmap_offset),
        });
    }

    // 6. Offset behind headers and palette
    let minimum_offset = HEADERS_SIZE as u64 + palette_bytes(depth, declared_colors);
    if u64::from(bitmap_offset) < minimum_offset {
        return Err(BmpError::Structural {
            check: Check::OffsetInsideHeaders,
            expected: minimum_offset,
            actual: u64::from(bitmap_offset),
        });
    }
    if u64::from(bitmap_offset) > minimum_offset {
        events(ValidationEvent::Advisory(
            Advisory::OffsetLargerThanNecessary {
                minimum: minimum_offset,
                actual: bitmap_offset,
            },
        ));
    }
    events(ValidationEvent::Passed(Field::BitmapOffset(bitmap_offset)));

    // From here on the buffer holds at least the full 54 header bytes.

    // 7. Pixel data fits
    let raw_size = field(
        Check::BitmapSize,
        offsets::RAW_BITMAP_SIZE + 4,
        len,
        view.raw_bitmap_size(),
    )?;
    let available = file_size - u64::from(bitmap_offset);
    if u64::from(raw_size) > available {
        return Err(BmpError::Structural {
            check: Check::BitmapSize,
            expected: available,
            actual: u64::from(raw_size),
        });
    }
    if u64::from(raw_size) < available {
        events(ValidationEvent::Advisory(Advisory::TrailingBytes {
            count: available - u64::from(raw_size),
        }));
    }
    events(ValidationEvent::Passed(Field::RawBitmapSize(raw_size)));

    // 8. Geometry
    let width = field(Check::Geometry, offsets::WIDTH + 4, len, view.width())?;
    let height = field(Check::Geometry, offsets::HEIGHT + 4, len, view.height())?;
    let width = u32::try_from(width).map_err(|_| BmpError::NegativeWidth { width })?;
    let expected_size =
        row_stride(width, depth.bits()).saturating_mul(u64::from(height.unsigned_abs()));
    if expected_size != u64::from(raw_size) {
        return Err(BmpError::Structural {
            check: Check::Geometry,
            expected: expected_size,
            actual: u64::from(raw_size),
        });
    }
    events(ValidationEvent::Passed(Field::Width(width)));
    events(ValidationEvent::Passed(Field::Height(height)));

    // 9. Planes
    let planes = field(
        Check::ColorPlanes,
        offsets::COLOR_PLANES + 2,
        len,
        view.color_planes(),
    )?;
    if planes != 1 {
        return Err(BmpError::Structural {
            check: Check::ColorPlanes,
            expected: 1,
            actual: u64::from(planes),
        });
    }
    events(ValidationEvent::Passed(Field::ColorPlanes(planes)));

    // 10. Compression
    let compression = field(
        Check::Compression,
        offsets::COMPRESSION + 4,
        len,
        view.compression_method(),
    )?;
    if compression != 0 {
        return Err(BmpError::UnsupportedCompression {
            method: compression,
        });
    }
    events(ValidationEvent::Passed(Field::Compression(compression)));

    let h_resolution = view.h_resolution().unwrap_or_default();
    let v_resolution = view.v_resolution().unwrap_or_default();
    events(ValidationEvent::Passed(Field::HorizontalResolution(
        h_resolution,
    )));
    events(ValidationEvent::Passed(Field::VerticalResolution(
        v_resolution,
    )));
    let resolved_colors = resolve_colors(declared_colors, depth);
    events(ValidationEvent::Passed(Field::PaletteColors {
        declared: declared_colors,
        resolved: resolved_colors,
    }));

    // 11. Important colors
    let important_colors = field(
        Check::ImportantColors,
        offsets::IMPORTANT_COLORS + 4,
        len,
        view.declared_important_color_count(),
    )?;
    if important_colors > resolved_colors {
        return Err(BmpError::Structural {
            check: Check::ImportantColors,
            expected: u64::from(resolved_colors),
            actual: u64::from(important_colors),
        });
    }
    events(ValidationEvent::Passed(Field::ImportantColors(
        important_colors,
    )));

    Ok(BmpInfo {
        file_size: declared_size,
        bitmap_offset,
        dib_header_size: view.dib_header_size().unwrap_or_default(),
        width,
        height,
        color_planes: planes,
        depth,
        compression,
        raw_bitmap_size: raw_size,
        h_resolution,
        v_resolution,
        declared_colors,
        important_colors,
    })
}

/// Turn an unreadable field into a truncation failure of `check`.
fn field<T>(check: Check, end: usize, len: usize, value: Option<T>) -> Result<T, BmpError> {
    value.ok_or(BmpError::Truncated {
        check,
        needed: end,
        actual: len,
    })
}

fn resolve_colors(declared: u32, depth: BitDepth) -> u32 {
    if declared != 0 {
        declared
    } else {
        depth.default_palette_colors()
    }
}

/// Size of the palette between the headers and the pixel data.
fn palette_bytes(depth: BitDepth, declared_colors: u32) -> u64 {
    if !depth.is_indexed() {
        return 0;
    }
    u64::from(resolve_colors(declared_colors, depth)) * PALETTE_ENTRY_SIZE as u64
}
