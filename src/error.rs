use alloc::string::String;
use core::fmt;

/// Structural checks run by [`crate::validate`], in execution order.
///
/// The order is observable: a file that breaks several rules is always
/// reported against the first one in this list.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Check {
    /// Bytes 0..2 must read `BM`.
    Magic,
    /// Declared file size equals the buffer length.
    FileSize,
    /// Bits per pixel is one of 1, 2, 4, 8, 24.
    BitsPerPixel,
    /// Declared palette color count fits the bit depth.
    PaletteColors,
    /// Bitmap offset does not point past the end of the file.
    OffsetPastEnd,
    /// Bitmap offset does not point into the headers or palette.
    OffsetInsideHeaders,
    /// Raw bitmap size fits between the bitmap offset and end of file.
    BitmapSize,
    /// Row stride times height equals the raw bitmap size.
    Geometry,
    /// Color planes equals 1.
    ColorPlanes,
    /// Compression method is 0.
    Compression,
    /// Important color count does not exceed the palette color count.
    ImportantColors,
}

impl Check {
    /// All checks in the order the validator runs them.
    pub const ALL: [Check; 11] = [
        Check::Magic,
        Check::FileSize,
        Check::BitsPerPixel,
        Check::PaletteColors,
        Check::OffsetPastEnd,
        Check::OffsetInsideHeaders,
        Check::BitmapSize,
        Check::Geometry,
        Check::ColorPlanes,
        Check::Compression,
        Check::ImportantColors,
    ];

    /// Short stable identifier, e.g. `"magic"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Magic => "magic",
            Self::FileSize => "file-size",
            Self::BitsPerPixel => "bits-per-pixel",
            Self::PaletteColors => "palette-colors",
            Self::OffsetPastEnd => "offset-past-end",
            Self::OffsetInsideHeaders => "offset-inside-headers",
            Self::BitmapSize => "bitmap-size",
            Self::Geometry => "geometry",
            Self::ColorPlanes => "color-planes",
            Self::Compression => "compression",
            Self::ImportantColors => "important-colors",
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors from BMP validation, decoding and loading.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    #[error("{}", structural_message(.check, .expected, .actual))]
    Structural {
        check: Check,
        expected: u64,
        actual: u64,
    },

    #[error("file corrupt, {check} field beyond end of file: need {needed} bytes, got {actual}")]
    Truncated {
        check: Check,
        needed: usize,
        actual: usize,
    },

    #[error("file corrupt, negative image width: {width}")]
    NegativeWidth { width: i32 },

    #[error("sorry, compression not yet supported by this tool (method {method})")]
    UnsupportedCompression { method: u32 },

    #[error("palette index {index} at ({x}, {y}) out of range (palette has {palette_len} entries)")]
    PaletteIndexOutOfRange {
        index: u8,
        palette_len: usize,
        x: u32,
        y: u32,
    },

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[cfg(feature = "std")]
    #[error("cannot read {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BmpError {
    /// The file violates one of the format's consistency rules.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::Structural { .. } | Self::Truncated { .. } | Self::NegativeWidth { .. }
        )
    }

    /// The file may be well formed but uses an encoding this crate does not decode.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedCompression { .. })
    }

    /// Which validator check produced this error, if any.
    pub fn check(&self) -> Option<Check> {
        match self {
            Self::Structural { check, .. } | Self::Truncated { check, .. } => Some(*check),
            Self::NegativeWidth { .. } => Some(Check::Geometry),
            Self::UnsupportedCompression { .. } => Some(Check::Compression),
            _ => None,
        }
    }
}

fn structural_message(check: &Check, expected: &u64, actual: &u64) -> StructuralMessage {
    StructuralMessage {
        check: *check,
        expected: *expected,
        actual: *actual,
    }
}

struct StructuralMessage {
    check: Check,
    expected: u64,
    actual: u64,
}

impl fmt::Display for StructuralMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (expected, actual) = (self.expected, self.actual);
        match self.check {
            Check::Magic => write!(f, "file corrupt, Magic != BM: {actual:04x}"),
            Check::FileSize => {
                write!(f, "file corrupt, internal size != {expected}: {actual}")
            }
            Check::BitsPerPixel => {
                write!(f, "file corrupt, incorrect bpp != (1,2,4,8,24): {actual}")
            }
            Check::PaletteColors => write!(
                f,
                "file corrupt, number of palette colors too large > {expected}: {actual}"
            ),
            Check::OffsetPastEnd => {
                write!(f, "file corrupt, incorrect bitmap offset > {expected}: {actual}")
            }
            Check::OffsetInsideHeaders => {
                write!(f, "file corrupt, incorrect bitmap offset < {expected}: {actual}")
            }
            Check::BitmapSize => {
                write!(f, "file corrupt, incorrect bitmap size > {expected}: {actual}")
            }
            Check::Geometry => write!(
                f,
                "file corrupt, image width * image height doesn't fit bitmap size {actual}: expected {expected}"
            ),
            Check::ColorPlanes => write!(f, "file corrupt, color planes != 1: {actual}"),
            Check::Compression => write!(f, "file corrupt, compression method != 0: {actual}"),
            Check::ImportantColors => write!(
                f,
                "file corrupt, incorrect number of important colors > {expected}: {actual}"
            ),
        }
    }
}
