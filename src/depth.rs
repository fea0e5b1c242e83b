/// Color depth of an uncompressed BMP (the `bits_per_pixel` header field).
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BitDepth {
    /// 1 bit per pixel, 2-color palette.
    One,
    /// 2 bits per pixel, 4-color palette.
    Two,
    /// 4 bits per pixel, 16-color palette.
    Four,
    /// 8 bits per pixel, 256-color palette.
    Eight,
    /// 24 bits per pixel, direct BGR.
    TwentyFour,
}

impl BitDepth {
    /// Map a raw `bits_per_pixel` value, `None` for anything unsupported.
    pub fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            4 => Some(Self::Four),
            8 => Some(Self::Eight),
            24 => Some(Self::TwentyFour),
            _ => None,
        }
    }

    pub fn bits(self) -> u16 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
            Self::Eight => 8,
            Self::TwentyFour => 24,
        }
    }

    /// Whether pixels are palette indices.
    pub fn is_indexed(self) -> bool {
        !matches!(self, Self::TwentyFour)
    }

    /// Pixels packed into one byte (indexed depths only).
    pub fn pixels_per_byte(self) -> usize {
        match self {
            Self::One => 8,
            Self::Two => 4,
            Self::Four => 2,
            Self::Eight => 1,
            Self::TwentyFour => 0,
        }
    }

    /// Mask selecting one packed index.
    pub(crate) fn index_mask(self) -> u8 {
        match self {
            Self::One => 0x01,
            Self::Two => 0x03,
            Self::Four => 0x0f,
            Self::Eight | Self::TwentyFour => 0xff,
        }
    }

    /// Upper bound for the declared palette color count.
    ///
    /// Computed as `(1 << bpp) & 0x1FF`, which is 0 for 24-bit: a true-color
    /// file may not declare any palette colors.
    pub fn max_palette_colors(self) -> u32 {
        (1u32 << self.bits()) & 0x1ff
    }

    /// Palette size used when the header declares 0 colors.
    pub fn default_palette_colors(self) -> u32 {
        self.max_palette_colors()
    }

    /// Decimal digits needed to print the largest palette index.
    pub fn index_digits(self) -> usize {
        match self {
            Self::One | Self::Two => 1,
            Self::Four => 2,
            Self::Eight | Self::TwentyFour => 3,
        }
    }
}

/// Bytes per stored scanline: `((width * bpp + 31) / 32) * 4`.
pub fn row_stride(width: u32, bits_per_pixel: u16) -> u64 {
    (u64::from(width) * u64::from(bits_per_pixel)).div_ceil(32) * 4
}
