//! # bmpinfo
//!
//! Structural validation and pixel listing for uncompressed Windows BMP files.
//!
//! The whole file is inspected in memory through a zero-copy
//! [`RawBufferView`]. [`validate`] runs an ordered chain of consistency
//! checks and stops at the first failure; a file that passes can be walked
//! pixel by pixel with the lazy [`Pixels`] decoder.
//!
//! ## Supported Files
//!
//! - BITMAPINFOHEADER layout (54 header bytes), palette directly after it
//! - 1, 2, 4 and 8 bits per pixel (palette) and 24 bits per pixel (BGR)
//! - Bottom-up (positive height) and top-down (negative height) row order
//!
//! ## Non-Goals
//!
//! - Compressed files (RLE, bitfields): rejected, never decoded
//! - Encoding
//! - Color management
//!
//! ## Usage
//!
//! ```no_run
//! use bmpinfo::{FieldReport, HexDump, InspectRequest, PixelListing};
//!
//! let data: &[u8] = &[]; // your BMP bytes
//!
//! match InspectRequest::new(data).inspect() {
//!     Ok(inspection) => {
//!         for advisory in &inspection.advisories {
//!             eprintln!("{advisory}");
//!         }
//!         print!("{}", FieldReport(&inspection.info));
//!         print!("{}", PixelListing::new(inspection.pixels(), &inspection.info));
//!     }
//!     Err(e) => {
//!         eprintln!("{e}");
//!         print!("{}", HexDump::new(data));
//!     }
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod decode;
mod depth;
mod dump;
mod error;
mod inspect;
mod limits;
mod report;
mod validate;
mod view;

#[cfg(feature = "std")]
mod load;

// Re-exports
pub use decode::{DecodedPixel, PixelValue, Pixels, decode_pixels};
pub use depth::{BitDepth, row_stride};
pub use dump::{DEFAULT_DUMP_LIMIT, HexDump};
pub use error::{BmpError, Check};
pub use inspect::{InspectRequest, Inspection};
pub use limits::Limits;
pub use report::{FieldReport, PIXEL_LISTING_HEADER, PixelListing, write_field, write_pixel};
pub use rgb::alt::BGR8;
pub use validate::{Advisory, BmpInfo, Field, Validated, ValidationEvent, validate, validate_with};
pub use view::{HEADERS_SIZE, PALETTE_ENTRY_SIZE, RawBufferView};

#[cfg(feature = "std")]
pub use load::load_file;
