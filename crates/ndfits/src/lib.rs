//! Writes multi-dimensional pixel arrays to FITS image files.
//!
//! A [`FitsWriter`] takes a [`PixelBuffer`] — a typed pixel vector with an
//! ordered dimension list and optional attached metadata — and produces a
//! single-HDU FITS file: attributes become header cards, the pixel data is
//! row-flipped into FITS's bottom-up convention and stored big-endian.
//! Reading FITS files is out of scope.

pub mod attribute;
pub mod block;
pub mod endian;
pub mod error;
pub mod frame;
pub mod header;
pub mod pixel;
pub mod value;
pub mod writer;

#[cfg(feature = "array")]
pub mod array;

pub use attribute::{AttrValue, AttributeEntry};
pub use block::{BLOCK_SIZE, CARDS_PER_BLOCK, CARD_SIZE};
pub use error::{Error, Result};
pub use pixel::{PixelBuffer, PixelData, PixelType};
pub use writer::{FitsWriter, ImageFileWriter, OpenMode};
