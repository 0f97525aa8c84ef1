//! Pixel element types, the pixel-to-FITS encoding table, and big-endian
//! serialization of pixel buffers.
//!
//! FITS images carry only signed 8/16/32-bit integers and IEEE floats.
//! Unsigned integer kinds (and signed bytes) are represented through the
//! standard BZERO zero-point convention: the stored value is the physical
//! value minus the zero point, which amounts to a sign-bit flip at the
//! element's width. [`pixel_codes`] is the single dispatch table consulted by
//! both header construction and pixel serialization.

use bytemuck::pod_collect_to_vec;

use crate::attribute::AttributeEntry;
use crate::block::padded_byte_len;
use crate::endian::buf_native_to_be;
use crate::error::{Error, Result};

/// The semantic element type of a pixel buffer.
///
/// `Int64` and `UInt64` exist in the source type space but have no image
/// encoding here; passing them to [`pixel_codes`] fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelType {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
}

impl PixelType {
    /// Size of one element in bytes.
    pub fn element_size(self) -> usize {
        match self {
            PixelType::Int8 | PixelType::UInt8 => 1,
            PixelType::Int16 | PixelType::UInt16 => 2,
            PixelType::Int32 | PixelType::UInt32 | PixelType::Float32 => 4,
            PixelType::Int64 | PixelType::UInt64 | PixelType::Float64 => 8,
        }
    }
}

impl core::fmt::Display for PixelType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            PixelType::Int8 => "int8",
            PixelType::UInt8 => "uint8",
            PixelType::Int16 => "int16",
            PixelType::UInt16 => "uint16",
            PixelType::Int32 => "int32",
            PixelType::UInt32 => "uint32",
            PixelType::Int64 => "int64",
            PixelType::UInt64 => "uint64",
            PixelType::Float32 => "float32",
            PixelType::Float64 => "float64",
        };
        f.write_str(name)
    }
}

/// The FITS image encoding of a pixel type: on-disk BITPIX plus the optional
/// BZERO zero point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelCodes {
    pub bitpix: i64,
    pub bzero: Option<i64>,
}

/// Map a pixel type to its FITS image encoding.
///
/// Total over the eight supported kinds; anything else fails with
/// [`Error::UnsupportedPixelType`].
pub fn pixel_codes(ty: PixelType) -> Result<PixelCodes> {
    let (bitpix, bzero) = match ty {
        PixelType::Int8 => (8, Some(-128)),
        PixelType::UInt8 => (8, None),
        PixelType::Int16 => (16, None),
        PixelType::UInt16 => (16, Some(32768)),
        PixelType::Int32 => (32, None),
        PixelType::UInt32 => (32, Some(2147483648)),
        PixelType::Float32 => (-32, None),
        PixelType::Float64 => (-64, None),
        PixelType::Int64 | PixelType::UInt64 => return Err(Error::UnsupportedPixelType(ty)),
    };
    Ok(PixelCodes { bitpix, bzero })
}

/// A typed pixel vector, one variant per semantic element type.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelData {
    Int8(Vec<i8>),
    UInt8(Vec<u8>),
    Int16(Vec<i16>),
    UInt16(Vec<u16>),
    Int32(Vec<i32>),
    UInt32(Vec<u32>),
    Int64(Vec<i64>),
    UInt64(Vec<u64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

impl PixelData {
    /// The semantic element type of this buffer.
    pub fn pixel_type(&self) -> PixelType {
        match self {
            PixelData::Int8(_) => PixelType::Int8,
            PixelData::UInt8(_) => PixelType::UInt8,
            PixelData::Int16(_) => PixelType::Int16,
            PixelData::UInt16(_) => PixelType::UInt16,
            PixelData::Int32(_) => PixelType::Int32,
            PixelData::UInt32(_) => PixelType::UInt32,
            PixelData::Int64(_) => PixelType::Int64,
            PixelData::UInt64(_) => PixelType::UInt64,
            PixelData::Float32(_) => PixelType::Float32,
            PixelData::Float64(_) => PixelType::Float64,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            PixelData::Int8(v) => v.len(),
            PixelData::UInt8(v) => v.len(),
            PixelData::Int16(v) => v.len(),
            PixelData::UInt16(v) => v.len(),
            PixelData::Int32(v) => v.len(),
            PixelData::UInt32(v) => v.len(),
            PixelData::Int64(v) => v.len(),
            PixelData::UInt64(v) => v.len(),
            PixelData::Float32(v) => v.len(),
            PixelData::Float64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Serialize a pixel buffer into a big-endian, block-padded FITS data
/// segment, applying the zero-point transform where the encoding requires
/// one.
pub fn serialize_pixels(data: &PixelData) -> Result<Vec<u8>> {
    let mut buf: Vec<u8> = match data {
        // Zero-point kinds: flip the sign bit so stored = physical - BZERO.
        PixelData::Int8(v) => v.iter().map(|&p| (p as u8) ^ 0x80).collect(),
        PixelData::UInt16(v) => {
            let flipped: Vec<u16> = v.iter().map(|&p| p ^ 0x8000).collect();
            let mut bytes: Vec<u8> = pod_collect_to_vec(&flipped);
            buf_native_to_be(&mut bytes, 2);
            bytes
        }
        PixelData::UInt32(v) => {
            let flipped: Vec<u32> = v.iter().map(|&p| p ^ 0x8000_0000).collect();
            let mut bytes: Vec<u8> = pod_collect_to_vec(&flipped);
            buf_native_to_be(&mut bytes, 4);
            bytes
        }
        PixelData::UInt8(v) => v.clone(),
        PixelData::Int16(v) => {
            let mut bytes: Vec<u8> = pod_collect_to_vec(v.as_slice());
            buf_native_to_be(&mut bytes, 2);
            bytes
        }
        PixelData::Int32(v) => {
            let mut bytes: Vec<u8> = pod_collect_to_vec(v.as_slice());
            buf_native_to_be(&mut bytes, 4);
            bytes
        }
        PixelData::Float32(v) => {
            let mut bytes: Vec<u8> = pod_collect_to_vec(v.as_slice());
            buf_native_to_be(&mut bytes, 4);
            bytes
        }
        PixelData::Float64(v) => {
            let mut bytes: Vec<u8> = pod_collect_to_vec(v.as_slice());
            buf_native_to_be(&mut bytes, 8);
            bytes
        }
        PixelData::Int64(_) | PixelData::UInt64(_) => {
            return Err(Error::UnsupportedPixelType(data.pixel_type()))
        }
    };

    buf.resize(padded_byte_len(buf.len()), 0);
    Ok(buf)
}

/// A multi-dimensional pixel array with optional attached metadata.
///
/// The dimension list is ordered fastest-varying axis first: `dims[0]` is the
/// row length (width), `dims[1]` the row count (height), and the pixel vector
/// is laid out row-major (`index = z * width * height + y * width + x`).
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    dims: Vec<usize>,
    data: PixelData,
    attributes: Vec<AttributeEntry>,
}

impl PixelBuffer {
    /// Create a buffer, validating that the pixel count matches the product
    /// of the dimension extents.
    pub fn new(dims: Vec<usize>, data: PixelData) -> Result<Self> {
        let expected: usize = dims.iter().product();
        if data.len() != expected {
            return Err(Error::InvalidDimensions);
        }
        Ok(PixelBuffer {
            dims,
            data,
            attributes: Vec::new(),
        })
    }

    /// Attach an ordered attribute collection; order is preserved in header
    /// card emission.
    pub fn with_attributes(mut self, attributes: Vec<AttributeEntry>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn data(&self) -> &PixelData {
        &self.data
    }

    pub fn attributes(&self) -> &[AttributeEntry] {
        &self.attributes
    }

    pub fn pixel_type(&self) -> PixelType {
        self.data.pixel_type()
    }

    /// Total number of elements, the product of all dimension extents.
    pub fn element_count(&self) -> usize {
        self.data.len()
    }
}
