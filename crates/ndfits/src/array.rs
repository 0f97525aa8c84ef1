//! `ndarray` interop, behind the `array` feature.

use ndarray::{ArrayBase, Data, Dimension};

use crate::error::Result;
use crate::pixel::{PixelBuffer, PixelData};

/// Element types an `ndarray` array can carry into a [`PixelBuffer`].
pub trait PixelElement: Copy {
    fn wrap(data: Vec<Self>) -> PixelData;
}

macro_rules! impl_pixel_element {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(impl PixelElement for $t {
            fn wrap(data: Vec<Self>) -> PixelData {
                PixelData::$variant(data)
            }
        })*
    };
}

impl_pixel_element!(
    i8 => Int8,
    u8 => UInt8,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    f32 => Float32,
    f64 => Float64,
);

/// Convert an `ndarray` array into a [`PixelBuffer`].
///
/// `ndarray`'s last axis is the fastest varying while the buffer's dimension
/// list leads with it, so the shape comes out reversed: an array of shape
/// `(rows, cols)` becomes dims `[cols, rows]`. Elements are copied in logical
/// row-major order, so non-contiguous views convert correctly.
pub fn buffer_from_array<S, D>(array: &ArrayBase<S, D>) -> Result<PixelBuffer>
where
    S: Data,
    S::Elem: PixelElement,
    D: Dimension,
{
    let dims: Vec<usize> = array.shape().iter().rev().copied().collect();
    let data: Vec<S::Elem> = array.iter().copied().collect();
    PixelBuffer::new(dims, PixelElement::wrap(data))
}
