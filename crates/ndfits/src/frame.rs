//! Frame geometry: dimension planning and the per-slice row flip.
//!
//! FITS stores the first image row at the bottom of the frame, while pixel
//! buffers arrive with the first row at the top, so every 2-D slice is
//! flipped vertically before it is written. The flip works on an owned copy
//! with bounds-checked row slices; nothing is written in place into the
//! caller's buffer.

use crate::error::{Error, Result};
use crate::pixel::PixelData;

/// The (width, height, depth) triple a write operates on.
///
/// Ranks above 3 degenerate to (1, 1, 1) so the row flip becomes the
/// identity; the raw write still covers the full element count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePlan {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
}

impl FramePlan {
    /// Derive the plan from an ordered dimension-size list.
    pub fn from_dims(dims: &[usize]) -> Self {
        match dims {
            [w] => FramePlan {
                width: *w,
                height: 1,
                depth: 1,
            },
            [w, h] => FramePlan {
                width: *w,
                height: *h,
                depth: 1,
            },
            [w, h, d] => FramePlan {
                width: *w,
                height: *h,
                depth: *d,
            },
            _ => FramePlan {
                width: 1,
                height: 1,
                depth: 1,
            },
        }
    }

    /// Number of element slots covered by the flip, `width * height * depth`.
    ///
    /// Fails on multiplication overflow rather than wrapping.
    pub fn slots(&self) -> Result<usize> {
        self.width
            .checked_mul(self.height)
            .and_then(|wh| wh.checked_mul(self.depth))
            .ok_or(Error::InvalidDimensions)
    }
}

/// Total element count of a dimension list, the product of all extents.
///
/// Independent of the [`FramePlan`] triple: for ranks above 3 the plan
/// degenerates while this count still covers every element.
pub fn element_count(dims: &[usize]) -> usize {
    dims.iter().product()
}

/// Produce a copy of `data` with each 2-D slice flipped vertically.
///
/// Elements beyond the plan's `width * height * depth` prefix (the rank > 3
/// case) are copied unchanged. The destination is allocated with a fallible
/// reservation; exhaustion surfaces as [`Error::AllocationFailure`].
pub fn flip_rows(data: &PixelData, plan: &FramePlan) -> Result<PixelData> {
    let flipped = match data {
        PixelData::Int8(v) => PixelData::Int8(flip_slice(v, plan)?),
        PixelData::UInt8(v) => PixelData::UInt8(flip_slice(v, plan)?),
        PixelData::Int16(v) => PixelData::Int16(flip_slice(v, plan)?),
        PixelData::UInt16(v) => PixelData::UInt16(flip_slice(v, plan)?),
        PixelData::Int32(v) => PixelData::Int32(flip_slice(v, plan)?),
        PixelData::UInt32(v) => PixelData::UInt32(flip_slice(v, plan)?),
        PixelData::Float32(v) => PixelData::Float32(flip_slice(v, plan)?),
        PixelData::Float64(v) => PixelData::Float64(flip_slice(v, plan)?),
        PixelData::Int64(_) | PixelData::UInt64(_) => {
            return Err(Error::UnsupportedPixelType(data.pixel_type()))
        }
    };
    Ok(flipped)
}

/// The type-generic flip: same index arithmetic for every element width.
fn flip_slice<T: Copy>(src: &[T], plan: &FramePlan) -> Result<Vec<T>> {
    let slots = plan.slots()?;
    if slots > src.len() {
        return Err(Error::InvalidDimensions);
    }

    let mut dst = Vec::new();
    dst.try_reserve_exact(src.len())
        .map_err(|_| Error::AllocationFailure)?;
    dst.extend_from_slice(src);

    let (w, h) = (plan.width, plan.height);
    for z in 0..plan.depth {
        let base = z * w * h;
        for y in 0..h {
            let from = base + y * w;
            let to = base + (h - 1 - y) * w;
            dst[to..to + w].copy_from_slice(&src[from..from + w]);
        }
    }

    Ok(dst)
}
