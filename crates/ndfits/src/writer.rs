//! The file session: open, write, close.
//!
//! A [`FitsWriter`] owns at most one open file at a time and walks it through
//! open → write* → close. All header cards — mandatory keywords and attribute
//! cards alike — are assembled in memory before the file is created, so a
//! failed open leaves the session closed and no half-written header behind.

use std::fs::File;
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

use log::{debug, error};

use crate::attribute::serialize_attributes;
use crate::error::{Error, Result};
use crate::frame::{flip_rows, FramePlan};
use crate::header::{build_image_header, serialize_header};
use crate::pixel::{pixel_codes, serialize_pixels, PixelBuffer, PixelType};

/// File open mode flags, as requested by the caller.
///
/// Read and append are recognized but unsupported; multiple-arrays is
/// accepted, though this writer only ever stores one array per file (see
/// [`FitsWriter::supports_multiple_arrays`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenMode {
    pub read: bool,
    pub write: bool,
    pub append: bool,
    pub multiple: bool,
}

impl OpenMode {
    /// Plain write mode, the only combination this writer fully supports.
    pub fn write_only() -> Self {
        OpenMode {
            write: true,
            ..OpenMode::default()
        }
    }

    pub fn read_only() -> Self {
        OpenMode {
            read: true,
            ..OpenMode::default()
        }
    }
}

/// The four lifecycle operations a file-format writer exposes.
pub trait ImageFileWriter {
    /// Create a file at `path` and write its header, using `reference` for
    /// the element type, dimensions, and attached attributes.
    fn open(&mut self, path: &Path, mode: OpenMode, reference: &PixelBuffer) -> Result<()>;

    /// Write one array's pixel data into the open file.
    fn write(&mut self, array: &PixelBuffer) -> Result<()>;

    /// Read an array back from the file.
    fn read(&mut self) -> Result<PixelBuffer>;

    /// Release the file handle. Closing a closed session is a no-op.
    fn close(&mut self) -> Result<()>;
}

/// The state of one open output file.
#[derive(Debug)]
struct FitsSession {
    file: File,
    data_start: u64,
    dims: Vec<usize>,
    pixel_type: PixelType,
    wrote_data: bool,
}

/// Writes pixel buffers to FITS image files.
///
/// One file per open/close cycle; the element type and dimensions of the
/// reference array passed to open are frozen for the session, and every
/// subsequent write must match them. Not for concurrent use; a dropped
/// writer closes any still-open handle.
#[derive(Debug, Default)]
pub struct FitsWriter {
    session: Option<FitsSession>,
}

impl FitsWriter {
    pub fn new() -> Self {
        FitsWriter { session: None }
    }

    /// Whether a file is currently open.
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// This writer stores exactly one array per file.
    pub fn supports_multiple_arrays(&self) -> bool {
        false
    }
}

impl ImageFileWriter for FitsWriter {
    fn open(&mut self, path: &Path, mode: OpenMode, reference: &PixelBuffer) -> Result<()> {
        if mode.read || mode.append {
            error!("open {}: read/append mode requested", path.display());
            return Err(Error::UnsupportedMode);
        }

        // Opening a new file releases any handle still held.
        self.session = None;

        let dims = reference.dims();
        if dims.is_empty() {
            error!("open {}: reference array has no dimensions", path.display());
            return Err(Error::InvalidDimensions);
        }

        let pixel_type = reference.pixel_type();
        let codes = pixel_codes(pixel_type)?;

        let mut cards = build_image_header(codes.bitpix, dims, codes.bzero);
        match serialize_attributes(reference.attributes()) {
            Ok(attr_cards) => cards.extend(attr_cards),
            Err(e) => {
                error!("open {}: attribute serialization failed: {e}", path.display());
                return Err(e);
            }
        }
        let header = serialize_header(&cards);

        let mut file = File::create(path)?;
        file.write_all(&header)?;

        debug!(
            "open {}: {} naxis={} cards={}",
            path.display(),
            pixel_type,
            dims.len(),
            cards.len()
        );

        self.session = Some(FitsSession {
            file,
            data_start: header.len() as u64,
            dims: dims.to_vec(),
            pixel_type,
            wrote_data: false,
        });
        Ok(())
    }

    fn write(&mut self, array: &PixelBuffer) -> Result<()> {
        let session = self.session.as_mut().ok_or(Error::SessionNotOpen)?;

        if array.pixel_type() != session.pixel_type || array.dims() != session.dims.as_slice() {
            error!(
                "write: {} {:?} does not match open-time {} {:?}",
                array.pixel_type(),
                array.dims(),
                session.pixel_type,
                session.dims
            );
            return Err(Error::ShapeMismatch);
        }

        let plan = FramePlan::from_dims(array.dims());
        let flipped = flip_rows(array.data(), &plan)?;
        let segment = serialize_pixels(&flipped)?;

        session.file.seek(SeekFrom::Start(session.data_start))?;
        session.file.write_all(&segment)?;
        session.wrote_data = true;

        debug!(
            "write: {} elements, {} data bytes",
            array.element_count(),
            segment.len()
        );
        Ok(())
    }

    fn read(&mut self) -> Result<PixelBuffer> {
        Err(Error::NotImplemented)
    }

    fn close(&mut self) -> Result<()> {
        if let Some(session) = self.session.take() {
            session.file.sync_all()?;
            debug!("close: wrote_data={}", session.wrote_data);
        }
        Ok(())
    }
}
