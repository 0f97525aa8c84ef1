use crate::pixel::PixelType;

/// All errors that can occur while writing a FITS image file.
#[derive(Debug)]
pub enum Error {
    /// The open mode requested reading or appending, neither of which is supported.
    UnsupportedMode,
    /// The reference array passed to open has no dimensions, or its dimension
    /// list is inconsistent with its pixel count.
    InvalidDimensions,
    /// The scratch buffer for the row flip could not be allocated.
    AllocationFailure,
    /// Pixel element type with no FITS image encoding.
    UnsupportedPixelType(PixelType),
    /// Attribute value type with no FITS header-card encoding.
    UnsupportedAttributeType(&'static str),
    /// Attribute name that cannot be encoded as a FITS keyword.
    InvalidKeyword(String),
    /// A written array's element type or dimensions differ from the reference
    /// array the session was opened with.
    ShapeMismatch,
    /// write or close was called without an open session.
    SessionNotOpen,
    /// Reading FITS files is not implemented.
    NotImplemented,
    /// An I/O error from the underlying file.
    Io(std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnsupportedMode => write!(f, "read and append open modes are not supported"),
            Error::InvalidDimensions => write!(f, "array dimensions are empty or inconsistent"),
            Error::AllocationFailure => write!(f, "failed to allocate transposition buffer"),
            Error::UnsupportedPixelType(t) => write!(f, "unsupported pixel type: {t}"),
            Error::UnsupportedAttributeType(t) => write!(f, "unsupported attribute type: {t}"),
            Error::InvalidKeyword(name) => write!(f, "invalid FITS keyword name: {name:?}"),
            Error::ShapeMismatch => {
                write!(f, "array shape or type differs from the open-time reference")
            }
            Error::SessionNotOpen => write!(f, "no open file session"),
            Error::NotImplemented => write!(f, "reading FITS files is not implemented"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unsupported_mode() {
        let e = Error::UnsupportedMode;
        assert_eq!(e.to_string(), "read and append open modes are not supported");
    }

    #[test]
    fn display_unsupported_pixel_type() {
        let e = Error::UnsupportedPixelType(PixelType::Int64);
        assert_eq!(e.to_string(), "unsupported pixel type: int64");
    }

    #[test]
    fn display_invalid_keyword() {
        let e = Error::InvalidKeyword(String::from("lower case"));
        assert!(e.to_string().contains("lower case"));
    }

    #[test]
    fn display_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let e = Error::Io(io_err);
        assert_eq!(e.to_string(), "I/O error: file not found");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = std::io::Error::other("oops");
        let e: Error = io_err.into();
        assert!(matches!(e, Error::Io(_)));
    }

    #[test]
    fn std_error_source() {
        use std::error::Error as StdError;

        let e = Error::ShapeMismatch;
        assert!(e.source().is_none());

        let io_err = std::io::Error::other("inner");
        let e = Error::Io(io_err);
        assert!(e.source().is_some());
    }

    #[test]
    fn debug_formatting() {
        let e = Error::UnsupportedAttributeType("uint64");
        let debug = format!("{e:?}");
        assert!(debug.contains("UnsupportedAttributeType"));
        assert!(debug.contains("uint64"));
    }
}
