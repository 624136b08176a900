//! Fault taxonomy shared by the decoder, sinks and drivers.

use thiserror::Error;

/// A fault halting a decode.
///
/// Variants up to [`Error::UnsupportedCompression`] are raised by the decoder
/// itself. The remaining variants are reserved for [`Sink`] implementations
/// and file-access wrappers, and are passed through unmodified when a sink
/// returns them.
///
/// Every variant has a stable numeric code (see [`Error::code`]), with zero
/// reserved for success.
///
/// [`Sink`]: crate::avec::Sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Error {
    /// Incorrect version marker.
    #[error("Unsupported version")]
    UnsupportedVersion,
    /// Unknown voxel channel order.
    #[error("Unsupported color type")]
    UnsupportedColorType,
    /// Unknown coordinate system handedness.
    #[error("Unsupported orientation")]
    UnsupportedOrientation,
    /// Unknown visibility mask convention.
    #[error("Unsupported mask format")]
    UnsupportedMaskFormat,
    /// Unknown or unsupported (run-length encoded) voxel data layout.
    #[error("Unsupported compression method")]
    UnsupportedCompression,
    /// Matrix index or voxel coordinate out of range.
    #[error("Out of range")]
    OutOfRange,
    /// Storage for a matrix list or matrix could not be allocated.
    #[error("Out of memory")]
    OutOfMemory,
    /// File not found.
    #[error("File not found")]
    IoNotFound,
    /// Generic input/output error.
    #[error("Input/output error")]
    IoGeneric,
    /// Matrix count rejected by the sink.
    #[error("Unsupported matrix count")]
    UnsupportedMatrixCount,
    /// Application-defined fault, with a code of at least [`Error::USER`].
    #[error("Application error ({0})")]
    User(u32),
}

impl Error {
    /// First code guaranteed unused by this library.
    pub const USER: u32 = 32;

    /// The stable numeric code of this fault.
    pub fn code(self) -> u32 {
        match self {
            Self::UnsupportedVersion => 1,
            Self::UnsupportedColorType => 2,
            Self::UnsupportedOrientation => 3,
            Self::UnsupportedMaskFormat => 4,
            Self::UnsupportedCompression => 5,
            Self::OutOfRange => 6,
            Self::OutOfMemory => 7,
            Self::IoNotFound => 8,
            Self::IoGeneric => 9,
            Self::UnsupportedMatrixCount => 10,
            Self::User(code) => code,
        }
    }

    /// Look up the fault for a numeric code.
    ///
    /// Returns `None` for zero (success), and for codes between the library's
    /// own and [`Error::USER`].
    pub fn from_code(code: u32) -> Option<Self> {
        Some(match code {
            1 => Self::UnsupportedVersion,
            2 => Self::UnsupportedColorType,
            3 => Self::UnsupportedOrientation,
            4 => Self::UnsupportedMaskFormat,
            5 => Self::UnsupportedCompression,
            6 => Self::OutOfRange,
            7 => Self::OutOfMemory,
            8 => Self::IoNotFound,
            9 => Self::IoGeneric,
            10 => Self::UnsupportedMatrixCount,
            c if c >= Self::USER => Self::User(c),
            _ => None?,
        })
    }

    /// Whether this fault was raised by format validation, rather than by a
    /// sink or wrapper.
    pub fn is_format_fault(self) -> bool {
        matches!(
            self,
            Self::UnsupportedVersion
                | Self::UnsupportedColorType
                | Self::UnsupportedOrientation
                | Self::UnsupportedMaskFormat
                | Self::UnsupportedCompression
        )
    }
}
