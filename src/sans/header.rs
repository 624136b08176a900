//! States processing the file header.

use either::Either;
use tartan_bitfield::bitfield;
use zerocopy::FromBytes;

use crate::Error;

use super::{
    codec::read_u32_le,
    matrix::{EndOfStream, MatrixNameLength, Progress},
};

/// Version marker opening every matrix list.
pub const MAGIC: [u8; 4] = [1, 1, 0, 0];

bitfield! {
    /// Encoding flags declared by a file header.
    ///
    /// - `bgra`: voxel channels are stored as BGRA rather than RGBA.
    /// - `right_handed`: coordinates are right-handed rather than left-handed.
    /// - `rle`: voxel data is run-length encoded.
    /// - `side_masks`: the fourth channel carries face visibility masks,
    ///   rather than being fully opaque or fully transparent.
    pub struct Flags(u8) {
        [0] pub bgra,
        [1] pub right_handed,
        [2] pub rle,
        [3] pub side_masks,
    }
}

impl Flags {
    const MASK: u8 = 0b1111;

    /// Build flags from their bit representation, discarding unknown bits.
    pub fn from_bits(bits: u8) -> Self {
        Self(bits & Self::MASK)
    }

    /// The bit representation of these flags.
    pub fn bits(self) -> u8 {
        self.0
    }
}

/// State token to decode a file header.
#[derive(Debug)]
pub struct FileHeader;

impl FileHeader {
    /// Transition to another state by decoding a file header.
    ///
    /// Header fields are validated in file order, so the first unsupported
    /// field determines the error. `flags` is cleared, then each field is
    /// recorded as soon as it validates, so after a fault it holds the fields
    /// preceding the unsupported one. Run-length encoded voxel data has no
    /// published layout, and is refused with [`Error::UnsupportedCompression`]
    /// once every field has been recorded.
    ///
    /// Returns the number of matrices in the list, and a successor state token.
    pub fn advance(
        r: [u8; 24],
        flags: &mut Flags,
    ) -> Result<(u32, Either<MatrixNameLength, EndOfStream>), Error> {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct Header {
            version: [u8; 4],
            color_type: [u8; 4],
            orientation: [u8; 4],
            compression: [u8; 4],
            mask_format: [u8; 4],
            matrix_count: [u8; 4],
        }

        let Header {
            version,
            color_type,
            orientation,
            compression,
            mask_format,
            matrix_count,
        } = zerocopy::transmute!(r);

        *flags = Flags::default();

        if version != MAGIC {
            Err(Error::UnsupportedVersion)?;
        }

        flags.set_bgra(switch(color_type, Error::UnsupportedColorType)?);
        flags.set_right_handed(switch(orientation, Error::UnsupportedOrientation)?);
        flags.set_rle(switch(compression, Error::UnsupportedCompression)?);
        flags.set_side_masks(switch(mask_format, Error::UnsupportedMaskFormat)?);

        // TODO: accept run-length encoded data once its layout is confirmed
        // against files exported by Qubicle.
        if flags.rle() {
            Err(Error::UnsupportedCompression)?;
        }

        let matrix_count = read_u32_le(matrix_count);

        let successor = Progress {
            index: 0,
            count: matrix_count,
            bgra: flags.bgra(),
        }
        .resume();

        Ok((matrix_count, successor))
    }
}

/// Decode a header field restricted to zero or one.
fn switch(r: [u8; 4], err: Error) -> Result<bool, Error> {
    match read_u32_le(r) {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(err),
    }
}
