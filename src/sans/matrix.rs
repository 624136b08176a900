//! States processing matrix names and bounds.

use core::{fmt, str::Utf8Error};

use either::Either::{self, Left, Right};
use tinyvec::ArrayVec;
use zerocopy::FromBytes;

use crate::Error;

use super::{
    codec::{read_i32_le, read_u32_le},
    voxel::VoxelData,
};

/// Longest name a matrix can carry, as its length is stored in a single byte.
pub const MAX_NAME_LEN: usize = u8::MAX as usize;

/// Position within the matrix list, carried through every matrix state.
#[derive(Debug)]
pub(super) struct Progress {
    pub(super) index: u32,
    pub(super) count: u32,
    pub(super) bgra: bool,
}

impl Progress {
    /// Begin the matrix at `index`, or end the stream if none remain.
    pub(super) fn resume(self) -> Either<MatrixNameLength, EndOfStream> {
        if self.index < self.count {
            Left(MatrixNameLength(self))
        } else {
            Right(EndOfStream(()))
        }
    }

    /// Move past the current matrix.
    pub(super) fn next(self) -> Either<MatrixNameLength, EndOfStream> {
        Self {
            index: self.index + 1,
            ..self
        }
        .resume()
    }
}

/// State token to decode the length of a matrix name.
#[derive(Debug)]
pub struct MatrixNameLength(Progress);

impl MatrixNameLength {
    /// Transition to another state by decoding the length of a matrix name.
    ///
    /// Unnamed matrices proceed directly to their bounds.
    pub fn advance(self, r: [u8; 1]) -> Either<MatrixName, MatrixBounds> {
        match r[0] {
            0 => Right(MatrixBounds(self.0)),
            len => Left(MatrixName {
                progress: self.0,
                len,
            }),
        }
    }

    /// The index of the matrix being decoded.
    pub fn index(&self) -> u32 {
        self.0.index
    }
}

/// State token to decode a matrix name.
#[derive(Debug)]
pub struct MatrixName {
    progress: Progress,
    len: u8,
}

impl MatrixName {
    /// Transition to another state once [`MatrixName::name_len`] name bytes have
    /// been collected.
    ///
    /// The name is not copied by this state; collect it into a [`Name`] while
    /// reading.
    pub fn advance(self) -> MatrixBounds {
        MatrixBounds(self.progress)
    }

    /// The number of name bytes to collect.
    pub fn name_len(&self) -> usize {
        self.len as usize
    }

    /// The index of the matrix being decoded.
    pub fn index(&self) -> u32 {
        self.progress.index
    }
}

/// State token to decode the size and position of a matrix.
#[derive(Debug)]
pub struct MatrixBounds(Progress);

/// Size and position of a matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounds {
    /// Extent in voxels along x, y and z.
    pub size: [u32; 3],
    /// Location of the matrix's origin corner in space.
    pub position: [i32; 3],
}

impl MatrixBounds {
    /// Transition to another state by decoding the bounds of a matrix.
    ///
    /// Matrices with no voxels skip their (empty) voxel data.
    ///
    /// Returns the bounds, and a successor state token.
    pub fn advance(
        self,
        r: [u8; 24],
    ) -> (
        Bounds,
        Either<VoxelData, Either<MatrixNameLength, EndOfStream>>,
    ) {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct Layout {
            size_x: [u8; 4],
            size_y: [u8; 4],
            size_z: [u8; 4],
            pos_x: [u8; 4],
            pos_y: [u8; 4],
            pos_z: [u8; 4],
        }

        let Layout {
            size_x,
            size_y,
            size_z,
            pos_x,
            pos_y,
            pos_z,
        } = zerocopy::transmute!(r);

        let bounds = Bounds {
            size: [read_u32_le(size_x), read_u32_le(size_y), read_u32_le(size_z)],
            position: [read_i32_le(pos_x), read_i32_le(pos_y), read_i32_le(pos_z)],
        };

        let successor = if bounds.size.contains(&0) {
            Right(self.0.next())
        } else {
            Left(VoxelData::new(self.0, bounds.size))
        };

        (bounds, successor)
    }

    /// The index of the matrix being decoded.
    pub fn index(&self) -> u32 {
        self.0.index
    }
}

/// Terminal state token, reached after the last matrix.
#[derive(Debug)]
pub struct EndOfStream(pub(super) ());

/// A matrix name of at most [`MAX_NAME_LEN`] bytes.
///
/// Names are stored as found. They are usually, but not necessarily, UTF-8.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Name(ArrayVec<[u8; MAX_NAME_LEN + 1]>);

impl Name {
    /// Create an empty name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a byte, failing if the name is already at its maximum length.
    pub fn push(&mut self, b: u8) -> Result<(), Error> {
        if self.0.len() >= MAX_NAME_LEN {
            Err(Error::OutOfRange)?;
        }
        self.0.push(b);
        Ok(())
    }

    /// Remove all bytes.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// The number of bytes in the name.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the name is empty (as for unnamed matrices).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw bytes of the name.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The name as a string slice, if it is valid UTF-8.
    pub fn to_str(&self) -> Result<&str, Utf8Error> {
        core::str::from_utf8(&self.0)
    }
}

impl TryFrom<&[u8]> for Name {
    type Error = Error;

    fn try_from(r: &[u8]) -> Result<Self, Error> {
        let mut name = Self::new();
        for &b in r {
            name.push(b)?;
        }
        Ok(name)
    }
}

impl TryFrom<&str> for Name {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Error> {
        Self::try_from(s.as_bytes())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_str() {
            Ok(s) => fmt::Debug::fmt(s, f),
            Err(_) => fmt::Debug::fmt(self.as_bytes(), f),
        }
    }
}

/// Description of a matrix, exchanged with a [`Sink`](crate::avec::Sink).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatrixDescriptor {
    /// Name of the matrix, possibly empty.
    pub name: Name,
    /// Position of the matrix origin in the model, as x, y, z.
    pub position: [i32; 3],
    /// Extent along x, y and z, in voxels.
    pub size: [u32; 3],
}

impl MatrixDescriptor {
    /// Combine a name with decoded bounds.
    pub fn new(name: Name, bounds: Bounds) -> Self {
        Self {
            name,
            position: bounds.position,
            size: bounds.size,
        }
    }

    /// The number of voxels in the matrix, if representable.
    pub fn volume(&self) -> Option<usize> {
        let [x, y, z] = self.size.map(|s| usize::try_from(s).ok());
        x?.checked_mul(y?)?.checked_mul(z?)
    }

    /// The position of voxel `(x, y, z)` in x-fastest, then y, then z order.
    ///
    /// Returns `None` if the coordinate lies outside the matrix.
    pub fn linear_index(&self, x: u32, y: u32, z: u32) -> Option<usize> {
        let [width, height, depth] = self.size;
        if x >= width || y >= height || z >= depth {
            return None;
        }

        let [x, y, z, width, height] = [x, y, z, width, height].map(|v| v as usize);
        z.checked_mul(height)?
            .checked_add(y)?
            .checked_mul(width)?
            .checked_add(x)
    }
}
