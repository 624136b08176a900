//! States processing voxel data.

use either::Either::{self, Left, Right};
use zerocopy::{FromBytes, Immutable, IntoBytes};

use super::matrix::{EndOfStream, MatrixNameLength, Progress};

/// Color and visibility of a single voxel.
///
/// Channels are always in red, green, blue, visibility order, whatever the
/// channel order of the source file.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, FromBytes, IntoBytes, Immutable)]
pub struct Voxel {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Opacity, or face visibility masks if the file declares
    /// [`side_masks`](super::header::Flags::side_masks).
    pub a: u8,
}

impl Voxel {
    /// Create a voxel from its channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// State token to decode a voxel of a raw (uncompressed) matrix.
#[derive(Debug)]
pub struct VoxelData {
    progress: Progress,
    size: [u32; 3],
    cursor: [u32; 3],
}

impl VoxelData {
    pub(super) fn new(progress: Progress, size: [u32; 3]) -> Self {
        Self {
            progress,
            size,
            cursor: [0; 3],
        }
    }

    /// Transition to another state by decoding a voxel.
    ///
    /// Voxels are stored with x varying fastest, then y, then z.
    ///
    /// Returns the coordinates of the decoded voxel within its matrix, the
    /// voxel, and a successor state. The successor is this state, moved to the
    /// next voxel, until the matrix is complete.
    pub fn advance(
        self,
        r: [u8; 4],
    ) -> (
        [u32; 3],
        Voxel,
        Either<Self, Either<MatrixNameLength, EndOfStream>>,
    ) {
        let voxel: Voxel = if self.progress.bgra {
            let [b, g, r, a] = r;
            Voxel { r, g, b, a }
        } else {
            zerocopy::transmute!(r)
        };

        let coordinates = self.cursor;

        let [width, height, depth] = self.size;
        let [mut x, mut y, mut z] = self.cursor;

        x += 1;
        if x >= width {
            x = 0;
            y += 1;
        }
        if y >= height {
            y = 0;
            z += 1;
        }

        let successor = if z >= depth {
            Right(self.progress.next())
        } else {
            Left(Self {
                cursor: [x, y, z],
                ..self
            })
        };

        (coordinates, voxel, successor)
    }

    /// The index of the matrix being decoded.
    pub fn index(&self) -> u32 {
        self.progress.index
    }

    /// The coordinates of the next voxel to decode.
    pub fn cursor(&self) -> [u32; 3] {
        self.cursor
    }

    /// The size of the matrix being decoded.
    pub fn size(&self) -> [u32; 3] {
        self.size
    }
}
