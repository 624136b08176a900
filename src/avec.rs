//! Convenience interfaces for common decoding patterns.
//!
//! The decoders in this module publish matrices and voxels to a [`Sink`],
//! which owns all storage. The [`StreamDecoder`](stream::StreamDecoder)
//! accepts input in chunks of any size, and the functions re-exported here
//! drive it over a slice or reader.
//!
//! For applications that simply need the decoded matrices in memory, the
//! [`Model`](model::Model) sink is provided.

#[cfg(feature = "std")]
pub mod model;
#[cfg(feature = "std")]
pub mod reader;
pub mod slice;
pub mod stream;

#[cfg(feature = "std")]
pub use reader::{decode as decode_reader, decode_file};
pub use slice::decode as decode_slice;

use crate::{
    Error,
    sans::{matrix::MatrixDescriptor, voxel::Voxel},
};

/// Store matrices and voxels for a document.
///
/// Every method may fail. A decoder receiving an error halts, and reports the
/// error unmodified as its last error. Sinks are free to use the codes
/// reserved for them (such as [`Error::OutOfMemory`] or
/// [`Error::UnsupportedMatrixCount`]), or their own [`Error::User`] codes.
///
/// Decoders only write to a sink. The default implementation of each query
/// method reports [`Error::OutOfRange`], for sinks that cannot be read back.
pub trait Sink {
    /// Replace the matrix list with `count` undefined matrices.
    fn resize(&mut self, count: u32) -> Result<(), Error>;

    /// Query the description of a matrix.
    fn get_matrix(&self, index: u32) -> Result<MatrixDescriptor, Error> {
        let _ = index;
        Err(Error::OutOfRange)
    }

    /// Define a matrix, allocating its voxels.
    fn set_matrix(&mut self, index: u32, matrix: &MatrixDescriptor) -> Result<(), Error>;

    /// Query a voxel of a matrix.
    fn read_voxel(&self, index: u32, x: u32, y: u32, z: u32) -> Result<Voxel, Error> {
        let _ = (index, x, y, z);
        Err(Error::OutOfRange)
    }

    /// Store a voxel of a matrix.
    fn write_voxel(&mut self, index: u32, x: u32, y: u32, z: u32, voxel: Voxel)
    -> Result<(), Error>;
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn resize(&mut self, count: u32) -> Result<(), Error> {
        (**self).resize(count)
    }

    fn get_matrix(&self, index: u32) -> Result<MatrixDescriptor, Error> {
        (**self).get_matrix(index)
    }

    fn set_matrix(&mut self, index: u32, matrix: &MatrixDescriptor) -> Result<(), Error> {
        (**self).set_matrix(index, matrix)
    }

    fn read_voxel(&self, index: u32, x: u32, y: u32, z: u32) -> Result<Voxel, Error> {
        (**self).read_voxel(index, x, y, z)
    }

    fn write_voxel(
        &mut self,
        index: u32,
        x: u32,
        y: u32,
        z: u32,
        voxel: Voxel,
    ) -> Result<(), Error> {
        (**self).write_voxel(index, x, y, z, voxel)
    }
}
