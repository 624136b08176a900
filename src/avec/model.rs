//! In-memory storage for decoded documents.
//!
//! _Requires Cargo feature `std`._

use std::vec::Vec;

use zerocopy::{FromZeros, IntoBytes};

use crate::{
    Error,
    sans::{matrix::MatrixDescriptor, voxel::Voxel},
};

use super::Sink;

extern crate std;

/// Capacity limits applied by a [`Model`] while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Largest accepted number of matrices, or `None` for no limit.
    ///
    /// Applications expecting a single matrix per file set this to one.
    pub max_matrices: Option<u32>,
    /// Largest accepted number of voxels in a single matrix.
    pub max_voxels: usize,
}

impl Limits {
    /// Default matrix count limit.
    pub const MAX_MATRICES: u32 = 1 << 16;

    /// Default voxel count limit, 256 MiB of voxel storage.
    pub const MAX_VOXELS: usize = 1 << 26;
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_matrices: Some(Self::MAX_MATRICES),
            max_voxels: Self::MAX_VOXELS,
        }
    }
}

/// A decoded matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matrix {
    descriptor: MatrixDescriptor,
    voxels: Vec<Voxel>,
}

impl Matrix {
    /// The name, position and size of the matrix.
    pub fn descriptor(&self) -> &MatrixDescriptor {
        &self.descriptor
    }

    /// All voxels, with x varying fastest, then y, then z.
    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    /// The voxel at matrix-local coordinates, if within the matrix.
    pub fn voxel(&self, x: u32, y: u32, z: u32) -> Option<Voxel> {
        let i = self.descriptor.linear_index(x, y, z)?;
        self.voxels.get(i).copied()
    }

    /// All voxels as interleaved RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.voxels.as_bytes()
    }

    fn voxel_mut(&mut self, x: u32, y: u32, z: u32) -> Result<&mut Voxel, Error> {
        let i = self
            .descriptor
            .linear_index(x, y, z)
            .ok_or(Error::OutOfRange)?;
        self.voxels.get_mut(i).ok_or(Error::OutOfRange)
    }
}

/// A [`Sink`] holding every matrix of a document in memory.
///
/// Storage grows as matrices are defined, never from the declared matrix
/// count alone. Voxel storage is zero-initialized on allocation.
///
/// # Example
///
/// ```
/// let mut model = Model::new();
/// qbvoxel::avec::decode_file("model.qb", &mut model)?;
///
/// for matrix in model.matrices() {
///     println!("{:?}", matrix.descriptor());
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    limits: Limits,
    count: u32,
    matrices: Vec<Matrix>,
}

impl Model {
    /// Create an empty model with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty model with the given limits.
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            limits,
            count: 0,
            matrices: Vec::new(),
        }
    }

    /// The limits applied while decoding.
    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// The number of matrices declared by the document.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// All matrices defined so far, in document order.
    pub fn matrices(&self) -> &[Matrix] {
        &self.matrices
    }

    /// Take ownership of the decoded matrices, leaving the model empty.
    pub fn into_matrices(self) -> Vec<Matrix> {
        self.matrices
    }

    fn matrix(&self, index: u32) -> Result<&Matrix, Error> {
        self.matrices.get(index as usize).ok_or(Error::OutOfRange)
    }

    fn matrix_mut(&mut self, index: u32) -> Result<&mut Matrix, Error> {
        self.matrices
            .get_mut(index as usize)
            .ok_or(Error::OutOfRange)
    }
}

impl Sink for Model {
    fn resize(&mut self, count: u32) -> Result<(), Error> {
        if self.limits.max_matrices.is_some_and(|max| count > max) {
            Err(Error::UnsupportedMatrixCount)?;
        }

        self.count = count;
        self.matrices = Vec::new();
        Ok(())
    }

    fn get_matrix(&self, index: u32) -> Result<MatrixDescriptor, Error> {
        Ok(self.matrix(index)?.descriptor.clone())
    }

    fn set_matrix(&mut self, index: u32, matrix: &MatrixDescriptor) -> Result<(), Error> {
        if index >= self.count {
            Err(Error::OutOfRange)?;
        }

        let volume = matrix
            .volume()
            .filter(|&v| v <= self.limits.max_voxels)
            .ok_or(Error::OutOfMemory)?;

        let voxels = Voxel::new_vec_zeroed(volume).map_err(|_| Error::OutOfMemory)?;

        let index = index as usize;
        if index >= self.matrices.len() {
            self.matrices
                .try_reserve(index + 1 - self.matrices.len())
                .map_err(|_| Error::OutOfMemory)?;
            self.matrices.resize_with(index + 1, Matrix::default);
        }

        self.matrices[index] = Matrix {
            descriptor: matrix.clone(),
            voxels,
        };
        Ok(())
    }

    fn read_voxel(&self, index: u32, x: u32, y: u32, z: u32) -> Result<Voxel, Error> {
        self.matrix(index)?.voxel(x, y, z).ok_or(Error::OutOfRange)
    }

    fn write_voxel(
        &mut self,
        index: u32,
        x: u32,
        y: u32,
        z: u32,
        voxel: Voxel,
    ) -> Result<(), Error> {
        *self.matrix_mut(index)?.voxel_mut(x, y, z)? = voxel;
        Ok(())
    }
}
