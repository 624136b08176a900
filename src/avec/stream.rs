//! Re-entrant decoder accepting input in chunks.

use core::mem;

use either::Either::{self, Left, Right};
use log::{debug, trace};

use crate::{
    Error,
    sans::{
        Decoder,
        header::Flags,
        matrix::{EndOfStream, MatrixBounds, MatrixDescriptor, MatrixName, MatrixNameLength, Name},
        voxel::VoxelData,
    },
};

use super::Sink;

/// Capacity of the scratch buffer for partially received fields, enough for
/// the largest fixed-size field.
const FIELD_CAPACITY: usize = 32;

const HEADER_SIZE: usize = 24;
const BOUNDS_SIZE: usize = 24;
const VOXEL_SIZE: usize = 4;

#[derive(Debug)]
enum Phase {
    Header,
    NameLength(MatrixNameLength),
    Name(MatrixName),
    Bounds(MatrixBounds),
    Voxels(VoxelData),
    End(EndOfStream),
    /// Stopped by a fault, recorded as the last error.
    Halted,
}

/// A decoder accepting a matrix list in chunks of any size, publishing to a
/// [`Sink`].
///
/// Input may be split anywhere, down to single bytes: the sink receives the
/// same calls, with the same arguments and in the same order, however the
/// document is divided between calls to [`StreamDecoder::feed`].
///
/// The decoder holds no heap allocations. Partially received fields are kept
/// in fixed-size scratch buffers, and all matrix storage belongs to the sink.
///
/// The first fault, whether from format validation or returned by the sink,
/// halts decoding permanently. Check [`StreamDecoder::last_error`] (or
/// [`StreamDecoder::status`]) when fewer bytes are consumed than supplied, and
/// call [`StreamDecoder::init`] or [`StreamDecoder::clear`] to start over.
///
/// # Example
///
/// ```
/// let mut model = Model::new();
/// let mut decoder = StreamDecoder::new(&mut model);
///
/// for chunk in chunks {
///     let consumed = decoder.feed(chunk);
///     decoder.status()?;
///     if decoder.is_finished() {
///         break;
///     }
/// }
/// ```
pub struct StreamDecoder<'a, S: Sink + ?Sized = dyn Sink> {
    sink: Option<&'a mut S>,
    phase: Phase,
    last_error: Option<Error>,
    flags: Flags,
    cursor: usize,
    field: [u8; FIELD_CAPACITY],
    name: Name,
}

impl<'a, S: Sink + ?Sized> StreamDecoder<'a, S> {
    /// Create a decoder publishing to a sink.
    pub fn new(sink: &'a mut S) -> Self {
        Self {
            sink: Some(sink),
            ..Self::detached()
        }
    }

    /// Create a decoder without a sink.
    ///
    /// A detached decoder validates and walks a document, but publishes
    /// nothing.
    pub fn detached() -> Self {
        Self {
            sink: None,
            phase: Phase::Header,
            last_error: None,
            flags: Flags::default(),
            cursor: 0,
            field: [0; FIELD_CAPACITY],
            name: Name::new(),
        }
    }

    /// Reset the decoder to the start of a document, publishing to a new sink.
    pub fn init(&mut self, sink: &'a mut S) {
        *self = Self::new(sink);
    }

    /// Reset the decoder to the start of a document, releasing its sink.
    pub fn clear(&mut self) {
        *self = Self::detached();
    }

    /// Decode the next chunk of a document.
    ///
    /// Returns the number of bytes consumed. This is less than the length of
    /// the chunk only when the document ends, or a fault occurs, within it.
    /// The byte completing the document (or triggering the fault) is counted
    /// as consumed. Once finished or halted, no further bytes are consumed.
    pub fn feed(&mut self, r: &[u8]) -> usize {
        let mut consumed = 0;

        for &b in r {
            if self.last_error.is_some() || self.is_finished() {
                break;
            }

            consumed += 1;

            let phase = mem::replace(&mut self.phase, Phase::Halted);
            match self.step(phase, b) {
                Ok(phase) => self.phase = phase,
                Err(err) => {
                    debug!("Decoding halted: {err}");
                    self.last_error = Some(err);
                }
            }
        }

        consumed
    }

    /// The fault that halted decoding, if any.
    pub fn last_error(&self) -> Option<Error> {
        self.last_error
    }

    /// The fault that halted decoding, as a result.
    pub fn status(&self) -> Result<(), Error> {
        self.last_error.map_or(Ok(()), Err)
    }

    /// Whether the end of the document has been reached.
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::End(_))
    }

    /// The encoding flags of the document.
    ///
    /// These are derived from the file header once it has been decoded.
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Override the encoding flags.
    ///
    /// Flags set before the file header is decoded are replaced by those it
    /// declares.
    pub fn set_flags(&mut self, flags: Flags) {
        self.flags = Flags::from_bits(flags.bits());
    }

    /// The index of the matrix being decoded, if decoding is within a matrix.
    pub fn matrix_index(&self) -> Option<u32> {
        match &self.phase {
            Phase::NameLength(state) => Some(state.index()),
            Phase::Name(state) => Some(state.index()),
            Phase::Bounds(state) => Some(state.index()),
            Phase::Voxels(state) => Some(state.index()),
            Phase::Header | Phase::End(_) | Phase::Halted => None,
        }
    }

    fn step(&mut self, phase: Phase, b: u8) -> Result<Phase, Error> {
        Ok(match phase {
            Phase::Header => match self.fill::<HEADER_SIZE>(b) {
                Some(r) => self.header(r)?,
                None => Phase::Header,
            },
            Phase::NameLength(state) => {
                self.name.clear();
                match state.advance([b]) {
                    Left(state) => Phase::Name(state),
                    Right(state) => Phase::Bounds(state),
                }
            }
            Phase::Name(state) => {
                self.name.push(b)?;
                if self.name.len() < state.name_len() {
                    Phase::Name(state)
                } else {
                    Phase::Bounds(state.advance())
                }
            }
            Phase::Bounds(state) => match self.fill::<BOUNDS_SIZE>(b) {
                Some(r) => self.bounds(state, r)?,
                None => Phase::Bounds(state),
            },
            Phase::Voxels(state) => match self.fill::<VOXEL_SIZE>(b) {
                Some(r) => self.voxel(state, r)?,
                None => Phase::Voxels(state),
            },
            phase @ (Phase::End(_) | Phase::Halted) => phase,
        })
    }

    fn header(&mut self, r: [u8; HEADER_SIZE]) -> Result<Phase, Error> {
        let (count, successor) = Decoder::advance(r, &mut self.flags)?;

        debug!("Found {count} matrices with flags {:?}", self.flags);

        if let Some(sink) = self.sink.as_deref_mut() {
            sink.resize(count)?;
        }

        Ok(resume(successor))
    }

    fn bounds(&mut self, state: MatrixBounds, r: [u8; BOUNDS_SIZE]) -> Result<Phase, Error> {
        let index = state.index();
        let (bounds, successor) = state.advance(r);

        let matrix = MatrixDescriptor::new(mem::take(&mut self.name), bounds);

        debug!("Defining matrix {index}: {matrix:?}");

        if let Some(sink) = self.sink.as_deref_mut() {
            sink.set_matrix(index, &matrix)?;
        }

        Ok(match successor {
            Left(state) => Phase::Voxels(state),
            Right(successor) => resume(successor),
        })
    }

    fn voxel(&mut self, state: VoxelData, r: [u8; VOXEL_SIZE]) -> Result<Phase, Error> {
        let index = state.index();
        let ([x, y, z], voxel, successor) = state.advance(r);

        if let Some(sink) = self.sink.as_deref_mut() {
            sink.write_voxel(index, x, y, z, voxel)?;
        }

        Ok(match successor {
            Left(state) => Phase::Voxels(state),
            Right(successor) => resume(successor),
        })
    }

    /// Collect a byte into the scratch buffer, returning the field once all
    /// `N` of its bytes have arrived.
    fn fill<const N: usize>(&mut self, b: u8) -> Option<[u8; N]> {
        const { assert!(N <= FIELD_CAPACITY) };

        self.field[self.cursor] = b;
        self.cursor += 1;

        if self.cursor < N {
            return None;
        }

        self.cursor = 0;

        let mut r = [0; N];
        r.copy_from_slice(&self.field[..N]);
        Some(r)
    }
}

impl<S: Sink + ?Sized> core::fmt::Debug for StreamDecoder<'_, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StreamDecoder")
            .field("phase", &self.phase)
            .field("last_error", &self.last_error)
            .field("flags", &self.flags)
            .field("cursor", &self.cursor)
            .field("attached", &self.sink.is_some())
            .finish()
    }
}

/// Begin the next matrix, or finish the document.
fn resume(successor: Either<MatrixNameLength, EndOfStream>) -> Phase {
    match successor {
        Left(state) => Phase::NameLength(state),
        Right(state) => {
            trace!("Reached end of stream");
            Phase::End(state)
        }
    }
}
