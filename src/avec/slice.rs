//! Slice-based decoder implementation.

use thiserror::Error;

use super::{Sink, stream::StreamDecoder};

/// Errors occurring while decoding from a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Unexpectedly reached the end of the slice.
    #[error("Unexpectedly reached the end of the slice.")]
    EndOfSlice,
    /// A fault in the document, or from the sink.
    #[error(transparent)]
    Decode(#[from] crate::Error),
}

/// Decode a document from a slice, publishing to a sink.
///
/// Returns the length of the document. Bytes following it are not read.
///
/// This method is also re-exported as `qbvoxel::avec::decode_slice`.
pub fn decode(r: &[u8], o: &mut impl Sink) -> Result<usize, Error> {
    let mut decoder = StreamDecoder::new(o);

    let consumed = decoder.feed(r);
    decoder.status()?;

    if !decoder.is_finished() {
        Err(Error::EndOfSlice)?;
    }

    Ok(consumed)
}
