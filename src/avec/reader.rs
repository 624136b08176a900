//! Reader-based decoder implementation.
//!
//! _Requires Cargo feature `std`._

use std::{
    fs::File,
    io::{self, Read},
    path::Path,
};

use thiserror::Error;

use super::{Sink, stream::StreamDecoder};

extern crate std;

/// Number of bytes requested from the reader at a time.
const CHUNK_SIZE: usize = 256;

/// Errors occurring while decoding from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The reader ended before the document did.
    #[error("Reader ended after {consumed} bytes, before the end of the document.")]
    Truncated { consumed: u64 },
    /// A fault in the document, or from the sink.
    #[error(transparent)]
    Decode(#[from] crate::Error),
}

impl Error {
    /// Classify this error within the shared fault taxonomy.
    ///
    /// Missing files map to [`IoNotFound`](crate::Error::IoNotFound), and all
    /// other reader failures (including truncation) to
    /// [`IoGeneric`](crate::Error::IoGeneric).
    pub fn kind(&self) -> crate::Error {
        match self {
            Self::Io(err) if err.kind() == io::ErrorKind::NotFound => crate::Error::IoNotFound,
            Self::Io(_) | Self::Truncated { .. } => crate::Error::IoGeneric,
            Self::Decode(err) => *err,
        }
    }
}

/// Decode a document from a reader, publishing to a sink.
///
/// Reading stops at the end of the document. Bytes following it may have been
/// read from the reader, but are not decoded.
///
/// This method is also re-exported as `qbvoxel::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode(r: &mut impl Read, o: &mut impl Sink) -> Result<(), Error> {
    let mut decoder = StreamDecoder::new(o);

    let mut buf = [0; CHUNK_SIZE];
    let mut consumed = 0; // Counter of bytes decoded, used to report truncation.

    loop {
        let len = match r.read(&mut buf) {
            Ok(0) => break,
            Ok(len) => len,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => Err(err)?,
        };

        consumed += decoder.feed(&buf[..len]) as u64;
        decoder.status()?;

        if decoder.is_finished() {
            return Ok(());
        }
    }

    Err(Error::Truncated { consumed })
}

/// Decode a document from a file, publishing to a sink.
///
/// This method is also re-exported as `qbvoxel::avec::decode_file`.
///
/// _Requires Cargo feature `std`._
pub fn decode_file(path: impl AsRef<Path>, o: &mut impl Sink) -> Result<(), Error> {
    let mut file = File::open(path)?;
    decode(&mut file, o)
}
