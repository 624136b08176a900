//! Internal finite-state machine for implementing decoders.
//!
//! This module is intended for applications that need fine control over
//! decoder internals. See [`crate::avec`] for implementations covering common
//! decoding patterns, including the re-entrant
//! [`StreamDecoder`](crate::avec::stream::StreamDecoder).
//!
//! # Architecture
//!
//! Each phase of a matrix list is represented by a non-copy state token. Once
//! the bytes of a phase's field are ready, transition to another state by
//! calling the token's `advance` method. This will return a successor state
//! token, along with any extracted data.
//!
//! Only the initial state, re-exported for convenience as [`Decoder`], can be
//! constructed.
//!
//! Some areas of the decoding process are not represented in the finite-state
//! machine and must be carefully written:
//!
//! - Buffering bytes until a complete field is available. Field sizes are
//!   fixed by each token's `advance` signature, except for matrix names, whose
//!   length is given by [`matrix::MatrixName::name_len`].
//!
//! - Publishing extracted data to storage, including resizing the matrix list
//!   and defining each matrix before its voxels arrive.
//!
//! Implementers are recommended to begin by studying the
//! [`StreamDecoder`](crate::avec::stream::StreamDecoder).

pub mod codec;
pub mod header;
pub mod matrix;
pub mod voxel;

/// Entrypoint to the finite-state machine.
pub type Decoder = header::FileHeader;
