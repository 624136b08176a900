#![no_std]

//! An incremental decoder for Qubicle voxel matrix lists (`.qb` files).
//!
//! A matrix list is a small header followed by a sequence of named,
//! positioned, fixed-size 3-D grids of colored voxels. Qbvoxel decodes it
//! from input delivered in chunks of any size, handing matrices and voxels to
//! a [`Sink`](avec::Sink) that owns all storage.
//!
//! Most users should begin with the drivers in the [`avec`] module. The
//! [`avec::stream::StreamDecoder`] accepts bytes as they arrive (one at a
//! time, or the whole file at once), and is suited to applications without an
//! allocator. The phase-by-phase finite-state machine it drives is exposed in
//! the [`sans`] module.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable the reader-based decoder and the in-memory [`Model`]
//!   sink (default).
//!
//! [`Model`]: avec::model::Model

pub mod avec;
pub mod error;
pub mod sans;

pub use error::Error;
