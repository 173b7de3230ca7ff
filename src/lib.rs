//! This crate implements encoding and decoding functionality for binary primitive
//! Bose-Chaudhuri-Hocquenghem (BCH) codes. The encoder appends to each message the parity bits
//! of a systematic codeword, computed by polynomial division over GF(2). The decoder corrects up
//! to a design number of bit errors per codeword through syndrome computation, the
//! Berlekamp-Massey algorithm, and a Chien search, and processes a whole batch of equal-length
//! frames in lockstep, with the per-iteration state of all frames adjacent in memory.

#![warn(
    clippy::complexity,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_allocation,
    unused_import_braces,
    unused_qualifications
)]

use thiserror::Error;

mod bch;
mod galois;
mod reorder;
pub mod simulation;
pub mod utils;

pub use crate::bch::{encoder, BchDecoder};
pub use crate::galois::GaloisField;
pub use crate::reorder::FrameReorderer;

/// Custom error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid input error
    #[error("{0}")]
    InvalidInput(String),
    /// File read/write error
    #[error("{0}")]
    FileReadWriteError(#[from] std::io::Error),
    /// Serde read/write error
    #[error("{0}")]
    SerdeReadWriteError(#[from] serde_json::Error),
    /// Unknown error
    #[error("Unknown error")]
    Unknown,
}

/// Enumeration of binary symbol values
#[derive(Clone, Eq, PartialEq, Debug, Copy)]
pub enum Bit {
    /// Binary symbol `0`
    Zero = 0,
    /// Binary symbol `1`
    One = 1,
}
