//! Byte buffers for binary codecs.
//!
//! [`Writer`] appends big-endian scalars and raw byte runs to a growable
//! buffer. [`Reader`] walks a borrowed slice with bounds-checked reads that
//! report how many bytes were missing instead of panicking.

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

use thiserror::Error;

/// Error returned by [`Reader`] when a read runs past the end of the input.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    #[error("end of buffer: needed {needed} bytes, {remaining} remaining")]
    EndOfBuffer { needed: usize, remaining: usize },
}
