//! Error type shared by the codec drivers.
//!
//! Three kinds cover everything the core can fail with:
//!
//! - [`LrepError::OutOfMemory`] — the window, hash index, or scratch buffer
//!   could not be allocated (the decoder first retries with a split output
//!   buffer before reporting this).
//! - [`LrepError::Io`] — a read or write on the caller-supplied stream
//!   failed; the underlying `io::Error` is carried verbatim.
//! - [`LrepError::CorruptFrame`] — the decoder met a block whose record
//!   table or literal region cannot fit its declared `ComprSize`, or an
//!   offset outside the window.  The stream format carries no checksum, so
//!   this only catches structural impossibilities, never flipped payload
//!   bytes.
//!
//! Nothing is retried; the drivers release their buffers and return.

use std::fmt;
use std::io;

/// Errors returned by [`compress`](crate::codec::encoder::compress) and
/// [`decompress`](crate::codec::decoder::decompress).
#[derive(Debug)]
pub enum LrepError {
    /// A large allocation (window, hash index, or block scratch) failed.
    OutOfMemory,
    /// An I/O error from the source or sink, propagated unchanged.
    Io(io::Error),
    /// The decoder read a structurally impossible block.
    CorruptFrame(&'static str),
}

impl fmt::Display for LrepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LrepError::OutOfMemory => write!(f, "not enough memory"),
            LrepError::Io(e) => write!(f, "i/o error: {e}"),
            LrepError::CorruptFrame(what) => write!(f, "corrupt frame: {what}"),
        }
    }
}

impl std::error::Error for LrepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LrepError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for LrepError {
    fn from(e: io::Error) -> Self {
        LrepError::Io(e)
    }
}

/// Allocate a zero-filled byte buffer, reporting failure as
/// [`LrepError::OutOfMemory`] instead of aborting the process.
///
/// Window sizes reach into the gigabytes, so allocation failure is a real
/// runtime condition here, not a programming error.
pub fn try_alloc_bytes(len: usize) -> Result<Vec<u8>, LrepError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len).map_err(|_| LrepError::OutOfMemory)?;
    v.resize(len, 0);
    Ok(v)
}

/// Same as [`try_alloc_bytes`] for `u32` slot arrays (the hash index).
pub fn try_alloc_slots(len: usize) -> Result<Vec<u32>, LrepError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len).map_err(|_| LrepError::OutOfMemory)?;
    v.resize(len, 0);
    Ok(v)
}
