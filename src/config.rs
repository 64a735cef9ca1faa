//! Compile-time configuration constants for the `lrep` programs layer.
//!
//! These constants govern the default tunables consumed by
//! [`Params`](crate::codec::params::Params) and the file-level defaults of
//! the CLI.  All of them can be overridden at runtime via CLI flags; see the
//! individual constants for details.

pub const KB: usize = 1 << 10;
pub const MB: usize = 1 << 20;
pub const GB: usize = 1 << 30;

/// Largest single read issued against the input source, whatever the window
/// size.  The first refill primes up to this much at once; later refills are
/// additionally capped at one eighth of the window.
pub const MAX_READ: usize = 8 * MB;

/// Default sliding-window (block) size: 64 MiB.
///
/// Match offsets never exceed this distance.  Can be raised into the
/// gigabytes with `-b`; auxiliary memory stays near one quarter of it.
pub const DEFAULT_BLOCK_SIZE: usize = 64 * MB;

/// Smallest window size accepted; requests below this are clamped up.
pub const MIN_BLOCK_SIZE: usize = 64 * KB;

/// Default minimum length for matches closer than [`DEFAULT_BARRIER`].
pub const DEFAULT_MIN_MATCH_LEN: usize = 512;

/// Default minimum length for matches at or beyond [`DEFAULT_BARRIER`].
///
/// Equal to [`DEFAULT_MIN_MATCH_LEN`] by default, which makes the barrier
/// inert until the caller lowers `--smallest`.
pub const DEFAULT_SMALLEST_LEN: usize = 512;

/// Default offset separating "near" from "far" matches: 8 MiB.
///
/// Near duplicates are left for the downstream compressor (whose own window
/// is assumed to reach about this far); only long ones are worth taking.
pub const DEFAULT_BARRIER: usize = 8 * MB;

/// Default probe amplification factor (1 = baseline probe rate).
pub const DEFAULT_AMPLIFIER: usize = 1;

/// Default hash-index sizing: 0 selects automatic sizing from the window.
pub const DEFAULT_HASH_BITS: u32 = 0;

/// Default informational compression threshold, in percent of input size.
/// The codec never enforces it; the io layer only reports when the output
/// came out above this fraction of the input.
pub const DEFAULT_MIN_COMPRESSION: u32 = 100;

/// Floor for the smallest usable minimum match length.  The algorithm is
/// built for long matches; values below this would starve the rolling hash
/// window.
pub const MIN_MATCH_FLOOR: usize = 32;

/// File extension appended to compressed output names.
pub const LREP_EXTENSION: &str = ".lrep";
