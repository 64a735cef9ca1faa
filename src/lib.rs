//! `lrep` — a long-range match preprocessor for general-purpose compressors.
//!
//! Locates very long duplicated byte runs hundreds of megabytes to
//! gigabytes apart and emits them as `(offset, length)` copy references;
//! short unmatched regions pass through literally.  Auxiliary memory stays
//! near one quarter of the sliding-window size, so multi-gigabyte match
//! distances remain practical.
//!
//! # Crate layout
//!
//! | Module   | Contents |
//! |----------|----------|
//! | `codec`  | The match codec: rolling hash, candidate index, window, encoder/decoder drivers, frame format. |
//! | `io`     | File-level compress / decompress, verbosity collaborator. |
//! | `cli`    | Command-line argument parsing and help. |
//! | `config` | Compile-time defaults for every tunable. |
//! | `corpus` | Deterministic synthetic data for tests and benchmarks. |
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use lrep::{compress, decompress, Params};
//!
//! let data = b"0123456789abcdef".repeat(65_536);
//! let params = Params { block_size: 1 << 20, min_match_len: 32, ..Params::default() };
//!
//! let mut packed = Vec::new();
//! compress(&params, &mut Cursor::new(&data[..]), &mut packed).unwrap();
//!
//! let mut unpacked = Vec::new();
//! decompress(&mut Cursor::new(&packed[..]), &mut unpacked).unwrap();
//! assert_eq!(unpacked, data);
//! ```

pub mod cli;
pub mod codec;
pub mod config;
pub mod corpus;
pub mod io;

pub use codec::decoder::{decompress, decompress_split};
pub use codec::encoder::compress;
pub use codec::error::LrepError;
pub use codec::params::Params;
pub use codec::CodecStats;

/// Crate version as recorded in the package manifest.
pub const VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

/// One-line program banner used by `--version` and the help screen.
pub fn version_banner() -> String {
    format!("lrep {VERSION_STRING} — long-range match preprocessor")
}
