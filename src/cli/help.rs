//! Usage and version text for the `lrep` binary.

use crate::config::{DEFAULT_BARRIER, DEFAULT_BLOCK_SIZE, DEFAULT_MIN_MATCH_LEN, MB};

/// Print the usage screen to stdout.
pub fn print_usage(exe_name: &str) {
    println!("{}", crate::version_banner());
    println!("Usage: {exe_name} [options] [input] [output]");
    println!();
    println!("Finds long, far-apart duplicated byte runs and replaces them with");
    println!("(offset, length) references; feed the output to a general-purpose");
    println!("compressor for the short-range redundancy.");
    println!();
    println!("With no output name, compression appends `.lrep` and decompression");
    println!("strips it.  `-` names stdin or stdout.");
    println!();
    println!("Options:");
    println!("  -z, --compress        compress (default)");
    println!("  -d, --decompress      decompress");
    println!("  -f, --force           overwrite existing output files");
    println!("  -c, --stdout          write to standard output");
    println!("  -o FILE               output filename");
    println!("  -b, --block-size=SIZE sliding-window size (default {}m; K/M/G suffixes)",
        DEFAULT_BLOCK_SIZE / MB);
    println!("      --min-match=N     minimum near-match length (default {DEFAULT_MIN_MATCH_LEN})");
    println!("      --barrier=SIZE    near/far offset boundary (default {}m)", DEFAULT_BARRIER / MB);
    println!("      --smallest=N      minimum far-match length (default: same as --min-match)");
    println!("      --hash-bits=N     log2 of index slots (default: sized from the window)");
    println!("      --amplifier=N     probe-rate multiplier (default 1)");
    println!("  -v / -q               more / less verbose (repeatable)");
    println!("  -h, --help            this help");
    println!("  -V, --version         version");
}

/// Print the version line to stdout.
pub fn print_version() {
    println!("{}", crate::version_banner());
}
