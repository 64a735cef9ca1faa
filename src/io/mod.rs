//! File-level compression and decompression.
//!
//! This layer turns paths (or `-` for the standard streams) into buffered
//! readers and writers, runs the codec drivers over them, preserves file
//! modification times, and reports results through a [`Notifier`].
//!
//! The notifier is a plain value owned by the caller — verbosity is an
//! argument, not process state, so two operations in one process can run at
//! different levels without stepping on each other.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{anyhow, Context};
use filetime::FileTime;

use crate::codec::{decoder, encoder, params::Params, CodecStats};
use crate::config::LREP_EXTENSION;

/// Pseudo-filename selecting stdin (as input) or stdout (as output).
pub const STDIO_MARK: &str = "-";

// ─────────────────────────────────────────────────────────────────────────────
// Notifier
// ─────────────────────────────────────────────────────────────────────────────

/// Verbosity collaborator.  0 = silent, 1 = errors only, 2 = results,
/// 3 = progress, 4+ = debug.  Messages go to stderr so they never mix with
/// stream output on stdout.
#[derive(Debug, Clone, Copy)]
pub struct Notifier {
    level: i32,
}

impl Notifier {
    pub fn new(level: i32) -> Notifier {
        Notifier { level }
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    /// Print `msg` when the notifier is at least this talkative.
    pub fn notice(&self, level: i32, msg: &str) {
        if self.level >= level {
            eprintln!("{msg}");
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Stream plumbing
// ─────────────────────────────────────────────────────────────────────────────

enum Source {
    Stdin(io::Stdin),
    File(BufReader<File>),
}

impl Read for Source {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Source::Stdin(s) => s.read(buf),
            Source::File(f) => f.read(buf),
        }
    }
}

enum Sink {
    Stdout(io::Stdout),
    File(BufWriter<File>),
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Stdout(s) => s.write(buf),
            Sink::File(f) => f.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Stdout(s) => s.flush(),
            Sink::File(f) => f.flush(),
        }
    }
}

fn open_source(name: &str) -> anyhow::Result<Source> {
    if name == STDIO_MARK {
        Ok(Source::Stdin(io::stdin()))
    } else {
        let f = File::open(name).with_context(|| format!("cannot open {name}"))?;
        Ok(Source::File(BufReader::new(f)))
    }
}

fn open_sink(name: &str, force: bool) -> anyhow::Result<Sink> {
    if name == STDIO_MARK {
        Ok(Sink::Stdout(io::stdout()))
    } else {
        if !force && Path::new(name).exists() {
            return Err(anyhow!("{name} already exists; use -f to overwrite"));
        }
        let f = File::create(name).with_context(|| format!("cannot create {name}"))?;
        Ok(Sink::File(BufWriter::new(f)))
    }
}

/// Derive the default output name: append the extension when compressing,
/// strip it when decompressing.
pub fn default_output_name(input: &str, decompress: bool) -> anyhow::Result<String> {
    if input == STDIO_MARK {
        return Ok(STDIO_MARK.to_owned());
    }
    if decompress {
        match input.strip_suffix(LREP_EXTENSION) {
            Some(stem) if !stem.is_empty() => Ok(stem.to_owned()),
            _ => Err(anyhow!(
                "cannot determine an output name for {input}: unknown suffix (use -o)"
            )),
        }
    } else {
        Ok(format!("{input}{LREP_EXTENSION}"))
    }
}

/// Copy the source file's modification time onto the destination.
/// Best-effort: failure to stat or set times is not an error.
fn preserve_times(input: &str, output: &str) {
    if input == STDIO_MARK || output == STDIO_MARK {
        return;
    }
    if let Ok(meta) = fs::metadata(input) {
        let mtime = FileTime::from_last_modification_time(&meta);
        let _ = filetime::set_file_mtime(output, mtime);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Operations
// ─────────────────────────────────────────────────────────────────────────────

/// Compress `input` into `output`, reporting through `notifier`.
pub fn compress_file(
    params: &Params,
    notifier: &Notifier,
    input: &str,
    output: &str,
    force: bool,
) -> anyhow::Result<CodecStats> {
    let mut src = open_source(input)?;
    let mut dst = open_sink(output, force)?;

    let started = Instant::now();
    let stats = encoder::compress(params, &mut src, &mut dst)
        .with_context(|| format!("compressing {input}"))?;
    drop(dst);
    preserve_times(input, output);

    let ratio = stats.ratio_percent();
    notifier.notice(
        2,
        &format!(
            "{input}: {} -> {} bytes ({ratio}%, {} matches, {:.2}s)",
            stats.bytes_in,
            stats.bytes_out,
            stats.matches,
            started.elapsed().as_secs_f64()
        ),
    );
    if ratio > params.min_compression as u64 {
        notifier.notice(
            2,
            &format!(
                "{input}: output exceeds {}% of input; downstream compression may not benefit",
                params.min_compression
            ),
        );
    }
    Ok(stats)
}

/// Decompress `input` into `output`, reporting through `notifier`.
pub fn decompress_file(
    notifier: &Notifier,
    input: &str,
    output: &str,
    force: bool,
) -> anyhow::Result<CodecStats> {
    let mut src = open_source(input)?;
    let mut dst = open_sink(output, force)?;

    let started = Instant::now();
    let stats = decoder::decompress(&mut src, &mut dst)
        .with_context(|| format!("decompressing {input}"))?;
    drop(dst);
    preserve_times(input, output);

    notifier.notice(
        2,
        &format!(
            "{input}: {} -> {} bytes ({} matches, {:.2}s)",
            stats.bytes_in,
            stats.bytes_out,
            stats.matches,
            started.elapsed().as_secs_f64()
        ),
    );
    Ok(stats)
}
