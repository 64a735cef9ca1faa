//! Command-line argument parsing for the `lrep` binary.
//!
//! The entry points are [`parse_args`] (reads `std::env::args()`) and
//! [`parse_args_from`] (takes an explicit slice, suitable for unit tests).
//! Both return a [`ParsedArgs`] value capturing every option and filename
//! discovered during the parse.
//!
//! Short flags without arguments may be aggregated (e.g. `-dfv`).  Long
//! options accept either `--option=VALUE` or `--option VALUE`.  A bare `--`
//! ends option processing; `-` alone names stdin (first use) or stdout
//! (second use).  Bad or unrecognised options return an `Err` whose message
//! begins with `bad usage:`.

use anyhow::anyhow;

use crate::codec::params::Params;
use crate::io::STDIO_MARK;

/// Complete set of options and filenames produced by the argument loop.
#[derive(Debug)]
pub struct ParsedArgs {
    /// Codec tunables assembled from the size/length flags.
    pub params: Params,
    /// Decompress instead of compress.
    pub decompress: bool,
    /// Overwrite existing output files.
    pub force: bool,
    /// Write to stdout regardless of the input name.
    pub to_stdout: bool,
    /// Notifier verbosity (0–4); default 2.
    pub verbosity: i32,
    /// Input filename (`-` = stdin).
    pub input: Option<String>,
    /// Output filename (`-` = stdout).
    pub output: Option<String>,
    /// A `--help`/`--version` flag was handled; exit 0 without I/O.
    pub exit_early: bool,
    /// argv[0], for help text.
    pub exe_name: String,
}

impl ParsedArgs {
    fn new(exe_name: &str) -> ParsedArgs {
        ParsedArgs {
            params: Params::default(),
            decompress: false,
            force: false,
            to_stdout: false,
            verbosity: 2,
            input: None,
            output: None,
            exit_early: false,
            exe_name: exe_name.to_owned(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Value parsing helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Parse a byte size with an optional K/M/G suffix (case-insensitive):
/// `"64m"` -> 67108864.  Plain numbers are bytes.
pub fn read_size_arg(s: &str) -> anyhow::Result<usize> {
    let s = s.trim();
    if s.is_empty() {
        return Err(anyhow!("bad usage: empty size value"));
    }
    let (digits, shift) = match s.as_bytes()[s.len() - 1].to_ascii_lowercase() {
        b'k' => (&s[..s.len() - 1], 10),
        b'm' => (&s[..s.len() - 1], 20),
        b'g' => (&s[..s.len() - 1], 30),
        _ => (s, 0),
    };
    let n: usize = digits
        .parse()
        .map_err(|_| anyhow!("bad usage: invalid size value '{s}'"))?;
    n.checked_shl(shift)
        .filter(|&v| shift == 0 || v >> shift == n)
        .ok_or_else(|| anyhow!("bad usage: size value '{s}' out of range"))
}

fn read_count_arg(s: &str, what: &str) -> anyhow::Result<usize> {
    s.trim()
        .parse()
        .map_err(|_| anyhow!("bad usage: --{what}: expected a number, got '{s}'"))
}

/// Split `--option=VALUE` / fetch the next argv entry for `--option VALUE`.
fn long_value<'a>(
    arg: &'a str,
    argv: &'a [String],
    idx: &mut usize,
    name: &str,
) -> anyhow::Result<&'a str> {
    if let Some(eq) = arg.find('=') {
        return Ok(&arg[eq + 1..]);
    }
    *idx += 1;
    argv.get(*idx)
        .map(|s| s.as_str())
        .ok_or_else(|| anyhow!("bad usage: --{name} requires a value"))
}

fn long_name(arg: &str) -> &str {
    let body = &arg[2..];
    match body.find('=') {
        Some(eq) => &body[..eq],
        None => body,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

/// Parse `std::env::args()` (skipping argv[0]).
pub fn parse_args() -> anyhow::Result<ParsedArgs> {
    let exe_name = std::env::args().next().unwrap_or_else(|| "lrep".to_owned());
    let argv: Vec<String> = std::env::args().skip(1).collect();
    parse_args_from(&exe_name, &argv)
}

/// Parse an explicit argument list.  `argv` is argv[1..].
pub fn parse_args_from(exe_name: &str, argv: &[String]) -> anyhow::Result<ParsedArgs> {
    let mut out = ParsedArgs::new(exe_name);
    let mut all_arguments_are_files = false;

    let mut idx = 0usize;
    while idx < argv.len() {
        let arg = &argv[idx];

        if arg.is_empty() {
            idx += 1;
            continue;
        }

        // ── Filenames (and everything after `--`) ─────────────────────────
        if all_arguments_are_files || !arg.starts_with('-') {
            if out.input.is_none() {
                out.input = Some(arg.clone());
            } else if out.output.is_none() {
                out.output = Some(arg.clone());
            } else {
                return Err(anyhow!("bad usage: unexpected extra argument '{arg}'"));
            }
            idx += 1;
            continue;
        }

        // ── `-` alone: stdin first, stdout second ─────────────────────────
        if arg == "-" {
            if out.input.is_none() {
                out.input = Some(STDIO_MARK.to_owned());
            } else {
                out.output = Some(STDIO_MARK.to_owned());
            }
            idx += 1;
            continue;
        }

        // ── Long options ──────────────────────────────────────────────────
        if let Some(rest) = arg.strip_prefix("--") {
            if rest.is_empty() {
                all_arguments_are_files = true;
                idx += 1;
                continue;
            }
            match long_name(arg) {
                "help" => {
                    super::help::print_usage(&out.exe_name);
                    out.exit_early = true;
                }
                "version" => {
                    super::help::print_version();
                    out.exit_early = true;
                }
                "decompress" => out.decompress = true,
                "compress" => out.decompress = false,
                "force" => out.force = true,
                "stdout" => out.to_stdout = true,
                "quiet" => out.verbosity = (out.verbosity - 1).max(0),
                "verbose" => out.verbosity += 1,
                "block-size" => {
                    out.params.block_size = read_size_arg(long_value(arg, argv, &mut idx, "block-size")?)?
                }
                "min-match" => {
                    out.params.min_match_len =
                        read_count_arg(long_value(arg, argv, &mut idx, "min-match")?, "min-match")?
                }
                "barrier" => {
                    out.params.barrier = read_size_arg(long_value(arg, argv, &mut idx, "barrier")?)?
                }
                "smallest" => {
                    out.params.smallest_len =
                        read_count_arg(long_value(arg, argv, &mut idx, "smallest")?, "smallest")?
                }
                "hash-bits" => {
                    out.params.hash_bits =
                        read_count_arg(long_value(arg, argv, &mut idx, "hash-bits")?, "hash-bits")?
                            as u32
                }
                "amplifier" => {
                    out.params.amplifier =
                        read_count_arg(long_value(arg, argv, &mut idx, "amplifier")?, "amplifier")?
                }
                other => return Err(anyhow!("bad usage: unknown option --{other}")),
            }
            idx += 1;
            continue;
        }

        // ── Short options, possibly aggregated ────────────────────────────
        let mut chars = arg[1..].chars();
        while let Some(c) = chars.next() {
            match c {
                'h' => {
                    super::help::print_usage(&out.exe_name);
                    out.exit_early = true;
                }
                'V' => {
                    super::help::print_version();
                    out.exit_early = true;
                }
                'd' => out.decompress = true,
                'z' => out.decompress = false,
                'f' => out.force = true,
                'c' => out.to_stdout = true,
                'q' => out.verbosity = (out.verbosity - 1).max(0),
                'v' => out.verbosity += 1,
                'b' => {
                    // `-b64m` or `-b 64m`; an inline value consumes the rest
                    // of the aggregate.
                    let inline: String = chars.by_ref().collect();
                    let value = if inline.is_empty() {
                        idx += 1;
                        argv.get(idx)
                            .cloned()
                            .ok_or_else(|| anyhow!("bad usage: -b requires a size"))?
                    } else {
                        inline
                    };
                    out.params.block_size = read_size_arg(&value)?;
                }
                'o' => {
                    let inline: String = chars.by_ref().collect();
                    let value = if inline.is_empty() {
                        idx += 1;
                        argv.get(idx)
                            .cloned()
                            .ok_or_else(|| anyhow!("bad usage: -o requires a filename"))?
                    } else {
                        inline
                    };
                    out.output = Some(value);
                }
                other => return Err(anyhow!("bad usage: unknown option -{other}")),
            }
        }
        idx += 1;
    }

    Ok(out)
}
