//! Binary entry point for the `lrep` command-line tool.
//!
//! Parses arguments, resolves input/output names (including the stdin/
//! stdout marks and the default `.lrep` suffix), and dispatches to the
//! file-level operations.  All resources are released by RAII on every
//! path; the process exit code is 0 on success and 1 on any error.

use std::process::ExitCode;

use lrep::cli::args::{parse_args, ParsedArgs};
use lrep::io::{compress_file, decompress_file, default_output_name, Notifier, STDIO_MARK};

fn run(args: ParsedArgs) -> anyhow::Result<()> {
    let notifier = Notifier::new(args.verbosity);

    let input = args.input.unwrap_or_else(|| STDIO_MARK.to_owned());
    let output = match (args.to_stdout, args.output) {
        (true, _) => STDIO_MARK.to_owned(),
        (false, Some(name)) => name,
        (false, None) => default_output_name(&input, args.decompress)?,
    };

    if args.decompress {
        decompress_file(&notifier, &input, &output, args.force)?;
    } else {
        compress_file(&args.params, &notifier, &input, &output, args.force)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("lrep: {e}");
            return ExitCode::FAILURE;
        }
    };
    if args.exit_early {
        return ExitCode::SUCCESS;
    }
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("lrep: {e:#}");
            ExitCode::FAILURE
        }
    }
}
