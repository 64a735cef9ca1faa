//! Command-line front end: argument parsing and help text.

pub mod args;
pub mod help;
