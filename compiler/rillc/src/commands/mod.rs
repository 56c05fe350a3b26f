//! Command handlers for the Rill CLI.
//!
//! Each submodule implements one command. Shared helpers such as
//! [`read_file`] live here in the module root.

mod debug;
mod run;

pub use debug::{lex_file, parse_file};
pub use run::{execute, parse_run_options, render_error, run_file, RunOptions};

/// A front-end error in the `line:column: error: message` form.
pub(crate) fn syntax_error_line(err: &rill_parse::ParseError) -> String {
    format!("{}: error: {}", err.pos(), err.message())
}

/// Read a file from disk, exiting with a user-friendly error message on failure.
pub(crate) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("error: {msg}");
            std::process::exit(1);
        }
    }
}
