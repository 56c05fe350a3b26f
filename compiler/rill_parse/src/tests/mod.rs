//! Parser tests.
//!
//! Tests are organized into modules by category:
//! - `expressions`: precedence, postfix chains, literals and function forms
//! - `statements`: declarations, control flow, classes and imports
//! - `errors`: rejected input and error positions
//!
//! Most assertions compare the S-expression dump of the parsed tree, which
//! keeps expected values on one readable line.

mod errors;
mod statements;

use crate::{parse, ParseError};

/// Parse `src` and render the whole program.
fn dump(src: &str) -> String {
    match parse(src) {
        Ok(program) => program.to_string(),
        Err(err) => panic!("unexpected parse error in {src:?}: {err}"),
    }
}

/// Parse `src`, which must fail.
fn parse_err(src: &str) -> ParseError {
    match parse(src) {
        Ok(program) => panic!("expected an error for {src:?}, parsed {program}"),
        Err(err) => err,
    }
}
