//! Debug commands: `lex` and `parse` for inspecting the front end.

use rill_parse::ParseError;

use super::{read_file, syntax_error_line};

/// Lex a file and print the token stream, one token per line.
pub fn lex_file(path: &str) {
    let content = read_file(path);
    match rill_lexer::tokenize(&content) {
        Ok(tokens) => {
            println!("Tokens for '{}' ({} tokens):", path, tokens.len());
            for token in &tokens {
                println!("  {token:?}");
            }
        }
        Err(err) => {
            eprintln!("{}", syntax_error_line(&ParseError::from(err)));
            std::process::exit(1);
        }
    }
}

/// Parse a file and print the tree back as source.
pub fn parse_file(path: &str) {
    let content = read_file(path);
    match rill_parse::parse(&content) {
        Ok(program) => {
            println!("Parse result for '{}' ({} statements):", path, program.body.len());
            println!("{program}");
        }
        Err(err) => {
            eprintln!("{}", syntax_error_line(&err));
            std::process::exit(1);
        }
    }
}
