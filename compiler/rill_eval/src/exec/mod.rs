//! Execution modules for the Rill interpreter.
//!
//! - `stmt`: statement dispatch, blocks, declarations and assignment
//! - `control`: conditionals, loops and `try`
//! - `expr`: expression evaluation and calls
//! - `access`: member and index reads and writes
//! - `pattern`: `match` patterns and destructuring
//! - `comprehension`: array and record comprehensions

mod access;
mod comprehension;
mod control;
mod expr;
mod pattern;
mod stmt;
