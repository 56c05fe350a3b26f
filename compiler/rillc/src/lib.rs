//! Rill command-line driver.
//!
//! `main.rs` only dispatches arguments; the commands themselves live in
//! [`commands`] so they can be tested. A host that wants to run files the way
//! `rill run` does can reuse [`FsLoader`] and [`install_prelude`].

pub mod commands;
mod loader;
mod prelude;
mod tracing_setup;

pub use loader::FsLoader;
pub use prelude::install_prelude;
pub use tracing_setup::init_tracing;
