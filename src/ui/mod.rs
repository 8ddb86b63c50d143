//! Terminal front end: argument parsing and response output

pub mod cli;
pub mod reporter;

pub use cli::{Args, Cli, Command, HttpMethod};
pub use reporter::{OutputMode, Reporter};
