mod args;
mod commands;
mod handlers;
mod input;
pub mod logging;
pub mod output;
pub mod types;

pub use args::{Cli, Commands, Selection};
pub use commands::run;
