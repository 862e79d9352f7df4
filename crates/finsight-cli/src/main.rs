use clap::Parser;
use finsight_cli::{Cli, run};
use std::process::ExitCode;

fn main() -> ExitCode {
    restore_sigpipe();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Piping into `head` closes stdout early; exit quietly instead of panicking in `println!`
#[cfg(unix)]
fn restore_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn restore_sigpipe() {}
