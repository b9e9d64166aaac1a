//! Spritestack - command-line sprite layer composer

use std::process::ExitCode;

use spritestack::cli;

fn main() -> ExitCode {
    cli::run()
}
