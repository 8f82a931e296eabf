//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use ridepool_cli::CliError;

fn main() {
    match ridepool_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("ridepool: {err}");
            std::process::exit(1);
        }
    }
}
