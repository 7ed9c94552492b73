/// BASIC interpreter CLI
///
/// With no arguments this starts an interactive session on stdin/stdout.
/// Log output goes to stderr; see `basic config` for the effective settings.

use basic_core::cli;

fn main() {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    if let Err(e) = cli::run_cli() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
