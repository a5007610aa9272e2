//! Scentwheel CLI - render perfume note relationship wheels

mod cli;
mod colorizer;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();

    // logging is initialized inside run() once the flags are known
    let mut app = cli::ScentwheelApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
