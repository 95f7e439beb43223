//! cursor-usage - inspect Cursor AI usage from the terminal
//!
//! Reads locally stored credentials from Cursor's state database, queries the
//! usage-reporting API, and prints the result.

mod api;
mod cli;
mod credentials;
mod logging;
mod redact;
mod report;

use clap::Parser;
use cli::{exit_codes, Cli, Commands};

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
        return exit_codes::FAILURE;
    }

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create runtime: {}", e);
            return exit_codes::FAILURE;
        }
    };

    let result = rt.block_on(async {
        match cli.command.unwrap_or(Commands::Summary) {
            Commands::Summary => cli::summary::run(cli.db, cli.json).await,
            Commands::Daily(args) => cli::report::run_daily(cli.db, args, cli.json).await,
            Commands::Monthly(args) => cli::report::run_monthly(cli.db, args, cli.json).await,
            Commands::Today(args) => cli::report::run_today(cli.db, args, cli.json).await,
        }
    });

    match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_codes::FAILURE
        }
    }
}
