use clap::Parser;
use clap::error::ErrorKind;
use dotenv::dotenv;

use ethereal::cli::Cli;
use ethereal::commands;
use ethereal::errors::EXIT_FAILURE;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv().ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                // Usage errors share the exit status of every other failure
                let _ = e.print();
                std::process::exit(EXIT_FAILURE);
            }
        },
    };

    let default_filter = log_filter(cli.global.quiet, cli.global.verbose);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    std::process::exit(commands::execute(cli).await);
}

/// Default log level; `--quiet` silences warnings too unless `--verbose` is also given
fn log_filter(quiet: bool, verbose: bool) -> &'static str {
    match (quiet, verbose) {
        (_, true) => "debug",
        (true, false) => "off",
        (false, false) => "warn",
    }
}
