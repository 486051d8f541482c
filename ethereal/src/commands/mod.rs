//! Command dispatch

pub mod transaction_cancel;

use std::io::Write;

use crate::cli::{CancelArgs, Cli, Command, TransactionCommands};
use crate::config::CancelConfig;
use crate::errors::{EtherealError, EtherealResult};
use crate::rpc::ProviderClient;
use crate::wallet::ConfiguredWallets;

/// Run the parsed command and return the process exit status
pub async fn execute(cli: Cli) -> i32 {
    let quiet = cli.global.quiet;

    let result = match &cli.command {
        Command::Transaction(TransactionCommands::Cancel(args)) => {
            transaction_cancel_command(&cli, args).await
        }
    };

    exit_status(result, quiet, &mut std::io::stderr())
}

/// Map a command result to the exit status, reporting any error to `err`
/// unless quiet
pub fn exit_status<E: Write>(result: EtherealResult<i32>, quiet: bool, err: &mut E) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            log::debug!("[commands] Command failed: {:?}", e);
            if !quiet {
                let _ = writeln!(err, "{}", e);
            }
            e.error_code()
        }
    }
}

async fn transaction_cancel_command(cli: &Cli, args: &CancelArgs) -> EtherealResult<i32> {
    let config = CancelConfig::from_args(&cli.global, args)?;
    let client = ProviderClient::connect(&config.global.connection).map_err(EtherealError::Config)?;
    let wallets = ConfiguredWallets::from_config(&config.global);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let outcome = transaction_cancel::run(&config, &client, &wallets, &mut out).await?;

    Ok(outcome.exit_code())
}
