//! ethereal: command line access to Ethereum
//!
//! The binary parses arguments with [`cli`], turns them into explicit
//! configuration ([`config`]) and runs the matching command in
//! [`commands`]. Commands reach the node through [`rpc::ChainClient`] and
//! sign through [`wallet::WalletProvider`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod rpc;
pub mod transaction;
pub mod units;
pub mod wallet;

#[cfg(test)]
mod testing;
