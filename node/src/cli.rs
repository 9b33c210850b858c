//! # CLI Interface
//!
//! Command-line argument structure for `multisig-node`, built with `clap`
//! derive. Three subcommands: `run`, `keygen` and `version`.

use clap::{Parser, Subcommand, ValueEnum};

use multisig_protocol::config::{DEFAULT_METRICS_PORT, DEFAULT_RPC_PORT};

use crate::logging::LogFormat;

/// Multisig wallet node.
///
/// Hosts a wallet factory over an in-memory devnet ledger, serves the
/// wallet HTTP API and exposes Prometheus metrics.
#[derive(Parser, Debug)]
#[command(
    name = "multisig-node",
    about = "Multisig wallet node",
    version,
    propagate_version = true
)]
pub struct MultisigNodeCli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the node and serve the wallet API.
    Run(RunArgs),
    /// Generate a signer keypair and print its address.
    Keygen,
    /// Print version information and exit.
    Version,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Port for the wallet REST API.
    #[arg(long, env = "MULTISIG_RPC_PORT", default_value_t = DEFAULT_RPC_PORT)]
    pub rpc_port: u16,

    /// Port for the Prometheus metrics endpoint.
    #[arg(long, env = "MULTISIG_METRICS_PORT", default_value_t = DEFAULT_METRICS_PORT)]
    pub metrics_port: u16,

    /// Log output format.
    #[arg(long, env = "MULTISIG_LOG_FORMAT", value_enum, default_value_t = LogFormatArg::Pretty)]
    pub log_format: LogFormatArg,

    /// Default filter directive when `RUST_LOG` is unset.
    #[arg(
        long,
        default_value = "multisig_node=info,multisig_contracts=info,multisig_protocol=info,tower_http=debug"
    )]
    pub log_level: String,
}

/// Command-line spelling of [`LogFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
