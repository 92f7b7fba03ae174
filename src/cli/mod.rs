//! CLI module for hookgate
//!
//! Provides command-line access to receipt archives and Merkle trees:
//! - verify-chain: Check a receipt chain back to genesis
//! - show-chain: Print a receipt chain, most recent first
//! - merkle-root: Root and inclusion proof for a list of items

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, DEFAULT_SHOW_DEPTH};
pub use commands::{merkle_root, run, run_command, show_chain, verify_chain};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{ok_envelope, write_response};
