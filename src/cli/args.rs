//! CLI argument definitions using clap
//!
//! Commands:
//! - hookgate verify-chain --dir <path> --hash <hex>
//! - hookgate show-chain --dir <path> --hash <hex> [--depth <n>]
//! - hookgate merkle-root [--proof <item>] <items>...

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default number of receipts printed by show-chain
pub const DEFAULT_SHOW_DEPTH: usize = 10;

/// hookgate - hook-gated transactions with verifiable receipts
#[derive(Parser, Debug)]
#[command(name = "hookgate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Emit informational log lines in addition to errors
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Verify a receipt chain from its tip back to genesis
    VerifyChain {
        /// Receipt archive directory
        #[arg(long)]
        dir: PathBuf,

        /// Content hash of the chain tip
        #[arg(long)]
        hash: String,
    },

    /// Print a receipt chain, most recent first
    ShowChain {
        /// Receipt archive directory
        #[arg(long)]
        dir: PathBuf,

        /// Content hash of the chain tip
        #[arg(long)]
        hash: String,

        /// Maximum number of receipts to print
        #[arg(long, default_value_t = DEFAULT_SHOW_DEPTH)]
        depth: usize,
    },

    /// Compute the Merkle root of the given items
    MerkleRoot {
        /// Also emit and check an inclusion proof for this item
        #[arg(long)]
        proof: Option<String>,

        /// Leaf items, in order
        #[arg(required = true)]
        items: Vec<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_show_chain_default_depth() {
        let cli = Cli::try_parse_from([
            "hookgate",
            "show-chain",
            "--dir",
            "/tmp/receipts",
            "--hash",
            "abc",
        ])
        .unwrap();
        match cli.command {
            Command::ShowChain { depth, .. } => assert_eq!(depth, DEFAULT_SHOW_DEPTH),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_merkle_root_with_proof() {
        let cli = Cli::try_parse_from(["hookgate", "--verbose", "merkle-root", "--proof", "b", "a", "b"])
            .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::MerkleRoot { proof, items } => {
                assert_eq!(proof.as_deref(), Some("b"));
                assert_eq!(items, vec!["a", "b"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_merkle_root_requires_items() {
        assert!(Cli::try_parse_from(["hookgate", "merkle-root"]).is_err());
    }
}
