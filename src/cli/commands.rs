//! CLI command implementations
//!
//! Each command builds its JSON report separately from printing it, so
//! the reports can be checked without capturing stdout.

use std::path::Path;

use serde_json::{json, Value};

use crate::merkle::MerkleTree;
use crate::observability::{Logger, Severity};
use crate::receipts::{FileBackend, ReceiptStore};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let min = if cli.verbose {
        Severity::Info
    } else {
        Severity::Error
    };
    Logger::set_min_severity(min);
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::VerifyChain { dir, hash } => {
            let report = verify_chain(&dir, &hash)?;
            let valid = report["valid"].as_bool().unwrap_or(false);
            write_response(report)?;
            if valid {
                Ok(())
            } else {
                Err(CliError::chain_broken(&hash))
            }
        }
        Command::ShowChain { dir, hash, depth } => write_response(show_chain(&dir, &hash, depth)?),
        Command::MerkleRoot { proof, items } => {
            write_response(merkle_root(&items, proof.as_deref())?)
        }
    }
}

/// Open an existing archive directory without creating it
fn open_archive(dir: &Path) -> CliResult<ReceiptStore<FileBackend>> {
    if !dir.is_dir() {
        return Err(CliError::archive_not_found(dir));
    }
    Ok(ReceiptStore::open(dir)?)
}

/// Integrity report for the chain ending at `hash`
pub fn verify_chain(dir: &Path, hash: &str) -> CliResult<Value> {
    let store = open_archive(dir)?;
    if store.load_receipt(hash).is_none() {
        return Err(CliError::receipt_not_found(hash));
    }

    let valid = store.verify_chain_integrity(hash);
    let length = store.get_receipt_chain(hash, usize::MAX).len();
    Ok(json!({
        "tip": hash,
        "valid": valid,
        "length": length,
    }))
}

/// Up to `depth` stored receipts ending at `hash`, most recent first
pub fn show_chain(dir: &Path, hash: &str, depth: usize) -> CliResult<Value> {
    let store = open_archive(dir)?;
    let chain = store.get_receipt_chain(hash, depth);
    if chain.is_empty() && depth > 0 {
        return Err(CliError::receipt_not_found(hash));
    }

    let receipts = serde_json::to_value(&chain)?;
    Ok(json!({
        "tip": hash,
        "count": chain.len(),
        "receipts": receipts,
    }))
}

/// Root of a tree over `items`, with an optional checked inclusion proof
pub fn merkle_root(items: &[String], proof_item: Option<&str>) -> CliResult<Value> {
    let mut tree = MerkleTree::new();
    tree.add_batch(items);
    let root = tree
        .get_root()
        .ok_or_else(|| CliError::invalid_input("At least one item is required"))?
        .to_string();

    let mut report = json!({
        "root": root,
        "leaves": tree.len(),
    });

    if let Some(item) = proof_item {
        let proof = tree
            .get_proof(item)
            .ok_or_else(|| CliError::invalid_input(format!("Item not in tree: {}", item)))?;
        let verified = MerkleTree::verify_proof(item, &proof, &root);
        report["item"] = json!(item);
        report["proof"] = serde_json::to_value(&proof)?;
        report["verified"] = json!(verified);
    }

    Ok(report)
}
