//! Deterministic transaction hashing
//!
//! The merkle root of a transaction covers the previous tip and the
//! canonical form of the delta, nothing else. Wall-clock time and the
//! transaction id are not inputs: two engines in the same state applying
//! the same delta agree on the root.
//!
//! Canonical form:
//!
//! ```text
//! prev_hash (ASCII hex)
//! b'A' || u64be(count) || sorted additions (length-prefixed terms)
//! b'R' || u64be(count) || sorted removals  (length-prefixed terms)
//! ```

use crate::delta::{QuadDelta, Triple};
use crate::digest::sha256_hex;

/// Tip hash of an engine that has never committed
pub const GENESIS_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

const ADDITIONS_TAG: u8 = b'A';
const REMOVALS_TAG: u8 = b'R';

/// SHA-256 over `prev_hash ‖ canonical(additions) ‖ canonical(removals)`
pub fn compute_merkle_root(prev_hash: &str, delta: &QuadDelta) -> String {
    let mut buf = Vec::with_capacity(prev_hash.len() + 128 * delta.len());
    buf.extend_from_slice(prev_hash.as_bytes());
    write_section(&mut buf, ADDITIONS_TAG, delta.added());
    write_section(&mut buf, REMOVALS_TAG, delta.removed());
    sha256_hex(&buf)
}

fn write_section(buf: &mut Vec<u8>, tag: u8, triples: &[Triple]) {
    let mut sorted: Vec<&Triple> = triples.iter().collect();
    sorted.sort();

    buf.push(tag);
    buf.extend_from_slice(&(sorted.len() as u64).to_be_bytes());
    for triple in sorted {
        triple.write_canonical(buf);
    }
}
