//! Deterministic identifiers
//!
//! Ids are the first 12 hex characters of a SHA-256 digest. Collisions are
//! possible in principle and are not detected. Ids are not interchangeable
//! with 12-character MD5 ids produced by other generators.

use sha2::{Digest, Sha256};

/// Number of hex characters kept from the digest
pub const ID_LENGTH: usize = 12;

/// Hash arbitrary text into a short hex id
pub fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let mut hex = format!("{:x}", digest);
    hex.truncate(ID_LENGTH);
    hex
}

/// Campaign id for an organization filing
pub fn campaign_id(ein: &str, tax_year: i32) -> String {
    short_hash(&format!("{}-{}", ein, tax_year))
}

/// Id of the `index`-th synthesized donation for an organization filing
pub fn donation_id(ein: &str, index: usize, tax_year: i32) -> String {
    short_hash(&format!("{}-donation-{}-{}", ein, index, tax_year))
}

/// Impact location id for a region
pub fn location_id(region: &str) -> String {
    short_hash(&format!("location-{}", region))
}
