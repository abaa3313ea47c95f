//! Leaf encoding for (address, balance) records

use alloy_primitives::U256;

use crate::{hasher::keccak256, Digest, MerkleError};

/// Byte length of a canonical address.
pub const ADDRESS_LEN: usize = 20;

/// Byte length of the big-endian balance encoding.
pub const BALANCE_LEN: usize = 32;

/// Hash one (address, balance) record into a leaf digest.
///
/// The preimage is the raw 20-byte address followed by the balance as a
/// 32-byte big-endian integer, left-padded with zeros. Hashing the binary
/// address form means the textual case of the source address never reaches
/// the hash. Fixed-width fields keep the encoding injective: no two distinct
/// records share a preimage.
pub fn encode_leaf(address: &[u8], balance: U256) -> Result<Digest, MerkleError> {
    if address.len() != ADDRESS_LEN {
        return Err(MerkleError::InvalidInput(format!(
            "address must be {ADDRESS_LEN} bytes, got {}",
            address.len()
        )));
    }

    let mut preimage = [0u8; ADDRESS_LEN + BALANCE_LEN];
    preimage[..ADDRESS_LEN].copy_from_slice(address);
    preimage[ADDRESS_LEN..].copy_from_slice(&balance.to_be_bytes::<BALANCE_LEN>());
    Ok(keccak256(&preimage))
}

/// Decode a textual address into its canonical 20-byte form.
///
/// Accepts an optional `0x` prefix; hex digits may use either case.
pub fn parse_address(s: &str) -> Result<[u8; ADDRESS_LEN], MerkleError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    let bytes = hex::decode(digits)
        .map_err(|e| MerkleError::InvalidInput(format!("address {s:?} is not hex: {e}")))?;
    bytes.as_slice().try_into().map_err(|_| {
        MerkleError::InvalidInput(format!(
            "address {s:?} decodes to {} bytes, expected {ADDRESS_LEN}",
            bytes.len()
        ))
    })
}
