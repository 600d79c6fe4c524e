//! Length-prefixed addressing of records in the key-value store.
//!
//! A stored key is `len(bucket) ∥ bucket ∥ len(key) ∥ key`, each length a
//! little-endian `u16`. Scanning a bucket is a prefix scan over the encoded
//! bucket segment alone.

use crate::utils::errors::{Result, StepDbError};

/// Largest segment that fits the two-byte length prefix.
pub const MAX_SEGMENT_LEN: usize = u16::MAX as usize;

const PREFIX_LEN: usize = 2;

/// Encode a single segment: a two-byte little-endian length followed by the bytes.
pub fn encode(value: &[u8]) -> Result<Vec<u8>> {
    let len = value.len();
    if len == 0 {
        return Err(StepDbError::InvalidInput(
            "input cannot be empty".to_string(),
        ));
    }
    if len > MAX_SEGMENT_LEN {
        return Err(StepDbError::InvalidInput(format!(
            "length of input cannot be greater than {MAX_SEGMENT_LEN}"
        )));
    }

    let mut encoded = Vec::with_capacity(PREFIX_LEN + len);
    encoded.extend_from_slice(&(len as u16).to_le_bytes());
    encoded.extend_from_slice(value);
    Ok(encoded)
}

/// Encode a bucket and key into the full store key.
pub fn encode_key(bucket: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    let mut encoded = encode(bucket)?;
    encoded.extend(encode(key)?);
    Ok(encoded)
}

/// Read one segment from the front of `bytes`, returning it and the remainder.
pub fn decode_segment(bytes: &[u8]) -> Result<(&[u8], &[u8])> {
    if bytes.len() < PREFIX_LEN {
        return Err(StepDbError::InvalidInput(format!(
            "segment header truncated: {} bytes",
            bytes.len()
        )));
    }

    let len = u16::from_le_bytes([bytes[0], bytes[1]]) as usize;
    let rest = &bytes[PREFIX_LEN..];
    if rest.len() < len {
        return Err(StepDbError::InvalidInput(format!(
            "segment declares {len} bytes but only {} remain",
            rest.len()
        )));
    }

    Ok(rest.split_at(len))
}
