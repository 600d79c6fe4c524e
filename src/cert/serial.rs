use serde::{Serialize, Serializer};
use std::fmt;

/// Certificate serial number, kept in the two renderings the exporter needs.
///
/// The decimal form is the join key across buckets; the upper-case hex form
/// (no leading zeros, no separators) is what index files carry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SerialNumber {
    decimal: String,
    hex: String,
}

impl SerialNumber {
    /// Build from a big-endian unsigned byte string, as found in DER.
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        let trimmed: Vec<u8> = bytes.iter().copied().skip_while(|b| *b == 0).collect();
        if trimmed.is_empty() {
            return Self::from(0u64);
        }

        let mut hex = format!("{:X}", trimmed[0]);
        for byte in &trimmed[1..] {
            hex.push_str(&format!("{byte:02X}"));
        }

        Self {
            decimal: be_bytes_to_decimal(&trimmed),
            hex,
        }
    }

    /// Decimal rendering, used as the record key.
    pub fn as_decimal(&self) -> &str {
        &self.decimal
    }

    /// Upper-case hexadecimal rendering.
    pub fn as_hex(&self) -> &str {
        &self.hex
    }
}

impl From<u64> for SerialNumber {
    fn from(serial: u64) -> Self {
        Self {
            decimal: serial.to_string(),
            hex: format!("{serial:X}"),
        }
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.decimal)
    }
}

impl Serialize for SerialNumber {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.decimal)
    }
}

/// Schoolbook base conversion; serials are at most 20 octets.
fn be_bytes_to_decimal(bytes: &[u8]) -> String {
    let mut digits: Vec<u8> = vec![0];
    for byte in bytes {
        let mut carry = *byte as u32;
        for digit in digits.iter_mut() {
            let value = (*digit as u32) * 256 + carry;
            *digit = (value % 10) as u8;
            carry = value / 10;
        }
        while carry > 0 {
            digits.push((carry % 10) as u8);
            carry /= 10;
        }
    }

    digits.iter().rev().map(|d| char::from(b'0' + d)).collect()
}
