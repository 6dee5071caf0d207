use std::fmt;

use rand::{rngs::OsRng, RngCore};

use crate::errors::{OutOfRangeError, ParseError};

/// Number of bits in a [`NodeId`].
pub const NODE_ID_SIZE_BITS: usize = 160;
const NODE_ID_SIZE_BYTES: usize = NODE_ID_SIZE_BITS / 8;

/// Identifier for content and peer nodes.
///
/// A node id is a 160-bit number, big-endian on the wire. For content, an
/// id is the SHA-1 hash of its bytes. `NodeId::ZERO` is a reserved
/// "unknown/empty" sentinel used when a field is absent.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId([u8; NODE_ID_SIZE_BYTES]);

impl NodeId {
    /// Reserved sentinel used when a node id field is absent.
    pub const ZERO: NodeId = NodeId([0u8; NODE_ID_SIZE_BYTES]);

    /// Generates a new random 160-bit id using a cryptographically secure
    /// RNG.
    pub fn generate() -> NodeId {
        let mut bytes = [0u8; NODE_ID_SIZE_BYTES];
        OsRng.fill_bytes(&mut bytes);
        NodeId(bytes)
    }

    pub fn from_bytes(bytes: [u8; NODE_ID_SIZE_BYTES]) -> NodeId {
        NodeId(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; NODE_ID_SIZE_BYTES] {
        &self.0
    }

    /// Parses a node id from a hex (`0x`), binary (`0b`), or plain decimal
    /// string, matching the reference implementation's constructor.
    pub fn parse(data: &str) -> Result<NodeId, ParseError> {
        if data.is_empty() {
            return Err(ParseError::Empty);
        }

        if let Some(hex_digits) = data.strip_prefix("0x") {
            Self::from_radix_str(hex_digits, 16, "hex")
        } else if let Some(bin_digits) = data.strip_prefix("0b") {
            Self::from_radix_str(bin_digits, 2, "binary")
        } else {
            Self::from_radix_str(data, 10, "decimal")
        }
    }

    fn from_radix_str(digits: &str, radix: u32, radix_name: &'static str) -> Result<NodeId, ParseError> {
        if digits.is_empty() {
            return Err(ParseError::Empty);
        }

        let value = digits_to_bytes(digits, radix).ok_or_else(|| ParseError::InvalidDigit {
            radix: radix_name,
            input: digits.to_string(),
        })?;

        Ok(NodeId::from_bytes(value))
    }

    /// Returns the bitwise XOR distance to `other`.
    pub fn xor(&self, other: &NodeId) -> NodeId {
        let mut out = [0u8; NODE_ID_SIZE_BYTES];
        for i in 0..NODE_ID_SIZE_BYTES {
            out[i] = self.0[i] ^ other.0[i];
        }
        NodeId(out)
    }

    /// Returns the n-th bit of this id, counted from the most significant
    /// bit (bit 0).
    pub fn nth_bit(&self, index: usize) -> Result<u8, OutOfRangeError> {
        if index >= NODE_ID_SIZE_BITS {
            return Err(OutOfRangeError {
                index,
                size: NODE_ID_SIZE_BITS,
            });
        }

        let byte = self.0[index / 8];
        let bit_in_byte = 7 - (index % 8);
        Ok((byte >> bit_in_byte) & 0x01)
    }

    /// Returns true iff the top `bitlen(prefix)` bits of this id equal
    /// `prefix`. `bitlen(0) := 1`.
    pub fn has_prefix(&self, prefix: u32) -> bool {
        let prefix_len = bit_length(prefix);

        for i in 0..prefix_len {
            let a_bit = (prefix >> (prefix_len - 1 - i)) & 1;
            let b_bit = match self.nth_bit(i as usize) {
                Ok(bit) => bit as u32,
                Err(_) => return false,
            };
            if a_bit != b_bit {
                return false;
            }
        }

        true
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

fn bit_length(value: u32) -> u32 {
    if value == 0 {
        1
    } else {
        32 - value.leading_zeros()
    }
}

/// Parses an arbitrary-length digit string in the given radix into a
/// big-endian 160-bit value, failing if it overflows.
fn digits_to_bytes(digits: &str, radix: u32) -> Option<[u8; NODE_ID_SIZE_BYTES]> {
    let mut out = [0u8; NODE_ID_SIZE_BYTES];

    for c in digits.chars() {
        let digit = c.to_digit(radix)?;

        // out = out * radix + digit, carried through the byte array from
        // the least-significant byte, with overflow detection.
        let mut carry = digit;
        for byte in out.iter_mut().rev() {
            let acc = (*byte as u32) * radix + carry;
            *byte = (acc & 0xff) as u8;
            carry = acc >> 8;
        }

        if carry != 0 {
            return None;
        }
    }

    Some(out)
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.to_hex())
    }
}

impl From<[u8; NODE_ID_SIZE_BYTES]> for NodeId {
    fn from(bytes: [u8; NODE_ID_SIZE_BYTES]) -> NodeId {
        NodeId(bytes)
    }
}

impl std::str::FromStr for NodeId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<NodeId, ParseError> {
        NodeId::parse(s)
    }
}

impl std::ops::BitXor for NodeId {
    type Output = NodeId;

    fn bitxor(self, rhs: NodeId) -> NodeId {
        self.xor(&rhs)
    }
}
