//! Lowercase hex encoding shared by the fixed-width byte newtypes.

use crate::error::ValidationError;

/// Encode bytes as lowercase hex without a prefix.
pub(crate) fn encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Decode a hex string of exactly `N` bytes. An optional `0x`/`0X` prefix
/// and surrounding whitespace are accepted.
pub(crate) fn decode_fixed<const N: usize>(
    input: &str,
    what: &'static str,
) -> Result<[u8; N], ValidationError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.len() != N * 2 {
        return Err(ValidationError::InvalidLength {
            what,
            expected: N * 2,
            actual: digits.len(),
        });
    }

    if let Some(pos) = digits.bytes().position(|b| !b.is_ascii_hexdigit()) {
        return Err(ValidationError::InvalidHex {
            what,
            reason: format!("non-hex character at position {pos}"),
        });
    }

    let mut out = [0u8; N];
    for (i, chunk) in digits.as_bytes().chunks(2).enumerate() {
        out[i] = (nibble(chunk[0]) << 4) | nibble(chunk[1]);
    }
    Ok(out)
}

fn nibble(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        _ => b - b'A' + 10,
    }
}
