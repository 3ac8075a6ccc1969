//! PEM-style base64 armor for on-disk certificates and keys.
//!
//! A block looks like:
//!
//! ```text
//! -----BEGIN QUILL CERTIFICATE-----
//! <base64, wrapped at 64 columns>
//! -----END QUILL CERTIFICATE-----
//! ```
//!
//! Files may hold several blocks back to back (CA bundles). Parsing is
//! strict about the begin/end labels but tolerant of surrounding blank
//! lines.

use crate::IdentityError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

/// Armor label for certificates.
pub const CERTIFICATE_TAG: &str = "QUILL CERTIFICATE";

/// Armor label for private keys.
pub const PRIVATE_KEY_TAG: &str = "QUILL PRIVATE KEY";

const LINE_WIDTH: usize = 64;

/// Encode a binary payload as a single armored block.
#[must_use]
pub fn encode(tag: &str, payload: &[u8]) -> String {
    let encoded = BASE64.encode(payload);

    let mut out = String::with_capacity(encoded.len() + tag.len() * 2 + 40);
    out.push_str("-----BEGIN ");
    out.push_str(tag);
    out.push_str("-----\n");
    for chunk in encoded.as_bytes().chunks(LINE_WIDTH) {
        // chunks of an ASCII string are valid UTF-8
        out.push_str(std::str::from_utf8(chunk).unwrap_or_default());
        out.push('\n');
    }
    out.push_str("-----END ");
    out.push_str(tag);
    out.push_str("-----\n");
    out
}

/// Decode every armored block with the given tag from `text`, in order.
///
/// # Errors
///
/// Returns [`IdentityError::Armor`] if no block carries the tag, a block is
/// unterminated, or its body is not valid base64.
pub fn decode_all(tag: &str, text: &str) -> Result<Vec<Vec<u8>>, IdentityError> {
    let begin = format!("-----BEGIN {tag}-----");
    let end = format!("-----END {tag}-----");

    let mut blocks = Vec::new();
    let mut body: Option<String> = None;

    for line in text.lines() {
        let line = line.trim();
        if line == begin {
            if body.is_some() {
                return Err(IdentityError::Armor(format!("nested BEGIN for {tag}")));
            }
            body = Some(String::new());
        } else if line == end {
            let collected = body
                .take()
                .ok_or_else(|| IdentityError::Armor(format!("END without BEGIN for {tag}")))?;
            let payload = BASE64
                .decode(collected)
                .map_err(|e| IdentityError::Armor(format!("base64: {e}")))?;
            blocks.push(payload);
        } else if let Some(ref mut collected) = body {
            collected.push_str(line);
        }
    }

    if body.is_some() {
        return Err(IdentityError::Armor(format!("unterminated block for {tag}")));
    }
    if blocks.is_empty() {
        return Err(IdentityError::Armor(format!("no {tag} block found")));
    }
    Ok(blocks)
}

/// Decode exactly one armored block with the given tag.
///
/// # Errors
///
/// Returns [`IdentityError::Armor`] on missing, malformed, or duplicate
/// blocks.
pub fn decode_one(tag: &str, text: &str) -> Result<Vec<u8>, IdentityError> {
    let mut blocks = decode_all(tag, text)?;
    if blocks.len() != 1 {
        return Err(IdentityError::Armor(format!(
            "expected one {tag} block, found {}",
            blocks.len()
        )));
    }
    Ok(blocks.remove(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_roundtrip() {
        let payload = b"certificate bytes go here".to_vec();
        let armored = encode(CERTIFICATE_TAG, &payload);

        assert!(armored.starts_with("-----BEGIN QUILL CERTIFICATE-----"));
        assert!(armored.trim_end().ends_with("-----END QUILL CERTIFICATE-----"));

        let decoded = decode_one(CERTIFICATE_TAG, &armored).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_long_payload_wraps_lines() {
        let payload = vec![0xABu8; 500];
        let armored = encode(PRIVATE_KEY_TAG, &payload);

        for line in armored.lines() {
            assert!(line.len() <= 64 || line.starts_with("-----"));
        }
        assert_eq!(decode_one(PRIVATE_KEY_TAG, &armored).unwrap(), payload);
    }

    #[test]
    fn test_multiple_blocks() {
        let a = encode(CERTIFICATE_TAG, b"first");
        let b = encode(CERTIFICATE_TAG, b"second");
        let bundle = format!("{a}\n{b}");

        let blocks = decode_all(CERTIFICATE_TAG, &bundle).unwrap();
        assert_eq!(blocks, vec![b"first".to_vec(), b"second".to_vec()]);
    }

    #[test]
    fn test_wrong_tag_rejected() {
        let armored = encode(CERTIFICATE_TAG, b"payload");
        assert!(decode_one(PRIVATE_KEY_TAG, &armored).is_err());
    }

    #[test]
    fn test_unterminated_block_rejected() {
        let text = "-----BEGIN QUILL CERTIFICATE-----\nAAAA\n";
        assert!(decode_all(CERTIFICATE_TAG, text).is_err());
    }

    #[test]
    fn test_bad_base64_rejected() {
        let text =
            "-----BEGIN QUILL CERTIFICATE-----\n!!!not base64!!!\n-----END QUILL CERTIFICATE-----\n";
        assert!(decode_all(CERTIFICATE_TAG, text).is_err());
    }

    #[test]
    fn test_duplicate_block_rejected_by_decode_one() {
        let a = encode(CERTIFICATE_TAG, b"first");
        let bundle = format!("{a}{a}");
        assert!(decode_one(CERTIFICATE_TAG, &bundle).is_err());
    }
}
