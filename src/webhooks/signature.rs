//! GitHub webhook signature verification using HMAC-SHA256.
//!
//! GitHub signs webhook payloads using HMAC-SHA256 with the shared secret
//! configured on the App. The signature arrives in the `X-Hub-Signature-256`
//! header as `sha256=<hex>`. Verification happens before the body is parsed.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Prefix GitHub puts in front of the hex digest.
const SIGNATURE_PREFIX: &str = "sha256=";

/// Parses a signature header (e.g., "sha256=abc123...") into raw digest bytes.
///
/// Returns `None` for malformed headers (missing prefix, invalid hex). GitHub
/// always sends lowercase hex, so uppercase digits are rejected as malformed.
///
/// # Examples
///
/// ```
/// use git_tion::webhooks::parse_signature_header;
///
/// assert!(parse_signature_header("sha256=abcd1234").is_some());
/// assert!(parse_signature_header("abcd1234").is_none());
/// assert!(parse_signature_header("sha1=abcd1234").is_none());
/// assert!(parse_signature_header("sha256=xyz").is_none());
/// assert!(parse_signature_header("sha256=ABCD1234").is_none());
/// ```
pub fn parse_signature_header(header: &str) -> Option<Vec<u8>> {
    let hex_sig = header.strip_prefix(SIGNATURE_PREFIX)?;
    if hex_sig.bytes().any(|b| b.is_ascii_uppercase()) {
        return None;
    }
    hex::decode(hex_sig).ok()
}

/// Computes the HMAC-SHA256 digest of a payload.
///
/// Used by tests and by anything that needs to sign a delivery the way GitHub does.
pub fn compute_signature(payload: &[u8], secret: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

/// Formats a digest as an `X-Hub-Signature-256` header value.
pub fn format_signature_header(signature: &[u8]) -> String {
    format!("{}{}", SIGNATURE_PREFIX, hex::encode(signature))
}

/// Verifies a delivery's signature header against the raw body and secret.
///
/// Fails closed: an absent header, a malformed header and a mismatching digest
/// all yield `false`. The digest comparison is constant-time (delegated to
/// `Mac::verify_slice`).
///
/// # Examples
///
/// ```
/// use git_tion::webhooks::{compute_signature, format_signature_header, verify_signature};
///
/// let payload = br#"{"action":"created"}"#;
/// let secret = b"my-secret-key";
/// let header = format_signature_header(&compute_signature(payload, secret));
///
/// assert!(verify_signature(payload, Some(&header), secret));
/// assert!(!verify_signature(payload, Some(&header), b"wrong-secret"));
/// assert!(!verify_signature(payload, None, secret));
/// ```
pub fn verify_signature(payload: &[u8], signature_header: Option<&str>, secret: &[u8]) -> bool {
    let Some(header) = signature_header else {
        return false;
    };

    let Some(expected_signature) = parse_signature_header(header) else {
        return false;
    };

    let mut mac = match HmacSha256::new_from_slice(secret) {
        Ok(mac) => mac,
        Err(_) => return false,
    };
    mac.update(payload);

    mac.verify_slice(&expected_signature).is_ok()
}
