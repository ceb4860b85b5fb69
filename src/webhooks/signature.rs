//! GitHub webhook signature verification using HMAC-SHA256.
//!
//! GitHub signs webhook payloads using HMAC-SHA256 with a shared secret.
//! The signature is provided in the `X-Hub-Signature-256` header as `sha256=<hex>`.
//!
//! Verification runs against the exact raw body bytes (never a re-serialized
//! form) and is the first step in webhook processing; invalid signatures are
//! rejected before any parsing. An unconfigured secret fails closed: it never
//! means "skip verification".

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Parses a GitHub signature header (e.g., "sha256=abc123...") into raw bytes.
///
/// Returns `None` for malformed headers (missing prefix, invalid hex, etc.).
/// Never panics.
pub fn parse_signature_header(header: &str) -> Option<Vec<u8>> {
    // GitHub uses "sha256=" prefix
    let hex_sig = header.strip_prefix("sha256=")?;

    hex::decode(hex_sig).ok()
}

/// Computes the HMAC-SHA256 signature of a payload using the given secret.
///
/// This is useful for testing purposes (generating expected signatures).
pub fn compute_signature(payload: &[u8], secret: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

/// Formats a signature as a GitHub-style header value: `sha256=<hex>`.
pub fn format_signature_header(signature: &[u8]) -> String {
    format!("sha256={}", hex::encode(signature))
}

/// Verifies a GitHub webhook signature against the payload and secret.
///
/// Returns `true` if the signature is valid, `false` otherwise. Uses
/// constant-time comparison (via the HMAC library) to prevent timing attacks.
///
/// A `None` secret means the deployment never configured one; verification
/// fails closed in that case so unauthenticated payloads cannot slip through.
///
/// # Arguments
///
/// * `payload` - The raw webhook payload bytes
/// * `signature_header` - The value of the `X-Hub-Signature-256` header (e.g., "sha256=...")
/// * `secret` - The webhook secret configured in GitHub, if any
///
/// # Examples
///
/// ```
/// use taskboard::webhooks::{verify_signature, compute_signature, format_signature_header};
///
/// let payload = b"Hello, World!";
/// let secret = b"my-secret-key";
///
/// let sig = compute_signature(payload, secret);
/// let header = format_signature_header(&sig);
///
/// assert!(verify_signature(payload, &header, Some(secret)));
/// assert!(!verify_signature(payload, &header, Some(b"wrong-secret")));
/// // No configured secret: fail closed.
/// assert!(!verify_signature(payload, &header, None));
/// ```
pub fn verify_signature(payload: &[u8], signature_header: &str, secret: Option<&[u8]>) -> bool {
    let Some(secret) = secret else {
        return false;
    };

    let expected_signature = match parse_signature_header(signature_header) {
        Some(sig) => sig,
        None => return false,
    };

    let mut mac = match HmacSha256::new_from_slice(secret) {
        Ok(mac) => mac,
        Err(_) => return false,
    };
    mac.update(payload);

    // Constant-time comparison via the HMAC library
    mac.verify_slice(&expected_signature).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_signature_header_valid() {
        let result = parse_signature_header("sha256=1234abcd");
        assert_eq!(result, Some(vec![0x12, 0x34, 0xab, 0xcd]));
    }

    #[test]
    fn parse_signature_header_full_length() {
        // Full SHA256 output (64 hex chars = 32 bytes)
        let hex_sig = "a".repeat(64);
        let header = format!("sha256={}", hex_sig);
        let result = parse_signature_header(&header);
        assert!(result.is_some());
        assert_eq!(result.unwrap().len(), 32);
    }

    #[test]
    fn parse_signature_header_missing_prefix() {
        assert_eq!(parse_signature_header("1234abcd"), None);
    }

    #[test]
    fn parse_signature_header_wrong_algorithm() {
        assert_eq!(parse_signature_header("sha1=1234abcd"), None);
    }

    #[test]
    fn parse_signature_header_invalid_hex() {
        assert_eq!(parse_signature_header("sha256=xyz"), None);
    }

    /// Known test vector from GitHub's webhook documentation:
    /// <https://docs.github.com/en/webhooks/using-webhooks/validating-webhook-deliveries>
    #[test]
    fn github_documentation_example() {
        let payload = b"Hello, World!";
        let secret = b"It's a Secret to Everybody";

        let expected =
            "sha256=757107ea0eb2509fc211221cce984b8a37570b6d7586c22c46f4379c8b043e17";
        assert!(verify_signature(payload, expected, Some(secret)));
    }

    #[test]
    fn verify_signature_wrong_secret() {
        let payload = b"test payload";

        let sig = compute_signature(payload, b"correct-secret");
        let header = format_signature_header(&sig);

        assert!(verify_signature(payload, &header, Some(b"correct-secret")));
        assert!(!verify_signature(payload, &header, Some(b"wrong-secret")));
    }

    #[test]
    fn verify_signature_modified_payload() {
        let secret = b"secret";

        let sig = compute_signature(b"original payload", secret);
        let header = format_signature_header(&sig);

        assert!(verify_signature(b"original payload", &header, Some(secret)));
        assert!(!verify_signature(b"modified payload", &header, Some(secret)));
    }

    #[test]
    fn verify_signature_malformed_header_returns_false() {
        let payload = b"test";
        let secret: Option<&[u8]> = Some(b"secret");

        // Various malformed headers - should all return false, not panic
        assert!(!verify_signature(payload, "", secret));
        assert!(!verify_signature(payload, "sha256=", secret));
        assert!(!verify_signature(payload, "sha256=invalid", secret));
        assert!(!verify_signature(payload, "sha1=abc123", secret));
        assert!(!verify_signature(payload, "not-a-header", secret));
    }

    #[test]
    fn verify_signature_unset_secret_fails_closed() {
        let payload = b"test payload";

        // Even a signature that would verify under some secret must fail
        // when no secret is configured.
        let sig = compute_signature(payload, b"any-secret");
        let header = format_signature_header(&sig);

        assert!(!verify_signature(payload, &header, None));
    }

    proptest! {
        /// Property: verify(payload, sign(payload, secret), secret) == true
        #[test]
        fn prop_sign_verify_roundtrip(payload: Vec<u8>, secret: Vec<u8>) {
            let sig = compute_signature(&payload, &secret);
            let header = format_signature_header(&sig);
            prop_assert!(verify_signature(&payload, &header, Some(&secret)));
        }

        /// Property: signing with one secret and verifying with a different
        /// secret always fails.
        #[test]
        fn prop_wrong_secret_fails(payload: Vec<u8>, secret1: Vec<u8>, secret2: Vec<u8>) {
            prop_assume!(secret1 != secret2);

            let sig = compute_signature(&payload, &secret1);
            let header = format_signature_header(&sig);
            prop_assert!(!verify_signature(&payload, &header, Some(&secret2)));
        }

        /// Property: any modification to the payload causes verification to fail.
        #[test]
        fn prop_modified_payload_fails(
            original: Vec<u8>,
            modified: Vec<u8>,
            secret: Vec<u8>
        ) {
            prop_assume!(original != modified);

            let sig = compute_signature(&original, &secret);
            let header = format_signature_header(&sig);
            prop_assert!(!verify_signature(&modified, &header, Some(&secret)));
        }

        /// Property: parse(format(signature)) roundtrips
        #[test]
        fn prop_format_parse_roundtrip(signature: [u8; 32]) {
            let header = format_signature_header(&signature);
            let parsed = parse_signature_header(&header);
            prop_assert_eq!(parsed, Some(signature.to_vec()));
        }

        /// Property: an unset secret rejects everything.
        #[test]
        fn prop_unset_secret_rejects_everything(payload: Vec<u8>, header: String) {
            prop_assert!(!verify_signature(&payload, &header, None));
        }

        /// Property: malformed headers never cause panic
        #[test]
        fn prop_malformed_header_no_panic(header: String, payload: Vec<u8>, secret: Vec<u8>) {
            let _ = parse_signature_header(&header);
            let _ = verify_signature(&payload, &header, Some(&secret));
        }
    }
}
