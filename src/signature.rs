//! Tripay HMAC signatures.
//!
//! Two schemes, both HMAC-SHA256 keyed with the merchant private key:
//!
//! * Callback verification: digest of the raw request body, delivered
//!   hex-encoded in the `X-Callback-Signature` header.
//! * Transaction creation: digest of `{merchant_code}{merchant_ref}{amount}`,
//!   sent alongside the create request so the provider can check us.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Hex signature over a raw callback body.
pub fn sign_callback(private_key: &str, body: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(private_key.as_bytes()).expect("hmac accepts any key length");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Verify a claimed callback signature against the raw body.
///
/// Empty bodies and malformed or truncated hex are rejected, never a panic.
/// The comparison runs in constant time via `Mac::verify_slice`.
pub fn verify_callback(private_key: &str, body: &[u8], claimed_hex: &str) -> bool {
    if body.is_empty() || claimed_hex.is_empty() {
        return false;
    }

    let claimed = match hex::decode(claimed_hex) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };

    let mut mac = match HmacSha256::new_from_slice(private_key.as_bytes()) {
        Ok(m) => m,
        Err(_) => return false,
    };
    mac.update(body);
    mac.verify_slice(&claimed).is_ok()
}

/// Signature for `transaction/create`: HMAC over merchant code + merchant
/// ref + amount, hex-encoded.
pub fn sign_transaction(
    private_key: &str,
    merchant_code: &str,
    merchant_ref: &str,
    amount: i64,
) -> String {
    let mut mac =
        HmacSha256::new_from_slice(private_key.as_bytes()).expect("hmac accepts any key length");
    mac.update(merchant_code.as_bytes());
    mac.update(merchant_ref.as_bytes());
    mac.update(amount.to_string().as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
