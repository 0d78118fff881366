use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a violation.
///
/// Identity fields:
/// - req_id
/// - msg
pub fn fingerprint_for_violation(req_id: &str, msg: &str) -> String {
    let canonical = [req_id, msg].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
