use crate::error::InstallError;
use md5::{Digest, Md5};

pub fn md5_hex(data: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Exact, case-sensitive comparison against the expected hex digest.
pub fn verify_md5(data: &[u8], expected: &str) -> Result<(), InstallError> {
    let actual = md5_hex(data);
    if actual != expected {
        return Err(InstallError::ChecksumMismatch {
            expected: expected.to_string(),
            actual,
        });
    }
    tracing::info!("valid checksum");
    Ok(())
}
