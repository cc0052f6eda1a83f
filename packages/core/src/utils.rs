// ABOUTME: Shared utility functions for the AI Workforce console
// ABOUTME: Random token generation and upload naming helpers

use std::time::{SystemTime, UNIX_EPOCH};

use rand::RngCore;

/// Generate a lowercase hex token from `bytes` random bytes
pub fn generate_hex_token(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    rand::thread_rng().fill_bytes(&mut buf);
    hex::encode(buf)
}

/// Generate a collision-resistant filename for an uploaded file.
///
/// Shape: `<16-hex-token>_<unix-seconds>.<ext>` (extension omitted when the
/// original name has none).
pub fn generate_upload_name(original_name: &str) -> String {
    let token = generate_hex_token(8);
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    match original_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
            format!("{}_{}.{}", token, timestamp, ext)
        }
        _ => format!("{}_{}", token, timestamp),
    }
}
