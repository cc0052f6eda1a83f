// ABOUTME: Content-based MIME detection for uploads
// ABOUTME: Magic-byte sniffing first, UTF-8/extension heuristics for text formats

/// Maximum accepted upload size (50MB)
pub const MAX_UPLOAD_SIZE: usize = 50 * 1024 * 1024;

/// Content types an upload may carry. Anything else is refused.
pub const ALLOWED_UPLOAD_TYPES: &[&str] = &[
    "application/pdf",
    "application/zip",
    "application/x-zip-compressed",
    "text/plain",
    "text/csv",
    "application/json",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];

/// Determine the MIME type from file content, not the client-supplied header.
///
/// Binary formats are identified by magic bytes. Text formats have none, so
/// valid UTF-8 falls back to JSON detection and then the extension to pick
/// between `text/csv` and `text/plain`. Unidentifiable binary content comes
/// back as `application/octet-stream`, which is not in the allow-list.
pub fn sniff_mime(content: &[u8], original_name: &str) -> String {
    if let Some(kind) = infer::get(content) {
        return kind.mime_type().to_string();
    }

    if std::str::from_utf8(content).is_ok() {
        let trimmed = content
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .map(|i| &content[i..])
            .unwrap_or(content);
        if matches!(trimmed.first(), Some(b'{') | Some(b'['))
            && serde_json::from_slice::<serde_json::Value>(content).is_ok()
        {
            return "application/json".to_string();
        }
        if original_name.to_ascii_lowercase().ends_with(".csv") {
            return "text/csv".to_string();
        }
        return "text/plain".to_string();
    }

    "application/octet-stream".to_string()
}
