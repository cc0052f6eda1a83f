pub mod sniff;
pub mod storage;
pub mod types;

pub use sniff::{sniff_mime, ALLOWED_UPLOAD_TYPES, MAX_UPLOAD_SIZE};
pub use storage::FileStorage;
pub use types::{AgentFile, AgentFileCreateInput, UploadRecord, UploadedFileMeta};
