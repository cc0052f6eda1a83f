pub mod password;
pub mod storage;
pub mod types;

pub use storage::AuthStorage;
pub use types::{LoginInput, LoginOutcome, SessionInfo, UserSummary};
