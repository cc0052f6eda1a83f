pub mod storage;
pub mod types;

pub use storage::ErrorLogStorage;
pub use types::{ErrorLog, ErrorLogInput};
