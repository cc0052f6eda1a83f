pub mod storage;
pub mod types;

pub use storage::TaskStorage;
pub use types::{Task, TaskCreateInput};
