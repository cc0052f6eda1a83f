pub mod storage;
pub mod types;

pub use storage::WorkgroupStorage;
pub use types::{Workgroup, WorkgroupCreateInput};
