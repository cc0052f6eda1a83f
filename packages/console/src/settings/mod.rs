pub mod storage;
pub mod types;

pub use storage::SettingsStorage;
pub use types::default_settings;
