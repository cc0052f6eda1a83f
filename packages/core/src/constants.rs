use std::env;
use std::path::PathBuf;

/// Model assigned to newly created agents when none is given
pub const DEFAULT_AGENT_MODEL: &str = "gpt-4";

/// Status assigned to newly created agents when none is given
pub const DEFAULT_AGENT_STATUS: &str = "offline";

/// Get the path to the Workforce data directory (~/.workforce)
pub fn workforce_dir() -> PathBuf {
    // First try HOME environment variable (useful for tests)
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".workforce")
    } else {
        // Fall back to dirs crate for normal usage
        dirs::home_dir()
            .expect("Unable to get home directory")
            .join(".workforce")
    }
}
