// ABOUTME: Core constants and utilities for the AI Workforce console
// ABOUTME: Foundational package shared by the domain and server crates

pub mod constants;
pub mod utils;

// Re-export constants
pub use constants::{workforce_dir, DEFAULT_AGENT_MODEL, DEFAULT_AGENT_STATUS};

// Re-export utilities
pub use utils::{generate_hex_token, generate_upload_name};
