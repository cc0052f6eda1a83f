// ABOUTME: Default settings shape merged with persisted overrides at read time

use serde_json::{json, Map, Value};

/// The six fixed top-level sections with their default leaves.
///
/// A persisted row replaces its whole section; the defaults only survive for
/// sections never written.
pub fn default_settings() -> Map<String, Value> {
    let defaults = json!({
        "apiKeys": {
            "xai": "",
            "openai": "",
            "anthropic": "",
            "google": ""
        },
        "aiModels": {
            "defaultModel": "grok-4",
            "temperature": 0.7,
            "maxTokens": 4000
        },
        "database": {
            "host": "localhost",
            "username": "",
            "database": "ai_workforce"
        },
        "security": {
            "enableAuthentication": false,
            "sessionTimeout": 60,
            "rateLimiting": true
        },
        "notifications": {
            "emailNotifications": true,
            "taskUpdates": true,
            "systemAlerts": true
        },
        "uiTheme": {
            "colorScheme": "obsidian",
            "accentColor": "#8B5CF6",
            "sidebarStyle": "dark",
            "compactMode": false
        }
    });

    match defaults {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}
