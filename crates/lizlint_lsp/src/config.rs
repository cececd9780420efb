//! Configuration management for LSP server.

use tracing::{error, info};

use lizlint_core::LizlintConfig;

use crate::state::BackendState;

/// Settings section the server reads from the client.
pub const SETTINGS_SECTION: &str = "lizard";

/// Reloads configuration from the workspace root.
///
/// Returns true if a configuration file was found and applied.
pub fn reload_config(state: &BackendState) -> bool {
    let Some(path) = state.workspace_root() else {
        return false;
    };

    let Some(config_path) = LizlintConfig::discover(&path) else {
        return false;
    };

    info!("Found config file: {}", config_path.display());
    match LizlintConfig::from_file(&config_path) {
        Ok(config) => {
            info!("Loaded configuration from workspace");
            state.set_config(config);
            true
        }
        Err(e) => {
            error!("Failed to load config: {}", e);
            false
        }
    }
}

/// Applies the `lizard` section of client settings.
///
/// Keys missing from `settings` keep the values of the workspace
/// configuration file, if any.
pub fn apply_settings(state: &BackendState, settings: &serde_json::Value) -> bool {
    let section = settings.get(SETTINGS_SECTION).unwrap_or(settings);
    let Some(overrides) = section.as_object() else {
        return false;
    };

    let current = state.config();
    let mut merged = match serde_json::to_value(&current) {
        Ok(serde_json::Value::Object(map)) => map,
        _ => serde_json::Map::new(),
    };
    for (key, value) in overrides {
        if !value.is_null() {
            merged.insert(key.clone(), value.clone());
        }
    }

    match LizlintConfig::from_value(serde_json::Value::Object(merged)) {
        Ok(mut config) => {
            config.base_dir = current.base_dir.or_else(|| state.workspace_root());
            info!("Applied client settings");
            state.set_config(config);
            true
        }
        Err(e) => {
            error!("Ignoring invalid client settings: {}", e);
            false
        }
    }
}
