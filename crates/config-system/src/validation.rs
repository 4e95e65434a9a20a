//! Settings validation

use crate::{ChartSettings, ConfigError, Result};

/// Settings validator
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &ChartSettings) -> Result<()> {
        if settings.surface_id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "surface_id must not be empty".to_string(),
            ));
        }

        if !is_js_identifier(&settings.data_global) {
            return Err(ConfigError::Validation(format!(
                "data_global must be a JavaScript identifier, got {:?}",
                settings.data_global
            )));
        }

        if settings.label_format.trim().is_empty() {
            return Err(ConfigError::Validation(
                "label_format must not be empty".to_string(),
            ));
        }

        settings
            .utc_offset()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;

        if settings.cache_enabled && settings.cache_timeout_secs == 0 {
            log::warn!("Series cache enabled with a zero timeout; every request reloads");
        }

        Ok(())
    }
}

/// ASCII subset of a JS identifier: `[A-Za-z_$][A-Za-z0-9_$]*`
pub fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
