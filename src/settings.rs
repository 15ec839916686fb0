use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::{
    APP_DIR_NAME, DEFAULT_CELL_NUM, DEFAULT_CELL_SIZE, DEFAULT_INTERVAL_MS, MAX_CELL_NUM,
    MIN_CELL_NUM, SETTINGS_FILE_NAME,
};

/// Failures while validating or persisting settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("settings could not be encoded: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Player-tunable game settings, persisted as one JSON object.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Drawn size of one cell in pixels.
    pub cell_size: u32,
    /// Board side length in cells.
    pub cell_num: u16,
    pub interval_milliseconds: u64,
    pub check_is_out: bool,
    pub check_is_colliding: bool,
    pub disable_timer: bool,
    pub show_debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            cell_num: DEFAULT_CELL_NUM,
            interval_milliseconds: DEFAULT_INTERVAL_MS,
            check_is_out: false,
            check_is_colliding: false,
            disable_timer: false,
            show_debug: false,
        }
    }
}

/// Settings repaired from an untrusted object, plus the keys that were replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedSettings {
    pub settings: Settings,
    pub replaced: Vec<&'static str>,
}

impl Settings {
    /// Repairs an arbitrary JSON value into settings.
    ///
    /// Non-objects count as an empty object. Each missing or unusable field
    /// takes its default; nothing here fails.
    #[must_use]
    pub fn fix(raw: &Value) -> FixedSettings {
        let empty = Map::new();
        let object = raw.as_object().unwrap_or(&empty);
        let defaults = Self::default();
        let mut replaced = Vec::new();

        let mut number = |key: &'static str, minimum: u64, maximum: u64, default: u64| {
            match object.get(key).and_then(parse_positive) {
                Some(value) if (minimum..=maximum).contains(&value) => value,
                _ => {
                    replaced.push(key);
                    default
                }
            }
        };

        let cell_size = number(
            "cellSize",
            1,
            u64::from(u32::MAX),
            u64::from(defaults.cell_size),
        );
        let cell_num = number(
            "cellNum",
            u64::from(MIN_CELL_NUM),
            u64::from(MAX_CELL_NUM),
            u64::from(defaults.cell_num),
        );
        let interval_milliseconds =
            number("intervalMilliseconds", 1, u64::MAX, defaults.interval_milliseconds);

        let mut flag = |key: &'static str, default: bool| match object.get(key) {
            Some(Value::Bool(value)) => *value,
            _ => {
                replaced.push(key);
                default
            }
        };

        let check_is_out = flag("checkIsOut", defaults.check_is_out);
        let check_is_colliding = flag("checkIsColliding", defaults.check_is_colliding);
        let disable_timer = flag("disableTimer", defaults.disable_timer);
        let show_debug = flag("showDebug", defaults.show_debug);

        let settings = Self {
            cell_size: u32::try_from(cell_size).unwrap_or(defaults.cell_size),
            cell_num: u16::try_from(cell_num).unwrap_or(defaults.cell_num),
            interval_milliseconds,
            check_is_out,
            check_is_colliding,
            disable_timer,
            show_debug,
        };

        FixedSettings { settings, replaced }
    }

    /// Parses and repairs a stored settings document. Malformed JSON counts as empty.
    #[must_use]
    pub fn from_json_str(raw: &str) -> FixedSettings {
        let value = serde_json::from_str::<Value>(raw).unwrap_or_else(|error| {
            debug!("stored settings are not valid JSON: {error}");
            Value::Null
        });
        Self::fix(&value)
    }

    /// Strict check for user-supplied values before they are persisted.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.cell_size == 0 {
            return Err(SettingsError::Invalid {
                field: "cellSize",
                reason: "must be a positive integer",
            });
        }

        if !(MIN_CELL_NUM..=MAX_CELL_NUM).contains(&self.cell_num) {
            return Err(SettingsError::Invalid {
                field: "cellNum",
                reason: "must be between 2 and 255",
            });
        }

        if self.interval_milliseconds == 0 {
            return Err(SettingsError::Invalid {
                field: "intervalMilliseconds",
                reason: "must be a positive integer",
            });
        }

        Ok(())
    }
}

/// Reads a positive integer the way a lenient form parser would: JSON
/// numbers are truncated, strings contribute their leading digits.
fn parse_positive(value: &Value) -> Option<u64> {
    let parsed = match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|f| *f >= 1.0).map(|f| f.trunc() as u64)),
        Value::String(text) => {
            let digits: String = text
                .trim_start()
                .chars()
                .take_while(char::is_ascii_digit)
                .collect();
            digits.parse().ok()
        }
        _ => None,
    };

    parsed.filter(|value| *value > 0)
}

/// Returns the platform-correct settings file path.
#[must_use]
pub fn settings_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    base
}

/// Loads and repairs settings from `path`.
///
/// A missing file yields defaults silently; unreadable or malformed files are
/// logged and also yield defaults.
#[must_use]
pub fn load_settings(path: &Path) -> FixedSettings {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            debug!("no settings at {}, using defaults", path.display());
            String::new()
        }
        Err(error) => {
            warn!("failed to read settings at {}: {error}", path.display());
            String::new()
        }
    };

    let fixed = Settings::from_json_str(&raw);
    if !fixed.replaced.is_empty() {
        warn!("settings fields replaced with defaults: {}", fixed.replaced.join(", "));
    }
    fixed
}

/// Saves settings to `path`, creating parent directories when needed.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    Ok(())
}

/// Overwrites stored settings with defaults and returns them.
pub fn reset_settings(path: &Path) -> Result<Settings, SettingsError> {
    let settings = Settings::default();
    save_settings(path, &settings)?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use serde_json::json;

    use super::{Settings, SettingsError, load_settings, reset_settings, save_settings};

    #[test]
    fn complete_object_is_kept_as_is() {
        let raw = json!({
            "cellSize": 30,
            "cellNum": 8,
            "intervalMilliseconds": 200,
            "checkIsOut": true,
            "checkIsColliding": true,
            "disableTimer": false,
            "showDebug": true,
        });

        let fixed = Settings::fix(&raw);

        assert!(fixed.replaced.is_empty());
        assert_eq!(fixed.settings.cell_num, 8);
        assert_eq!(fixed.settings.cell_size, 30);
        assert!(fixed.settings.check_is_out);
        assert!(fixed.settings.show_debug);
    }

    #[test]
    fn invalid_fields_fall_back_to_defaults() {
        let raw = json!({
            "cellSize": -4,
            "cellNum": 1,
            "intervalMilliseconds": "fast",
            "checkIsOut": "yes",
        });

        let fixed = Settings::fix(&raw);
        let defaults = Settings::default();

        assert_eq!(fixed.settings, defaults);
        assert!(fixed.replaced.contains(&"cellSize"));
        assert!(fixed.replaced.contains(&"cellNum"));
        assert!(fixed.replaced.contains(&"intervalMilliseconds"));
        assert!(fixed.replaced.contains(&"checkIsOut"));
    }

    #[test]
    fn numeric_strings_use_leading_digits() {
        let raw = json!({ "cellNum": "12", "cellSize": "25px", "intervalMilliseconds": 180.7 });

        let fixed = Settings::fix(&raw);

        assert_eq!(fixed.settings.cell_num, 12);
        assert_eq!(fixed.settings.cell_size, 25);
        assert_eq!(fixed.settings.interval_milliseconds, 180);
    }

    #[test]
    fn malformed_json_is_treated_as_empty() {
        let fixed = Settings::from_json_str("not-json");

        assert_eq!(fixed.settings, Settings::default());
        assert_eq!(fixed.replaced.len(), 7);

        let fixed = Settings::from_json_str("[1, 2, 3]");
        assert_eq!(fixed.settings, Settings::default());
    }

    #[test]
    fn validate_rejects_tiny_board() {
        let settings = Settings {
            cell_num: 1,
            ..Settings::default()
        };

        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Invalid {
                field: "cellNum",
                ..
            })
        ));
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn settings_survive_save_and_load() {
        let path = unique_test_path("save_load");
        let settings = Settings {
            cell_num: 9,
            check_is_colliding: true,
            ..Settings::default()
        };

        save_settings(&path, &settings).expect("settings save should succeed");
        let loaded = load_settings(&path);

        assert_eq!(loaded.settings, settings);
        assert!(loaded.replaced.is_empty());
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = unique_test_path("missing");

        let loaded = load_settings(&path);

        assert_eq!(loaded.settings, Settings::default());
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let path = unique_test_path("malformed");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, "{\"cellNum\": ").expect("test file write should succeed");

        assert_eq!(load_settings(&path).settings, Settings::default());
        cleanup_test_path(&path);
    }

    #[test]
    fn reset_writes_defaults() {
        let path = unique_test_path("reset");
        save_settings(
            &path,
            &Settings {
                cell_num: 4,
                ..Settings::default()
            },
        )
        .expect("settings save should succeed");

        let settings = reset_settings(&path).expect("reset should succeed");

        assert_eq!(settings, Settings::default());
        assert_eq!(load_settings(&path).settings, Settings::default());
        cleanup_test_path(&path);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("grid-snake-settings-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
