// Settings Engine
// Read-only access to the user's settings key-value store.
// Settings live in a JSON file at the platform-specific config path and are
// loaded lazily, without blocking, the first time any key is requested.

use std::path::Path;

use serde_json::{Map, Value};
use tokio::sync::OnceCell;

use crate::platform;
use crate::types::errors::SettingsError;

/// Key holding the start page preference.
pub const START_PAGE_KEY: &str = "startPage";
/// `startPage` value meaning "always restore the previous session".
pub const START_PAGE_PREVIOUS: &str = "previous";

/// Trait defining the settings store interface.
#[allow(async_fn_in_trait)]
pub trait SettingsEngineTrait {
    /// Looks up a value by key. Dot-separated keys walk nested objects.
    async fn get(&self, key: &str) -> Option<Value>;
    fn get_config_path(&self) -> &str;
}

/// Settings store backed by a JSON file on disk.
pub struct SettingsEngine {
    config_path: String,
    values: OnceCell<Value>,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise, uses the platform-specific config directory with `settings.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = match path_override {
            Some(p) => p,
            None => platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .to_string(),
        };

        Self {
            config_path,
            values: OnceCell::new(),
        }
    }

    /// Creates an engine over already-known values; the file is never read.
    pub fn with_values(values: Map<String, Value>) -> Self {
        Self {
            config_path: String::new(),
            values: OnceCell::new_with(Some(Value::Object(values))),
        }
    }

    /// Reads and parses the settings file.
    ///
    /// A missing file yields an empty object; a malformed one is an error.
    pub async fn load(&self) -> Result<Value, SettingsError> {
        let path = Path::new(&self.config_path);

        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Value::Object(Map::new()));
            }
            Err(e) => {
                return Err(SettingsError::IoError(format!(
                    "Failed to read config file: {}",
                    e
                )))
            }
        };

        let value: Value = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;

        if value.is_object() {
            Ok(value)
        } else {
            Err(SettingsError::SerializationError(
                "Config file root must be an object".to_string(),
            ))
        }
    }

    fn lookup<'a>(root: &'a Value, key: &str) -> Option<&'a Value> {
        if key.is_empty() {
            return None;
        }
        if let Some(direct) = root.get(key) {
            return Some(direct);
        }
        key.split('.').try_fold(root, |current, part| current.get(part))
    }
}

impl SettingsEngineTrait for SettingsEngine {
    async fn get(&self, key: &str) -> Option<Value> {
        let root = self
            .values
            .get_or_init(|| async {
                match self.load().await {
                    Ok(value) => value,
                    Err(e) => {
                        log::warn!("Using empty settings: {}", e);
                        Value::Object(Map::new())
                    }
                }
            })
            .await;

        Self::lookup(root, key).cloned()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
