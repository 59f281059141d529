use {
    crate::{config::PERSISTENCE, domain::AnalysisSettings},
    eframe::Storage,
    serde_json::Value,
    std::collections::HashMap,
};

#[cfg(debug_assertions)]
use crate::config::DF;

#[cfg(not(target_arch = "wasm32"))]
use {
    anyhow::{Context, Result},
    std::{fs, path::PathBuf},
};

/// Load/save capability for the indicator settings record.
///
/// Implemented for every [`eframe::Storage`], so the browser's localStorage, eframe's native
/// file storage and the stores below all persist the same single JSON entry.
pub trait SettingsStore {
    /// Never fails: absent or malformed data yields defaults.
    fn load_settings(&self) -> AnalysisSettings;
    /// Best effort. Failures are logged, not returned.
    fn save_settings(&mut self, settings: &AnalysisSettings);
}

impl<S: Storage + ?Sized> SettingsStore for S {
    fn load_settings(&self) -> AnalysisSettings {
        let Some(text) = self.get_string(PERSISTENCE.settings.key) else {
            log::info!("No saved indicator settings, using defaults");
            return AnalysisSettings::default();
        };
        parse_settings_record(&text)
    }

    fn save_settings(&mut self, settings: &AnalysisSettings) {
        match serde_json::to_string(settings) {
            Ok(json) => {
                #[cfg(debug_assertions)]
                if DF.log_settings_store {
                    log::info!("💾 SAVE settings: {}", json);
                }
                self.set_string(PERSISTENCE.settings.key, json);
                self.flush();
            }
            Err(e) => log::error!("Failed to serialize settings: {}", e),
        }
    }
}

/// Parse a stored record, merging each indicator group over the defaults.
pub fn parse_settings_record(text: &str) -> AnalysisSettings {
    let record: Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(e) => {
            log::warn!("Failed to parse saved settings, using defaults: {}", e);
            return AnalysisSettings::default();
        }
    };
    if !record.is_object() {
        log::warn!("Saved settings are not a JSON object, using defaults");
        return AnalysisSettings::default();
    }

    let (settings, rejected) = AnalysisSettings::merge_over_defaults(&record);
    for field in &rejected {
        log::warn!("Discarding saved setting {} (not a positive number)", field);
    }
    settings
}

/// Volatile key-value store. Used headless and in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_owned(), value.into());
        store
    }
}

impl Storage for MemoryStorage {
    fn get_string(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_owned(), value);
    }

    fn flush(&mut self) {}
}

/// Key-value store backed by one JSON file (used by the `analyze` CLI).
///
/// Values that are themselves JSON are embedded as JSON so the file stays hand-editable:
/// `{"otc_analyst_settings": {"rsi": {...}, ...}}`.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    entries: serde_json::Map<String, Value>,
    dirty: bool,
}

#[cfg(not(target_arch = "wasm32"))]
impl JsonFileStorage {
    /// Open (or prepare to create) the file. A missing file is an empty store; an unreadable
    /// one is an error; a file that is not a JSON object is treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings file {}", path.display()))?;
            match serde_json::from_str::<Value>(&text) {
                Ok(Value::Object(map)) => map,
                Ok(_) | Err(_) => {
                    log::warn!(
                        "Settings file {} is not a JSON object, starting empty",
                        path.display()
                    );
                    serde_json::Map::new()
                }
            }
        } else {
            serde_json::Map::new()
        };

        Ok(Self {
            path,
            entries,
            dirty: false,
        })
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn write(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(&Value::Object(self.entries.clone()))?;
        fs::write(&self.path, text)
            .with_context(|| format!("Failed to write settings file {}", self.path.display()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Storage for JsonFileStorage {
    fn get_string(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    fn set_string(&mut self, key: &str, value: String) {
        let value = serde_json::from_str(&value).unwrap_or(Value::String(value));
        if self.entries.get(key) != Some(&value) {
            self.entries.insert(key.to_owned(), value);
            self.dirty = true;
        }
    }

    fn flush(&mut self) {
        if !self.dirty {
            return;
        }
        match self.write() {
            Ok(()) => self.dirty = false,
            Err(e) => log::error!("{:#}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BollingerSettings, EmaSettings, RsiSettings};

    const KEY: &str = PERSISTENCE.settings.key;

    #[test]
    fn empty_store_loads_defaults() {
        assert_eq!(MemoryStorage::new().load_settings(), AnalysisSettings::default());
    }

    #[test]
    fn partial_record_is_merged_per_group() {
        let store = MemoryStorage::with_entry(KEY, r#"{"rsi":{"period":10}}"#);

        assert_eq!(
            store.load_settings(),
            AnalysisSettings {
                rsi: RsiSettings {
                    period: 10,
                    overbought: 70,
                    oversold: 30,
                },
                bollinger: BollingerSettings {
                    period: 20,
                    std_dev: 2.0,
                },
                ema: EmaSettings {
                    period1: 20,
                    period2: 50,
                },
            }
        );
    }

    #[test]
    fn malformed_record_falls_back_silently() {
        let store = MemoryStorage::with_entry(KEY, "{not json");
        assert_eq!(store.load_settings(), AnalysisSettings::default());

        let store = MemoryStorage::with_entry(KEY, "42");
        assert_eq!(store.load_settings(), AnalysisSettings::default());
    }

    #[test]
    fn save_then_load_restores_user_values() {
        let mut settings = AnalysisSettings::default();
        settings.rsi = RsiSettings {
            period: 21,
            overbought: 75,
            oversold: 25,
        };
        settings.bollinger.std_dev = 2.5;

        let mut store = MemoryStorage::new();
        store.save_settings(&settings);

        let raw: Value = serde_json::from_str(&store.get_string(KEY).unwrap()).unwrap();
        let keys: Vec<&String> = raw.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 3);
        assert_eq!(raw["bollinger"]["stdDev"], 2.5);

        assert_eq!(store.load_settings(), settings);
    }

    #[test]
    fn works_through_a_trait_object() {
        let mut backing = MemoryStorage::new();
        let storage: &mut dyn Storage = &mut backing;
        let mut settings = AnalysisSettings::default();
        settings.ema.period1 = 9;

        storage.save_settings(&settings);
        assert_eq!(storage.load_settings().ema.period1, 9);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn json_file_storage_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = AnalysisSettings::default();
        settings.rsi.overbought = 80;

        let mut store = JsonFileStorage::open(&path).unwrap();
        assert_eq!(store.load_settings(), AnalysisSettings::default());
        store.save_settings(&settings);

        let text = fs::read_to_string(&path).unwrap();
        let on_disk: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(on_disk[KEY]["rsi"]["overbought"], 80);

        let reopened = JsonFileStorage::open(&path).unwrap();
        assert_eq!(reopened.load_settings(), settings);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn json_file_storage_tolerates_garbage_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "[1, 2").unwrap();

        let store = JsonFileStorage::open(&path).unwrap();
        assert_eq!(store.load_settings(), AnalysisSettings::default());
    }
}
