//! Best-record storage
//!
//! The only persisted value is one number under a fixed key. A missing or
//! unreadable value reads as 0.

use std::collections::HashMap;

/// Somewhere to keep the best record between sessions
pub trait RecordStore {
    /// Stored value for `key`, or 0 if absent/unreadable
    fn load(&self, key: &str) -> f64;
    /// Persist `value` under `key`. Failures are logged, not returned.
    fn save(&mut self, key: &str, value: f64);
}

/// Parse a stored record; anything that isn't a finite, non-negative number is 0
pub fn decode_record(raw: &str) -> f64 {
    serde_json::from_str::<f64>(raw.trim())
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}

pub fn encode_record(value: f64) -> String {
    value.to_string()
}

/// Process-local store (native runs and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a raw stored string
    pub fn with_raw(mut self, key: &str, raw: &str) -> Self {
        self.values.insert(key.to_string(), raw.to_string());
        self
    }
}

impl RecordStore for MemoryStore {
    fn load(&self, key: &str) -> f64 {
        self.values.get(key).map(|raw| decode_record(raw)).unwrap_or(0.0)
    }

    fn save(&mut self, key: &str, value: f64) {
        self.values.insert(key.to_string(), encode_record(value));
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl RecordStore for LocalStorageStore {
    fn load(&self, key: &str) -> f64 {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, best record starts at 0");
            return 0.0;
        };
        match storage.get_item(key) {
            Ok(Some(raw)) => {
                let value = decode_record(&raw);
                log::info!("Loaded best record {} = {}", key, value);
                value
            }
            _ => {
                log::info!("No best record under {}, starting fresh", key);
                0.0
            }
        }
    }

    fn save(&mut self, key: &str, value: f64) {
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(key, &encode_record(value)).is_err() {
                    log::warn!("Failed to save best record {}", key);
                } else {
                    log::info!("Best record saved ({} = {})", key, value);
                }
            }
            None => log::warn!("LocalStorage unavailable, best record not saved"),
        }
    }
}
