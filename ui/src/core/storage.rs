//! Local persistence for the connected athlete's identity.
//!
//! Views never reach for `localStorage` (or the desktop data dir) directly;
//! they receive a [`KeyValueStore`] through context so tests can swap in
//! [`MemoryStore`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub const KEY_ATHLETE_NAME: &str = "athleteName";
pub const KEY_ATHLETE_IMAGE: &str = "athleteImage";
pub const KEY_ATHLETE_ID: &str = "athleteId";
pub const KEY_STRAVA_ID: &str = "stravaId";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage write failed: {0}")]
    Write(String),
}

/// String key/value persistence. Last writer wins; there is no locking.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Store handle shared through Dioxus context.
#[derive(Clone)]
pub struct SharedStore(pub Rc<dyn KeyValueStore>);

impl PartialEq for SharedStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl SharedStore {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self(Rc::new(store))
    }

    /// Store backing the current platform, falling back to memory when the
    /// platform one cannot be opened.
    pub fn platform_default() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            match BrowserStore::open() {
                Ok(store) => Self::new(store),
                Err(err) => {
                    tracing::warn!(%err, "localStorage unavailable; identity will not persist");
                    Self::new(MemoryStore::default())
                }
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            match FileStore::in_data_dir() {
                Ok(store) => Self::new(store),
                Err(err) => {
                    tracing::warn!(%err, "data dir unavailable; identity will not persist");
                    Self::new(MemoryStore::default())
                }
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub struct BrowserStore {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl BrowserStore {
    pub fn open() -> Result<Self, StorageError> {
        let storage = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("window unavailable".into()))?
            .local_storage()
            .map_err(|_| StorageError::Unavailable("localStorage blocked".into()))?
            .ok_or_else(|| StorageError::Unavailable("localStorage missing".into()))?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|err| StorageError::Write(format!("{err:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|err| StorageError::Write(format!("{err:?}")))
    }
}

/// JSON object on disk, re-read on every access.
#[cfg(not(target_arch = "wasm32"))]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_data_dir() -> Result<Self, StorageError> {
        let dirs = directories::ProjectDirs::from("com", "StravaRoundup", "Strava Roundup")
            .ok_or_else(|| StorageError::Unavailable("no home directory".into()))?;
        Ok(Self::new(dirs.data_dir().join("identity.json")))
    }

    fn load(&self) -> HashMap<String, String> {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| StorageError::Write(err.to_string()))?;
        }
        let json =
            serde_json::to_string_pretty(entries).map_err(|err| StorageError::Write(err.to_string()))?;
        std::fs::write(&self.path, json).map_err(|err| StorageError::Write(err.to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.load().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.load();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.load();
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }
}

/// Who is connected, as cached after the OAuth callback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AthleteIdentity {
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub athlete_id: Option<String>,
    pub strava_id: Option<String>,
}

impl AthleteIdentity {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let read = |key: &str| store.get(key).filter(|value| !value.trim().is_empty());
        Self {
            name: read(KEY_ATHLETE_NAME),
            image_url: read(KEY_ATHLETE_IMAGE),
            athlete_id: read(KEY_ATHLETE_ID),
            strava_id: read(KEY_STRAVA_ID),
        }
    }

    /// Write every present field; absent fields leave the stored value alone.
    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        let fields = [
            (KEY_ATHLETE_NAME, &self.name),
            (KEY_ATHLETE_IMAGE, &self.image_url),
            (KEY_ATHLETE_ID, &self.athlete_id),
            (KEY_STRAVA_ID, &self.strava_id),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                store.set(key, value)?;
            }
        }
        Ok(())
    }

    pub fn clear(store: &dyn KeyValueStore) -> Result<(), StorageError> {
        for key in [KEY_ATHLETE_NAME, KEY_ATHLETE_IMAGE, KEY_ATHLETE_ID, KEY_STRAVA_ID] {
            store.remove(key)?;
        }
        Ok(())
    }

    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| crate::t!("athlete-fallback-name"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AthleteIdentity {
        AthleteIdentity {
            name: Some("Ana López".into()),
            image_url: Some("https://cdn.example/ana.jpg".into()),
            athlete_id: Some("12".into()),
            strava_id: Some("998877".into()),
        }
    }

    #[test]
    fn identity_round_trips_through_memory_store() {
        let store = MemoryStore::default();
        sample().save(&store).unwrap();
        assert_eq!(store.get("athleteId").as_deref(), Some("12"));
        assert_eq!(AthleteIdentity::load(&store), sample());
    }

    #[test]
    fn blank_values_read_as_absent() {
        let store = MemoryStore::default();
        store.set(KEY_ATHLETE_ID, "  ").unwrap();
        assert_eq!(AthleteIdentity::load(&store).athlete_id, None);
    }

    #[test]
    fn clear_removes_every_key() {
        let store = MemoryStore::default();
        sample().save(&store).unwrap();
        AthleteIdentity::clear(&store).unwrap();
        assert_eq!(AthleteIdentity::load(&store), AthleteIdentity::default());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn file_store_persists_between_handles() {
        let path = std::env::temp_dir().join(format!(
            "roundup-identity-{}-{}.json",
            std::process::id(),
            crate::core::platform::now_epoch_ms()
        ));
        sample().save(&FileStore::new(&path)).unwrap();
        let reopened = FileStore::new(&path);
        assert_eq!(AthleteIdentity::load(&reopened), sample());
        reopened.remove(KEY_ATHLETE_IMAGE).unwrap();
        assert_eq!(FileStore::new(&path).get(KEY_ATHLETE_IMAGE), None);
        let _ = std::fs::remove_file(&path);
    }
}
