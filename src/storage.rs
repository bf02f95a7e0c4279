use sinbound_core::KeyValueStore;
use web_sys as web;

/// `window.localStorage`; falls back to an in-memory map when storage is
/// unavailable (private mode, sandboxed frames).
pub struct LocalStorage {
    storage: Option<web::Storage>,
    fallback: Vec<(String, String)>,
}

impl LocalStorage {
    pub fn open() -> Self {
        let storage = web::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("[storage] localStorage unavailable, state will not persist");
        }
        Self {
            storage,
            fallback: Vec::new(),
        }
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        match &self.storage {
            Some(s) => s.get_item(key).ok().flatten(),
            None => self.fallback.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone()),
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        match &self.storage {
            Some(s) => {
                if let Err(e) = s.set_item(key, value) {
                    log::warn!("[storage] write {} failed: {:?}", key, e);
                }
            }
            None => match self.fallback.iter_mut().find(|(k, _)| k == key) {
                Some(entry) => entry.1 = value.to_string(),
                None => self.fallback.push((key.to_string(), value.to_string())),
            },
        }
    }
}
