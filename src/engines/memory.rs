use super::ShortenEngine;
use super::DEFAULT_MAX_ATTEMPTS;
use crate::keygen::KeySource;
use crate::keygen::RandomKeys;
use crate::Result;
use crate::ShortyError;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

#[derive(Default)]
struct Mappings {
    by_key: HashMap<String, String>,
    by_value: HashMap<String, String>,
}

/// In-memory store. Clones share the same mappings.
#[derive(Clone)]
pub struct MemoryStore {
    mappings: Arc<Mutex<Mappings>>,
    keys: Arc<dyn KeySource>,
    max_attempts: u32,
}

impl MemoryStore {
    /// Create an empty store drawing random keys.
    pub fn new() -> Self {
        Self::with_key_source(RandomKeys)
    }

    /// Create an empty store drawing candidate keys from `keys`.
    pub fn with_key_source(keys: impl KeySource + 'static) -> Self {
        Self {
            mappings: Arc::new(Mutex::new(Mappings::default())),
            keys: Arc::new(keys),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Give up on a new value after `max_attempts` occupied candidates.
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn len(&self) -> usize {
        self.lock().by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Mappings> {
        // The maps are only written after every fallible step, so a poisoned
        // lock still guards consistent state.
        self.mappings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ShortenEngine for MemoryStore {
    fn shorten(&self, value: String) -> Result<String> {
        let mut guard = self.lock();
        let mappings = &mut *guard;
        if let Some(key) = mappings.by_value.get(&value) {
            return Ok(key.clone());
        }

        for _ in 0..self.max_attempts {
            let candidate = self.keys.next_key();
            if let Entry::Vacant(entry) = mappings.by_key.entry(candidate) {
                let key = entry.key().clone();
                entry.insert(value.clone());
                mappings.by_value.insert(value, key.clone());
                return Ok(key);
            }
        }

        Err(ShortyError::CapacityExhausted {
            attempts: self.max_attempts,
        })
    }

    fn resolve(&self, key: String) -> Result<String> {
        self.lock()
            .by_key
            .get(&key)
            .cloned()
            .ok_or(ShortyError::NotFound(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    /// Hands out a fixed sequence of keys, then repeats the last one.
    struct ScriptedKeys {
        keys: Vec<&'static str>,
        next: AtomicUsize,
    }

    impl ScriptedKeys {
        fn new(keys: Vec<&'static str>) -> Self {
            Self {
                keys,
                next: AtomicUsize::new(0),
            }
        }
    }

    impl KeySource for ScriptedKeys {
        fn next_key(&self) -> String {
            let i = self.next.fetch_add(1, Ordering::SeqCst);
            let i = i.min(self.keys.len() - 1);
            self.keys[i].to_string()
        }
    }

    #[test]
    fn retries_past_occupied_keys() {
        let store =
            MemoryStore::with_key_source(ScriptedKeys::new(vec!["aaaaaa", "aaaaaa", "bbbbbb"]));
        assert_eq!(store.shorten("first".to_owned()).unwrap(), "aaaaaa");
        assert_eq!(store.shorten("second".to_owned()).unwrap(), "bbbbbb");
        assert_eq!(store.resolve("aaaaaa".to_owned()).unwrap(), "first");
        assert_eq!(store.resolve("bbbbbb".to_owned()).unwrap(), "second");
    }

    #[test]
    fn gives_up_after_max_attempts() {
        let source = Arc::new(ScriptedKeys::new(vec!["aaaaaa"]));
        let store = MemoryStore {
            mappings: Arc::new(Mutex::new(Mappings::default())),
            keys: source.clone(),
            max_attempts: 5,
        };
        store.shorten("first".to_owned()).unwrap();
        let before = source.next.load(Ordering::SeqCst);

        match store.shorten("second".to_owned()) {
            Err(ShortyError::CapacityExhausted { attempts: 5 }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(source.next.load(Ordering::SeqCst) - before, 5);
        assert_eq!(store.len(), 1);
        assert_eq!(store.resolve("aaaaaa".to_owned()).unwrap(), "first");
    }

    #[test]
    fn dedup_does_not_draw_keys() {
        let source = Arc::new(ScriptedKeys::new(vec!["aaaaaa", "bbbbbb"]));
        let store = MemoryStore {
            mappings: Arc::new(Mutex::new(Mappings::default())),
            keys: source.clone(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        };
        store.shorten("same".to_owned()).unwrap();
        store.shorten("same".to_owned()).unwrap();
        assert_eq!(source.next.load(Ordering::SeqCst), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn clones_share_mappings() {
        let store = MemoryStore::new();
        let other = store.clone();
        let key = store.shorten("shared".to_owned()).unwrap();
        assert_eq!(other.resolve(key).unwrap(), "shared");
        assert!(!other.is_empty());
    }
}
