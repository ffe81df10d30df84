use super::ShortenEngine;
use super::DEFAULT_MAX_ATTEMPTS;
use crate::keygen::KeySource;
use crate::keygen::RandomKeys;
use crate::Result;
use crate::ShortyError;
use sled::transaction::ConflictableTransactionError;
use sled::Db;
use sled::Transactional;
use sled::Tree;
use std::sync::Arc;

const KEYS_TREE: &str = "keys";
const VALUES_TREE: &str = "values";

/// Store backed by a sled database.
///
/// Mappings live in two trees, `keys` (key to value) and `values` (value to
/// key), which are always updated together in one transaction.
#[derive(Clone)]
pub struct SledStore {
    db: Db,
    keys: Tree,
    values: Tree,
    source: Arc<dyn KeySource>,
    max_attempts: u32,
}

impl SledStore {
    pub fn new(db: Db) -> Result<Self> {
        Self::with_key_source(db, RandomKeys)
    }

    pub fn with_key_source(db: Db, source: impl KeySource + 'static) -> Result<Self> {
        let keys = db.open_tree(KEYS_TREE)?;
        let values = db.open_tree(VALUES_TREE)?;
        Ok(Self {
            db,
            keys,
            values,
            source: Arc::new(source),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        })
    }

    /// Give up on a new value after `max_attempts` occupied candidates.
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

impl ShortenEngine for SledStore {
    fn shorten(&self, value: String) -> Result<String> {
        let key = (&self.keys, &self.values).transaction(|(keys, values)| {
            if let Some(key) = values.get(value.as_bytes())? {
                return Ok(key.to_vec());
            }
            for _ in 0..self.max_attempts {
                let candidate = self.source.next_key();
                if keys.get(candidate.as_bytes())?.is_none() {
                    keys.insert(candidate.as_bytes(), value.as_bytes())?;
                    values.insert(value.as_bytes(), candidate.as_bytes())?;
                    return Ok(candidate.into_bytes());
                }
            }
            Err(ConflictableTransactionError::Abort(
                ShortyError::CapacityExhausted {
                    attempts: self.max_attempts,
                },
            ))
        })?;
        self.db.flush()?;
        Ok(String::from_utf8(key)?)
    }

    fn resolve(&self, key: String) -> Result<String> {
        match self.keys.get(key.as_bytes())? {
            Some(value) => Ok(String::from_utf8(value.to_vec())?),
            None => Err(ShortyError::NotFound(key)),
        }
    }
}
