//! Generation of short keys.
//!
//! Keys are `KEY_LENGTH` characters drawn from the 62 ASCII alphanumerics
//! (`a-z`, `A-Z`, `0-9`), giving 62^6 possible keys.

use rand::distributions::Alphanumeric;
use rand::Rng;
use std::iter;

/// Number of characters in every generated key.
pub const KEY_LENGTH: usize = 6;

/// A source of candidate keys. Candidates need not be unique; the store
/// retries on keys that are already taken.
pub trait KeySource: Send + Sync {
    fn next_key(&self) -> String;
}

/// Draws keys uniformly at random from the thread-local RNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomKeys;

impl KeySource for RandomKeys {
    fn next_key(&self) -> String {
        let mut rng = rand::thread_rng();
        iter::repeat_with(|| rng.sample(Alphanumeric))
            .map(char::from)
            .take(KEY_LENGTH)
            .collect()
    }
}

/// Whether `key` has the shape of a generated key.
pub fn is_valid_key(key: &str) -> bool {
    key.len() == KEY_LENGTH && key.bytes().all(|b| b.is_ascii_alphanumeric())
}
