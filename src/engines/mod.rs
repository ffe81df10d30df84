use crate::Result;

/// Default ceiling on candidate keys drawn for one new value.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 64;

/// A store mapping generated short keys to the values they were issued for.
pub trait ShortenEngine: Clone + Send + 'static {
    /// Return the key for `value`, issuing a fresh one if `value` has not
    /// been seen before. Shortening the same value twice yields the same key.
    fn shorten(&self, value: String) -> Result<String>;

    /// Return the value stored under `key`, or `ShortyError::NotFound`.
    fn resolve(&self, key: String) -> Result<String>;
}

mod memory;
pub use memory::MemoryStore;

mod sled;
pub use self::sled::SledStore;
