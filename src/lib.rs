mod engines;
pub use engines::MemoryStore;
pub use engines::ShortenEngine;
pub use engines::SledStore;
pub use engines::DEFAULT_MAX_ATTEMPTS;

mod error;
pub use error::Result;
pub use error::ShortyError;

pub mod keygen;
pub use keygen::KeySource;
pub use keygen::RandomKeys;

mod client;
pub use client::ShortyClient;

mod protocol;

mod server;
pub use server::ShortyServer;

pub mod thread_pool;
