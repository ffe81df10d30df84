use super::ThreadPool;
use crate::error::Result;
use crate::error::ShortyError;
use rayon::ThreadPoolBuilder;

/// Wrapper around a `rayon` thread pool.
pub struct RayonThreadPool(rayon::ThreadPool);

impl ThreadPool for RayonThreadPool {
    fn new(threads: u32) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads as usize)
            .thread_name(|i| format!("shorty-rayon-{}", i))
            .build()
            .map_err(|e| ShortyError::StringError(e.to_string()))?;
        Ok(Self(pool))
    }

    fn spawn<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.0.spawn(job);
        Ok(())
    }
}
