use crate::error::Result;

/// A pool of worker threads running submitted jobs.
pub trait ThreadPool {
    /// Start a pool with `threads` workers.
    fn new(threads: u32) -> Result<Self>
    where
        Self: Sized;

    /// Queue `job` to run on one of the workers.
    fn spawn<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static;
}

mod shared_queue;
pub use shared_queue::SharedQueueThreadPool;

mod rayon;
pub use self::rayon::RayonThreadPool;
