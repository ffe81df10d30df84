use super::ThreadPool;
use crate::error::Result;
use crate::error::ShortyError;
use crossbeam::channel;
use crossbeam::channel::Receiver;
use crossbeam::channel::Sender;
use std::thread;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Fixed set of workers pulling jobs from one shared channel.
///
/// A worker whose job panics is replaced by a fresh thread, so the pool keeps
/// its size. Workers exit once the pool is dropped and the queue drains.
pub struct SharedQueueThreadPool {
    sender: Sender<Job>,
}

impl ThreadPool for SharedQueueThreadPool {
    fn new(threads: u32) -> Result<Self> {
        if threads == 0 {
            return Err(ShortyError::StringError(
                "a thread pool needs at least one thread".to_owned(),
            ));
        }
        let (sender, receiver) = channel::unbounded::<Job>();
        for _ in 0..threads {
            spawn_worker(Worker(receiver.clone()))?;
        }
        Ok(Self { sender })
    }

    fn spawn<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.sender
            .send(Box::new(job))
            .map_err(|_| ShortyError::StringError("thread pool has no workers".to_owned()))
    }
}

#[derive(Clone)]
struct Worker(Receiver<Job>);

impl Worker {
    fn run(self) {
        while let Ok(job) = self.0.recv() {
            job();
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        if thread::panicking() {
            // Ignore failure: there is no caller left to report it to.
            let _ = spawn_worker(self.clone());
        }
    }
}

fn spawn_worker(worker: Worker) -> Result<()> {
    thread::Builder::new()
        .name("shorty-worker".to_owned())
        .spawn(move || worker.run())?;
    Ok(())
}
