//! Periodic background tasks tied to the lifetime of their owner.
//!
//! A [`ScheduledTask`] runs its job on a fixed interval until it is cancelled
//! or dropped; there is no ambient timer left running behind a closed view.

use std::future::Future;
use std::time::Duration;

use log::debug;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

pub struct ScheduledTask {
    name: String,
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    /// Starts running `job` every `period`, first tick immediately.
    ///
    /// Must be called from within a tokio runtime. `period` must be non-zero.
    pub fn spawn<F, Fut>(name: impl Into<String>, period: Duration, mut job: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let name = name.into();
        let task_name = name.clone();
        let handle = tokio::spawn(async move {
            debug!("Scheduled task '{}' started ({:?} interval)", task_name, period);
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                job().await;
            }
        });
        Self { name, handle }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stops the task. The job will not run again.
    pub fn cancel(&self) {
        if !self.handle.is_finished() {
            debug!("Scheduled task '{}' cancelled", self.name);
            self.handle.abort();
        }
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
