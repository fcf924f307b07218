//! Recurring reads of device state.
//!
//! A [`Poller`] owns at most one background task. Starting it again cancels
//! the previous task first, so a resource is never polled twice at once.

use std::future::Future;
use std::time::Duration;

use log::debug;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

pub struct Poller {
    name: String,
    running: Option<Running>,
}

struct Running {
    cancel: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl Poller {
    pub fn new(name: impl ToString) -> Self {
        Poller {
            name: name.to_string(),
            running: None,
        }
    }

    /// Runs `tick` every `period`, first one `period` from now. Must be called
    /// from within a tokio runtime.
    pub fn start<F, Fut>(&mut self, period: Duration, mut tick: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.stop();

        let (cancel, mut cancelled) = oneshot::channel();
        let name = self.name.clone();
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = &mut cancelled => break,
                    _ = async {
                        interval.tick().await;
                        tick().await;
                    } => {}
                }
            }
            debug!("poller {} stopped", name);
        });

        debug!("poller {} started every {:?}", self.name, period);
        self.running = Some(Running { cancel, handle });
    }

    /// Cancels the running task, including a tick that is mid-request.
    pub fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            // the task may already have finished; nothing to tell it then
            let _ = running.cancel.send(());
            running.handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .map_or(false, |running| !running.handle.is_finished())
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}
