use std::io::Write;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::console::Console;

pub const DOT_INTERVAL: Duration = Duration::from_millis(500);

/// Progress indicator printed while a request is in flight: `Thinking` followed
/// by one dot per tick.
///
/// The ticking task is owned by this value. [`Thinking::stop`] signals it and
/// waits for it to exit, and dropping the value aborts it, so a dot can never
/// land after the request that started it has finished.
pub struct Thinking {
    stop_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Thinking {
    pub fn start<W>(console: &Console<W>, interval: Duration) -> Self
    where
        W: Write + Send + 'static,
    {
        // Indicator output is best-effort; the request outcome reports real write failures.
        let _ = console.print("Thinking");

        let console = console.clone();
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        let _ = console.print(".");
                    }
                }
            }
        });

        Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    pub async fn stop(mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for Thinking {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
