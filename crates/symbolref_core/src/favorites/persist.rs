//! Debounced snapshot writer for the favorites index.
//!
//! Receives full snapshots over a channel, waits for the first one, then keeps
//! replacing it with newer ones until the channel stays quiet for the debounce
//! window. Only the latest snapshot of a burst is written.

use crate::store::KeyValueStore;
use log::{debug, info, warn};
use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

const WORKER_THREAD_NAME: &str = "favorites-persist";

/// Handle to the background persist thread.
///
/// Dropping the handle closes the channel without waiting: the worker still
/// writes its pending snapshot, but the process may exit first.
pub(crate) struct PersistWorker {
    sender: Option<Sender<String>>,
    handle: Option<JoinHandle<()>>,
}

impl PersistWorker {
    pub(crate) fn spawn(
        store: Box<dyn KeyValueStore>,
        key: &'static str,
        debounce: Duration,
    ) -> io::Result<Self> {
        let (sender, receiver) = mpsc::channel();
        let handle = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || run_worker(receiver, &*store, key, debounce))?;

        Ok(Self {
            sender: Some(sender),
            handle: Some(handle),
        })
    }

    /// Queues a full snapshot. Never blocks.
    pub(crate) fn schedule(&self, snapshot: String) {
        let Some(sender) = &self.sender else {
            return;
        };
        if sender.send(snapshot).is_err() {
            warn!(
                "event=favorites_persist module=favorites status=error error_code=worker_gone"
            );
        }
    }

    /// Closes the channel and waits until the pending snapshot is written.
    pub(crate) fn shutdown(mut self) {
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!(
                    "event=favorites_persist module=favorites status=error error_code=worker_panicked"
                );
            }
        }
    }
}

impl Drop for PersistWorker {
    fn drop(&mut self) {
        self.sender.take();
    }
}

fn run_worker(
    receiver: Receiver<String>,
    store: &dyn KeyValueStore,
    key: &'static str,
    debounce: Duration,
) {
    while let Ok(first) = receiver.recv() {
        let mut latest = first;
        let mut coalesced = 1_usize;

        let closed = loop {
            match receiver.recv_timeout(debounce) {
                Ok(next) => {
                    latest = next;
                    coalesced += 1;
                }
                Err(RecvTimeoutError::Timeout) => break false,
                Err(RecvTimeoutError::Disconnected) => break true,
            }
        };

        write_snapshot(store, key, &latest, coalesced);
        if closed {
            break;
        }
    }
    debug!("event=favorites_persist module=favorites status=stopped");
}

fn write_snapshot(store: &dyn KeyValueStore, key: &str, snapshot: &str, coalesced: usize) {
    match store.set(key, snapshot) {
        Ok(()) => info!(
            "event=favorites_persist module=favorites status=ok bytes={} coalesced={}",
            snapshot.len(),
            coalesced
        ),
        // Not retried: the next mutation writes a fresh full snapshot.
        Err(err) => warn!(
            "event=favorites_persist module=favorites status=error error_code=write_failed coalesced={} error={}",
            coalesced, err
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::PersistWorker;
    use crate::store::{KeyValueStore, MemoryKvStore};
    use std::time::Duration;

    #[test]
    fn burst_within_window_is_written_once() {
        let store = MemoryKvStore::new();
        let worker =
            PersistWorker::spawn(Box::new(store.clone()), "k", Duration::from_secs(5)).unwrap();

        for index in 0..10 {
            worker.schedule(format!("snapshot-{index}"));
        }
        worker.shutdown();

        assert_eq!(store.write_count(), 1);
        assert_eq!(store.get("k").unwrap().as_deref(), Some("snapshot-9"));
    }

    #[test]
    fn shutdown_without_snapshots_writes_nothing() {
        let store = MemoryKvStore::new();
        let worker =
            PersistWorker::spawn(Box::new(store.clone()), "k", Duration::from_millis(10)).unwrap();
        worker.shutdown();
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn quiet_period_flushes_before_shutdown() {
        let store = MemoryKvStore::new();
        let worker =
            PersistWorker::spawn(Box::new(store.clone()), "k", Duration::from_millis(10)).unwrap();

        worker.schedule("first".to_string());
        let mut waited = Duration::ZERO;
        while store.write_count() == 0 && waited < Duration::from_secs(5) {
            std::thread::sleep(Duration::from_millis(5));
            waited += Duration::from_millis(5);
        }
        assert_eq!(store.get("k").unwrap().as_deref(), Some("first"));

        worker.schedule("second".to_string());
        worker.shutdown();
        assert_eq!(store.write_count(), 2);
        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
    }
}
