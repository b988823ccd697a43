//! Background analytics event writer.
//!
//! Scan/save logging is decoupled from the request path: handlers hand an
//! event to a cloneable [`EventLogger`] which pushes it onto a bounded
//! channel, and a single background task drains the channel and appends to
//! the store. The handoff never blocks and never fails the caller; a full
//! queue or a failed append is logged and the event is dropped. There are no
//! retries.
//!
//! This keeps the public read path's latency and success completely
//! independent of event-store availability, and means a client can receive
//! its response before (or despite failure of) the corresponding event being
//! durably recorded.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::db::EventStore;
use crate::models::{SaveEvent, ScanEvent};

/// One queued analytics event.
#[derive(Debug)]
enum EventRecord {
    Scan(ScanEvent),
    Save(SaveEvent),
}

/// Handle for submitting analytics events from request handlers.
///
/// Cheap to clone; all clones feed the same writer task.
#[derive(Clone)]
pub struct EventLogger {
    tx: mpsc::Sender<EventRecord>,
}

impl EventLogger {
    /// Spawn the background writer task over `store` and return its handle.
    ///
    /// `capacity` bounds the in-flight queue; events submitted while the
    /// queue is full are dropped with a warning rather than applying
    /// backpressure to request handlers.
    pub fn spawn<S: EventStore>(store: S, capacity: usize) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let worker = tokio::spawn(write_events(store, rx));
        (Self { tx }, worker)
    }

    /// Submit a scan event. Returns immediately; the outcome of the write is
    /// never observed by the caller.
    pub fn log_scan(&self, event: ScanEvent) {
        self.submit(EventRecord::Scan(event));
    }

    /// Submit a save event. Returns immediately; the outcome of the write is
    /// never observed by the caller.
    pub fn log_save(&self, event: SaveEvent) {
        self.submit(EventRecord::Save(event));
    }

    fn submit(&self, record: EventRecord) {
        match self.tx.try_send(record) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(record)) => {
                tracing::warn!(?record, "event queue full, dropping analytics event");
            }
            Err(mpsc::error::TrySendError::Closed(record)) => {
                tracing::warn!(?record, "event writer gone, dropping analytics event");
            }
        }
    }
}

/// Writer loop: drain the queue, append each event, swallow failures.
async fn write_events<S: EventStore>(store: S, mut rx: mpsc::Receiver<EventRecord>) {
    while let Some(record) = rx.recv().await {
        match record {
            EventRecord::Scan(event) => {
                let profile_id = event.profile_id;
                match store.append_scan(event).await {
                    Ok(()) => tracing::debug!(%profile_id, "scan logged"),
                    Err(e) => tracing::error!(%profile_id, error = %e, "failed to log scan"),
                }
            }
            EventRecord::Save(event) => {
                let profile_id = event.profile_id;
                match store.append_save(event).await {
                    Ok(()) => tracing::debug!(%profile_id, "vcf save logged"),
                    Err(e) => tracing::error!(%profile_id, error = %e, "failed to log save"),
                }
            }
        }
    }

    tracing::debug!("event writer shutting down, queue drained");
}
