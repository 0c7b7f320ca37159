//! Background resume download with progress tracking.
//!
//! This module spawns a background thread for each download attempt and
//! reports progress back to the UI thread via a message channel, which the
//! event loop drains with [`DownloadManager::poll`].

pub mod counter;
pub mod save;
pub mod transport;

use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use tracing::{debug, info, warn};
use uuid::Uuid;

pub use counter::{DownloadCounter, RESUME_DOWNLOADS_KEY};
pub use save::{DirectorySaveAction, SaveAction};
pub use transport::{HttpFetcher, ResourceFetcher};

/// Ways a download attempt can fail.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// Connection, TLS or timeout failure.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("Server responded with status {0}")]
    Status(u16),

    /// The response body could not be read to the end.
    #[error("Failed to read response: {0}")]
    Read(#[source] io::Error),

    /// The downloaded bytes could not be saved.
    #[error("Failed to save file: {0}")]
    Save(#[source] io::Error),

    /// The worker thread went away without reporting a result.
    #[error("Download stopped unexpectedly")]
    Interrupted,
}

/// Computes the completion percentage for one progress event.
///
/// Returns `None` when the total size is unknown (or zero) instead of
/// guessing; otherwise rounds to the nearest whole percent, capped at 100.
#[must_use]
pub fn percent_complete(loaded: u64, total: Option<u64>) -> Option<u8> {
    let total = u128::from(total.filter(|t| *t > 0)?);
    let loaded = u128::from(loaded).min(total);
    let percent = (loaded * 100 + total / 2) / total;
    u8::try_from(percent).ok()
}

/// Transfer state shown by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DownloadProgress {
    /// Whether a transfer is in flight
    pub transferring: bool,
    /// Completion percentage, `None` when the size is unknown
    pub percent: Option<u8>,
    /// Bytes received so far in the current attempt
    pub bytes_loaded: u64,
    /// Announced size of the current attempt
    pub bytes_total: Option<u64>,
}

/// Messages sent from the download thread to the UI thread.
#[derive(Debug)]
enum DownloadMessage {
    Progress {
        attempt: Uuid,
        loaded: u64,
        total: Option<u64>,
    },
    Complete {
        attempt: Uuid,
        result: Result<Vec<u8>, TransferError>,
    },
}

/// What changed after draining the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadEvent {
    /// Percentage moved (or became unknown)
    Progress(Option<u8>),
    /// File saved and counter updated
    Completed {
        /// Where the file was written
        saved_to: PathBuf,
        /// Counter value after this download
        total_downloads: u64,
        /// Set when the counter could not be persisted
        counter_error: Option<String>,
    },
    /// The attempt failed; nothing was counted
    Failed(String),
}

/// Resume download manager.
///
/// Owns the transport, the save action and the persisted counter. At most
/// one transfer runs at a time.
pub struct DownloadManager {
    url: String,
    file_name: String,
    fetcher: Arc<dyn ResourceFetcher>,
    saver: Box<dyn SaveAction>,
    counter: DownloadCounter,
    progress: DownloadProgress,
    attempt: Option<Uuid>,
    receiver: Option<Receiver<DownloadMessage>>,
}

impl DownloadManager {
    /// Creates an idle manager.
    pub fn new(
        url: impl Into<String>,
        file_name: impl Into<String>,
        fetcher: Arc<dyn ResourceFetcher>,
        saver: Box<dyn SaveAction>,
        counter: DownloadCounter,
    ) -> Self {
        Self {
            url: url.into(),
            file_name: file_name.into(),
            fetcher,
            saver,
            counter,
            progress: DownloadProgress::default(),
            attempt: None,
            receiver: None,
        }
    }

    /// Current transfer state.
    #[must_use]
    pub const fn progress(&self) -> DownloadProgress {
        self.progress
    }

    /// Checks if a transfer is in flight.
    #[must_use]
    pub const fn is_transferring(&self) -> bool {
        self.progress.transferring
    }

    /// Number of completed downloads, as persisted.
    #[must_use]
    pub const fn total_downloads(&self) -> u64 {
        self.counter.value()
    }

    /// File name the resume is saved under.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Starts a download in the background.
    ///
    /// Returns `false` without doing anything if a transfer is already running.
    pub fn start_download(&mut self) -> bool {
        if self.progress.transferring {
            debug!("Ignoring download request, transfer already in flight");
            return false;
        }

        let attempt = Uuid::new_v4();
        let (sender, receiver) = channel();
        self.receiver = Some(receiver);
        self.attempt = Some(attempt);
        self.progress = DownloadProgress {
            transferring: true,
            percent: Some(0),
            bytes_loaded: 0,
            bytes_total: None,
        };

        info!(%attempt, url = %self.url, "Starting resume download");

        let fetcher = Arc::clone(&self.fetcher);
        let url = self.url.clone();
        thread::spawn(move || {
            let progress_sender = sender.clone();
            let result = fetcher.fetch(&url, &mut |loaded: u64, total: Option<u64>| {
                let _ = progress_sender.send(DownloadMessage::Progress {
                    attempt,
                    loaded,
                    total,
                });
            });
            let _ = sender.send(DownloadMessage::Complete { attempt, result });
        });

        true
    }

    /// Drains the message channel without blocking.
    pub fn poll(&mut self) -> Vec<DownloadEvent> {
        let mut messages = Vec::new();
        let mut disconnected = false;

        if let Some(receiver) = &self.receiver {
            loop {
                match receiver.try_recv() {
                    Ok(message) => messages.push(message),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        disconnected = true;
                        break;
                    }
                }
            }
        }

        let mut events: Vec<DownloadEvent> = messages
            .into_iter()
            .filter_map(|message| self.handle_message(message))
            .collect();

        // Worker vanished without a terminal message
        if disconnected && self.progress.transferring {
            events.push(self.fail(&TransferError::Interrupted));
        }

        events
    }

    fn handle_message(&mut self, message: DownloadMessage) -> Option<DownloadEvent> {
        match message {
            DownloadMessage::Progress {
                attempt,
                loaded,
                total,
            } => {
                if self.attempt != Some(attempt) {
                    return None;
                }
                Some(self.record_progress(loaded, total))
            }
            DownloadMessage::Complete { attempt, result } => {
                if self.attempt != Some(attempt) {
                    debug!(%attempt, "Dropping result of a stale download attempt");
                    return None;
                }
                match result {
                    Ok(bytes) => Some(self.complete(&bytes)),
                    Err(e) => Some(self.fail(&e)),
                }
            }
        }
    }

    fn record_progress(&mut self, loaded: u64, total: Option<u64>) -> DownloadEvent {
        let next = percent_complete(loaded, total);
        self.progress.percent = match (self.progress.percent, next) {
            (Some(previous), Some(next)) => Some(previous.max(next)),
            (_, next) => next,
        };
        self.progress.bytes_loaded = self.progress.bytes_loaded.max(loaded);
        self.progress.bytes_total = total;

        debug!(loaded, ?total, percent = ?self.progress.percent, "Download progress");
        DownloadEvent::Progress(self.progress.percent)
    }

    fn complete(&mut self, bytes: &[u8]) -> DownloadEvent {
        let saved_to = match self.saver.save(bytes, &self.file_name) {
            Ok(path) => path,
            Err(e) => return self.fail(&TransferError::Save(e)),
        };

        // Counter moves before the transfer is reported finished
        let counter_error = match self.counter.increment() {
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "Failed to persist download counter");
                Some(e.to_string())
            }
        };
        self.finish();

        info!(
            path = %saved_to.display(),
            bytes = bytes.len(),
            total_downloads = self.counter.value(),
            "Resume saved"
        );

        DownloadEvent::Completed {
            saved_to,
            total_downloads: self.counter.value(),
            counter_error,
        }
    }

    fn fail(&mut self, error: &TransferError) -> DownloadEvent {
        warn!(error = %error, "Resume download failed");
        self.finish();
        DownloadEvent::Failed(error.to_string())
    }

    fn finish(&mut self) {
        self.progress.transferring = false;
        self.attempt = None;
        self.receiver = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{KeyValueStore, MemoryStore};
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    struct ScriptedFetcher {
        total: Option<u64>,
        steps: Vec<u64>,
        status: Option<u16>,
    }

    impl ResourceFetcher for ScriptedFetcher {
        fn fetch(
            &self,
            _url: &str,
            on_progress: &mut dyn FnMut(u64, Option<u64>),
        ) -> Result<Vec<u8>, TransferError> {
            for loaded in &self.steps {
                on_progress(*loaded, self.total);
            }
            match self.status {
                Some(code) => Err(TransferError::Status(code)),
                None => Ok(vec![7u8; self.steps.last().copied().unwrap_or(0) as usize]),
            }
        }
    }

    #[derive(Clone, Default)]
    struct RecordingSave {
        saved: Arc<Mutex<Vec<(String, usize)>>>,
    }

    impl SaveAction for RecordingSave {
        fn save(&self, bytes: &[u8], file_name: &str) -> io::Result<PathBuf> {
            self.saved
                .lock()
                .unwrap()
                .push((file_name.to_string(), bytes.len()));
            Ok(PathBuf::from("/downloads").join(file_name))
        }
    }

    fn manager(fetcher: ScriptedFetcher, store: MemoryStore, save: RecordingSave) -> DownloadManager {
        DownloadManager::new(
            "https://example.com/cv/source.pdf",
            "Resume.pdf",
            Arc::new(fetcher),
            Box::new(save),
            DownloadCounter::load(Box::new(store)),
        )
    }

    fn drain(manager: &mut DownloadManager) -> Vec<DownloadEvent> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut events = Vec::new();
        while manager.is_transferring() && Instant::now() < deadline {
            events.extend(manager.poll());
            thread::sleep(Duration::from_millis(5));
        }
        events
    }

    #[test]
    fn test_percent_complete() {
        assert_eq!(percent_complete(500, Some(2000)), Some(25));
        assert_eq!(percent_complete(2000, Some(2000)), Some(100));
        assert_eq!(percent_complete(1, Some(8)), Some(13));
        assert_eq!(percent_complete(0, Some(10)), Some(0));
        assert_eq!(percent_complete(3000, Some(2000)), Some(100));
        assert_eq!(percent_complete(10, None), None);
        assert_eq!(percent_complete(10, Some(0)), None);
    }

    #[test]
    fn test_scenario_progress_save_and_count() {
        let store = MemoryStore::with_entry(RESUME_DOWNLOADS_KEY, "5");
        let save = RecordingSave::default();
        let mut manager = manager(
            ScriptedFetcher {
                total: Some(2000),
                steps: vec![500, 2000],
                status: None,
            },
            store.clone(),
            save.clone(),
        );
        assert_eq!(manager.total_downloads(), 5);

        assert!(manager.start_download());
        assert!(manager.is_transferring());
        assert_eq!(manager.progress().percent, Some(0));

        let events = drain(&mut manager);
        assert_eq!(
            events,
            vec![
                DownloadEvent::Progress(Some(25)),
                DownloadEvent::Progress(Some(100)),
                DownloadEvent::Completed {
                    saved_to: PathBuf::from("/downloads/Resume.pdf"),
                    total_downloads: 6,
                    counter_error: None,
                },
            ]
        );
        assert!(!manager.is_transferring());
        assert_eq!(manager.total_downloads(), 6);
        assert_eq!(store.get(RESUME_DOWNLOADS_KEY).unwrap().as_deref(), Some("6"));
        assert_eq!(
            save.saved.lock().unwrap().as_slice(),
            &[("Resume.pdf".to_string(), 2000)]
        );
    }

    #[test]
    fn test_unknown_total_reports_no_percentage() {
        let mut manager = manager(
            ScriptedFetcher {
                total: None,
                steps: vec![100, 300],
                status: None,
            },
            MemoryStore::new(),
            RecordingSave::default(),
        );

        manager.start_download();
        let events = drain(&mut manager);
        assert_eq!(events[0], DownloadEvent::Progress(None));
        assert_eq!(events[1], DownloadEvent::Progress(None));
        assert_eq!(manager.progress().percent, None);
        assert_eq!(manager.progress().bytes_loaded, 300);
        assert_eq!(manager.total_downloads(), 1);
    }

    #[test]
    fn test_failure_does_not_count() {
        let store = MemoryStore::with_entry(RESUME_DOWNLOADS_KEY, "2");
        let save = RecordingSave::default();
        let mut manager = manager(
            ScriptedFetcher {
                total: Some(100),
                steps: vec![40],
                status: Some(503),
            },
            store.clone(),
            save.clone(),
        );

        manager.start_download();
        let events = drain(&mut manager);
        assert_eq!(
            events.last(),
            Some(&DownloadEvent::Failed(
                "Server responded with status 503".to_string()
            ))
        );
        assert!(!manager.is_transferring());
        assert_eq!(manager.total_downloads(), 2);
        assert_eq!(store.get(RESUME_DOWNLOADS_KEY).unwrap().as_deref(), Some("2"));
        assert!(save.saved.lock().unwrap().is_empty());
    }

    #[test]
    fn test_progress_is_monotonic_within_attempt() {
        let mut manager = manager(
            ScriptedFetcher {
                total: Some(1000),
                steps: vec![],
                status: None,
            },
            MemoryStore::new(),
            RecordingSave::default(),
        );
        let attempt = Uuid::new_v4();
        manager.attempt = Some(attempt);
        manager.progress.transferring = true;
        manager.progress.percent = Some(0);

        let mut seen = Vec::new();
        for loaded in [100, 600, 300, 1000] {
            if let Some(DownloadEvent::Progress(Some(p))) =
                manager.handle_message(DownloadMessage::Progress {
                    attempt,
                    loaded,
                    total: Some(1000),
                })
            {
                seen.push(p);
            }
        }
        assert_eq!(seen, vec![10, 60, 60, 100]);
    }

    #[test]
    fn test_stale_attempt_messages_are_ignored() {
        let store = MemoryStore::new();
        let mut manager = manager(
            ScriptedFetcher {
                total: None,
                steps: vec![],
                status: None,
            },
            store.clone(),
            RecordingSave::default(),
        );
        manager.attempt = Some(Uuid::new_v4());
        manager.progress.transferring = true;

        let event = manager.handle_message(DownloadMessage::Complete {
            attempt: Uuid::new_v4(),
            result: Ok(vec![1, 2, 3]),
        });
        assert_eq!(event, None);
        assert!(manager.is_transferring());
        assert_eq!(store.get(RESUME_DOWNLOADS_KEY).unwrap(), None);
    }

    #[test]
    fn test_save_failure_is_a_failed_download() {
        struct BrokenSave;
        impl SaveAction for BrokenSave {
            fn save(&self, _bytes: &[u8], _file_name: &str) -> io::Result<PathBuf> {
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
            }
        }

        let store = MemoryStore::new();
        let mut manager = DownloadManager::new(
            "https://example.com/cv.pdf",
            "Resume.pdf",
            Arc::new(ScriptedFetcher {
                total: Some(4),
                steps: vec![4],
                status: None,
            }),
            Box::new(BrokenSave),
            DownloadCounter::load(Box::new(store.clone())),
        );

        manager.start_download();
        let events = drain(&mut manager);
        assert!(matches!(events.last(), Some(DownloadEvent::Failed(msg)) if msg.contains("read-only")));
        assert_eq!(manager.total_downloads(), 0);
        assert_eq!(store.get(RESUME_DOWNLOADS_KEY).unwrap(), None);
    }
}
