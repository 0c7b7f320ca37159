//! Shared fakes for integration tests.
#![allow(dead_code)] // Not every test file uses every fake

use folio::config::Config;
use folio::contact::{ContactSubmission, MessageRelay, RelayError};
use folio::download::{ResourceFetcher, SaveAction, TransferError};
use folio::services::MemoryStore;
use folio::tui::{AppServices, AppState, FixedColorScheme};
use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// How long tests wait for background work before giving up.
pub const WAIT: Duration = Duration::from_secs(5);

/// Result of one scripted fetch.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Report these byte counts against `total`, then return that many bytes
    Body { total: Option<u64>, steps: Vec<u64> },
    /// Fail with this HTTP status
    Status(u16),
}

impl Outcome {
    /// A successful 2000-byte body reported in two steps.
    pub fn ok() -> Self {
        Self::Body {
            total: Some(2000),
            steps: vec![500, 2000],
        }
    }
}

/// Plays back one outcome per fetch, in order.
#[derive(Default)]
pub struct QueueFetcher {
    outcomes: Mutex<VecDeque<Outcome>>,
    calls: AtomicUsize,
}

impl QueueFetcher {
    pub fn new(outcomes: impl IntoIterator<Item = Outcome>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            calls: AtomicUsize::new(0),
        })
    }

    /// A fetcher with nothing queued; every fetch fails with status 500.
    pub fn idle() -> Arc<Self> {
        Arc::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ResourceFetcher for QueueFetcher {
    fn fetch(
        &self,
        _url: &str,
        on_progress: &mut dyn FnMut(u64, Option<u64>),
    ) -> Result<Vec<u8>, TransferError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Outcome::Status(500));

        match outcome {
            Outcome::Body { total, steps } => {
                for loaded in &steps {
                    on_progress(*loaded, total);
                }
                Ok(vec![0x25; steps.last().copied().unwrap_or(0) as usize])
            }
            Outcome::Status(code) => Err(TransferError::Status(code)),
        }
    }
}

/// Blocks every fetch until the test releases it.
pub struct GatedFetcher {
    release: Mutex<Receiver<()>>,
    calls: AtomicUsize,
}

impl GatedFetcher {
    /// Returns the fetcher and the handle that lets one fetch finish per send.
    pub fn new() -> (Arc<Self>, Sender<()>) {
        let (sender, receiver) = channel();
        let fetcher = Arc::new(Self {
            release: Mutex::new(receiver),
            calls: AtomicUsize::new(0),
        });
        (fetcher, sender)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ResourceFetcher for GatedFetcher {
    fn fetch(
        &self,
        _url: &str,
        on_progress: &mut dyn FnMut(u64, Option<u64>),
    ) -> Result<Vec<u8>, TransferError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        on_progress(0, Some(4));
        self.release
            .lock()
            .unwrap()
            .recv()
            .map_err(|_| TransferError::Interrupted)?;
        on_progress(4, Some(4));
        Ok(b"%PDF".to_vec())
    }
}

/// Records saves in memory.
#[derive(Clone, Default)]
pub struct RecordingSave {
    pub saved: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
}

impl RecordingSave {
    pub fn file_names(&self) -> Vec<String> {
        self.saved
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }
}

impl SaveAction for RecordingSave {
    fn save(&self, bytes: &[u8], file_name: &str) -> io::Result<PathBuf> {
        self.saved
            .lock()
            .unwrap()
            .push((file_name.to_string(), bytes.to_vec()));
        Ok(Path::new("/downloads").join(file_name))
    }
}

/// Relay that records submissions and answers with a fixed outcome.
pub struct FakeRelay {
    pub reject: bool,
    pub sent: Mutex<Vec<ContactSubmission>>,
}

impl FakeRelay {
    pub fn accepting() -> Arc<Self> {
        Arc::new(Self {
            reject: false,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn rejecting() -> Arc<Self> {
        Arc::new(Self {
            reject: true,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn sent(&self) -> Vec<ContactSubmission> {
        self.sent.lock().unwrap().clone()
    }
}

impl MessageRelay for FakeRelay {
    fn send(&self, submission: &ContactSubmission) -> Result<(), RelayError> {
        self.sent.lock().unwrap().push(submission.clone());
        if self.reject {
            Err(RelayError::Rejected {
                status: 412,
                body: "The public key is required".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

/// Fakes behind an [`AppState`], kept so tests can inspect them.
pub struct Harness {
    pub state: AppState,
    pub store: MemoryStore,
    pub saver: RecordingSave,
}

/// Builds an app state around the given fetcher and relay.
pub fn harness(fetcher: Arc<dyn ResourceFetcher>, relay: Arc<FakeRelay>) -> Harness {
    let store = MemoryStore::new();
    let saver = RecordingSave::default();
    let mut config = Config::new();
    config.ui.splash_ms = 200;

    let state = AppState::new(
        config,
        AppServices {
            fetcher,
            saver: Box::new(saver.clone()),
            store: Box::new(store.clone()),
            relay,
            color_scheme: Box::new(FixedColorScheme(true)),
        },
    );

    Harness {
        state,
        store,
        saver,
    }
}

/// Ticks the state until `done` holds or [`WAIT`] elapses.
pub fn tick_until(state: &mut AppState, done: impl Fn(&AppState) -> bool) -> bool {
    let deadline = Instant::now() + WAIT;
    while Instant::now() < deadline {
        state.tick(Instant::now());
        if done(state) {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    false
}
