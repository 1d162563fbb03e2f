use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use stockroom::backend::{InMemory, OnDisk};
use stockroom::{Clock, MessageKind, Notifier, Storefront};

// ==========================
// CORE TEST FACTORIES
// ==========================
// These are the foundation for all test setup. Storefronts are opened through
// the public `open_with` constructor so every test gets a deterministic clock
// and an inspectable notifier.

/// Deterministic clock: starts at a fixed point and advances one millisecond
/// per `now_millis` call, so generated ids and dates are unique and ordered.
#[derive(Debug)]
pub struct StepClock {
    millis: AtomicU64,
}

impl StepClock {
    // 2024-06-01 00:00:00 UTC, later than every seed fixture date
    pub const START: u64 = 1717200000000;

    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            millis: AtomicU64::new(Self::START),
        })
    }
}

impl Clock for StepClock {
    fn now_millis(&self) -> u64 {
        self.millis.fetch_add(1, Ordering::SeqCst)
    }

    fn now_rfc3339(&self) -> String {
        let millis = self.now_millis() as i64;
        chrono::DateTime::from_timestamp_millis(millis)
            .expect("test clock stays within chrono range")
            .to_rfc3339()
    }
}

/// Notifier that records every message so tests can assert on deliveries.
#[derive(Debug, Default)]
pub struct CapturingNotifier {
    sent: Mutex<Vec<(String, MessageKind)>>,
}

impl CapturingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sent(&self) -> Vec<(String, MessageKind)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn count_for(&self, email: &str, kind: MessageKind) -> usize {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(e, k)| e == email && *k == kind)
            .count()
    }
}

impl Notifier for CapturingNotifier {
    fn send(&self, email: &str, kind: MessageKind) {
        self.sent.lock().unwrap().push((email.to_string(), kind));
    }
}

/// Opens a storefront over a fresh in-memory backend.
pub fn open_mem() -> Storefront {
    open_mem_capturing().0
}

/// Opens a storefront over a fresh in-memory backend, keeping a handle to
/// the notifier for assertions.
pub fn open_mem_capturing() -> (Storefront, Arc<CapturingNotifier>) {
    let notifier = CapturingNotifier::new();
    let store =
        Storefront::open_with(Box::new(InMemory::new()), StepClock::new(), notifier.clone())
            .expect("open in-memory storefront");
    (store, notifier)
}

/// Opens a storefront over an on-disk backend rooted at `dir`.
///
/// Opening the same directory again simulates an application restart; state
/// must come back from the files alone.
pub fn open_dir(dir: &Path) -> Storefront {
    let backend = OnDisk::open(dir).expect("open data directory");
    Storefront::open_with(Box::new(backend), StepClock::new(), CapturingNotifier::new())
        .expect("open on-disk storefront")
}
