//! Test doubles shared by the application unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::{Notify, Semaphore};

use crate::application::source::{ContentSource, FetchError};

/// In-memory content source that counts requests per path.
///
/// Unknown paths fail with [`FetchError::Missing`]. Gated requests are held
/// until [`StubSource::open_gate`] is called.
pub(crate) struct StubSource {
    documents: HashMap<String, String>,
    hits: Mutex<HashMap<String, usize>>,
    arrived: Notify,
    gate: Semaphore,
    gated: Gated,
}

enum Gated {
    Nothing,
    Everything,
    Paths(Vec<String>),
}

impl Gated {
    fn holds(&self, path: &str) -> bool {
        match self {
            Gated::Nothing => false,
            Gated::Everything => true,
            Gated::Paths(paths) => paths.iter().any(|p| p == path),
        }
    }
}

impl StubSource {
    pub(crate) fn new() -> Self {
        Self {
            documents: HashMap::new(),
            hits: Mutex::new(HashMap::new()),
            arrived: Notify::new(),
            gate: Semaphore::new(0),
            gated: Gated::Nothing,
        }
    }

    pub(crate) fn with(mut self, path: &str, body: &str) -> Self {
        self.documents.insert(path.to_string(), body.to_string());
        self
    }

    pub(crate) fn gated(mut self) -> Self {
        self.gated = Gated::Everything;
        self
    }

    pub(crate) fn gate_path(mut self, path: &str) -> Self {
        match &mut self.gated {
            Gated::Paths(paths) => paths.push(path.to_string()),
            other => *other = Gated::Paths(vec![path.to_string()]),
        }
        self
    }

    pub(crate) fn open_gate(&self) {
        self.gate.add_permits(Semaphore::MAX_PERMITS / 2);
    }

    pub(crate) fn hits(&self, path: &str) -> usize {
        self.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }

    pub(crate) fn total_hits(&self) -> usize {
        self.hits.lock().unwrap().values().sum()
    }

    pub(crate) async fn wait_for_request(&self, path: &str) {
        loop {
            let arrived = self.arrived.notified();
            if self.hits(path) > 0 {
                return;
            }
            arrived.await;
        }
    }
}

#[async_trait]
impl ContentSource for StubSource {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        *self
            .hits
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default() += 1;
        self.arrived.notify_waiters();

        if self.gated.holds(path) {
            let _permit = self.gate.acquire().await.expect("gate semaphore open");
        }

        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| FetchError::Missing {
                path: path.to_string(),
            })
    }
}
