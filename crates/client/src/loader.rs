//! Load-state protocol shared by every screen.
//!
//! A load sets `loading`, clears it in every outcome, and on failure records a
//! message while leaving previously loaded data visible. Responses arriving
//! after the owning screen was torn down are dropped.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub struct LoadState<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<String>,
    /// At least one load has succeeded.
    pub loaded: bool,
}

impl<T: Default> Default for LoadState<T> {
    fn default() -> Self {
        Self {
            data: T::default(),
            loading: false,
            error: None,
            loaded: false,
        }
    }
}

/// List flavour used by list screens.
pub type ListState<T> = LoadState<Vec<T>>;

impl<T> LoadState<T> {
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Apply an outcome. Failure keeps `data` as it was.
    pub fn complete(&mut self, outcome: Result<T, String>) {
        self.loading = false;
        match outcome {
            Ok(data) => {
                self.data = data;
                self.loaded = true;
                self.error = None;
            }
            Err(message) => self.error = Some(message),
        }
    }
}

/// Liveness flag of a screen; clones share it.
#[derive(Debug, Clone)]
pub struct Mount(Arc<AtomicBool>);

impl Default for Mount {
    fn default() -> Self {
        Self::new()
    }
}

impl Mount {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_mounted(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn unmount(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// State of one resource on one screen.
///
/// Overlapping loads are not deduplicated; the last response to arrive wins.
#[derive(Debug, Clone)]
pub struct Loader<T> {
    state: Arc<Mutex<LoadState<T>>>,
    mount: Mount,
}

impl<T: Clone + Default> Loader<T> {
    pub fn new(mount: Mount) -> Self {
        Self {
            state: Arc::new(Mutex::new(LoadState::default())),
            mount,
        }
    }

    pub fn snapshot(&self) -> LoadState<T> {
        self.lock().clone()
    }

    pub fn data(&self) -> T {
        self.lock().data.clone()
    }

    pub fn mount(&self) -> &Mount {
        &self.mount
    }

    /// Run `fetch` under the load protocol.
    ///
    /// The error is handed back too, so callers can report it; the state
    /// already carries its user-facing message.
    pub async fn load<Fut>(&self, fallback: &str, fetch: Fut) -> Result<(), ApiError>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        if !self.mount.is_mounted() {
            return Ok(());
        }
        self.lock().begin();
        let result = fetch.await;
        if !self.mount.is_mounted() {
            debug!("screen torn down; dropping response");
            return result.map(|_| ());
        }
        match result {
            Ok(data) => {
                self.lock().complete(Ok(data));
                Ok(())
            }
            Err(e) => {
                self.lock().complete(Err(e.user_message(fallback)));
                Err(e)
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LoadState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
