use std::fmt::Display;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use log::{debug, error, info};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::data::loader::{FetchError, ImageSource};
use crate::data::model::{ImageRecord, ViewState};

/// Message used when a failure carries no description of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "Some error happened";

/// Callback invoked with the new state after every transition.
pub type Observer = Arc<dyn Fn(&ViewState) + Send + Sync>;

/// Handle returned by [`ViewStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

// ---------------------------------------------------------------------------
// Shared cell + observer list
// ---------------------------------------------------------------------------

struct Shared {
    /// Serializes whole publishes so observers see transitions in the order
    /// the cell receives them.
    publishing: Mutex<()>,
    state: Mutex<Arc<ViewState>>,
    observers: Mutex<Vec<(ObserverId, Observer)>>,
    next_id: AtomicU64,
}

impl Shared {
    /// Replace the current state and notify every observer.
    ///
    /// Observers may read the store but must not publish from inside the
    /// callback (that would wait on `publishing` forever).
    fn publish(&self, state: ViewState) {
        let _publishing = lock(&self.publishing);

        let state = Arc::new(state);
        *lock(&self.state) = Arc::clone(&state);

        let observers: Vec<Observer> = lock(&self.observers)
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in observers {
            observer(&state);
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Await the source and publish the outcome, unless the store is gone.
async fn complete<S: ImageSource>(shared: Weak<Shared>, source: Arc<S>) {
    let result = source.fetch_image_list().await;
    match shared.upgrade() {
        Some(shared) => shared.publish(settle(result)),
        None => debug!("Store dropped before fetch completed; discarding result"),
    }
}

// ---------------------------------------------------------------------------
// ViewStore
// ---------------------------------------------------------------------------

/// Holds the gallery's [`ViewState`] and drives it from an [`ImageSource`].
///
/// The state starts as `Loading`. Every refresh publishes `Loading`, awaits
/// the source, then publishes `Success` or `Error`. Refreshes are not
/// deduplicated: when two overlap, whichever finishes last wins.
pub struct ViewStore<S> {
    shared: Arc<Shared>,
    source: Arc<S>,
}

impl<S> ViewStore<S> {
    /// Current state. Returns the same allocation until the next transition.
    pub fn observe(&self) -> Arc<ViewState> {
        Arc::clone(&lock(&self.shared.state))
    }

    /// Register a callback for every future transition.
    pub fn subscribe<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&ViewState) + Send + Sync + 'static,
    {
        let id = ObserverId(self.shared.next_id.fetch_add(1, Ordering::Relaxed));
        lock(&self.shared.observers).push((id, Arc::new(observer)));
        id
    }

    /// Remove a callback. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut observers = lock(&self.shared.observers);
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }
}

impl<S: ImageSource> ViewStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            shared: Arc::new(Shared {
                publishing: Mutex::new(()),
                state: Mutex::new(Arc::new(ViewState::Loading)),
                observers: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
            source: Arc::new(source),
        }
    }

    /// Publish `Loading` now and return the fetch that settles the state.
    ///
    /// The returned future owns only a weak reference to the store: if the
    /// store is dropped before the fetch completes, the result is discarded.
    pub fn refresh(&self) -> impl Future<Output = ()> + Send + 'static {
        info!("Refreshing picture list");
        self.shared.publish(ViewState::Loading);
        complete(Arc::downgrade(&self.shared), Arc::clone(&self.source))
    }

    /// [`refresh`](Self::refresh) run as a detached task on `runtime`.
    pub fn spawn_refresh(&self, runtime: &Handle) -> JoinHandle<()> {
        runtime.spawn(self.refresh())
    }
}

/// Turn a fetch outcome into the state to publish.
fn settle(result: Result<Vec<ImageRecord>, FetchError>) -> ViewState {
    match result {
        Ok(items) => {
            let state = ViewState::success(items);
            if let ViewState::Success { items, categories } = &state {
                info!(
                    "Loaded {} images in {} categories",
                    items.len(),
                    categories.len()
                );
            }
            state
        }
        Err(e) => {
            error!("Failed to fetch picture list: {e:?}");
            ViewState::Error {
                message: error_message(&e),
            }
        }
    }
}

/// The error's description, or [`FALLBACK_ERROR_MESSAGE`] if it has none.
pub fn error_message(e: &impl Display) -> String {
    let message = e.to_string();
    if message.trim().is_empty() {
        FALLBACK_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}
