//! Synchronous publish/subscribe channel and disposable handles.
//!
//! Every external service exposes its occurrences as a [`Signal`]. Listeners
//! are called synchronously, on the emitting thread, in subscription order,
//! and once per emission. There is no buffering: a listener only sees values
//! emitted while it is subscribed.
//!
//! ## Rules
//! - **No lock held during delivery**: `emit` snapshots the listener list, so
//!   listeners may subscribe or dispose from inside a callback.
//! - **Disposal is immediate**: a listener disposed mid-emission (by an
//!   earlier listener of the same emission) is skipped.
//! - **Dropping a [`Disposable`] does not unsubscribe**; only `dispose()` does.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Listener<T> {
    id: u64,
    active: Arc<AtomicBool>,
    callback: Callback<T>,
}

impl<T> Clone for Listener<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            active: Arc::clone(&self.active),
            callback: Arc::clone(&self.callback),
        }
    }
}

struct SignalInner<T> {
    listeners: Mutex<Vec<Listener<T>>>,
    next_id: AtomicU64,
}

/// Multi-listener synchronous signal.
///
/// Cloning a `Signal` yields another handle to the same listener set.
pub struct Signal<T> {
    inner: Arc<SignalInner<T>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.inner.listeners.lock().len())
            .finish()
    }
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SignalInner {
                listeners: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().len()
    }

    /// Deliver `value` to every live listener, in subscription order.
    pub fn emit(&self, value: &T) {
        let snapshot: Vec<Listener<T>> = self.inner.listeners.lock().clone();
        for listener in snapshot {
            if listener.active.load(Ordering::Acquire) {
                (listener.callback)(value);
            }
        }
    }
}

impl<T: 'static> Signal<T> {
    /// Register a listener. The returned handle is the only way to remove it.
    pub fn subscribe<F>(&self, callback: F) -> Disposable
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let active = Arc::new(AtomicBool::new(true));
        self.inner.listeners.lock().push(Listener {
            id,
            active: Arc::clone(&active),
            callback: Arc::new(callback),
        });

        let weak: Weak<SignalInner<T>> = Arc::downgrade(&self.inner);
        Disposable::from_fn(move || {
            active.store(false, Ordering::Release);
            if let Some(inner) = weak.upgrade() {
                inner.listeners.lock().retain(|l| l.id != id);
            }
        })
    }
}

struct DisposeState {
    teardown: Mutex<Option<Box<dyn FnOnce() + Send>>>,
    disposed: AtomicBool,
}

/// Handle to an active subscription or resource hold.
///
/// `dispose()` runs the teardown exactly once; further calls are no-ops.
/// Clones share the same underlying state.
#[derive(Clone)]
pub struct Disposable {
    state: Arc<DisposeState>,
}

impl fmt::Debug for Disposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disposable")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

impl Disposable {
    pub fn from_fn<F>(teardown: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            state: Arc::new(DisposeState {
                teardown: Mutex::new(Some(Box::new(teardown))),
                disposed: AtomicBool::new(false),
            }),
        }
    }

    /// A handle with nothing to release.
    pub fn noop() -> Self {
        Self::from_fn(|| {})
    }

    /// Combine several handles into one that releases them in order.
    pub fn all(handles: Vec<Disposable>) -> Self {
        Self::from_fn(move || {
            for handle in handles {
                handle.dispose();
            }
        })
    }

    pub fn dispose(&self) {
        if self.state.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        let teardown = self.state.teardown.lock().take();
        if let Some(teardown) = teardown {
            teardown();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.state.disposed.load(Ordering::Acquire)
    }
}

/// Veto flag shared between a source and the listeners of a "before" signal.
///
/// The source emits, then checks [`Cancellation::is_cancelled`] to decide
/// whether to carry on with the action.
#[derive(Clone, Default)]
pub struct Cancellation(Arc<AtomicBool>);

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl fmt::Debug for Cancellation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cancellation").field(&self.is_cancelled()).finish()
    }
}

impl PartialEq for Cancellation {
    fn eq(&self, other: &Self) -> bool {
        self.is_cancelled() == other.is_cancelled()
    }
}
