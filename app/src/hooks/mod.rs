//! Observable fetch state for views.
//!
//! `Query` runs a producer keyed by a dependency value and publishes
//! `FetchState` through a `watch` channel. Changing the dependencies through
//! `set_dependencies` refetches. `Mutation` runs a producer on demand.
//!
//! There is no caching and no cancellation. A fetch spawned by `refetch`
//! keeps running, and keeps writing state, after every view holding the
//! query is gone.

pub mod destinations;
pub mod trips;

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use futures::future::{BoxFuture, FutureExt};
use tokio::sync::watch;
use trippy_core::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<ApiError>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> FetchState<T> {
    fn start(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn finish(&mut self, result: &Result<T, ApiError>)
    where
        T: Clone,
    {
        self.loading = false;
        match result {
            Ok(data) => self.data = Some(data.clone()),
            Err(err) => {
                self.data = None;
                self.error = Some(err.clone());
            }
        }
    }
}

type Producer<T, D> = dyn Fn(D) -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync;
type Condition<D> = dyn Fn(&D) -> bool + Send + Sync;

pub struct Query<T, D> {
    inner: Arc<QueryInner<T, D>>,
}

impl<T, D> Clone for Query<T, D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct QueryInner<T, D> {
    producer: Box<Producer<T, D>>,
    condition: Box<Condition<D>>,
    deps: Mutex<D>,
    state: watch::Sender<FetchState<T>>,
}

impl<T, D> Query<T, D>
where
    T: Clone + Send + Sync + 'static,
    D: Clone + PartialEq + Send + 'static,
{
    pub fn new<F, Fut>(deps: D, producer: F) -> Self
    where
        F: Fn(D) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        Self::with_condition(deps, |_| true, producer)
    }

    /// Automatic fetches (on mount and on dependency changes) only run while
    /// `condition` holds for the current dependencies.
    pub fn with_condition<C, F, Fut>(deps: D, condition: C, producer: F) -> Self
    where
        C: Fn(&D) -> bool + Send + Sync + 'static,
        F: Fn(D) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let (state, _) = watch::channel(FetchState::default());
        Self {
            inner: Arc::new(QueryInner {
                producer: Box::new(move |deps| producer(deps).boxed()),
                condition: Box::new(condition),
                deps: Mutex::new(deps),
                state,
            }),
        }
    }

    /// Start the first fetch in the background when `immediate` is set. The
    /// state reads as loading from this point on.
    pub fn mount(self, immediate: bool) -> Self {
        if immediate && self.enabled() {
            self.inner.state.send_modify(FetchState::start);
            self.refetch();
        }
        self
    }

    pub fn enabled(&self) -> bool {
        (self.inner.condition)(&*self.inner.deps())
    }

    pub async fn fetch(&self) -> Result<T, ApiError> {
        let deps = self.dependencies();
        self.inner.state.send_modify(FetchState::start);
        let result = (self.inner.producer)(deps).await;
        self.inner.state.send_modify(|s| s.finish(&result));
        result
    }

    pub fn refetch(&self) {
        let query = self.clone();
        tokio::spawn(async move {
            // the outcome lands in the published state
            let _ = query.fetch().await;
        });
    }

    pub fn reset(&self) {
        self.inner.state.send_replace(FetchState::default());
    }

    pub fn snapshot(&self) -> FetchState<T> {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.inner.state.subscribe()
    }

    /// Wait until no fetch is running and return the state at that point.
    pub async fn settled(&self) -> FetchState<T> {
        let mut rx = self.subscribe();
        loop {
            {
                let state = rx.borrow_and_update();
                if !state.loading {
                    return state.clone();
                }
            }
            if rx.changed().await.is_err() {
                return self.snapshot();
            }
        }
    }

    pub fn dependencies(&self) -> D {
        self.inner.deps().clone()
    }

    /// Replace the dependencies. A different value refetches in the
    /// background if the query is enabled for it. Returns whether it changed.
    pub fn set_dependencies(&self, deps: D) -> bool {
        {
            let mut current = self.inner.deps();
            if *current == deps {
                return false;
            }
            *current = deps;
        }
        if self.enabled() {
            self.refetch();
        }
        true
    }

    /// Edit the loaded data in place, e.g. to swap in a mutated entity.
    pub fn update(&self, f: impl FnOnce(&mut Option<T>)) {
        self.inner.state.send_modify(|s| f(&mut s.data));
    }
}

impl<T, D> QueryInner<T, D> {
    fn deps(&self) -> std::sync::MutexGuard<'_, D> {
        self.deps.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct Mutation<T, V> {
    inner: Arc<MutationInner<T, V>>,
}

impl<T, V> Clone for Mutation<T, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct MutationInner<T, V> {
    producer: Box<Producer<T, V>>,
    state: watch::Sender<FetchState<T>>,
}

impl<T, V> Mutation<T, V>
where
    T: Clone + Send + Sync + 'static,
    V: Send + 'static,
{
    pub fn new<F, Fut>(producer: F) -> Self
    where
        F: Fn(V) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let (state, _) = watch::channel(FetchState::default());
        Self {
            inner: Arc::new(MutationInner {
                producer: Box::new(move |vars| producer(vars).boxed()),
                state,
            }),
        }
    }

    /// Run the mutation. The error is recorded in the state and returned.
    pub async fn mutate(&self, vars: V) -> Result<T, ApiError> {
        self.inner.state.send_modify(FetchState::start);
        let result = (self.inner.producer)(vars).await;
        self.inner.state.send_modify(|s| s.finish(&result));
        result
    }

    pub fn reset(&self) {
        self.inner.state.send_replace(FetchState::default());
    }

    pub fn snapshot(&self) -> FetchState<T> {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.inner.state.subscribe()
    }
}
