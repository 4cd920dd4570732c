//! Cache Entries
//!
//! Per-key state machine `Idle -> Pending -> {Success, Error}` plus
//! publish/subscribe over cache keys.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::rc::{Rc, Weak};

use chrono::{DateTime, Duration, Utc};
use futures::future::{FutureExt, LocalBoxFuture, Shared};

/// Lifecycle of a single cache key
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryStatus {
    Idle,
    Pending,
    Success,
    Error,
}

/// Per-query behaviour
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QueryOptions {
    /// How long a successful result is served without refetching.
    /// Zero means every new consumer refetches.
    pub stale_time: Duration,
    /// Extra attempts after a failed fetch
    pub retry: u32,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            stale_time: Duration::zero(),
            retry: 0,
        }
    }
}

impl QueryOptions {
    pub fn stale_time(mut self, stale_time: Duration) -> Self {
        self.stale_time = stale_time;
        self
    }

    pub fn retry(mut self, retry: u32) -> Self {
        self.retry = retry;
        self
    }
}

/// Notification delivered to subscribers of a key
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheEvent<K> {
    /// A fetch (or `set_data`) stored new data
    Updated(K),
    /// The latest fetch failed
    Failed(K),
    /// Data is stale; observers should refetch
    Invalidated(K),
    /// Entry dropped (logout, explicit removal)
    Removed(K),
}

impl<K> CacheEvent<K> {
    pub fn key(&self) -> &K {
        match self {
            CacheEvent::Updated(key)
            | CacheEvent::Failed(key)
            | CacheEvent::Invalidated(key)
            | CacheEvent::Removed(key) => key,
        }
    }
}

/// Read-only view of one entry
#[derive(Debug)]
pub struct QueryState<V, E> {
    pub status: QueryStatus,
    pub data: Option<Rc<V>>,
    pub error: Option<E>,
    pub updated_at: Option<DateTime<Utc>>,
    pub is_invalidated: bool,
    pub is_fetching: bool,
}

type InFlight<V, E> = Shared<LocalBoxFuture<'static, Result<Rc<V>, E>>>;
type Listener<K> = Rc<dyn Fn(&CacheEvent<K>)>;
type Clock = Rc<dyn Fn() -> DateTime<Utc>>;

struct Entry<V, E> {
    status: QueryStatus,
    data: Option<Rc<V>>,
    error: Option<E>,
    updated_at: Option<DateTime<Utc>>,
    invalidated: bool,
    /// Only a request whose generation matches may write its result
    generation: u64,
    in_flight: Option<InFlight<V, E>>,
}

impl<V, E> Default for Entry<V, E> {
    fn default() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            updated_at: None,
            invalidated: false,
            generation: 0,
            in_flight: None,
        }
    }
}

impl<V, E> Entry<V, E> {
    fn fresh_data(&self, now: DateTime<Utc>, stale_time: Duration) -> Option<Rc<V>> {
        if self.status != QueryStatus::Success || self.invalidated {
            return None;
        }
        let updated_at = self.updated_at?;
        if now - updated_at < stale_time {
            self.data.clone()
        } else {
            None
        }
    }
}

struct Inner<K, V, E> {
    entries: HashMap<K, Entry<V, E>>,
    listeners: Vec<(u64, K, Listener<K>)>,
    next_listener_id: u64,
    next_generation: u64,
    clock: Clock,
}

impl<K, V, E> Inner<K, V, E> {
    fn bump_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }
}

/// Keeps a listener registered; dropping it unsubscribes
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

/// Shared handle to the cache. Cloning is cheap; all clones see the same entries.
pub struct QueryCache<K, V, E> {
    inner: Rc<RefCell<Inner<K, V, E>>>,
}

impl<K, V, E> Clone for QueryCache<K, V, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<K, V, E> Default for QueryCache<K, V, E>
where
    K: Clone + Eq + Hash + Debug + 'static,
    V: 'static,
    E: Clone + Debug + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, E> QueryCache<K, V, E>
where
    K: Clone + Eq + Hash + Debug + 'static,
    V: 'static,
    E: Clone + Debug + 'static,
{
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    /// Cache with a custom time source (staleness checks use it)
    pub fn with_clock(clock: impl Fn() -> DateTime<Utc> + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                entries: HashMap::new(),
                listeners: Vec::new(),
                next_listener_id: 0,
                next_generation: 0,
                clock: Rc::new(clock),
            })),
        }
    }

    pub fn snapshot(&self, key: &K) -> QueryState<V, E> {
        let inner = self.inner.borrow();
        match inner.entries.get(key) {
            Some(entry) => QueryState {
                status: entry.status,
                data: entry.data.clone(),
                error: entry.error.clone(),
                updated_at: entry.updated_at,
                is_invalidated: entry.invalidated,
                is_fetching: entry.in_flight.is_some(),
            },
            None => QueryState {
                status: QueryStatus::Idle,
                data: None,
                error: None,
                updated_at: None,
                is_invalidated: false,
                is_fetching: false,
            },
        }
    }

    /// Resolve `key`: fresh data is returned as-is, an in-flight request is
    /// joined, otherwise `fetcher` runs (with up to `options.retry` retries).
    pub async fn fetch<F, Fut>(&self, key: K, options: QueryOptions, fetcher: F) -> Result<Rc<V>, E>
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<V, E>> + 'static,
    {
        let request = {
            let mut inner = self.inner.borrow_mut();
            let now = (inner.clock)();
            let generation = inner.bump_generation();
            let entry = inner.entries.entry(key.clone()).or_default();

            if let Some(data) = entry.fresh_data(now, options.stale_time) {
                log::debug!("[query] {:?} served from cache", key);
                return Ok(data);
            }

            match &entry.in_flight {
                Some(request) => {
                    log::debug!("[query] {:?} joining in-flight request", key);
                    request.clone()
                }
                None => {
                    log::debug!("[query] {:?} fetching", key);
                    entry.status = QueryStatus::Pending;
                    entry.generation = generation;
                    let request = Self::start(Rc::downgrade(&self.inner), key.clone(), generation, options, fetcher);
                    entry.in_flight = Some(request.clone());
                    request
                }
            }
        };
        request.await
    }

    fn start<F, Fut>(
        inner: Weak<RefCell<Inner<K, V, E>>>,
        key: K,
        generation: u64,
        options: QueryOptions,
        fetcher: F,
    ) -> InFlight<V, E>
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<V, E>> + 'static,
    {
        async move {
            let mut attempt = 0;
            let result = loop {
                match fetcher().await {
                    Ok(value) => break Ok(Rc::new(value)),
                    Err(err) if attempt < options.retry => {
                        attempt += 1;
                        log::warn!("[query] {:?} failed ({:?}), retry {}/{}", key, err, attempt, options.retry);
                    }
                    Err(err) => break Err(err),
                }
            };
            if let Some(inner) = inner.upgrade() {
                Self::settle(&inner, &key, generation, &result);
            }
            result
        }
        .boxed_local()
        .shared()
    }

    fn settle(inner: &Rc<RefCell<Inner<K, V, E>>>, key: &K, generation: u64, result: &Result<Rc<V>, E>) {
        let event = {
            let mut guard = inner.borrow_mut();
            let now = (guard.clock)();
            let Some(entry) = guard.entries.get_mut(key) else {
                log::debug!("[query] {:?} removed before its request finished", key);
                return;
            };
            if entry.generation != generation {
                log::debug!("[query] {:?} discarding superseded result", key);
                return;
            }
            entry.in_flight = None;
            match result {
                Ok(data) => {
                    entry.status = QueryStatus::Success;
                    entry.data = Some(Rc::clone(data));
                    entry.error = None;
                    entry.updated_at = Some(now);
                    entry.invalidated = false;
                    CacheEvent::Updated(key.clone())
                }
                Err(err) => {
                    log::error!("[query] {:?} failed: {:?}", key, err);
                    entry.status = QueryStatus::Error;
                    entry.error = Some(err.clone());
                    CacheEvent::Failed(key.clone())
                }
            }
        };
        Self::publish(inner, event);
    }

    /// Mark `key` stale. A request already in flight is detached: its result
    /// is dropped and the next fetch starts over.
    pub fn invalidate(&self, key: &K) {
        {
            let mut inner = self.inner.borrow_mut();
            let generation = inner.bump_generation();
            if let Some(entry) = inner.entries.get_mut(key) {
                entry.invalidated = true;
                entry.generation = generation;
                entry.in_flight = None;
            }
        }
        log::debug!("[query] {:?} invalidated", key);
        Self::publish(&self.inner, CacheEvent::Invalidated(key.clone()));
    }

    /// Store `value` as if it had just been fetched
    pub fn set_data(&self, key: K, value: V) {
        {
            let mut inner = self.inner.borrow_mut();
            let now = (inner.clock)();
            let generation = inner.bump_generation();
            let entry = inner.entries.entry(key.clone()).or_default();
            entry.status = QueryStatus::Success;
            entry.data = Some(Rc::new(value));
            entry.error = None;
            entry.updated_at = Some(now);
            entry.invalidated = false;
            entry.generation = generation;
            entry.in_flight = None;
        }
        Self::publish(&self.inner, CacheEvent::Updated(key));
    }

    pub fn remove(&self, key: &K) {
        let removed = self.inner.borrow_mut().entries.remove(key);
        if removed.is_some() {
            drop(removed);
            Self::publish(&self.inner, CacheEvent::Removed(key.clone()));
        }
    }

    /// Drop every entry. Requests still in flight will not write back.
    pub fn clear(&self) {
        let entries = std::mem::take(&mut self.inner.borrow_mut().entries);
        log::debug!("[query] cleared {} entries", entries.len());
        let keys: Vec<K> = entries.keys().cloned().collect();
        drop(entries);
        for key in keys {
            Self::publish(&self.inner, CacheEvent::Removed(key));
        }
    }

    pub fn subscribe(&self, key: K, listener: impl Fn(&CacheEvent<K>) + 'static) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_listener_id;
            inner.next_listener_id += 1;
            inner.listeners.push((id, key, Rc::new(listener)));
            id
        };
        let weak = Rc::downgrade(&self.inner);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().listeners.retain(|(listener_id, _, _)| *listener_id != id);
                }
            })),
        }
    }

    fn publish(inner: &Rc<RefCell<Inner<K, V, E>>>, event: CacheEvent<K>) {
        // Collect first so listeners may call back into the cache
        let listeners: Vec<Listener<K>> = inner
            .borrow()
            .listeners
            .iter()
            .filter(|(_, key, _)| key == event.key())
            .map(|(_, _, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&event);
        }
    }
}
