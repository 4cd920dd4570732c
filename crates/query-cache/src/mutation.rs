//! Mutations
//!
//! One-shot side effects that invalidate cached queries on success.

use std::cell::Cell;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;

use crate::cache::QueryCache;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationStatus {
    Idle,
    Pending,
    Success,
    Error,
}

/// A side-effecting call plus the query keys it makes stale.
/// Failures are returned to the caller; nothing is retried.
pub struct Mutation<K> {
    invalidates: Vec<K>,
    status: Cell<MutationStatus>,
}

impl<K> Mutation<K>
where
    K: Clone + Eq + Hash + Debug + 'static,
{
    pub fn new(invalidates: impl IntoIterator<Item = K>) -> Self {
        Self {
            invalidates: invalidates.into_iter().collect(),
            status: Cell::new(MutationStatus::Idle),
        }
    }

    pub fn status(&self) -> MutationStatus {
        self.status.get()
    }

    pub fn is_pending(&self) -> bool {
        self.status.get() == MutationStatus::Pending
    }

    /// Await `call`; invalidation happens only after it resolves successfully
    pub async fn execute<V, E, T, ME, Fut>(&self, cache: &QueryCache<K, V, E>, call: Fut) -> Result<T, ME>
    where
        V: 'static,
        E: Clone + Debug + 'static,
        ME: Debug,
        Fut: Future<Output = Result<T, ME>>,
    {
        self.status.set(MutationStatus::Pending);
        match call.await {
            Ok(value) => {
                self.status.set(MutationStatus::Success);
                for key in &self.invalidates {
                    cache.invalidate(key);
                }
                Ok(value)
            }
            Err(err) => {
                log::warn!("[mutation] failed: {:?}", err);
                self.status.set(MutationStatus::Error);
                Err(err)
            }
        }
    }
}
