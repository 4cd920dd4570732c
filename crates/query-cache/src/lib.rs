//! Query Cache
//!
//! Keyed cache of server data for single-threaded UIs.
//!
//! - A query fetches once per key and shares its in-flight request with every
//!   concurrent consumer of that key.
//! - A mutation performs a side effect and, on success, invalidates the keys it
//!   touches. Subscribers of those keys are told to refetch.
//!
//! Handles are `Rc`-based and never cross threads.

mod cache;
mod mutation;

pub use cache::{CacheEvent, QueryCache, QueryOptions, QueryState, QueryStatus, Subscription};
pub use mutation::{Mutation, MutationStatus};
