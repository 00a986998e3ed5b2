//! Proxy Module
//!
//! Read-through coordination between the cache engine and the backing store.

mod read_through;

pub use read_through::{Lookup, LookupSource, ReadThroughCache};
