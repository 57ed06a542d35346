//! Cookie cache: an optional accelerator holding serialized claims by session
//!
//! The cache is disposable. Every entry can be rebuilt from the session store,
//! so a cache miss, an eviction or the no-op implementation never changes the
//! outcome of an operation.

mod cookie_cache;

#[cfg(test)]
mod tests;

pub use cookie_cache::{CookieCache, CookieCacheEntry, InMemoryCookieCache, NoOpCookieCache};
