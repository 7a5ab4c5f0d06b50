//! Request-coalescing result cache with absolute per-entry TTL.
//!
//! At most one fetch runs per key at any time. The first caller to miss spawns
//! the fetch as a task owned by the cache; every caller that arrives while it
//! is outstanding subscribes to the same outcome. Successful results are stored
//! for `ttl` measured from population (no access-time refresh). Failures are
//! handed to every waiter and never stored.
//!
//! Each stored entry carries a generation id and owns its expiry task. The
//! expiry task only removes the entry it was scheduled for, and replacing or
//! invalidating an entry aborts the superseded expiry task.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use rialto_core::RialtoError;
use tokio::sync::{Mutex, watch};
use tokio::task::AbortHandle;
use tokio::time::Instant;

type Outcome<V> = Option<Result<V, RialtoError>>;

struct Entry<V> {
    value: V,
    expires_at: Instant,
    generation: u64,
    expiry: AbortHandle,
}

enum Slot<V> {
    Ready(Entry<V>),
    Pending {
        generation: u64,
        rx: watch::Receiver<Outcome<V>>,
    },
}

impl<V> Slot<V> {
    const fn generation(&self) -> u64 {
        match self {
            Self::Ready(e) => e.generation,
            Self::Pending { generation, .. } => *generation,
        }
    }

    fn release(self) {
        if let Self::Ready(e) = self {
            e.expiry.abort();
        }
    }
}

struct Inner<K, V> {
    slots: Mutex<HashMap<K, Slot<V>>>,
    next_generation: AtomicU64,
}

impl<K, V> Drop for Inner<K, V> {
    fn drop(&mut self) {
        for (_, slot) in self.slots.get_mut().drain() {
            slot.release();
        }
    }
}

/// Single-flight, TTL-bounded cache keyed by `K`.
///
/// Cloning yields another handle to the same cache. Dropping the last handle
/// aborts every pending expiry task; fetches already in flight still run to
/// completion so their waiters get an answer.
pub struct CoalescingCache<K, V> {
    inner: Arc<Inner<K, V>>,
}

impl<K, V> Clone for CoalescingCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> fmt::Debug for CoalescingCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoalescingCache").finish_non_exhaustive()
    }
}

impl<K, V> Default for CoalescingCache<K, V> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Inner {
                slots: Mutex::new(HashMap::new()),
                next_generation: AtomicU64::new(1),
            }),
        }
    }
}

impl<K, V> CoalescingCache<K, V>
where
    K: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the live value for `key`, or run `fetch` once for all concurrent callers.
    ///
    /// A `ttl` of zero still coalesces concurrent callers but stores nothing.
    ///
    /// # Errors
    /// Returns the fetch error (shared by every coalesced caller), or
    /// `RialtoError::Other` when the fetch task panicked or was aborted.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        key: K,
        ttl: Duration,
        fetch: F,
    ) -> Result<V, RialtoError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, RialtoError>> + Send + 'static,
    {
        let rx = {
            let mut slots = self.inner.slots.lock().await;
            match slots.get(&key) {
                Some(Slot::Ready(e)) if Instant::now() < e.expires_at => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(key = ?key, "cache hit");
                    return Ok(e.value.clone());
                }
                Some(Slot::Pending { rx, .. }) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(key = ?key, "joining in-flight fetch");
                    rx.clone()
                }
                _ => self.start_fetch(&mut slots, key, ttl, fetch()),
            }
        };
        await_outcome(rx).await
    }

    fn start_fetch<Fut>(
        &self,
        slots: &mut HashMap<K, Slot<V>>,
        key: K,
        ttl: Duration,
        fut: Fut,
    ) -> watch::Receiver<Outcome<V>>
    where
        Fut: Future<Output = Result<V, RialtoError>> + Send + 'static,
    {
        #[cfg(feature = "tracing")]
        tracing::debug!(key = ?key, "cache miss");
        if let Some(stale) = slots.remove(&key) {
            stale.release();
        }
        let generation = self.inner.next_generation.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = watch::channel(None);
        slots.insert(
            key.clone(),
            Slot::Pending {
                generation,
                rx: rx.clone(),
            },
        );
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let outcome = match tokio::spawn(fut).await {
                Ok(res) => res,
                Err(e) => Err(RialtoError::Other(format!("cache fetch failed: {e}"))),
            };
            inner.settle(key, generation, ttl, &outcome).await;
            let _ = tx.send(Some(outcome));
        });
        rx
    }

    /// The live value for `key`, if any. Never triggers a fetch.
    pub async fn get(&self, key: &K) -> Option<V> {
        let slots = self.inner.slots.lock().await;
        match slots.get(key) {
            Some(Slot::Ready(e)) if Instant::now() < e.expires_at => Some(e.value.clone()),
            _ => None,
        }
    }

    /// Drop `key` and cancel its expiry. Returns whether anything was removed.
    ///
    /// Invalidating a key with a fetch in flight detaches that fetch: its
    /// current waiters still receive the result, but it is not stored.
    pub async fn invalidate(&self, key: &K) -> bool {
        let removed = self.inner.slots.lock().await.remove(key);
        removed.map(Slot::release).is_some()
    }

    /// Drop every entry and detach every in-flight fetch.
    pub async fn clear(&self) {
        let drained: Vec<Slot<V>> = {
            let mut slots = self.inner.slots.lock().await;
            slots.drain().map(|(_, s)| s).collect()
        };
        drained.into_iter().for_each(Slot::release);
    }

    /// Number of live stored entries (in-flight fetches are not counted).
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.inner
            .slots
            .lock()
            .await
            .values()
            .filter(|s| matches!(s, Slot::Ready(e) if now < e.expires_at))
            .count()
    }

    /// True when no live entry is stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<K, V> Inner<K, V>
where
    K: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    // Install the outcome of fetch `generation` unless the slot was invalidated meanwhile.
    async fn settle(
        self: &Arc<Self>,
        key: K,
        generation: u64,
        ttl: Duration,
        outcome: &Result<V, RialtoError>,
    ) {
        let mut slots = self.slots.lock().await;
        if slots.get(&key).map(Slot::generation) != Some(generation) {
            return;
        }
        match outcome {
            Ok(value) if !ttl.is_zero() => {
                let expiry = spawn_expiry(Arc::downgrade(self), key.clone(), generation, ttl);
                slots.insert(
                    key,
                    Slot::Ready(Entry {
                        value: value.clone(),
                        expires_at: Instant::now() + ttl,
                        generation,
                        expiry,
                    }),
                );
            }
            _ => {
                #[cfg(feature = "tracing")]
                if let Err(e) = outcome {
                    tracing::warn!(key = ?key, error = %e, "fetch failed; not cached");
                }
                slots.remove(&key);
            }
        }
    }
}

fn spawn_expiry<K, V>(inner: Weak<Inner<K, V>>, key: K, generation: u64, ttl: Duration) -> AbortHandle
where
    K: Eq + Hash + fmt::Debug + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    tokio::spawn(async move {
        tokio::time::sleep(ttl).await;
        let Some(inner) = inner.upgrade() else {
            return;
        };
        let mut slots = inner.slots.lock().await;
        if matches!(slots.get(&key), Some(Slot::Ready(e)) if e.generation == generation) {
            #[cfg(feature = "tracing")]
            tracing::debug!(key = ?key, "cache entry expired");
            slots.remove(&key);
        }
    })
    .abort_handle()
}

async fn await_outcome<V: Clone>(mut rx: watch::Receiver<Outcome<V>>) -> Result<V, RialtoError> {
    let abandoned = || RialtoError::Other("cache fetch abandoned".to_string());
    let outcome = rx.wait_for(Option::is_some).await.map_err(|_| abandoned())?;
    outcome.as_ref().map_or_else(|| Err(abandoned()), Clone::clone)
}
