use crate::model::{ArticleEntry, EventEntry, MemoEntry, PageEntry};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// How long a fetched collection may be served from cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Never cache; every use re-fetches.
    Disabled,
    /// Fetch once per cache lifetime. A failed load caches its empty
    /// result too, so there is no hot retry loop; `reset` re-arms it.
    Forever,
    /// Serve the cached copy until it is older than the given duration.
    Ttl(Duration),
}

#[derive(Debug)]
struct Cached<T> {
    entries: Arc<Vec<T>>,
    fetched_at: Instant,
}

/// One cached collection.
#[derive(Debug)]
pub struct CacheSlot<T> {
    inner: RwLock<Option<Cached<T>>>,
}

impl<T> Default for CacheSlot<T> {
    fn default() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }
}

impl<T> CacheSlot<T> {
    /// Return the cached entries if still fresh under `policy`, otherwise
    /// run `load` and (policy permitting) store its result.
    ///
    /// Concurrent misses may each run `load`; the slot is overwritten, not
    /// appended, so whichever write lands last is the value every later
    /// call observes.
    pub async fn get_or_load<F, Fut>(&self, policy: CachePolicy, load: F) -> Arc<Vec<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Arc<Vec<T>>>,
    {
        if policy == CachePolicy::Disabled {
            return load().await;
        }

        if let Some(cached) = self.inner.read().await.as_ref() {
            let fresh = match policy {
                CachePolicy::Disabled => false,
                CachePolicy::Forever => true,
                CachePolicy::Ttl(ttl) => cached.fetched_at.elapsed() < ttl,
            };
            if fresh {
                return Arc::clone(&cached.entries);
            }
        }

        let entries = load().await;
        *self.inner.write().await = Some(Cached {
            entries: Arc::clone(&entries),
            fetched_at: Instant::now(),
        });
        entries
    }

    pub async fn reset(&self) {
        *self.inner.write().await = None;
    }
}

/// Explicit cache over all four collections, owned by the caller.
///
/// Replaces the ambient module-level cache of the original site script;
/// tests and callers control its lifetime and can invalidate it.
#[derive(Debug, Default)]
pub struct SourceCache {
    pub(crate) pages: CacheSlot<PageEntry>,
    pub(crate) articles: CacheSlot<ArticleEntry>,
    pub(crate) memos: CacheSlot<MemoEntry>,
    pub(crate) events: CacheSlot<EventEntry>,
}

impl SourceCache {
    /// Drop every cached collection; the next use re-fetches.
    pub async fn reset(&self) {
        self.pages.reset().await;
        self.articles.reset().await;
        self.memos.reset().await;
        self.events.reset().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn load_counted(counter: &AtomicUsize, value: Vec<u32>) -> Arc<Vec<u32>> {
        counter.fetch_add(1, Ordering::SeqCst);
        Arc::new(value)
    }

    #[tokio::test]
    async fn forever_policy_loads_once() {
        let slot: CacheSlot<u32> = CacheSlot::default();
        let loads = AtomicUsize::new(0);

        for _ in 0..3 {
            let got = slot
                .get_or_load(CachePolicy::Forever, || load_counted(&loads, vec![1]))
                .await;
            assert_eq!(*got, vec![1]);
        }
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn forever_policy_caches_empty_failure_result() {
        let slot: CacheSlot<u32> = CacheSlot::default();
        let loads = AtomicUsize::new(0);

        let first = slot
            .get_or_load(CachePolicy::Forever, || load_counted(&loads, vec![]))
            .await;
        assert!(first.is_empty());

        // A later call with data available still sees the cached empty set.
        let second = slot
            .get_or_load(CachePolicy::Forever, || load_counted(&loads, vec![7]))
            .await;
        assert!(second.is_empty());
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn disabled_policy_reloads_every_time() {
        let slot: CacheSlot<u32> = CacheSlot::default();
        let loads = AtomicUsize::new(0);

        for _ in 0..3 {
            slot.get_or_load(CachePolicy::Disabled, || load_counted(&loads, vec![1]))
                .await;
        }
        assert_eq!(loads.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn ttl_policy_reloads_after_expiry() {
        let slot: CacheSlot<u32> = CacheSlot::default();
        let loads = AtomicUsize::new(0);
        let policy = CachePolicy::Ttl(Duration::from_millis(20));

        slot.get_or_load(policy, || load_counted(&loads, vec![1])).await;
        slot.get_or_load(policy, || load_counted(&loads, vec![1])).await;
        assert_eq!(loads.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_millis(30)).await;
        slot.get_or_load(policy, || load_counted(&loads, vec![1])).await;
        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn reset_forces_reload() {
        let slot: CacheSlot<u32> = CacheSlot::default();
        let loads = AtomicUsize::new(0);

        slot.get_or_load(CachePolicy::Forever, || load_counted(&loads, vec![1]))
            .await;
        slot.reset().await;
        slot.get_or_load(CachePolicy::Forever, || load_counted(&loads, vec![2]))
            .await;
        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }
}
