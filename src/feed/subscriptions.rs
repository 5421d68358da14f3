//! Realtime subscription table keyed by listener GUID.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;

use crate::shared::SymbolName;

/// Per-subscription gate. The ticker holds the lock while it emits, so
/// clearing the flag waits out an in-progress emission.
pub(crate) type ActiveFlag = Arc<Mutex<bool>>;

pub(crate) fn lock_flag(flag: &Mutex<bool>) -> MutexGuard<'_, bool> {
    flag.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One live realtime timer.
pub(crate) struct RealtimeSubscription {
    symbol: SymbolName,
    active: ActiveFlag,
    handle: JoinHandle<()>,
}

impl RealtimeSubscription {
    pub(crate) fn new(symbol: SymbolName, active: ActiveFlag, handle: JoinHandle<()>) -> Self {
        Self {
            symbol,
            active,
            handle,
        }
    }

    fn cancel(&self) {
        *lock_flag(&self.active) = false;
        self.handle.abort();
    }
}

impl Drop for RealtimeSubscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Live realtime timers. Dropping a subscription cancels its timer.
///
/// Tick callbacks must not unsubscribe their own listener synchronously.
#[derive(Clone, Default)]
pub struct RealtimeSubscriptions {
    inner: Arc<Mutex<HashMap<String, RealtimeSubscription>>>,
}

impl RealtimeSubscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> MutexGuard<'_, HashMap<String, RealtimeSubscription>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a subscription. Returns `true` if one was replaced.
    pub(crate) fn insert(&self, listener_guid: &str, subscription: RealtimeSubscription) -> bool {
        let replaced = self.table().insert(listener_guid.to_string(), subscription);
        // The guard is gone; dropping the old subscription cancels it unlocked.
        let was_replaced = replaced.is_some();
        drop(replaced);
        was_replaced
    }

    /// Cancel one subscription. Returns `false` for an unknown GUID.
    pub fn remove(&self, listener_guid: &str) -> bool {
        let removed = self.table().remove(listener_guid);
        removed.is_some()
    }

    /// Cancel every subscription. Returns how many were live.
    pub fn clear(&self) -> usize {
        let drained: Vec<RealtimeSubscription> =
            self.table().drain().map(|(_, sub)| sub).collect();
        drained.len()
    }

    pub fn contains(&self, listener_guid: &str) -> bool {
        self.table().contains_key(listener_guid)
    }

    /// Symbol a listener is subscribed to.
    pub fn symbol(&self, listener_guid: &str) -> Option<SymbolName> {
        self.table().get(listener_guid).map(|sub| sub.symbol.clone())
    }

    pub fn len(&self) -> usize {
        self.table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table().is_empty()
    }
}

impl std::fmt::Debug for RealtimeSubscriptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut guids: Vec<String> = self.table().keys().cloned().collect();
        guids.sort();
        f.debug_struct("RealtimeSubscriptions")
            .field("listeners", &guids)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future;

    fn pending_subscription(symbol: &str) -> (RealtimeSubscription, ActiveFlag) {
        let active: ActiveFlag = Arc::new(Mutex::new(true));
        let handle = tokio::spawn(future::pending::<()>());
        (
            RealtimeSubscription::new(SymbolName::new(symbol), active.clone(), handle),
            active,
        )
    }

    #[tokio::test]
    async fn test_replace_cancels_previous() {
        let table = RealtimeSubscriptions::new();
        let (first, first_flag) = pending_subscription("PEPE");
        let (second, second_flag) = pending_subscription("WIF");

        assert!(!table.insert("guid-1", first));
        assert!(table.insert("guid-1", second));

        assert!(!*lock_flag(&first_flag));
        assert!(*lock_flag(&second_flag));
        assert_eq!(table.len(), 1);
        assert_eq!(table.symbol("guid-1"), Some(SymbolName::new("WIF")));
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let table = RealtimeSubscriptions::new();
        let (a, a_flag) = pending_subscription("PEPE");
        let (b, b_flag) = pending_subscription("PEPE");
        table.insert("a", a);
        table.insert("b", b);

        assert!(table.remove("a"));
        assert!(!table.remove("a"));
        assert!(!*lock_flag(&a_flag));
        assert!(table.contains("b"));

        assert_eq!(table.clear(), 1);
        assert!(!*lock_flag(&b_flag));
        assert!(table.is_empty());
    }
}
