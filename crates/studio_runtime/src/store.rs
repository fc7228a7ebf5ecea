//! Long-lived selection store shared by every screen.
//!
//! The store owns the active wallpaper, the favorite set and the studio settings for the lifetime
//! of the application. All mutations run through [`reduce_studio`] under one lock, so each
//! dispatch is atomic and readers always see the latest committed state. Subscribers receive an
//! immutable [`SelectionSnapshot`] for the current state and then one per committed change.

use std::{
    collections::BTreeMap,
    pin::Pin,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    task::{Context, Poll},
};

use futures::{
    channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender},
    Stream, StreamExt,
};
use log::debug;

use crate::{
    catalog::Catalog,
    config::StudioConfig,
    model::{ActiveWallpaper, AppSettings, DisplaySettings, SelectionSnapshot, StudioState},
    reducer::{reduce_studio, RuntimeEffect, StudioAction},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(pub u64);

struct StoreInner {
    state: StudioState,
    snapshot: Arc<SelectionSnapshot>,
    next_subscription_id: u64,
    subscribers: BTreeMap<SubscriptionId, UnboundedSender<Arc<SelectionSnapshot>>>,
}

impl StoreInner {
    fn publish(&mut self) {
        let snapshot = self.snapshot.clone();
        let before = self.subscribers.len();
        self.subscribers
            .retain(|_, sender| sender.unbounded_send(snapshot.clone()).is_ok());
        let stale = before - self.subscribers.len();
        if stale > 0 {
            debug!("pruned {stale} dropped selection subscriber(s)");
        }
    }
}

#[derive(Clone)]
/// Cloneable handle to the single selection store of a running app.
pub struct SelectionStore {
    catalog: Arc<Catalog>,
    inner: Arc<Mutex<StoreInner>>,
}

impl SelectionStore {
    /// Creates a store over `catalog` starting from `initial` at revision 0.
    pub fn new(catalog: Arc<Catalog>, initial: StudioState) -> Self {
        let snapshot = Arc::new(initial.snapshot(0));
        Self {
            catalog,
            inner: Arc::new(Mutex::new(StoreInner {
                state: initial,
                snapshot,
                next_subscription_id: 1,
                subscribers: BTreeMap::new(),
            })),
        }
    }

    /// Creates a store seeded from startup configuration.
    pub fn from_config(catalog: Arc<Catalog>, config: &StudioConfig) -> Self {
        Self::new(catalog, config.initial_state())
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        // State is only ever replaced whole, so a poisoned guard still holds a consistent value.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Applies `action`, publishes a snapshot when the state changed, and returns the effects.
    pub fn dispatch(&self, action: StudioAction) -> Vec<RuntimeEffect> {
        self.dispatch_and_read(action, |_| ()).0
    }

    /// Like [`SelectionStore::dispatch`], also reading the committed state under the same lock.
    pub(crate) fn dispatch_and_read<R>(
        &self,
        action: StudioAction,
        read: impl FnOnce(&StudioState) -> R,
    ) -> (Vec<RuntimeEffect>, R) {
        let mut inner = self.lock();
        let mut next = inner.state.clone();
        let effects = reduce_studio(&self.catalog, &mut next, action);

        if next != inner.state {
            let revision = inner.snapshot.revision.saturating_add(1);
            inner.snapshot = Arc::new(next.snapshot(revision));
            inner.state = next;
            debug!("selection store committed revision {revision}: {effects:?}");
            inner.publish();
        }

        let value = read(&inner.state);
        (effects, value)
    }

    /// Records `wallpaper_id` as active, using the catalog's category when it resolves and
    /// `fallback_category` otherwise.
    pub fn set_active_wallpaper(&self, wallpaper_id: &str, fallback_category: &str) {
        self.dispatch(StudioAction::SetActiveWallpaper {
            wallpaper_id: wallpaper_id.to_string(),
            fallback_category: fallback_category.to_string(),
        });
    }

    pub fn clear_active_wallpaper(&self) {
        self.dispatch(StudioAction::ClearActiveWallpaper);
    }

    /// Removes `wallpaper_id` from favorites when present, otherwise appends it.
    pub fn toggle_favorite(&self, wallpaper_id: &str) {
        self.dispatch(StudioAction::ToggleFavorite {
            wallpaper_id: wallpaper_id.to_string(),
        });
    }

    pub fn set_display_settings(&self, settings: DisplaySettings) {
        self.dispatch(StudioAction::SetDisplaySettings { settings });
    }

    pub fn set_app_settings(&self, settings: AppSettings) {
        self.dispatch(StudioAction::SetAppSettings { settings });
    }

    /// Latest committed snapshot.
    pub fn snapshot(&self) -> Arc<SelectionSnapshot> {
        self.lock().snapshot.clone()
    }

    pub fn active_wallpaper(&self) -> Option<ActiveWallpaper> {
        self.lock().state.active.clone()
    }

    pub fn favorite_ids(&self) -> Vec<String> {
        self.lock().state.favorites.as_slice().to_vec()
    }

    pub fn is_favorite(&self, wallpaper_id: &str) -> bool {
        self.lock().state.favorites.contains(wallpaper_id)
    }

    /// Subscribes to committed snapshots.
    ///
    /// The returned stream yields the current snapshot first, then every later snapshot in commit
    /// order until [`SelectionStore::unsubscribe`] is called or the subscription is dropped.
    ///
    /// Delivery is unbounded: a subscription that is kept alive must be polled, or snapshots queue
    /// up for it. Drop or unsubscribe a subscription that is no longer read.
    pub fn subscribe(&self) -> Subscription {
        let mut inner = self.lock();
        let id = SubscriptionId(inner.next_subscription_id);
        inner.next_subscription_id = inner.next_subscription_id.saturating_add(1);

        let (sender, receiver) = unbounded();
        // The receiver is still alive here, so the initial send cannot fail.
        let _ = sender.unbounded_send(inner.snapshot.clone());
        inner.subscribers.insert(id, sender);

        Subscription { id, receiver }
    }

    /// Ends a subscription. Returns `false` when `id` was not subscribed.
    ///
    /// The subscription's stream still yields snapshots already delivered, then ends.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.lock().subscribers.remove(&id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }
}

impl std::fmt::Debug for SelectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("SelectionStore")
            .field("revision", &inner.snapshot.revision)
            .field("state", &inner.state)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

/// Stream of [`SelectionSnapshot`] values for one subscriber.
pub struct Subscription {
    id: SubscriptionId,
    receiver: UnboundedReceiver<Arc<SelectionSnapshot>>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }
}

impl Stream for Subscription {
    type Item = Arc<SelectionSnapshot>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_next_unpin(cx)
    }
}

#[cfg(test)]
mod tests {
    use futures::{executor::block_on, FutureExt, StreamExt};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{catalog::fixtures::small_catalog, model::FavoriteSet};

    fn empty_store() -> SelectionStore {
        SelectionStore::new(Arc::new(small_catalog()), StudioState::default())
    }

    fn next_now(subscription: &mut Subscription) -> Option<Arc<SelectionSnapshot>> {
        subscription.next().now_or_never().flatten()
    }

    #[test]
    fn dispatch_and_read_sees_the_state_it_committed() {
        let store = empty_store();

        let (effects, active) = store.dispatch_and_read(
            StudioAction::SetActiveWallpaper {
                wallpaper_id: "s1".to_string(),
                fallback_category: "nature".to_string(),
            },
            |state| state.active.clone(),
        );

        assert_eq!(effects, vec![RuntimeEffect::SelectionChanged]);
        assert_eq!(
            active,
            Some(ActiveWallpaper {
                category: "space".to_string(),
                selection_id: "s1".to_string(),
            })
        );
        assert_eq!(store.snapshot().revision, 1);
    }

    #[test]
    fn subscriber_gets_latest_snapshot_then_each_commit() {
        let store = empty_store();
        store.toggle_favorite("n1");

        let mut subscription = store.subscribe();
        let first = block_on(subscription.next()).expect("initial snapshot");
        assert_eq!(first.revision, 1);
        assert_eq!(first.favorites, FavoriteSet::from_ids(["n1"]));

        store.set_active_wallpaper("n2", "space");
        store.toggle_favorite("n2");

        let second = block_on(subscription.next()).expect("selection snapshot");
        let third = block_on(subscription.next()).expect("favorites snapshot");
        assert_eq!(second.revision, 2);
        assert_eq!(
            second.active.as_ref().map(|a| a.category.as_str()),
            Some("nature")
        );
        assert_eq!(third.revision, 3);
        assert_eq!(third.favorites, FavoriteSet::from_ids(["n1", "n2"]));
        assert!(next_now(&mut subscription).is_none());
    }

    #[test]
    fn unchanged_state_publishes_nothing() {
        let store = empty_store();
        let mut subscription = store.subscribe();
        let _ = next_now(&mut subscription);

        store.clear_active_wallpaper();
        store.set_display_settings(DisplaySettings::default());

        assert!(next_now(&mut subscription).is_none());
        assert_eq!(store.snapshot().revision, 0);
    }

    #[test]
    fn unsubscribe_ends_the_stream_and_stops_delivery() {
        let store = empty_store();
        let mut subscription = store.subscribe();
        let _ = next_now(&mut subscription);

        assert!(store.unsubscribe(subscription.id()));
        assert!(!store.unsubscribe(subscription.id()));
        store.toggle_favorite("n1");

        assert_eq!(block_on(subscription.next()), None);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn dropped_subscriptions_are_pruned_on_publish() {
        let store = empty_store();
        let kept = store.subscribe();
        drop(store.subscribe());
        assert_eq!(store.subscriber_count(), 2);

        store.toggle_favorite("n1");

        assert_eq!(store.subscriber_count(), 1);
        drop(kept);
    }

    #[test]
    fn independent_subscribers_see_the_same_commits() {
        let store = empty_store();
        let mut home = store.subscribe();
        let mut favorites = store.subscribe();
        assert_ne!(home.id(), favorites.id());

        store.toggle_favorite("s1");

        let home_seen: Vec<u64> = std::iter::from_fn(|| next_now(&mut home))
            .map(|s| s.revision)
            .collect();
        let favorites_seen: Vec<u64> = std::iter::from_fn(|| next_now(&mut favorites))
            .map(|s| s.revision)
            .collect();
        assert_eq!(home_seen, vec![0, 1]);
        assert_eq!(home_seen, favorites_seen);
    }

    #[test]
    fn clones_share_one_state() {
        let store = empty_store();
        let other_screen = store.clone();

        other_screen.toggle_favorite("n2");
        other_screen.set_active_wallpaper("ghost", "space");

        assert!(store.is_favorite("n2"));
        assert_eq!(store.favorite_ids(), vec!["n2".to_string()]);
        assert_eq!(
            store.active_wallpaper(),
            Some(ActiveWallpaper {
                category: "space".to_string(),
                selection_id: "ghost".to_string(),
            })
        );
    }

    #[test]
    fn concurrent_toggles_are_serialized() {
        let store = empty_store();
        let handles: Vec<_> = (0..8)
            .map(|n| {
                let store = store.clone();
                std::thread::spawn(move || store.toggle_favorite(&format!("w{n}")))
            })
            .collect();
        for handle in handles {
            handle.join().expect("toggle thread");
        }

        let snapshot = store.snapshot();
        assert_eq!(snapshot.favorites.len(), 8);
        assert_eq!(snapshot.revision, 8);
    }
}
