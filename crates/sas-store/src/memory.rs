use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use sas_types::{ActorId, ObjectId, PageWindow};

use crate::error::{StoreError, StoreResult};
use crate::relation::{FavoritesPage, LikeRelation};
use crate::traits::LikeStore;

#[derive(Default)]
struct LikeState {
    relations: HashMap<(ActorId, ObjectId), LikeRelation>,
    /// Per-actor like order, oldest first.
    by_actor: HashMap<ActorId, Vec<ObjectId>>,
}

/// In-memory like store.
///
/// Intended for tests and embedding. All relations live behind one `RwLock`,
/// so a batched lookup under a single read guard is a consistent snapshot.
///
/// Every `liked_subset` call is counted (see [`Self::lookup_count`]) and the
/// store can be taken offline with [`Self::set_available`] to exercise
/// failure paths.
pub struct InMemoryLikeStore {
    state: RwLock<LikeState>,
    lookups: AtomicUsize,
    available: AtomicBool,
}

impl InMemoryLikeStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(LikeState::default()),
            lookups: AtomicUsize::new(0),
            available: AtomicBool::new(true),
        }
    }

    /// Number of live relations.
    pub fn len(&self) -> usize {
        self.read().map(|s| s.relations.len()).unwrap_or(0)
    }

    /// Returns `true` if no relations are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of `liked_subset` round trips served so far.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Simulate an outage (`false`) or recovery (`true`).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// The stored relation for a pair, if any.
    pub fn relation(
        &self,
        actor: &ActorId,
        object: &ObjectId,
    ) -> StoreResult<Option<LikeRelation>> {
        let state = self.read()?;
        Ok(state.relations.get(&(actor.clone(), object.clone())).cloned())
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("in-memory like store is offline".into()))
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, LikeState>> {
        self.state
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, LikeState>> {
        self.state
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }
}

impl Default for InMemoryLikeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LikeStore for InMemoryLikeStore {
    async fn liked_subset(
        &self,
        actor: &ActorId,
        objects: &BTreeSet<ObjectId>,
    ) -> StoreResult<BTreeSet<ObjectId>> {
        if objects.is_empty() {
            return Ok(BTreeSet::new());
        }
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let state = self.read()?;
        Ok(objects
            .iter()
            .filter(|object| {
                state
                    .relations
                    .contains_key(&(actor.clone(), (*object).clone()))
            })
            .cloned()
            .collect())
    }

    async fn like(&self, actor: &ActorId, object: &ObjectId) -> StoreResult<bool> {
        self.check_available()?;
        if object.is_blank() || actor.is_blank() {
            return Err(StoreError::Invalid("like relation needs actor and object ids".into()));
        }
        let mut state = self.write()?;
        let key = (actor.clone(), object.clone());
        if state.relations.contains_key(&key) {
            return Ok(false);
        }
        state
            .relations
            .insert(key, LikeRelation::new(actor.clone(), object.clone()));
        state
            .by_actor
            .entry(actor.clone())
            .or_default()
            .push(object.clone());
        Ok(true)
    }

    async fn unlike(&self, actor: &ActorId, object: &ObjectId) -> StoreResult<bool> {
        self.check_available()?;
        let mut state = self.write()?;
        let removed = state
            .relations
            .remove(&(actor.clone(), object.clone()))
            .is_some();
        if removed {
            if let Some(order) = state.by_actor.get_mut(actor) {
                order.retain(|id| id != object);
            }
        }
        Ok(removed)
    }

    async fn favorites(&self, actor: &ActorId, window: PageWindow) -> StoreResult<FavoritesPage> {
        self.check_available()?;
        let state = self.read()?;
        let Some(order) = state.by_actor.get(actor) else {
            return Ok(FavoritesPage::default());
        };
        let newest_first: Vec<&ObjectId> = order.iter().rev().collect();
        let range = window.range(newest_first.len());
        Ok(FavoritesPage {
            object_ids: newest_first[range].iter().map(|id| (*id).clone()).collect(),
            total: order.len(),
        })
    }
}

impl std::fmt::Debug for InMemoryLikeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryLikeStore")
            .field("relation_count", &self.len())
            .field("lookups", &self.lookup_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(nick: &str) -> ActorId {
        ActorId::local(nick, "localhost")
    }

    fn obj(n: usize) -> ObjectId {
        ObjectId::new(format!("http://localhost/api/note/{n}")).unwrap()
    }

    fn ids(range: std::ops::Range<usize>) -> BTreeSet<ObjectId> {
        range.map(obj).collect()
    }

    #[tokio::test]
    async fn like_is_idempotent() {
        let store = InMemoryLikeStore::new();
        assert!(store.like(&actor("allan"), &obj(1)).await.unwrap());
        assert!(!store.like(&actor("allan"), &obj(1)).await.unwrap());
        assert_eq!(store.len(), 1);
        assert!(store.relation(&actor("allan"), &obj(1)).unwrap().is_some());
    }

    #[tokio::test]
    async fn unlike_absent_is_noop() {
        let store = InMemoryLikeStore::new();
        assert!(!store.unlike(&actor("allan"), &obj(1)).await.unwrap());
        store.like(&actor("allan"), &obj(1)).await.unwrap();
        assert!(store.unlike(&actor("allan"), &obj(1)).await.unwrap());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn liked_subset_is_per_actor() {
        let store = InMemoryLikeStore::new();
        for n in (0..10).step_by(2) {
            store.like(&actor("allan"), &obj(n)).await.unwrap();
        }
        store.like(&actor("umslopogaas"), &obj(3)).await.unwrap();

        let liked = store.liked_subset(&actor("allan"), &ids(0..10)).await.unwrap();
        assert_eq!(liked, [0, 2, 4, 6, 8].into_iter().map(obj).collect());

        let liked = store
            .liked_subset(&actor("umslopogaas"), &ids(0..10))
            .await
            .unwrap();
        assert_eq!(liked, BTreeSet::from([obj(3)]));
    }

    #[tokio::test]
    async fn one_lookup_per_batch() {
        let store = InMemoryLikeStore::new();
        store.liked_subset(&actor("allan"), &ids(0..200)).await.unwrap();
        assert_eq!(store.lookup_count(), 1);
    }

    #[tokio::test]
    async fn empty_batch_is_free() {
        let store = InMemoryLikeStore::new();
        store.set_available(false);
        let liked = store
            .liked_subset(&actor("allan"), &BTreeSet::new())
            .await
            .unwrap();
        assert!(liked.is_empty());
        assert_eq!(store.lookup_count(), 0);
    }

    #[tokio::test]
    async fn offline_store_fails_lookups() {
        let store = InMemoryLikeStore::new();
        store.like(&actor("allan"), &obj(1)).await.unwrap();
        store.set_available(false);
        let err = store.liked_subset(&actor("allan"), &ids(0..3)).await.unwrap_err();
        assert!(err.is_transient());
        store.set_available(true);
        let liked = store.liked_subset(&actor("allan"), &ids(0..3)).await.unwrap();
        assert_eq!(liked, BTreeSet::from([obj(1)]));
    }

    #[tokio::test]
    async fn favorites_newest_first() {
        let store = InMemoryLikeStore::new();
        for n in 0..5 {
            store.like(&actor("allan"), &obj(n)).await.unwrap();
        }
        store.unlike(&actor("allan"), &obj(2)).await.unwrap();

        let page = store
            .favorites(&actor("allan"), PageWindow::new(0, 3).unwrap())
            .await
            .unwrap();
        assert_eq!(page.total, 4);
        assert_eq!(page.object_ids, vec![obj(4), obj(3), obj(1)]);

        let page = store
            .favorites(&actor("allan"), PageWindow::new(3, 3).unwrap())
            .await
            .unwrap();
        assert_eq!(page.object_ids, vec![obj(0)]);
    }

    #[tokio::test]
    async fn favorites_of_stranger_is_empty() {
        let store = InMemoryLikeStore::new();
        let page = store
            .favorites(&actor("nobody"), PageWindow::default())
            .await
            .unwrap();
        assert_eq!(page, FavoritesPage::default());
    }

    #[tokio::test]
    async fn blank_ids_rejected_on_write() {
        let store = InMemoryLikeStore::new();
        let blank: ObjectId = serde_json::from_str("\"\"").unwrap();
        assert!(matches!(
            store.like(&actor("allan"), &blank).await,
            Err(StoreError::Invalid(_))
        ));
    }
}
