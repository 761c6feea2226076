use std::collections::BTreeSet;
use std::sync::Arc;

use sas_store::LikeStore;
use sas_types::{ActorId, ObjectId};
use tracing::warn;

use crate::error::{AnnotateError, AnnotateResult};

/// Store-facing side of the engine: one batched membership check per page.
///
/// Read-only and stateless, so a single instance may be shared by any number
/// of concurrent requests.
#[derive(Clone)]
pub struct BatchedLikeLookup {
    store: Arc<dyn LikeStore>,
}

impl BatchedLikeLookup {
    pub fn new(store: Arc<dyn LikeStore>) -> Self {
        Self { store }
    }

    /// The subset of `objects` liked by `actor`, read in one round trip.
    ///
    /// An empty `objects` set returns immediately without touching the store.
    pub async fn liked_subset(
        &self,
        actor: &ActorId,
        objects: &BTreeSet<ObjectId>,
    ) -> AnnotateResult<BTreeSet<ObjectId>> {
        if objects.is_empty() {
            return Ok(BTreeSet::new());
        }
        self.store
            .liked_subset(actor, objects)
            .await
            .map_err(|err| {
                warn!(actor = %actor, batch = objects.len(), error = %err, "like lookup failed");
                AnnotateError::from(err)
            })
    }
}

impl std::fmt::Debug for BatchedLikeLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchedLikeLookup").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sas_store::{FavoritesPage, InMemoryLikeStore, StoreError, StoreResult};
    use sas_types::PageWindow;

    struct PoisonedStore;

    #[async_trait]
    impl LikeStore for PoisonedStore {
        async fn liked_subset(
            &self,
            _actor: &ActorId,
            _objects: &BTreeSet<ObjectId>,
        ) -> StoreResult<BTreeSet<ObjectId>> {
            Err(StoreError::LockPoisoned("writer panicked".into()))
        }

        async fn like(&self, _actor: &ActorId, _object: &ObjectId) -> StoreResult<bool> {
            Err(StoreError::LockPoisoned("writer panicked".into()))
        }

        async fn unlike(&self, _actor: &ActorId, _object: &ObjectId) -> StoreResult<bool> {
            Err(StoreError::LockPoisoned("writer panicked".into()))
        }

        async fn favorites(
            &self,
            _actor: &ActorId,
            _window: PageWindow,
        ) -> StoreResult<FavoritesPage> {
            Err(StoreError::LockPoisoned("writer panicked".into()))
        }
    }

    fn obj(n: usize) -> ObjectId {
        ObjectId::new(format!("n{n}")).unwrap()
    }

    #[tokio::test]
    async fn empty_input_skips_store() {
        let store = Arc::new(InMemoryLikeStore::new());
        store.set_available(false);
        let lookup = BatchedLikeLookup::new(store.clone());
        let liked = lookup
            .liked_subset(&ActorId::local("a", "h"), &BTreeSet::new())
            .await
            .unwrap();
        assert!(liked.is_empty());
        assert_eq!(store.lookup_count(), 0);
    }

    #[tokio::test]
    async fn store_failure_is_unavailable() {
        let store = Arc::new(InMemoryLikeStore::new());
        store.set_available(false);
        let lookup = BatchedLikeLookup::new(store);
        let err = lookup
            .liked_subset(&ActorId::local("a", "h"), &BTreeSet::from([obj(1)]))
            .await
            .unwrap_err();
        assert!(matches!(err, AnnotateError::StoreUnavailable(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn poisoned_store_is_not_retryable() {
        let lookup = BatchedLikeLookup::new(Arc::new(PoisonedStore));
        let err = lookup
            .liked_subset(&ActorId::local("a", "h"), &BTreeSet::from([obj(1)]))
            .await
            .unwrap_err();
        assert!(matches!(err, AnnotateError::Store(StoreError::LockPoisoned(_))));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn returns_liked_subset() {
        let store = Arc::new(InMemoryLikeStore::new());
        let actor = ActorId::local("a", "h");
        store.like(&actor, &obj(2)).await.unwrap();
        let lookup = BatchedLikeLookup::new(store.clone());
        let liked = lookup
            .liked_subset(&actor, &(0..5).map(obj).collect())
            .await
            .unwrap();
        assert_eq!(liked, BTreeSet::from([obj(2)]));
        assert_eq!(store.lookup_count(), 1);
    }
}
