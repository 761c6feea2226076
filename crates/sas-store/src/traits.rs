use std::collections::BTreeSet;

use async_trait::async_trait;
use sas_types::{ActorId, ObjectId, PageWindow, StreamItem, StreamKind};

use crate::error::StoreResult;
use crate::relation::FavoritesPage;

/// Durable set of like relations.
///
/// All implementations must satisfy these invariants:
/// - `liked_subset` answers the whole batch from one consistent snapshot.
/// - `liked_subset` performs no writes.
/// - `like` is idempotent; `unlike` of an absent relation is a no-op.
/// - Failures surface as errors; a failed lookup never reads as "not liked".
#[async_trait]
pub trait LikeStore: Send + Sync {
    /// Return the subset of `objects` that `actor` has liked.
    ///
    /// This is one logical round trip regardless of batch size. An empty
    /// input yields an empty output.
    async fn liked_subset(
        &self,
        actor: &ActorId,
        objects: &BTreeSet<ObjectId>,
    ) -> StoreResult<BTreeSet<ObjectId>>;

    /// Record that `actor` likes `object`. Returns `true` if the relation is
    /// new.
    async fn like(&self, actor: &ActorId, object: &ObjectId) -> StoreResult<bool>;

    /// Remove the relation. Returns `true` if it existed.
    async fn unlike(&self, actor: &ActorId, object: &ObjectId) -> StoreResult<bool>;

    /// A window of the objects `actor` has liked, newest like first.
    async fn favorites(&self, actor: &ActorId, window: PageWindow) -> StoreResult<FavoritesPage>;
}

/// One assembled page of a stream.
#[derive(Clone, Debug, PartialEq)]
pub struct StreamPage {
    /// The stream owner's actor id.
    pub owner: ActorId,
    /// Items in the whole stream, not just this page.
    pub total_items: usize,
    /// The page, newest first.
    pub items: Vec<StreamItem>,
}

/// Produces raw, unannotated pages of per-user streams.
#[async_trait]
pub trait StreamAssembler: Send + Sync {
    /// Assemble `window` of `owner`'s `kind` stream.
    ///
    /// Returns `StoreError::UnknownOwner` if no user has that nickname.
    async fn page(
        &self,
        owner: &str,
        kind: StreamKind,
        window: PageWindow,
    ) -> StoreResult<StreamPage>;
}
