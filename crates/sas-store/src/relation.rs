use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sas_types::{ActorId, ObjectId};

/// A durable fact: `actor` has favorited `object`.
///
/// At most one live relation exists per (actor, object) pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeRelation {
    pub actor: ActorId,
    pub object: ObjectId,
    pub created: DateTime<Utc>,
}

impl LikeRelation {
    pub fn new(actor: ActorId, object: ObjectId) -> Self {
        Self {
            actor,
            object,
            created: Utc::now(),
        }
    }
}

/// One window of an actor's favorites, newest like first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FavoritesPage {
    pub object_ids: Vec<ObjectId>,
    /// Total favorites for the actor, across all windows.
    pub total: usize,
}
