//! In-process stream assembly.
//!
//! [`InMemoryTimeline`] keeps every recorded activity in an arena and
//! per-user index lists for the feed, inbox, and direct inbox. Favorites are
//! not stored here: they are read from the [`LikeStore`] and materialized
//! from the objects the timeline has seen.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use sas_types::{Activity, ActorId, Object, ObjectId, PageWindow, StreamItem, StreamKind};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::{LikeStore, StreamAssembler, StreamPage};

#[derive(Default)]
struct TimelineState {
    nicknames: HashMap<String, ActorId>,
    users: HashMap<ActorId, String>,
    /// Every recorded activity, in arrival order.
    activities: Vec<Activity>,
    objects: HashMap<ObjectId, Object>,
    feed: HashMap<ActorId, Vec<usize>>,
    inbox: HashMap<ActorId, Vec<usize>>,
    direct: HashMap<ActorId, Vec<usize>>,
}

impl TimelineState {
    fn owner(&self, nickname: &str) -> StoreResult<ActorId> {
        self.nicknames
            .get(nickname)
            .cloned()
            .ok_or_else(|| StoreError::UnknownOwner(nickname.to_string()))
    }

    fn local_recipient(&self, object: &Object) -> Option<ActorId> {
        let actor = ActorId::new(object.usable_id()?.as_str()).ok()?;
        self.users.contains_key(&actor).then_some(actor)
    }

    fn activity_page(
        &self,
        owner: &ActorId,
        kind: StreamKind,
        window: PageWindow,
    ) -> (usize, Vec<StreamItem>) {
        let index = match kind {
            StreamKind::Feed | StreamKind::MajorFeed | StreamKind::MinorFeed => &self.feed,
            StreamKind::DirectInbox | StreamKind::MajorDirectInbox => &self.direct,
            _ => &self.inbox,
        };
        let selected: Vec<&Activity> = index
            .get(owner)
            .map(|slots| {
                slots
                    .iter()
                    .rev()
                    .map(|&slot| &self.activities[slot])
                    .filter(|activity| kind.admits(activity))
                    .collect()
            })
            .unwrap_or_default();
        let range = window.range(selected.len());
        let items = selected[range]
            .iter()
            .map(|activity| StreamItem::Activity((*activity).clone()))
            .collect();
        (selected.len(), items)
    }
}

fn push_unique(index: &mut HashMap<ActorId, Vec<usize>>, actor: &ActorId, slot: usize) {
    let slots = index.entry(actor.clone()).or_default();
    if slots.last() != Some(&slot) {
        slots.push(slot);
    }
}

/// In-memory stream assembler.
///
/// Delivery rules for [`InMemoryTimeline::record`]:
/// - the actor's feed and inbox get every activity the actor performs;
/// - each local `to` recipient gets it in their inbox and direct inbox;
/// - each local `cc` recipient gets it in their inbox.
///
/// Non-local recipients (including the public collection) are ignored since
/// there is no follower graph.
pub struct InMemoryTimeline {
    host: String,
    likes: Arc<dyn LikeStore>,
    state: RwLock<TimelineState>,
}

impl InMemoryTimeline {
    pub fn new(host: impl Into<String>, likes: Arc<dyn LikeStore>) -> Self {
        Self {
            host: host.into(),
            likes,
            state: RwLock::new(TimelineState::default()),
        }
    }

    /// Register a local user and return their actor id.
    pub fn register(&self, nickname: &str) -> StoreResult<ActorId> {
        let actor = ActorId::new(format!("acct:{nickname}@{}", self.host))
            .map_err(|e| StoreError::Invalid(e.to_string()))?;
        let mut state = self.write()?;
        if state.nicknames.contains_key(nickname) {
            return Err(StoreError::DuplicateUser(nickname.to_string()));
        }
        state.nicknames.insert(nickname.to_string(), actor.clone());
        state.users.insert(actor.clone(), nickname.to_string());
        Ok(actor)
    }

    /// Actor id for a local nickname.
    pub fn actor(&self, nickname: &str) -> StoreResult<ActorId> {
        self.read()?.owner(nickname)
    }

    /// A previously seen object by id.
    pub fn object(&self, id: &ObjectId) -> StoreResult<Option<Object>> {
        Ok(self.read()?.objects.get(id).cloned())
    }

    /// Record a delivered activity and fan it out to local streams.
    pub fn record(&self, activity: Activity) -> StoreResult<()> {
        let mut state = self.write()?;
        let actor = state
            .local_recipient(&activity.actor)
            .ok_or_else(|| match activity.actor.usable_id() {
                Some(id) => StoreError::UnknownActor(id.to_string()),
                None => StoreError::Invalid("activity actor has no id".into()),
            })?;

        if let Some(object) = activity.object.as_ref() {
            if let Some(id) = object.usable_id() {
                let mut stored = object.clone();
                stored.liked = None;
                if activity.verb.is_major() {
                    state.objects.insert(id.clone(), stored);
                } else {
                    state.objects.entry(id.clone()).or_insert(stored);
                }
            }
        }

        let to: Vec<ActorId> = activity
            .to
            .iter()
            .filter_map(|o| state.local_recipient(o))
            .collect();
        let cc: Vec<ActorId> = activity
            .cc
            .iter()
            .filter_map(|o| state.local_recipient(o))
            .collect();

        let slot = state.activities.len();
        debug!(
            actor = %actor,
            verb = %activity.verb,
            direct = to.len(),
            cc = cc.len(),
            "recording activity"
        );
        state.activities.push(activity);

        push_unique(&mut state.feed, &actor, slot);
        push_unique(&mut state.inbox, &actor, slot);
        for recipient in &to {
            push_unique(&mut state.inbox, recipient, slot);
            push_unique(&mut state.direct, recipient, slot);
        }
        for recipient in &cc {
            push_unique(&mut state.inbox, recipient, slot);
        }
        Ok(())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, TimelineState>> {
        self.state
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, TimelineState>> {
        self.state
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    async fn favorites_page(&self, owner: &str, window: PageWindow) -> StoreResult<StreamPage> {
        let actor = self.actor(owner)?;
        let favorites = self.likes.favorites(&actor, window).await?;

        let state = self.read()?;
        let items = favorites
            .object_ids
            .into_iter()
            .map(|id| {
                // Likes of objects this server never saw still list, as stubs.
                let object = state
                    .objects
                    .get(&id)
                    .cloned()
                    .unwrap_or_else(|| Object::new("object").with_id(id));
                StreamItem::Object(object)
            })
            .collect();
        Ok(StreamPage {
            owner: actor,
            total_items: favorites.total,
            items,
        })
    }
}

#[async_trait]
impl StreamAssembler for InMemoryTimeline {
    async fn page(
        &self,
        owner: &str,
        kind: StreamKind,
        window: PageWindow,
    ) -> StoreResult<StreamPage> {
        if kind == StreamKind::Favorites {
            return self.favorites_page(owner, window).await;
        }
        let state = self.read()?;
        let actor = state.owner(owner)?;
        let (total_items, items) = state.activity_page(&actor, kind, window);
        Ok(StreamPage {
            owner: actor,
            total_items,
            items,
        })
    }
}

impl std::fmt::Debug for InMemoryTimeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (users, activities) = self
            .read()
            .map(|s| (s.users.len(), s.activities.len()))
            .unwrap_or_default();
        f.debug_struct("InMemoryTimeline")
            .field("host", &self.host)
            .field("users", &users)
            .field("activities", &activities)
            .finish()
    }
}
