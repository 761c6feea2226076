//! Demo data: the "allan and umslopogaas" world.
//!
//! `allan` posts twenty notes numbered by `secretNumber` 0..19, addressed to
//! themself with the public collection on cc, then favorites the
//! even-numbered ones. `umslopogaas` has no activity at all. One client is
//! registered and both users get tokens for it.

use sas_store::LikeStore;
use sas_types::{Activity, ActorId, Object, ObjectId, Verb};
use serde_json::json;

use crate::auth::ClientRecord;
use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::state::InMemoryBackends;

pub const DEMO_OWNER: &str = "allan";
pub const DEMO_OTHER: &str = "umslopogaas";
pub const DEMO_NOTES: u64 = 20;

const PUBLIC_COLLECTION: &str = "http://activityschema.org/collection/public";

/// Credentials created by [`seed_demo`].
#[derive(Clone, Debug)]
pub struct DemoAccounts {
    pub client: ClientRecord,
    pub owner: ActorId,
    pub owner_token: String,
    pub other: ActorId,
    pub other_token: String,
}

pub async fn seed_demo(
    backends: &InMemoryBackends,
    config: &ServerConfig,
) -> ServerResult<DemoAccounts> {
    let client = backends.credentials.register_client()?;
    let owner = backends.timeline.register(DEMO_OWNER)?;
    let other = backends.timeline.register(DEMO_OTHER)?;

    let person = Object::person(&owner, DEMO_OWNER);
    let public = Object::new("collection").with_id(
        ObjectId::new(PUBLIC_COLLECTION).map_err(|e| ServerError::Internal(e.to_string()))?,
    );

    let mut notes = Vec::new();
    for i in 0..DEMO_NOTES {
        let note = Object::note(
            ObjectId::mint(&config.base_url, "note"),
            format!("Hello, world! {i}"),
        )
        .with_attribute("secretNumber", json!(i));
        let post = Activity::new(
            ObjectId::mint(&config.base_url, "activity"),
            Verb::Post,
            person.clone(),
            Some(note.clone()),
        )
        .addressed_to(vec![person.clone()])
        .cc(vec![public.clone()]);
        backends.timeline.record(post)?;
        notes.push((i, note));
    }

    for (_, note) in notes.into_iter().filter(|(i, _)| i % 2 == 0) {
        let Some(id) = note.id.clone() else { continue };
        let favorite = Activity::new(
            ObjectId::mint(&config.base_url, "activity"),
            Verb::Favorite,
            person.clone(),
            Some(note),
        );
        backends.timeline.record(favorite)?;
        backends.likes.like(&owner, &id).await?;
    }

    let owner_token = backends.credentials.issue_token(&client.client_id, owner.clone())?;
    let other_token = backends.credentials.issue_token(&client.client_id, other.clone())?;
    tracing::info!(owner = %owner, other = %other, "seeded demo data");

    Ok(DemoAccounts {
        client,
        owner,
        owner_token,
        other,
        other_token,
    })
}
