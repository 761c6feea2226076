use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TypeError;

/// Identifier of an actor (a person or service account).
///
/// Actor ids are opaque URIs such as `acct:allan@localhost`. Two actors are
/// the same iff their ids are byte-equal.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    /// Wrap an actor URI. Blank values are rejected.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(TypeError::BlankId);
        }
        Ok(Self(id))
    }

    /// Local account id for a nickname on `host` (`acct:nick@host`).
    pub fn local(nickname: &str, host: &str) -> Self {
        Self(format!("acct:{nickname}@{host}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the id is empty or whitespace only.
    ///
    /// Deserialized ids bypass [`ActorId::new`], so consumers that need a
    /// usable key must check this.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActorId({})", self.0)
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an object (note, image, person, collection, ...).
///
/// This is the key the like relation is stored under.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Wrap an object URI. Blank values are rejected.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(TypeError::BlankId);
        }
        Ok(Self(id))
    }

    /// Mint a fresh id under `base_url`, e.g. `http://host/api/note/<uuid>`.
    pub fn mint(base_url: &str, object_type: &str) -> Self {
        Self(format!(
            "{}/api/{}/{}",
            base_url.trim_end_matches('/'),
            object_type,
            Uuid::now_v7()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the id is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ActorId> for ObjectId {
    /// Actor ids double as the ids of their person objects.
    fn from(actor: ActorId) -> Self {
        Self(actor.0)
    }
}
