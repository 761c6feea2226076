use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ids::{ActorId, ObjectId};

/// An ActivityStreams object.
///
/// Only `id` and `objectType` are interpreted by the server; every other
/// attribute is carried verbatim in `attributes` and re-emitted on output.
///
/// `liked` is viewer-relative and owned by the annotation engine. It is a
/// declared field so that a `liked` key arriving in raw payload data lands
/// here (and gets overwritten) instead of hiding in `attributes`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Object {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    #[serde(rename = "objectType", default)]
    pub object_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liked: Option<bool>,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Object {
    /// An object of the given type with no id and no attributes.
    pub fn new(object_type: impl Into<String>) -> Self {
        Self {
            id: None,
            object_type: object_type.into(),
            liked: None,
            attributes: Map::new(),
        }
    }

    /// A note with the given id and content.
    pub fn note(id: ObjectId, content: impl Into<String>) -> Self {
        Self::new("note")
            .with_id(id)
            .with_attribute("content", Value::String(content.into()))
    }

    /// The person object standing for an actor.
    pub fn person(actor: &ActorId, display_name: impl Into<String>) -> Self {
        let mut person = Self::new("person").with_attribute(
            "displayName",
            Value::String(display_name.into()),
        );
        // Actor ids double as person object ids.
        person.id = Some(ObjectId::from(actor.clone()));
        person
    }

    pub fn with_id(mut self, id: ObjectId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// The id, if present and usable as a lookup key.
    pub fn usable_id(&self) -> Option<&ObjectId> {
        self.id.as_ref().filter(|id| !id.is_blank())
    }
}
