use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ids::ObjectId;
use crate::object::Object;

/// What an activity does.
///
/// Unrecognised verbs are preserved verbatim in [`Verb::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Verb {
    Post,
    Share,
    Favorite,
    Unfavorite,
    Follow,
    Other(String),
}

impl Verb {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Post => "post",
            Self::Share => "share",
            Self::Favorite => "favorite",
            Self::Unfavorite => "unfavorite",
            Self::Follow => "follow",
            Self::Other(verb) => verb,
        }
    }

    /// Major verbs introduce content; they make up the `*/major` streams.
    pub fn is_major(&self) -> bool {
        matches!(self, Self::Post | Self::Share)
    }
}

impl From<String> for Verb {
    fn from(verb: String) -> Self {
        match verb.as_str() {
            "post" => Self::Post,
            "share" => Self::Share,
            "favorite" => Self::Favorite,
            "unfavorite" => Self::Unfavorite,
            "follow" => Self::Follow,
            _ => Self::Other(verb),
        }
    }
}

impl From<Verb> for String {
    fn from(verb: Verb) -> Self {
        match verb {
            Verb::Other(verb) => verb,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An activity: `actor` performed `verb`, optionally on `object`.
///
/// Activities are immutable once delivered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub verb: Verb,

    pub actor: Object,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<Object>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to: Vec<Object>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cc: Vec<Object>,

    pub published: DateTime<Utc>,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Activity {
    /// A new activity published now, with no addressing.
    pub fn new(id: ObjectId, verb: Verb, actor: Object, object: Option<Object>) -> Self {
        Self {
            id: Some(id),
            verb,
            actor,
            object,
            to: Vec::new(),
            cc: Vec::new(),
            published: Utc::now(),
            attributes: Map::new(),
        }
    }

    pub fn addressed_to(mut self, to: Vec<Object>) -> Self {
        self.to = to;
        self
    }

    pub fn cc(mut self, cc: Vec<Object>) -> Self {
        self.cc = cc;
        self
    }

    pub fn is_major(&self) -> bool {
        self.verb.is_major()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ActorId;
    use serde_json::json;

    #[test]
    fn verb_roundtrip_preserves_unknown() {
        let verb: Verb = serde_json::from_value(json!("tag")).unwrap();
        assert_eq!(verb, Verb::Other("tag".into()));
        assert_eq!(serde_json::to_value(&verb).unwrap(), json!("tag"));
    }

    #[test]
    fn like_verb_serializes_as_received() {
        for raw in ["like", "unlike"] {
            let verb: Verb = serde_json::from_value(json!(raw)).unwrap();
            assert_eq!(verb, Verb::Other(raw.into()));
            assert_eq!(serde_json::to_value(&verb).unwrap(), json!(raw));
        }
        let verb: Verb = serde_json::from_value(json!("favorite")).unwrap();
        assert_eq!(verb, Verb::Favorite);
        assert_eq!(serde_json::to_value(&verb).unwrap(), json!("favorite"));
    }

    #[test]
    fn major_verbs() {
        assert!(Verb::Post.is_major());
        assert!(Verb::Share.is_major());
        assert!(!Verb::Favorite.is_major());
        assert!(!Verb::Other("join".into()).is_major());
    }

    #[test]
    fn activity_json_shape() {
        let actor = ActorId::local("allan", "localhost");
        let note = Object::note(ObjectId::new("n1").unwrap(), "Hello");
        let act = Activity::new(
            ObjectId::new("a1").unwrap(),
            Verb::Post,
            Object::person(&actor, "Allan"),
            Some(note),
        );
        let value = serde_json::to_value(&act).unwrap();
        assert_eq!(value["verb"], json!("post"));
        assert_eq!(value["object"]["id"], json!("n1"));
        assert!(value.get("to").is_none());

        let back: Activity = serde_json::from_value(value).unwrap();
        assert_eq!(back, act);
    }

    #[test]
    fn activity_without_object() {
        let raw = json!({
            "verb": "follow",
            "actor": {"id": "acct:a@h", "objectType": "person"},
            "published": "2012-11-01T00:00:00Z"
        });
        let act: Activity = serde_json::from_value(raw).unwrap();
        assert!(act.object.is_none());
        assert!(act.id.is_none());
    }
}
