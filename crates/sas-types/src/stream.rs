use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::activity::Activity;
use crate::error::TypeError;
use crate::ids::ObjectId;
use crate::object::Object;

/// The shape of items a stream yields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemShape {
    Activity,
    Object,
}

/// One element of a stream page.
///
/// Favorites streams yield bare objects; every other stream yields
/// activities. The annotation target is the object the viewer-relative
/// `liked` flag belongs on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StreamItem {
    Activity(Activity),
    Object(Object),
}

impl StreamItem {
    pub fn shape(&self) -> ItemShape {
        match self {
            Self::Activity(_) => ItemShape::Activity,
            Self::Object(_) => ItemShape::Object,
        }
    }

    /// The object that carries the `liked` flag, if any.
    pub fn annotation_target(&self) -> Option<&Object> {
        match self {
            Self::Activity(activity) => activity.object.as_ref(),
            Self::Object(object) => Some(object),
        }
    }

    pub fn annotation_target_mut(&mut self) -> Option<&mut Object> {
        match self {
            Self::Activity(activity) => activity.object.as_mut(),
            Self::Object(object) => Some(object),
        }
    }

    /// Id of the annotation target. `None` if there is no target or the
    /// target has no usable id.
    pub fn target_id(&self) -> Option<&ObjectId> {
        self.annotation_target().and_then(Object::usable_id)
    }

    pub fn as_activity(&self) -> Option<&Activity> {
        match self {
            Self::Activity(activity) => Some(activity),
            Self::Object(_) => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(object) => Some(object),
            Self::Activity(_) => None,
        }
    }
}

impl From<Activity> for StreamItem {
    fn from(activity: Activity) -> Self {
        Self::Activity(activity)
    }
}

impl From<Object> for StreamItem {
    fn from(object: Object) -> Self {
        Self::Object(object)
    }
}

/// A per-user stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StreamKind {
    Inbox,
    MajorInbox,
    MinorInbox,
    DirectInbox,
    MajorDirectInbox,
    Feed,
    MajorFeed,
    MinorFeed,
    Favorites,
}

/// Which verbs a stream keeps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerbFilter {
    All,
    Major,
    Minor,
}

impl StreamKind {
    pub const ALL: [StreamKind; 9] = [
        Self::Inbox,
        Self::MajorInbox,
        Self::MinorInbox,
        Self::DirectInbox,
        Self::MajorDirectInbox,
        Self::Feed,
        Self::MajorFeed,
        Self::MinorFeed,
        Self::Favorites,
    ];

    pub fn item_shape(self) -> ItemShape {
        match self {
            Self::Favorites => ItemShape::Object,
            _ => ItemShape::Activity,
        }
    }

    pub fn verb_filter(self) -> VerbFilter {
        match self {
            Self::MajorInbox | Self::MajorDirectInbox | Self::MajorFeed => VerbFilter::Major,
            Self::MinorInbox | Self::MinorFeed => VerbFilter::Minor,
            _ => VerbFilter::All,
        }
    }

    /// Returns `true` if `activity` belongs in this stream's verb subset.
    pub fn admits(self, activity: &Activity) -> bool {
        match self.verb_filter() {
            VerbFilter::All => true,
            VerbFilter::Major => activity.is_major(),
            VerbFilter::Minor => !activity.is_major(),
        }
    }

    /// Path below `/api/user/{nickname}/`.
    pub fn path(self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::MajorInbox => "inbox/major",
            Self::MinorInbox => "inbox/minor",
            Self::DirectInbox => "inbox/direct",
            Self::MajorDirectInbox => "inbox/direct/major",
            Self::Feed => "feed",
            Self::MajorFeed => "feed/major",
            Self::MinorFeed => "feed/minor",
            Self::Favorites => "favorites",
        }
    }

    /// Human-readable title used in feed envelopes.
    pub fn title(self) -> &'static str {
        match self {
            Self::Inbox => "Activities for",
            Self::MajorInbox => "Major activities for",
            Self::MinorInbox => "Minor activities for",
            Self::DirectInbox => "Activities directly for",
            Self::MajorDirectInbox => "Major activities directly for",
            Self::Feed => "Activities by",
            Self::MajorFeed => "Major activities by",
            Self::MinorFeed => "Minor activities by",
            Self::Favorites => "Things liked by",
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for StreamKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim_matches('/');
        Self::ALL
            .into_iter()
            .find(|kind| kind.path() == s)
            .ok_or_else(|| TypeError::UnknownStream(s.to_string()))
    }
}
