use std::fmt;

use crate::ids::ActorId;

/// Who is asking for a stream.
///
/// Requests without valid client credentials are rejected before a viewer
/// context is ever built, so these are the only two shapes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewerContext {
    /// A user acting through a client, identified by actor id.
    AuthenticatedActor(ActorId),
    /// Valid client credentials with no user token. The client id is kept for
    /// logging only.
    AppOnly { client_id: String },
}

impl ViewerContext {
    pub fn actor(actor: ActorId) -> Self {
        Self::AuthenticatedActor(actor)
    }

    pub fn app(client_id: impl Into<String>) -> Self {
        Self::AppOnly {
            client_id: client_id.into(),
        }
    }

    pub fn actor_id(&self) -> Option<&ActorId> {
        match self {
            Self::AuthenticatedActor(id) => Some(id),
            Self::AppOnly { .. } => None,
        }
    }

    pub fn is_app_only(&self) -> bool {
        matches!(self, Self::AppOnly { .. })
    }
}

impl fmt::Display for ViewerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AuthenticatedActor(id) => write!(f, "actor:{id}"),
            Self::AppOnly { client_id } => write!(f, "app:{client_id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewer_variants() {
        let actor = ViewerContext::actor(ActorId::local("allan", "localhost"));
        assert_eq!(actor.actor_id().unwrap().as_str(), "acct:allan@localhost");
        assert!(!actor.is_app_only());
        assert_eq!(actor.to_string(), "actor:acct:allan@localhost");

        let app = ViewerContext::app("client-1");
        assert!(app.actor_id().is_none());
        assert!(app.is_app_only());
        assert_eq!(app.to_string(), "app:client-1");
    }
}
