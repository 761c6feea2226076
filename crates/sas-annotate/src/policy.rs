use sas_types::{ActorId, ViewerContext};

use crate::error::{AnnotateError, AnnotateResult};

/// Whether a page gets `liked` flags, and for whom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Exposure {
    /// Compute and attach `liked` from this actor's relations.
    Compute(ActorId),
    /// Attach nothing; every `liked` key is removed.
    Suppress,
}

impl Exposure {
    pub fn is_suppressed(&self) -> bool {
        matches!(self, Self::Suppress)
    }
}

/// Exposure rule shared by every stream kind.
///
/// | viewer | exposure |
/// |---|---|
/// | `AuthenticatedActor(id)` | `Compute(id)` |
/// | `AppOnly` | `Suppress` |
#[derive(Clone, Copy, Debug, Default)]
pub struct VisibilityPolicy;

impl VisibilityPolicy {
    pub fn exposure(&self, viewer: &ViewerContext) -> AnnotateResult<Exposure> {
        match viewer {
            ViewerContext::AuthenticatedActor(actor) if actor.is_blank() => Err(
                AnnotateError::InvalidViewer("authenticated actor with blank id".into()),
            ),
            ViewerContext::AuthenticatedActor(actor) => Ok(Exposure::Compute(actor.clone())),
            ViewerContext::AppOnly { .. } => Ok(Exposure::Suppress),
        }
    }
}
