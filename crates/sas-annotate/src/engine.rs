use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use sas_store::LikeStore;
use sas_types::{StreamItem, StreamKind, ViewerContext};
use tracing::debug;

use crate::error::AnnotateResult;
use crate::lookup::BatchedLikeLookup;
use crate::policy::{Exposure, VisibilityPolicy};
use crate::targets::collect_targets;

// ---------------------------------------------------------------------------
// AnnotatedPage
// ---------------------------------------------------------------------------

/// A page with viewer-relative `liked` flags applied.
#[derive(Clone, Debug)]
pub struct AnnotatedPage {
    /// The items, in input order.
    pub items: Vec<StreamItem>,
    /// The exposure rule that was applied.
    pub exposure: Exposure,
    /// Distinct annotation targets on the page.
    pub targets: usize,
    /// Targets the viewer has liked.
    pub liked: usize,
    /// Like store round trips issued (0 or 1).
    pub lookups: usize,
    /// Wall-clock time spent annotating.
    pub elapsed: Duration,
}

// ---------------------------------------------------------------------------
// AnnotationEngine
// ---------------------------------------------------------------------------

/// Decorates stream pages with the requesting viewer's `liked` flags.
///
/// For each request:
/// 1. the visibility policy decides whether flags are exposed at all;
/// 2. target ids are extracted (and items validated) for the stream kind;
/// 3. one batched lookup fetches the liked subset for the viewer;
/// 4. each target gets `liked: true/false`, or no key when suppressed.
///
/// The engine holds no per-request state and never writes to the store.
#[derive(Clone, Debug)]
pub struct AnnotationEngine {
    lookup: BatchedLikeLookup,
    policy: VisibilityPolicy,
}

impl AnnotationEngine {
    pub fn new(store: Arc<dyn LikeStore>) -> Self {
        Self {
            lookup: BatchedLikeLookup::new(store),
            policy: VisibilityPolicy,
        }
    }

    /// Annotate `page`, a raw page of a `kind` stream, for `viewer`.
    ///
    /// Output length and order equal the input's. Any `liked` value already
    /// present on an incoming item is replaced or removed.
    pub async fn annotate(
        &self,
        mut page: Vec<StreamItem>,
        kind: StreamKind,
        viewer: &ViewerContext,
    ) -> AnnotateResult<AnnotatedPage> {
        let start = Instant::now();
        let exposure = self.policy.exposure(viewer)?;
        let targets = collect_targets(&page, kind)?;

        let (liked, lookups) = match &exposure {
            Exposure::Compute(actor) if !targets.ids.is_empty() => {
                (self.lookup.liked_subset(actor, &targets.ids).await?, 1)
            }
            _ => (BTreeSet::new(), 0),
        };

        for item in &mut page {
            let Some(target) = item.annotation_target_mut() else {
                continue;
            };
            target.liked = match &exposure {
                Exposure::Suppress => None,
                Exposure::Compute(_) => Some(
                    target
                        .usable_id()
                        .is_some_and(|id| liked.contains(id)),
                ),
            };
        }

        let annotated = AnnotatedPage {
            items: page,
            exposure,
            targets: targets.ids.len(),
            liked: liked.len(),
            lookups,
            elapsed: start.elapsed(),
        };
        debug!(
            stream = %kind,
            viewer = %viewer,
            items = annotated.items.len(),
            targets = annotated.targets,
            liked = annotated.liked,
            passthrough = targets.passthrough,
            suppressed = annotated.exposure.is_suppressed(),
            "annotated stream page"
        );
        Ok(annotated)
    }
}
