//! Annotation target extraction.
//!
//! Checks every item against the shape its stream promises and gathers the
//! ids the like lookup needs.

use std::collections::BTreeSet;

use sas_types::{ObjectId, StreamItem, StreamKind};

use crate::error::{AnnotateError, AnnotateResult};

/// Lookup keys for one page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TargetSet {
    /// Distinct target ids.
    pub ids: BTreeSet<ObjectId>,
    /// Items that carry a target (duplicates counted).
    pub annotated: usize,
    /// Activity items with no object; they pass through untouched.
    pub passthrough: usize,
}

/// Collect the annotation target ids of `page`.
///
/// Fails with `MalformedItem` if an item's shape does not match `kind`, or if
/// a target lacks a usable id. Activities without an object are not errors.
pub fn collect_targets(page: &[StreamItem], kind: StreamKind) -> AnnotateResult<TargetSet> {
    let expected = kind.item_shape();
    let mut targets = TargetSet::default();

    for (index, item) in page.iter().enumerate() {
        if item.shape() != expected {
            return Err(AnnotateError::malformed(
                index,
                format!("{kind} stream expects {expected:?} items, got {:?}", item.shape()),
            ));
        }
        if item.annotation_target().is_none() {
            targets.passthrough += 1;
            continue;
        }
        let id = item
            .target_id()
            .ok_or_else(|| AnnotateError::malformed(index, "annotation target has no id"))?;
        targets.ids.insert(id.clone());
        targets.annotated += 1;
    }
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sas_types::{Activity, ActorId, Object, Verb};

    fn note(id: &str) -> Object {
        Object::note(ObjectId::new(id).unwrap(), "x")
    }

    fn activity(object: Option<Object>) -> StreamItem {
        let actor = ActorId::local("allan", "localhost");
        Activity::new(ObjectId::mint("http://h", "activity"), Verb::Post, Object::person(&actor, "a"), object).into()
    }

    #[test]
    fn activity_stream_targets_nested_objects() {
        let page = vec![activity(Some(note("n1"))), activity(None), activity(Some(note("n2")))];
        let targets = collect_targets(&page, StreamKind::MajorFeed).unwrap();
        assert_eq!(targets.ids.len(), 2);
        assert_eq!(targets.annotated, 2);
        assert_eq!(targets.passthrough, 1);
    }

    #[test]
    fn duplicate_targets_collapse() {
        let page = vec![activity(Some(note("n1"))), activity(Some(note("n1")))];
        let targets = collect_targets(&page, StreamKind::Inbox).unwrap();
        assert_eq!(targets.ids.len(), 1);
        assert_eq!(targets.annotated, 2);
    }

    #[test]
    fn favorites_target_items_themselves() {
        let page: Vec<StreamItem> = vec![note("n1").into(), note("n2").into()];
        let targets = collect_targets(&page, StreamKind::Favorites).unwrap();
        assert_eq!(targets.ids.len(), 2);
        assert_eq!(targets.passthrough, 0);
    }

    #[test]
    fn object_without_id_is_malformed() {
        let page: Vec<StreamItem> = vec![note("n1").into(), Object::new("note").into()];
        let err = collect_targets(&page, StreamKind::Favorites).unwrap_err();
        assert!(matches!(err, AnnotateError::MalformedItem { index: 1, .. }));
    }

    #[test]
    fn nested_object_without_id_is_malformed() {
        let page = vec![activity(Some(Object::new("note")))];
        let err = collect_targets(&page, StreamKind::Feed).unwrap_err();
        assert!(matches!(err, AnnotateError::MalformedItem { index: 0, .. }));
    }

    #[test]
    fn shape_mismatch_is_malformed() {
        let page: Vec<StreamItem> = vec![note("n1").into()];
        assert!(collect_targets(&page, StreamKind::MajorInbox).is_err());
        let page = vec![activity(Some(note("n1")))];
        assert!(collect_targets(&page, StreamKind::Favorites).is_err());
    }

    #[test]
    fn empty_page() {
        let targets = collect_targets(&[], StreamKind::Favorites).unwrap();
        assert_eq!(targets, TargetSet::default());
    }
}
