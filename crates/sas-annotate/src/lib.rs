//! Viewer-relative annotation for stream pages.
//!
//! Every stream page the server returns is decorated, per requesting viewer,
//! with a `liked` flag on each item's annotation target: the nested object of
//! an activity, or the item itself in a favorites stream. The flag is:
//!
//! - `true`/`false` when the viewer is an authenticated actor, computed from a
//!   single batched read of the like store for the whole page;
//! - absent when the request carries app credentials only, or when an item has
//!   no target (an activity without an object).
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use sas_annotate::AnnotationEngine;
//! use sas_store::{InMemoryLikeStore, LikeStore};
//! use sas_types::{ActorId, Object, ObjectId, StreamItem, StreamKind, ViewerContext};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let store = Arc::new(InMemoryLikeStore::new());
//! let allan = ActorId::local("allan", "localhost");
//! let note = Object::note(ObjectId::new("http://localhost/api/note/1").unwrap(), "hi");
//! store.like(&allan, note.id.as_ref().unwrap()).await.unwrap();
//!
//! let engine = AnnotationEngine::new(store);
//! let page = engine
//!     .annotate(vec![StreamItem::Object(note)], StreamKind::Favorites, &ViewerContext::actor(allan))
//!     .await
//!     .unwrap();
//! assert_eq!(page.items[0].annotation_target().unwrap().liked, Some(true));
//! # }
//! ```

pub mod engine;
pub mod error;
pub mod lookup;
pub mod policy;
pub mod targets;

pub use engine::{AnnotatedPage, AnnotationEngine};
pub use error::{AnnotateError, AnnotateResult};
pub use lookup::BatchedLikeLookup;
pub use policy::{Exposure, VisibilityPolicy};
pub use targets::{collect_targets, TargetSet};
