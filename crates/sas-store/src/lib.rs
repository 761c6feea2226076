//! Like relation storage and stream assembly for the social activity server.
//!
//! Two seams live here, both as async traits so real backends can sit on a
//! database without touching callers:
//!
//! - [`LikeStore`] -- the durable set of (actor, object) like relations. The
//!   read side is a single batched membership check, [`LikeStore::liked_subset`].
//! - [`StreamAssembler`] -- produces an ordered page of raw stream items for
//!   an owner, stream kind, and page window.
//!
//! # Backends
//!
//! - [`InMemoryLikeStore`] -- `RwLock`-guarded maps, with a lookup counter
//!   and an availability switch for tests
//! - [`InMemoryTimeline`] -- in-process delivery of activities to feeds and
//!   inboxes, with favorites materialized from a [`LikeStore`]
//!
//! # Design Rules
//!
//! 1. A batched lookup reads one consistent snapshot for the whole batch.
//! 2. Liking twice is idempotent; unliking an absent relation is a no-op.
//! 3. Streams are newest first.
//! 4. Backend failures are propagated as [`StoreError`], never defaulted.

pub mod error;
pub mod memory;
pub mod relation;
pub mod timeline;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryLikeStore;
pub use relation::{FavoritesPage, LikeRelation};
pub use timeline::InMemoryTimeline;
pub use traits::{LikeStore, StreamAssembler, StreamPage};
