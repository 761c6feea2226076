//! Foundation types for the social activity server (SAS).
//!
//! This crate provides the identity, object, activity, and stream types used
//! throughout SAS. Every other SAS crate depends on `sas-types`.
//!
//! # Key Types
//!
//! - [`ActorId`] / [`ObjectId`] — URI-shaped identifiers for people and objects
//! - [`Object`] — an ActivityStreams object (note, image, person, ...)
//! - [`Activity`] — a verb performed by an actor, optionally on an object
//! - [`StreamItem`] — one element of a stream page: activity or bare object
//! - [`StreamKind`] — which per-user stream a page belongs to
//! - [`ViewerContext`] — who is asking: an authenticated actor or an app only
//! - [`PageWindow`] — offset/count window into a stream

pub mod activity;
pub mod error;
pub mod ids;
pub mod object;
pub mod page;
pub mod stream;
pub mod viewer;

pub use activity::{Activity, Verb};
pub use error::TypeError;
pub use ids::{ActorId, ObjectId};
pub use object::Object;
pub use page::{PageWindow, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use stream::{ItemShape, StreamItem, StreamKind, VerbFilter};
pub use viewer::ViewerContext;
