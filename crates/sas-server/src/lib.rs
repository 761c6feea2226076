//! HTTP server for the social activity server.
//!
//! Serves per-user streams (inbox, feed, direct inbox, favorites, and their
//! major/minor variants) as JSON collections. Every page is annotated for the
//! requesting viewer by [`sas_annotate::AnnotationEngine`] before it leaves
//! the server.

pub mod auth;
pub mod config;
pub mod demo;
pub mod error;
pub mod feed;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use auth::{ClientRecord, CredentialResolver, Credentials, InMemoryCredentials};
pub use config::ServerConfig;
pub use demo::{seed_demo, DemoAccounts};
pub use error::{ServerError, ServerResult};
pub use feed::Feed;
pub use server::SasServer;
pub use state::{AppState, InMemoryBackends};
