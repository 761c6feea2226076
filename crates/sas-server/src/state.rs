use std::sync::Arc;

use sas_annotate::AnnotationEngine;
use sas_store::{InMemoryLikeStore, InMemoryTimeline, LikeStore, StreamAssembler};

use crate::auth::{CredentialResolver, InMemoryCredentials};
use crate::config::ServerConfig;

/// Shared, per-process handler state. Cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub streams: Arc<dyn StreamAssembler>,
    pub credentials: Arc<dyn CredentialResolver>,
    pub engine: AnnotationEngine,
}

impl AppState {
    pub fn new(
        config: ServerConfig,
        likes: Arc<dyn LikeStore>,
        streams: Arc<dyn StreamAssembler>,
        credentials: Arc<dyn CredentialResolver>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            streams,
            credentials,
            engine: AnnotationEngine::new(likes),
        }
    }
}

/// In-process backends wired together: likes, timeline, and credentials.
#[derive(Clone, Debug)]
pub struct InMemoryBackends {
    pub likes: Arc<InMemoryLikeStore>,
    pub timeline: Arc<InMemoryTimeline>,
    pub credentials: Arc<InMemoryCredentials>,
}

impl InMemoryBackends {
    pub fn new(config: &ServerConfig) -> Self {
        let likes = Arc::new(InMemoryLikeStore::new());
        let timeline = Arc::new(InMemoryTimeline::new(config.host.clone(), likes.clone()));
        Self {
            likes,
            timeline,
            credentials: Arc::new(InMemoryCredentials::new()),
        }
    }

    pub fn state(&self, config: ServerConfig) -> AppState {
        AppState::new(
            config,
            self.likes.clone(),
            self.timeline.clone(),
            self.credentials.clone(),
        )
    }
}
