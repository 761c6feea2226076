use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use sas_types::{ActorId, ViewerContext};
use uuid::Uuid;

use crate::error::{ServerError, ServerResult};

/// Client and (optional) user token presented with a request.
///
/// Parsed from an `Authorization: OAuth ...` header. Signature checking
/// happens in the OAuth layer in front of this server; only the key and
/// token are read here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub consumer_key: String,
    pub token: Option<String>,
}

impl Credentials {
    pub fn client(consumer_key: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            token: None,
        }
    }

    pub fn user(consumer_key: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            token: Some(token.into()),
        }
    }

    /// Extract credentials from request headers.
    pub fn from_headers(headers: &HeaderMap) -> ServerResult<Self> {
        let value = headers
            .get(AUTHORIZATION)
            .ok_or_else(|| ServerError::AuthFailed("missing Authorization header".into()))?
            .to_str()
            .map_err(|_| ServerError::AuthFailed("Authorization header is not ASCII".into()))?;
        Self::parse_oauth(value)
    }

    /// Parse the parameters of an OAuth 1.0 `Authorization` header.
    pub fn parse_oauth(value: &str) -> ServerResult<Self> {
        let value = value.trim();
        let (scheme, params) = value.split_once(char::is_whitespace).unwrap_or((value, ""));
        if !scheme.eq_ignore_ascii_case("OAuth") {
            return Err(ServerError::AuthFailed("unsupported authorization scheme".into()));
        }

        let mut fields = HashMap::new();
        for pair in params.split(',') {
            let Some((key, raw)) = pair.trim().split_once('=') else {
                continue;
            };
            let raw = raw.trim().trim_matches('"');
            let decoded = urlencoding::decode(raw)
                .map_err(|e| ServerError::AuthFailed(format!("bad encoding for {key}: {e}")))?;
            fields.insert(key.trim().to_string(), decoded.into_owned());
        }

        let consumer_key = fields
            .remove("oauth_consumer_key")
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ServerError::AuthFailed("missing oauth_consumer_key".into()))?;
        let token = fields.remove("oauth_token").filter(|t| !t.is_empty());
        Ok(Self {
            consumer_key,
            token,
        })
    }

    /// Render as an `Authorization` header value.
    pub fn to_header(&self) -> String {
        let mut header = format!(
            "OAuth oauth_consumer_key=\"{}\"",
            urlencoding::encode(&self.consumer_key)
        );
        if let Some(token) = &self.token {
            header.push_str(&format!(", oauth_token=\"{}\"", urlencoding::encode(token)));
        }
        header
    }
}

/// Turns request credentials into a viewer context, or rejects them.
#[async_trait]
pub trait CredentialResolver: Send + Sync {
    async fn resolve(&self, credentials: &Credentials) -> ServerResult<ViewerContext>;
}

/// A registered OAuth client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientRecord {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Clone, Debug)]
struct TokenRecord {
    client_id: String,
    actor: ActorId,
}

/// In-memory client and token registry.
#[derive(Debug, Default)]
pub struct InMemoryCredentials {
    clients: RwLock<HashMap<String, ClientRecord>>,
    tokens: RwLock<HashMap<String, TokenRecord>>,
}

impl InMemoryCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new client with a random key and secret.
    pub fn register_client(&self) -> ServerResult<ClientRecord> {
        let record = ClientRecord {
            client_id: Uuid::now_v7().simple().to_string(),
            client_secret: Uuid::now_v7().simple().to_string(),
        };
        self.clients
            .write()
            .map_err(|e| ServerError::Internal(format!("lock poisoned: {e}")))?
            .insert(record.client_id.clone(), record.clone());
        Ok(record)
    }

    /// Issue a user token for `actor`, bound to `client_id`.
    pub fn issue_token(&self, client_id: &str, actor: ActorId) -> ServerResult<String> {
        let known = self
            .clients
            .read()
            .map_err(|e| ServerError::Internal(format!("lock poisoned: {e}")))?
            .contains_key(client_id);
        if !known {
            return Err(ServerError::AuthFailed(format!("unknown client {client_id}")));
        }
        let token = Uuid::now_v7().simple().to_string();
        self.tokens
            .write()
            .map_err(|e| ServerError::Internal(format!("lock poisoned: {e}")))?
            .insert(
                token.clone(),
                TokenRecord {
                    client_id: client_id.to_string(),
                    actor,
                },
            );
        Ok(token)
    }
}

#[async_trait]
impl CredentialResolver for InMemoryCredentials {
    async fn resolve(&self, credentials: &Credentials) -> ServerResult<ViewerContext> {
        let client_known = self
            .clients
            .read()
            .map_err(|e| ServerError::Internal(format!("lock poisoned: {e}")))?
            .contains_key(&credentials.consumer_key);
        if !client_known {
            return Err(ServerError::AuthFailed("unknown client".into()));
        }

        let Some(token) = &credentials.token else {
            return Ok(ViewerContext::app(credentials.consumer_key.clone()));
        };
        let record = self
            .tokens
            .read()
            .map_err(|e| ServerError::Internal(format!("lock poisoned: {e}")))?
            .get(token)
            .cloned()
            .ok_or_else(|| ServerError::AuthFailed("unknown token".into()))?;
        if record.client_id != credentials.consumer_key {
            return Err(ServerError::AuthFailed("token was issued to another client".into()));
        }
        Ok(ViewerContext::actor(record.actor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn parse_full_oauth_header() {
        let creds = Credentials::parse_oauth(
            "OAuth realm=\"\", oauth_consumer_key=\"abc%2Bdef\", oauth_token=\"tok\", \
             oauth_signature_method=\"HMAC-SHA1\", oauth_signature=\"x%3D\"",
        )
        .unwrap();
        assert_eq!(creds, Credentials::user("abc+def", "tok"));
    }

    #[test]
    fn parse_client_only_header() {
        let creds = Credentials::parse_oauth("OAuth oauth_consumer_key=\"abc\"").unwrap();
        assert_eq!(creds, Credentials::client("abc"));
        let creds = Credentials::parse_oauth("OAuth oauth_consumer_key=\"abc\", oauth_token=\"\"").unwrap();
        assert!(creds.token.is_none());
    }

    #[test]
    fn scheme_is_case_insensitive() {
        for header in ["oauth oauth_consumer_key=\"k\"", "OAUTH oauth_consumer_key=\"k\""] {
            assert_eq!(Credentials::parse_oauth(header).unwrap(), Credentials::client("k"));
        }
        assert!(Credentials::parse_oauth("OAuthx oauth_consumer_key=\"k\"").is_err());
    }

    #[test]
    fn header_roundtrip() {
        let creds = Credentials::user("key with space", "t/1");
        assert_eq!(Credentials::parse_oauth(&creds.to_header()).unwrap(), creds);
    }

    #[test]
    fn rejects_missing_or_foreign_headers() {
        assert!(Credentials::from_headers(&HeaderMap::new()).is_err());
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert!(matches!(
            Credentials::from_headers(&headers),
            Err(ServerError::AuthFailed(_))
        ));
        assert!(Credentials::parse_oauth("OAuth oauth_token=\"t\"").is_err());
    }

    #[tokio::test]
    async fn resolves_app_and_actor() {
        let registry = InMemoryCredentials::new();
        let client = registry.register_client().unwrap();
        let actor = ActorId::local("allan", "localhost");
        let token = registry.issue_token(&client.client_id, actor.clone()).unwrap();

        let app = registry
            .resolve(&Credentials::client(&client.client_id))
            .await
            .unwrap();
        assert!(app.is_app_only());

        let user = registry
            .resolve(&Credentials::user(&client.client_id, &token))
            .await
            .unwrap();
        assert_eq!(user.actor_id(), Some(&actor));
    }

    #[tokio::test]
    async fn rejects_unknown_and_mismatched() {
        let registry = InMemoryCredentials::new();
        let a = registry.register_client().unwrap();
        let b = registry.register_client().unwrap();
        let token = registry
            .issue_token(&a.client_id, ActorId::local("allan", "localhost"))
            .unwrap();

        assert!(registry.resolve(&Credentials::client("nope")).await.is_err());
        assert!(registry
            .resolve(&Credentials::user(&a.client_id, "nope"))
            .await
            .is_err());
        assert!(registry
            .resolve(&Credentials::user(&b.client_id, &token))
            .await
            .is_err());
        assert!(registry
            .issue_token("nope", ActorId::local("x", "h"))
            .is_err());
    }
}
