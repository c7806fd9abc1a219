use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::credentials::CredentialStore;
use crate::error::{AppError, AuthError};
use crate::Result;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,  // Username
    pub sid: Uuid,    // Session id
    pub exp: i64,     // Expiration time
    pub iat: i64,     // Issued at
}

/// Authentication state of one caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Anonymous,
    Authenticated { username: String },
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Session::Authenticated { username } => Some(username),
            Session::Anonymous => None,
        }
    }
}

/// Issues per-caller session tokens and tracks which are still live.
///
/// Tokens are HS256 JWTs; a token only authenticates while its session id is
/// present in the live set, so logout takes effect before expiry. The live
/// set is in memory and does not survive a restart. Expired entries are
/// pruned whenever a new session is opened.
pub struct SessionController {
    jwt_secret: String,
    token_expiry_hours: i64,
    live: RwLock<HashMap<Uuid, LiveSession>>,
}

#[derive(Debug, Clone)]
struct LiveSession {
    username: String,
    expires_at: i64,
}

impl SessionController {
    pub fn new(jwt_secret: String, token_expiry_hours: i64) -> Self {
        Self {
            jwt_secret,
            token_expiry_hours,
            live: RwLock::new(HashMap::new()),
        }
    }

    /// Verifies the credentials and opens a session, returning its token.
    pub async fn login(
        &self,
        credentials: &CredentialStore,
        username: &str,
        password: &str,
    ) -> Result<String> {
        if !credentials.verify(username, password).await? {
            return Err(AuthError::InvalidCredentials.into());
        }

        let sid = Uuid::new_v4();
        let now = Utc::now();
        let expires_at = (now + Duration::hours(self.token_expiry_hours)).timestamp();
        let token = self.generate_token(username, sid, now.timestamp(), expires_at)?;

        let mut live = self.live.write().await;
        live.insert(
            sid,
            LiveSession {
                username: username.to_string(),
                expires_at,
            },
        );
        live.retain(|_, session| session.expires_at > now.timestamp());
        Ok(token)
    }

    pub async fn resolve(&self, token: Option<&str>) -> Session {
        let Some(token) = token else {
            return Session::Anonymous;
        };
        let Ok(claims) = self.decode_token(token, true) else {
            return Session::Anonymous;
        };

        match self.live.read().await.get(&claims.sid) {
            Some(session) if session.username == claims.sub => Session::Authenticated {
                username: claims.sub,
            },
            _ => Session::Anonymous,
        }
    }

    /// Resolves the token and fails unless it belongs to a live session.
    pub async fn require(&self, token: Option<&str>) -> Result<String> {
        match self.resolve(token).await {
            Session::Authenticated { username } => Ok(username),
            Session::Anonymous => Err(AuthError::Unauthorized.into()),
        }
    }

    /// Closes the session behind `token`. An expired token is still accepted
    /// so its entry can be dropped.
    pub async fn logout(&self, token: &str) -> Result<()> {
        let claims = self.decode_token(token, false)?;
        if self.live.write().await.remove(&claims.sid).is_none() {
            return Err(AuthError::InvalidToken.into());
        }
        Ok(())
    }

    pub async fn live_sessions(&self) -> usize {
        self.live.read().await.len()
    }

    fn generate_token(&self, username: &str, sid: Uuid, iat: i64, exp: i64) -> Result<String> {
        let claims = Claims {
            sub: username.to_string(),
            sid,
            exp,
            iat,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?;

        Ok(token)
    }

    fn decode_token(&self, token: &str, validate_exp: bool) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = validate_exp;

        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(AppError::from)?;

        Ok(claims.claims)
    }
}
