//! Identity provider client: OAuth sign-in (PKCE code flow), current-user
//! lookup and sign-out.

use async_trait::async_trait;
use fittrack_core::principal::Principal;
use fittrack_core::types::UserId;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{extract_message, AuthError};
use crate::pkce::CHALLENGE_METHOD;
use crate::SupabaseConfig;

/// Access token and principal returned by a successful code exchange.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub access_token: String,
    pub principal: Principal,
}

/// The hosted identity service.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// URL the browser is sent to in order to sign in with `provider`.
    fn authorize_url(
        &self,
        provider: &str,
        redirect_to: &str,
        code_challenge: &str,
    ) -> Result<Url, AuthError>;

    /// Exchange the callback's auth code for a session.
    async fn exchange_code(
        &self,
        auth_code: &str,
        code_verifier: &str,
    ) -> Result<AuthSession, AuthError>;

    /// Resolve the principal behind an access token.
    ///
    /// Returns `Ok(None)` when the token is expired, revoked or unknown.
    async fn current_user(&self, access_token: &str) -> Result<Option<Principal>, AuthError>;

    /// Revoke the session behind an access token.
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
}

/// User object as returned by the identity service.
#[derive(Debug, Deserialize)]
struct RemoteUser {
    id: UserId,
    email: Option<String>,
    #[serde(default)]
    user_metadata: UserMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    name: Option<String>,
    full_name: Option<String>,
}

impl From<RemoteUser> for Principal {
    /// The display name is `user_metadata.name`, then `full_name`.
    fn from(user: RemoteUser) -> Self {
        let name = user.user_metadata.name.or(user.user_metadata.full_name);
        Principal {
            id: user.id,
            email: user.email,
            name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: RemoteUser,
}

#[derive(Debug, Serialize)]
struct PkceExchange<'a> {
    auth_code: &'a str,
    code_verifier: &'a str,
}

/// HTTP client for the hosted identity service.
pub struct AuthClient {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
    /// OAuth provider names this deployment accepts (e.g. `google`).
    providers: Vec<String>,
}

impl AuthClient {
    pub fn new(config: &SupabaseConfig, providers: Vec<String>) -> Self {
        Self::with_client(reqwest::Client::new(), config, providers)
    }

    pub fn with_client(
        client: reqwest::Client,
        config: &SupabaseConfig,
        providers: Vec<String>,
    ) -> Self {
        Self {
            client,
            base_url: config.url.clone(),
            anon_key: config.anon_key.clone(),
            providers,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    async fn rejected(response: reqwest::Response) -> AuthError {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        AuthError::Rejected {
            status,
            message: extract_message(status, &body),
        }
    }
}

#[async_trait]
impl IdentityProvider for AuthClient {
    fn authorize_url(
        &self,
        provider: &str,
        redirect_to: &str,
        code_challenge: &str,
    ) -> Result<Url, AuthError> {
        if !self.providers.iter().any(|p| p == provider) {
            return Err(AuthError::UnsupportedProvider(provider.to_string()));
        }
        let url = Url::parse_with_params(
            &self.endpoint("authorize"),
            &[
                ("provider", provider),
                ("redirect_to", redirect_to),
                ("code_challenge", code_challenge),
                ("code_challenge_method", CHALLENGE_METHOD),
            ],
        )?;
        Ok(url)
    }

    async fn exchange_code(
        &self,
        auth_code: &str,
        code_verifier: &str,
    ) -> Result<AuthSession, AuthError> {
        let response = self
            .client
            .post(self.endpoint("token"))
            .query(&[("grant_type", "pkce")])
            .header("apikey", &self.anon_key)
            .json(&PkceExchange {
                auth_code,
                code_verifier,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejected(response).await);
        }

        let token: TokenResponse = response.json().await?;
        Ok(AuthSession {
            access_token: token.access_token,
            principal: token.user.into(),
        })
    }

    async fn current_user(&self, access_token: &str) -> Result<Option<Principal>, AuthError> {
        let response = self
            .client
            .get(self.endpoint("user"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            status if status.is_success() => {
                let user: RemoteUser = response.json().await?;
                Ok(Some(user.into()))
            }
            _ => Err(Self::rejected(response).await),
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let response = self
            .client
            .post(self.endpoint("logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        match response.status() {
            // Already gone upstream; nothing left to revoke.
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(()),
            status if status.is_success() => Ok(()),
            _ => Err(Self::rejected(response).await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn client() -> AuthClient {
        AuthClient::new(
            &SupabaseConfig {
                url: "https://abc.supabase.co".into(),
                anon_key: "anon".into(),
            },
            vec!["google".into()],
        )
    }

    #[test]
    fn authorize_url_carries_pkce_params() {
        let url = client()
            .authorize_url("google", "http://localhost:3000/auth/callback", "challenge")
            .unwrap();

        assert_eq!(url.path(), "/auth/v1/authorize");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("provider".into(), "google".into())));
        assert!(pairs.contains(&(
            "redirect_to".into(),
            "http://localhost:3000/auth/callback".into()
        )));
        assert!(pairs.contains(&("code_challenge".into(), "challenge".into())));
        assert!(pairs.contains(&("code_challenge_method".into(), "s256".into())));
    }

    #[test]
    fn authorize_url_rejects_unknown_provider() {
        assert_matches!(
            client().authorize_url("myspace", "http://x/cb", "c"),
            Err(AuthError::UnsupportedProvider(ref p)) if p == "myspace"
        );
    }

    #[test]
    fn authorize_url_reports_malformed_base_url() {
        let client = AuthClient::new(
            &SupabaseConfig {
                url: "abc.supabase.co".into(),
                anon_key: "anon".into(),
            },
            vec!["google".into()],
        );
        assert_matches!(
            client.authorize_url("google", "http://x/cb", "c"),
            Err(AuthError::InvalidUrl(url::ParseError::RelativeUrlWithoutBase))
        );
    }

    #[test]
    fn remote_user_name_prefers_name_over_full_name() {
        let user: RemoteUser = serde_json::from_value(serde_json::json!({
            "id": "6f1c2a52-64f4-4a8e-9d4e-7f0d3c1b2a11",
            "email": "ada@example.com",
            "user_metadata": { "full_name": "Augusta Ada King", "name": "Ada Lovelace" }
        }))
        .unwrap();
        let principal: Principal = user.into();
        assert_eq!(principal.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(principal.first_name(), "Ada");
        assert_eq!(principal.email.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn remote_user_name_falls_back_to_full_name() {
        let user: RemoteUser = serde_json::from_value(serde_json::json!({
            "id": "6f1c2a52-64f4-4a8e-9d4e-7f0d3c1b2a11",
            "email": "ada@example.com",
            "user_metadata": { "full_name": "Augusta Ada King" }
        }))
        .unwrap();
        let principal: Principal = user.into();
        assert_eq!(principal.name.as_deref(), Some("Augusta Ada King"));
    }

    #[test]
    fn token_response_ignores_refresh_fields() {
        let token: TokenResponse = serde_json::from_value(serde_json::json!({
            "access_token": "at",
            "refresh_token": "rt",
            "expires_in": 3600,
            "token_type": "bearer",
            "user": { "id": "6f1c2a52-64f4-4a8e-9d4e-7f0d3c1b2a11", "email": null }
        }))
        .unwrap();
        assert_eq!(token.access_token, "at");
    }

    #[test]
    fn remote_user_without_metadata() {
        let user: RemoteUser = serde_json::from_value(serde_json::json!({
            "id": "6f1c2a52-64f4-4a8e-9d4e-7f0d3c1b2a11",
            "email": null
        }))
        .unwrap();
        let principal: Principal = user.into();
        assert_eq!(principal.name, None);
        assert_eq!(principal.first_name(), "User");
    }
}
