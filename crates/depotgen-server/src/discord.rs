//! Minimal Discord OAuth2 client (authorization code grant, `identify` scope).

use std::time::Duration;

use depotgen_core::AppConfig;
use reqwest::{Client, Url};
use serde::Deserialize;
use thiserror::Error;

const DISCORD_API_BASE: &str = "https://discord.com/api";
const DISCORD_SCOPE: &str = "identify";
const DISCORD_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum DiscordError {
    #[error("discord request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("discord {endpoint} returned HTTP {status}")]
    UnexpectedStatus { endpoint: &'static str, status: u16 },

    #[error("invalid discord URL: {0}")]
    InvalidUrl(String),
}

/// The subset of `GET /users/@me` this service stores.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DiscordUser {
    pub id: String,
    pub username: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub struct DiscordOAuth {
    client: Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    api_base: String,
}

impl DiscordOAuth {
    /// Builds a client when both Discord credentials are configured.
    ///
    /// # Errors
    ///
    /// Returns [`DiscordError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>, DiscordError> {
        let (Some(client_id), Some(client_secret)) = (
            config.discord_client_id.as_ref(),
            config.discord_client_secret.as_ref(),
        ) else {
            return Ok(None);
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(DISCORD_TIMEOUT_SECS))
            .build()?;

        Ok(Some(Self {
            client,
            client_id: client_id.clone(),
            client_secret: client_secret.clone(),
            redirect_uri: config.discord_callback_url(),
            api_base: DISCORD_API_BASE.to_owned(),
        }))
    }

    #[must_use]
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        api_base.trim_end_matches('/').clone_into(&mut self.api_base);
        self
    }

    /// URL the browser is redirected to for consent.
    ///
    /// # Errors
    ///
    /// Returns [`DiscordError::InvalidUrl`] if the API base is not a URL.
    pub fn authorize_url(&self, state: &str) -> Result<String, DiscordError> {
        let url = Url::parse_with_params(
            &format!("{}/oauth2/authorize", self.api_base),
            [
                ("response_type", "code"),
                ("client_id", self.client_id.as_str()),
                ("scope", DISCORD_SCOPE),
                ("state", state),
                ("redirect_uri", self.redirect_uri.as_str()),
            ],
        )
        .map_err(|e| DiscordError::InvalidUrl(e.to_string()))?;
        Ok(url.to_string())
    }

    /// Exchanges an authorization `code` for an access token.
    ///
    /// # Errors
    ///
    /// Returns [`DiscordError`] on transport failure or a non-2xx response.
    pub async fn exchange_code(&self, code: &str) -> Result<String, DiscordError> {
        let response = self
            .client
            .post(format!("{}/oauth2/token", self.api_base))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DiscordError::UnexpectedStatus {
                endpoint: "token",
                status: response.status().as_u16(),
            });
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    /// Fetches the profile behind `access_token`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscordError`] on transport failure or a non-2xx response.
    pub async fn fetch_user(&self, access_token: &str) -> Result<DiscordUser, DiscordError> {
        let response = self
            .client
            .get(format!("{}/users/@me", self.api_base))
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DiscordError::UnexpectedStatus {
                endpoint: "users/@me",
                status: response.status().as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::test_support::test_config;

    #[test]
    fn from_config_requires_both_credentials() {
        assert!(DiscordOAuth::from_config(&test_config(false))
            .unwrap()
            .is_none());

        let mut partial = test_config(true);
        partial.discord_client_secret = None;
        assert!(DiscordOAuth::from_config(&partial).unwrap().is_none());
    }

    #[test]
    fn authorize_url_carries_identify_scope_and_state() {
        let oauth = DiscordOAuth::from_config(&test_config(true))
            .unwrap()
            .expect("enabled");
        let url = Url::parse(&oauth.authorize_url("st4te").unwrap()).unwrap();

        assert_eq!(url.path(), "/api/oauth2/authorize");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("scope".into(), "identify".into())));
        assert!(pairs.contains(&("state".into(), "st4te".into())));
        assert!(pairs.contains(&("client_id".into(), "client-1".into())));
        assert!(pairs.contains(&(
            "redirect_uri".into(),
            "http://localhost:5000/auth/discord/callback".into()
        )));
    }

    #[tokio::test]
    async fn exchange_code_then_fetch_user() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .and(body_string_contains("code=abc"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"access_token": "at-1"})),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users/@me"))
            .and(header("authorization", "Bearer at-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"id": "42", "username": "nelly", "avatar": null}),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let oauth = DiscordOAuth::from_config(&test_config(true))
            .unwrap()
            .expect("enabled")
            .with_api_base(&server.uri());

        let token = oauth.exchange_code("abc").await.expect("token");
        let user = oauth.fetch_user(&token).await.expect("user");
        assert_eq!(
            user,
            DiscordUser {
                id: "42".to_string(),
                username: "nelly".to_string(),
                avatar: None,
            }
        );
    }

    #[tokio::test]
    async fn rejected_code_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let oauth = DiscordOAuth::from_config(&test_config(true))
            .unwrap()
            .expect("enabled")
            .with_api_base(&server.uri());

        let err = oauth.exchange_code("bad").await.expect_err("should fail");
        assert!(matches!(
            err,
            DiscordError::UnexpectedStatus {
                endpoint: "token",
                status: 400
            }
        ));
    }
}
