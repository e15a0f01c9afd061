// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use metrics::counter;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::models::{
    CreateSessionRequest, CreateSessionResponse, GetLikesResponse, GetRepostedByResponse,
    ProfileView, ResolveHandleResponse, XrpcErrorBody,
};
use crate::config::settings::BlueskySettings;
use crate::domain::models::engagement::{Like, ProfileRef, Repost};
use crate::domain::social::client::{SocialClient, SocialError};
use crate::utils::retry_policy::RetryPolicy;

const CREATE_SESSION: &str = "com.atproto.server.createSession";
const RESOLVE_HANDLE: &str = "com.atproto.identity.resolveHandle";
const GET_PROFILE: &str = "app.bsky.actor.getProfile";
const GET_LIKES: &str = "app.bsky.feed.getLikes";
const GET_REPOSTED_BY: &str = "app.bsky.feed.getRepostedBy";

struct Credentials {
    identifier: String,
    password: String,
}

#[derive(Debug, Clone)]
struct Session {
    access_jwt: String,
}

/// Bluesky XRPC 客户端
///
/// 首次调用时登录，令牌保存在客户端内部；
/// 令牌失效时自动重新登录并重放一次请求
pub struct BlueskyClient {
    http: reqwest::Client,
    api_url: String,
    credentials: Option<Credentials>,
    session: RwLock<Option<Session>>,
    limiter: DefaultDirectRateLimiter,
    retry: RetryPolicy,
    page_limit: u32,
    max_pages: u32,
}

impl BlueskyClient {
    pub fn new(settings: &BlueskySettings) -> Result<Self, SocialError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("skygraph/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(settings.timeout_secs))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| SocialError::Network(e.to_string()))?;

        let credentials = match (&settings.identifier, &settings.password) {
            (Some(identifier), Some(password)) if !identifier.is_empty() && !password.is_empty() => {
                Some(Credentials {
                    identifier: identifier.clone(),
                    password: password.clone(),
                })
            }
            _ => None,
        };

        let rps = NonZeroU32::new(settings.requests_per_second).unwrap_or(NonZeroU32::MIN);

        Ok(Self {
            http,
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            credentials,
            session: RwLock::new(None),
            limiter: RateLimiter::direct(Quota::per_second(rps)),
            retry: RetryPolicy::from_settings(settings),
            page_limit: settings.page_limit.clamp(1, 100),
            max_pages: settings.max_pages.max(1),
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn endpoint(&self, nsid: &str) -> String {
        format!("{}/{}", self.api_url, nsid)
    }

    /// 登录并缓存访问令牌
    pub async fn login(&self) -> Result<(), SocialError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(SocialError::MissingCredentials)?;

        info!("Attempting to log into Bluesky as {}", credentials.identifier);
        self.limiter.until_ready().await;

        let response = self
            .http
            .post(self.endpoint(CREATE_SESSION))
            .json(&CreateSessionRequest {
                identifier: &credentials.identifier,
                password: &credentials.password,
            })
            .send()
            .await
            .map_err(|e| SocialError::Network(e.to_string()))?;

        let status = response.status();
        record_request(CREATE_SESSION, status);
        if !status.is_success() {
            let body: XrpcErrorBody = response.json().await.unwrap_or_default();
            return Err(SocialError::Authentication(format!(
                "{} ({})",
                body.message
                    .or(body.error)
                    .unwrap_or_else(|| "createSession rejected".to_string()),
                status.as_u16()
            )));
        }

        let body: CreateSessionResponse = response
            .json()
            .await
            .map_err(|e| SocialError::Decode(e.to_string()))?;
        let access_jwt = body
            .access_jwt
            .filter(|token| !token.is_empty())
            .ok_or_else(|| SocialError::Authentication("Access token not retrieved.".to_string()))?;

        info!(
            "Login successful for {}",
            body.handle.or(body.did).unwrap_or_default()
        );
        *self.session.write().await = Some(Session { access_jwt });
        Ok(())
    }

    async fn access_token(&self) -> Result<String, SocialError> {
        if let Some(session) = self.session.read().await.as_ref() {
            return Ok(session.access_jwt.clone());
        }
        self.login().await?;
        self.session
            .read()
            .await
            .as_ref()
            .map(|session| session.access_jwt.clone())
            .ok_or_else(|| SocialError::Authentication("Session was not stored".to_string()))
    }

    /// 仅当缓存的仍是失效令牌时才清除，避免覆盖其他请求刚刷新的会话
    async fn invalidate(&self, stale_token: &str) {
        let mut session = self.session.write().await;
        if session
            .as_ref()
            .is_some_and(|s| s.access_jwt == stale_token)
        {
            *session = None;
        }
    }

    async fn get_json<T>(&self, nsid: &str, query: &[(&str, String)]) -> Result<T, SocialError>
    where
        T: DeserializeOwned + Send,
    {
        self.retry
            .run(nsid, || self.get_json_authenticated(nsid, query))
            .await
    }

    async fn get_json_authenticated<T>(
        &self,
        nsid: &str,
        query: &[(&str, String)],
    ) -> Result<T, SocialError>
    where
        T: DeserializeOwned + Send,
    {
        let token = self.access_token().await?;
        match self.send_get(nsid, query, &token).await {
            Err(e) if is_expired_session(&e) => {
                warn!("Session rejected by {} ({}), logging in again", nsid, e);
                self.invalidate(&token).await;
                let token = self.access_token().await?;
                self.send_get(nsid, query, &token).await
            }
            other => other,
        }
    }

    async fn send_get<T>(
        &self,
        nsid: &str,
        query: &[(&str, String)],
        token: &str,
    ) -> Result<T, SocialError>
    where
        T: DeserializeOwned,
    {
        self.limiter.until_ready().await;
        debug!("GET {} {:?}", nsid, query);

        let response = self
            .http
            .get(self.endpoint(nsid))
            .bearer_auth(token)
            .query(query)
            .send()
            .await
            .map_err(|e| SocialError::Network(e.to_string()))?;

        let status = response.status();
        record_request(nsid, status);

        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| SocialError::Decode(e.to_string()));
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(SocialError::RateLimited);
        }

        let text = response.text().await.unwrap_or_default();
        let body: XrpcErrorBody = serde_json::from_str(&text).unwrap_or_default();
        Err(SocialError::Api {
            status: status.as_u16(),
            error: body.error,
            message: body.message.unwrap_or_else(|| {
                if text.is_empty() {
                    status.to_string()
                } else {
                    text
                }
            }),
        })
    }

    async fn paginate<P, I, F>(
        &self,
        nsid: &str,
        post_uri: &str,
        extract: F,
    ) -> Result<Vec<I>, SocialError>
    where
        P: DeserializeOwned + Send,
        I: Send,
        F: Fn(P) -> (Vec<I>, Option<String>) + Send + Sync,
    {
        let mut items = Vec::new();
        let mut cursor: Option<String> = None;

        for page in 0..self.max_pages {
            let mut query = vec![
                ("uri", post_uri.to_string()),
                ("limit", self.page_limit.to_string()),
            ];
            if let Some(cursor) = &cursor {
                query.push(("cursor", cursor.clone()));
            }

            let (batch, next) = extract(self.get_json::<P>(nsid, &query).await?);
            debug!("{} page {} returned {} items", nsid, page + 1, batch.len());
            let exhausted = batch.is_empty();
            items.extend(batch);

            match next.filter(|c| !c.is_empty()) {
                Some(next) if !exhausted => cursor = Some(next),
                _ => return Ok(items),
            }
        }

        warn!(
            "{} stopped after {} pages for {}, results may be truncated",
            nsid, self.max_pages, post_uri
        );
        Ok(items)
    }
}

fn is_expired_session(error: &SocialError) -> bool {
    match error {
        SocialError::Api { status: 401, .. } => true,
        SocialError::Api {
            error: Some(name), ..
        } => name == "ExpiredToken" || name == "InvalidToken",
        _ => false,
    }
}

fn not_found_on_bad_request(error: SocialError, what: &str) -> SocialError {
    match error {
        SocialError::Api {
            status: 400 | 404, ..
        } => SocialError::NotFound(what.to_string()),
        other => other,
    }
}

fn record_request(nsid: &str, status: StatusCode) {
    counter!(
        "bluesky_requests_total",
        "endpoint" => nsid.to_string(),
        "outcome" => status.as_u16().to_string()
    )
    .increment(1);
}

#[async_trait]
impl SocialClient for BlueskyClient {
    async fn resolve_handle(&self, handle: &str) -> Result<String, SocialError> {
        info!("Resolving DID for handle: {}", handle);
        let response: ResolveHandleResponse = self
            .get_json(RESOLVE_HANDLE, &[("handle", handle.to_string())])
            .await
            .map_err(|e| not_found_on_bad_request(e, handle))?;

        let did = response
            .did
            .filter(|did| !did.is_empty())
            .ok_or_else(|| SocialError::NotFound(handle.to_string()))?;
        info!("Resolved DID for {}: {}", handle, did);
        Ok(did)
    }

    async fn get_profile(&self, actor: &str) -> Result<ProfileRef, SocialError> {
        let profile: ProfileView = self
            .get_json(GET_PROFILE, &[("actor", actor.to_string())])
            .await
            .map_err(|e| not_found_on_bad_request(e, actor))?;
        info!("Resolved handle for {}: {}", actor, profile.handle);
        Ok(profile.into())
    }

    async fn get_likes(&self, post_uri: &str) -> Result<Vec<Like>, SocialError> {
        self.paginate(GET_LIKES, post_uri, |page: GetLikesResponse| {
            (
                page.likes.into_iter().map(Like::from).collect(),
                page.cursor,
            )
        })
        .await
    }

    async fn get_reposted_by(&self, post_uri: &str) -> Result<Vec<Repost>, SocialError> {
        self.paginate(GET_REPOSTED_BY, post_uri, |page: GetRepostedByResponse| {
            (
                page.reposted_by.into_iter().map(Repost::from).collect(),
                page.cursor,
            )
        })
        .await
    }

    fn name(&self) -> &'static str {
        "bluesky"
    }
}
