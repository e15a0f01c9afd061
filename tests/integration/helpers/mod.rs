// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use axum_test::TestServer;
use skygraph::application::use_cases::engagement_charts::EngagementChartsUseCase;
use skygraph::config::settings::Settings;
use skygraph::domain::models::engagement::{Like, ProfileRef, Repost};
use skygraph::domain::social::client::{SocialClient, SocialError};
use skygraph::infrastructure::charts::SvgChartRenderer;
use skygraph::infrastructure::storage::LocalStorage;
use skygraph::presentation::routes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

/// 内存中的社交平台客户端
#[derive(Default)]
pub struct FakeSocialClient {
    /// handle -> DID
    pub handles: HashMap<String, String>,
    /// DID -> handle
    pub profiles: HashMap<String, String>,
    pub likes: Vec<Like>,
    pub reposts: Vec<Repost>,
    /// 设置后所有点赞/转发请求都返回该错误
    pub feed_error: Option<SocialError>,
    pub feed_calls: AtomicUsize,
    pub requested_uris: std::sync::Mutex<Vec<String>>,
}

impl FakeSocialClient {
    pub fn with_author(handle: &str, did: &str) -> Self {
        let mut client = Self::default();
        client.handles.insert(handle.to_string(), did.to_string());
        client.profiles.insert(did.to_string(), handle.to_string());
        client
    }

    fn record(&self, uri: &str) -> Result<(), SocialError> {
        self.feed_calls.fetch_add(1, Ordering::SeqCst);
        self.requested_uris.lock().unwrap().push(uri.to_string());
        match &self.feed_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SocialClient for FakeSocialClient {
    async fn resolve_handle(&self, handle: &str) -> Result<String, SocialError> {
        self.handles
            .get(handle)
            .cloned()
            .ok_or_else(|| SocialError::NotFound(handle.to_string()))
    }

    async fn get_profile(&self, actor: &str) -> Result<ProfileRef, SocialError> {
        self.profiles
            .get(actor)
            .map(|handle| ProfileRef {
                did: actor.to_string(),
                handle: handle.clone(),
                display_name: None,
            })
            .ok_or_else(|| SocialError::NotFound(actor.to_string()))
    }

    async fn get_likes(&self, post_uri: &str) -> Result<Vec<Like>, SocialError> {
        self.record(post_uri)?;
        Ok(self.likes.clone())
    }

    async fn get_reposted_by(&self, post_uri: &str) -> Result<Vec<Repost>, SocialError> {
        self.record(post_uri)?;
        Ok(self.reposts.clone())
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

pub fn profile(handle: &str) -> ProfileRef {
    ProfileRef {
        did: format!("did:plc:{}", handle.replace('.', "")),
        handle: handle.to_string(),
        display_name: None,
    }
}

pub fn like(handle: &str, indexed_at: &str) -> Like {
    Like {
        actor: profile(handle),
        created_at: None,
        indexed_at: Some(indexed_at.to_string()),
    }
}

pub fn repost(handle: &str, indexed_at: &str) -> Repost {
    Repost {
        actor: profile(handle),
        indexed_at: Some(indexed_at.to_string()),
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub client: Arc<FakeSocialClient>,
    pub use_case: Arc<EngagementChartsUseCase>,
    // Keep the chart directory alive
    pub static_dir: TempDir,
}

pub fn create_test_app(client: FakeSocialClient) -> TestApp {
    let settings = Settings::defaults().expect("Failed to load default settings");
    let static_dir = tempfile::tempdir().expect("Failed to create temp dir");

    let client = Arc::new(client);
    let use_case = Arc::new(EngagementChartsUseCase::new(
        client.clone(),
        Arc::new(SvgChartRenderer::new(&settings.chart)),
        Arc::new(LocalStorage::new(static_dir.path())),
        settings.storage.public_prefix.clone(),
        &settings.chart,
    ));

    let app = routes::routes(use_case.clone(), static_dir.path());
    let server = TestServer::new(app).unwrap();

    TestApp {
        server,
        client,
        use_case,
        static_dir,
    }
}
