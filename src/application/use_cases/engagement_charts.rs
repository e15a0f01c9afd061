// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{counter, histogram};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{
    application::dto::chart_request::ChartRequestDto,
    config::settings::ChartSettings,
    domain::{
        charts::{ChartError, ChartRenderer},
        models::{
            chart::{Chart, ChartKind, ChartPanel, StoredChart, CHART_KEY_PREFIX},
            engagement::{DailyCount, PostEngagement},
            post_link::{Actor, PostLink, PostLinkError},
        },
        repositories::storage_repository::{StorageError, StorageRepository},
        social::client::{SocialClient, SocialError},
    },
};

#[derive(Error, Debug)]
pub enum EngagementError {
    #[error("No link provided")]
    EmptyLink,
    #[error("{0}")]
    InvalidLink(String),
    #[error("Could not resolve Bluesky account: {0}")]
    ActorNotFound(String),
    #[error("No likes or reposts found for this post.")]
    NoEngagement,
    #[error("Found {likes} likes and {reposts} reposts, but none had a usable timestamp.")]
    UndatedEngagement { likes: usize, reposts: usize },
    #[error("Bluesky request failed: {0}")]
    Social(#[from] SocialError),
    #[error("Error generating charts: {0}")]
    Chart(#[from] ChartError),
    #[error("Error storing charts: {0}")]
    Storage(#[from] StorageError),
}

impl From<PostLinkError> for EngagementError {
    fn from(err: PostLinkError) -> Self {
        match err {
            PostLinkError::Empty => EngagementError::EmptyLink,
            other => EngagementError::InvalidLink(other.to_string()),
        }
    }
}

/// `/process` 的结果：一张包含点赞与转发面板的总览图
#[derive(Debug, Clone)]
pub struct GraphResult {
    pub graph: StoredChart,
    pub handle: String,
    pub post_url: String,
    pub likes: usize,
    pub reposts: usize,
}

/// `/generate` 的结果：点赞图与转发图各一张
#[derive(Debug, Clone, Default)]
pub struct ChartsResult {
    pub likes_chart: Option<StoredChart>,
    pub reposts_chart: Option<StoredChart>,
}

/// 帖子互动图表用例
///
/// 解析链接、拉取互动数据、渲染并保存图表
pub struct EngagementChartsUseCase {
    client: Arc<dyn SocialClient>,
    renderer: Arc<dyn ChartRenderer>,
    storage: Arc<dyn StorageRepository>,
    public_prefix: String,
    likes_color: String,
    reposts_color: String,
}

impl EngagementChartsUseCase {
    pub fn new(
        client: Arc<dyn SocialClient>,
        renderer: Arc<dyn ChartRenderer>,
        storage: Arc<dyn StorageRepository>,
        public_prefix: impl Into<String>,
        chart: &ChartSettings,
    ) -> Self {
        Self {
            client,
            renderer,
            storage,
            public_prefix: public_prefix.into().trim_end_matches('/').to_string(),
            likes_color: chart.likes_color.clone(),
            reposts_color: chart.reposts_color.clone(),
        }
    }

    /// 拉取帖子的作者信息、点赞与转发
    pub async fn collect(&self, request: &ChartRequestDto) -> Result<PostEngagement, EngagementError> {
        request
            .validate()
            .map_err(|e| EngagementError::InvalidLink(e.to_string()))?;

        let link = request.link.trim();
        let post = PostLink::parse(link)?;
        info!("Received link: {}", link);

        let (did, handle) = match &post.actor {
            Actor::Did(did) => {
                let handle = match self.client.get_profile(did).await {
                    Ok(profile) => profile.handle,
                    Err(e) => {
                        warn!("Falling back to DID for display, profile lookup failed: {}", e);
                        did.clone()
                    }
                };
                (did.clone(), handle)
            }
            Actor::Handle(handle) => {
                let did = self
                    .client
                    .resolve_handle(handle)
                    .await
                    .map_err(|e| match e {
                        SocialError::NotFound(_) => EngagementError::ActorNotFound(handle.clone()),
                        other => other.into(),
                    })?;
                (did, handle.clone())
            }
        };

        let post_uri = post.at_uri(&did);
        let (likes, reposts) = tokio::try_join!(
            self.client.get_likes(&post_uri),
            self.client.get_reposted_by(&post_uri)
        )?;
        info!(
            "Fetched {} likes and {} reposts for {} from {}",
            likes.len(),
            reposts.len(),
            post_uri,
            self.client.name()
        );

        Ok(PostEngagement {
            post_url: post.web_url(&handle),
            did,
            handle,
            likes,
            reposts,
        })
    }

    /// 生成合并的互动总览图
    pub async fn graph(&self, request: &ChartRequestDto) -> Result<GraphResult, EngagementError> {
        let started = Instant::now();
        let engagement = self.collect(request).await?;

        let mut panels = Vec::new();
        let like_days = engagement.like_days();
        if !like_days.is_empty() {
            panels.push(self.likes_panel(like_days));
        }
        let repost_days = engagement.repost_days();
        if !repost_days.is_empty() {
            panels.push(self.reposts_panel(repost_days));
        }
        if panels.is_empty() {
            return Err(nothing_to_draw(&engagement));
        }

        let chart = Chart {
            kind: ChartKind::Engagement,
            title: format!("Engagement for @{}", engagement.handle),
            subtitle: Some(format!("Post: {}", engagement.post_url)),
            panels,
        };
        let graph = self.store(&chart, Uuid::new_v4()).await?;
        histogram!("process_duration_seconds").record(started.elapsed().as_secs_f64());

        Ok(GraphResult {
            graph,
            likes: engagement.likes.len(),
            reposts: engagement.reposts.len(),
            handle: engagement.handle,
            post_url: engagement.post_url,
        })
    }

    /// 分别生成点赞图与转发图，没有数据的一项会被省略
    pub async fn charts(&self, request: &ChartRequestDto) -> Result<ChartsResult, EngagementError> {
        let started = Instant::now();
        let engagement = self.collect(request).await?;
        let id = Uuid::new_v4();
        let mut result = ChartsResult::default();

        let like_days = engagement.like_days();
        if !like_days.is_empty() {
            let chart = Chart {
                kind: ChartKind::Likes,
                title: format!("Likes Over Time for @{}", engagement.handle),
                subtitle: Some(format!("Post: {}", engagement.post_url)),
                panels: vec![self.likes_panel(like_days)],
            };
            result.likes_chart = Some(self.store(&chart, id).await?);
        }

        let repost_days = engagement.repost_days();
        if !repost_days.is_empty() {
            let chart = Chart {
                kind: ChartKind::Reposts,
                title: format!("Reposts Over Time for @{}", engagement.handle),
                subtitle: None,
                panels: vec![self.reposts_panel(repost_days)],
            };
            result.reposts_chart = Some(self.store(&chart, id).await?);
        }

        if result.likes_chart.is_none() && result.reposts_chart.is_none() {
            debug!("No charts generated: {}", nothing_to_draw(&engagement));
        }

        histogram!("process_duration_seconds").record(started.elapsed().as_secs_f64());
        Ok(result)
    }

    fn likes_panel(&self, series: Vec<DailyCount>) -> ChartPanel {
        ChartPanel {
            title: "Likes Over Time".to_string(),
            x_label: "Date".to_string(),
            y_label: "Number of Likes".to_string(),
            color: self.likes_color.clone(),
            series,
        }
    }

    fn reposts_panel(&self, series: Vec<DailyCount>) -> ChartPanel {
        ChartPanel {
            title: "Reposts Over Time".to_string(),
            x_label: "Date".to_string(),
            y_label: "Number of Reposts".to_string(),
            color: self.reposts_color.clone(),
            series,
        }
    }

    async fn store(&self, chart: &Chart, id: Uuid) -> Result<StoredChart, EngagementError> {
        debug!("Rendering {} chart with {} renderer", chart.kind, self.renderer.name());
        let rendered = self.renderer.render(chart)?;
        let key = format!(
            "{}/{}/{}.{}",
            CHART_KEY_PREFIX, id, chart.kind, rendered.extension
        );
        self.storage.save(&key, &rendered.bytes).await?;

        counter!("charts_rendered_total", "kind" => chart.kind.as_str()).increment(1);
        info!("{} chart saved to {}", chart.kind, key);

        Ok(StoredChart {
            kind: chart.kind,
            url: format!("{}/{}", self.public_prefix, key),
            key,
        })
    }
}

/// 没有可绘制的数据时区分"确实没有互动"和"时间戳全部无法使用"
fn nothing_to_draw(engagement: &PostEngagement) -> EngagementError {
    if engagement.is_empty() {
        return EngagementError::NoEngagement;
    }
    warn!(
        "Skipped all {} likes and {} reposts of {}: no usable timestamps",
        engagement.likes.len(),
        engagement.reposts.len(),
        engagement.post_url
    );
    EngagementError::UndatedEngagement {
        likes: engagement.likes.len(),
        reposts: engagement.reposts.len(),
    }
}
