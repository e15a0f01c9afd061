// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::engagement::{Like, ProfileRef, Repost};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SocialError {
    #[error("Bluesky credentials are not configured")]
    MissingCredentials,
    #[error("Authentication failed: {0}")]
    Authentication(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Rate limit exceeded")]
    RateLimited,
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        error: Option<String>,
        message: String,
    },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl SocialError {
    /// 是否为可重试的瞬时错误
    pub fn is_transient(&self) -> bool {
        match self {
            SocialError::Network(_) | SocialError::RateLimited => true,
            SocialError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// 社交平台客户端
///
/// 读取帖子作者信息以及点赞、转发列表
#[async_trait]
pub trait SocialClient: Send + Sync {
    /// 将 handle 解析为 DID
    async fn resolve_handle(&self, handle: &str) -> Result<String, SocialError>;

    /// 获取账号信息（参数可以是 DID 或 handle）
    async fn get_profile(&self, actor: &str) -> Result<ProfileRef, SocialError>;

    /// 获取帖子的全部点赞（受分页上限约束）
    async fn get_likes(&self, post_uri: &str) -> Result<Vec<Like>, SocialError>;

    /// 获取帖子的全部转发者（受分页上限约束）
    async fn get_reposted_by(&self, post_uri: &str) -> Result<Vec<Repost>, SocialError>;

    /// 客户端名称
    fn name(&self) -> &'static str;
}
