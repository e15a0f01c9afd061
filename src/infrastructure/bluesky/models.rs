// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! XRPC 请求与响应的线上格式

use serde::{Deserialize, Serialize};

use crate::domain::models::engagement::{Like, ProfileRef, Repost};

#[derive(Debug, Serialize)]
pub struct CreateSessionRequest<'a> {
    pub identifier: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub access_jwt: Option<String>,
    pub did: Option<String>,
    pub handle: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResolveHandleResponse {
    pub did: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub did: String,
    pub handle: String,
    pub display_name: Option<String>,
    pub indexed_at: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeView {
    pub actor: ProfileView,
    pub created_at: Option<String>,
    pub indexed_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GetLikesResponse {
    #[serde(default)]
    pub likes: Vec<LikeView>,
    pub cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetRepostedByResponse {
    #[serde(default)]
    pub reposted_by: Vec<ProfileView>,
    pub cursor: Option<String>,
}

/// XRPC 错误响应体
#[derive(Debug, Default, Deserialize)]
pub struct XrpcErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

impl From<ProfileView> for ProfileRef {
    fn from(view: ProfileView) -> Self {
        Self {
            did: view.did,
            handle: view.handle,
            display_name: view.display_name,
        }
    }
}

impl From<LikeView> for Like {
    fn from(view: LikeView) -> Self {
        Self {
            actor: view.actor.into(),
            created_at: view.created_at,
            indexed_at: view.indexed_at,
        }
    }
}

impl From<ProfileView> for Repost {
    fn from(view: ProfileView) -> Self {
        let indexed_at = view.indexed_at.clone();
        Self {
            actor: view.into(),
            indexed_at,
        }
    }
}
