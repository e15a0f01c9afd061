// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use thiserror::Error;

static POST_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(?:www\.)?bsky\.app/profile/([^/?#\s]+)/post/([^/?#\s]+)/?(?:[?#].*)?$")
        .expect("Failed to compile post url regex")
});

static DID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^did:[a-z]+:[A-Za-z0-9._:%-]+$").expect("Failed to compile did regex")
});

static HANDLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?$")
        .expect("Failed to compile handle regex")
});

static RKEY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._~:-]{1,512}$").expect("Failed to compile rkey regex"));

/// 帖子链接解析错误
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PostLinkError {
    #[error("No link provided")]
    Empty,
    #[error("Invalid link format.")]
    InvalidFormat,
    #[error("Invalid account identifier in link: {0}")]
    InvalidActor(String),
    #[error("Invalid post id in link: {0}")]
    InvalidPostId(String),
}

/// 帖子作者标识
///
/// 网页链接里既可能出现 handle，也可能直接出现 DID
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    Did(String),
    Handle(String),
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Actor::Did(did) => f.write_str(did),
            Actor::Handle(handle) => f.write_str(handle),
        }
    }
}

/// 解析后的 Bluesky 帖子链接
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostLink {
    pub actor: Actor,
    /// 帖子记录键
    pub rkey: String,
}

impl PostLink {
    /// 解析 `https://bsky.app/profile/<actor>/post/<rkey>` 形式的链接
    ///
    /// 首尾空白会被忽略，允许末尾斜杠、查询串和片段
    pub fn parse(link: &str) -> Result<Self, PostLinkError> {
        let link = link.trim();
        if link.is_empty() {
            return Err(PostLinkError::Empty);
        }

        let captures = POST_URL_REGEX
            .captures(link)
            .ok_or(PostLinkError::InvalidFormat)?;
        let actor = &captures[1];
        let rkey = &captures[2];

        let actor = if actor.starts_with("did:") {
            if !DID_REGEX.is_match(actor) {
                return Err(PostLinkError::InvalidActor(actor.to_string()));
            }
            Actor::Did(actor.to_string())
        } else {
            if actor.len() > 253 || !HANDLE_REGEX.is_match(actor) {
                return Err(PostLinkError::InvalidActor(actor.to_string()));
            }
            Actor::Handle(actor.to_lowercase())
        };

        if !RKEY_REGEX.is_match(rkey) {
            return Err(PostLinkError::InvalidPostId(rkey.to_string()));
        }

        Ok(Self {
            actor,
            rkey: rkey.to_string(),
        })
    }

    /// 帖子的 AT URI
    pub fn at_uri(&self, did: &str) -> String {
        format!("at://{}/app.bsky.feed.post/{}", did, self.rkey)
    }

    /// 以 handle 展示的网页地址
    pub fn web_url(&self, handle: &str) -> String {
        format!("https://bsky.app/profile/{}/post/{}", handle, self.rkey)
    }
}
