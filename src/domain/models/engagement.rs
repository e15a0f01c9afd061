// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// 账号简要信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRef {
    pub did: String,
    pub handle: String,
    pub display_name: Option<String>,
}

/// 一条点赞记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub actor: ProfileRef,
    pub created_at: Option<String>,
    pub indexed_at: Option<String>,
}

impl Like {
    /// 用于统计的时间戳，优先使用索引时间
    pub fn timestamp(&self) -> Option<&str> {
        self.indexed_at.as_deref().or(self.created_at.as_deref())
    }
}

/// 一条转发记录（转发者的账号信息）
///
/// 转发列表只返回转发者的资料，资料里的 `createdAt` 是账号注册时间，
/// 不能代表转发时间，因此只保留 `indexed_at`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repost {
    pub actor: ProfileRef,
    pub indexed_at: Option<String>,
}

impl Repost {
    /// 用于统计的时间戳；没有索引时间的转发不参与统计
    pub fn timestamp(&self) -> Option<&str> {
        self.indexed_at.as_deref()
    }
}

/// 单日计数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u32,
}

/// 按日期统计时间戳数量，结果按日期升序排列
///
/// 只取 `T` 之前的日期部分，无法解析的时间戳会被跳过
pub fn daily_counts<'a, I>(timestamps: I) -> Vec<DailyCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut buckets: BTreeMap<NaiveDate, u32> = BTreeMap::new();

    for timestamp in timestamps {
        let day = timestamp.split('T').next().unwrap_or_default().trim();
        match NaiveDate::parse_from_str(day, "%Y-%m-%d") {
            Ok(date) => *buckets.entry(date).or_insert(0) += 1,
            Err(_) => debug!("Skipping unparseable timestamp: {}", timestamp),
        }
    }

    buckets
        .into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect()
}

/// 一个帖子完整的互动数据
#[derive(Debug, Clone)]
pub struct PostEngagement {
    pub did: String,
    /// 作者 handle；无法解析时退化为 DID
    pub handle: String,
    pub post_url: String,
    pub likes: Vec<Like>,
    pub reposts: Vec<Repost>,
}

impl PostEngagement {
    pub fn like_days(&self) -> Vec<DailyCount> {
        daily_counts(self.likes.iter().filter_map(Like::timestamp))
    }

    pub fn repost_days(&self) -> Vec<DailyCount> {
        daily_counts(self.reposts.iter().filter_map(Repost::timestamp))
    }

    pub fn is_empty(&self) -> bool {
        self.likes.is_empty() && self.reposts.is_empty()
    }
}
