// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// 存储错误类型
#[derive(Error, Debug)]
pub enum StorageError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// 键不合法（空键、绝对路径或包含 `..`）
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
    /// 存储错误
    #[error("Storage error: {0}")]
    Other(String),
}

/// 存储仓库特质
///
/// 图表以相对键（如 `charts/<id>/likes.svg`）保存，
/// 键同时也是对外 URL 中静态前缀之后的路径
#[async_trait]
pub trait StorageRepository: Send + Sync {
    /// 使用指定键保存数据到存储中，已存在时覆盖
    async fn save(&self, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// 根据键从存储中检索数据
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// 根据键从存储中删除数据，不存在时视为成功
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// 列出前缀下的全部对象，前缀不存在时返回空列表
    async fn list(&self, prefix: &str) -> Result<Vec<StoredObject>, StorageError>;
}

/// 存储中的一个对象
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub key: String,
    /// 最后写入时间
    pub modified: DateTime<Utc>,
}

/// 校验存储键，拒绝逃逸出存储根目录的路径
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let escapes = key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key.split('/').any(|segment| segment.is_empty() || segment == "..");
    if escapes {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}
