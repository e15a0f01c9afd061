// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use metrics::counter;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::config::settings::StorageSettings;
use crate::domain::models::chart::CHART_KEY_PREFIX;
use crate::domain::repositories::storage_repository::{StorageError, StorageRepository};

/// 图表清理工作器
///
/// 定期删除超过保留时长的图表，并把图表总数限制在 `max_charts` 以内
pub struct ChartRetentionWorker {
    storage: Arc<dyn StorageRepository>,
    max_age: Duration,
    max_charts: usize,
    interval: Duration,
}

impl ChartRetentionWorker {
    pub fn new(storage: Arc<dyn StorageRepository>, settings: &StorageSettings) -> Self {
        Self {
            storage,
            max_age: Duration::from_secs(settings.retention_secs),
            max_charts: settings.max_charts,
            interval: Duration::from_secs(settings.sweep_interval_secs.max(1)),
        }
    }

    /// 运行工作器
    pub async fn run(&self) {
        info!(
            "Chart retention worker started (max age {:?}, max {} charts)",
            self.max_age, self.max_charts
        );

        let mut interval = tokio::time::interval(self.interval);

        loop {
            interval.tick().await;

            match self.sweep_at(Utc::now()).await {
                Ok(count) => {
                    if count > 0 {
                        info!("Removed {} expired charts", count);
                    }
                }
                Err(e) => {
                    error!("Failed to sweep charts: {}", e);
                }
            }
        }
    }

    /// 启动后台运行
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    /// 以 `now` 为当前时间执行一次清理，返回删除的文件数
    pub async fn sweep_at(&self, now: DateTime<Utc>) -> Result<usize, StorageError> {
        let mut objects = self.storage.list(CHART_KEY_PREFIX).await?;
        // Oldest first
        objects.sort_by(|a, b| a.modified.cmp(&b.modified).then_with(|| a.key.cmp(&b.key)));
        let excess = objects.len().saturating_sub(self.max_charts);

        let mut removed = 0;
        for (index, object) in objects.iter().enumerate() {
            let age = (now - object.modified).to_std().unwrap_or_default();
            if index >= excess && age <= self.max_age {
                continue;
            }
            match self.storage.delete(&object.key).await {
                Ok(()) => removed += 1,
                Err(e) => warn!("Failed to delete chart {}: {}", object.key, e),
            }
        }

        if removed > 0 {
            counter!("charts_expired_total").increment(removed as u64);
        }
        Ok(removed)
    }
}

#[cfg(test)]
#[path = "chart_retention_worker_test.rs"]
mod tests;
