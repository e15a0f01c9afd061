// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含服务器、Bluesky API、存储、图表和指标等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// Bluesky API 配置
    pub bluesky: BlueskySettings,
    /// 存储配置
    pub storage: StorageSettings,
    /// 图表配置
    pub chart: ChartSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// Bluesky API 配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct BlueskySettings {
    /// XRPC 根地址
    pub api_url: String,
    /// 登录标识（handle 或邮箱）
    pub identifier: Option<String>,
    /// 应用专用密码
    pub password: Option<String>,
    /// 单次请求超时时间（秒）
    pub timeout_secs: u64,
    /// 每页条目数 (1-100)
    pub page_limit: u32,
    /// 单个列表最多读取的页数
    pub max_pages: u32,
    /// 每秒最多发出的请求数
    pub requests_per_second: u32,
    /// 瞬时错误的最大重试次数
    pub max_retries: u32,
    /// 初始退避时间（毫秒）
    pub retry_backoff_ms: u64,
}

/// 存储配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// 图表文件的本地目录，同时作为 /static 对外提供
    pub local_path: String,
    /// 图表对外访问的 URL 前缀
    pub public_prefix: String,
    /// 图表保留时长（秒），超时后由后台清理
    pub retention_secs: u64,
    /// 最多保留的图表文件数，超出时先删除最旧的
    pub max_charts: usize,
    /// 清理间隔（秒）
    pub sweep_interval_secs: u64,
}

/// 图表配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ChartSettings {
    /// 单个面板宽度（像素）
    pub width: u32,
    /// 单个面板高度（像素）
    pub height: u32,
    /// 点赞柱状颜色
    pub likes_color: String,
    /// 转发柱状颜色
    pub reposts_color: String,
    /// 标题颜色
    pub title_color: String,
}

/// 指标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出
    pub enabled: bool,
    /// 导出器监听地址
    pub listen_addr: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、配置文件和环境变量，
    /// `BLUESKY_USERNAME` / `BLUESKY_APP_PASSWORD` 最后覆盖登录凭据
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Self::with_defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("SKYGRAPH").separator("__"))
            .set_override_option("bluesky.identifier", std::env::var("BLUESKY_USERNAME").ok())?
            .set_override_option("bluesky.password", std::env::var("BLUESKY_APP_PASSWORD").ok())?;

        builder.build()?.try_deserialize()
    }

    /// 仅使用内置默认值构建配置
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::with_defaults(Config::builder())?
            .build()?
            .try_deserialize()
    }

    fn with_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            // Default server settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            // Default Bluesky settings
            .set_default("bluesky.api_url", "https://bsky.social/xrpc")?
            .set_default("bluesky.timeout_secs", 30)?
            .set_default("bluesky.page_limit", 100)?
            .set_default("bluesky.max_pages", 10)?
            .set_default("bluesky.requests_per_second", 10)?
            .set_default("bluesky.max_retries", 3)?
            .set_default("bluesky.retry_backoff_ms", 500)?
            // Default Storage settings
            .set_default("storage.local_path", "./static")?
            .set_default("storage.public_prefix", "/static")?
            .set_default("storage.retention_secs", 3600)?
            .set_default("storage.max_charts", 1000)?
            .set_default("storage.sweep_interval_secs", 300)?
            // Default Chart settings
            .set_default("chart.width", 1000)?
            .set_default("chart.height", 600)?
            .set_default("chart.likes_color", "#ff69b4")?
            .set_default("chart.reposts_color", "#ff85c0")?
            .set_default("chart.title_color", "#ff69b4")?
            // Default Metrics settings
            .set_default("metrics.enabled", false)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")
    }

    /// 服务器监听地址
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
