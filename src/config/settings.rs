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
/// 包含数据库、服务器、采集管线、触发授权和指标导出等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 服务器配置
    pub server: ServerSettings,
    /// 采集管线配置
    pub ingest: IngestSettings,
    /// 触发端点授权配置
    pub trigger: TriggerSettings,
    /// 指标导出配置
    pub metrics: MetricsSettings,
}

/// 数据库配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 采集管线配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct IngestSettings {
    /// 单次抓取超时（秒）
    pub fetch_timeout_secs: u64,
    /// 单个子管线的运行上限（秒），0 表示不限制
    pub run_timeout_secs: u64,
    /// 每个子管线内并发处理的来源数
    pub max_concurrent_sources: usize,
    /// 每个来源最多处理的条目数
    pub max_items_per_source: usize,
    /// 摘要最大可见字符数
    pub excerpt_length: usize,
    /// 抓取时使用的 User-Agent
    pub user_agent: String,
    /// 入库文章的默认作者
    pub default_author: String,
    /// 内置调度间隔（秒），0 表示关闭，由外部调度器触发
    pub schedule_interval_secs: u64,
}

/// 触发端点授权配置
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerSettings {
    /// 授权模式：open / shared_secret / trusted_scheduler
    pub mode: String,
    /// Bearer 共享密钥
    pub secret: Option<String>,
    /// 受信调度器请求头名称
    pub scheduler_header: String,
    /// 受信调度器请求头取值
    pub scheduler_value: String,
}

/// 指标导出配置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启动 Prometheus 导出器
    pub enabled: bool,
    /// 导出器监听地址
    pub listen_addr: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加默认值、`config/default`、`config/{APP_ENVIRONMENT}` 与
    /// `NEWSFRONT__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败或缺少数据库连接信息
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Self::defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("NEWSFRONT").separator("__"));

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// 仅从默认值和给定的 TOML 文本构建配置
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let settings: Settings = Self::defaults(Config::builder())?
            .add_source(File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Default DB pool settings
            .set_default("database.url", "")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            // Default ingest settings
            .set_default("ingest.fetch_timeout_secs", 15)?
            .set_default("ingest.run_timeout_secs", 55)?
            .set_default("ingest.max_concurrent_sources", 4)?
            .set_default("ingest.max_items_per_source", 20)?
            .set_default("ingest.excerpt_length", 220)?
            .set_default(
                "ingest.user_agent",
                "Mozilla/5.0 (compatible; newsfront/1.0; +https://newsfront.dev)",
            )?
            .set_default("ingest.default_author", "Staff")?
            .set_default("ingest.schedule_interval_secs", 0)?
            // Default trigger settings
            .set_default("trigger.mode", "open")?
            .set_default("trigger.scheduler_header", "x-vercel-cron")?
            .set_default("trigger.scheduler_value", "1")?
            // Default metrics settings
            .set_default("metrics.enabled", false)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Message(
                "database.url is required (set NEWSFRONT__DATABASE__URL)".to_string(),
            ));
        }
        if self.ingest.max_concurrent_sources == 0 {
            return Err(ConfigError::Message(
                "ingest.max_concurrent_sources must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
