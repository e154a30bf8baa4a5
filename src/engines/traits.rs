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

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 非 2xx 响应
    #[error("HTTP status {0}")]
    HttpStatus(u16),
    /// 超时
    #[error("Timeout")]
    Timeout,
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

impl EngineError {
    /// 将 reqwest 错误归类，超时单独区分
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            EngineError::Timeout
        } else {
            EngineError::RequestFailed(err)
        }
    }
}

/// 抓取请求
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// 目标URL
    pub url: String,
    /// 附加请求头
    pub headers: HashMap<String, String>,
    /// 超时时间
    pub timeout: Duration,
}

impl FetchRequest {
    pub fn get(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            timeout,
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }
}

/// 抓取响应
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// HTTP状态码
    pub status_code: u16,
    /// 响应内容
    pub content: String,
    /// 内容类型
    pub content_type: String,
    /// 跟随重定向后的最终地址
    pub final_url: String,
    /// 响应时间（毫秒）
    pub response_time_ms: u64,
}

/// 抓取引擎特质
///
/// RSS 抓取器与网页抓取器共用的 HTTP GET 能力。
/// 实现必须把非 2xx 响应视为错误，且不做隐式重试。
#[async_trait]
pub trait FetchEngine: Send + Sync {
    /// 执行抓取
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, EngineError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}
