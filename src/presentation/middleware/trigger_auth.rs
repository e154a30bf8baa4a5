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

use crate::config::settings::TriggerSettings;
use crate::utils::errors::IngestError;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderName, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

/// 触发端点授权策略
///
/// 启动时根据 `trigger.mode` 选定，运行期间不变
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerAuth {
    /// 接受所有请求
    Open,
    /// 要求 `Authorization: Bearer <secret>`
    SharedSecret { secret: String },
    /// 接受携带调度器请求头的请求，配置了密钥时也接受 Bearer 密钥
    TrustedScheduler {
        header: HeaderName,
        value: String,
        secret: Option<String>,
    },
}

impl TriggerAuth {
    /// 从配置构建授权策略
    ///
    /// # 返回值
    ///
    /// * `Ok(TriggerAuth)` - 选定的策略
    /// * `Err(IngestError::Config)` - 模式未知、缺少密钥或请求头名称非法
    pub fn from_settings(settings: &TriggerSettings) -> Result<Self, IngestError> {
        let secret = settings
            .secret
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        match settings.mode.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(TriggerAuth::Open),
            "shared_secret" => {
                let secret = secret.ok_or_else(|| {
                    IngestError::Config(
                        "trigger.secret is required when trigger.mode = shared_secret".to_string(),
                    )
                })?;
                Ok(TriggerAuth::SharedSecret { secret })
            }
            "trusted_scheduler" => {
                let header = HeaderName::from_bytes(settings.scheduler_header.as_bytes())
                    .map_err(|e| {
                        IngestError::Config(format!(
                            "invalid trigger.scheduler_header '{}': {}",
                            settings.scheduler_header, e
                        ))
                    })?;
                Ok(TriggerAuth::TrustedScheduler {
                    header,
                    value: settings.scheduler_value.clone(),
                    secret,
                })
            }
            other => Err(IngestError::Config(format!(
                "unknown trigger.mode '{}' (expected open, shared_secret or trusted_scheduler)",
                other
            ))),
        }
    }

    /// 判断请求是否被允许
    pub fn authorize(&self, headers: &HeaderMap) -> bool {
        match self {
            TriggerAuth::Open => true,
            TriggerAuth::SharedSecret { secret } => bearer_matches(headers, secret),
            TriggerAuth::TrustedScheduler {
                header,
                value,
                secret,
            } => {
                let from_scheduler = headers
                    .get(header)
                    .and_then(|v| v.to_str().ok())
                    .is_some_and(|v| v == value);
                from_scheduler || secret.as_deref().is_some_and(|s| bearer_matches(headers, s))
            }
        }
    }
}

fn bearer_matches(headers: &HeaderMap, secret: &str) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .is_some_and(|token| token.trim() == secret)
}

/// 触发端点授权中间件
///
/// 拒绝时返回 401 `{"error":"Unauthorized"}`
pub async fn trigger_auth_middleware(
    State(auth): State<Arc<TriggerAuth>>,
    req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    if auth.authorize(req.headers()) {
        debug!("Trigger authorized for path: {}", path);
        return next.run(req).await;
    }

    warn!("Rejected unauthorized trigger call to {}", path);
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Unauthorized" })),
    )
        .into_response()
}

#[cfg(test)]
#[path = "trigger_auth_test.rs"]
mod tests;
