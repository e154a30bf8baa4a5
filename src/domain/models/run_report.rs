// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Serialize, Serializer};

use super::source::SourceKind;
use crate::utils::errors::IngestError;

/// 单个来源的失败记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceErrorEntry {
    /// 来源显示名称
    pub source: String,
    pub error: String,
}

/// 单个来源的处理摘要
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRunSummary {
    pub source: String,
    /// 抓取到并尝试处理的条目数
    pub items_considered: usize,
    /// 实际新插入的文章数
    pub items_inserted: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 一次子管线运行的报告
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub kind: SourceKind,
    pub sources_processed: usize,
    pub articles_inserted: usize,
    pub per_source_errors: Vec<SourceErrorEntry>,
    pub sources: Vec<SourceRunSummary>,
}

impl RunReport {
    pub fn empty(kind: SourceKind) -> Self {
        Self {
            kind,
            sources_processed: 0,
            articles_inserted: 0,
            per_source_errors: Vec::new(),
            sources: Vec::new(),
        }
    }

    /// 合并一个来源的处理结果
    pub fn absorb(&mut self, outcome: SourceOutcome) {
        self.sources_processed += 1;
        self.articles_inserted += outcome.summary.items_inserted;
        self.per_source_errors.extend(outcome.errors);
        self.sources.push(outcome.summary);
    }
}

/// 协调器处理单个来源后的产出
#[derive(Debug, Clone, Default)]
pub struct SourceOutcome {
    pub summary: SourceRunSummary,
    /// 来源级错误以及单条候选的存储错误
    pub errors: Vec<SourceErrorEntry>,
}

impl SourceOutcome {
    pub fn new(source: &str) -> Self {
        Self {
            summary: SourceRunSummary {
                source: source.to_string(),
                ..Default::default()
            },
            errors: Vec::new(),
        }
    }

    pub fn record_error(&mut self, error: impl ToString) {
        let error = error.to_string();
        if self.summary.error.is_none() {
            self.summary.error = Some(error.clone());
        }
        self.errors.push(SourceErrorEntry {
            source: self.summary.source.clone(),
            error,
        });
    }
}

/// `run_all` 的结果：两个子管线各自成功或失败，互不影响
#[derive(Debug, Serialize)]
pub struct IngestionSummary {
    #[serde(serialize_with = "serialize_outcome")]
    pub rss: Result<RunReport, IngestError>,
    #[serde(serialize_with = "serialize_outcome")]
    pub scrape: Result<RunReport, IngestError>,
}

impl IngestionSummary {
    pub fn articles_inserted(&self) -> usize {
        [&self.rss, &self.scrape]
            .into_iter()
            .filter_map(|r| r.as_ref().ok())
            .map(|r| r.articles_inserted)
            .sum()
    }
}

fn serialize_outcome<S>(
    outcome: &Result<RunReport, IngestError>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    #[derive(Serialize)]
    struct Failed {
        error: String,
    }

    match outcome {
        Ok(report) => report.serialize(serializer),
        Err(e) => Failed {
            error: e.to_string(),
        }
        .serialize(serializer),
    }
}
