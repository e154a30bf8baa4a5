// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 从来源提取出的候选文章，尚未规范化与去重
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// 纯文本标题，非空
    pub title: String,
    /// 原始正文（HTML 或纯文本），非空
    pub body: String,
    /// 原文链接
    pub link: Option<String>,
    /// 绝对地址的配图
    pub image_url: Option<String>,
    /// 由网页抓取器产生
    pub is_scraped: bool,
}

/// 单个来源一次读取的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceItems {
    /// 可入库的候选，保持来源中的顺序
    pub candidates: Vec<Candidate>,
    /// 因缺少标题或正文被丢弃的条目数
    pub discarded: usize,
}

impl SourceItems {
    /// 读取到的条目总数
    pub fn considered(&self) -> usize {
        self.candidates.len() + self.discarded
    }
}
