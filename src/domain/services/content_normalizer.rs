// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 内容规范化
//!
//! 将抓取到的原始文本转换为规范的 slug、摘要与 HTML 正文。
//! 全部为纯函数，不做任何 I/O。

use once_cell::sync::Lazy;
use regex::Regex;

/// slug 最大长度
pub const MAX_SLUG_LEN: usize = 100;

/// 默认摘要长度（可见字符）
pub const DEFAULT_EXCERPT_LEN: usize = 220;

/// 摘要结尾标记
pub const ELLIPSIS: char = '…';

/// 截断点早于该位置时不再回退到空格，避免摘要过短
const MIN_WORD_CUT: usize = 100;

static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]+>").expect("Failed to compile tag regex"));

static BLOCK_MARKUP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<(p|div|ul|ol|blockquote|h[1-6]|figure|table|pre|section|article)[\s>/]")
        .expect("Failed to compile block markup regex")
});

static BLANK_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("Failed to compile blank line regex"));

/// 由标题生成 slug
///
/// 小写化，去掉 `[a-z0-9\s-]` 以外的字符，空白与连字符折叠为单个 `-`，
/// 去掉首尾连字符并截断到 100 字符。
///
/// # 示例
///
/// ```
/// use newsfront::domain::services::content_normalizer::slugify;
///
/// assert_eq!(
///     slugify("Ghana's Vice President Visits Kumasi!"),
///     "ghanas-vice-president-visits-kumasi"
/// );
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len().min(MAX_SLUG_LEN));
    let mut pending_hyphen = false;

    for c in title.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
            if slug.len() >= MAX_SLUG_LEN {
                break;
            }
        } else if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        }
        // Anything else is dropped without acting as a separator
    }

    // ASCII only from here, byte length == char length
    slug.truncate(MAX_SLUG_LEN);
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// 去掉标签并折叠空白
pub fn strip_tags(content: &str) -> String {
    let without_tags = TAG_RE.replace_all(content, " ");
    without_tags.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 解码 HTML 实体后去标签，用于标题等纯文本字段
pub fn plain_text(raw: &str) -> String {
    strip_tags(&html_escape::decode_html_entities(raw))
}

/// 生成摘要
///
/// 长度不超过 `max_len` 时原样返回去标签后的文本；否则在 `max_len`
/// 处截断，若前一个空格位于第 100 个字符之后则回退到该空格，最后追加 `…`。
pub fn excerpt(content: &str, max_len: usize) -> String {
    let clean = strip_tags(content);
    if clean.chars().count() <= max_len {
        return clean;
    }

    let cut = clean
        .char_indices()
        .nth(max_len)
        .map(|(idx, _)| idx)
        .unwrap_or(clean.len());
    let truncated = &clean[..cut];

    let body = match truncated.rfind(' ') {
        Some(space) if truncated[..space].chars().count() > MIN_WORD_CUT => &truncated[..space],
        _ => truncated,
    };

    let mut out = String::with_capacity(body.len() + ELLIPSIS.len_utf8());
    out.push_str(body);
    out.push(ELLIPSIS);
    out
}

/// 是否已包含块级标记
pub fn has_block_markup(raw: &str) -> bool {
    BLOCK_MARKUP_RE.is_match(raw)
}

/// 将原始正文整理为可展示的 HTML
///
/// 已含块级标记时原样返回；否则按空行切段，丢弃空段，每段包一层 `<p>`。
/// 输出满足第一个分支，因此该函数幂等。
pub fn to_display_content(raw: &str) -> String {
    if has_block_markup(raw) {
        return raw.to_string();
    }

    let normalized = raw.replace("\r\n", "\n");
    BLANK_LINE_RE
        .split(&normalized)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("<p>{}</p>", p))
        .collect::<Vec<_>>()
        .join("\n")
}
