//! # SEO Markup
//!
//! Prompt construction and parsing for the SEO optimizer flow. The network
//! call lives in the storefront app; this module only deals with text.
//!
//! ## Flow
//! ```text
//! SeoRequest ──build_prompt()──► text service ──► raw reply
//!                                                   │
//!                          parse_generated(reply) ◄─┘
//!                            │ ok                │ MalformedContent
//!                            ▼                   ▼
//!                        SeoMarkup        SeoMarkup::fallback(keyword)
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// Page content and target keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SeoRequest {
    pub website_content: String,
    pub keyword: String,
}

/// Markup ready to be inserted into a page head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SeoMarkup {
    pub meta_tags: String,
    pub schema_markup: String,
}

/// Individual tags pulled out of generated markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaTags {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
}

const STORE_NAME: &str = "Empório";

/// Prompt sent to the text service.
pub fn build_prompt(request: &SeoRequest) -> String {
    format!(
        "You are an SEO expert. You will receive the HTML content of a website and a primary \
keyword. Optimize the meta tags and schema markup for the website to improve its search \
engine ranking.

Website Content:
{content}

Primary Keyword:
{keyword}

Instructions:
1. Analyze the website content and identify relevant information.
2. Generate optimized meta tags, including title, description, and keywords.
3. Generate schema markup (JSON-LD in a <script type=\"application/ld+json\"> block).
4. Answer with a JSON object with the string fields \"metaTags\" and \"schemaMarkup\".",
        content = request.website_content,
        keyword = request.keyword,
    )
}

/// Interprets a reply from the text service.
///
/// Accepts either the requested JSON object (optionally inside a code fence)
/// or bare HTML, from which title, description, keywords and the JSON-LD
/// block are extracted. Fails when no title or description can be found.
pub fn parse_generated(reply: &str) -> CoreResult<SeoMarkup> {
    let body = strip_code_fence(reply);

    if let Ok(markup) = serde_json::from_str::<SeoMarkup>(body) {
        if !extract_meta_tags(&markup.meta_tags).is_empty() {
            return Ok(markup);
        }
    }

    let tags = extract_meta_tags(body);
    if tags.is_empty() {
        return Err(CoreError::MalformedContent {
            reason: "no title or description found".to_string(),
        });
    }

    let schema_markup = extract_json_ld(body)
        .map(|json| format!("<script type=\"application/ld+json\">\n{}\n</script>", json))
        .unwrap_or_else(|| default_schema_markup(tags.title.as_deref().unwrap_or(STORE_NAME)));

    Ok(SeoMarkup {
        meta_tags: tags.render(),
        schema_markup,
    })
}

impl SeoMarkup {
    /// Markup used when the text service is unavailable or unusable.
    pub fn fallback(keyword: &str) -> Self {
        let keyword = keyword.trim();
        let title = if keyword.is_empty() {
            format!("{} | Produtos naturais", STORE_NAME)
        } else {
            format!("{} | {}", keyword, STORE_NAME)
        };
        let tags = MetaTags {
            description: Some(format!(
                "{}: castanhas, frutas secas e produtos naturais a granel.",
                title
            )),
            keywords: Some(if keyword.is_empty() {
                "produtos naturais, granel, castanhas".to_string()
            } else {
                format!("{}, produtos naturais, granel", keyword)
            }),
            title: Some(title),
        };

        SeoMarkup {
            meta_tags: tags.render(),
            schema_markup: default_schema_markup(STORE_NAME),
        }
    }

    /// Structured view of [`SeoMarkup::meta_tags`].
    pub fn tags(&self) -> MetaTags {
        extract_meta_tags(&self.meta_tags)
    }
}

impl MetaTags {
    /// No title and no description.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }

    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        if let Some(title) = &self.title {
            lines.push(format!("<title>{}</title>", escape_html(title)));
        }
        if let Some(description) = &self.description {
            lines.push(format!(
                "<meta name=\"description\" content=\"{}\">",
                escape_html(description)
            ));
        }
        if let Some(keywords) = &self.keywords {
            lines.push(format!(
                "<meta name=\"keywords\" content=\"{}\">",
                escape_html(keywords)
            ));
        }
        lines.join("\n")
    }
}

// =============================================================================
// Extraction
// =============================================================================

fn title_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid regex"))
}

fn meta_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?is)<meta\s+name\s*=\s*["']([a-z]+)["']\s+content\s*=\s*["'](.*?)["']\s*/?>"#)
            .expect("valid regex")
    })
}

fn json_ld_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?is)<script[^>]*type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#)
            .expect("valid regex")
    })
}

/// Pulls title, description and keywords out of HTML.
pub fn extract_meta_tags(html: &str) -> MetaTags {
    let mut tags = MetaTags {
        title: title_re()
            .captures(html)
            .map(|c| c[1].trim().to_string())
            .filter(|t| !t.is_empty()),
        ..Default::default()
    };

    for caps in meta_re().captures_iter(html) {
        let value = caps[2].trim().to_string();
        if value.is_empty() {
            continue;
        }
        match caps[1].to_ascii_lowercase().as_str() {
            "description" if tags.description.is_none() => tags.description = Some(value),
            "keywords" if tags.keywords.is_none() => tags.keywords = Some(value),
            _ => {}
        }
    }

    tags
}

/// Body of the first JSON-LD script block, if it parses as JSON.
pub fn extract_json_ld(html: &str) -> Option<String> {
    let raw = json_ld_re().captures(html)?.get(1)?.as_str().trim();
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    serde_json::to_string_pretty(&value).ok()
}

fn default_schema_markup(name: &str) -> String {
    let json = serde_json::json!({
        "@context": "https://schema.org",
        "@type": "Store",
        "name": name,
    });
    format!(
        "<script type=\"application/ld+json\">\n{}\n</script>",
        serde_json::to_string_pretty(&json).unwrap_or_default()
    )
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip the language tag line.
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// =============================================================================
// Unit Tests
// =============================================================================
