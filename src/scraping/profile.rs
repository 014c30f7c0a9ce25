//! Static per-source profiles
//!
//! Everything that differs between sources (endpoints, request fingerprint,
//! block markers, extraction hints) lives in one table keyed by [`Source`].

use url::Url;

use crate::config::SourceConfig;
use crate::types::{Query, Source};

/// Static description of how to talk to and parse one source
#[derive(Debug)]
pub struct SourceProfile {
    pub source: Source,
    /// Landing page used for the cookie warm-up
    pub root_url: &'static str,
    /// Search endpoint without query string
    pub search_url: &'static str,
    /// Header set applied to every request (User-Agent and Referer are added separately)
    pub headers: &'static [(&'static str, &'static str)],
    /// User-agent pool, one picked per fetch
    pub user_agents: &'static [&'static str],
    /// Cookies seeded into every fresh session
    pub seed_cookies: &'static [(&'static str, &'static str)],
    /// Substrings indicating an anti-bot challenge page
    pub block_markers: &'static [&'static str],
    /// Substrings indicating a genuine results page
    pub result_markers: &'static [&'static str],
    /// Result-card selectors for the semantic strategy
    pub result_selectors: &'static [&'static str],
    /// Class substrings marking a title element
    pub title_hints: &'static [&'static str],
    /// Class substrings marking a description element
    pub summary_hints: &'static [&'static str],
    /// Class substrings marking an author element
    pub author_hints: &'static [&'static str],
    /// Class substrings marking engagement statistics
    pub stats_hints: &'static [&'static str],
    /// Class substrings marking the sub-origin shown for a result
    pub origin_hints: &'static [&'static str],
    /// Whether an href looks like a result link for this source
    pub is_content_url: fn(&str) -> bool,
    /// Query-string parameters for a search request
    pub search_params: fn(&Query) -> Vec<(&'static str, String)>,
}

const BROWSER_HEADERS_ZH: &[(&str, &str)] = &[
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8",
    ),
    ("Accept-Language", "zh-CN,zh;q=0.9"),
    ("Upgrade-Insecure-Requests", "1"),
];

static BAIDU: SourceProfile = SourceProfile {
    source: Source::Baidu,
    root_url: "https://www.baidu.com/",
    search_url: "https://www.baidu.com/s",
    headers: BROWSER_HEADERS_ZH,
    user_agents: &[
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/90.0.4430.212 Safari/537.36",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Firefox/88.0",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Edge/91.0.864.59",
    ],
    seed_cookies: &[
        ("BDORZ", "FFFB88E999055A3F8A630C64834BD6D0"),
        ("BAIDUID", "154B547D9085A05D2B4F5500D935A2EF:FG=1"),
    ],
    block_markers: &["百度安全验证", "请输入验证码"],
    result_markers: &["百度为您找到相关结果约"],
    result_selectors: &[".result", ".c-container", ".result-op"],
    title_hints: &["title", "name"],
    summary_hints: &["abstract", "desc", "description", "intro"],
    author_hints: &[],
    stats_hints: &[],
    origin_hints: &["c-showurl"],
    is_content_url: baidu_content_url,
    search_params: baidu_params,
};

static BILIBILI: SourceProfile = SourceProfile {
    source: Source::Bilibili,
    root_url: "https://www.bilibili.com/",
    search_url: "https://search.bilibili.com/all",
    headers: &[
        (
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7",
        ),
        ("Accept-Language", "zh-CN,zh;q=0.9"),
        ("Cache-Control", "max-age=0"),
        ("Upgrade-Insecure-Requests", "1"),
        ("Sec-Ch-Ua", "\"Chromium\";v=\"9\", \"Not?A_Brand\";v=\"8\""),
        ("Sec-Ch-Ua-Mobile", "?0"),
        ("Sec-Ch-Ua-Platform", "\"Windows\""),
        ("Sec-Fetch-Dest", "document"),
        ("Sec-Fetch-Mode", "navigate"),
        ("Sec-Fetch-Site", "same-origin"),
        ("Sec-Fetch-User", "?1"),
    ],
    user_agents: &[
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 SLBrowser/9.0.6.8151 SLBChan/112 SLBVPV/64-bit",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Firefox/125.0",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Edge/124.0.0.0",
    ],
    seed_cookies: &[
        ("buvid3", "FF4EE0ED-1F47-2EC7-BF63-B3E542DB113E92248infoc"),
        ("b_nut", "1733567392"),
        ("_uuid", "F6699B25-3289-58A7-4447-4C1FB61023FCB93812infoc"),
        ("buvid_fp", "0aa080af2d42e7a04cc5e34d5ffb4615"),
        ("header_theme_version", "CLOSE"),
        ("enable_web_push", "DISABLE"),
        ("home_feed_column", "5"),
        ("browser_resolution", "1659-915"),
        ("CURRENT_FNVAL", "2000"),
    ],
    block_markers: &["验证码", "安全验证"],
    result_markers: &["search-list", "video-list"],
    result_selectors: &[
        ".video-list-item",
        ".video-card",
        ".search-item",
        ".list-item",
        "li[data-id]",
    ],
    title_hints: &["title", "name"],
    summary_hints: &["desc", "description", "intro"],
    author_hints: &["up", "author"],
    stats_hints: &["play", "view", "danmaku", "stat"],
    origin_hints: &[],
    is_content_url: bilibili_content_url,
    search_params: bilibili_params,
};

impl Source {
    /// Static profile for this source
    pub fn profile(self) -> &'static SourceProfile {
        match self {
            Source::Baidu => &BAIDU,
            Source::Bilibili => &BILIBILI,
        }
    }
}

fn baidu_content_url(href: &str) -> bool {
    href.len() > 20
        && !href.starts_with("javascript:")
        && (href.starts_with("/link?url=") || href.starts_with("http"))
}

fn bilibili_content_url(href: &str) -> bool {
    href.len() > 20 && (href.contains("/video/") || href.to_uppercase().contains("BV"))
}

fn baidu_params(query: &Query) -> Vec<(&'static str, String)> {
    vec![
        ("wd", query.keyword.clone()),
        ("pn", query.offset().to_string()),
        ("oq", query.keyword.clone()),
        ("ie", "utf-8".to_string()),
        ("rsv_idx", "2".to_string()),
    ]
}

fn bilibili_params(query: &Query) -> Vec<(&'static str, String)> {
    vec![
        ("keyword", query.keyword.clone()),
        ("pn", query.offset().to_string()),
        ("from_source", "webtop_search".to_string()),
        ("spm_id_from", "333.1007".to_string()),
        ("search_source", "3".to_string()),
    ]
}

/// Resolved endpoints for a source after applying config overrides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub root: Url,
    pub search: Url,
}

impl Endpoints {
    /// Built-in endpoints, replaced by any override in `config`
    pub fn resolve(profile: &SourceProfile, config: &SourceConfig) -> Result<Self, url::ParseError> {
        let root = Url::parse(config.root_url.as_deref().unwrap_or(profile.root_url))?;
        let search = Url::parse(config.search_url.as_deref().unwrap_or(profile.search_url))?;
        Ok(Self { root, search })
    }

    /// Full search URL for a query
    pub fn search_url(&self, profile: &SourceProfile, query: &Query) -> Url {
        let mut url = self.search.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in (profile.search_params)(query) {
                pairs.append_pair(key, &value);
            }
        }
        url
    }
}
