//! Platform detection and inline-player resolution for bookmarked URLs.
//!
//! Both functions are pure and total: any string goes in, and the worst case
//! is `Category::Other` / `None`.

use crate::core::Category;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static TIKTOK_VIDEO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)tiktok\.com/@.*?/video/(\d+)").unwrap());

/// Checked in order; the first hit wins.
const RULES: &[(Category, &[&str])] = &[
    (Category::YouTube, &["youtube.com", "youtu.be"]),
    (Category::TikTok, &["tiktok.com"]),
    (Category::Instagram, &["instagram.com"]),
    (Category::Twitter, &["twitter.com", "x.com"]),
    (Category::Vimeo, &["vimeo.com"]),
];

/// Hostname when the input parses as a URL with one, otherwise the raw input.
fn match_target(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => host.to_string(),
            None => url.to_string(),
        },
        Err(_) => url.to_string(),
    }
}

/// Text following the first ASCII-case-insensitive match of `needle`.
fn after_ignore_case<'a>(haystack: &'a str, needle: &str) -> Option<&'a str> {
    // ASCII lowercasing keeps byte offsets intact
    let start = haystack.to_ascii_lowercase().find(needle)?;
    Some(&haystack[start + needle.len()..])
}

pub fn classify(url: &str) -> Category {
    let target = match_target(url);
    RULES
        .iter()
        .find(|(_, needles)| needles.iter().any(|needle| target.contains(needle)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}

/// Embed URL for platforms that support inline playback.
pub fn resolve_embed(url: &str) -> Option<String> {
    match classify(url) {
        Category::YouTube => youtube_video_id(url)
            .map(|id| format!("https://www.youtube.com/embed/{}", id)),
        Category::TikTok => tiktok_video_id(url)
            .map(|id| format!("https://www.tiktok.com/embed/v2/{}", id)),
        Category::Vimeo => vimeo_segment(url)
            .map(|segment| format!("https://player.vimeo.com/video/{}", segment)),
        _ => None,
    }
}

/// The `v=` value, or the path segment after `youtu.be/`, cut at the first `&`.
pub fn youtube_video_id(url: &str) -> Option<&str> {
    let rest = match url.split_once("v=") {
        Some((_, rest)) => rest,
        None => {
            let rest = after_ignore_case(url, "youtu.be/")?;
            rest.split(&['?', '#', '/'][..]).next().unwrap_or_default()
        }
    };

    let id = rest.split(&['&', '#'][..]).next().unwrap_or_default();
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

pub fn tiktok_video_id(url: &str) -> Option<&str> {
    TIKTOK_VIDEO_RE
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

/// Everything after `vimeo.com/`, unvalidated.
pub fn vimeo_segment(url: &str) -> Option<&str> {
    let segment = after_ignore_case(url, "vimeo.com/")?;
    if segment.is_empty() {
        None
    } else {
        Some(segment)
    }
}
