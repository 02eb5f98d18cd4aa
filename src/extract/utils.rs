use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static STAR_CLASS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^star_(\d{1,2})$").expect("valid regex"));

/// Highest encoded rating (`star_50` → 5.0).
const MAX_STARS: u32 = 50;

/// Trim the ends only; interior spacing and line breaks are kept verbatim.
pub(crate) fn clean_text(raw: &str) -> String {
    raw.trim().to_string()
}

/// Decode a `star_<NN>` class token (`star_45` → `"4.5"`).
///
/// Any other input, including values above 5.0, decodes to `"0"`.
pub fn decode_rating(class_attr: &str) -> String {
    class_attr
        .split_whitespace()
        .find_map(|token| STAR_CLASS_REGEX.captures(token))
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .filter(|n| *n <= MAX_STARS)
        .map(|n| format!("{:.1}", f64::from(n) / 10.0))
        .unwrap_or_else(|| "0".to_string())
}

/// Segment after the `shop` path segment of a detail link, or empty.
pub fn parse_shop_id(href: &str) -> String {
    let path = href.split(['?', '#']).next().unwrap_or_default();
    let parts: Vec<&str> = path.split('/').collect();
    parts
        .iter()
        .position(|p| *p == "shop")
        .and_then(|idx| parts.get(idx + 1))
        .map(|id| id.to_string())
        .unwrap_or_default()
}

/// Resolve a possibly relative link against the site root.
pub(crate) fn absolutize(href: &str, base: &str) -> String {
    if href.is_empty() {
        return String::new();
    }
    Url::parse(base)
        .and_then(|b| b.join(href))
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}
