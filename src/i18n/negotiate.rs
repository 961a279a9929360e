//! Picks the UI language of a request from its `Accept-Language` header.

use axum::http::{header::ACCEPT_LANGUAGE, HeaderMap};

use crate::metadata::entity::primary_subtag;

/// Best configured language for `headers`, or `fallback`.
///
/// Entries are ranked by their `q` weight (default 1, `q=0` excluded); ties
/// keep header order. A range matches a supported language exactly or by
/// primary subtag. `*` selects the fallback.
pub fn negotiate_language(headers: &HeaderMap, supported: &[String], fallback: &str) -> String {
    headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| best_match(value, supported))
        .unwrap_or_else(|| fallback.to_string())
}

fn best_match(header: &str, supported: &[String]) -> Option<String> {
    let mut ranges: Vec<(&str, f32)> = header
        .split(',')
        .filter_map(|part| {
            let mut pieces = part.split(';').map(str::trim);
            let tag = pieces.next().filter(|t| !t.is_empty())?;
            let quality = pieces
                .find_map(|p| p.strip_prefix("q="))
                .and_then(|q| q.parse::<f32>().ok())
                .unwrap_or(1.0);
            (quality > 0.0).then_some((tag, quality))
        })
        .collect();

    // stable sort keeps header order for equal weights
    ranges.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    for (tag, _) in ranges {
        if tag == "*" {
            return None;
        }
        if let Some(lang) = supported.iter().find(|s| s.eq_ignore_ascii_case(tag)) {
            return Some(lang.clone());
        }
        let primary = primary_subtag(tag);
        if let Some(lang) = supported
            .iter()
            .find(|s| primary_subtag(s).eq_ignore_ascii_case(primary))
        {
            return Some(lang.clone());
        }
    }
    None
}
