//! `hreflang` alternate links for search engines.
//!
//! A page at `url` advertises itself as the `x-default` variant and each
//! available content language at `{url}/{code}`, which is also the route
//! shape the server accepts for an explicit translation.

use askama::Template;
use cineshelf_common::Result;

use crate::views::render_template;

/// One `<link rel="alternate">` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternateLink {
    pub hreflang: String,
    pub href: String,
}

/// `x-default` first, then one link per code in input order.
pub fn hreflang_links<S: AsRef<str>>(url: &str, codes: &[S]) -> Vec<AlternateLink> {
    std::iter::once(AlternateLink {
        hreflang: "x-default".to_string(),
        href: url.to_string(),
    })
    .chain(codes.iter().map(|code| AlternateLink {
        hreflang: code.as_ref().to_string(),
        href: format!("{url}/{}", code.as_ref()),
    }))
    .collect()
}

#[derive(Template)]
#[template(path = "hreflang.html")]
struct HreflangTemplate<'a> {
    links: Vec<AlternateLink>,
    extra: &'a str,
}

/// Head markup for [`hreflang_links`], one element per line, followed by
/// `extra` unchanged. Attribute values are HTML-escaped.
pub fn render_hreflang_tags<S: AsRef<str>>(url: &str, codes: &[S], extra: &str) -> Result<String> {
    render_template(&HreflangTemplate {
        links: hreflang_links(url, codes),
        extra,
    })
}
