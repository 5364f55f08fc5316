//! Relative image link extraction.
//!
//! Finds markdown images whose URL is explicitly relative (`./` or `../`),
//! records the original URLs on the page, and points the links at a shared
//! image prefix: `![alt](../assets/image.png)` becomes
//! `![alt](/images/image.png)` for prefix `/images`.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::page::Page;

static RELATIVE_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[.*?\]\((\.\.?/.+?)\)").unwrap());

/// Rewrites relative image links to live under a common prefix.
#[derive(Clone, Debug)]
pub struct AssetExtractor {
    prefix: String,
}

impl AssetExtractor {
    /// Create an extractor joining asset file names under `prefix`.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Extract relative image links from the page body.
    ///
    /// Every match is recorded in order, duplicates included. Only the URL
    /// inside each matched image is replaced.
    #[must_use]
    pub fn apply(&self, page: Page) -> Page {
        let mut assets = Vec::new();
        let text = RELATIVE_IMAGE
            .replace_all(page.text(), |caps: &Captures<'_>| {
                let whole = caps.get(0).map_or("", |m| m.as_str());
                let Some(url) = caps.get(1) else {
                    return whole.to_owned();
                };
                assets.push(url.as_str().to_owned());

                let start = caps.get(0).map_or(0, |m| m.start());
                let url_start = url.start() - start;
                let url_end = url.end() - start;
                format!(
                    "{}{}{}",
                    &whole[..url_start],
                    self.rewrite_url(url.as_str()),
                    &whole[url_end..]
                )
            })
            .into_owned();

        if !assets.is_empty() {
            tracing::debug!(
                page = page.source_name(),
                count = assets.len(),
                "Extracted relative assets"
            );
        }
        page.with_text_and_assets(text, assets)
    }

    /// Join the URL's file name under the prefix.
    ///
    /// A URL ending in `/` has an empty file name and maps to the prefix.
    fn rewrite_url(&self, url: &str) -> String {
        let name = url.rsplit('/').next().unwrap_or(url);
        let prefix = self.prefix.trim_end_matches('/');
        let root = if self.prefix.starts_with('/') { "/" } else { "" };
        match (prefix.is_empty(), name.is_empty()) {
            (true, true) => root.to_owned(),
            (true, false) => format!("{root}{name}"),
            (false, true) => prefix.to_owned(),
            (false, false) => format!("{prefix}/{name}"),
        }
    }
}

/// Build an asset extraction step for `prefix`.
pub fn extract_assets(prefix: &str) -> impl Fn(Page) -> Page + use<> {
    let extractor = AssetExtractor::new(prefix);
    move |page| extractor.apply(page)
}
