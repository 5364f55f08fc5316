//! Outline page model and property parsing.
//!
//! Source pages start with a block of `key:: value` property lines followed
//! by a body of nested, tab-indented bullet points:
//!
//! ```text
//! title:: Hello World
//! slug:: hello
//! public:: true
//!
//! - First block
//!     - Nested block
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

static PROPERTY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_-]+):: ?(.*)$").unwrap());

/// Page attributes keyed by property name.
pub type Attributes = BTreeMap<String, String>;

/// A single outline page and the state derived from it by the pipeline.
///
/// `source_name` and `attributes` are fixed at construction. `filename`,
/// `text` and `assets` are filled in by [`transform_page`](crate::transform_page).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Page {
    source_name: String,
    attributes: Attributes,
    text: String,
    assets: Vec<String>,
    filename: Option<PathBuf>,
}

impl Page {
    /// Create a page from already separated attributes and body.
    #[must_use]
    pub fn new(
        source_name: impl Into<String>,
        attributes: Attributes,
        text: impl Into<String>,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            attributes,
            text: text.into(),
            assets: Vec::new(),
            filename: None,
        }
    }

    /// Parse raw page content into attributes and body.
    ///
    /// Leading `key:: value` lines become attributes. The body starts at the
    /// first line that is not a property line and is kept verbatim.
    #[must_use]
    pub fn parse(source_name: impl Into<String>, content: &str) -> Self {
        let mut attributes = Attributes::new();
        let mut body_start = 0;

        for line in content.split_inclusive('\n') {
            let trimmed = line.trim_end_matches(['\n', '\r']);
            let Some(caps) = PROPERTY_PATTERN.captures(trimmed) else {
                break;
            };
            attributes.insert(caps[1].to_owned(), caps[2].trim_end().to_owned());
            body_start += line.len();
        }

        Self::new(source_name, attributes, &content[body_start..])
    }

    /// Original file name, without directory.
    #[must_use]
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Look up a single attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Current body text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Relative asset URLs found by the asset extractor, in order of appearance.
    #[must_use]
    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    /// Output path relative to the destination root, once derived.
    #[must_use]
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Whether the page carries `public:: true`.
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.attribute("public")
            .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
    }

    pub(crate) fn with_filename(mut self, filename: PathBuf) -> Self {
        self.filename = Some(filename);
        self
    }

    pub(crate) fn map_text(mut self, rewrite: impl FnOnce(&str) -> String) -> Self {
        self.text = rewrite(&self.text);
        self
    }

    pub(crate) fn with_text_and_assets(mut self, text: String, assets: Vec<String>) -> Self {
        self.text = text;
        self.assets = assets;
        self
    }
}
