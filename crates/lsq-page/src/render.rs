//! Frontmatter rendering for transformed pages.
//!
//! Output format:
//!
//! ```text
//! ---
//! date: 2024-01-01
//! title: "Hello World"
//! ---
//! <body>
//! ```
//!
//! Values are double-quoted unless their attribute name is in the caller's
//! unquoted list.

use std::fmt::Write as _;

use crate::page::Page;

/// Error type for frontmatter rendering.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Attribute value could not be quoted.
    #[error("Failed to quote attribute {name}: {source}")]
    Quote {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to format frontmatter: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Render a page as frontmatter followed by its body.
///
/// Attributes are written in key order.
pub fn render_page(page: &Page, unquoted: &[String]) -> Result<String, RenderError> {
    let mut output = String::with_capacity(page.text().len() + 64);
    output.push_str("---\n");
    for (name, value) in page.attributes() {
        if unquoted.iter().any(|u| u == name) {
            writeln!(output, "{name}: {value}")?;
        } else {
            let quoted = serde_json::to_string(value).map_err(|source| RenderError::Quote {
                name: name.clone(),
                source,
            })?;
            writeln!(output, "{name}: {quoted}")?;
        }
    }
    output.push_str("---\n");
    output.push_str(page.text());
    Ok(output)
}

/// Split a comma-separated list of attribute names.
///
/// Whitespace around names is trimmed and empty entries are dropped.
#[must_use]
pub fn parse_unquoted_properties(param: &str) -> Vec<String> {
    param
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}
