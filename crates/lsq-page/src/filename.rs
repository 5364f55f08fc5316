//! Output path derivation from page attributes.
//!
//! - No `slug`: the source file name with spaces replaced by `-`
//! - `slug`: `[<date>-]<slug>.md`, placed under the `folder` attribute
//!
//! The `folder` attribute always uses `/` as a separator. It is split into
//! path components so the result uses the platform separator. Root, `.` and
//! `..` components are dropped, so the result is always relative.

use std::path::{Component, Path, PathBuf};

use crate::page::Attributes;

/// Replace every space with a hyphen.
#[must_use]
pub fn sanitize_name(name: &str) -> String {
    name.replace(' ', "-")
}

/// Compute the page's output path relative to the destination root.
///
/// Slug and date values are used verbatim apart from `/`, which separates
/// path components like in `folder`. A page without a `slug` keeps its
/// sanitized source name and is never placed under `folder`.
#[must_use]
pub fn derive_filename(source_name: &str, attributes: &Attributes) -> PathBuf {
    let Some(slug) = attributes.get("slug") else {
        return PathBuf::from(sanitize_name(source_name));
    };

    let base_name = match attributes.get("date") {
        Some(date) => format!("{date}-{slug}.md"),
        None => format!("{slug}.md"),
    };

    let mut path = PathBuf::new();
    if let Some(folder) = attributes.get("folder") {
        push_relative(&mut path, folder);
    }
    push_relative(&mut path, &base_name);
    path
}

/// Append the normal components of a `/`-separated value.
fn push_relative(path: &mut PathBuf, value: &str) {
    for part in value.split('/') {
        for component in Path::new(part).components() {
            if let Component::Normal(name) = component {
                path.push(name);
            }
        }
    }
}
