//! Outline page parsing and blog markdown transformation for lsq.
//!
//! This crate provides:
//! - [`Page`]: a parsed outline page (attributes + body) and its derived state
//! - [`transform_page`]: the ordered pipeline turning an outline into blog markdown
//! - [`render_page`]: frontmatter serialization of a transformed page
//!
//! # Quick Start
//!
//! ```
//! use lsq_page::{Page, render_page, transform_page};
//!
//! let content = "slug:: hello\npublic:: true\n- First paragraph\n\t- a bullet\n";
//! let page = Page::parse("Hello World.md", content);
//! assert!(page.is_public());
//!
//! let page = transform_page(page, "/images");
//! assert_eq!(page.filename().unwrap().to_str(), Some("hello.md"));
//!
//! let output = render_page(&page, &["public".to_owned()]).unwrap();
//! assert!(output.starts_with("---\npublic: true\nslug: \"hello\"\n---\n"));
//! ```

mod assets;
mod filename;
mod page;
mod pipeline;
mod render;
pub mod rewrite;

pub use assets::{AssetExtractor, extract_assets};
pub use filename::{derive_filename, sanitize_name};
pub use page::{Attributes, Page};
pub use pipeline::{PAGE_STEPS, PageStep, transform_page};
pub use render::{RenderError, parse_unquoted_properties, render_page};
