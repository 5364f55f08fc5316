//! Page transformation pipeline.
//!
//! [`PAGE_STEPS`] lists every step in application order. [`transform_page`]
//! folds a page through them, left to right.

use crate::assets::AssetExtractor;
use crate::filename::derive_filename;
use crate::page::Page;
use crate::rewrite::{self, Rewriter};

/// One stage of the page pipeline.
#[derive(Clone, Copy, Debug)]
pub enum PageStep {
    /// Compute the output path from `slug`, `date` and `folder`.
    DeriveFilename,
    /// Rewrite the body text.
    Rewrite(&'static str, Rewriter),
    /// Collect relative image links and point them at the image prefix.
    ExtractAssets,
}

impl PageStep {
    /// Step name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::DeriveFilename => "derive_filename",
            Self::Rewrite(name, _) => *name,
            Self::ExtractAssets => "extract_assets",
        }
    }

    fn apply(&self, page: Page, extractor: &AssetExtractor) -> Page {
        match self {
            Self::DeriveFilename => {
                let filename = derive_filename(page.source_name(), page.attributes());
                page.with_filename(filename)
            }
            Self::Rewrite(_, rewrite) => page.map_text(*rewrite),
            Self::ExtractAssets => extractor.apply(page),
        }
    }
}

/// All pipeline steps in the order they are applied.
pub const PAGE_STEPS: [PageStep; 7] = [
    PageStep::DeriveFilename,
    PageStep::Rewrite(rewrite::REWRITERS[0].0, rewrite::REWRITERS[0].1),
    PageStep::Rewrite(rewrite::REWRITERS[1].0, rewrite::REWRITERS[1].1),
    PageStep::Rewrite(rewrite::REWRITERS[2].0, rewrite::REWRITERS[2].1),
    PageStep::Rewrite(rewrite::REWRITERS[3].0, rewrite::REWRITERS[3].1),
    PageStep::Rewrite(rewrite::REWRITERS[4].0, rewrite::REWRITERS[4].1),
    PageStep::ExtractAssets,
];

/// Transform a parsed page into blog-ready markdown.
///
/// Derives the output filename, flattens the outline body, then rewrites
/// relative image links under `image_prefix`.
#[must_use]
pub fn transform_page(page: Page, image_prefix: &str) -> Page {
    let extractor = AssetExtractor::new(image_prefix);
    PAGE_STEPS.iter().fold(page, |page, step| {
        tracing::trace!(page = page.source_name(), step = step.name(), "Applying page step");
        step.apply(page, &extractor)
    })
}
