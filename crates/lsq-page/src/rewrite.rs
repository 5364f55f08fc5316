//! Body rewriters flattening outline bullets into blog markdown.
//!
//! Every rewriter is a pure `&str -> String` function. They must run in the
//! order of [`REWRITERS`]: each pattern is written against the outline's
//! original indentation (one tab per nesting level, two spaces for
//! continuation lines under a bullet).

use std::sync::LazyLock;

use regex::{Captures, Regex};

static EMPTY_BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*-\s*$").unwrap());

static MULTILINE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)\n?(^- .*\n(?:  .*\n?)+)").unwrap());

static BLOCK_LINE_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^[- ] ").unwrap());

static FIRST_LEVEL_BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^- ").unwrap());

static SECOND_LEVEL_BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\t-").unwrap());

static DEEP_BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\t{2,}-").unwrap());

/// A single body rewriting step.
pub type Rewriter = fn(&str) -> String;

/// Body rewriters in the order they must be applied.
pub const REWRITERS: [(&str, Rewriter); 5] = [
    ("remove_empty_bullet_points", remove_empty_bullet_points),
    ("unindent_multiline_strings", unindent_multiline_strings),
    (
        "first_bullet_points_to_paragraphs",
        first_bullet_points_to_paragraphs,
    ),
    ("second_to_first_bullet_points", second_to_first_bullet_points),
    (
        "remove_tab_from_multi_level_bullet_points",
        remove_tab_from_multi_level_bullet_points,
    ),
];

/// Blank out lines that hold nothing but a `-` bullet marker.
///
/// The line break after the bullet is kept.
#[must_use]
pub fn remove_empty_bullet_points(text: &str) -> String {
    EMPTY_BULLET.replace_all(text, "").into_owned()
}

/// Flush multi-line bullet content to the left margin.
///
/// A top-level bullet followed by two-space indented continuation lines
/// loses its `- ` marker and one indentation level per line, and is
/// preceded by an extra newline:
///
/// ````text
/// - ```ts
///   const hello = "world"
///   ```
/// ````
///
/// becomes
///
/// ````text
///
/// ```ts
/// const hello = "world"
/// ```
/// ````
#[must_use]
pub fn unindent_multiline_strings(text: &str) -> String {
    MULTILINE_BLOCK
        .replace_all(text, |caps: &Captures<'_>| {
            let whole = &caps[0];
            let block = &caps[1];
            let leading = &whole[..whole.len() - block.len()];
            let unindented = BLOCK_LINE_PREFIX.replace_all(block, "");
            format!("\n{leading}{unindented}")
        })
        .into_owned()
}

/// Turn top-level bullets into paragraphs separated by a blank line.
#[must_use]
pub fn first_bullet_points_to_paragraphs(text: &str) -> String {
    FIRST_LEVEL_BULLET.replace_all(text, "\n").into_owned()
}

/// Promote second-level bullets to first-level list items.
#[must_use]
pub fn second_to_first_bullet_points(text: &str) -> String {
    SECOND_LEVEL_BULLET.replace_all(text, "\n-").into_owned()
}

/// Shift third-level and deeper bullets up by one tab.
#[must_use]
pub fn remove_tab_from_multi_level_bullet_points(text: &str) -> String {
    DEEP_BULLET
        .replace_all(text, |caps: &Captures<'_>| caps[0][1..].to_owned())
        .into_owned()
}

/// Apply all rewriters in order.
#[must_use]
pub fn rewrite_body(text: &str) -> String {
    REWRITERS
        .iter()
        .fold(text.to_owned(), |current, (_, rewrite)| rewrite(&current))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_remove_empty_bullet_keeps_line_break() {
        assert_eq!(remove_empty_bullet_points("- \n- item\n"), "\n- item\n");
    }

    #[test]
    fn test_remove_empty_bullet_only_bullet() {
        assert_eq!(remove_empty_bullet_points("-"), "");
        assert_eq!(remove_empty_bullet_points("- "), "");
    }

    #[test]
    fn test_remove_empty_bullet_indented() {
        assert_eq!(remove_empty_bullet_points("a\n\t\t-  \nb\n"), "a\n\nb\n");
        assert_eq!(remove_empty_bullet_points("  -\nkeep\n"), "\nkeep\n");
    }

    #[test]
    fn test_remove_empty_bullet_absorbs_preceding_blank_line() {
        assert_eq!(remove_empty_bullet_points("a\n\n-\nb"), "a\n\nb");
    }

    #[test]
    fn test_remove_empty_bullet_leaves_content() {
        let text = "- item\n\t- nested\n-dash\n";
        assert_eq!(remove_empty_bullet_points(text), text);
    }

    #[test]
    fn test_remove_empty_bullet_idempotent() {
        for text in ["- \n- item\n", "-\n-\n", "a\n\n\t-\n\n- \nb", "- x\n  - \n"] {
            let once = remove_empty_bullet_points(text);
            assert_eq!(remove_empty_bullet_points(&once), once, "input: {text:?}");
        }
    }

    #[test]
    fn test_unindent_code_block() {
        let text = "- ```ts\n  const hello = \"world\"\n  ```\n- next\n";
        assert_eq!(
            unindent_multiline_strings(text),
            "\n```ts\nconst hello = \"world\"\n```\n- next\n"
        );
    }

    #[test]
    fn test_unindent_keeps_preceding_newline() {
        let text = "intro\n- a\n  b\n";
        assert_eq!(unindent_multiline_strings(text), "intro\n\na\nb\n");
    }

    #[test]
    fn test_unindent_strips_one_level_only() {
        let text = "- para\n  line two\n    indented\n";
        assert_eq!(
            unindent_multiline_strings(text),
            "\npara\nline two\n  indented\n"
        );
    }

    #[test]
    fn test_unindent_block_without_trailing_newline() {
        assert_eq!(unindent_multiline_strings("- a\n  b"), "\na\nb");
    }

    #[test]
    fn test_unindent_ignores_single_line_bullets() {
        let text = "- one\n- two\n\t- nested\n";
        assert_eq!(unindent_multiline_strings(text), text);
    }

    #[test]
    fn test_unindent_ignores_nested_bullets() {
        let text = "\t- ```sh\n\t  echo hi\n\t  ```\n";
        assert_eq!(unindent_multiline_strings(text), text);
    }

    #[test]
    fn test_unindent_ignores_dash_inside_line() {
        let text = "a - b\n  c\n";
        assert_eq!(unindent_multiline_strings(text), text);
    }

    #[test]
    fn test_first_bullets_to_paragraphs() {
        assert_eq!(
            first_bullet_points_to_paragraphs("- one\n- two\n\t- nested\n"),
            "\none\n\ntwo\n\t- nested\n"
        );
    }

    #[test]
    fn test_second_to_first_bullets() {
        assert_eq!(
            second_to_first_bullet_points("para\n\t- second\n\t\t- third\n"),
            "para\n\n- second\n\t\t- third\n"
        );
    }

    #[test]
    fn test_remove_tab_from_deep_bullets() {
        assert_eq!(
            remove_tab_from_multi_level_bullet_points("\t\t- third\n\t\t\t- fourth\n\t- second\n"),
            "\t- third\n\t\t- fourth\n\t- second\n"
        );
    }

    #[test]
    fn test_steps_one_to_three() {
        let text = remove_empty_bullet_points("- \n- item\n");
        let text = unindent_multiline_strings(&text);
        let text = first_bullet_points_to_paragraphs(&text);
        assert_eq!(text, "\n\nitem\n");
    }

    #[test]
    fn test_rewrite_body_nesting_levels() {
        assert_eq!(
            rewrite_body("- top\n\t- second\n\t\t- third\n"),
            "\ntop\n\n- second\n\t- third\n"
        );
    }

    #[test]
    fn test_rewrite_body_without_bullets_unchanged() {
        let text = "# Title\n\nSome prose with a - dash.\n\n```rs\nfn main() {}\n```\n";
        assert_eq!(rewrite_body(text), text);
    }

    #[test]
    fn test_rewrite_body_only_empty_bullet() {
        assert_eq!(rewrite_body("-"), "");
    }

    #[test]
    fn test_rewrite_body_code_block_under_bullet() {
        let text = "- Example:\n- ```rust\n  let x = 1;\n  ```\n\t- note\n";
        assert_eq!(
            rewrite_body(text),
            "\nExample:\n\n```rust\nlet x = 1;\n```\n\n- note\n"
        );
    }
}
