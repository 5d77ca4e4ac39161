//! Output file naming.

use once_cell::sync::Lazy;
use regex::Regex;

static UNSAFE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[<>:"/\\|?*]"#).unwrap());
static SEPARATOR_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[_\s]+").unwrap());

/// Characters rejected in user-typed output names.
pub const FORBIDDEN_NAME_CHARS: &str = r#"<>:"/\|?*"#;

/// Make `name` safe to use as a file name on every platform.
///
/// Unsafe characters become `_`, surrounding whitespace and dots are trimmed,
/// and runs of underscores or whitespace collapse into a single `_`. An empty
/// result becomes `"unnamed"`.
pub fn sanitize_filename(name: &str) -> String {
    let replaced = UNSAFE_CHARS.replace_all(name, "_");
    let trimmed = replaced.trim().trim_matches('.');
    let collapsed = SEPARATOR_RUNS.replace_all(trimmed, "_");
    if collapsed.is_empty() {
        "unnamed".to_string()
    } else {
        collapsed.into_owned()
    }
}

/// `sanitize(stem) + suffix + extension`, e.g. `("my scan", "_compressed_ebook", ".pdf")`.
pub fn output_file_name(stem: &str, suffix: &str, extension: &str) -> String {
    format!("{}{}{}", sanitize_filename(stem), suffix, extension)
}

/// Zero-pad a 1-indexed page number to `max(3, digits(total_pages))`.
pub fn format_page_number(page_num: usize, total_pages: usize) -> String {
    let width = total_pages.to_string().len().max(3);
    format!("{page_num:0width$}")
}

/// `true` if a user-typed name contains a character [`sanitize_filename`] would replace.
pub fn has_forbidden_chars(name: &str) -> bool {
    name.chars().any(|c| FORBIDDEN_NAME_CHARS.contains(c))
}
