//! File-name derivation from free-form descriptions
//!
//! Descriptions come straight from the metadata feed, so they may contain
//! path separators, punctuation and arbitrary Unicode.

/// Converts a description into a snake_case identifier usable as a file stem
///
/// The result contains only lowercase ASCII alphanumerics separated by single
/// underscores. Input made only of symbols yields an empty string, which is
/// not a usable file name.
///
/// Distinct descriptions can map to the same identifier
/// (`"Foo Bar"` and `"foo-bar"` both give `foo_bar`).
pub fn sanitize(description: &str) -> String {
    // Non-alphanumerics -> '_'
    let replaced: Vec<char> = description
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    // camelCase boundaries: "fooBar" -> "foo_Bar"
    let mut split = String::with_capacity(replaced.len() * 2);
    for (i, &c) in replaced.iter().enumerate() {
        split.push(c);
        if let Some(&next) = replaced.get(i + 1) {
            if (c.is_ascii_lowercase() || c.is_ascii_digit()) && next.is_ascii_uppercase() {
                split.push('_');
            }
        }
    }

    let mut collapsed = String::with_capacity(split.len());
    for c in split.chars() {
        if c == '_' && collapsed.ends_with('_') {
            continue;
        }
        collapsed.push(c);
    }

    collapsed.trim_matches('_').to_ascii_lowercase()
}
