//! Escaping of untrusted text before it is embedded into HTML markup.

/// Replacements applied by [`escape`], in application order.
///
/// `&` comes first so the entities produced by the later replacements are not
/// escaped a second time.
const REPLACEMENTS: [(char, &str); 4] = [
    ('&', "&amp;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('"', "&quot;"),
];

/// Escape `&`, `<`, `>` and `"` in `text`.
///
/// All other characters (including `'`) are passed through unchanged.
pub fn escape(text: &str) -> String {
    REPLACEMENTS
        .iter()
        .fold(text.to_owned(), |text, &(from, to)| text.replace(from, to))
}
