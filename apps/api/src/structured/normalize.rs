//! Markup stripping — turns raw (possibly HTML) description text into plain
//! text with block boundaries collapsed to newlines.

use std::sync::LazyLock;

use regex::Regex;

/// Tags whose end (or, for `<br>`, occurrence) terminates a visual line.
static BLOCK_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<\s*br\s*/?\s*>|</\s*(?:p|div|li|ul|ol|h[1-6]|tr|table|section|article|blockquote)\s*>")
        .expect("block break pattern")
});

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern"));

/// Strips markup from a raw description, preserving line structure.
///
/// Never fails: input that isn't HTML passes through with only whitespace
/// normalization. Returns an empty string for empty or whitespace-only input.
pub fn normalize(raw: &str) -> String {
    let text = raw.replace("\r\n", "\n");
    // Some boards (Greenhouse among them) deliver fully HTML-escaped
    // markup. Unescape once up front so the tag patterns see real tags.
    let text = if !text.contains('<') && text.contains("&lt;") {
        decode_entities(&text)
    } else {
        text
    };
    let text = BLOCK_BREAK_RE.replace_all(&text, "\n");
    let text = TAG_RE.replace_all(&text, "");
    let text = decode_entities(&text);

    let mut lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    // Drop leading/trailing blank lines; interior blanks stay as separators.
    while lines.first().is_some_and(|l| l.trim().is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

/// Decodes the handful of entities that actually occur in ATS payloads.
/// `&amp;` is decoded last so `&amp;lt;` does not become `<`.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
