//! Markup stripping for free-text input.
//!
//! No tag or attribute survives: the text content of ordinary elements is
//! kept, while `script`/`style` bodies and HTML comments are dropped whole.
//! Output is plain text; escaping happens when it is rendered.

use regex::Regex;
use std::sync::LazyLock;

static RAW_TEXT_ELEMENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style)\b[^>]*>.*?(?:</(?:script|style)\s*>|$)")
        .expect("valid raw-text regex")
});

static COMMENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?(?:-->|$)").expect("valid comment regex"));

static TAGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"</?[A-Za-z][^>]*(?:>|$)|<![^>]*>|<\?[^>]*>").expect("valid tag regex")
});

pub fn sanitize_input(input: &str) -> String {
    let without_raw = RAW_TEXT_ELEMENTS.replace_all(input, "");
    let without_comments = COMMENTS.replace_all(&without_raw, "");
    TAGS.replace_all(&without_comments, "").into_owned()
}
