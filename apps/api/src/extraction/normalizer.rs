//! Text Normalizer: turns raw page text (possibly still carrying markup) into
//! a plain, line-structured text blob for the extractor.

use std::sync::LazyLock;

use regex::Regex;

static NON_CONTENT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>|<noscript\b.*?</noscript\s*>|<iframe\b.*?</iframe\s*>|<!--.*?-->",
    )
    .expect("valid non-content block pattern")
});

static TITLE_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<title\b[^>]*>(.*?)</title\s*>").expect("valid title pattern")
});

static BLOCK_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(?:p|div|li|h[1-6]|tr|section|article|header|footer|ul|ol)\s*>")
        .expect("valid block break pattern")
});

/// Known HTML elements, custom elements (`<job-card>`) and `<!DOCTYPE>`.
/// Other angle-bracket text (`< 100k`, `Vec<T>`, `> 3 years`) is content.
static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)</?(?:a|abbr|address|article|aside|b|blockquote|body|br|button|caption|code|col|dd|del|details|div|dl|dt|em|fieldset|figcaption|figure|font|footer|form|h[1-6]|head|header|hr|html|i|img|input|ins|label|legend|li|link|main|mark|meta|nav|ol|option|p|path|picture|pre|s|section|select|small|source|span|strong|sub|summary|sup|svg|table|tbody|td|template|textarea|tfoot|th|thead|time|tr|u|ul|[a-z][a-z0-9]*-[a-z0-9-]+)\b[^<>]*>|<![^<>]*>",
    )
    .expect("valid tag pattern")
});

static HORIZONTAL_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\u{a0}\u{200b}\r\f\v]+").expect("valid space pattern"));

/// Navigation and consent lines that carry no posting content. Compared case-insensitively.
const BOILERPLATE_LINES: &[&str] = &[
    "skip to main content",
    "skip to content",
    "skip navigation",
    "accept all cookies",
    "accept cookies",
    "reject all",
    "cookie settings",
    "manage cookies",
    "sign in",
    "log in",
    "sign up",
    "menu",
    "close",
    "share",
    "share this job",
    "back to jobs",
    "back to search results",
];

const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
    ("&ndash;", "-"),
    ("&mdash;", "-"),
    ("&bull;", "-"),
    // Must stay last so `&amp;lt;` decodes to `&lt;` and not `<`.
    ("&amp;", "&"),
];

/// Normalizes raw page text.
///
/// Markup is stripped (with a `<title>` element kept as a `Title: ...` line),
/// lines are trimmed, inner whitespace collapsed, boilerplate lines dropped and
/// blank-line runs reduced to one. Never fails; empty input yields `""`.
pub fn normalize(raw_text: &str) -> String {
    if raw_text.trim().is_empty() {
        return String::new();
    }

    let text = NON_CONTENT_BLOCK.replace_all(raw_text, "\n");
    let text = TITLE_ELEMENT.replace_all(&text, "\nTitle: $1\n");
    let text = BLOCK_BREAK.replace_all(&text, "\n");
    let text = TAG.replace_all(&text, " ");
    let text = decode_entities(&text);

    let mut lines: Vec<String> = Vec::new();
    let mut last_blank = true;
    for line in text.lines() {
        let line = HORIZONTAL_SPACE.replace_all(line, " ");
        let line = line.trim();

        if line.is_empty() {
            if !last_blank {
                lines.push(String::new());
                last_blank = true;
            }
            continue;
        }
        if is_boilerplate(line) {
            continue;
        }

        lines.push(line.to_string());
        last_blank = false;
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    ENTITIES
        .iter()
        .fold(text.to_string(), |acc, (entity, plain)| acc.replace(entity, plain))
}

fn is_boilerplate(line: &str) -> bool {
    BOILERPLATE_LINES
        .iter()
        .any(|b| b.eq_ignore_ascii_case(line))
}
