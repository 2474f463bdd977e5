//! Markup stripping for single-part bodies, which may well be HTML.
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HIDDEN: Regex =
        Regex::new(r"(?is)<(script|style|head)\b[^>]*>.*?</(script|style|head)\s*>").unwrap();
    static ref COMMENT: Regex = Regex::new(r"(?s)<!--.*?-->").unwrap();
    static ref BLOCK_TAG: Regex = Regex::new(
        r"(?i)</?(br|p|div|li|ul|ol|tr|table|h[1-6]|blockquote|pre|hr|body|html)\b[^>]*>"
    )
    .unwrap();
    static ref TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref BLANK_LINES: Regex = Regex::new(r"[ \t]*\n(?:[ \t]*\n)*[ \t]*").unwrap();
    static ref SPACES: Regex = Regex::new(r"[ \t]{2,}").unwrap();
    static ref NUMERIC_ENTITY: Regex =
        Regex::new(r"&#(?:[xX]([0-9a-fA-F]{1,6})|([0-9]{1,7}));").unwrap();
}

/// Reduce `body` to markup-free text.
///
/// Script, style and head contents are dropped, block tags become line
/// breaks and every other tag disappears. Runs of blank lines collapse to a
/// single newline, runs of spaces to one space. Plain text keeps its lines.
pub fn clean(body: &str) -> String {
    let text = HIDDEN.replace_all(body, "");
    let text = COMMENT.replace_all(&text, "");
    let text = BLOCK_TAG.replace_all(&text, "\n");
    let text = TAG.replace_all(&text, "");
    let text = decode_entities(&text).replace('\r', "");
    let text = BLANK_LINES.replace_all(&text, "\n");
    let text = SPACES.replace_all(&text, " ");

    text.trim().to_string()
}

/// Decode numeric character references and the common named entities.
/// Anything else is left as written.
fn decode_entities(text: &str) -> String {
    let text = NUMERIC_ENTITY.replace_all(text, |caps: &regex::Captures| {
        let code = match (caps.get(1), caps.get(2)) {
            (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
            (_, Some(dec)) => dec.as_str().parse().ok(),
            _ => None,
        };

        match code.and_then(char::from_u32) {
            Some(c) => c.to_string(),
            None => caps[0].to_string(),
        }
    });

    // &amp; last so "&amp;lt;" stays "&lt;"
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&mdash;", "\u{2014}")
        .replace("&ndash;", "\u{2013}")
        .replace("&hellip;", "\u{2026}")
        .replace("&lsquo;", "\u{2018}")
        .replace("&rsquo;", "\u{2019}")
        .replace("&ldquo;", "\u{201c}")
        .replace("&rdquo;", "\u{201d}")
        .replace("&copy;", "\u{a9}")
        .replace("&amp;", "&")
}
