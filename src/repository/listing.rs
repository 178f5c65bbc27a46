//! Directory listing parser
//!
//! Package repositories publish each distribution as a plain HTML
//! directory listing. The document is tokenized leniently: unclosed or
//! mismatched tags are accepted, and a tokenizer error ends the scan while
//! keeping every anchor already collected. As in HTML, a `<` only opens
//! markup when a tag name, `/`, `!` or `?` follows it; any other `<` is text.

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::escape::resolve_html5_entity;
use quick_xml::events::{BytesStart, Event};
use tracing::{debug, warn};

/// Suffix identifying installable package files
pub const PACKAGE_SUFFIX: &str = ".deb";

/// An anchor element found in a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub href: String,
}

/// Collect the `href` of every anchor element, in document order.
///
/// Anchors without an `href` are skipped.
pub fn parse_anchors(html: &str) -> Vec<Anchor> {
    let html = escape_stray_angles(html);
    let mut reader = Reader::from_str(&html);
    {
        let config = reader.config_mut();
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
        config.check_comments = false;
    }

    let mut anchors = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(tag) | Event::Empty(tag)) => {
                if is_anchor(&tag) {
                    if let Some(href) = href_of(&tag) {
                        anchors.push(Anchor { href });
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => {
                warn!(
                    position = reader.buffer_position(),
                    error = %err,
                    kept = anchors.len(),
                    "stopped parsing malformed directory listing"
                );
                break;
            }
        }
    }

    debug!(count = anchors.len(), "parsed directory listing anchors");
    anchors
}

/// Escape every `<` that cannot start markup, so the tokenizer reads it
/// as text instead of swallowing the following tag.
fn escape_stray_angles(html: &str) -> Cow<'_, str> {
    let opens_markup =
        |next: Option<char>| next.is_some_and(|c| c.is_ascii_alphabetic() || "/!?".contains(c));

    let mut chars = html.char_indices().peekable();
    let mut escaped: Option<String> = None;
    let mut copied = 0;
    while let Some((index, c)) = chars.next() {
        if c == '<' && !opens_markup(chars.peek().map(|&(_, next)| next)) {
            let out = escaped.get_or_insert_with(|| String::with_capacity(html.len() + 16));
            out.push_str(&html[copied..index]);
            out.push_str("&lt;");
            copied = index + 1;
        }
    }

    match escaped {
        Some(mut out) => {
            out.push_str(&html[copied..]);
            Cow::Owned(out)
        }
        None => Cow::Borrowed(html),
    }
}

fn is_anchor(tag: &BytesStart<'_>) -> bool {
    tag.name().as_ref().eq_ignore_ascii_case(b"a")
}

fn href_of(tag: &BytesStart<'_>) -> Option<String> {
    tag.html_attributes()
        .with_checks(false)
        .filter_map(std::result::Result::ok)
        .find(|attr| attr.key.as_ref().eq_ignore_ascii_case(b"href"))
        .map(|attr| match attr.unescape_value_with(resolve_html5_entity) {
            Ok(value) => value.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        })
}

/// Keep the anchors that point at package files, in order
pub fn package_links(anchors: &[Anchor]) -> Vec<String> {
    anchors
        .iter()
        .filter(|anchor| anchor.href.ends_with(PACKAGE_SUFFIX))
        .map(|anchor| anchor.href.clone())
        .collect()
}

/// Package file names advertised by a directory listing, in document order
pub fn list_packages(html: &str) -> Vec<String> {
    package_links(&parse_anchors(html))
}
