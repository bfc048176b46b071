//! Recovery of authored link targets from renderer-rewritten hrefs.
//!
//! While loading a document the renderer rewrites every in-document link so that
//! it routes through its own anchor scheme, e.g.
//!
//! ```text
//! #viv-id-:002fpageableContentDD835404-D8AE-4FC3-A6BE-E1BFD35C6885:002ehtml:0023chapter:002d2
//! ```
//!
//! Everything after the `ehtml:0023` marker (the escaped `.html#`) is the original
//! fragment, with special characters written as `:` plus four hex digits holding a
//! UTF-16 code unit.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Separates the rewritten document path from the original fragment.
pub const FRAGMENT_MARKER: &str = "ehtml:0023";

static ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":[0-9a-fA-F]{4}").expect("escape pattern is valid"));

/// Demangle a raw `href` attribute value.
///
/// Absent values, values not starting with `#` and fragment links without the
/// renderer's marker are returned unchanged.
pub fn demangle_href(href: Option<&str>) -> Option<Cow<'_, str>> {
    let href = href?;
    if !href.starts_with('#') {
        return Some(Cow::Borrowed(href));
    }
    match href.find(FRAGMENT_MARKER) {
        Some(index) => {
            let raw = &href[index + FRAGMENT_MARKER.len()..];
            Some(Cow::Owned(format!("#{}", unescape(raw))))
        }
        None => Some(Cow::Borrowed(href)),
    }
}

/// Replace every `:XXXX` run (case-insensitive hex) with the UTF-16 code unit it
/// names, scanning left to right without overlap. Anything else is copied as is.
///
/// Units are collected before decoding so that adjacent escapes forming a
/// surrogate pair yield one character; an unpaired surrogate becomes U+FFFD.
pub fn unescape(encoded: &str) -> String {
    let mut units: Vec<u16> = Vec::with_capacity(encoded.len());
    let mut literal_start = 0;

    for escape in ESCAPE.find_iter(encoded) {
        units.extend(encoded[literal_start..escape.start()].encode_utf16());
        if let Ok(unit) = u16::from_str_radix(&escape.as_str()[1..], 16) {
            units.push(unit);
        }
        literal_start = escape.end();
    }
    units.extend(encoded[literal_start..].encode_utf16());

    String::from_utf16_lossy(&units)
}
