//! HTML entity decoding

use log::trace;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Named entities: the ISO-8859-1 repertoire plus a few extras.
static HTML_ENTITIES: LazyLock<HashMap<&'static str, u32>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    // Markup-significant characters and quotes
    m.insert("quot", 34);
    m.insert("bdquo", 34);
    m.insert("rdquo", 34);
    m.insert("amp", 38);
    m.insert("apos", 39);
    m.insert("lt", 60);
    m.insert("gt", 62);
    // ISO-8859-1, 160..=255 in code point order
    const LATIN1: [&str; 96] = [
        "nbsp", "iexcl", "cent", "pound", "curren", "yen", "brvbar", "sect", "uml", "copy",
        "ordf", "laquo", "not", "shy", "reg", "macr", "deg", "plusmn", "sup2", "sup3", "acute",
        "micro", "para", "middot", "cedil", "sup1", "ordm", "raquo", "frac14", "frac12",
        "frac34", "iquest", "Agrave", "Aacute", "Acirc", "Atilde", "Auml", "Aring", "AElig",
        "Ccedil", "Egrave", "Eacute", "Ecirc", "Euml", "Igrave", "Iacute", "Icirc", "Iuml",
        "ETH", "Ntilde", "Ograve", "Oacute", "Ocirc", "Otilde", "Ouml", "times", "Oslash",
        "Ugrave", "Uacute", "Ucirc", "Uuml", "Yacute", "THORN", "szlig", "agrave", "aacute",
        "acirc", "atilde", "auml", "aring", "aelig", "ccedil", "egrave", "eacute", "ecirc",
        "euml", "igrave", "iacute", "icirc", "iuml", "eth", "ntilde", "ograve", "oacute",
        "ocirc", "otilde", "ouml", "divide", "oslash", "ugrave", "uacute", "ucirc", "uuml",
        "yacute", "thorn", "yuml",
    ];
    for (offset, name) in LATIN1.iter().enumerate() {
        m.insert(*name, 160 + offset as u32);
    }
    // Dashes
    m.insert("mdash", 8212);
    m.insert("ndash", 8211);
    m
});

/// Map Windows-1252 code points that feeds commonly send as numeric
/// references onto their Unicode equivalents.
fn remap_windows_1252(value: u32) -> u32 {
    match value {
        133 => 0x2026, // hellip
        134 => 0x2020, // dagger
        135 => 0x2021, // Dagger
        150 => 0x2013, // ndash
        151 => 0x2014, // mdash
        152 => 0x02DC, // tilde
        153 => 0x2122, // trade
        156 => 0x0153, // oelig
        other => other,
    }
}

/// Parse the body of a numeric reference (`65`, `x41`, `X41`).
///
/// Only the leading run of digits counts; anything after it is ignored.
fn decode_numeric(body: &str) -> Option<char> {
    let (digits, radix) = match body.strip_prefix(['x', 'X']) {
        Some(hex) => (hex, 16),
        None => (body, 10),
    };
    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    let value = u32::from_str_radix(&digits[..end], radix).ok()?;
    char::from_u32(remap_windows_1252(value)).filter(|c| *c != '\0')
}

/// Decode a single entity name (the part between `&` and `;`).
///
/// Returns an empty string for anything unrecognized.
///
/// # Example
///
/// ```
/// use tagsoup_parser::entities::decode_entity;
/// assert_eq!(decode_entity("eacute"), "é");
/// assert_eq!(decode_entity("#151"), "—");
/// assert_eq!(decode_entity("bogus"), "");
/// ```
pub fn decode_entity(name: &str) -> String {
    trace!("decode_entity: decoding '{}'", name);
    let decoded = match name.strip_prefix('#') {
        Some(body) if !body.is_empty() => decode_numeric(body),
        _ => HTML_ENTITIES.get(name).copied().and_then(char::from_u32),
    };
    decoded.map(String::from).unwrap_or_default()
}

/// Decode all entity references in a string.
///
/// Text outside `&...;` pairs is copied through. An `&` without a
/// terminating `;` is copied verbatim along with the rest of the input.
///
/// # Example
///
/// ```
/// use tagsoup_parser::decode_entities;
/// assert_eq!(decode_entities("&amp;&lt;&gt;&quot;&#65;&#x41;"), "&<>\"AA");
/// assert_eq!(decode_entities("AT&T"), "AT&T");
/// ```
pub fn decode_entities(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        result.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        match after.find(';') {
            Some(semi) => {
                result.push_str(&decode_entity(&after[..semi]));
                rest = &after[semi + 1..];
            }
            None => {
                result.push_str(&rest[amp..]);
                return result;
            }
        }
    }

    result.push_str(rest);
    result
}
