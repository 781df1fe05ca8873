//! Legacy property list decoding.
//!
//! Project files are written in the old NeXTSTEP/OpenStep text format:
//! nested dictionaries `{ key = value; }`, arrays `( a, b, )`, quoted or
//! bare strings, and `<hex>` data. Comments (`/* */` and `//`) may sit
//! between any two tokens. They carry useful names, but they are not part
//! of the decoded value; see [`crate::titles`] for recovering them.

use crate::error::{CoreError, Result};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_till, take_until, take_while},
    character::complete::{char, multispace1},
    combinator::{all_consuming, cut, map, map_res, opt, value},
    multi::{many0, many0_count, separated_list0},
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Keys of a dictionary, in sorted order.
pub type Dictionary = BTreeMap<String, PlistValue>;

// ─────────────────────────────────────────────────────────────────────────────
// Types
// ─────────────────────────────────────────────────────────────────────────────

/// A decoded property list value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PlistValue {
    String(String),
    Data(Vec<u8>),
    Array(Vec<PlistValue>),
    Dictionary(Dictionary),
}

impl PlistValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PlistValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[PlistValue]> {
        match self {
            PlistValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            PlistValue::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// Looks up a key when this value is a dictionary.
    pub fn get(&self, key: &str) -> Option<&PlistValue> {
        self.as_dictionary()?.get(key)
    }

    /// Short name of the value's shape, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            PlistValue::String(_) => "string",
            PlistValue::Data(_) => "data",
            PlistValue::Array(_) => "array",
            PlistValue::Dictionary(_) => "dictionary",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

/// Decodes a complete property list document.
///
/// The whole input must be consumed; anything after the top-level value
/// other than whitespace and comments is an error.
pub fn decode(source: &str) -> Result<PlistValue> {
    let text = source.strip_prefix('\u{feff}').unwrap_or(source);

    match all_consuming(delimited(skip, plist_value, skip))(text) {
        Ok((_, value)) => Ok(value),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(CoreError::syntax(
            text,
            e.input,
            describe(e.code, e.input),
        )),
        Err(nom::Err::Incomplete(_)) => Err(CoreError::syntax(text, "", "unexpected end of input")),
    }
}

fn describe(code: nom::error::ErrorKind, at: &str) -> String {
    match at.chars().next() {
        Some(c) => format!("unexpected {:?} ({:?})", c, code),
        None => format!("unexpected end of input ({:?})", code),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Whitespace and comments
// ─────────────────────────────────────────────────────────────────────────────

fn block_comment(input: &str) -> IResult<&str, ()> {
    value((), delimited(tag("/*"), take_until("*/"), tag("*/")))(input)
}

fn line_comment(input: &str) -> IResult<&str, ()> {
    value((), preceded(tag("//"), take_till(|c| c == '\n')))(input)
}

/// Skips any run of whitespace and comments.
fn skip(input: &str) -> IResult<&str, ()> {
    value(
        (),
        many0_count(alt((value((), multispace1), block_comment, line_comment))),
    )(input)
}

// ─────────────────────────────────────────────────────────────────────────────
// Values
// ─────────────────────────────────────────────────────────────────────────────

fn plist_value(input: &str) -> IResult<&str, PlistValue> {
    alt((
        dictionary,
        array,
        data,
        map(string, PlistValue::String),
    ))(input)
}

fn dictionary(input: &str) -> IResult<&str, PlistValue> {
    map(
        delimited(
            terminated(char('{'), skip),
            many0(terminated(entry, skip)),
            cut(char('}')),
        ),
        |entries| PlistValue::Dictionary(entries.into_iter().collect()),
    )(input)
}

fn entry(input: &str) -> IResult<&str, (String, PlistValue)> {
    let (input, key) = string(input)?;
    let (input, _) = cut(delimited(skip, char('='), skip))(input)?;
    let (input, value) = cut(plist_value)(input)?;
    let (input, _) = cut(preceded(skip, char(';')))(input)?;
    Ok((input, (key, value)))
}

fn array(input: &str) -> IResult<&str, PlistValue> {
    map(
        delimited(
            terminated(char('('), skip),
            terminated(
                separated_list0(delimited(skip, char(','), skip), plist_value),
                pair(skip, opt(terminated(char(','), skip))),
            ),
            cut(char(')')),
        ),
        PlistValue::Array,
    )(input)
}

fn data(input: &str) -> IResult<&str, PlistValue> {
    map_res(
        delimited(
            char('<'),
            take_while(|c: char| c.is_ascii_hexdigit() || c.is_whitespace()),
            cut(char('>')),
        ),
        |hex: &str| decode_hex(hex).map(PlistValue::Data),
    )(input)
}

fn decode_hex(hex: &str) -> std::result::Result<Vec<u8>, &'static str> {
    let digits: Vec<u8> = hex
        .chars()
        .filter(|c| !c.is_whitespace())
        .filter_map(|c| c.to_digit(16).map(|d| d as u8))
        .collect();

    if digits.len() % 2 != 0 {
        return Err("odd number of hex digits");
    }

    Ok(digits.chunks(2).map(|pair| (pair[0] << 4) | pair[1]).collect())
}

// ─────────────────────────────────────────────────────────────────────────────
// Strings
// ─────────────────────────────────────────────────────────────────────────────

fn string(input: &str) -> IResult<&str, String> {
    alt((quoted_string, bare_string))(input)
}

/// A bare word such as `PBXGroup`, `1`, or `Sources/App.swift`.
///
/// A `/` that starts a comment ends the word.
fn bare_string(input: &str) -> IResult<&str, String> {
    let bytes = input.as_bytes();
    let mut end = 0;

    while end < bytes.len() {
        let b = bytes[end];
        if !(b.is_ascii_alphanumeric() || b"_$+/:.-".contains(&b)) {
            break;
        }
        if b == b'/' && matches!(bytes.get(end + 1), Some(b'*') | Some(b'/')) {
            break;
        }
        end += 1;
    }

    if end == 0 {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::AlphaNumeric,
        )));
    }

    Ok((&input[end..], input[..end].to_string()))
}

fn quoted_string(input: &str) -> IResult<&str, String> {
    let (body, _) = char('"')(input)?;
    let mut out = String::new();
    let mut chars = body.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Ok((&body[i + 1..], out)),
            '\\' => {
                let Some((_, escaped)) = chars.next() else {
                    break;
                };
                match escaped {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    'r' => out.push('\r'),
                    'a' => out.push('\u{07}'),
                    'b' => out.push('\u{08}'),
                    'f' => out.push('\u{0c}'),
                    'v' => out.push('\u{0b}'),
                    '0'..='7' => {
                        let mut code = escaped.to_digit(8).unwrap_or(0);
                        for _ in 0..2 {
                            match chars.peek() {
                                Some(&(_, d)) if d.is_digit(8) => {
                                    code = code * 8 + d.to_digit(8).unwrap_or(0);
                                    chars.next();
                                }
                                _ => break,
                            }
                        }
                        out.push(char::from_u32(code).unwrap_or('\u{fffd}'));
                    }
                    'U' | 'u' => {
                        let mut code = 0u32;
                        for _ in 0..4 {
                            match chars.peek() {
                                Some(&(_, d)) if d.is_ascii_hexdigit() => {
                                    code = code * 16 + d.to_digit(16).unwrap_or(0);
                                    chars.next();
                                }
                                _ => break,
                            }
                        }
                        out.push(char::from_u32(code).unwrap_or('\u{fffd}'));
                    }
                    other => out.push(other),
                }
            }
            _ => out.push(c),
        }
    }

    // Unterminated string: nothing after this point can be salvaged.
    Err(nom::Err::Failure(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Char,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_nested_structure() {
        let source = r#"// !$*UTF8*$!
{
	archiveVersion = 1;
	objects = {
		A1 /* App.swift */ = {isa = PBXFileReference; path = App.swift; sourceTree = "<group>"; };
		B2 /* Sources */ = {
			isa = PBXGroup;
			children = (
				A1 /* App.swift */,
			);
		};
	};
	rootObject = C3 /* Project object */;
}
"#;
        let value = decode(source).unwrap();

        assert_eq!(value.get("archiveVersion").and_then(PlistValue::as_str), Some("1"));
        assert_eq!(value.get("rootObject").and_then(PlistValue::as_str), Some("C3"));

        let objects = value.get("objects").and_then(PlistValue::as_dictionary).unwrap();
        let file = &objects["A1"];
        assert_eq!(file.get("sourceTree").and_then(PlistValue::as_str), Some("<group>"));

        let children = objects["B2"].get("children").and_then(PlistValue::as_array).unwrap();
        assert_eq!(children, &[PlistValue::String("A1".into())]);
    }

    #[test]
    fn test_quoted_string_escapes() {
        let value = decode(r#"{ a = "line\nnext \"quoted\" \U00e9\101"; }"#).unwrap();
        assert_eq!(
            value.get("a").and_then(PlistValue::as_str),
            Some("line\nnext \"quoted\" é\u{41}")
        );
    }

    #[test]
    fn test_empty_collections_and_data() {
        let value = decode("{ list = ( ); dict = { }; blob = <0aFF 10>; }").unwrap();
        assert_eq!(value.get("list"), Some(&PlistValue::Array(vec![])));
        assert_eq!(value.get("dict"), Some(&PlistValue::Dictionary(Dictionary::new())));
        assert_eq!(value.get("blob"), Some(&PlistValue::Data(vec![0x0a, 0xff, 0x10])));
    }

    #[test]
    fn test_array_without_trailing_comma() {
        let value = decode("( a, \"b c\" )").unwrap();
        assert_eq!(
            value,
            PlistValue::Array(vec![
                PlistValue::String("a".into()),
                PlistValue::String("b c".into())
            ])
        );
    }

    #[test]
    fn test_bare_path_stops_at_comment() {
        let value = decode("{ path = Sources/App/*note*/; }").unwrap();
        assert_eq!(value.get("path").and_then(PlistValue::as_str), Some("Sources/App"));
    }

    #[test]
    fn test_missing_semicolon_is_syntax_error() {
        let err = decode("{\n a = b\n}").unwrap_err();
        assert!(matches!(err, CoreError::Syntax { line: 3, .. }), "{err}");
    }

    #[test]
    fn test_trailing_garbage_is_rejected() {
        assert!(decode("{ a = b; } extra").is_err());
    }

    #[test]
    fn test_unterminated_string_is_rejected() {
        assert!(decode("{ a = \"open; }").is_err());
    }
}
