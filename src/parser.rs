//! Operand parser for content streams.
//!
//! Combines lexer tokens into operand objects: scalars, strings, names,
//! arrays and dictionaries. Keywords are not operands; meeting one where an
//! operand is expected is an error the caller uses to switch to operator
//! handling.

use crate::error::{Error, Result};
use crate::lexer::{token, Token};
use crate::object::{Dictionary, Object};
use nom::IResult;

/// Decode escape sequences in a literal string body.
///
/// Handles `\n \r \t \b \f \( \) \\`, octal `\ddd` (1-3 digits) and
/// line continuations (backslash before EOL). An unknown escape drops the
/// backslash.
///
/// ```
/// # use pdf_graph::parser::decode_literal_string_escapes;
/// assert_eq!(decode_literal_string_escapes(b"Section \\247 71.01"), b"Section \xa7 71.01");
/// ```
pub fn decode_literal_string_escapes(raw: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(raw.len());
    let mut i = 0;

    while i < raw.len() {
        let byte = raw[i];
        if byte != b'\\' || i + 1 == raw.len() {
            // Bare CR and CRLF inside a literal string both mean LF
            if byte == b'\r' {
                result.push(b'\n');
                if raw.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
            } else {
                result.push(byte);
            }
            i += 1;
            continue;
        }

        let escaped = raw[i + 1];
        i += 2;
        match escaped {
            b'n' => result.push(b'\n'),
            b'r' => result.push(b'\r'),
            b't' => result.push(b'\t'),
            b'b' => result.push(0x08),
            b'f' => result.push(0x0C),
            b'\n' => {},
            b'\r' => {
                if raw.get(i) == Some(&b'\n') {
                    i += 1;
                }
            },
            b'0'..=b'7' => {
                let mut value = u32::from(escaped - b'0');
                for _ in 0..2 {
                    match raw.get(i) {
                        Some(&d @ b'0'..=b'7') => {
                            value = value * 8 + u32::from(d - b'0');
                            i += 1;
                        },
                        _ => break,
                    }
                }
                result.push((value & 0xFF) as u8);
            },
            other => result.push(other),
        }
    }

    result
}

/// Decode a hex string body. Whitespace is ignored; an odd digit count is
/// padded with `0`.
pub fn decode_hex(hex_bytes: &[u8]) -> Result<Vec<u8>> {
    let digits: Vec<u8> = hex_bytes
        .iter()
        .copied()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    digits
        .chunks(2)
        .map(|chunk| {
            let high = (chunk[0] as char).to_digit(16);
            let low = chunk.get(1).map_or(Some(0), |&c| (c as char).to_digit(16));
            match (high, low) {
                (Some(h), Some(l)) => Ok((h * 16 + l) as u8),
                _ => Err(Error::ParseError {
                    offset: 0,
                    reason: format!("Invalid hex digit in <{}>", String::from_utf8_lossy(chunk)),
                }),
            }
        })
        .collect()
}

/// Deepest array/dictionary nesting accepted in an operand.
pub const MAX_OPERAND_NESTING: u32 = 256;

fn fail(input: &[u8]) -> nom::Err<nom::error::Error<&[u8]>> {
    nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Tag))
}

fn too_deep(input: &[u8]) -> nom::Err<nom::error::Error<&[u8]>> {
    nom::Err::Failure(nom::error::Error::new(input, nom::error::ErrorKind::TooLarge))
}

/// True when a parse failure came from exceeding [`MAX_OPERAND_NESTING`].
pub fn is_nesting_error(err: &nom::Err<nom::error::Error<&[u8]>>) -> bool {
    matches!(err, nom::Err::Failure(e) if e.code == nom::error::ErrorKind::TooLarge)
}

/// Parse one operand.
///
/// # Example
///
/// ```
/// use pdf_graph::parser::parse_operand;
/// use pdf_graph::object::Object;
///
/// let (rest, obj) = parse_operand(b"[ 1 /Name ] Tj").unwrap();
/// assert_eq!(obj, Object::Array(vec![Object::Integer(1), Object::name("Name")]));
/// assert_eq!(rest, b" Tj");
/// ```
///
/// # Errors
///
/// Fails on keywords, unbalanced delimiters, malformed hex strings and
/// containers nested deeper than [`MAX_OPERAND_NESTING`].
pub fn parse_operand(input: &[u8]) -> IResult<&[u8], Object> {
    let (rest, tok) = token(input)?;
    operand_from_token(input, rest, tok, 0)
}

fn operand_from_token<'a>(
    start: &'a [u8],
    rest: &'a [u8],
    tok: Token<'a>,
    depth: u32,
) -> IResult<&'a [u8], Object> {
    match tok {
        Token::Null => Ok((rest, Object::Null)),
        Token::True => Ok((rest, Object::Boolean(true))),
        Token::False => Ok((rest, Object::Boolean(false))),
        Token::Integer(i) => Ok((rest, Object::Integer(i))),
        Token::Real(r) => Ok((rest, Object::Real(r))),
        Token::LiteralString(raw) => Ok((rest, Object::String(decode_literal_string_escapes(raw)))),
        Token::HexString(raw) => match decode_hex(raw) {
            Ok(bytes) => Ok((rest, Object::String(bytes))),
            Err(_) => Err(nom::Err::Failure(nom::error::Error::new(
                start,
                nom::error::ErrorKind::HexDigit,
            ))),
        },
        Token::Name(name) => Ok((rest, Object::Name(name))),
        Token::ArrayStart | Token::DictStart if depth >= MAX_OPERAND_NESTING => Err(too_deep(start)),
        Token::ArrayStart => parse_array(rest, depth + 1),
        Token::DictStart => parse_dictionary(rest, depth + 1),
        Token::ArrayEnd | Token::DictEnd | Token::Keyword(_) => Err(fail(start)),
    }
}

/// Array body after `[`.
fn parse_array(input: &[u8], depth: u32) -> IResult<&[u8], Object> {
    let mut items = Vec::new();
    let mut remaining = input;
    loop {
        let (rest, tok) = token(remaining)?;
        if tok == Token::ArrayEnd {
            return Ok((rest, Object::Array(items)));
        }
        let (rest, item) = operand_from_token(remaining, rest, tok, depth)?;
        items.push(item);
        remaining = rest;
    }
}

/// Dictionary body after `<<`. Null values are dropped.
fn parse_dictionary(input: &[u8], depth: u32) -> IResult<&[u8], Object> {
    let mut dict = Dictionary::new();
    let mut remaining = input;
    loop {
        let (rest, tok) = token(remaining)?;
        match tok {
            Token::DictEnd => return Ok((rest, Object::Dictionary(dict))),
            Token::Name(key) => {
                let (after, tok) = token(rest)?;
                let (rest, value) = operand_from_token(rest, after, tok, depth)?;
                if !value.is_null() {
                    dict.insert(key, value);
                }
                remaining = rest;
            },
            _ => return Err(fail(remaining)),
        }
    }
}
