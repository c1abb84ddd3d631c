//! Content-stream lexer.
//!
//! Splits content-stream bytes into lexical tokens. Content streams use the
//! object syntax of the file body (numbers, strings, names, arrays,
//! dictionaries) but never contain indirect references or `obj`/`stream`
//! markers; every bare word that is not `true`, `false` or `null` is an
//! operator keyword.
//!
//! Whitespace (space, \t, \r, \n, \0, \f) and comments (% to EOL) are skipped.

use crate::numeric::Decimal;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_till, take_while, take_while1},
    character::complete::{char, digit0, digit1, one_of},
    combinator::{map, opt, recognize, value},
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};

/// Lexical token of a content stream.
#[derive(Debug, PartialEq, Clone)]
pub enum Token<'a> {
    /// Integer number (e.g., 42, -123)
    Integer(i64),

    /// Real number (e.g., 3.14, -2.5, .5), exact
    Real(Decimal),

    /// Literal string body, escapes not yet decoded
    LiteralString(&'a [u8]),

    /// Hexadecimal string body, whitespace preserved
    HexString(&'a [u8]),

    /// Name with `#XX` escapes decoded, without the leading `/`
    Name(String),

    /// `true`
    True,

    /// `false`
    False,

    /// `null`
    Null,

    /// `[`
    ArrayStart,

    /// `]`
    ArrayEnd,

    /// `<<`
    DictStart,

    /// `>>`
    DictEnd,

    /// Bare word: an operator such as `cm`, `Tj`, `T*`, `'`, `BI`
    Keyword(&'a [u8]),
}

/// PDF whitespace: space, tab, CR, LF, NUL, form feed.
pub fn is_whitespace(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\r' | b'\n' | 0x00 | 0x0C)
}

/// PDF delimiter characters.
pub fn is_delimiter(c: u8) -> bool {
    matches!(c, b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%')
}

/// Regular characters form names, numbers and keywords.
pub fn is_regular(c: u8) -> bool {
    !is_whitespace(c) && !is_delimiter(c)
}

fn comment(input: &[u8]) -> IResult<&[u8], ()> {
    value((), preceded(char('%'), take_till(|c| c == b'\r' || c == b'\n')))(input)
}

/// Skip whitespace and comments.
pub fn skip_ws(input: &[u8]) -> &[u8] {
    let mut remaining = input;
    loop {
        let before = remaining.len();
        remaining = &remaining[remaining.iter().take_while(|&&c| is_whitespace(c)).count()..];
        if let Ok((rest, _)) = comment(remaining) {
            remaining = rest;
        }
        if remaining.len() == before {
            return remaining;
        }
    }
}

/// Integer or real.
///
/// PDF allows a leading sign and a missing integer or fractional part:
/// `+17`, `-.002`, `5.` are all valid. Exponents are not.
fn parse_number(input: &[u8]) -> IResult<&[u8], Token<'_>> {
    let (rest, text) = recognize(tuple((
        opt(one_of("+-")),
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit0)))),
            recognize(pair(char('.'), digit1)),
        )),
    )))(input)?;

    let number_error =
        || nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Digit));
    let text = std::str::from_utf8(text).map_err(|_| number_error())?;

    if !text.contains('.') {
        if let Ok(int) = text.trim_start_matches('+').parse::<i64>() {
            return Ok((rest, Token::Integer(int)));
        }
        // Out-of-range integers degrade to reals
    }
    let real: Decimal = text.parse().map_err(|_| number_error())?;
    Ok((rest, Token::Real(real)))
}

/// Literal string with balanced parentheses; escapes are kept raw.
fn parse_literal_string(input: &[u8]) -> IResult<&[u8], Token<'_>> {
    let (body, _) = char('(')(input)?;
    let mut depth = 1usize;
    let mut pos = 0;

    while pos < body.len() {
        match body[pos] {
            b'\\' => pos += 2,
            b'(' => {
                depth += 1;
                pos += 1;
            },
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&body[pos + 1..], Token::LiteralString(&body[..pos])));
                }
                pos += 1;
            },
            _ => pos += 1,
        }
    }

    Err(nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Tag)))
}

fn parse_hex_string(input: &[u8]) -> IResult<&[u8], Token<'_>> {
    if input.starts_with(b"<<") {
        return Err(nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Tag)));
    }
    delimited(
        char('<'),
        map(
            take_while(|c: u8| c.is_ascii_hexdigit() || is_whitespace(c)),
            Token::HexString,
        ),
        char('>'),
    )(input)
}

/// Decode `#XX` escape sequences in a name. Invalid sequences are kept literally.
///
/// Names are held as text. When the decoded bytes are not UTF-8, each byte
/// becomes the Latin-1 character of the same value, so `/A#E9` reads as
/// `"Aé"` and is written back as `/A#C3#A9`. The name is stable from then on,
/// but the original byte sequence is not preserved.
///
/// ```
/// # use pdf_graph::lexer::decode_name_escapes;
/// assert_eq!(decode_name_escapes(b"A#20B#23C"), "A B#C");
/// assert_eq!(decode_name_escapes(b"A#"), "A#");
/// ```
pub fn decode_name_escapes(raw: &[u8]) -> String {
    let mut bytes = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        if raw[i] == b'#' && i + 2 < raw.len() {
            let hex = std::str::from_utf8(&raw[i + 1..i + 3]).ok();
            if let Some(byte) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                bytes.push(byte);
                i += 3;
                continue;
            }
        }
        bytes.push(raw[i]);
        i += 1;
    }
    String::from_utf8(bytes)
        .unwrap_or_else(|e| e.into_bytes().iter().map(|&b| b as char).collect())
}

fn parse_name(input: &[u8]) -> IResult<&[u8], Token<'_>> {
    preceded(
        char('/'),
        map(take_while(is_regular), |raw| Token::Name(decode_name_escapes(raw))),
    )(input)
}

fn parse_delimiter(input: &[u8]) -> IResult<&[u8], Token<'_>> {
    alt((
        value(Token::DictStart, tag(b"<<")),
        value(Token::DictEnd, tag(b">>")),
        value(Token::ArrayStart, tag(b"[")),
        value(Token::ArrayEnd, tag(b"]")),
        // PostScript calculator braces only appear in type 4 functions
        map(alt((tag(b"{"), tag(b"}"))), Token::Keyword),
    ))(input)
}

fn parse_word(input: &[u8]) -> IResult<&[u8], Token<'_>> {
    map(take_while1(is_regular), |word: &[u8]| match word {
        b"true" => Token::True,
        b"false" => Token::False,
        b"null" => Token::Null,
        other => Token::Keyword(other),
    })(input)
}

/// Parse one token after skipping whitespace and comments.
///
/// Numbers are tried before bare words so `-1` is a number, but a word such
/// as `d0` or `T*` falls through to a keyword.
pub fn token(input: &[u8]) -> IResult<&[u8], Token<'_>> {
    let input = skip_ws(input);
    alt((
        parse_delimiter,
        parse_name,
        number_token,
        parse_literal_string,
        parse_hex_string,
        parse_word,
    ))(input)
}

/// A number only counts when it is not the prefix of a longer word.
fn number_token(input: &[u8]) -> IResult<&[u8], Token<'_>> {
    let (rest, tok) = parse_number(input)?;
    match rest.first() {
        Some(&c) if is_regular(c) => {
            Err(nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Digit)))
        },
        _ => Ok((rest, tok)),
    }
}
