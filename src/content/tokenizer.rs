//! Lexical tokenization of content streams.
//!
//! Produces the flat token sequence the grouper consumes: operand objects
//! interleaved with [`Object::Operator`] tokens. Inline image data cannot be
//! lexed as objects, so after an `ID` operator the raw bytes up to the
//! matching `EI` are emitted as one [`Object::InlineImage`] token with empty
//! metadata.

use crate::content::instruction::InlineImage;
use crate::error::{Error, Result};
use crate::lexer::{is_delimiter, is_whitespace, skip_ws, token, Token};
use crate::object::Object;
use crate::parser::{is_nesting_error, parse_operand};
use bytes::Bytes;

/// Tokenize content-stream bytes.
///
/// # Example
///
/// ```
/// use pdf_graph::content::tokenize;
/// use pdf_graph::object::Object;
///
/// let tokens = tokenize(b"/F1 12 Tf").unwrap();
/// assert_eq!(
///     tokens,
///     vec![Object::name("F1"), Object::Integer(12), Object::operator("Tf")]
/// );
/// ```
///
/// # Errors
///
/// [`Error::ParseError`] with the byte offset of the first token that cannot
/// be lexed, or of inline image data with no terminating `EI`.
pub fn tokenize(data: &[u8]) -> Result<Vec<Object>> {
    let mut tokens = Vec::new();
    let mut input = data;

    loop {
        input = skip_ws(input);
        if input.is_empty() {
            break;
        }
        let offset = data.len() - input.len();

        let (rest, tok) = token(input).map_err(|_| Error::ParseError {
            offset,
            reason: "unrecognized token".to_string(),
        })?;

        let Token::Keyword(word) = tok else {
            let (rest, operand) = parse_operand(input).map_err(|e| Error::ParseError {
                offset,
                reason: if is_nesting_error(&e) {
                    "nesting too deep".to_string()
                } else {
                    "malformed operand".to_string()
                },
            })?;
            tokens.push(operand);
            input = rest;
            continue;
        };

        tokens.push(Object::Operator(String::from_utf8_lossy(word).into_owned()));
        input = rest;

        if word == b"ID" {
            let (image_data, after) =
                split_inline_image_data(input).ok_or_else(|| Error::ParseError {
                    offset: data.len() - input.len(),
                    reason: "inline image data is not terminated by EI".to_string(),
                })?;
            log::debug!("Inline image data: {} bytes at offset {}", image_data.len(), offset);
            tokens.push(Object::InlineImage(Box::new(InlineImage::new(
                Vec::new(),
                Bytes::copy_from_slice(image_data),
            ))));
            input = after;
        }
    }

    Ok(tokens)
}

/// Split the bytes following `ID` into image data and the remainder, which
/// starts at `EI`.
///
/// One whitespace byte after `ID` separates the operator from the data. The
/// data ends at the first whitespace that is followed by `EI` and then by
/// whitespace, a delimiter or end of input.
fn split_inline_image_data(input: &[u8]) -> Option<(&[u8], &[u8])> {
    let start = match input.first() {
        Some(&c) if is_whitespace(c) => 1,
        _ => 0,
    };
    let body = &input[start..];

    if is_ei_at(body, 0) {
        return Some((&body[..0], body));
    }
    (0..body.len())
        .find(|&i| is_whitespace(body[i]) && is_ei_at(body, i + 1))
        .map(|i| (&body[..i], &body[i + 1..]))
}

fn is_ei_at(input: &[u8], pos: usize) -> bool {
    input.len() >= pos + 2
        && &input[pos..pos + 2] == b"EI"
        && input
            .get(pos + 2)
            .map_or(true, |&c| is_whitespace(c) || is_delimiter(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operands_and_operators() {
        let tokens = tokenize(b"q 1 0 0 1 0 0 cm /Im0 Do Q").unwrap();
        assert_eq!(tokens.len(), 11);
        assert_eq!(tokens[0], Object::operator("q"));
        assert_eq!(tokens[7], Object::operator("cm"));
        assert_eq!(tokens[8], Object::name("Im0"));
        assert_eq!(tokens[10], Object::operator("Q"));
    }

    #[test]
    fn test_text_operators() {
        let tokens = tokenize(b"BT [(A) -120 (B)] TJ (x) ' ET").unwrap();
        assert_eq!(tokens[0], Object::operator("BT"));
        assert!(matches!(tokens[1], Object::Array(ref items) if items.len() == 3));
        assert_eq!(tokens[2], Object::operator("TJ"));
        assert_eq!(tokens[4], Object::operator("'"));
    }

    #[test]
    fn test_inline_image_data_token() {
        let tokens = tokenize(b"BI /W 2 /H 1 ID \x00EI\xff\nEI Q").unwrap();
        let ops: Vec<_> = tokens.iter().filter_map(Object::as_operator).collect();
        assert_eq!(ops, vec!["BI", "ID", "EI", "Q"]);
        let image = tokens
            .iter()
            .find_map(|t| match t {
                Object::InlineImage(image) => Some(image),
                _ => None,
            })
            .unwrap();
        assert_eq!(&image.data[..], b"\x00EI\xff");
        assert!(image.metadata.is_empty());
    }

    #[test]
    fn test_empty_inline_image_data() {
        let tokens = tokenize(b"BI ID\nEI").unwrap();
        assert!(matches!(tokens[2], Object::InlineImage(ref image) if image.data.is_empty()));
        assert_eq!(tokens[3], Object::operator("EI"));
    }

    #[test]
    fn test_unterminated_inline_image() {
        assert!(matches!(
            tokenize(b"BI /W 1 ID abc"),
            Err(Error::ParseError { .. })
        ));
    }

    #[test]
    fn test_bad_token_reports_offset() {
        match tokenize(b"q ) Q") {
            Err(Error::ParseError { offset, .. }) => assert_eq!(offset, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
