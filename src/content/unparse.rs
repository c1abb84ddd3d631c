//! Content-stream serialization.
//!
//! Operands are written in content-stream syntax (ISO 32000-1:2008, 7.3):
//! reals without exponents, strings as literals when printable and as hex
//! otherwise, names with `#XX` escapes. Records are joined by a single
//! newline with no leading or trailing separator.

use crate::content::instruction::{ContentItem, InlineImage, Instruction, INLINE_IMAGE_OPERATOR};
use crate::error::{Error, Result};
use crate::lexer::is_regular;
use crate::object::Object;
use std::io::Write;

/// A record accepted by [`unparse`].
#[derive(Debug, Clone, PartialEq)]
pub enum ContentRecord {
    /// A grouped instruction
    Instruction(Instruction),
    /// A grouped inline image
    InlineImage(InlineImage),
    /// Loose operands plus an operator spelled as an [`Object::Operator`]
    /// or as a text [`Object::String`]
    Pair {
        /// Operands
        operands: Vec<Object>,
        /// Operator token
        operator: Object,
    },
    /// A two-element array `[[operands...] operator]`
    Tuple(Object),
}

impl From<Instruction> for ContentRecord {
    fn from(inst: Instruction) -> Self {
        ContentRecord::Instruction(inst)
    }
}

impl From<InlineImage> for ContentRecord {
    fn from(image: InlineImage) -> Self {
        ContentRecord::InlineImage(image)
    }
}

impl From<ContentItem> for ContentRecord {
    fn from(item: ContentItem) -> Self {
        match item {
            ContentItem::Instruction(inst) => ContentRecord::Instruction(inst),
            ContentItem::InlineImage(image) => ContentRecord::InlineImage(image),
        }
    }
}

impl From<&ContentItem> for ContentRecord {
    fn from(item: &ContentItem) -> Self {
        ContentRecord::from(item.clone())
    }
}

impl From<(Vec<Object>, Object)> for ContentRecord {
    fn from((operands, operator): (Vec<Object>, Object)) -> Self {
        ContentRecord::Pair { operands, operator }
    }
}

/// Serialize records into content-stream bytes.
///
/// # Example
///
/// ```
/// use pdf_graph::content::{unparse, ContentRecord, KnownOperator};
/// use pdf_graph::object::Object;
///
/// let records = vec![
///     ContentRecord::from((vec![], Object::from(KnownOperator::SaveState))),
///     ContentRecord::from((vec![Object::name("Im0")], Object::operator("Do"))),
///     ContentRecord::from((vec![], Object::operator("Q"))),
/// ];
/// assert_eq!(unparse(records).unwrap(), b"q\n/Im0 Do\nQ");
/// ```
///
/// # Errors
///
/// [`Error::Unparse`] names the ordinal position of the first record that
/// has the wrong shape: a tuple that is not a two-element array, an operator
/// that is not an operator or text, or an inline-image operator without
/// exactly one inline-image operand.
pub fn unparse<I, R>(records: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = R>,
    R: Into<ContentRecord>,
{
    let mut out = Vec::new();
    for (index, record) in records.into_iter().enumerate() {
        if index > 0 {
            out.push(b'\n');
        }
        let bytes = unparse_record(record.into()).map_err(|e| match e {
            Error::Unparse { reason, .. } => Error::Unparse { index, reason },
            other => Error::Unparse {
                index,
                reason: other.to_string(),
            },
        })?;
        out.extend_from_slice(&bytes);
    }
    Ok(out)
}

fn shape_error(reason: impl Into<String>) -> Error {
    Error::Unparse {
        index: 0,
        reason: reason.into(),
    }
}

fn unparse_record(record: ContentRecord) -> Result<Vec<u8>> {
    match record {
        ContentRecord::Instruction(inst) => {
            unparse_pair(inst.operands, &Object::Operator(inst.operator))
        },
        ContentRecord::InlineImage(image) => image.unparse(),
        ContentRecord::Pair { operands, operator } => unparse_pair(operands, &operator),
        ContentRecord::Tuple(Object::Array(mut parts)) if parts.len() == 2 => {
            let operator = parts.pop().unwrap_or(Object::Null);
            match parts.pop() {
                Some(Object::Array(operands)) => unparse_pair(operands, &operator),
                Some(other) => Err(shape_error(format!(
                    "operands must be an Array, found {}",
                    other.type_name()
                ))),
                None => Err(shape_error("expected (operands, operator) pair")),
            }
        },
        ContentRecord::Tuple(Object::Array(parts)) => Err(shape_error(format!(
            "expected (operands, operator) pair, found {} elements",
            parts.len()
        ))),
        ContentRecord::Tuple(other) => Err(shape_error(format!(
            "expected (operands, operator) pair, found {}",
            other.type_name()
        ))),
    }
}

fn operator_text(operator: &Object) -> Result<String> {
    match operator {
        Object::Operator(op) => Ok(op.clone()),
        Object::String(bytes) => String::from_utf8(bytes.clone())
            .map_err(|_| shape_error("operator text is not valid UTF-8")),
        other => Err(shape_error(format!(
            "operator must be an Operator or text, found {}",
            other.type_name()
        ))),
    }
}

fn unparse_pair(operands: Vec<Object>, operator: &Object) -> Result<Vec<u8>> {
    let op = operator_text(operator)?;
    if op == INLINE_IMAGE_OPERATOR {
        return match operands.as_slice() {
            [Object::InlineImage(image)] => image.unparse(),
            [other] => Err(shape_error(format!(
                "inline image operand must be an InlineImage, found {}",
                other.type_name()
            ))),
            _ => Err(shape_error(format!(
                "inline image takes exactly one operand, found {}",
                operands.len()
            ))),
        };
    }
    if op.is_empty() || !op.bytes().all(is_regular) {
        return Err(shape_error(format!("{:?} is not a valid operator", op)));
    }
    Instruction::new(operands, op).unparse()
}

/// Append the content-stream encoding of one operand.
pub(crate) fn write_operand(out: &mut Vec<u8>, obj: &Object) -> Result<()> {
    write_object(out, obj).map_err(|e| shape_error(e.to_string()))
}

fn write_object<W: Write>(w: &mut W, obj: &Object) -> std::io::Result<()> {
    match obj {
        Object::Null => write!(w, "null"),
        Object::Boolean(b) => write!(w, "{}", b),
        Object::Integer(i) => write!(w, "{}", i),
        Object::Real(r) => write!(w, "{}", r),
        Object::String(s) => write_string(w, s),
        Object::Name(n) => write_name(w, n),
        Object::Array(arr) => write_array(w, arr),
        Object::Dictionary(dict) => {
            write!(w, "<<")?;
            for (key, value) in dict {
                write!(w, " ")?;
                write_name(w, key)?;
                write!(w, " ")?;
                write_object(w, value)?;
            }
            write!(w, " >>")
        },
        Object::Reference(r) => write!(w, "{} {} R", r.id, r.gen),
        Object::Operator(op) => w.write_all(op.as_bytes()),
        Object::InlineImage(image) => {
            let bytes = image
                .unparse()
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
            w.write_all(&bytes)
        },
        Object::Stream { .. } => Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "streams cannot appear in a content stream",
        )),
    }
}

fn write_string<W: Write>(w: &mut W, data: &[u8]) -> std::io::Result<()> {
    let is_printable = data
        .iter()
        .all(|&b| b == b'\n' || b == b'\r' || b == b'\t' || (0x20..=0x7E).contains(&b));

    if is_printable {
        write!(w, "(")?;
        for &byte in data {
            match byte {
                b'(' => write!(w, "\\(")?,
                b')' => write!(w, "\\)")?,
                b'\\' => write!(w, "\\\\")?,
                b'\n' => write!(w, "\\n")?,
                b'\r' => write!(w, "\\r")?,
                b'\t' => write!(w, "\\t")?,
                _ => w.write_all(&[byte])?,
            }
        }
        write!(w, ")")
    } else {
        write!(w, "<")?;
        for byte in data {
            write!(w, "{:02X}", byte)?;
        }
        write!(w, ">")
    }
}

fn write_name<W: Write>(w: &mut W, name: &str) -> std::io::Result<()> {
    write!(w, "/")?;
    for byte in name.bytes() {
        if byte != b'#' && (0x21..=0x7E).contains(&byte) && is_regular(byte) {
            w.write_all(&[byte])?;
        } else {
            write!(w, "#{:02X}", byte)?;
        }
    }
    Ok(())
}

fn write_array<W: Write>(w: &mut W, arr: &[Object]) -> std::io::Result<()> {
    write!(w, "[")?;
    for (i, obj) in arr.iter().enumerate() {
        if i > 0 {
            write!(w, " ")?;
        }
        write_object(w, obj)?;
    }
    write!(w, "]")
}
