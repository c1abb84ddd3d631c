//! Grouped content-stream records.

use crate::content::operators::KnownOperator;
use crate::content::unparse::write_operand;
use crate::error::Result;
use crate::object::{Dictionary, Object};
use bytes::Bytes;
use std::fmt;

/// Operator value reported for inline-image records.
pub const INLINE_IMAGE_OPERATOR: &str = "INLINE IMAGE";

/// An inline image: the operands between `BI` and `ID`, plus the raw bytes
/// between `ID` and `EI`.
///
/// The tokenizer also uses this type for the bare data token it emits between
/// `ID` and `EI`; that token carries no metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineImage {
    /// Alternating key/value operands, e.g. `/W 8 /H 8 /BPC 8 /CS /G`
    pub metadata: Vec<Object>,
    /// Image payload, exactly as it appeared in the stream
    pub data: Bytes,
}

impl InlineImage {
    /// Create an inline image record.
    pub fn new(metadata: Vec<Object>, data: impl Into<Bytes>) -> Self {
        Self {
            metadata,
            data: data.into(),
        }
    }

    /// Metadata operands as a dictionary.
    ///
    /// Values not preceded by a name key are skipped.
    pub fn dictionary(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        let mut pending: Option<&str> = None;
        for obj in &self.metadata {
            match (pending.take(), obj) {
                (None, Object::Name(key)) => pending = Some(key.as_str()),
                (Some(key), value) => {
                    dict.insert(key.to_string(), value.clone());
                },
                (None, _) => {},
            }
        }
        dict
    }

    /// Serialize as `BI <metadata> ID <data> EI`.
    pub fn unparse(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.data.len() + 16 * self.metadata.len() + 12);
        out.extend_from_slice(b"BI\n");
        for (i, obj) in self.metadata.iter().enumerate() {
            if i > 0 {
                out.push(b' ');
            }
            write_operand(&mut out, obj)?;
        }
        out.extend_from_slice(b"\nID\n");
        out.extend_from_slice(&self.data);
        out.extend_from_slice(b"\nEI");
        Ok(out)
    }
}

/// Operands plus one operator.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// Operands, in stream order
    pub operands: Vec<Object>,
    /// Operator text, e.g. `cm`
    pub operator: String,
}

impl Instruction {
    /// Create an instruction.
    pub fn new(operands: Vec<Object>, operator: impl Into<String>) -> Self {
        Self {
            operands,
            operator: operator.into(),
        }
    }

    /// The operator as a standard operator, if it is one.
    pub fn known_operator(&self) -> Option<KnownOperator> {
        KnownOperator::from_keyword(&self.operator)
    }

    /// Serialize as `operand operand ... operator`.
    pub fn unparse(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        for operand in &self.operands {
            write_operand(&mut out, operand)?;
            out.push(b' ');
        }
        out.extend_from_slice(self.operator.as_bytes());
        Ok(out)
    }
}

impl From<KnownOperator> for Instruction {
    fn from(op: KnownOperator) -> Self {
        Instruction::new(Vec::new(), op.as_str())
    }
}

/// One grouped record of a content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentItem {
    /// Ordinary operator with operands
    Instruction(Instruction),
    /// `BI ... ID ... EI` block
    InlineImage(InlineImage),
}

impl ContentItem {
    /// Operator text; inline images report [`INLINE_IMAGE_OPERATOR`].
    pub fn operator(&self) -> &str {
        match self {
            ContentItem::Instruction(inst) => &inst.operator,
            ContentItem::InlineImage(_) => INLINE_IMAGE_OPERATOR,
        }
    }

    /// The ordinary instruction, if this is one.
    pub fn as_instruction(&self) -> Option<&Instruction> {
        match self {
            ContentItem::Instruction(inst) => Some(inst),
            ContentItem::InlineImage(_) => None,
        }
    }

    /// The inline image, if this is one.
    pub fn as_inline_image(&self) -> Option<&InlineImage> {
        match self {
            ContentItem::InlineImage(image) => Some(image),
            ContentItem::Instruction(_) => None,
        }
    }

    /// Serialize this record alone.
    pub fn unparse(&self) -> Result<Vec<u8>> {
        match self {
            ContentItem::Instruction(inst) => inst.unparse(),
            ContentItem::InlineImage(image) => image.unparse(),
        }
    }
}

impl From<Instruction> for ContentItem {
    fn from(inst: Instruction) -> Self {
        ContentItem::Instruction(inst)
    }
}

impl From<InlineImage> for ContentItem {
    fn from(image: InlineImage) -> Self {
        ContentItem::InlineImage(image)
    }
}

fn display_unparsed(f: &mut fmt::Formatter<'_>, unparsed: Result<Vec<u8>>) -> fmt::Result {
    match unparsed {
        Ok(bytes) => f.write_str(&String::from_utf8_lossy(&bytes)),
        Err(e) => write!(f, "<{}>", e),
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_unparsed(f, self.unparse())
    }
}

impl fmt::Display for InlineImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<inline image, {} metadata operands, {} bytes>",
            self.metadata.len(),
            self.data.len()
        )
    }
}

impl fmt::Display for ContentItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentItem::Instruction(inst) => fmt::Display::fmt(inst, f),
            ContentItem::InlineImage(image) => fmt::Display::fmt(image, f),
        }
    }
}
