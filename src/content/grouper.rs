//! Operand grouping.
//!
//! Turns the flat token sequence from [`tokenize`](super::tokenize) into
//! instructions. Operands accumulate in a buffer until an operator arrives;
//! the operator either consumes the buffer into an instruction or, when it is
//! filtered out by a whitelist, discards it. `BI`, `ID` and `EI` drive a small
//! state machine that folds an inline image into a single record.

use crate::config::GraphOptions;
use crate::content::instruction::{ContentItem, InlineImage, Instruction};
use crate::content::tokenizer::tokenize;
use crate::document::Document;
use crate::error::Result;
use crate::object::{Object, ObjectRef};
use bytes::Bytes;
use std::mem;

/// Warning reported when operands are left over at the end of the tokens.
pub const UNEXPECTED_END_OF_STREAM: &str = "Unexpected end of stream";

/// Result of grouping: the instructions plus a recoverable warning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedContent {
    /// Grouped records, in stream order
    pub items: Vec<ContentItem>,
    /// Set when the tokens ended with operands that no operator consumed
    pub warning: Option<String>,
}

impl GroupedContent {
    /// Number of grouped records.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when nothing was grouped.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Ordinary instructions, skipping inline images.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.items.iter().filter_map(ContentItem::as_instruction)
    }

    /// Inline images, skipping ordinary instructions.
    pub fn inline_images(&self) -> impl Iterator<Item = &InlineImage> {
        self.items.iter().filter_map(ContentItem::as_inline_image)
    }
}

/// Group tokens with default options.
///
/// # Example
///
/// ```
/// use pdf_graph::content::{group, tokenize};
///
/// let tokens = tokenize(b"q 1 0 0 1 0 0 cm /Im0 Do Q").unwrap();
/// let grouped = group(tokens, Some(&["cm"]));
/// assert_eq!(grouped.len(), 1);
/// assert_eq!(grouped.items[0].operator(), "cm");
/// ```
pub fn group(tokens: Vec<Object>, whitelist: Option<&[&str]>) -> GroupedContent {
    group_with(tokens, whitelist, &GraphOptions::default())
}

/// Group tokens.
///
/// With a whitelist, operators outside it produce no record and their
/// operands are dropped. When `options.pair_save_restore` is set, `q` and `Q`
/// are admitted or filtered together.
pub fn group_with(
    tokens: Vec<Object>,
    whitelist: Option<&[&str]>,
    options: &GraphOptions,
) -> GroupedContent {
    let mut grouper = OperandGrouper::new(whitelist, options.pair_save_restore);
    for token in tokens {
        grouper.handle_token(token);
    }
    grouper.finish()
}

/// Tokenize and group content-stream bytes.
pub fn parse_content_stream(data: &[u8], whitelist: Option<&[&str]>) -> Result<GroupedContent> {
    Ok(group(tokenize(data)?, whitelist))
}

/// Tokenize and group the content of a page (all of its `/Contents`
/// streams) or of a single content stream.
pub fn parse_page_content(
    doc: &Document,
    page_or_stream: ObjectRef,
    whitelist: Option<&[&str]>,
) -> Result<GroupedContent> {
    let bytes = doc.content_bytes(page_or_stream)?;
    parse_content_stream(&bytes, whitelist)
}

struct OperandGrouper<'w> {
    whitelist: Option<&'w [&'w str]>,
    pair_save_restore: bool,
    tokens: Vec<Object>,
    items: Vec<ContentItem>,
    parsing_inline_image: bool,
    inline_metadata: Vec<Object>,
}

impl<'w> OperandGrouper<'w> {
    fn new(whitelist: Option<&'w [&'w str]>, pair_save_restore: bool) -> Self {
        Self {
            whitelist,
            pair_save_restore,
            tokens: Vec::new(),
            items: Vec::new(),
            parsing_inline_image: false,
            inline_metadata: Vec::new(),
        }
    }

    fn admits(&self, op: &str) -> bool {
        let Some(whitelist) = self.whitelist else {
            return true;
        };
        if whitelist.contains(&op) {
            return true;
        }
        self.pair_save_restore
            && (op == "q" || op == "Q")
            && (whitelist.contains(&"q") || whitelist.contains(&"Q"))
    }

    fn handle_token(&mut self, token: Object) {
        match token {
            Object::Operator(op) => self.handle_operator(op),
            operand => self.tokens.push(operand),
        }
    }

    fn handle_operator(&mut self, op: String) {
        if !self.admits(&op) {
            self.tokens.clear();
            return;
        }

        match op.as_str() {
            "BI" => self.parsing_inline_image = true,
            "ID" if self.parsing_inline_image => {
                self.inline_metadata = mem::take(&mut self.tokens);
            },
            "EI" if self.parsing_inline_image => {
                let data = match self.tokens.first() {
                    Some(Object::InlineImage(image)) => image.data.clone(),
                    _ => {
                        log::warn!("Inline image ended without image data");
                        Bytes::new()
                    },
                };
                let metadata = mem::take(&mut self.inline_metadata);
                self.items
                    .push(ContentItem::InlineImage(InlineImage::new(metadata, data)));
                self.parsing_inline_image = false;
            },
            _ if self.parsing_inline_image => {
                log::debug!("Dropping operator {} inside inline image", op);
            },
            _ => {
                let operands = mem::take(&mut self.tokens);
                self.items.push(ContentItem::Instruction(Instruction::new(operands, op)));
            },
        }
        self.tokens.clear();
    }

    fn finish(self) -> GroupedContent {
        let warning = if self.tokens.is_empty() {
            None
        } else {
            log::warn!(
                "{}: {} trailing operand(s) not consumed by an operator",
                UNEXPECTED_END_OF_STREAM,
                self.tokens.len()
            );
            Some(UNEXPECTED_END_OF_STREAM.to_string())
        };
        GroupedContent {
            items: self.items,
            warning,
        }
    }
}
