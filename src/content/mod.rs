//! Content-stream tokenization, grouping and serialization.
//!
//! A content stream is a flat sequence of operands and operators. This module
//! lexes it ([`tokenize`]), groups the tokens into instructions ([`group`])
//! and writes instructions back out ([`unparse`]).
//!
//! ```
//! use pdf_graph::content::{parse_content_stream, unparse};
//!
//! let grouped = parse_content_stream(b"q 2 0 0 2 0 0 cm /Im0 Do Q", None).unwrap();
//! assert_eq!(unparse(&grouped.items).unwrap(), b"q\n2 0 0 2 0 0 cm\n/Im0 Do\nQ");
//! ```

pub mod grouper;
pub mod instruction;
pub mod operators;
pub mod tokenizer;
pub mod unparse;

pub use grouper::{
    group, group_with, parse_content_stream, parse_page_content, GroupedContent,
    UNEXPECTED_END_OF_STREAM,
};
pub use instruction::{ContentItem, InlineImage, Instruction, INLINE_IMAGE_OPERATOR};
pub use operators::KnownOperator;
pub use tokenizer::tokenize;
pub use unparse::{unparse, ContentRecord};
