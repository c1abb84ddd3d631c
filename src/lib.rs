#![allow(clippy::type_complexity)]
#![allow(clippy::should_implement_trait)]
#![cfg_attr(test, allow(dead_code))]

//! # PDF Graph
//!
//! In-memory PDF object graph with structural equality, bounded
//! representation, content-stream grouping and a list-like page API.
//!
//! ## Core Features
//!
//! - **Object model**: nine PDF value kinds plus streams, operators and
//!   inline images, held in a per-document arena addressed by `N G R`
//! - **Structural equality**: cycle-safe comparison across indirect
//!   references, numeric families and text-string encodings
//! - **Representation**: deterministic, bounded source-like rendering that
//!   marks cycles and elides very large graphs
//! - **Content streams**: tokenizer, whitelist-aware operand grouper with
//!   inline-image folding, and the inverse serializer
//! - **Pages**: Python-style indexing and slicing over the page ordering,
//!   with copy semantics for pages that are already present
//! - **Paths**: `.A.B[0]` lookups with precise failure diagnostics
//! - **Marshalling**: conversion to and from plain host values and JSON
//!
//! ## Quick Start
//!
//! ```
//! use pdf_graph::{equal, Document, Object};
//!
//! let mut doc = Document::new();
//! let page = doc
//!     .pages()
//!     .append(Object::dictionary([
//!         ("Type", Object::name("Page")),
//!         ("Rotate", Object::Integer(90)),
//!     ]))
//!     .unwrap();
//!
//! let node = page.node(&doc).unwrap();
//! assert!(equal(node, node));
//! assert_eq!(doc.page_count(), 1);
//! ```

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Object model and arena
pub mod document;
pub mod node;
pub mod numeric;
pub mod object;
pub mod text;

// Stream payloads
pub mod filters;

// Lexing and operand parsing
pub mod lexer;
pub mod parser;

// Graph algorithms
pub mod equality;
mod recursion;
pub mod repr;

// Content streams
pub mod content;

// Page list
pub mod pages;

// Object paths
pub mod path;

// Host value and JSON conversion
pub mod marshal;

// Re-exports
pub use config::GraphOptions;
pub use content::{
    parse_content_stream, unparse, ContentItem, GroupedContent, InlineImage, Instruction,
};
pub use document::{Document, DocumentId};
pub use equality::{equal, equal_with};
pub use error::{Error, Result};
pub use marshal::HostValue;
pub use node::Node;
pub use numeric::Decimal;
pub use object::{Dictionary, Object, ObjectRef, ObjectType};
pub use pages::{PageInput, PageRef, Pages, SliceSpec};
pub use path::{ObjectPath, PathStep};
pub use repr::{represent, represent_with};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
