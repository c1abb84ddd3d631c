//! Human-readable rendering of objects.
//!
//! The output reads like a constructor expression:
//!
//! ```text
//! Dictionary(Type="/Page")({
//!   "/MediaBox": [ 0, 0, 612, 792 ],
//!   "/Rotate": 90
//! })
//! ```
//!
//! When the rendering cannot be read back as such an expression it is
//! wrapped in `<...>`. That happens when the walk meets an indirect object a
//! second time (rendered as `<ref N G R>`), elides content past the object
//! ceiling (rendered as `...`), reaches a stream, or shortcuts a page's
//! `/Parent` link.

use crate::config::GraphOptions;
use crate::node::{Identity, Node};
use crate::object::Object;
use crate::recursion::DepthCounter;
use crate::text::decode_text_string;
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::fmt::Write;

const INDENT: &str = "  ";

/// Render a node with default options.
pub fn represent(node: Node<'_>) -> String {
    represent_with(node, &GraphOptions::default())
}

/// Render a detached object.
pub fn represent_object(obj: &Object) -> String {
    represent(Node::direct(obj))
}

/// Render a node.
pub fn represent_with(node: Node<'_>, options: &GraphOptions) -> String {
    let Some(obj) = node.resolve() else {
        return unresolved_marker(node);
    };

    let renderer = Renderer {
        options,
        visited: RefCell::new(HashSet::new()),
        object_count: Cell::new(0),
        pure: Cell::new(true),
        depth: DepthCounter::new(options.max_recursion_depth),
    };

    let output = match obj {
        Object::Dictionary(_) => {
            let inner = renderer.render(node, 0, 0);
            format!("{}({})", dictionary_typename(node), inner)
        },
        Object::Array(_) => format!("Array({})", renderer.render(node, 0, 0)),
        _ => renderer.render(node, 0, 0),
    };

    if renderer.pure.get() {
        output
    } else {
        format!("<{}>", output)
    }
}

fn unresolved_marker(node: Node<'_>) -> String {
    match node.objgen() {
        Some(r) => format!("<unresolved reference {}>", r),
        None => "<unresolved>".to_string(),
    }
}

fn dictionary_typename(node: Node<'_>) -> String {
    match node.pdf_type() {
        Some(t) => format!("Dictionary(Type={:?})", format!("/{}", t)),
        None => "Dictionary".to_string(),
    }
}

struct Renderer<'o> {
    options: &'o GraphOptions,
    visited: RefCell<HashSet<Identity>>,
    object_count: Cell<usize>,
    pure: Cell<bool>,
    depth: DepthCounter,
}

impl Renderer<'_> {
    fn impure(&self) {
        self.pure.set(false);
    }

    fn render(&self, node: Node<'_>, level: usize, indent: usize) -> String {
        let Some(obj) = node.resolve() else {
            self.impure();
            return unresolved_marker(node);
        };

        if !matches!(
            obj,
            Object::Array(_) | Object::Dictionary(_) | Object::Stream { .. }
        ) {
            return self.scalar(obj);
        }

        if node.is_indirect() {
            if let (Some(id), Some(objgen)) = (node.identity(), node.objgen()) {
                if !self.visited.borrow_mut().insert(id) {
                    self.impure();
                    return format!("<ref {}>", objgen);
                }
            }
        }

        let count = self.object_count.get() + 1;
        self.object_count.set(count);
        if level > 0 && count > self.options.repr_max_objects {
            self.impure();
            return "...".to_string();
        }

        let Ok(_guard) = self.depth.enter() else {
            self.impure();
            return "...".to_string();
        };

        match obj {
            Object::Array(_) => self.render_array(node, level, indent),
            Object::Stream { data, .. } => {
                self.impure();
                let owner = node
                    .owner()
                    .map_or_else(|| "None".to_string(), |doc| format!("<document {}>", doc.id()));
                let objgen = node
                    .objgen()
                    .map_or_else(|| "None".to_string(), |r| format!("({}, {})", r.id, r.gen));
                let peek_len = data.len().min(self.options.repr_peek_bytes);
                let mut peek = byte_literal(&data[..peek_len]);
                if data.len() > peek_len {
                    peek.push_str("...");
                }
                format!(
                    "Stream(owner={}, objgen={}, data={}, {})",
                    owner,
                    objgen,
                    peek,
                    self.render_dict(node, level, indent)
                )
            },
            _ => self.render_dict(node, level, indent),
        }
    }

    fn render_dict(&self, node: Node<'_>, level: usize, indent: usize) -> String {
        let mut entries = node.entries();
        if entries.is_empty() {
            return "{}".to_string();
        }
        entries.sort_by(|a, b| a.0.cmp(b.0));

        let inner_indent = INDENT.repeat(indent + 1);
        let mut out = String::from("{\n");
        for (i, (key, value)) in entries.into_iter().enumerate() {
            if i > 0 {
                out.push_str(",\n");
            }
            let rendered = if key == "Parent" && value.pdf_type() == Some("Pages") {
                self.impure();
                "<reference to /Pages>".to_string()
            } else {
                self.render(value, level + 1, indent + 1)
            };
            let _ = write!(out, "{}{:?}: {}", inner_indent, format!("/{}", key), rendered);
        }
        out.push('\n');
        out.push_str(&INDENT.repeat(indent));
        out.push('}');
        out
    }

    fn render_array(&self, node: Node<'_>, level: usize, indent: usize) -> String {
        let items = node.items();
        if items.is_empty() {
            return "[]".to_string();
        }
        let rendered: Vec<String> = items
            .into_iter()
            .map(|item| self.render(item, level + 1, indent))
            .collect();
        format!("[ {} ]", rendered.join(", "))
    }

    fn scalar(&self, obj: &Object) -> String {
        match obj {
            Object::InlineImage(image) => {
                self.impure();
                format!(
                    "InlineImage({} metadata operands, {} bytes)",
                    image.metadata.len(),
                    image.data.len()
                )
            },
            other => scalar_literal(other),
        }
    }
}

/// Literal form of a scalar or operator.
fn scalar_literal(obj: &Object) -> String {
    match obj {
        Object::Null => "null".to_string(),
        Object::Boolean(b) => b.to_string(),
        Object::Integer(i) => i.to_string(),
        Object::Real(r) => format!("Decimal('{}')", r),
        Object::Name(n) => format!("Name({:?})", format!("/{}", n)),
        Object::String(bytes) => match decode_text_string(bytes) {
            Some(text) => format!("String({:?})", text),
            None => format!("String({})", byte_literal(bytes)),
        },
        Object::Operator(op) => format!("Operator({:?})", op),
        Object::Reference(r) => format!("<unresolved reference {}>", r),
        other => other.type_name().to_string(),
    }
}

/// `b"..."` literal with non-printable bytes escaped.
fn byte_literal(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 3);
    out.push_str("b\"");
    for &b in bytes {
        match b {
            b'"' => out.push_str("\\\""),
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            0x20..=0x7E => out.push(b as char),
            _ => {
                let _ = write!(out, "\\x{:02x}", b);
            },
        }
    }
    out.push('"');
    out
}
