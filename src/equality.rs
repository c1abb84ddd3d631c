//! Structural equality over the object graph.
//!
//! Comparison rules, in order:
//! 1. Unrealized handles are unequal to everything, including themselves.
//! 2. Handles to the same underlying object are equal without looking inside.
//! 3. Booleans, integers and reals compare by exact numeric value.
//! 4. Different type tags are unequal.
//! 5. Names and operators compare by token text; strings are equal when
//!    their bytes match or when both decode to the same text.
//! 6. Arrays compare item by item, dictionaries key by key.
//! 7. Streams need equal dictionaries and the same payload buffer or
//!    byte-identical payloads. No filter is undone.
//!
//! Cycles are cut by a visited set of container pairs: a pair seen again
//! while it is being compared is assumed equal. Deep graphs are bounded by
//! the recursion limit in [`GraphOptions`]; hitting it yields "not equal".

use crate::config::GraphOptions;
use crate::node::{Identity, Node};
use crate::numeric;
use crate::object::Object;
use crate::recursion::DepthCounter;
use crate::text::decode_text_string;
use std::cell::RefCell;
use std::collections::HashSet;

/// Compare two nodes with default options.
///
/// # Example
///
/// ```
/// use pdf_graph::equality::equal;
/// use pdf_graph::node::Node;
/// use pdf_graph::object::Object;
///
/// let two = Object::Integer(2);
/// let two_point_oh = Object::real(2.0);
/// assert!(equal(Node::direct(&two), Node::direct(&two_point_oh)));
/// ```
pub fn equal(a: Node<'_>, b: Node<'_>) -> bool {
    equal_with(a, b, &GraphOptions::default())
}

/// Compare two nodes.
pub fn equal_with(a: Node<'_>, b: Node<'_>, options: &GraphOptions) -> bool {
    let comparator = Comparator {
        visited: RefCell::new(HashSet::new()),
        depth: DepthCounter::new(options.max_recursion_depth),
    };
    comparator.compare(a, b)
}

/// Compare two detached objects. References inside them are unrealized.
pub fn objects_equal(a: &Object, b: &Object) -> bool {
    equal(Node::direct(a), Node::direct(b))
}

/// Text-aware string comparison.
pub fn strings_equal(a: &[u8], b: &[u8]) -> bool {
    if a == b {
        return true;
    }
    match (decode_text_string(a), decode_text_string(b)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

struct Comparator {
    visited: RefCell<HashSet<(Identity, Identity)>>,
    depth: DepthCounter,
}

impl Comparator {
    fn compare(&self, a: Node<'_>, b: Node<'_>) -> bool {
        let (Some(lhs), Some(rhs)) = (a.resolve(), b.resolve()) else {
            return false;
        };
        if a.same_underlying(&b) {
            return true;
        }
        if let Some(result) = numeric::numeric_eq(lhs, rhs) {
            return result;
        }
        if lhs.type_tag() != rhs.type_tag() {
            return false;
        }

        match (lhs, rhs) {
            (Object::Null, Object::Null) => true,
            (Object::Name(x), Object::Name(y)) => x == y,
            (Object::Operator(x), Object::Operator(y)) => x == y,
            (Object::String(x), Object::String(y)) => strings_equal(x, y),
            (Object::InlineImage(x), Object::InlineImage(y)) => {
                x.data == y.data
                    && x.metadata.len() == y.metadata.len()
                    && x.metadata
                        .iter()
                        .zip(&y.metadata)
                        .all(|(m, n)| self.compare(Node::direct(m), Node::direct(n)))
            },
            _ => self.compare_containers(a, b),
        }
    }

    fn compare_containers(&self, a: Node<'_>, b: Node<'_>) -> bool {
        let (Some(id_a), Some(id_b)) = (a.identity(), b.identity()) else {
            return false;
        };
        if !self.visited.borrow_mut().insert((id_a, id_b)) {
            // Already under comparison further up: assume equal.
            return true;
        }
        match self.depth.enter() {
            Ok(_guard) => self.compare_children(a, b),
            Err(_) => false,
        }
    }

    fn compare_children(&self, a: Node<'_>, b: Node<'_>) -> bool {
        match (a.resolve(), b.resolve()) {
            (Some(Object::Array(_)), Some(Object::Array(_))) => {
                a.len() == b.len()
                    && a.items()
                        .into_iter()
                        .zip(b.items())
                        .all(|(x, y)| self.compare(x, y))
            },
            (Some(Object::Dictionary(_)), Some(Object::Dictionary(_))) => {
                self.compare_dicts(a, b)
            },
            (
                Some(Object::Stream { data: data_a, .. }),
                Some(Object::Stream { data: data_b, .. }),
            ) => {
                let same_buffer =
                    data_a.as_ptr() == data_b.as_ptr() && data_a.len() == data_b.len();
                self.compare_dicts(a, b) && (same_buffer || data_a == data_b)
            },
            _ => false,
        }
    }

    fn compare_dicts(&self, a: Node<'_>, b: Node<'_>) -> bool {
        let entries_a = a.entries();
        if entries_a.len() != b.len() {
            return false;
        }
        entries_a.into_iter().all(|(key, value)| match b.get(key) {
            Some(other) => self.compare(value, other),
            None => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::object::ObjectRef;

    #[test]
    fn test_numeric_family() {
        assert!(objects_equal(&Object::Integer(2), &Object::real(2.0)));
        assert!(objects_equal(&Object::Boolean(true), &Object::Integer(1)));
        assert!(!objects_equal(&Object::Integer(1), &Object::Integer(2)));
        assert!(!objects_equal(&Object::Integer(1), &Object::name("1")));
    }

    #[test]
    fn test_names_and_operators_do_not_mix() {
        assert!(objects_equal(&Object::name("cm"), &Object::name("cm")));
        assert!(!objects_equal(&Object::name("cm"), &Object::operator("cm")));
    }

    #[test]
    fn test_unrealized_is_never_equal() {
        let dangling = Object::Reference(ObjectRef::new(5, 0));
        assert!(!objects_equal(&dangling, &dangling));
        assert!(!objects_equal(&dangling, &Object::Null));
    }

    #[test]
    fn test_self_cycle_terminates() {
        let mut doc = Document::new();
        let r = doc.add_object(Object::dictionary([("A", Object::Integer(1))]));
        doc.set_key(r, "Self", Object::Reference(r)).unwrap();
        assert!(equal(doc.node(r), doc.node(r)));

        let r2 = doc.add_object(Object::dictionary([("A", Object::Integer(1))]));
        doc.set_key(r2, "Self", Object::Reference(r2)).unwrap();
        assert!(equal(doc.node(r), doc.node(r2)));
    }

    #[test]
    fn test_dict_key_sets_must_match() {
        let a = Object::dictionary([("A", Object::Integer(1))]);
        let b = Object::dictionary([("A", Object::Integer(1)), ("B", Object::Integer(2))]);
        let c = Object::dictionary([("B", Object::Integer(1))]);
        assert!(!objects_equal(&a, &b));
        assert!(!objects_equal(&a, &c));
    }

    #[test]
    fn test_depth_limit_degrades_to_unequal() {
        let mut a = Object::Array(vec![]);
        for _ in 0..50 {
            a = Object::Array(vec![a]);
        }
        let b = a.clone();
        let options = GraphOptions::default().with_max_recursion_depth(10);
        assert!(!equal_with(Node::direct(&a), Node::direct(&b), &options));
        assert!(equal(Node::direct(&a), Node::direct(&b)));
    }
}
