//! Integration tests for structural equality across the object graph.

use pdf_graph::equality::{equal, equal_with, objects_equal};
use pdf_graph::node::Node;
use pdf_graph::object::{Dictionary, Object, ObjectRef};
use pdf_graph::text::encode_utf16be;
use pdf_graph::{Document, GraphOptions};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

mod cycle_tests {
    use super::*;

    #[test]
    fn test_self_referential_dictionary_is_reflexive() {
        init();
        let mut doc = Document::new();
        let a = doc.add_object(Object::dictionary([("Name", Object::name("A"))]));
        doc.set_key(a, "Me", Object::Reference(a)).unwrap();

        assert!(equal(doc.node(a), doc.node(a)));
    }

    #[test]
    fn test_isomorphic_cycles_are_equal() {
        init();
        let mut doc = Document::new();
        let a = doc.add_object(Object::dictionary([("V", Object::Integer(1))]));
        let b = doc.add_object(Object::dictionary([("V", Object::Integer(1))]));
        doc.set_key(a, "Next", Object::Reference(b)).unwrap();
        doc.set_key(b, "Next", Object::Reference(a)).unwrap();

        let c = doc.add_object(Object::dictionary([("V", Object::Integer(1))]));
        doc.set_key(c, "Next", Object::Reference(c)).unwrap();

        assert!(equal(doc.node(a), doc.node(b)));
        assert!(equal(doc.node(a), doc.node(c)));
    }

    #[test]
    fn test_cycles_with_different_payload_differ() {
        let mut doc = Document::new();
        let a = doc.add_object(Object::dictionary([("V", Object::Integer(1))]));
        let b = doc.add_object(Object::dictionary([("V", Object::Integer(2))]));
        doc.set_key(a, "Next", Object::Reference(a)).unwrap();
        doc.set_key(b, "Next", Object::Reference(b)).unwrap();

        assert!(!equal(doc.node(a), doc.node(b)));
    }

    #[test]
    fn test_equal_across_documents() {
        let mut left = Document::new();
        let mut right = Document::new();
        let page = || {
            Object::dictionary([
                ("Type", Object::name("Page")),
                ("Rotate", Object::Integer(90)),
            ])
        };
        let l = left.push_page(page()).unwrap();
        let r = right.push_page(page()).unwrap();

        // Both /Parent links lead to structurally identical page trees
        assert!(equal(left.node(l), right.node(r)));
    }
}

mod scalar_tests {
    use super::*;

    #[test]
    fn test_numeric_family_compares_by_value() {
        assert!(objects_equal(&Object::Integer(2), &Object::real(2.0)));
        assert!(objects_equal(&Object::real(0.5), &Object::real(0.5)));
        assert!(objects_equal(&Object::Boolean(false), &Object::Integer(0)));
        assert!(!objects_equal(&Object::Integer(2), &Object::real(2.5)));
        assert!(!objects_equal(&Object::Integer(i64::MAX), &Object::real(i64::MAX as f64)));
    }

    #[test]
    fn test_utf16_and_narrow_strings_are_equal() {
        let narrow = Object::String(b"hello".to_vec());
        let wide = Object::String(encode_utf16be("hello"));
        assert_ne!(narrow, wide);
        assert!(objects_equal(&narrow, &wide));
        assert!(!objects_equal(&narrow, &Object::String(encode_utf16be("hellO"))));
    }

    #[test]
    fn test_binary_strings_compare_bytes() {
        let a = Object::String(vec![0x9F, 0x01]);
        let b = Object::String(vec![0x9F, 0x01]);
        let c = Object::String(vec![0x9F, 0x02]);
        assert!(objects_equal(&a, &b));
        assert!(!objects_equal(&a, &c));
    }

    #[test]
    fn test_distinct_kinds_are_unequal() {
        assert!(!objects_equal(&Object::name("A"), &Object::String(b"A".to_vec())));
        assert!(!objects_equal(&Object::Null, &Object::Integer(0)));
        assert!(!objects_equal(&Object::Array(vec![]), &Object::Dictionary(Dictionary::new())));
    }

    #[test]
    fn test_unresolvable_reference_is_not_equal_to_itself() {
        let doc = Document::new();
        let missing = doc.node(ObjectRef::new(999, 0));
        assert!(!equal(missing, missing));
    }
}

mod container_tests {
    use super::*;

    #[test]
    fn test_dictionary_order_does_not_matter() {
        let a = Object::dictionary([("A", Object::Integer(1)), ("B", Object::Integer(2))]);
        let b = Object::dictionary([("B", Object::Integer(2)), ("A", Object::Integer(1))]);
        assert!(objects_equal(&a, &b));
    }

    #[test]
    fn test_array_order_matters() {
        let a = Object::Array(vec![Object::Integer(1), Object::Integer(2)]);
        let b = Object::Array(vec![Object::Integer(2), Object::Integer(1)]);
        assert!(!objects_equal(&a, &b));
    }

    #[test]
    fn test_indirect_and_direct_children_compare_structurally() {
        let mut doc = Document::new();
        let inner = doc.add_object(Object::Array(vec![Object::Integer(7)]));
        let via_ref = doc.add_object(Object::dictionary([("X", Object::Reference(inner))]));
        let inline = doc.add_object(Object::dictionary([(
            "X",
            Object::Array(vec![Object::real(7.0)]),
        )]));
        assert!(equal(doc.node(via_ref), doc.node(inline)));
    }

    #[test]
    fn test_streams_compare_payload_bytes() {
        let mut doc = Document::new();
        let a = doc.add_stream(Dictionary::new(), b"q Q".to_vec());
        let b = doc.add_stream(Dictionary::new(), b"q Q".to_vec());
        let c = doc.add_stream(Dictionary::new(), b"Q q".to_vec());
        assert!(equal(doc.node(a), doc.node(b)));
        assert!(!equal(doc.node(a), doc.node(c)));
    }

    #[test]
    fn test_depth_limit_yields_not_equal() {
        fn nested(depth: usize) -> Object {
            let mut obj = Object::Integer(0);
            for _ in 0..depth {
                obj = Object::Array(vec![obj]);
            }
            obj
        }
        let a = nested(50);
        let b = nested(50);
        assert!(objects_equal(&a, &b));

        let options = GraphOptions::default().with_max_recursion_depth(10);
        assert!(!equal_with(Node::direct(&a), Node::direct(&b), &options));
    }
}
