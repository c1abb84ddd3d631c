//! Integration tests for the list-like page API.

use pdf_graph::object::{Object, ObjectRef};
use pdf_graph::pages::SliceSpec;
use pdf_graph::path::ObjectPath;
use pdf_graph::{equal, Document, Error};

fn page(label: i64) -> Object {
    Object::dictionary([
        ("Type", Object::name("Page")),
        ("Label", Object::Integer(label)),
    ])
}

fn document_with(labels: &[i64]) -> Document {
    let mut doc = Document::new();
    for &label in labels {
        doc.push_page(page(label)).unwrap();
    }
    doc
}

fn labels(doc: &Document) -> Vec<i64> {
    doc.page_refs()
        .iter()
        .map(|&r| {
            doc.get(r)
                .and_then(Object::as_dict)
                .and_then(|d| d.get("Label"))
                .and_then(Object::as_integer)
                .unwrap()
        })
        .collect()
}

fn kids(doc: &Document) -> Vec<ObjectRef> {
    doc.get(doc.pages_root())
        .and_then(Object::as_dict)
        .and_then(|d| d.get("Kids"))
        .and_then(Object::as_array)
        .unwrap()
        .iter()
        .filter_map(Object::as_reference)
        .collect()
}

mod copy_semantics_tests {
    use super::*;

    #[test]
    fn test_assigning_a_present_page_copies_it() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut doc = document_with(&[1, 2]);

        let mut pages = doc.pages();
        let second = pages.get(1).unwrap();
        pages.set(0, second).unwrap();
        let p0 = pages.get(0).unwrap();
        let p1 = pages.get(1).unwrap();
        drop(pages);

        assert_ne!(p0.object_ref(), p1.object_ref());
        assert!(equal(p0.node(&doc).unwrap(), p1.node(&doc).unwrap()));
        assert_eq!(labels(&doc), vec![2, 2]);

        doc.set_key(p0.object_ref(), "Rotate", Object::Integer(90)).unwrap();
        assert!(!equal(p0.node(&doc).unwrap(), p1.node(&doc).unwrap()));
        let p1_dict = doc.get(p1.object_ref()).and_then(Object::as_dict).unwrap();
        assert!(p1_dict.get("Rotate").is_none());
    }

    #[test]
    fn test_extend_from_self_doubles_with_copies() {
        let mut doc = document_with(&[1, 2, 3]);
        doc.pages().extend_from_self().unwrap();

        assert_eq!(labels(&doc), vec![1, 2, 3, 1, 2, 3]);
        let refs = doc.page_refs().to_vec();
        assert_ne!(refs[0], refs[3]);
        assert_eq!(doc.page_count(), 6);
    }

    #[test]
    fn test_foreign_pages_are_deep_copied_once() {
        let mut source = Document::new();
        let font = source.add_object(Object::dictionary([
            ("Type", Object::name("Font")),
            ("BaseFont", Object::name("Helvetica")),
        ]));
        for label in [10, 20] {
            source
                .push_page(Object::dictionary([
                    ("Type", Object::name("Page")),
                    ("Label", Object::Integer(label)),
                    (
                        "Resources",
                        Object::dictionary([(
                            "Font",
                            Object::dictionary([("F1", Object::Reference(font))]),
                        )]),
                    ),
                ]))
                .unwrap();
        }

        let mut dest = Document::new();
        let before = dest.object_count();
        dest.pages().extend_from_document(&source).unwrap();

        assert_eq!(labels(&dest), vec![10, 20]);
        // Two pages plus one shared font
        assert_eq!(dest.object_count(), before + 3);

        let path: ObjectPath = ".Resources.Font.F1".parse().unwrap();
        let fonts: Vec<_> = dest
            .page_refs()
            .iter()
            .map(|&p| dest.resolve_path(p, &path).unwrap().objgen())
            .collect();
        assert!(fonts[0].is_some());
        assert_eq!(fonts[0], fonts[1]);

        // Each copied page points at the destination tree
        let parent: ObjectPath = ".Parent".parse().unwrap();
        let first = dest.page_refs()[0];
        assert_eq!(
            dest.resolve_path(first, &parent).unwrap().objgen(),
            Some(dest.pages_root())
        );
    }

    #[test]
    fn test_foreign_page_with_long_reference_chain() {
        let mut source = Document::new();
        let mut next = Object::Null;
        for i in 0..100_000 {
            let link = source.add_object(Object::dictionary([
                ("Index", Object::Integer(i)),
                ("Next", next),
            ]));
            next = Object::Reference(link);
        }
        source
            .push_page(Object::dictionary([
                ("Type", Object::name("Page")),
                ("Label", Object::Integer(1)),
                ("Chain", next),
            ]))
            .unwrap();

        let mut dest = Document::new();
        let before = dest.object_count();
        dest.pages().extend_from_document(&source).unwrap();

        assert_eq!(labels(&dest), vec![1]);
        assert_eq!(dest.object_count(), before + 100_001);
        let head: ObjectPath = ".Chain.Next.Index".parse().unwrap();
        let index = dest.resolve_path(dest.page_refs()[0], &head).unwrap();
        assert_eq!(index.resolve(), Some(&Object::Integer(99_998)));
    }

    #[test]
    fn test_page_ref_of_another_document_is_rejected() {
        let mut other = document_with(&[7]);
        let foreign = other.pages().get(0).unwrap();

        let mut doc = document_with(&[1]);
        let err = doc.pages().append(foreign).unwrap_err();
        assert!(matches!(err, Error::ForeignObject(_)));
        assert_eq!(labels(&doc), vec![1]);

        doc.pages()
            .append((&other, foreign.object_ref()))
            .unwrap();
        assert_eq!(labels(&doc), vec![1, 7]);
    }
}

mod slice_tests {
    use super::*;

    #[test]
    fn test_extended_slice_requires_exact_arity() {
        let mut doc = document_with(&[1, 2, 3, 4]);
        let every_other = SliceSpec::full().with_step(2);

        let err = doc
            .pages()
            .set_slice(every_other, vec![page(7), page(8), page(9)])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::SliceArity {
                expected: 2,
                found: 3
            }
        ));
        assert_eq!(labels(&doc), vec![1, 2, 3, 4]);

        doc.pages()
            .set_slice(every_other, vec![page(7), page(8)])
            .unwrap();
        assert_eq!(labels(&doc), vec![7, 2, 8, 4]);
    }

    #[test]
    fn test_simple_slice_may_grow() {
        let mut doc = document_with(&[1, 2, 3, 4]);
        doc.pages()
            .set_slice(0isize..2, vec![page(7), page(8), page(9)])
            .unwrap();
        assert_eq!(labels(&doc), vec![7, 8, 9, 3, 4]);
        assert_eq!(kids(&doc), doc.page_refs().to_vec());
    }

    #[test]
    fn test_simple_slice_may_shrink() {
        let mut doc = document_with(&[1, 2, 3, 4]);
        doc.pages().set_slice(1isize.., vec![page(9)]).unwrap();
        assert_eq!(labels(&doc), vec![1, 9]);
    }

    #[test]
    fn test_slice_reassignment_of_own_pages() {
        let mut doc = document_with(&[1, 2, 3]);
        let mut pages = doc.pages();
        let reversed = pages.get_slice(SliceSpec::full().with_step(-1)).unwrap();
        pages.set_slice(.., reversed).unwrap();
        drop(pages);
        assert_eq!(labels(&doc), vec![3, 2, 1]);
    }

    #[test]
    fn test_get_slice_with_negative_bounds() {
        let mut doc = document_with(&[1, 2, 3, 4, 5]);
        let pages = doc.pages();
        let tail = pages.get_slice(-2isize..).unwrap();
        let reversed = pages
            .get_slice(SliceSpec::new(Some(-1), None, Some(-2)))
            .unwrap();
        let tail: Vec<usize> = tail.into_iter().map(|p| pages.index_of(p).unwrap()).collect();
        let reversed: Vec<usize> = reversed
            .into_iter()
            .map(|p| pages.index_of(p).unwrap())
            .collect();
        assert_eq!(tail, vec![3, 4]);
        assert_eq!(reversed, vec![4, 2, 0]);
    }

    #[test]
    fn test_delete_slice_resolves_targets_first() {
        let mut doc = document_with(&[1, 2, 3, 4, 5, 6]);
        doc.pages()
            .delete_slice(SliceSpec::full().with_step(2))
            .unwrap();
        assert_eq!(labels(&doc), vec![2, 4, 6]);
    }

    #[test]
    fn test_zero_step_is_an_error() {
        let mut doc = document_with(&[1]);
        let err = doc
            .pages()
            .get_slice(SliceSpec::full().with_step(0))
            .unwrap_err();
        assert!(matches!(err, Error::ZeroSliceStep));
    }
}

mod list_tests {
    use super::*;

    #[test]
    fn test_indexing() {
        let mut doc = document_with(&[1, 2, 3]);
        let pages = doc.pages();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages.get(-1).unwrap(), pages.get(2).unwrap());
        assert_eq!(pages.nth(1).unwrap(), pages.get(0).unwrap());
        assert!(matches!(
            pages.get(3),
            Err(Error::PageIndexOutOfRange { index: 3, len: 3 })
        ));
        assert!(matches!(pages.get(-4), Err(Error::PageIndexOutOfRange { .. })));
        assert!(matches!(pages.nth(0), Err(Error::ZeroPageNumber)));
    }

    #[test]
    fn test_insert_positions() {
        let mut doc = document_with(&[1, 2]);
        let mut pages = doc.pages();
        pages.insert(0, page(0)).unwrap();
        pages.insert(-1, page(9)).unwrap();
        pages.insert(4, page(5)).unwrap();
        assert!(pages.insert(9, page(6)).is_err());
        drop(pages);
        assert_eq!(labels(&doc), vec![0, 1, 9, 2, 5]);
    }

    #[test]
    fn test_non_page_values_are_rejected() {
        let mut doc = document_with(&[1]);
        let font = Object::dictionary([("Type", Object::name("Font"))]);
        assert!(matches!(
            doc.pages().append(font),
            Err(Error::NotAPage(_))
        ));
        assert!(matches!(
            doc.pages().extend(vec![page(2), Object::Integer(3)]),
            Err(Error::NotAPage(_))
        ));
        assert_eq!(labels(&doc), vec![1]);
    }

    #[test]
    fn test_remove_and_delete() {
        let mut doc = document_with(&[1, 2, 3, 4]);
        let mut pages = doc.pages();
        let third = pages.get(2).unwrap();
        pages.remove(third).unwrap();
        assert!(matches!(pages.index_of(third), Err(Error::PageNotInDocument(_))));
        pages.delete(-1).unwrap();
        pages.remove_nth(1).unwrap();
        drop(pages);
        assert_eq!(labels(&doc), vec![2]);
        // Removed pages stay in the arena
        assert!(doc.contains(third.object_ref()));
    }

    #[test]
    fn test_reverse_keeps_identities() {
        let mut doc = document_with(&[1, 2, 3]);
        let before = doc.page_refs().to_vec();
        doc.pages().reverse().unwrap();
        let mut after = doc.page_refs().to_vec();
        assert_eq!(labels(&doc), vec![3, 2, 1]);
        after.reverse();
        assert_eq!(after, before);
    }

    #[test]
    fn test_page_tree_stays_in_sync() {
        let mut doc = document_with(&[1, 2, 3]);
        doc.pages().delete(1).unwrap();
        let root = doc.get(doc.pages_root()).and_then(Object::as_dict).unwrap();
        assert_eq!(root.get("Count"), Some(&Object::Integer(2)));
        assert_eq!(kids(&doc), doc.page_refs().to_vec());
    }
}
