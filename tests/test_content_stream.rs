//! Integration tests for content-stream tokenizing, grouping and unparsing.

use bytes::Bytes;
use pdf_graph::content::{
    group, group_with, parse_content_stream, parse_page_content, tokenize, unparse,
    ContentItem, ContentRecord, InlineImage, Instruction, KnownOperator,
    UNEXPECTED_END_OF_STREAM,
};
use pdf_graph::filters::FlateDecoder;
use pdf_graph::object::{Dictionary, Object};
use pdf_graph::{Document, Error, GraphOptions};

fn operators(items: &[ContentItem]) -> Vec<&str> {
    items.iter().map(ContentItem::operator).collect()
}

mod whitelist_tests {
    use super::*;

    const STREAM: &[u8] = b"q 1 0 0 1 0 0 cm /Im0 Do Q";

    #[test]
    fn test_cm_only_whitelist() {
        let _ = env_logger::builder().is_test(true).try_init();
        let grouped = group(tokenize(STREAM).unwrap(), Some(&["cm"]));

        assert_eq!(operators(&grouped.items), vec!["cm"]);
        let cm = grouped.items[0].as_instruction().unwrap();
        assert_eq!(cm.operands.len(), 6);
        assert_eq!(cm.known_operator(), Some(KnownOperator::ConcatMatrix));
        assert!(grouped.warning.is_none());
    }

    #[test]
    fn test_whitelisting_one_of_the_pair_admits_both() {
        let grouped = group(tokenize(STREAM).unwrap(), Some(&["Q"]));
        assert_eq!(operators(&grouped.items), vec!["q", "Q"]);
    }

    #[test]
    fn test_independent_save_restore_policy() {
        let options = GraphOptions::default().with_pair_save_restore(false);
        let grouped = group_with(tokenize(STREAM).unwrap(), Some(&["Q", "Do"]), &options);
        assert_eq!(operators(&grouped.items), vec!["Do", "Q"]);
    }

    #[test]
    fn test_empty_whitelist_yields_nothing() {
        let grouped = group(tokenize(STREAM).unwrap(), Some(&[]));
        assert!(grouped.is_empty());
        assert!(grouped.warning.is_none());
    }

    #[test]
    fn test_inline_image_filtered_without_bi() {
        let grouped =
            parse_content_stream(b"BI /W 1 /H 1 ID \x00\nEI 2 w", Some(&["w"])).unwrap();
        assert_eq!(operators(&grouped.items), vec!["w"]);
        assert_eq!(grouped.inline_images().count(), 0);
    }
}

mod inline_image_tests {
    use super::*;

    #[test]
    fn test_operators_inside_inline_image_are_dropped() {
        let tokens = vec![
            Object::operator("q"),
            Object::operator("BI"),
            Object::name("W"),
            Object::Integer(1),
            Object::Integer(2),
            Object::operator("w"),
            Object::name("H"),
            Object::Integer(1),
            Object::operator("ID"),
            Object::InlineImage(Box::new(InlineImage::new(
                Vec::new(),
                Bytes::from_static(b"\x7f"),
            ))),
            Object::operator("EI"),
            Object::operator("Q"),
        ];
        let grouped = group(tokens, None);

        assert_eq!(operators(&grouped.items), vec!["q", "INLINE IMAGE", "Q"]);
        let image = grouped.inline_images().next().unwrap();
        assert_eq!(image.metadata, vec![Object::name("H"), Object::Integer(1)]);
        assert_eq!(image.data, Bytes::from_static(b"\x7f"));
        assert!(grouped.warning.is_none());
    }
}

mod round_trip_tests {
    use super::*;

    #[test]
    fn test_balanced_stream_round_trips() {
        let source: &[u8] = b"q 1 0 0 1 72 720 cm /Im0 Do Q\nq 0.5 0 0 0.5 0 0 cm /Im1 Do Q";
        let grouped = parse_content_stream(source, None).unwrap();
        let bytes = unparse(&grouped.items).unwrap();

        assert_eq!(tokenize(&bytes).unwrap(), tokenize(source).unwrap());
        assert_eq!(
            bytes,
            b"q\n1 0 0 1 72 720 cm\n/Im0 Do\nQ\nq\n0.5 0 0 0.5 0 0 cm\n/Im1 Do\nQ".to_vec()
        );
    }

    #[test]
    fn test_inline_image_round_trip_preserves_payload() {
        let source: &[u8] = b"q BI /W 2 /H 1 /BPC 8 /CS /G ID \x00\xff\nEI Q";
        let grouped = parse_content_stream(source, None).unwrap();
        assert_eq!(operators(&grouped.items), vec!["q", "INLINE IMAGE", "Q"]);

        let bytes = unparse(&grouped.items).unwrap();
        let regrouped = parse_content_stream(&bytes, None).unwrap();
        assert_eq!(regrouped, grouped);

        let image = regrouped.inline_images().next().unwrap();
        assert_eq!(&image.data[..], b"\x00\xff");
        assert_eq!(image.dictionary().get("W"), Some(&Object::Integer(2)));
        assert_eq!(image.dictionary().get("CS"), Some(&Object::name("G")));
    }

    #[test]
    fn test_inline_image_data_containing_ei_text() {
        // "EI" inside the payload is only a terminator when whitespace-delimited
        let source: &[u8] = b"BI /W 4 /H 1 ID xEIx\nEI";
        let grouped = parse_content_stream(source, None).unwrap();
        let image = grouped.inline_images().next().unwrap();
        assert_eq!(&image.data[..], b"xEIx");
    }

    #[test]
    fn test_non_utf8_name_settles_after_one_round_trip() {
        let grouped = parse_content_stream(b"/A#E9 gs", None).unwrap();
        let once = unparse(&grouped.items).unwrap();
        assert_eq!(once, b"/A#C3#A9 gs".to_vec());

        let regrouped = parse_content_stream(&once, None).unwrap();
        assert_eq!(regrouped, grouped);
        assert_eq!(unparse(&regrouped.items).unwrap(), once);
    }

    #[test]
    fn test_strings_and_arrays_unparse() {
        let source: &[u8] = b"[(Hello) -250 (World)] TJ <9f00> Tj (a\\(b\\)) Tj";
        let grouped = parse_content_stream(source, None).unwrap();
        let bytes = unparse(&grouped.items).unwrap();
        assert_eq!(tokenize(&bytes).unwrap(), tokenize(source).unwrap());
    }
}

mod unparse_record_tests {
    use super::*;

    #[test]
    fn test_mixed_record_shapes() {
        let records = vec![
            ContentRecord::from(Instruction::from(KnownOperator::SaveState)),
            ContentRecord::from((
                vec![Object::Integer(2)],
                Object::String(b"w".to_vec()),
            )),
            ContentRecord::Tuple(Object::Array(vec![
                Object::Array(vec![Object::name("Im0")]),
                Object::operator("Do"),
            ])),
            ContentRecord::from(InlineImage::new(
                vec![Object::name("W"), Object::Integer(1)],
                Bytes::from_static(b"\x80"),
            )),
            ContentRecord::from(Instruction::new(vec![], "Q")),
        ];
        let bytes = unparse(records).unwrap();
        assert_eq!(bytes, b"q\n2 w\n/Im0 Do\nBI\n/W 1\nID\n\x80\nEI\nQ".to_vec());
    }

    #[test]
    fn test_name_operator_is_rejected_with_position() {
        let records = vec![
            ContentRecord::from((vec![], Object::operator("q"))),
            ContentRecord::from((vec![], Object::name("Q"))),
        ];
        match unparse(records) {
            Err(Error::Unparse { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected unparse error, got {:?}", other),
        }
    }

    #[test]
    fn test_inline_image_operator_needs_image_operand() {
        let records = vec![ContentRecord::from((
            vec![Object::Integer(1)],
            Object::operator("INLINE IMAGE"),
        ))];
        let err = unparse(records).unwrap_err();
        assert!(matches!(err, Error::Unparse { index: 0, .. }));
    }

    #[test]
    fn test_typed_instruction_operator_is_checked() {
        let empty = vec![
            ContentRecord::from(Instruction::new(vec![], "q")),
            ContentRecord::from(Instruction::new(vec![Object::Integer(1)], "")),
        ];
        assert!(matches!(unparse(empty), Err(Error::Unparse { index: 1, .. })));

        let spaced = vec![ContentRecord::from(Instruction::new(vec![], "B I"))];
        assert!(matches!(unparse(spaced), Err(Error::Unparse { index: 0, .. })));

        let image = vec![ContentRecord::from(Instruction::new(
            vec![Object::Integer(1)],
            "INLINE IMAGE",
        ))];
        assert!(matches!(unparse(image), Err(Error::Unparse { index: 0, .. })));
    }

    #[test]
    fn test_malformed_tuple() {
        let records = vec![ContentRecord::Tuple(Object::Array(vec![Object::operator("q")]))];
        assert!(matches!(unparse(records), Err(Error::Unparse { index: 0, .. })));
    }

    #[test]
    fn test_empty_input() {
        let records: Vec<ContentRecord> = Vec::new();
        assert!(unparse(records).unwrap().is_empty());
    }
}

mod warning_tests {
    use super::*;

    #[test]
    fn test_trailing_operands_are_reported_not_fatal() {
        let grouped = parse_content_stream(b"q 1 0 0 1 0 0 cm 5 5", None).unwrap();
        assert_eq!(operators(&grouped.items), vec!["q", "cm"]);
        assert_eq!(grouped.warning.as_deref(), Some(UNEXPECTED_END_OF_STREAM));
    }

    #[test]
    fn test_unterminated_inline_image_is_an_error() {
        let err = tokenize(b"BI /W 1 ID \x00\x01").unwrap_err();
        assert!(matches!(err, Error::ParseError { .. }));
    }

    #[test]
    fn test_deeply_nested_operand_is_an_error() {
        let depth = 100_000;
        let data = [vec![b'['; depth], vec![b']'; depth], b" TJ".to_vec()].concat();
        match tokenize(&data) {
            Err(Error::ParseError { offset, reason }) => {
                assert_eq!(offset, 0);
                assert_eq!(reason, "nesting too deep");
            },
            other => panic!("expected ParseError, got {:?}", other),
        }
        assert!(parse_content_stream(&data, None).is_err());

        let shallow = b"/F1 12 Tf [ [ (a) ] ] TJ";
        assert_eq!(operators(&parse_content_stream(shallow, None).unwrap().items), vec!["Tf", "TJ"]);
    }
}

mod page_content_tests {
    use super::*;

    #[test]
    fn test_page_with_two_content_streams() {
        let mut doc = Document::new();
        let first = doc.add_stream(Dictionary::new(), b"q 1 0 0 1 0 0 cm".to_vec());
        let second = doc.add_stream(Dictionary::new(), b"/Im0 Do Q".to_vec());
        let page = doc
            .push_page(Object::dictionary([
                ("Type", Object::name("Page")),
                (
                    "Contents",
                    Object::Array(vec![Object::Reference(first), Object::Reference(second)]),
                ),
            ]))
            .unwrap();

        let grouped = parse_page_content(&doc, page, None).unwrap();
        assert_eq!(operators(&grouped.items), vec!["q", "cm", "Do", "Q"]);
    }

    #[test]
    fn test_flate_encoded_content_stream() {
        let mut doc = Document::new();
        let encoded = FlateDecoder::encode(b"0 0 m 10 10 l S").unwrap();
        let mut dict = Dictionary::new();
        dict.insert("Filter".to_string(), Object::name("FlateDecode"));
        let stream = doc.add_stream(dict, encoded);

        let grouped = parse_page_content(&doc, stream, Some(&["l"])).unwrap();
        assert_eq!(operators(&grouped.items), vec!["l"]);
    }
}
