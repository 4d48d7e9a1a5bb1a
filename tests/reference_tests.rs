//! Reference parsing, navigation and text over the sample document.

mod common;

use common::{label, labels, sample, BOOK_NAME};
use textbites::{Document, ErrorKind, ReferenceKind, Resource};

// ============================================================================
// PARSING
// ============================================================================

#[test]
fn chapter_reference_forms_agree() {
    let res = sample();
    for c in 1..=3 {
        let bare = res.reference(&c.to_string()).unwrap().pretty();
        let lower = res.reference(&format!("chapter {c}")).unwrap().pretty();
        let upper = res.reference(&format!("Chapter {c}")).unwrap().pretty();
        let range = res.reference(&format!("{c}-{c}")).unwrap().pretty();
        assert_eq!(bare, label(&c.to_string()));
        assert_eq!(bare, lower);
        assert_eq!(bare, upper);
        assert_eq!(bare, range);
    }
}

#[test]
fn title_prefix_is_accepted() {
    let res = sample();
    let r = res.reference(&format!("{BOOK_NAME} 2")).unwrap();
    assert_eq!(r.pretty(), label("2"));
    assert!(res.reference(BOOK_NAME).is_err());
}

#[test]
fn parses_every_shape() {
    let res = sample();
    let cases = [
        ("chapter 2-3", ReferenceKind::ChapterRange, "2-3"),
        ("2:1", ReferenceKind::Line, "2:1"),
        ("2:1-3", ReferenceKind::LineRange, "2:1-3"),
        ("chapter 3:7", ReferenceKind::Line, "3:7"),
    ];
    for (text, kind, suffix) in cases {
        let r = res.reference(text).unwrap();
        assert_eq!(r.kind(), kind, "{text}");
        assert_eq!(r.pretty(), label(suffix), "{text}");
    }
}

#[test]
fn out_of_range_is_invalid_reference() {
    let res = sample();
    for text in ["chapter 4", "chapter 2-5", "chapter 2:1-50", "3:8", "0", "2:0"] {
        let err = res.reference(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidReference, "{text}");
    }
}

#[test]
fn malformed_text_is_invalid_reference() {
    let res = sample();
    for text in ["", "   ", "chapter", "two", "2:", ":3", "2-", "2:1-", "2:3:4", "2-3:1", "chapter-2", "2 3"] {
        let err = res.reference(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidReference, "{text:?}");
    }
}

// ============================================================================
// NAVIGATION AND TEXT
// ============================================================================

#[test]
fn walk_the_reference_chain() {
    let res = sample();
    let book = res.top_reference();
    assert_eq!(book.pretty(), BOOK_NAME);
    assert_eq!(book.text().unwrap_err().kind(), ErrorKind::NotSupported);

    let chapters = book.children().unwrap();
    assert_eq!(chapters.len(), 3);
    let c3 = chapters[2];
    assert_eq!(c3.pretty(), label("3"));
    assert_eq!(c3.text().unwrap().len(), 758);

    let lines = c3.children().unwrap();
    assert_eq!(lines.len(), 7);
    let last = lines[lines.len() - 1];
    assert_eq!(last.pretty(), label("3:7"));
    assert_eq!(last.text().unwrap().len(), 105);
    assert!(last.children().is_none());
}

#[test]
fn children_of_each_kind() {
    let res = sample();
    assert_eq!(res.top_reference().children().unwrap()[1].pretty(), label("2"));

    let chapter = res.reference("3").unwrap().children().unwrap();
    assert_eq!(chapter.len(), 7);
    assert_eq!(chapter[1].pretty(), label("3:2"));

    let group = res.reference("2-3").unwrap().children().unwrap();
    assert_eq!(labels(&group), [label("2"), label("3")]);

    let run = res.reference("2:2-5").unwrap().children().unwrap();
    assert_eq!(run.len(), 4);
    assert_eq!(run[1].pretty(), label("2:3"));

    assert!(res.reference("2:2").unwrap().children().is_none());
}

#[test]
fn children_tile_their_parent() {
    let res = sample();
    for text in ["1", "2-3", "1-3", "2:2-5", "3:1-7"] {
        let parent = res.reference(text).unwrap();
        let children = parent.children().unwrap();
        assert!(!children.is_empty());
        assert!(children.windows(2).all(|w| w[0] < w[1]), "{text}");

        let from_children: Vec<_> = children.iter().flat_map(|c| c.lines()).collect();
        assert_eq!(from_children, parent.lines(), "{text}");
    }
}

#[test]
fn text_is_space_joined_lines() {
    let res = sample();
    for text in ["2", "2-3", "1:2-4", "3:7"] {
        let r = res.reference(text).unwrap();
        let joined: Vec<String> = r.lines().iter().map(|l| l.text().unwrap()).collect();
        assert_eq!(r.text().unwrap(), joined.join(" "), "{text}");
    }
}

#[test]
fn singleton_ranges_equal_their_element() {
    let res = sample();
    assert_eq!(res.reference("2-2").unwrap(), res.reference("2").unwrap());
    assert_eq!(res.reference("2:3-3").unwrap(), res.reference("2:3").unwrap());
    assert_ne!(res.reference("2").unwrap(), res.reference("2:1-7").unwrap());
}

// ============================================================================
// RESOURCE FACADE
// ============================================================================

#[test]
fn chapter_queries() {
    let res = sample();
    let chapters = res.chapter_refs();
    assert_eq!(chapters.len(), 3);

    let c3 = chapters[2].num().unwrap();
    assert_eq!(res.chapter_length(c3).unwrap(), 7);

    let whole = res.chapter_text(c3, None, None).unwrap();
    assert_eq!(whole.len(), res.chapter_text(c3, Some(1), None).unwrap().len());
    assert_eq!(whole.len(), res.chapter_text(c3, None, Some(7)).unwrap().len());
    assert_eq!(whole, res.chapter_text(c3, Some(1), Some(7)).unwrap());

    assert_eq!(res.chapter_length(4).unwrap_err().kind(), ErrorKind::InvalidReference);
    assert_eq!(
        res.chapter_text(3, Some(2), Some(9)).unwrap_err().kind(),
        ErrorKind::InvalidReference
    );
}

#[test]
fn labels_use_the_document_title() {
    let res = Resource::new(
        Document::builder("Chapter")
            .chapter(["a"])
            .chapter(["b", "c", "d"])
            .build()
            .unwrap(),
    );
    assert_eq!(res.reference("2:1-3").unwrap().pretty(), "Chapter 2:1-3");
    assert_eq!(res.reference("Chapter 2").unwrap().pretty(), "Chapter 2");
}
