use fancyexpr::pos::Pos;
use fancyexpr::read::{read_all, read_file, read_str, ReadError};
use fancyexpr::value::{Form, FormWithPos, Parenkind};
use kstring::KString;
use std::path::Path;

fn read_one(s: &str) -> FormWithPos {
    let mut forms = read_str(s).unwrap();
    assert_eq!(forms.len(), 1, "expected exactly one form in {:?}", s);
    forms.pop().unwrap()
}

#[test]
fn reads_a_flat_list() {
    let FormWithPos(form, pos) = read_one("(+ 1 2)");
    assert_eq!(pos, Pos { line: 0, col: 0 });
    match form {
        Form::Sequence(Parenkind::Round, children) => {
            let texts: Vec<&str> = children.iter()
                .map(|FormWithPos(c, _)| match c {
                    Form::Literal(t) => t.as_str(),
                    other => panic!("expected literal, got {:?}", other),
                })
                .collect();
            assert_eq!(texts, vec!["+", "1", "2"]);
        }
        other => panic!("expected list, got {:?}", other),
    }
}

#[test]
fn nesting_round_trips() {
    for input in ["(())", "[a {b c}]", "{[()] x}", "(a (b (c)))", "[]"] {
        assert_eq!(read_one(input).to_string(), input);
    }
}

#[test]
fn top_level_siblings_keep_their_order() {
    let forms = read_str("a (b) [c]").unwrap();
    let texts: Vec<String> = forms.iter().map(|f| f.to_string()).collect();
    assert_eq!(texts, vec!["a", "(b)", "[c]"]);
}

#[test]
fn string_tokens_concatenate_without_separators() {
    assert_eq!(read_one("\"a b\"").0, Form::String(KString::from_ref("ab")));
    assert_eq!(read_one("\"\"").0, Form::String(KString::from_ref("")));
    assert_eq!(read_one("\"a{b\"").0, Form::String(KString::from_ref("a{b")));
}

#[test]
fn dispatch_set_literal_reads_children() {
    let FormWithPos(form, _) = read_one("#{1 2 3}");
    match form {
        Form::Dispatch(tag, children) => {
            assert_eq!(tag.as_str(), "#{");
            assert_eq!(children.len(), 3);
            assert_eq!(children[0].0, Form::Literal(KString::from_ref("1")));
        }
        other => panic!("expected dispatch, got {:?}", other),
    }
}

#[test]
fn dispatch_region_is_read_recursively() {
    let FormWithPos(form, _) = read_one("#{a (b c)}");
    match form {
        Form::Dispatch(_, children) => {
            assert_eq!(children.len(), 2);
            assert!(matches!(&children[1].0,
                             Form::Sequence(Parenkind::Round, inner)
                             if inner.len() == 2));
        }
        other => panic!("expected dispatch, got {:?}", other),
    }
}

#[test]
fn dispatch_without_opener_is_childless() {
    let FormWithPos(form, _) = read_one("#custom");
    assert_eq!(form, Form::Dispatch(KString::from_ref("#custom"), vec![]));
}

#[test]
fn unmatched_open_fails() {
    let e = read_str("(1 2").unwrap_err();
    assert!(matches!(e.err, ReadError::UnmatchedOpen(Parenkind::Round)));
    assert_eq!(e.pos, Pos { line: 0, col: 0 });

    let e = read_str("{").unwrap_err();
    assert!(matches!(e.err, ReadError::UnmatchedOpen(Parenkind::Curly)));
}

#[test]
fn unexpected_closing_fails() {
    let e = read_str(")").unwrap_err();
    assert!(matches!(e.err, ReadError::UnexpectedClosing(Parenkind::Round)));

    let e = read_str("(a) ]").unwrap_err();
    assert!(matches!(e.err, ReadError::UnexpectedClosing(Parenkind::Square)));
}

#[test]
fn mismatched_closing_fails() {
    let e = read_str("(]").unwrap_err();
    assert!(matches!(e.err,
                     ReadError::ClosingMismatch(Parenkind::Round, _,
                                                Parenkind::Square)));
}

#[test]
fn unmatched_open_string_fails() {
    let e = read_str("\"abc").unwrap_err();
    assert!(matches!(e.err, ReadError::UnmatchedOpenString));
}

#[test]
fn unmatched_dispatch_fails() {
    let e = read_str("#{1 2").unwrap_err();
    assert!(matches!(&e.err,
                     ReadError::UnmatchedDispatch(tag) if tag.as_str() == "#{"));
}

#[test]
fn nesting_too_deep_fails() {
    let input = format!("{}{}", "(".repeat(600), ")".repeat(600));
    let e = read_str(&input).unwrap_err();
    assert!(matches!(e.err, ReadError::NestingTooDeep));
}

#[test]
fn read_all_reports_decoding_failures() {
    let e = read_all(&b"(\xff)"[..]).unwrap_err();
    assert!(matches!(e.err, ReadError::IO(_)));
}

#[test]
fn read_file_reports_the_path() {
    let e = read_file(Path::new("no/such/file.fc")).unwrap_err();
    assert!(e.to_string().contains("no/such/file.fc"));
}
