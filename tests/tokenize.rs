use fancyexpr::pos::Pos;
use fancyexpr::tokenize::{tokenize_str, TokenWithPos};

fn texts(s: &str) -> Vec<String> {
    tokenize_str(s).into_iter()
        .map(|TokenWithPos(t, _)| t.as_str().to_string())
        .collect()
}

#[test]
fn simple_forms() {
    assert_eq!(texts("(1 2 3)"), vec!["(", "1", "2", "3", ")"]);
    assert_eq!(texts("[1 2 3]"), vec!["[", "1", "2", "3", "]"]);
    assert_eq!(texts("{1 2 3}"), vec!["{", "1", "2", "3", "}"]);
}

#[test]
fn commas_are_whitespace() {
    assert_eq!(texts("(1,,, 2    3)"), vec!["(", "1", "2", "3", ")"]);
    assert_eq!(texts(",,,"), Vec::<String>::new());
}

#[test]
fn empty_input_yields_no_tokens() {
    assert_eq!(texts(""), Vec::<String>::new());
}

#[test]
fn delimiters_split_runs() {
    assert_eq!(texts("symbol("), vec!["symbol", "("]);
    assert_eq!(texts("a[b]c"), vec!["a", "[", "b", "]", "c"]);
}

#[test]
fn string_delimiters_are_plain_tokens() {
    // The tokenizer does not special-case string contents; the
    // reader reassembles them.
    assert_eq!(texts("\"multi word { }\""),
               vec!["\"", "multi", "word", "{", "}", "\""]);
}

#[test]
fn dispatch_glues_one_trailing_character() {
    assert_eq!(texts("#{1 2 3}"), vec!["#{", "1", "2", "3", "}"]);
    assert_eq!(texts("#fancy[]"), vec!["#fancy[", "]"]);
    assert_eq!(texts("#\"regexp\""), vec!["#\"", "regexp", "\""]);
    // The glued character is whatever comes next, even whitespace.
    assert_eq!(texts("#abc def"), vec!["#abc ", "def"]);
    // At end of input there is nothing left to glue.
    assert_eq!(texts("#custom"), vec!["#custom"]);
    assert_eq!(texts("#"), vec!["#"]);
}

#[test]
fn positions_track_lines_and_columns() {
    let tokens = tokenize_str("(a\n b)");
    let positions: Vec<Pos> = tokens.iter()
        .map(|TokenWithPos(_, p)| *p)
        .collect();
    assert_eq!(positions, vec![
        Pos { line: 0, col: 0 },
        Pos { line: 0, col: 1 },
        Pos { line: 1, col: 1 },
        Pos { line: 1, col: 2 },
    ]);
}
