use std::io::Write;

use super::*;

fn fruits() -> WordList {
    WordList::new([
        "Apples",
        "Candies",
        "Anananas",
        "Grapefruit",
        "Bananas",
        "Lemons",
    ])
}

#[test]
fn test_first_prefix_match_wins() {
    let list = fruits();
    assert_eq!(list.suggest("A").as_deref(), Some("Apples"));
    assert_eq!(list.suggest("An").as_deref(), Some("Anananas"));
    assert_eq!(list.suggest("Ban").as_deref(), Some("Bananas"));
}

#[test]
fn test_folded_prefix() {
    let list = fruits();
    assert_eq!(list.suggest("app").as_deref(), Some("Apples"));
    assert_eq!(list.suggest("LEM").as_deref(), Some("Lemons"));

    let list = WordList::new(["Crème brûlée", "Crepe"]);
    assert_eq!(list.suggest("creme").as_deref(), Some("Crème brûlée"));
    assert_eq!(list.suggest("crep").as_deref(), Some("Crepe"));
}

#[test]
fn test_no_match() {
    let list = fruits();
    assert_eq!(list.suggest("Kiwi"), None);
    assert_eq!(list.suggest("pples"), None);
    assert_eq!(list.suggest(""), None);
}

#[test]
fn test_exact_word_is_returned() {
    let list = fruits();
    assert_eq!(list.suggest("Lemons").as_deref(), Some("Lemons"));
}

#[test]
fn test_closure_source() {
    let source = |typed: &str| (typed == "App").then(|| "Apples".to_string());
    assert_eq!(source.suggest("App").as_deref(), Some("Apples"));
    assert_eq!(source.suggest("Ap"), None);
}

#[test]
fn test_parse_skips_comments_and_blanks() {
    let list = WordList::parse("# fruit\nApples\n\n  Lemons  \n#Kiwi\n");
    assert_eq!(list.words(), ["Apples", "Lemons"]);
}

#[test]
fn test_push_ignores_empty() {
    let mut list = WordList::default();
    list.push("");
    list.push("Candies");
    assert_eq!(list.len(), 1);
    assert_eq!(list.suggest("c").as_deref(), Some("Candies"));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Grapefruit\nGrapes").unwrap();
    let list = WordList::load(file.path()).unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list.suggest("grape").as_deref(), Some("Grapefruit"));
}

#[test]
fn test_load_empty_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# nothing here").unwrap();
    let err = WordList::load(file.path()).unwrap_err();
    assert!(matches!(err, WordListError::Empty { .. }));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = WordList::load(&dir.path().join("missing.txt")).unwrap_err();
    assert!(matches!(err, WordListError::Io { .. }));
    assert!(err.to_string().contains("missing.txt"));
}
