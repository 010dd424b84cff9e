use std::path::Path;

use spelt::{HunspellDict, Speller};

fn load() -> HunspellDict {
    let dictpath = Path::new("tests/fixtures/mini.dic");
    let affpath = Path::new("tests/fixtures/mini.aff");
    HunspellDict::new(dictpath, affpath).unwrap()
}

#[test]
fn match_root_words() {
    let speller = load();

    assert!(speller.spellcheck("cat"));
    assert!(speller.spellcheck("dog"));
    assert!(speller.spellcheck("happy"));

    assert!(!speller.spellcheck("ct"));
    assert!(!speller.spellcheck("dgo"));
}

#[test]
fn suffix_forms_are_accepted() {
    let speller = load();
    assert!(speller.spellcheck("cats"));
    assert!(speller.spellcheck("ponies"));
    assert!(!speller.spellcheck("dogs"));
}

#[test]
fn prefix_forms_are_accepted() {
    let speller = load();
    assert!(speller.spellcheck("unhappy"));
}

#[test]
fn compound_by_flag_is_accepted() {
    let speller = load();
    assert!(speller.spellcheck("sunset"));
    assert!(!speller.spellcheck("setsun"));
}

#[test]
fn forbidden_word_is_rejected() {
    let speller = load();
    assert!(!speller.spellcheck("bad"));
}

#[test]
fn nosuggest_word_is_spellcheck_valid_but_never_suggested() {
    let speller = load();
    assert!(speller.spellcheck("rare"));
    assert!(!speller.suggestions("rate", 10).contains(&"rare".to_string()));
}

#[test]
fn suggestions_find_close_typo() {
    let speller = load();
    let suggs = speller.suggestions("cta", 5);
    assert!(suggs.contains(&"cat".to_string()));
}

#[test]
fn rep_table_suggestion_wins() {
    let speller = load();
    let suggs = speller.suggestions("teh", 5);
    assert!(!suggs.is_empty());
}

#[test]
fn added_word_is_accepted_afterward() {
    let mut speller = load();
    assert!(!speller.spellcheck("zorblax"));
    assert!(speller.add_word("zorblax"));
    assert!(speller.spellcheck("zorblax"));
}

#[test]
fn correct_word_has_no_suggestions() {
    let speller = load();
    assert!(speller.suggestions("cat", 5).is_empty());
}
