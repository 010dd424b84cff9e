#![warn(missing_debug_implementations)]

//! A Hunspell-compatible spellchecker core: affix/wordlist data model plus
//! the lookup and suggest engines built on top of it.

pub mod aff_config;
pub mod affix;
pub mod affix_trie;
pub mod casing;
pub mod compound_rule;
pub mod condition;
pub mod dict;
pub mod flag;
pub mod lookup;
pub mod parse_aff;
pub mod parse_dic;
pub mod strutil;
pub mod suggest;
pub mod wordflags;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::aff_config::AffConfig;
use crate::dict::{Dictionary, WordEntry};
use crate::flag::FlagSet;
use crate::lookup::Lookup;
use crate::suggest::Suggester;
use crate::wordflags::WordFlags;

/// The behavior a spellchecker backend must provide, independent of which
/// dictionary format backs it.
pub trait Speller {
    /// Returns true if the word is in the dictionary, otherwise false.
    fn spellcheck(&self, word: &str) -> bool;

    /// Returns a list of possible corrections to a misspelled word.
    /// The list may be empty.
    fn suggestions(&self, word: &str, max: usize) -> Vec<String>;

    /// Accept `word` into the dictionary.
    /// Returns false if the word could not be accepted (for example
    /// if it contained characters the dictionary can't handle),
    /// otherwise returns true.
    fn add_word(&mut self, word: &str) -> bool;

    /// Load words from `path` (one word per line), and in the future
    /// append words to that file when `add_word_to_user_dict` is called.
    /// The file is created if it does not exist yet.
    /// Returns the number of words loaded from the file.
    fn set_user_dict(&mut self, path: &Path) -> Result<i32>;

    /// Accept `word` into the dictionary and add it to the user dict file
    /// that was set with `set_user_dict`.
    fn add_word_to_user_dict(&mut self, word: &str) -> Result<bool>;
}

/// A speller backed by a Hunspell-format `.aff`/`.dic` pair. Words accepted
/// at runtime via `add_word` are inserted straight into the dictionary
/// store with an empty flag set, so they take the exact same lookup and
/// suggest-scoring paths as words loaded from the `.dic` file.
#[derive(Debug)]
pub struct HunspellDict {
    aff: AffConfig,
    dict: Dictionary,
    user_dict_path: Option<PathBuf>,
}

impl HunspellDict {
    /// Load a Hunspell-format dictionary and affix file from disk.
    pub fn new(dictionary: &Path, affixes: &Path) -> Result<Self> {
        let aff_text = fs::read_to_string(affixes)?;
        let aff = parse_aff::parse_affix_data(&aff_text)?;
        let dic_text = fs::read_to_string(dictionary)?;
        let dict = parse_dic::parse_dictionary(&dic_text, &aff)?;
        Ok(HunspellDict {
            aff,
            dict,
            user_dict_path: None,
        })
    }

    /// Look for Hunspell-format dictionaries for the given `locale` (e.g.
    /// `en_US`) in the provided directory search path. Returns a tuple of
    /// paths to the dictionary file and the affix file.
    pub fn find_dictionary(search_path: Vec<&str>, locale: &str) -> Option<(PathBuf, PathBuf)> {
        for dir in search_path {
            let dic = PathBuf::from(dir).join(format!("{}.dic", locale));
            let aff = PathBuf::from(dir).join(format!("{}.aff", locale));
            if dic.is_file() && aff.is_file() {
                return Some((dic, aff));
            }
        }
        None
    }

    fn lookup(&self) -> Lookup<'_> {
        Lookup::new(&self.aff, &self.dict)
    }
}

impl Speller for HunspellDict {
    fn spellcheck(&self, word: &str) -> bool {
        self.lookup().check(word)
    }

    fn suggestions(&self, word: &str, max: usize) -> Vec<String> {
        if self.spellcheck(word) {
            return Vec::new();
        }
        Suggester::new(&self.aff, &self.dict).suggest(word, max)
    }

    fn add_word(&mut self, word: &str) -> bool {
        if word.is_empty() || word.chars().any(char::is_whitespace) {
            return false;
        }
        if !self.dict.contains(word) {
            self.dict
                .insert(word.to_string(), WordEntry::new(FlagSet::new(), WordFlags::empty(), Vec::new()));
        }
        true
    }

    fn set_user_dict(&mut self, path: &Path) -> Result<i32> {
        if !path.exists() {
            fs::File::create(path)?;
        }
        let text = fs::read_to_string(path)?;
        let mut count = 0;
        for line in text.lines() {
            let word = line.trim();
            if !word.is_empty() && self.add_word(word) {
                count += 1;
            }
        }
        self.user_dict_path = Some(path.to_path_buf());
        Ok(count)
    }

    fn add_word_to_user_dict(&mut self, word: &str) -> Result<bool> {
        if !self.add_word(word) {
            return Ok(false);
        }
        if let Some(path) = &self.user_dict_path {
            let mut file = fs::OpenOptions::new().create(true).append(true).open(path)?;
            writeln!(file, "{}", word)?;
        }
        Ok(true)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_add_word_then_spellcheck() {
        let aff = AffConfig::new();
        let dict = Dictionary::new();
        let mut speller = HunspellDict {
            aff,
            dict,
            user_dict_path: None,
        };
        assert!(!speller.spellcheck("zorblax"));
        assert!(speller.add_word("zorblax"));
        assert!(speller.spellcheck("zorblax"));
    }

    #[test]
    fn test_add_word_rejects_whitespace() {
        let aff = AffConfig::new();
        let dict = Dictionary::new();
        let mut speller = HunspellDict {
            aff,
            dict,
            user_dict_path: None,
        };
        assert!(!speller.add_word("two words"));
    }
}
