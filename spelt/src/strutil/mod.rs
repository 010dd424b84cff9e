pub mod delins;
pub mod metaphone;
pub mod ngram;
pub mod replacements;

pub use delins::delins;
pub use metaphone::PhoneTable;
pub use ngram::{commoncharacterpositions, leftcommonsubstring, ngram, ngram_weighted, NgramOpts};
pub use replacements::Replacements;

/// Remove every character in `ignore` from `word`. Backs the IGNORE
/// directive, applied before ICONV at the start of both lookup and
/// suggest (spec.md §4.2).
pub fn strip_ignored(word: &str, ignore: &str) -> String {
    if ignore.is_empty() {
        return word.to_string();
    }
    word.chars().filter(|c| !ignore.contains(*c)).collect()
}
