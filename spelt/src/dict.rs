/// The dictionary store: stem -> homonym word entries (spec.md §3).
use fnv::FnvHashMap;
use smallvec::SmallVec;

use crate::flag::FlagSet;
use crate::wordflags::WordFlags;

/// Morphological tags attached to a `.dic` entry, e.g. `po:noun` or the
/// `ph:` alternate-spelling hint REP-style suggestions draw from.
pub type Morphology = Vec<(String, String)>;

/// One stem's record. Multiple `WordEntry`s may share a surface stem --
/// they are homonyms, tried independently by lookup.
#[derive(Clone, Debug)]
pub struct WordEntry {
    pub flags: FlagSet,
    pub word_flags: WordFlags,
    pub morphology: Morphology,
    /// Alternate spellings pulled out of `ph:` morphology tags, consumed by
    /// suggest's REP-like path (spec.md §3).
    pub alt_spellings: Vec<String>,
}

impl WordEntry {
    pub fn new(flags: FlagSet, word_flags: WordFlags, morphology: Morphology) -> Self {
        let alt_spellings = morphology
            .iter()
            .filter(|(k, _)| k == "ph")
            .map(|(_, v)| v.clone())
            .collect();
        WordEntry {
            flags,
            word_flags,
            morphology,
            alt_spellings,
        }
    }
}

/// Most stems have exactly one homonym; `SmallVec` avoids a heap
/// allocation for the overwhelming common case.
pub type Homonyms = SmallVec<[WordEntry; 1]>;

#[derive(Clone, Debug, Default)]
pub struct Dictionary {
    pub words: FnvHashMap<String, Homonyms>,
}

impl Dictionary {
    pub fn new() -> Self {
        Dictionary {
            words: FnvHashMap::default(),
        }
    }

    pub fn insert(&mut self, stem: String, entry: WordEntry) {
        self.words.entry(stem).or_default().push(entry);
    }

    pub fn get(&self, stem: &str) -> Option<&Homonyms> {
        self.words.get(stem)
    }

    pub fn contains(&self, stem: &str) -> bool {
        self.words.contains_key(stem)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Homonyms)> {
        self.words.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_homonyms() {
        let mut dict = Dictionary::new();
        dict.insert(
            "lead".to_string(),
            WordEntry::new(FlagSet::new(), WordFlags::empty(), Vec::new()),
        );
        dict.insert(
            "lead".to_string(),
            WordEntry::new(FlagSet::new(), WordFlags::NoSuggest, Vec::new()),
        );
        assert_eq!(dict.get("lead").unwrap().len(), 2);
    }

    #[test]
    fn test_ph_tag_becomes_alt_spelling() {
        let entry = WordEntry::new(
            FlagSet::new(),
            WordFlags::empty(),
            vec![("ph".to_string(), "fone".to_string())],
        );
        assert_eq!(entry.alt_spellings, vec!["fone".to_string()]);
    }
}
