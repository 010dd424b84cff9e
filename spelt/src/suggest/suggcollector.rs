/// Accumulates suggestion candidates, validating each through lookup,
/// deduplicating, and enforcing the per-source and total caps (spec.md
/// §4.5, "each candidate is tested by Lookup... deduplicated against
/// previously emitted").
use std::cmp::min;

use crate::casing::CapStyle;
use crate::lookup::Lookup;

/// No more than this many suggestion attempts from any one source, so a
/// pathological word can't make one generator spin forever.
const MAX_SUGGESTS_PER_SOURCE: usize = 1000;

pub struct SuggCollector<'a> {
    lookup: &'a Lookup<'a>,
    word: &'a str,
    caps: CapStyle,
    max: usize,
    limit: usize,
    suggs: Vec<String>,
    current_source: &'static str,
    counter: usize,
    done: bool,
}

impl<'a> SuggCollector<'a> {
    pub fn new(lookup: &'a Lookup<'a>, word: &'a str, max: usize) -> Self {
        SuggCollector {
            lookup,
            word,
            caps: CapStyle::classify(word),
            max,
            limit: max,
            suggs: Vec::new(),
            current_source: "unknown",
            counter: 0,
            done: false,
        }
    }

    pub fn caps(&self) -> CapStyle {
        self.caps
    }

    pub fn word(&self) -> &str {
        self.word
    }

    /// Shrink the working limit so a later source can't crowd out a
    /// source that's already run (used to reserve room for n-gram/phonet
    /// results before permutation suggestions fill the whole cap).
    pub fn set_limit(&mut self, reserve: usize) {
        self.limit = min(self.suggs.len() + reserve, self.max);
    }

    pub fn new_source(&mut self, name: &'static str) {
        self.current_source = name;
        self.counter = MAX_SUGGESTS_PER_SOURCE;
    }

    pub fn current_source(&self) -> &'static str {
        self.current_source
    }

    /// True iff no more suggestions should be submitted: the cap was hit,
    /// the current source exhausted its per-source budget, or a priority
    /// suggestion already settled the result.
    pub fn limit(&self) -> bool {
        self.done || self.suggs.len() >= self.limit || self.counter == 0
    }

    pub fn len(&self) -> usize {
        self.suggs.len()
    }

    /// A suggestion that, once valid, should override everything else --
    /// used for dash/space word splits (spec.md §4.5 step 7).
    pub fn suggest_priority(&mut self, sugg: &str) {
        if sugg != self.word && self.check_multiword(sugg) {
            self.suggs.clear();
            self.suggs.push(sugg.to_string());
            self.done = true;
        } else {
            self.suggest(sugg);
        }
    }

    pub fn suggest(&mut self, sugg: &str) {
        if self.limit() || sugg == self.word || self.suggs.iter().any(|s| s == sugg) {
            return;
        }
        self.counter -= 1;
        if self.lookup.check_allow_nosuggest(sugg, false) {
            self.suggs.push(sugg.to_string());
        }
    }

    /// A dash/space-joined candidate is valid when every side is
    /// independently a word; the joined string itself is never looked up
    /// as a single token.
    fn check_multiword(&self, sugg: &str) -> bool {
        let mut any = false;
        for part in sugg.split([' ', '-']) {
            if part.is_empty() {
                continue;
            }
            any = true;
            if !self.lookup.check_allow_nosuggest(part, false) {
                return false;
            }
        }
        any
    }

    pub fn into_suggestions(self) -> Vec<String> {
        self.suggs
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::aff_config::AffConfig;
    use crate::dict::{Dictionary, WordEntry};
    use crate::flag::FlagSet;
    use crate::wordflags::WordFlags;

    #[test]
    fn test_dedup_and_limit() {
        let cfg = AffConfig::new();
        let mut dict = Dictionary::new();
        dict.insert(
            "cat".to_string(),
            WordEntry::new(FlagSet::new(), WordFlags::empty(), Vec::new()),
        );
        let lookup = Lookup::new(&cfg, &dict);
        let mut collector = SuggCollector::new(&lookup, "xat", 1);
        collector.new_source("test");
        collector.suggest("cat");
        collector.suggest("cat");
        assert_eq!(collector.len(), 1);
    }

    #[test]
    fn test_priority_split() {
        let cfg = AffConfig::new();
        let mut dict = Dictionary::new();
        dict.insert("well".to_string(), WordEntry::new(FlagSet::new(), WordFlags::empty(), Vec::new()));
        dict.insert("known".to_string(), WordEntry::new(FlagSet::new(), WordFlags::empty(), Vec::new()));
        let lookup = Lookup::new(&cfg, &dict);
        let mut collector = SuggCollector::new(&lookup, "wellknown", 5);
        collector.new_source("test");
        collector.suggest("bogus");
        collector.suggest_priority("well known");
        assert_eq!(collector.into_suggestions(), vec!["well known".to_string()]);
    }
}
