/// PHONE-table driven suggestion pass, active only when the loaded affix
/// data configures a phonetic table (spec.md §4.7). Scores every dictionary
/// stem by a blend of raw n-gram similarity and n-gram similarity of the two
/// words' phonetic codes, so homophone-style misspellings ("fisiks" ->
/// "physics") surface even when they share almost no literal substrings.
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use fnv::FnvHashSet;

use crate::aff_config::AffConfig;
use crate::dict::Dictionary;
use crate::strutil::ngram;
use crate::wordflags::WordFlags;

use super::suggcollector::SuggCollector;

const MAXPHONSUGS: usize = 2;

struct HeapItem {
    word: String,
    score: isize,
}

impl PartialEq for HeapItem {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score
    }
}
impl Eq for HeapItem {}
impl PartialOrd for HeapItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for HeapItem {
    fn cmp(&self, other: &Self) -> Ordering {
        other.score.cmp(&self.score)
    }
}

fn disqualified(homonyms: &crate::dict::Homonyms) -> bool {
    let disqualifying = WordFlags::Forbidden | WordFlags::NoSuggest | WordFlags::OnlyInCompound;
    homonyms.iter().any(|e| e.word_flags.intersects(disqualifying))
}

pub fn phonet_suggest(word: &str, dict: &Dictionary, aff: &AffConfig, collector: &mut SuggCollector) {
    if aff.phone.is_empty() {
        return;
    }
    collector.new_source("phonet");
    if collector.limit() {
        return;
    }

    let wlen = word.chars().count() as isize;
    let wcode = aff.phone.encode(word);
    let wcode_len = wcode.chars().count();

    let mut heap: BinaryHeap<HeapItem> = BinaryHeap::with_capacity(MAXPHONSUGS);
    let mut seen: FnvHashSet<&str> = FnvHashSet::default();

    for (stem, homonyms) in dict.iter() {
        if disqualified(homonyms) {
            continue;
        }
        if !seen.insert(stem.as_str()) {
            continue;
        }
        let slen = stem.chars().count();
        let code = aff.phone.encode(stem);
        let code_len = code.chars().count();

        let base = ngram(3, word, word.chars().count(), stem, slen) as isize;
        let phonetic = ngram(3, &wcode, wcode_len, &code, code_len) as isize;
        let length_penalty = (wlen - slen as isize).abs();
        let score = base + phonetic - length_penalty;

        if heap.len() == MAXPHONSUGS {
            if let Some(worst) = heap.peek() {
                if score <= worst.score {
                    continue;
                }
            }
            heap.pop();
        }
        heap.push(HeapItem {
            word: stem.clone(),
            score,
        });
    }

    let mut results: Vec<HeapItem> = heap.into_vec();
    results.sort_unstable_by(|a, b| b.score.cmp(&a.score));
    for item in results {
        if item.score <= 0 {
            continue;
        }
        collector.suggest(&item.word);
        if collector.limit() {
            return;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dict::WordEntry;
    use crate::flag::FlagSet;
    use crate::lookup::Lookup;

    fn aff_with_phone() -> AffConfig {
        let mut aff = AffConfig::new();
        aff.phone.push("PH", "F");
        aff
    }

    #[test]
    fn test_noop_without_phone_table() {
        let aff = AffConfig::new();
        let mut dict = Dictionary::new();
        dict.insert(
            "fone".to_string(),
            WordEntry::new(FlagSet::new(), WordFlags::empty(), Vec::new()),
        );
        let lookup = Lookup::new(&aff, &dict);
        let mut collector = SuggCollector::new(&lookup, "phone", 5);
        phonet_suggest("phone", &dict, &aff, &mut collector);
        assert!(collector.into_suggestions().is_empty());
    }

    #[test]
    fn test_finds_phonetic_match() {
        let aff = aff_with_phone();
        let mut dict = Dictionary::new();
        dict.insert(
            "phone".to_string(),
            WordEntry::new(FlagSet::new(), WordFlags::empty(), Vec::new()),
        );
        let lookup = Lookup::new(&aff, &dict);
        let mut collector = SuggCollector::new(&lookup, "fone", 5);
        phonet_suggest("fone", &dict, &aff, &mut collector);
        assert!(collector.into_suggestions().contains(&"phone".to_string()));
    }

    #[test]
    fn test_skips_forbidden() {
        let aff = aff_with_phone();
        let mut dict = Dictionary::new();
        dict.insert(
            "phone".to_string(),
            WordEntry::new(FlagSet::new(), WordFlags::Forbidden, Vec::new()),
        );
        let lookup = Lookup::new(&aff, &dict);
        let mut collector = SuggCollector::new(&lookup, "fone", 5);
        phonet_suggest("fone", &dict, &aff, &mut collector);
        assert!(collector.into_suggestions().is_empty());
    }
}
