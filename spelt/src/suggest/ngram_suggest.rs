/// Whole-dictionary similarity scan, for misspellings too far from the
/// input for the permutation generators to reach (spec.md §4.6).
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use fnv::FnvHashSet;
use rayon::prelude::*;

use crate::aff_config::AffConfig;
use crate::affix::AffixKind;
use crate::dict::Dictionary;
use crate::flag::FlagSet;
use crate::strutil::{commoncharacterpositions, delins, leftcommonsubstring, ngram, ngram_weighted, NgramOpts};
use crate::wordflags::WordFlags;

use super::suggcollector::SuggCollector;

const MAX_NGRAM_ROOTS: usize = 100;

struct HeapItem<T> {
    item: T,
    score: isize,
}

impl<T> PartialEq for HeapItem<T> {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score
    }
}
impl<T> Eq for HeapItem<T> {}
impl<T> PartialOrd for HeapItem<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<T> Ord for HeapItem<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // min-heap: smallest score pops first, so we can evict it once
        // the heap is full and a better candidate shows up.
        other.score.cmp(&self.score)
    }
}

fn disqualified(homonyms: &crate::dict::Homonyms) -> bool {
    let disqualifying = WordFlags::Forbidden | WordFlags::NoSuggest | WordFlags::OnlyInCompound;
    homonyms.iter().any(|e| {
        e.word_flags.intersects(disqualifying)
            || (!e.alt_spellings.is_empty() && e.morphology.len() == e.alt_spellings.len())
    })
}

/// Expand `stem` with every affix combination whose flag it carries,
/// yielding candidate surface forms (spec.md §4.6 step 4 and §4.3).
fn generate_surface_forms(stem: &str, flags: &FlagSet, aff: &AffConfig, mut emit: impl FnMut(String)) {
    emit(stem.to_string());
    for group in aff.affixes.groups() {
        if !flags.contains(group.flag) {
            continue;
        }
        for entry in &group.entries {
            if !entry.condition_holds(stem, group.kind) {
                continue;
            }
            let mut word = stem.to_string();
            match group.kind {
                AffixKind::Suffix => {
                    if let Some(rest) = word.strip_suffix(&entry.strip) {
                        word = rest.to_string();
                    } else if !entry.strip.is_empty() {
                        continue;
                    }
                    word.push_str(&entry.add);
                }
                AffixKind::Prefix => {
                    if let Some(rest) = word.strip_prefix(&entry.strip) {
                        word = rest.to_string();
                    } else if !entry.strip.is_empty() {
                        continue;
                    }
                    word = format!("{}{}", entry.add, word);
                }
            }
            emit(word);
        }
    }
}

/// REP-style candidates drawn from `ph:` alternate-spelling hints: a
/// misspelling that exactly matches a homonym's recorded alternate
/// spelling suggests that homonym's own stem directly, ahead of any
/// fuzzy scoring (spec.md §3).
pub fn ph_suggest(word: &str, dict: &Dictionary, collector: &mut SuggCollector) {
    collector.new_source("ph");
    if collector.limit() {
        return;
    }
    for (stem, homonyms) in dict.iter() {
        if homonyms.iter().any(|e| e.alt_spellings.iter().any(|alt| alt == word)) {
            collector.suggest(stem);
            if collector.limit() {
                return;
            }
        }
    }
}

pub fn ngram_suggest(word: &str, dict: &Dictionary, aff: &AffConfig, collector: &mut SuggCollector) {
    collector.new_source("ngram");
    if collector.limit() {
        return;
    }

    let wvec: Vec<char> = word.chars().collect();

    let mut rootscores: Vec<HeapItem<&String>> = dict
        .words
        .par_iter()
        .filter_map(|(root, homonyms)| {
            if disqualified(homonyms) {
                return None;
            }
            let rvec: Vec<char> = root.chars().collect();
            if rvec.len() > wvec.len() + 2 {
                return None;
            }
            // Blend in edit-distance-based root scoring alongside the
            // classic n-gram score: two close roots with an identical
            // n-gram count are told apart by how few delete/insert steps
            // separate them from the misspelling.
            let edits = delins(&wvec, &rvec, wvec.len() + rvec.len());
            let score = ngram(3, word, wvec.len(), root, rvec.len()) as isize
                + leftcommonsubstring(word, root) as isize
                - edits as isize;
            Some(HeapItem { item: root, score })
        })
        .collect();
    rootscores.sort_unstable_by(|a, b| b.score.cmp(&a.score));
    rootscores.truncate(MAX_NGRAM_ROOTS);

    let maxngramsugs = aff.maxngramsugs.max(1);
    let mut uniq: FnvHashSet<String> = FnvHashSet::default();
    let mut suggheap: BinaryHeap<HeapItem<String>> = BinaryHeap::with_capacity(maxngramsugs);

    for HeapItem { item: root, .. } in rootscores {
        let homonyms = match dict.get(root) {
            Some(h) => h,
            None => continue,
        };
        for entry in homonyms.iter() {
            generate_surface_forms(root, &entry.flags, aff, |form| {
                if uniq.contains(&form) {
                    return;
                }
                uniq.insert(form.clone());
                let opts = NgramOpts {
                    any_mismatch_penalty: true,
                    longer_worse: true,
                    weighted: true,
                };
                let base = ngram_weighted(word.chars().count(), word, &form, opts);
                let length_penalty = (word.chars().count() as isize - form.chars().count() as isize).abs();
                let score = 2 * base
                    + leftcommonsubstring(word, &form) as isize
                    + commoncharacterpositions(word, &form) as isize
                    - length_penalty;

                if suggheap.len() == maxngramsugs {
                    if let Some(worst) = suggheap.peek() {
                        if score <= worst.score {
                            return;
                        }
                    }
                    suggheap.pop();
                }
                suggheap.push(HeapItem { item: form, score });
            });
        }
    }

    let maxdiff = aff.maxdiff;
    let wordlen = word.chars().count().max(1) as isize;
    let mut results: Vec<HeapItem<String>> = suggheap.into_vec();
    results.sort_unstable_by(|a, b| b.score.cmp(&a.score));
    for HeapItem { item: sugg, score } in results {
        if aff.onlymaxdiff && maxdiff > 0 && normalize_score(score, wordlen) < maxdiff as isize {
            continue;
        }
        collector.suggest(&sugg);
        if collector.limit() {
            return;
        }
    }
}

/// Normalize a raw root score onto the documented 0..10 MAXDIFF scale,
/// relative to the best score achievable for a word of this length (the
/// scoring formula above tops out around `4 * wordlen`: up to `2 *
/// wordlen` from the weighted n-gram term, plus up to `wordlen` each from
/// leftcommonsubstring and commoncharacterpositions) (spec.md §4.6 step 5).
fn normalize_score(score: isize, wordlen: isize) -> isize {
    let max_possible = (4 * wordlen).max(1);
    ((score * 10) / max_possible).clamp(0, 10)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dict::WordEntry;
    use crate::lookup::Lookup;

    #[test]
    fn test_finds_close_root() {
        let aff = AffConfig::new();
        let mut dict = Dictionary::new();
        dict.insert(
            "spelling".to_string(),
            WordEntry::new(FlagSet::new(), WordFlags::empty(), Vec::new()),
        );
        let lookup = Lookup::new(&aff, &dict);
        let mut collector = SuggCollector::new(&lookup, "speling", 5);
        ngram_suggest("speling", &dict, &aff, &mut collector);
        assert!(collector.into_suggestions().contains(&"spelling".to_string()));
    }

    #[test]
    fn test_ph_tag_suggests_real_word() {
        let aff = AffConfig::new();
        let mut dict = Dictionary::new();
        dict.insert(
            "pretty".to_string(),
            WordEntry::new(
                FlagSet::new(),
                WordFlags::empty(),
                vec![("ph".to_string(), "prity".to_string())],
            ),
        );
        let lookup = Lookup::new(&aff, &dict);
        let mut collector = SuggCollector::new(&lookup, "prity", 5);
        ph_suggest("prity", &dict, &mut collector);
        assert!(collector.into_suggestions().contains(&"pretty".to_string()));
    }

    #[test]
    fn test_skips_forbidden_root() {
        let aff = AffConfig::new();
        let mut dict = Dictionary::new();
        dict.insert(
            "spelling".to_string(),
            WordEntry::new(FlagSet::new(), WordFlags::Forbidden, Vec::new()),
        );
        let lookup = Lookup::new(&aff, &dict);
        let mut collector = SuggCollector::new(&lookup, "speling", 5);
        ngram_suggest("speling", &dict, &aff, &mut collector);
        assert!(collector.into_suggestions().is_empty());
    }
}
