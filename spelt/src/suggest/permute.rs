/// Edit-based candidate generators, run in the fixed order spec.md §4.5
/// lays out. Each function owns one pipeline stage and feeds candidates
/// through a `SuggCollector`, which does the actual lookup-validation,
/// dedup and capping.
use itertools::Itertools;

use crate::aff_config::AffConfig;
use super::suggcollector::SuggCollector;

/// Stage 1: the word, fully uppercased.
pub fn uppercase_suggestion(word: &str, collector: &mut SuggCollector) {
    collector.new_source("uppercase");
    collector.suggest(&word.to_uppercase());
}

/// Stage 2: apply every REP rule wherever it matches (spec.md §4.5 step 2,
/// "very high priority").
pub fn rep_suggestions(word: &str, aff: &AffConfig, collector: &mut SuggCollector) {
    collector.new_source("rep");
    if aff.rep.is_empty() {
        return;
    }
    let mut candidates = Vec::new();
    aff.rep.suggest(word, |s| {
        candidates.push(s);
        true
    });
    for c in candidates {
        collector.suggest(&c);
        if collector.limit() {
            return;
        }
    }
}

/// Stage 3: swap one character for another member of its MAP group.
pub fn map_suggestions(word: &str, aff: &AffConfig, collector: &mut SuggCollector) {
    collector.new_source("map");
    let wvec: Vec<char> = word.chars().collect();
    for group in &aff.map {
        for (i, &c) in wvec.iter().enumerate() {
            if !group.contains(&c) {
                continue;
            }
            for &alt in group {
                if alt == c {
                    continue;
                }
                let mut candidate = wvec.clone();
                candidate[i] = alt;
                collector.suggest(&candidate.into_iter().collect::<String>());
                if collector.limit() {
                    return;
                }
            }
        }
    }
}

/// Stage 4: swap each adjacent pair; for 4-5 letter words also try one
/// double adjacent swap.
pub fn adjacent_swap_suggestions(word: &str, collector: &mut SuggCollector) {
    collector.new_source("adjacent_swap");
    let mut sugg = String::with_capacity(word.len());
    for ((i1, c1), (i2, c2)) in word.char_indices().tuple_windows() {
        sugg.clear();
        sugg.push_str(&word[..i1]);
        sugg.push(c2);
        sugg.push(c1);
        sugg.push_str(&word[i2 + c2.len_utf8()..]);
        collector.suggest(&sugg);
        if collector.limit() {
            return;
        }
    }

    let len = word.chars().count();
    if (4..=5).contains(&len) {
        for ((i1, c1), (_, c2)) in word.char_indices().tuple_windows() {
            sugg.clear();
            sugg.push_str(&word[..i1]);
            sugg.push(c2);
            sugg.push(c1);
            let prefix_len = sugg.len();
            for ((i3, c3), (i4, c4)) in word[prefix_len.min(word.len())..].char_indices().tuple_windows() {
                sugg.truncate(prefix_len);
                sugg.push_str(&word[prefix_len..prefix_len + i3]);
                sugg.push(c4);
                sugg.push(c3);
                sugg.push_str(&word[prefix_len + i4 + c4.len_utf8()..]);
                collector.suggest(&sugg);
                if collector.limit() {
                    return;
                }
            }
        }
    }
}

/// Stage 5: KEY-neighbor and TRY-alphabet single-character replacement.
pub fn key_and_try_replace_suggestions(word: &str, aff: &AffConfig, collector: &mut SuggCollector) {
    collector.new_source("key_try_replace");
    let mut sugg = String::with_capacity(word.len());
    for group in &aff.key {
        for (i, c) in word.char_indices() {
            for (kc1, kc2) in group.chars().tuple_windows() {
                if kc1 == c {
                    sugg.clear();
                    sugg.push_str(&word[..i]);
                    sugg.push(kc2);
                    sugg.push_str(&word[i + c.len_utf8()..]);
                    collector.suggest(&sugg);
                }
                if kc2 == c {
                    sugg.clear();
                    sugg.push_str(&word[..i]);
                    sugg.push(kc1);
                    sugg.push_str(&word[i + c.len_utf8()..]);
                    collector.suggest(&sugg);
                }
                if collector.limit() {
                    return;
                }
            }
        }
    }
    for tc in aff.try_chars.chars() {
        if tc == '-' {
            continue;
        }
        for (i, c) in word.char_indices() {
            sugg.clear();
            sugg.push_str(&word[..i]);
            sugg.push(tc);
            sugg.push_str(&word[i + c.len_utf8()..]);
            collector.suggest(&sugg);
            if collector.limit() {
                return;
            }
        }
    }
}

/// Stage 6: delete one character, and delete a doubled adjacent pair
/// (`bananana` -> `banana`).
pub fn delete_suggestions(word: &str, collector: &mut SuggCollector) {
    collector.new_source("delete_char");
    let mut sugg = String::with_capacity(word.len());
    for (i, c) in word.char_indices() {
        sugg.clear();
        sugg.push_str(&word[..i]);
        sugg.push_str(&word[i + c.len_utf8()..]);
        collector.suggest(&sugg);
        if collector.limit() {
            return;
        }
    }
    for ((i1, c1), (_, c2), (i3, c3), (_, c4)) in word.char_indices().tuple_windows() {
        if c1 == c3 && c2 == c4 {
            sugg.clear();
            sugg.push_str(&word[..i1]);
            sugg.push_str(&word[i3..]);
            collector.suggest(&sugg);
            if collector.limit() {
                return;
            }
        }
    }
}

/// Stage 7: insert a dash or a space between every pair of letters,
/// producing a two-word candidate validated word-by-word; suppressed
/// under NOSPLITSUGS.
pub fn split_suggestions(word: &str, aff: &AffConfig, collector: &mut SuggCollector) {
    collector.new_source("split");
    if aff.nosplitsugs {
        return;
    }
    let mut sugg = String::with_capacity(word.len() + 1);
    for ((_, c1), (i2, c2)) in word.char_indices().tuple_windows() {
        if c1 == '-' || c2 == '-' {
            continue;
        }
        sugg.clear();
        sugg.push_str(&word[..i2]);
        sugg.push(' ');
        sugg.push_str(&word[i2..]);
        collector.suggest_priority(&sugg);
        if collector.limit() {
            return;
        }

        sugg.clear();
        sugg.push_str(&word[..i2]);
        sugg.push('-');
        sugg.push_str(&word[i2..]);
        collector.suggest_priority(&sugg);
        if collector.limit() {
            return;
        }
    }
}

/// Stage 8: insert each TRY-alphabet character at every position.
pub fn insert_suggestions(word: &str, aff: &AffConfig, collector: &mut SuggCollector) {
    collector.new_source("insert_char");
    let mut sugg = String::with_capacity(word.len() + 4);
    for tc in aff.try_chars.chars() {
        if tc == '-' {
            continue;
        }
        for (i, _) in word.char_indices() {
            sugg.clear();
            sugg.push_str(&word[..i]);
            sugg.push(tc);
            sugg.push_str(&word[i..]);
            collector.suggest(&sugg);
            if collector.limit() {
                return;
            }
        }
        sugg.clear();
        sugg.push_str(word);
        sugg.push(tc);
        collector.suggest(&sugg);
        if collector.limit() {
            return;
        }
    }
}

/// Stage 9: move one character to another position at least two slots
/// away (closer moves are covered by the adjacent swap stage).
pub fn move_char_suggestions(word: &str, collector: &mut SuggCollector) {
    collector.new_source("move_char");
    let mut sugg = String::with_capacity(word.len());
    for (i1, c1) in word.char_indices() {
        let after_i1 = i1 + c1.len_utf8();
        for (i2, c2) in word[after_i1..].char_indices() {
            if i2 == 0 {
                continue;
            }
            let real_i2 = after_i1 + i2;
            let after_i2 = real_i2 + c2.len_utf8();
            sugg.clear();
            sugg.push_str(&word[..i1]);
            sugg.push_str(&word[after_i1..after_i2]);
            sugg.push(c1);
            sugg.push_str(&word[after_i2..]);
            collector.suggest(&sugg);

            sugg.clear();
            sugg.push_str(&word[..i1]);
            sugg.push(c2);
            sugg.push_str(&word[i1..real_i2]);
            sugg.push_str(&word[after_i2..]);
            collector.suggest(&sugg);
            if collector.limit() {
                return;
            }
        }
    }
}

/// Stage 10: non-adjacent swap, for words of 5 characters or more.
pub fn long_word_swap_suggestions(word: &str, collector: &mut SuggCollector) {
    collector.new_source("long_word_swap");
    if word.chars().count() < 5 {
        return;
    }
    let mut sugg = String::with_capacity(word.len());
    for (i1, c1) in word.char_indices() {
        let after_i1 = i1 + c1.len_utf8();
        for (i2, c2) in word[after_i1..].char_indices() {
            if i2 == 0 {
                continue;
            }
            let real_i2 = after_i1 + i2;
            let after_i2 = real_i2 + c2.len_utf8();
            sugg.clear();
            sugg.push_str(&word[..i1]);
            sugg.push(c2);
            sugg.push_str(&word[after_i1..real_i2]);
            sugg.push(c1);
            sugg.push_str(&word[after_i2..]);
            collector.suggest(&sugg);
            if collector.limit() {
                return;
            }
        }
    }
}

/// Run every stage in spec order. The caller's `SuggCollector` already
/// knows the word and the global limit.
pub fn permutation_suggest(word: &str, aff: &AffConfig, collector: &mut SuggCollector) {
    uppercase_suggestion(word, collector);
    if collector.limit() {
        return;
    }
    rep_suggestions(word, aff, collector);
    if collector.limit() {
        return;
    }
    map_suggestions(word, aff, collector);
    if collector.limit() {
        return;
    }
    adjacent_swap_suggestions(word, collector);
    if collector.limit() {
        return;
    }
    key_and_try_replace_suggestions(word, aff, collector);
    if collector.limit() {
        return;
    }
    delete_suggestions(word, collector);
    if collector.limit() {
        return;
    }
    split_suggestions(word, aff, collector);
    if collector.limit() {
        return;
    }
    insert_suggestions(word, aff, collector);
    if collector.limit() {
        return;
    }
    move_char_suggestions(word, collector);
    if collector.limit() {
        return;
    }
    long_word_swap_suggestions(word, collector);
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dict::{Dictionary, WordEntry};
    use crate::flag::FlagSet;
    use crate::lookup::Lookup;
    use crate::wordflags::WordFlags;

    #[test]
    fn test_adjacent_swap_finds_word() {
        let cfg = AffConfig::new();
        let mut dict = Dictionary::new();
        dict.insert("cat".to_string(), WordEntry::new(FlagSet::new(), WordFlags::empty(), Vec::new()));
        let lookup = Lookup::new(&cfg, &dict);
        let mut collector = SuggCollector::new(&lookup, "cta", 5);
        adjacent_swap_suggestions("cta", &mut collector);
        assert!(collector.into_suggestions().contains(&"cat".to_string()));
    }

    #[test]
    fn test_delete_doubled_pair() {
        let cfg = AffConfig::new();
        let mut dict = Dictionary::new();
        dict.insert("banana".to_string(), WordEntry::new(FlagSet::new(), WordFlags::empty(), Vec::new()));
        let lookup = Lookup::new(&cfg, &dict);
        let mut collector = SuggCollector::new(&lookup, "bananana", 5);
        delete_suggestions("bananana", &mut collector);
        assert!(collector.into_suggestions().contains(&"banana".to_string()));
    }

    #[test]
    fn test_split_suggestion() {
        let cfg = AffConfig::new();
        let mut dict = Dictionary::new();
        dict.insert("well".to_string(), WordEntry::new(FlagSet::new(), WordFlags::empty(), Vec::new()));
        dict.insert("known".to_string(), WordEntry::new(FlagSet::new(), WordFlags::empty(), Vec::new()));
        let lookup = Lookup::new(&cfg, &dict);
        let mut collector = SuggCollector::new(&lookup, "wellknown", 5);
        split_suggestions("wellknown", &cfg, &mut collector);
        assert_eq!(collector.into_suggestions(), vec!["well known".to_string()]);
    }
}
