/// Suggestion orchestration: sequence the permutation, n-gram and phonetic
/// generators, then normalize, cap and restore casing on whatever they
/// produced (spec.md §4.8).
pub mod ngram_suggest;
pub mod permute;
pub mod phonet;
pub mod suggcollector;

use crate::aff_config::AffConfig;
use crate::casing::{case_variants, titlecase, CapStyle, TurkicCasing};
use crate::dict::Dictionary;
use crate::lookup::Lookup;
use crate::strutil::strip_ignored;
use crate::wordflags::WordFlags;

use ngram_suggest::{ngram_suggest, ph_suggest};
use permute::permutation_suggest;
use phonet::phonet_suggest;
use suggcollector::SuggCollector;

/// How many non-compound suggestions the permutation pass needs to produce
/// before the (much more expensive) n-gram scan is skipped (spec.md §4.8).
const NGRAM_TRIGGER: usize = 2;

pub struct Suggester<'a> {
    lookup: Lookup<'a>,
    dict: &'a Dictionary,
    aff: &'a AffConfig,
}

impl<'a> Suggester<'a> {
    pub fn new(aff: &'a AffConfig, dict: &'a Dictionary) -> Self {
        Suggester {
            lookup: Lookup::new(aff, dict),
            dict,
            aff,
        }
    }

    /// Produce up to `max` ranked suggestions for `word`, which is assumed
    /// to have already failed `Lookup::check`.
    pub fn suggest(&self, word: &str, max: usize) -> Vec<String> {
        if word.is_empty() {
            return Vec::new();
        }
        let converted = self.aff.iconv.conv(word);
        let stripped = strip_ignored(&converted, &self.aff.ignore);
        let captype = CapStyle::classify(&stripped);
        let turkic = TurkicCasing::from_lang_tag(self.aff.lang.as_deref().unwrap_or(""));

        let mut results: Vec<String> = Vec::new();
        let mut seen = std::collections::HashSet::new();
        let mut compound_count = 0usize;

        for variant in case_variants(&stripped, captype, turkic, self.aff.check_sharps) {
            if results.len() >= max {
                break;
            }
            let mut collector = SuggCollector::new(&self.lookup, &variant, max);

            permutation_suggest(&variant, self.aff, &mut collector);
            ph_suggest(&variant, self.dict, &mut collector);

            if collector.len() < NGRAM_TRIGGER && !collector.limit() {
                ngram_suggest(&variant, self.dict, self.aff, &mut collector);
            }

            if !self.aff.phone.is_empty() && !collector.limit() {
                phonet_suggest(&variant, self.dict, self.aff, &mut collector);
            }

            for raw in collector.into_suggestions() {
                let restored = self.restore_case(&raw, &stripped, captype, turkic);
                let cased = self.enforce_keep_case(&restored, &raw);
                if cased == stripped {
                    continue;
                }
                if self.is_compound_suggestion(&cased) {
                    if compound_count >= self.aff.maxcpdsugs {
                        continue;
                    }
                    compound_count += 1;
                }
                let outbound = self.aff.oconv.conv(&cased);
                let outbound = self.append_dots(word, &outbound);
                if seen.insert(outbound.clone()) {
                    results.push(outbound);
                    if results.len() >= max {
                        break;
                    }
                }
            }
        }

        results.truncate(max);
        results
    }

    /// Re-apply the misspelling's original capitalization pattern to a
    /// suggestion found (and validated) in its lowercased or titlecased
    /// form, unless the dictionary entry demands KEEPCASE.
    fn restore_case(&self, sugg: &str, original: &str, captype: CapStyle, turkic: TurkicCasing) -> String {
        let _ = original;
        match captype {
            CapStyle::All => sugg.to_uppercase(),
            CapStyle::Init | CapStyle::HuhInit => titlecase(sugg),
            _ => {
                let _ = turkic;
                sugg.to_string()
            }
        }
    }

    /// If the candidate resolves to a KEEPCASE dictionary entry, prefer the
    /// form Lookup actually accepted over the case-restored guess.
    fn enforce_keep_case(&self, restored: &str, original_hit: &str) -> String {
        if let Some(analysis) = self.lookup.analyze(restored, true) {
            if analysis.word_flags.contains(WordFlags::KeepCase) {
                return original_hit.to_string();
            }
        }
        restored.to_string()
    }

    /// Whether `cased` only validates through compounding, for MAXCPDSUGS
    /// capping (spec.md §4.8 step 5).
    fn is_compound_suggestion(&self, cased: &str) -> bool {
        self.lookup.analyze(cased, true).map_or(false, |a| a.is_compound)
    }

    /// SUGSWITHDOTS: if the misspelling ended with `.` (an abbreviation),
    /// append the same trailing dots to every suggestion.
    fn append_dots(&self, original: &str, sugg: &str) -> String {
        if !self.aff.sugswithdots {
            return sugg.to_string();
        }
        let trailing: String = original.chars().rev().take_while(|&c| c == '.').collect();
        if trailing.is_empty() {
            sugg.to_string()
        } else {
            format!("{}{}", sugg, trailing.chars().rev().collect::<String>())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dict::WordEntry;
    use crate::flag::FlagSet;

    #[test]
    fn test_suggests_close_word() {
        let aff = AffConfig::new();
        let mut dict = Dictionary::new();
        dict.insert(
            "cat".to_string(),
            WordEntry::new(FlagSet::new(), WordFlags::empty(), Vec::new()),
        );
        let suggester = Suggester::new(&aff, &dict);
        let suggs = suggester.suggest("cta", 5);
        assert!(suggs.contains(&"cat".to_string()));
    }

    #[test]
    fn test_restores_titlecase() {
        let aff = AffConfig::new();
        let mut dict = Dictionary::new();
        dict.insert(
            "cat".to_string(),
            WordEntry::new(FlagSet::new(), WordFlags::empty(), Vec::new()),
        );
        let suggester = Suggester::new(&aff, &dict);
        let suggs = suggester.suggest("Cta", 5);
        assert!(suggs.contains(&"Cat".to_string()));
    }

    #[test]
    fn test_never_suggests_the_misspelling_itself() {
        let aff = AffConfig::new();
        let mut dict = Dictionary::new();
        dict.insert(
            "cat".to_string(),
            WordEntry::new(FlagSet::new(), WordFlags::empty(), Vec::new()),
        );
        let suggester = Suggester::new(&aff, &dict);
        let suggs = suggester.suggest("cat", 5);
        assert!(suggs.is_empty());
    }
}
