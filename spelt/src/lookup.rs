/// The lookup engine: decides membership and produces an Analysis proving
/// it, threading affix stripping, compounding and casing together
/// (spec.md §4.4).
use crate::aff_config::AffConfig;
use crate::affix::{AffixEntry, AffixKind};
use crate::casing::{case_variants, CapStyle, TurkicCasing};
use crate::dict::{Dictionary, WordEntry};
use crate::flag::{Flag, FlagSet};
use crate::strutil::strip_ignored;
use crate::wordflags::WordFlags;

/// A proof that a word is valid: which stem, which affixes, whether it was
/// reached through compounding, and the flags in effect (spec.md §3,
/// Analysis).
#[derive(Clone, Debug)]
pub struct Analysis {
    pub stem: String,
    pub word_flags: WordFlags,
    pub flags: FlagSet,
    pub is_compound: bool,
    pub had_affix: bool,
}

/// Internal verdict for one candidate word entry: `Forbidden` aborts the
/// whole case-variant (spec.md §4.1, "a hit with FORBIDDENWORD causes
/// lookup to return not-a-word... even if other analyses exist").
enum Verdict {
    Accept(Analysis),
    Reject,
    Forbidden,
}

pub struct Lookup<'a> {
    pub aff: &'a AffConfig,
    pub dict: &'a Dictionary,
}

impl<'a> Lookup<'a> {
    pub fn new(aff: &'a AffConfig, dict: &'a Dictionary) -> Self {
        Lookup { aff, dict }
    }

    /// Public operation: is `word` a correctly spelled token?
    pub fn check(&self, word: &str) -> bool {
        self.analyze(word, true).is_some()
    }

    /// Like `check`, but also usable by suggest generators that need to
    /// forbid NOSUGGEST-tagged analyses.
    pub fn check_allow_nosuggest(&self, word: &str, allow_nosuggest: bool) -> bool {
        self.analyze_with(word, allow_nosuggest, true).is_some()
    }

    pub fn analyze(&self, word: &str, allow_break: bool) -> Option<Analysis> {
        self.analyze_with(word, true, allow_break)
    }

    fn analyze_with(&self, word: &str, allow_nosuggest: bool, allow_break: bool) -> Option<Analysis> {
        if word.is_empty() {
            // Vacuously true: nothing to reject (spec.md §7, InvalidInput).
            return Some(Analysis {
                stem: String::new(),
                word_flags: WordFlags::empty(),
                flags: FlagSet::new(),
                is_compound: false,
                had_affix: false,
            });
        }
        let converted = self.aff.iconv.conv(word);
        let stripped = strip_ignored(&converted, &self.aff.ignore);
        if is_numeric_token(&stripped) {
            return Some(Analysis {
                stem: stripped,
                word_flags: WordFlags::empty(),
                flags: FlagSet::new(),
                is_compound: false,
                had_affix: false,
            });
        }
        let captype = CapStyle::classify(&stripped);
        let turkic = TurkicCasing::from_lang_tag(self.aff.lang.as_deref().unwrap_or(""));
        for variant in case_variants(&stripped, captype, turkic, self.aff.check_sharps) {
            let lowered = variant != stripped;
            if let Some(analysis) = self.good_forms(&variant, captype, lowered, allow_nosuggest, allow_break, 0) {
                return Some(analysis);
            }
        }
        None
    }

    fn good_forms(
        &self,
        word: &str,
        captype: CapStyle,
        lowered: bool,
        allow_nosuggest: bool,
        allow_break: bool,
        break_depth: usize,
    ) -> Option<Analysis> {
        match self.affix_forms(word, captype, lowered, allow_nosuggest, true) {
            Verdict::Accept(a) => return Some(a),
            Verdict::Forbidden => return None,
            Verdict::Reject => {}
        }
        if self.aff.has_compound_support() {
            if let Some(a) = self.compound_forms(word, captype, allow_nosuggest) {
                return Some(a);
            }
        }
        if allow_break && break_depth < self.aff.break_recursion_limit {
            if let Some(a) = self.try_break(word, captype, lowered, allow_nosuggest, break_depth) {
                return Some(a);
            }
        }
        None
    }

    // ---- affix_forms -----------------------------------------------

    /// Try: stem as-is, then (prefix?, suffix?) decompositions, then a
    /// second affixing level (prefix-of-prefix under COMPLEXPREFIXES, else
    /// suffix-of-suffix).
    fn affix_forms(
        &self,
        word: &str,
        captype: CapStyle,
        lowered: bool,
        allow_nosuggest: bool,
        top_level: bool,
    ) -> Verdict {
        if let Some(v) = self.try_stem(word, captype, lowered, allow_nosuggest, top_level, None, None) {
            return v;
        }

        // suffix-only
        for sref in self.aff.affixes.matching_suffixes(word) {
            let entry = self.aff.affixes.entry(sref);
            if let Some(stem) = self.strip_and_check(entry, word, AffixKind::Suffix) {
                if let Some(v) = self.try_stem(
                    &stem,
                    captype,
                    lowered,
                    allow_nosuggest,
                    top_level,
                    None,
                    Some(entry),
                ) {
                    return v;
                }
            }
        }

        // prefix-only
        for pref in self.aff.affixes.matching_prefixes(word) {
            let entry = self.aff.affixes.entry(pref);
            if let Some(stem) = self.strip_and_check(entry, word, AffixKind::Prefix) {
                if let Some(v) = self.try_stem(
                    &stem,
                    captype,
                    lowered,
                    allow_nosuggest,
                    top_level,
                    Some(entry),
                    None,
                ) {
                    return v;
                }
            }
        }

        // both: prefix and suffix, requiring cross_product on both
        for pref in self.aff.affixes.matching_prefixes(word) {
            let pentry = self.aff.affixes.entry(pref);
            let pgroup = self.aff.affixes.entry_group(pref);
            if !pgroup.cross_product {
                continue;
            }
            let Some(after_prefix) = self.strip_and_check(pentry, word, AffixKind::Prefix) else {
                continue;
            };
            for sref in self.aff.affixes.matching_suffixes(&after_prefix) {
                let sentry = self.aff.affixes.entry(sref);
                let sgroup = self.aff.affixes.entry_group(sref);
                if !sgroup.cross_product {
                    continue;
                }
                if let Some(stem) = self.strip_and_check(sentry, &after_prefix, AffixKind::Suffix) {
                    if let Some(v) = self.try_stem(
                        &stem,
                        captype,
                        lowered,
                        allow_nosuggest,
                        top_level,
                        Some(pentry),
                        Some(sentry),
                    ) {
                        return v;
                    }
                }
            }
        }

        // second level: prefix-of-prefix (COMPLEXPREFIXES) or
        // suffix-of-suffix, applied to the outer word before the first pass.
        if self.aff.complex_prefixes {
            for pref in self.aff.affixes.matching_prefixes(word) {
                let pentry = self.aff.affixes.entry(pref);
                if let Some(inner) = self.strip_and_check(pentry, word, AffixKind::Prefix) {
                    if let Verdict::Accept(mut a) =
                        self.affix_forms(&inner, captype, lowered, allow_nosuggest, top_level)
                    {
                        a.flags.extend(&pentry.flags_on_result);
                        a.had_affix = true;
                        return Verdict::Accept(a);
                    }
                }
            }
        } else {
            for sref in self.aff.affixes.matching_suffixes(word) {
                let sentry = self.aff.affixes.entry(sref);
                if let Some(inner) = self.strip_and_check(sentry, word, AffixKind::Suffix) {
                    if let Verdict::Accept(mut a) =
                        self.affix_forms(&inner, captype, lowered, allow_nosuggest, top_level)
                    {
                        a.flags.extend(&sentry.flags_on_result);
                        a.had_affix = true;
                        return Verdict::Accept(a);
                    }
                }
            }
        }

        Verdict::Reject
    }

    fn strip_and_check(&self, entry: &AffixEntry, word: &str, kind: AffixKind) -> Option<String> {
        let stem = match kind {
            AffixKind::Suffix => entry.strip_suffix(word)?,
            AffixKind::Prefix => entry.strip_prefix(word)?,
        };
        if stem.is_empty() && !self.aff.full_strip {
            return None;
        }
        if !entry.condition_holds(&stem, kind) {
            return None;
        }
        Some(stem)
    }

    /// Look up `stem` in the dictionary store and validate it against the
    /// (possibly-absent) prefix/suffix that were applied to reach it.
    fn try_stem(
        &self,
        stem: &str,
        captype: CapStyle,
        lowered: bool,
        allow_nosuggest: bool,
        top_level: bool,
        pfx: Option<&AffixEntry>,
        sfx: Option<&AffixEntry>,
    ) -> Option<Verdict> {
        let homonyms = self.dict.get(stem)?;
        for entry in homonyms.iter() {
            if entry.word_flags.contains(WordFlags::Forbidden) {
                return Some(Verdict::Forbidden);
            }
            if entry.word_flags.contains(WordFlags::Warn) && self.aff.forbidwarn {
                continue;
            }
            if let Some(pfx) = pfx {
                if !entry.flags.contains(pfx.flag) {
                    continue;
                }
            }
            if let Some(sfx) = sfx {
                if !entry.flags.contains(sfx.flag) {
                    continue;
                }
            }
            if pfx.is_some() && sfx.is_none() && entry.word_flags.contains(WordFlags::Circumfix) {
                continue;
            }
            if sfx.is_some() && pfx.is_none() && entry.word_flags.contains(WordFlags::Circumfix) {
                continue;
            }
            let had_affix = pfx.is_some() || sfx.is_some();
            if entry.word_flags.contains(WordFlags::NeedAffix) && !had_affix {
                continue;
            }
            if !top_level && had_affix {
                let forbidden = pfx.map_or(false, |p| p.flags_on_result.contains_opt(self.aff.compound_forbid))
                    || sfx.map_or(false, |s| s.flags_on_result.contains_opt(self.aff.compound_forbid));
                if self.aff.compound_forbid.is_some() && forbidden {
                    continue;
                }
                if self.aff.compound_permit.is_some() {
                    let permitted = pfx.map_or(true, |p| p.flags_on_result.contains_opt(self.aff.compound_permit))
                        && sfx.map_or(true, |s| s.flags_on_result.contains_opt(self.aff.compound_permit));
                    if !permitted {
                        continue;
                    }
                }
            }
            if entry.word_flags.contains(WordFlags::OnlyInCompound) && top_level {
                continue;
            }
            if entry.word_flags.contains(WordFlags::NoSuggest) && !allow_nosuggest {
                continue;
            }
            if entry.word_flags.contains(WordFlags::KeepCase) && captype == CapStyle::All && lowered {
                continue;
            }
            let mut flags = entry.flags.clone();
            if let Some(pfx) = pfx {
                flags.extend(&pfx.flags_on_result);
            }
            if let Some(sfx) = sfx {
                flags.extend(&sfx.flags_on_result);
            }
            return Some(Verdict::Accept(Analysis {
                stem: stem.to_string(),
                word_flags: entry.word_flags,
                flags,
                is_compound: false,
                had_affix,
            }));
        }
        None
    }

    // ---- compound_forms ----------------------------------------------

    fn compound_forms(&self, word: &str, captype: CapStyle, allow_nosuggest: bool) -> Option<Analysis> {
        let chars: Vec<char> = word.chars().collect();
        let max_parts = self.aff.compound_word_max.unwrap_or(chars.len());
        let mut parts: Vec<(String, Analysis)> = Vec::new();
        self.split_compound(&chars, 0, &mut parts, max_parts, captype, allow_nosuggest)
            .map(|analyses| {
                let stem = analyses.iter().map(|(s, _)| s.clone()).collect::<Vec<_>>().join("");
                let mut flags = FlagSet::new();
                for (_, a) in &analyses {
                    flags.extend(&a.flags);
                }
                let word_flags = analyses.last().map(|(_, a)| a.word_flags).unwrap_or_default();
                Analysis {
                    stem,
                    word_flags,
                    flags,
                    is_compound: true,
                    had_affix: false,
                }
            })
    }

    fn split_compound(
        &self,
        chars: &[char],
        start: usize,
        acc: &mut Vec<(String, Analysis)>,
        max_parts: usize,
        captype: CapStyle,
        allow_nosuggest: bool,
    ) -> Option<Vec<(String, Analysis)>> {
        if start == chars.len() {
            if acc.len() >= 2 && self.compound_sequence_ok(acc, captype) {
                return Some(acc.clone());
            }
            return None;
        }
        let min_len = self.aff.compound_min.max(1);
        for end in (start + min_len..=chars.len()).rev() {
            if chars.len() - end > 0 && chars.len() - end < min_len {
                continue;
            }
            let segment: String = chars[start..end].iter().collect();
            let is_last = end == chars.len();
            let is_first = start == 0;
            let role_ok = self.segment_role_ok(&segment, is_first, is_last);
            if !role_ok.0 {
                continue;
            }
            if compound_budget(acc, &role_ok.1) > max_parts {
                continue;
            }
            acc.push((segment, role_ok.1));
            if let Some(found) =
                self.split_compound(chars, end, acc, max_parts, captype, allow_nosuggest)
            {
                return Some(found);
            }
            acc.pop();
        }
        None
    }

    /// Check whether `segment` can play the role implied by its position,
    /// by either the by-flag or by-rule gating mechanism (spec.md §4.4,
    /// compound_forms (a) and (b)). Returns the analysis used so later
    /// rule-matching and dup/case checks can inspect its flags.
    fn segment_role_ok(&self, segment: &str, is_first: bool, is_last: bool) -> (bool, Analysis) {
        let captype = CapStyle::classify(segment);
        let verdict = self.affix_forms(segment, captype, false, false, false);
        let analysis = match verdict {
            Verdict::Accept(a) => a,
            _ => {
                return (
                    false,
                    Analysis {
                        stem: segment.to_string(),
                        word_flags: WordFlags::empty(),
                        flags: FlagSet::new(),
                        is_compound: false,
                        had_affix: false,
                    },
                )
            }
        };

        if !self.aff.compound_rules.is_empty() {
            // By-rule gating is checked once the full sequence is known;
            // here we only confirm the segment is a word at all.
            return (true, analysis);
        }

        let by_flag = if is_first {
            analysis.word_flags.contains(WordFlags::CompoundBegin)
                || analysis.flags.contains_opt(self.aff.compound_flag)
        } else if is_last {
            analysis.word_flags.contains(WordFlags::CompoundEnd)
                || analysis.flags.contains_opt(self.aff.compound_flag)
        } else {
            analysis.word_flags.contains(WordFlags::CompoundMiddle)
                || analysis.flags.contains_opt(self.aff.compound_flag)
        };
        (by_flag, analysis)
    }

    fn compound_sequence_ok(&self, acc: &[(String, Analysis)], captype: CapStyle) -> bool {
        if !self.aff.compound_rules.is_empty() {
            let per_segment: Vec<Vec<Flag>> = acc
                .iter()
                .map(|(_, a)| a.flags.iter().copied().collect())
                .collect();
            let refs: Vec<&[Flag]> = per_segment.iter().map(|v| v.as_slice()).collect();
            if !self.aff.compound_rules.iter().any(|r| r.matches(&refs)) {
                return false;
            }
        }

        if self.aff.check_compound_dup {
            for w in acc.windows(2) {
                if w[0].0 == w[1].0 {
                    return false;
                }
            }
        }

        if self.aff.check_compound_case {
            for w in acc.windows(2) {
                let left_last = w[0].0.chars().last();
                let right_first = w[1].0.chars().next();
                if let (Some(l), Some(r)) = (left_last, right_first) {
                    if l.is_uppercase() || r.is_uppercase() {
                        return false;
                    }
                }
            }
        }

        if self.aff.check_compound_triple {
            let joined: String = acc.iter().map(|(s, _)| s.as_str()).collect();
            let chars: Vec<char> = joined.chars().collect();
            for w in chars.windows(3) {
                if w[0] == w[1] && w[1] == w[2] {
                    if self.aff.simplified_triple {
                        continue;
                    }
                    return false;
                }
            }
        }

        for (a, b) in &self.aff.check_compound_patterns {
            for w in acc.windows(2) {
                if w[0].0.ends_with(a.as_str()) && w[1].0.starts_with(b.as_str()) {
                    return false;
                }
            }
        }

        let any_force_ucase = acc
            .iter()
            .any(|(_, a)| a.word_flags.contains(WordFlags::ForceUcase));
        if any_force_ucase && captype != CapStyle::Init && captype != CapStyle::All {
            return false;
        }

        if self.aff.check_compound_rep && !self.aff.rep.is_empty() {
            let joined: String = acc.iter().map(|(s, _)| s.as_str()).collect();
            let replaced = self.aff.rep.conv(&joined);
            if replaced != joined && self.dict.contains(&replaced) {
                return false;
            }
        }

        true
    }

    // ---- BREAK ---------------------------------------------------------

    /// Try every BREAK pattern; succeed if some split puts a word (whole,
    /// valid via full `lookup`) on both sides (spec.md §4.2, §4.4).
    fn try_break(
        &self,
        word: &str,
        captype: CapStyle,
        lowered: bool,
        allow_nosuggest: bool,
        depth: usize,
    ) -> Option<Analysis> {
        for pat in &self.aff.breaks {
            let anchor_start = pat.starts_with('^');
            let anchor_end = pat.ends_with('$');
            let needle = pat.trim_start_matches('^').trim_end_matches('$');
            if needle.is_empty() {
                continue;
            }
            let mut search_from = 0;
            while let Some(rel) = word[search_from..].find(needle) {
                let at = search_from + rel;
                search_from = at + needle.len().max(1);
                if anchor_start && at != 0 {
                    continue;
                }
                let right_start = at + needle.len();
                if anchor_end && right_start != word.len() {
                    continue;
                }
                let left = &word[..at];
                let right = &word[right_start..];
                if left.is_empty() && right.is_empty() {
                    continue;
                }
                let left_ok = left.is_empty()
                    || self
                        .good_forms(left, captype, lowered, allow_nosuggest, true, depth + 1)
                        .is_some();
                let right_ok = right.is_empty()
                    || self
                        .good_forms(right, captype, lowered, allow_nosuggest, true, depth + 1)
                        .is_some();
                if left_ok && right_ok {
                    return Some(Analysis {
                        stem: word.to_string(),
                        word_flags: WordFlags::empty(),
                        flags: FlagSet::new(),
                        is_compound: false,
                        had_affix: false,
                    });
                }
            }
        }
        None
    }
}

/// How many parts `acc` plus a tentative `next` segment count toward
/// COMPOUNDWORDMAX: COMPOUNDROOT-bearing segments collectively count at
/// most once, every other segment counts normally (spec.md §4.4).
fn compound_budget(acc: &[(String, Analysis)], next: &Analysis) -> usize {
    let mut non_root = 0usize;
    let mut has_root = false;
    for word_flags in acc.iter().map(|(_, a)| a.word_flags).chain(std::iter::once(next.word_flags)) {
        if word_flags.contains(WordFlags::CompoundRoot) {
            has_root = true;
        } else {
            non_root += 1;
        }
    }
    non_root + usize::from(has_root)
}

/// Accept strings composed only of digits and common numeric separators
/// (spec.md §4.4 step 1, "purely numeric/separator-composed").
fn is_numeric_token(s: &str) -> bool {
    !s.is_empty()
        && s.chars().any(|c| c.is_ascii_digit())
        && s.chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-' | '/'))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::affix::{AffixGroup, AffixIndex};
    use crate::condition::Condition;
    use crate::flag::FlagMode;

    fn base_cfg() -> AffConfig {
        AffConfig::new()
    }

    #[test]
    fn test_plain_stem_lookup() {
        let cfg = base_cfg();
        let mut dict = Dictionary::new();
        dict.insert(
            "cat".to_string(),
            WordEntry::new(FlagSet::new(), WordFlags::empty(), Vec::new()),
        );
        let lookup = Lookup::new(&cfg, &dict);
        assert!(lookup.check("cat"));
        assert!(!lookup.check("dog"));
    }

    #[test]
    fn test_empty_word_is_vacuously_accepted() {
        let cfg = base_cfg();
        let dict = Dictionary::new();
        let lookup = Lookup::new(&cfg, &dict);
        assert!(lookup.check(""));
    }

    #[test]
    fn test_numeric_token_accepted() {
        let cfg = base_cfg();
        let dict = Dictionary::new();
        let lookup = Lookup::new(&cfg, &dict);
        assert!(lookup.check("12,345.67"));
    }

    #[test]
    fn test_forbidden_word_rejected() {
        let mut cfg = base_cfg();
        let forbid = crate::flag::parse_one_flag(FlagMode::CharFlags, "!").unwrap();
        cfg.forbidden_word = Some(forbid);
        let mut dict = Dictionary::new();
        dict.insert(
            "bad".to_string(),
            WordEntry::new(FlagSet::from_flags(vec![forbid]), WordFlags::Forbidden, Vec::new()),
        );
        let lookup = Lookup::new(&cfg, &dict);
        assert!(!lookup.check("bad"));
    }

    #[test]
    fn test_suffix_affix_form() {
        let mut cfg = base_cfg();
        let flag = Flag::from_raw('S' as u32);
        let mut idx = AffixIndex::new();
        idx.add_group(AffixGroup {
            flag,
            kind: AffixKind::Suffix,
            cross_product: false,
            entries: vec![AffixEntry {
                flag,
                strip: String::new(),
                add: "s".to_string(),
                condition: Condition::always(),
                flags_on_result: FlagSet::new(),
                morphology: Vec::new(),
            }],
        });
        cfg.affixes = idx;
        let mut dict = Dictionary::new();
        dict.insert(
            "cat".to_string(),
            WordEntry::new(FlagSet::from_flags(vec![flag]), WordFlags::empty(), Vec::new()),
        );
        let lookup = Lookup::new(&cfg, &dict);
        assert!(lookup.check("cats"));
        assert!(!lookup.check("dogs"));
    }

    #[test]
    fn test_compound_by_flag() {
        let mut cfg = base_cfg();
        let begin = Flag::from_raw('B' as u32);
        let end = Flag::from_raw('E' as u32);
        cfg.compound_begin = Some(begin);
        cfg.compound_end = Some(end);
        cfg.compound_min = 2;
        let mut dict = Dictionary::new();
        dict.insert(
            "sun".to_string(),
            WordEntry::new(FlagSet::from_flags(vec![begin]), WordFlags::CompoundBegin, Vec::new()),
        );
        dict.insert(
            "set".to_string(),
            WordEntry::new(FlagSet::from_flags(vec![end]), WordFlags::CompoundEnd, Vec::new()),
        );
        let lookup = Lookup::new(&cfg, &dict);
        assert!(lookup.check("sunset"));
    }

    #[test]
    fn test_break_hyphen_split() {
        let cfg = base_cfg();
        let mut dict = Dictionary::new();
        dict.insert("well".to_string(), WordEntry::new(FlagSet::new(), WordFlags::empty(), Vec::new()));
        dict.insert("known".to_string(), WordEntry::new(FlagSet::new(), WordFlags::empty(), Vec::new()));
        let lookup = Lookup::new(&cfg, &dict);
        assert!(lookup.check("well-known"));
    }
}
