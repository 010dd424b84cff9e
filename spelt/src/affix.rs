/// Affix entries (PFX/SFX rules), grouped by flag, indexed by trie for fast
/// candidate lookup during affix stripping (spec.md §3, §4.3).
use crate::affix_trie::{PrefixTrie, SuffixTrie};
use crate::condition::Condition;
use crate::flag::{Flag, FlagSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AffixKind {
    Prefix,
    Suffix,
}

/// One rule within a PFX/SFX group: strip a suffix/prefix (if any), add a
/// new one, provided `condition` holds against the remaining stem.
#[derive(Clone, Debug)]
pub struct AffixEntry {
    pub flag: Flag,
    pub strip: String,
    pub add: String,
    pub condition: Condition,
    /// Flags granted to the result word (for two-level affixing and for
    /// compound/needaffix/etc. checks on the derived form).
    pub flags_on_result: FlagSet,
    pub morphology: Vec<(String, String)>,
}

/// All PFX or SFX entries sharing one flag, plus the group-level
/// `cross_product` setting (spec.md §3, Affix Group).
#[derive(Clone, Debug)]
pub struct AffixGroup {
    pub flag: Flag,
    pub kind: AffixKind,
    pub cross_product: bool,
    pub entries: Vec<AffixEntry>,
}

/// Index over every affix entry in the `.aff` file: a reversed-suffix trie
/// for SFX entries (keyed by `add`, so the trie is walked from the end of
/// the word) and a forward-prefix trie for PFX entries (spec.md §3, Affix
/// Index).
#[derive(Clone, Debug, Default)]
pub struct AffixIndex {
    groups: Vec<AffixGroup>,
    suffix_trie: SuffixTrie<u32>,
    prefix_trie: PrefixTrie<u32>,
}

/// Identifies one entry within the index: which group, which entry in it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AffixRef {
    pub group: usize,
    pub entry: usize,
}

impl AffixIndex {
    pub fn new() -> Self {
        AffixIndex::default()
    }

    pub fn add_group(&mut self, group: AffixGroup) {
        let group_idx = self.groups.len() as u32;
        for (entry_idx, entry) in group.entries.iter().enumerate() {
            let key = (group_idx << 16) | entry_idx as u32;
            match group.kind {
                AffixKind::Suffix => self.suffix_trie.insert(&entry.add, key),
                AffixKind::Prefix => self.prefix_trie.insert(&entry.add, key),
            }
        }
        self.groups.push(group);
    }

    pub fn group(&self, idx: usize) -> &AffixGroup {
        &self.groups[idx]
    }

    pub fn groups(&self) -> impl Iterator<Item = &AffixGroup> {
        self.groups.iter()
    }

    pub fn group_for_flag(&self, flag: Flag, kind: AffixKind) -> Option<&AffixGroup> {
        self.groups
            .iter()
            .find(|g| g.flag == flag && g.kind == kind)
    }

    /// Every suffix rule whose `add` could plausibly apply to a suffix of
    /// `word` (by trie walk only -- condition checking is left to the
    /// caller, which knows the candidate stem).
    pub fn matching_suffixes(&self, word: &str) -> Vec<AffixRef> {
        let mut out = Vec::new();
        self.suffix_trie.lookup(word, |key| {
            out.push(decode_ref(key));
            false
        });
        out
    }

    pub fn matching_prefixes(&self, word: &str) -> Vec<AffixRef> {
        let mut out = Vec::new();
        self.prefix_trie.lookup(word, |key| {
            out.push(decode_ref(key));
            false
        });
        out
    }

    pub fn entry(&self, r: AffixRef) -> &AffixEntry {
        &self.groups[r.group].entries[r.entry]
    }

    pub fn entry_group(&self, r: AffixRef) -> &AffixGroup {
        &self.groups[r.group]
    }
}

fn decode_ref(key: u32) -> AffixRef {
    AffixRef {
        group: (key >> 16) as usize,
        entry: (key & 0xFFFF) as usize,
    }
}

impl AffixEntry {
    /// Given a full word already known to carry this suffix, recover the
    /// stem it would have come from (strip `add`, append `strip` back).
    pub fn strip_suffix<'w>(&self, word: &'w str) -> Option<String> {
        let stem_end = word.len().checked_sub(self.add.len())?;
        if !word.is_char_boundary(stem_end) || &word[stem_end..] != self.add {
            return None;
        }
        let mut stem = word[..stem_end].to_string();
        stem.push_str(&self.strip);
        Some(stem)
    }

    pub fn strip_prefix<'w>(&self, word: &'w str) -> Option<String> {
        if !word.starts_with(self.add.as_str()) {
            return None;
        }
        let mut stem = self.strip.clone();
        stem.push_str(&word[self.add.len()..]);
        Some(stem)
    }

    /// Does `stem` satisfy this entry's condition, checked at the end
    /// (suffix) or start (prefix) as appropriate?
    pub fn condition_holds(&self, stem: &str, kind: AffixKind) -> bool {
        match kind {
            AffixKind::Suffix => self.condition.suffix_match(stem),
            AffixKind::Prefix => self.condition.prefix_match(stem),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn suffix_entry(flag: Flag, strip: &str, add: &str, cond: &str) -> AffixEntry {
        AffixEntry {
            flag,
            strip: strip.to_string(),
            add: add.to_string(),
            condition: Condition::new(cond),
            flags_on_result: FlagSet::new(),
            morphology: Vec::new(),
        }
    }

    #[test]
    fn test_strip_suffix_roundtrip() {
        let e = suffix_entry(Flag::from_raw(1), "y", "ies", ".");
        let stem = e.strip_suffix("ponies").unwrap();
        assert_eq!(stem, "pony");
        assert!(e.strip_suffix("cats").is_none());
    }

    #[test]
    fn test_index_lookup() {
        let flag = Flag::from_raw('S' as u32);
        let entries = vec![suffix_entry(flag, "", "s", ".")];
        let group = AffixGroup {
            flag,
            kind: AffixKind::Suffix,
            cross_product: false,
            entries,
        };
        let mut idx = AffixIndex::new();
        idx.add_group(group);
        let refs = idx.matching_suffixes("cats");
        assert!(!refs.is_empty());
        let entry = idx.entry(refs[0]);
        assert_eq!(entry.strip_suffix("cats").unwrap(), "cat");
    }

    #[test]
    fn test_prefix_condition_gate() {
        let flag = Flag::from_raw('P' as u32);
        let e = AffixEntry {
            flag,
            strip: String::new(),
            add: "un".to_string(),
            condition: Condition::new("[^u]"),
            flags_on_result: FlagSet::new(),
            morphology: Vec::new(),
        };
        assert!(e.condition_holds("happy", AffixKind::Prefix));
        assert!(!e.condition_holds("usable", AffixKind::Prefix));
    }
}
