/// The parsed `.aff` file: every recognized directive's effect collected
/// into one immutable settings object (spec.md §3, AffConfig).
use fnv::FnvHashMap;

use crate::affix::AffixIndex;
use crate::compound_rule::CompoundRule;
use crate::flag::{Flag, FlagMode, FlagSet};
use crate::strutil::{PhoneTable, Replacements};

/// A keyboard-adjacency group for the KEY directive, e.g. `"qwertyuiop"` or
/// `"aZS"` where the middle char is adjacent to its neighbors on both sides.
pub type KeyGroups = Vec<String>;

/// A MAP group: characters considered interchangeable with one another for
/// the purposes of suggestion (e.g. accented/unaccented letter pairs).
pub type MapGroups = Vec<Vec<char>>;

#[derive(Clone, Debug, Default)]
pub struct AffConfig {
    pub encoding: String,
    pub flag_mode: FlagMode,
    pub lang: Option<String>,

    /// AF: numeric alias -> flag set. AM: numeric alias -> morphology tags.
    pub flag_aliases: Vec<FlagSet>,
    pub morph_aliases: Vec<Vec<(String, String)>>,

    pub key: KeyGroups,
    pub try_chars: String,
    pub rep: Replacements,
    pub map: MapGroups,
    pub phone: PhoneTable,

    pub nosuggest: Option<Flag>,
    pub nosplitsugs: bool,
    pub sugswithdots: bool,
    pub maxcpdsugs: usize,
    pub maxngramsugs: usize,
    pub maxdiff: i32,
    pub onlymaxdiff: bool,
    pub forbidwarn: bool,
    pub warn: Option<Flag>,

    pub breaks: Vec<String>,
    pub compound_rules: Vec<CompoundRule>,
    pub compound_min: usize,
    pub compound_flag: Option<Flag>,
    pub compound_begin: Option<Flag>,
    pub compound_middle: Option<Flag>,
    pub compound_end: Option<Flag>,
    pub only_in_compound: Option<Flag>,
    pub compound_permit: Option<Flag>,
    pub compound_forbid: Option<Flag>,
    pub compound_root: Option<Flag>,
    pub compound_word_max: Option<usize>,
    pub check_compound_dup: bool,
    pub check_compound_rep: bool,
    pub check_compound_case: bool,
    pub check_compound_triple: bool,
    pub simplified_triple: bool,
    pub check_compound_patterns: Vec<(String, String)>,
    pub force_ucase: Option<Flag>,

    pub circumfix: Option<Flag>,
    pub need_affix: Option<Flag>,
    pub forbidden_word: Option<Flag>,
    pub keep_case: Option<Flag>,
    pub complex_prefixes: bool,
    pub full_strip: bool,
    pub check_sharps: bool,

    pub iconv: Replacements,
    pub oconv: Replacements,
    pub ignore: String,
    pub wordchars: String,

    pub affixes: AffixIndex,
    pub break_recursion_limit: usize,
}

impl AffConfig {
    pub fn new() -> Self {
        AffConfig {
            encoding: "UTF-8".to_string(),
            maxcpdsugs: 3,
            maxngramsugs: 4,
            maxdiff: 5,
            compound_min: 3,
            break_recursion_limit: 10,
            breaks: vec!["-".to_string(), "^-".to_string(), "-$".to_string()],
            ..Default::default()
        }
    }

    /// Resolve an AF alias index (1-based, as written in `.dic` files) to
    /// its flag set. Falls back to an empty set for an out-of-range index
    /// rather than failing the whole load (spec.md §7, unknown-flag
    /// policy applies the same tolerance to malformed aliases).
    pub fn resolve_flag_alias(&self, idx: usize) -> FlagSet {
        self.flag_aliases
            .get(idx.wrapping_sub(1))
            .cloned()
            .unwrap_or_default()
    }

    pub fn resolve_morph_alias(&self, idx: usize) -> Vec<(String, String)> {
        self.morph_aliases
            .get(idx.wrapping_sub(1))
            .cloned()
            .unwrap_or_default()
    }

    pub fn has_compound_support(&self) -> bool {
        self.compound_flag.is_some()
            || self.compound_begin.is_some()
            || !self.compound_rules.is_empty()
    }
}

/// A pattern `{stem prefix, stem suffix}` for CHECKCOMPOUNDPATTERN: a
/// compound boundary is forbidden when the left part ends with the first
/// string and the right part begins with the second.
pub type CheckCompoundPattern = (String, String);

/// Precomputed adjacency lookup for the KEY directive: maps each character
/// to the set of characters considered "nearby" on the keyboard.
#[derive(Clone, Debug, Default)]
pub struct KeyAdjacency(FnvHashMap<char, Vec<char>>);

impl KeyAdjacency {
    pub fn build(groups: &KeyGroups) -> Self {
        let mut map: FnvHashMap<char, Vec<char>> = FnvHashMap::default();
        for group in groups {
            let chars: Vec<char> = group.chars().collect();
            for (i, &c) in chars.iter().enumerate() {
                let mut neighbors = Vec::new();
                if i > 0 {
                    neighbors.push(chars[i - 1]);
                }
                if i + 1 < chars.len() {
                    neighbors.push(chars[i + 1]);
                }
                map.entry(c).or_default().extend(neighbors);
            }
        }
        KeyAdjacency(map)
    }

    pub fn neighbors(&self, c: char) -> &[char] {
        self.0.get(&c).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AffConfig::new();
        assert_eq!(cfg.compound_min, 3);
        assert_eq!(cfg.break_recursion_limit, 10);
        assert_eq!(cfg.breaks.len(), 3);
    }

    #[test]
    fn test_alias_out_of_range_is_empty() {
        let cfg = AffConfig::new();
        assert!(cfg.resolve_flag_alias(1).is_empty());
    }

    #[test]
    fn test_key_adjacency() {
        let groups = vec!["asd".to_string()];
        let adj = KeyAdjacency::build(&groups);
        assert_eq!(adj.neighbors('s'), &['a', 'd']);
        assert_eq!(adj.neighbors('a'), &['s']);
    }
}
