/// Flags and flag sets.
///
/// A flag is an opaque token: it only matters whether two flags are equal,
/// never what value they hold. The `.aff` file's `FLAG` directive selects
/// how flags are *written* (single char, two chars, decimal, or a single
/// UTF-8 codepoint) but that's purely a parsing concern -- once parsed,
/// every flag lives in one numeric space so comparisons never need to know
/// which mode produced it.
use anyhow::{bail, Result};
use smallvec::SmallVec;

/// How flags are encoded as text in the `.aff`/`.dic` files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlagMode {
    /// One character per flag (the default).
    CharFlags,
    /// Two characters per flag, concatenated with no separator.
    DoubleCharFlags,
    /// Flags are comma-separated decimal integers.
    NumericFlags,
    /// One Unicode codepoint per flag (`FLAG UTF-8`).
    Utf8Flags,
}

impl Default for FlagMode {
    fn default() -> Self {
        FlagMode::CharFlags
    }
}

/// An opaque affix-class or property token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Flag(u32);

impl Flag {
    /// Used by callers (e.g. CompoundRule, AffConfig) that need to mint a
    /// flag from an already-normalized numeric id, such as when resolving
    /// an AF alias table entry.
    pub(crate) fn from_raw(v: u32) -> Self {
        Flag(v)
    }
}

/// An unordered, small collection of flags with fast membership testing.
/// Kept sorted so that membership is a binary search; most words carry a
/// handful of flags so a `SmallVec` beats a hash set in practice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlagSet(SmallVec<[Flag; 4]>);

impl FlagSet {
    pub fn new() -> Self {
        FlagSet(SmallVec::new())
    }

    pub fn from_flags(mut flags: Vec<Flag>) -> Self {
        flags.sort_unstable();
        flags.dedup();
        FlagSet(SmallVec::from_vec(flags))
    }

    pub fn contains(&self, flag: Flag) -> bool {
        self.0.binary_search(&flag).is_ok()
    }

    pub fn contains_opt(&self, flag: Option<Flag>) -> bool {
        match flag {
            Some(f) => self.contains(f),
            None => false,
        }
    }

    pub fn insert(&mut self, flag: Flag) {
        if let Err(pos) = self.0.binary_search(&flag) {
            self.0.insert(pos, flag);
        }
    }

    pub fn extend(&mut self, other: &FlagSet) {
        for f in other.iter() {
            self.insert(*f);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        self.0.iter()
    }

    pub fn intersects_any(&self, flags: &[Option<Flag>]) -> bool {
        flags.iter().any(|f| self.contains_opt(*f))
    }
}

/// Parse a flag-list string (e.g. a `.dic` entry's `/ABC` suffix, or an
/// `.aff` directive's flag argument) according to `mode`.
pub fn parse_flags(mode: FlagMode, s: &str) -> Result<Vec<Flag>> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(Vec::new());
    }
    match mode {
        FlagMode::CharFlags | FlagMode::Utf8Flags => {
            Ok(s.chars().map(|c| Flag(c as u32)).collect())
        }
        FlagMode::DoubleCharFlags => {
            let chars: Vec<char> = s.chars().collect();
            if chars.len() % 2 != 0 {
                bail!("odd number of characters in long-flag list {:?}", s);
            }
            Ok(chars
                .chunks(2)
                .map(|pair| Flag((pair[0] as u32) << 16 | pair[1] as u32))
                .collect())
        }
        FlagMode::NumericFlags => s
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<u32>()
                    .map(Flag)
                    .map_err(|e| anyhow::anyhow!("bad numeric flag {:?}: {}", part, e))
            })
            .collect(),
    }
}

/// Parse exactly one flag, as used by single-flag `.aff` directives like
/// `NOSUGGEST X` or `COMPOUNDBEGIN Y`.
pub fn parse_one_flag(mode: FlagMode, s: &str) -> Result<Flag> {
    let flags = parse_flags(mode, s)?;
    match flags.as_slice() {
        [f] => Ok(*f),
        _ => bail!("expected exactly one flag, got {:?}", s),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_char_flags() {
        let flags = parse_flags(FlagMode::CharFlags, "AB").unwrap();
        assert_eq!(flags, vec![Flag('A' as u32), Flag('B' as u32)]);
    }

    #[test]
    fn test_long_flags() {
        let flags = parse_flags(FlagMode::DoubleCharFlags, "aabbcc").unwrap();
        assert_eq!(flags.len(), 3);
        assert_ne!(flags[0], flags[1]);
    }

    #[test]
    fn test_numeric_flags() {
        let flags = parse_flags(FlagMode::NumericFlags, "12,345").unwrap();
        assert_eq!(flags, vec![Flag(12), Flag(345)]);
    }

    #[test]
    fn test_flagset_membership() {
        let mut set = FlagSet::new();
        let a = Flag('A' as u32);
        let b = Flag('B' as u32);
        set.insert(a);
        assert!(set.contains(a));
        assert!(!set.contains(b));
    }
}
