/// COMPOUNDRULE pattern matching: a tiny regex dialect over flags instead
/// of characters (spec.md §3, "evaluated as a regular expression over
/// flags"). `flag*` means one-or-more, `flag?` means zero-or-one, `(flag)`
/// and bare `flag` both mean exactly one.
use anyhow::{bail, Result};

use crate::flag::{parse_flags, Flag, FlagMode};

#[derive(Clone, Copy, Debug)]
enum Element {
    Once(Flag),
    Optional(Flag),
    Multi(Flag),
}
use Element::*;

#[derive(Clone, Debug)]
pub struct CompoundRule {
    elems: Vec<Element>,
}

impl CompoundRule {
    pub fn from_str(s: &str, mode: FlagMode) -> Result<Self> {
        let mut rule = CompoundRule { elems: Vec::new() };
        let mut paren_start = None;
        for (i, c) in s.char_indices() {
            if let Some(ppos) = paren_start {
                if c == ')' {
                    let flags = parse_flags(mode, &s[ppos..i])?;
                    if flags.len() != 1 {
                        bail!("COMPOUNDRULE: expected exactly 1 flag in parens");
                    }
                    rule.elems.push(Once(flags[0]));
                    paren_start = None;
                }
            } else if c == '(' {
                paren_start = Some(i + 1);
            } else if c == '*' {
                match rule.elems.last_mut() {
                    Some(e @ Once(_)) => *e = Multi(flag_of(*e)),
                    _ => bail!("COMPOUNDRULE: * must follow a flag"),
                }
            } else if c == '?' {
                match rule.elems.last_mut() {
                    Some(e @ Once(_)) => *e = Optional(flag_of(*e)),
                    _ => bail!("COMPOUNDRULE: ? must follow a flag"),
                }
            } else {
                let flags = parse_flags(mode, &s[i..i + c.len_utf8()])?;
                if flags.len() != 1 {
                    bail!("COMPOUNDRULE: could not parse flag at {:?}", c);
                }
                rule.elems.push(Once(flags[0]));
            }
        }
        if paren_start.is_some() {
            bail!("COMPOUNDRULE: unterminated ( group");
        }
        Ok(rule)
    }

    fn matches_inner(
        &self,
        stem_flags: &[&[Flag]],
        pos: usize,
        elem: usize,
        partial_ok: bool,
    ) -> bool {
        if let Some(flags) = stem_flags.get(pos) {
            match self.elems.get(elem) {
                None => false,
                Some(Once(f)) => {
                    flags.contains(f) && self.matches_inner(stem_flags, pos + 1, elem + 1, partial_ok)
                }
                Some(Optional(f)) => {
                    (flags.contains(f)
                        && self.matches_inner(stem_flags, pos + 1, elem + 1, partial_ok))
                        || self.matches_inner(stem_flags, pos, elem + 1, partial_ok)
                }
                Some(Multi(f)) => {
                    (flags.contains(f) && self.matches_inner(stem_flags, pos + 1, elem, partial_ok))
                        || self.matches_inner(stem_flags, pos, elem + 1, partial_ok)
                }
            }
        } else if partial_ok {
            true
        } else {
            self.elems[elem..]
                .iter()
                .all(|e| !matches!(e, Once(_)))
        }
    }

    /// Does the full sequence of per-segment flag sets satisfy this rule?
    pub fn matches(&self, stem_flags: &[&[Flag]]) -> bool {
        self.matches_inner(stem_flags, 0, 0, false)
    }

    /// Could `stem_flags` be extended (by appending more segments) to
    /// satisfy this rule? Used while incrementally building a compound, to
    /// prune partitions early.
    pub fn partial_match(&self, stem_flags: &[&[Flag]]) -> bool {
        self.matches_inner(stem_flags, 0, 0, true)
    }
}

fn flag_of(e: Element) -> Flag {
    match e {
        Once(f) | Optional(f) | Multi(f) => f,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_compound_rule_star() {
        let rule = CompoundRule::from_str("A*B", FlagMode::CharFlags).unwrap();
        let a = crate::flag::parse_one_flag(FlagMode::CharFlags, "A").unwrap();
        let b = crate::flag::parse_one_flag(FlagMode::CharFlags, "B").unwrap();
        assert!(rule.matches(&[&[a], &[b]]));
        assert!(rule.matches(&[&[a], &[a], &[b]]));
        assert!(!rule.matches(&[&[b]]));
    }

    #[test]
    fn test_compound_rule_optional() {
        let rule = CompoundRule::from_str("A?B", FlagMode::CharFlags).unwrap();
        let a = crate::flag::parse_one_flag(FlagMode::CharFlags, "A").unwrap();
        let b = crate::flag::parse_one_flag(FlagMode::CharFlags, "B").unwrap();
        assert!(rule.matches(&[&[b]]));
        assert!(rule.matches(&[&[a], &[b]]));
        assert!(!rule.matches(&[&[a], &[a], &[b]]));
    }
}
