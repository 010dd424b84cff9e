/// Ordered, longest-match-first string rewriting.
///
/// Hunspell uses the exact same mechanism for three different tables:
/// REP (suggestion-time phonetic replacements), ICONV (input normalization)
/// and OCONV (output normalization). All three are "try every rule that
/// matches here, prefer the longest match, optionally anchored to the
/// start/end of the word". One engine serves all three.
#[derive(Default, Debug)]
struct Rule {
    anchor_begin: bool,
    anchor_end: bool,
    from: String,
    to: String,
}

impl Rule {
    fn matches(&self, word: &str, at_start: bool) -> bool {
        if self.anchor_begin && !at_start {
            false
        } else if self.anchor_end {
            word == self.from
        } else {
            word.starts_with(&self.from)
        }
    }
}

// Kept behind an `Rc` so `Replacements` (and the `AffConfig` holding
// several of them) stays cheaply `Clone`, which the suggest generators
// rely on to share config into closures without lifetime threading.
#[derive(Default, Clone, Debug)]
pub struct Replacements {
    rules: std::rc::Rc<Vec<Rule>>,
}

impl Replacements {
    pub fn builder() -> ReplacementsBuilder {
        ReplacementsBuilder { rules: Vec::new() }
    }

    /// `_` in `from` denotes a literal space, matching Hunspell's REP table
    /// convention for representing multi-word replacements.
    fn longest_match(&self, word: &str, at_start: bool) -> Option<&Rule> {
        let mut longest_len = 0;
        let mut longest_rule: Option<&Rule> = None;
        for rule in self.rules.iter() {
            if rule.from.len() > longest_len && rule.matches(word, at_start) {
                longest_len = rule.from.len();
                longest_rule = Some(rule);
            }
        }
        longest_rule
    }

    /// Apply every matching rule, longest match first, left to right.
    /// Used for ICONV/OCONV (whole-word rewrite) and for REP's "replace
    /// throughout the word" use in CHECKCOMPOUNDREP.
    pub fn conv(&self, word: &str) -> String {
        if self.rules.is_empty() {
            return word.to_string();
        }
        let mut output = String::new();
        let mut skip_to = 0;
        for (i, c) in word.char_indices() {
            if i < skip_to {
                continue;
            }
            if let Some(rule) = self.longest_match(&word[i..], i == 0) {
                output += &rule.to;
                skip_to = i + rule.from.len();
            } else {
                output.push(c);
            }
        }
        output
    }

    /// Yield every single-rule replacement of `word`, in rule order, for
    /// use as a suggestion generator (REP's normal suggest-time role).
    pub fn suggest(&self, word: &str, mut suggest: impl FnMut(String) -> bool) {
        for (i, _) in word.char_indices() {
            for rule in self.rules.iter() {
                if rule.matches(&word[i..], i == 0) {
                    let mut sugg = word[..i].to_string();
                    sugg += &rule.to;
                    sugg += &word[i + rule.from.len()..];
                    if !suggest(sugg) {
                        break;
                    }
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

pub struct ReplacementsBuilder {
    rules: Vec<Rule>,
}

impl ReplacementsBuilder {
    pub fn push(&mut self, from: &str, to: &str) {
        let mut rule = Rule::default();
        let mut from = from;
        if let Some(stripped) = from.strip_prefix('^') {
            from = stripped;
            rule.anchor_begin = true;
        }
        if let Some(stripped) = from.strip_suffix('$') {
            from = stripped;
            rule.anchor_end = true;
        }
        rule.from = from.replace('_', " ");
        rule.to = to.replace('_', " ");
        self.rules.push(rule);
    }

    pub fn build(self) -> Replacements {
        Replacements {
            rules: std::rc::Rc::new(self.rules),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn build(pairs: &[(&str, &str)]) -> Replacements {
        let mut b = Replacements::builder();
        for (from, to) in pairs {
            b.push(from, to);
        }
        b.build()
    }

    #[test]
    fn test_conv_longest_match() {
        let r = build(&[("a", "X"), ("ab", "Y")]);
        assert_eq!(r.conv("abc"), "Yc");
    }

    #[test]
    fn test_conv_anchors() {
        let r = build(&[("^a", "X"), ("a$", "Y")]);
        assert_eq!(r.conv("aba"), "XbY");
    }

    #[test]
    fn test_suggest_rep() {
        let r = build(&[("f", "ph")]);
        let mut out = Vec::new();
        r.suggest("fone", |s| {
            out.push(s);
            true
        });
        assert!(out.contains(&"phone".to_string()));
    }

    #[test]
    fn test_underscore_is_space() {
        let r = build(&[("alot", "a_lot")]);
        assert_eq!(r.conv("alot"), "a lot");
    }
}
